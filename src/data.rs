// src/data.rs

/// One review-queue entry scraped from the page.
/// `score` stays raw text: the column sometimes holds placeholders like "-".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Review {
    pub id: String,
    pub review_type: String,
    pub name: String,
    pub email: String,
    pub score: String,
    pub link: String,
}

impl Review {
    /// A row only counts once every field resolved to something non-empty.
    pub fn is_complete(&self) -> bool {
        !(self.id.is_empty()
            || self.review_type.is_empty()
            || self.name.is_empty()
            || self.email.is_empty()
            || self.score.is_empty()
            || self.link.is_empty())
    }
}
