// src/scrape/reviews.rs
//
// Page structure (reviews_to_do):
//   <div class="card">
//     <h5 class="card-header">1st review</h5>
//     <table><tbody>
//       <tr>
//         <td><code>SUBMISSION-ID</code></td>
//         <td>...</td>
//         <td><a href="...">Learner Name</a> <em>(learner@mail)</em></td>
//         <td>85</td>
//         <td><a class="btn ..." href="...">Start review</a></td>
//       </tr>
//     </tbody></table>
//   </div>
// Anything that deviates is skipped, never an error: cards without an
// ordinal caption are unrelated page furniture.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::core::html::{
    attr_ci, find_class_elem_ci, find_elem_ci, has_class, next_elem_ci, open_tag,
    open_tags_with_class, slice_between_ci, text,
};
use crate::core::sanitize::strip_parens;
use crate::data::Review;

static REVIEW_CAPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:st|nd|rd|th) review)").unwrap());

/// Extract every complete review row, in document order.
pub fn extract_reviews(doc: &str) -> Vec<Review> {
    let mut out = Vec::new();
    let cards = open_tags_with_class(doc, "div", "card");
    for (i, &start) in cards.iter().enumerate() {
        // A card's slice runs to the next card start; close tags of nested
        // divs make real block matching unreliable.
        let end = cards.get(i + 1).copied().unwrap_or(doc.len());
        scan_card(&doc[start..end], &mut out);
    }
    out
}

fn scan_card(card: &str, out: &mut Vec<Review>) {
    let Some(review_type) = card_review_type(card) else {
        crate::logd!("card skipped: no ordinal review caption");
        return;
    };
    let Some((t_s, t_e)) = next_elem_ci(card, "table", 0) else { return };
    let table = &card[t_s..t_e];
    let body = slice_between_ci(table, "<tbody", "</tbody>").unwrap_or(table);

    let mut pos = 0usize;
    while let Some((tr_s, tr_e)) = next_elem_ci(body, "tr", pos) {
        let tr = &body[tr_s..tr_e];
        pos = tr_e;
        if let Some(r) = row_review(tr, &review_type) {
            out.push(r);
        }
    }
}

/// Caption of the card header, matched against "<ordinal> review".
/// Missing header or non-matching caption disqualifies the whole card.
fn card_review_type(card: &str) -> Option<String> {
    let header = find_class_elem_ci(card, "h5", "card-header")?;
    let caption = text(header);
    let m = REVIEW_CAPTION.captures(caption.trim())?;
    Some(m[1].to_string())
}

fn row_review(tr: &str, review_type: &str) -> Option<Review> {
    let mut cells = Vec::new();
    let mut pos = 0usize;
    while let Some((td_s, td_e)) = next_elem_ci(tr, "td", pos) {
        cells.push(&tr[td_s..td_e]);
        pos = td_e;
    }
    // Header-only or collapsed rows
    if cells.len() < 5 {
        return None;
    }

    let id = find_elem_ci(cells[0], "code").map(text).unwrap_or_default();

    let learner = cells[2];
    let name = find_elem_ci(learner, "a").map(text).unwrap_or_default();
    let email = find_elem_ci(learner, "em")
        .map(|b| strip_parens(&text(b)))
        .unwrap_or_default();

    let score = text(cells[3]);
    let link = review_link(cells[4]).unwrap_or_default();

    let review = Review {
        id,
        review_type: s!(review_type),
        name,
        email,
        score,
        link,
    };
    review.is_complete().then_some(review)
}

/// Hrefs scraped from a fetched page may be relative (a browser DOM would
/// have absolutized them); resolve against the page URL. Already-absolute
/// links pass through unchanged. Saved-file input keeps the raw hrefs.
pub fn absolutize_links(reviews: &mut [Review], base: &Url) {
    for r in reviews.iter_mut() {
        if let Ok(abs) = base.join(&r.link) {
            r.link = abs.into();
        }
    }
}

/// First button-styled anchor whose visible text mentions "review".
fn review_link(actions: &str) -> Option<String> {
    let mut pos = 0usize;
    while let Some((a_s, a_e)) = next_elem_ci(actions, "a", pos) {
        let block = &actions[a_s..a_e];
        pos = a_e;
        if !has_class(open_tag(block), "btn") {
            continue;
        }
        if !text(block).contains("review") {
            continue;
        }
        return attr_ci(open_tag(block), "href");
    }
    None
}
