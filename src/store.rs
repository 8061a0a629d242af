// src/store.rs
use std::error::Error;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Durable, append-only set of already-exported review ids.
/// On disk: one JSON array of strings. Insertion order is preserved so a
/// load/save cycle leaves the file byte-identical.
pub struct SeenIds {
    path: PathBuf,
    ids: Vec<String>,
}

impl SeenIds {
    /// Missing file means "nothing exported yet", not an error.
    /// A present-but-corrupt blob does fail; delete the file to reset.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let path = path.as_ref().to_path_buf();
        let ids = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, ids })
    }

    pub fn save(&self) -> Result<(), Box<dyn Error>> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string(&self.ids)?)?;
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    /// Append ids not yet present, keeping first-seen order.
    pub fn extend<I: IntoIterator<Item = String>>(&mut self, ids: I) {
        for id in ids {
            if !self.contains(&id) {
                self.ids.push(id);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
