use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Epub,
    Text,
    Other,
}

impl DocumentFormat {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "epub" => DocumentFormat::Epub,
            "txt" => DocumentFormat::Text,
            _ => DocumentFormat::Other,
        }
    }
}

/// Title, author and cover attached to a loaded book.
///
/// `cover` holds either a `data:` URL built from the archive or a remote
/// image URL found by the online lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub cover: Option<String>,
}

impl BookMetadata {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.cover.is_none()
    }

    /// Fill fields that are still missing from `other`; present fields win.
    pub fn merge_missing(&mut self, other: BookMetadata) {
        if self.title.is_none() {
            self.title = other.title;
        }
        if self.author.is_none() {
            self.author = other.author;
        }
        if self.cover.is_none() {
            self.cover = other.cover;
        }
    }

    pub fn display_title(&self) -> Option<String> {
        match (&self.title, &self.author) {
            (Some(t), Some(a)) => Some(format!("{t} by {a}")),
            (Some(t), None) => Some(t.clone()),
            (None, Some(a)) => Some(a.clone()),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedBook {
    pub text: String,
    pub metadata: BookMetadata,
}

/// Result of loading a file from disk, ready to replace the current text.
#[derive(Debug, Clone)]
pub struct LoadedText {
    pub text: String,
    /// `Some` for EPUBs, `None` for plain text which clears any book metadata.
    pub metadata: Option<BookMetadata>,
    pub source: PathBuf,
    pub format: DocumentFormat,
}
