use std::{fs, path::Path};

use thiserror::Error;
use tracing::info;

use crate::epub::{extract_epub_file, ReaderError};
use crate::types::{DocumentFormat, LoadedText};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Unsupported file type: {0}. Please choose an .epub or .txt file")]
    Unsupported(String),
    #[error("Could not read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not read EPUB: {0}")]
    Epub(#[from] ReaderError),
}

/// Load an `.epub` or `.txt` file into reading text.
///
/// Plain text is taken verbatim and carries no book metadata, so applying
/// it clears whatever an earlier EPUB set.
pub fn load_path(path: &Path) -> Result<LoadedText, LoadError> {
    let format = path
        .extension()
        .and_then(|s| s.to_str())
        .map(DocumentFormat::from_extension)
        .unwrap_or(DocumentFormat::Other);
    match format {
        DocumentFormat::Epub => {
            let book = extract_epub_file(path)?;
            info!(
                path = %path.display(),
                bytes = book.text.len(),
                title = ?book.metadata.title,
                "loaded EPUB"
            );
            Ok(LoadedText {
                text: book.text,
                metadata: Some(book.metadata),
                source: path.to_path_buf(),
                format,
            })
        }
        DocumentFormat::Text => {
            let bytes = fs::read(path)?;
            let text = String::from_utf8_lossy(&bytes).into_owned();
            info!(path = %path.display(), bytes = text.len(), "loaded text file");
            Ok(LoadedText {
                text,
                metadata: None,
                source: path.to_path_buf(),
                format,
            })
        }
        DocumentFormat::Other => Err(LoadError::Unsupported(
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
        )),
    }
}
