//! Best-effort EPUB text extraction.
//!
//! Only the container descriptor and the package document are required;
//! everything else degrades to a partial result.

mod book;
mod container;
pub mod cover;
mod error;
mod opf;
mod paths;

use std::{
    io::{Read, Seek},
    path::Path,
};

use zip::ZipArchive;

use crate::types::ExtractedBook;

pub use book::EpubBook;
pub use error::ReaderError;

pub fn extract_epub(bytes: Vec<u8>) -> Result<ExtractedBook, ReaderError> {
    Ok(EpubBook::from_bytes(bytes)?.extract())
}

pub fn extract_epub_file(path: &Path) -> Result<ExtractedBook, ReaderError> {
    Ok(EpubBook::open(path)?.extract())
}

pub(crate) fn read_entry_bytes<R: Read + Seek>(
    zip: &mut ZipArchive<R>,
    name: &str,
) -> Option<Vec<u8>> {
    let mut entry = zip.by_name(name).ok()?;
    let mut buf = Vec::new();
    entry.read_to_end(&mut buf).ok()?;
    Some(buf)
}

/// Entry contents as text, lossily decoded and without a byte order mark.
pub(crate) fn read_entry_string<R: Read + Seek>(
    zip: &mut ZipArchive<R>,
    name: &str,
) -> Option<String> {
    let bytes = read_entry_bytes(zip, name)?;
    let text = String::from_utf8_lossy(&bytes);
    Some(text.trim_start_matches('\u{feff}').to_string())
}
