use std::{
    cell::RefCell,
    fs::File,
    io::{Cursor, Read, Seek},
    path::Path,
};

use tracing::{debug, warn};
use zip::ZipArchive;

use crate::normalize::html_to_text;
use crate::types::{BookMetadata, ExtractedBook};

use super::container::read_container;
use super::cover::{data_url, mime_for_path};
use super::error::ReaderError;
use super::opf::{parse_opf, PackageDocument};
use super::paths::{parent_dir, resolve_href};
use super::{read_entry_bytes, read_entry_string};

const CONTENT_EXTENSIONS: [&str; 3] = [".xhtml", ".html", ".htm"];

pub struct EpubBook<R> {
    rootfile: String,
    base_dir: String,
    package: PackageDocument,
    zip: RefCell<ZipArchive<R>>,
}

impl EpubBook<File> {
    pub fn open(path: &Path) -> Result<Self, ReaderError> {
        let file = File::open(path)?;
        Self::new(file)
    }
}

impl EpubBook<Cursor<Vec<u8>>> {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ReaderError> {
        Self::new(Cursor::new(bytes))
    }
}

impl<R: Read + Seek> EpubBook<R> {
    pub fn new(reader: R) -> Result<Self, ReaderError> {
        let mut zip = ZipArchive::new(reader)?;
        let rootfile = read_container(&mut zip)?;
        let base_dir = parent_dir(&rootfile).to_string();
        let opf = read_entry_string(&mut zip, &rootfile)
            .ok_or_else(|| ReaderError::UnreadableOpf(rootfile.clone()))?;
        let package = parse_opf(&opf);
        debug!(
            rootfile = %rootfile,
            manifest = package.manifest.len(),
            spine = package.spine_ids.len(),
            "opened package document"
        );
        Ok(Self {
            rootfile,
            base_dir,
            package,
            zip: RefCell::new(zip),
        })
    }

    pub fn rootfile(&self) -> &str {
        &self.rootfile
    }

    pub fn title(&self) -> Option<&str> {
        self.package.title.as_deref()
    }

    pub fn author(&self) -> Option<&str> {
        self.package.creator.as_deref()
    }

    /// Cover image as a `data:` URL, if the package names one that exists.
    pub fn cover_data_url(&self) -> Option<String> {
        let href = self.package.cover_href()?;
        let path = resolve_href(&self.base_dir, href);
        match self.load_resource(&path) {
            Some(bytes) => Some(data_url(mime_for_path(&path), &bytes)),
            None => {
                warn!(path = %path, "cover image listed but not readable");
                None
            }
        }
    }

    pub fn metadata(&self) -> BookMetadata {
        BookMetadata {
            title: self.package.title.clone(),
            author: self.package.creator.clone(),
            cover: self.cover_data_url(),
        }
    }

    /// Archive paths of the content documents in reading order.
    ///
    /// Falls back to every HTML-like entry in archive order when the spine
    /// resolves to nothing.
    pub fn content_paths(&self) -> Vec<String> {
        let from_spine: Vec<String> = self
            .package
            .reading_order()
            .iter()
            .map(|href| resolve_href(&self.base_dir, href))
            .collect();
        if !from_spine.is_empty() {
            return from_spine;
        }
        let zip = self.zip.borrow();
        let scanned: Vec<String> = (0..zip.len())
            .filter_map(|i| zip.name_for_index(i))
            .filter(|name| {
                let lower = name.to_ascii_lowercase();
                CONTENT_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
            })
            .map(str::to_string)
            .collect();
        debug!(files = scanned.len(), "spine empty, scanning archive for content");
        scanned
    }

    pub fn load_chapter(&self, path: &str) -> Option<String> {
        read_entry_string(&mut self.zip.borrow_mut(), path)
    }

    pub fn load_resource(&self, path: &str) -> Option<Vec<u8>> {
        read_entry_bytes(&mut self.zip.borrow_mut(), path)
    }

    /// Plain reading text of all content documents, space separated.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for path in self.content_paths() {
            let Some(html) = self.load_chapter(&path) else {
                warn!(path = %path, "content document missing from archive");
                continue;
            };
            let chapter = html_to_text(&html);
            if chapter.is_empty() {
                continue;
            }
            text.push_str(&chapter);
            text.push(' ');
        }
        text.trim().to_string()
    }

    pub fn extract(&self) -> ExtractedBook {
        ExtractedBook {
            text: self.text(),
            metadata: self.metadata(),
        }
    }
}
