use std::io::{Read, Seek};

use quick_xml::events::Event;
use quick_xml::Reader as XmlReader;
use zip::ZipArchive;

use super::error::ReaderError;
use super::read_entry_string;

pub(crate) const CONTAINER_PATH: &str = "META-INF/container.xml";

/// Path of the package document named by `META-INF/container.xml`.
pub(crate) fn read_container<R: Read + Seek>(
    zip: &mut ZipArchive<R>,
) -> Result<String, ReaderError> {
    let xml = read_entry_string(zip, CONTAINER_PATH).ok_or(ReaderError::MissingContainer)?;
    find_rootfile(&xml).ok_or(ReaderError::MissingRootfile)
}

pub(crate) fn find_rootfile(xml: &str) -> Option<String> {
    let mut reader = XmlReader::from_str(xml);
    reader.config_mut().check_end_names = false;
    loop {
        match reader.read_event() {
            Ok(Event::Empty(e)) | Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if !name.to_ascii_lowercase().contains("rootfile") {
                    continue;
                }
                for a in e.attributes().flatten() {
                    let key = String::from_utf8_lossy(a.key.as_ref());
                    if key.eq_ignore_ascii_case("full-path") {
                        let val = String::from_utf8_lossy(a.value.as_ref()).trim().to_string();
                        if !val.is_empty() {
                            return Some(val);
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                tracing::warn!(error = %e, "malformed container.xml, stopping scan");
                break;
            }
            _ => {}
        }
    }
    None
}
