use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader as XmlReader;

use crate::normalize::{collapse_whitespace, html_to_text};

const XHTML_MEDIA_TYPE: &str = "application/xhtml+xml";
const COVER_IMAGE_PROPERTY: &str = "cover-image";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ManifestItem {
    pub(crate) id: String,
    pub(crate) href: String,
    pub(crate) media_type: Option<String>,
    pub(crate) properties: Option<String>,
}

impl ManifestItem {
    fn is_xhtml(&self) -> bool {
        self.media_type
            .as_deref()
            .is_some_and(|mt| mt.trim().eq_ignore_ascii_case(XHTML_MEDIA_TYPE))
    }

    fn is_image(&self) -> bool {
        self.media_type
            .as_deref()
            .is_some_and(|mt| mt.trim().to_ascii_lowercase().starts_with("image/"))
    }

    fn has_property(&self, property: &str) -> bool {
        self.properties
            .as_deref()
            .is_some_and(|props| props.split_whitespace().any(|p| p == property))
    }
}

/// What the extractor needs from the package document.
#[derive(Debug, Default)]
pub(crate) struct PackageDocument {
    pub(crate) title: Option<String>,
    pub(crate) creator: Option<String>,
    pub(crate) manifest: Vec<ManifestItem>,
    pub(crate) spine_ids: Vec<String>,
    pub(crate) cover_meta_id: Option<String>,
}

impl PackageDocument {
    /// Href of the cover image, trying in order: the `cover-image`
    /// manifest property, `<meta name="cover">`, then any image item whose
    /// id mentions "cover".
    pub(crate) fn cover_href(&self) -> Option<&str> {
        if let Some(item) = self
            .manifest
            .iter()
            .find(|item| item.has_property(COVER_IMAGE_PROPERTY))
        {
            return Some(&item.href);
        }
        if let Some(cover_id) = self.cover_meta_id.as_deref() {
            if let Some(item) = self.manifest.iter().find(|item| item.id == cover_id) {
                return Some(&item.href);
            }
        }
        self.manifest
            .iter()
            .find(|item| item.is_image() && item.id.to_ascii_lowercase().contains("cover"))
            .map(|item| item.href.as_str())
    }

    /// Spine order mapped through the XHTML part of the manifest. Spine
    /// entries without an XHTML manifest item are dropped.
    pub(crate) fn reading_order(&self) -> Vec<String> {
        self.spine_ids
            .iter()
            .filter_map(|idref| {
                self.manifest
                    .iter()
                    .find(|item| item.id == *idref && item.is_xhtml())
                    .map(|item| item.href.clone())
            })
            .collect()
    }
}

/// Scan a package document. Malformed markup ends the scan early and keeps
/// whatever was found before it.
pub(crate) fn parse_opf(xml: &str) -> PackageDocument {
    let mut reader = XmlReader::from_str(xml);
    reader.config_mut().check_end_names = false;
    let mut doc = PackageDocument::default();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = element_name(&e);
                if name.eq_ignore_ascii_case("dc:title") && doc.title.is_none() {
                    doc.title = read_element_text(&mut reader, xml, &name);
                } else if name.eq_ignore_ascii_case("dc:creator") && doc.creator.is_none() {
                    doc.creator = read_element_text(&mut reader, xml, &name);
                } else {
                    handle_element(&e, &mut doc);
                }
            }
            Ok(Event::Empty(e)) => handle_element(&e, &mut doc),
            Ok(Event::Eof) => break,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    position = reader.buffer_position(),
                    "malformed package document, keeping partial scan"
                );
                break;
            }
            _ => {}
        }
    }
    doc
}

fn handle_element(e: &BytesStart<'_>, doc: &mut PackageDocument) {
    let name = element_name(e);
    let local = local_name(&name).to_ascii_lowercase();
    match local.as_str() {
        "item" => {
            let mut id: Option<String> = None;
            let mut href: Option<String> = None;
            let mut media_type: Option<String> = None;
            let mut properties: Option<String> = None;
            for (key, val) in attributes(e) {
                match key.as_str() {
                    "id" => id = Some(val),
                    "href" => href = Some(val),
                    "media-type" => media_type = Some(val),
                    "properties" => properties = Some(val),
                    _ => {}
                }
            }
            if let (Some(id), Some(href)) = (id, href) {
                doc.manifest.push(ManifestItem {
                    id,
                    href,
                    media_type,
                    properties,
                });
            }
        }
        "itemref" => {
            if let Some((_, idref)) = attributes(e).find(|(key, _)| key == "idref") {
                if !idref.is_empty() {
                    doc.spine_ids.push(idref);
                }
            }
        }
        "meta" if doc.cover_meta_id.is_none() => {
            let mut is_cover = false;
            let mut content: Option<String> = None;
            for (key, val) in attributes(e) {
                match key.as_str() {
                    "name" => is_cover = val.eq_ignore_ascii_case("cover"),
                    "content" => content = Some(val),
                    _ => {}
                }
            }
            if is_cover {
                doc.cover_meta_id = content.filter(|c| !c.is_empty());
            }
        }
        _ => {}
    }
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).to_string()
}

fn local_name(name: &str) -> &str {
    name.rsplit(':').next().unwrap_or(name)
}

/// Attributes as (lowercased local key, value) pairs. Values that fail to
/// unescape are taken raw.
fn attributes<'a>(e: &'a BytesStart<'a>) -> impl Iterator<Item = (String, String)> + 'a {
    e.attributes().flatten().map(|a| {
        let key = String::from_utf8_lossy(a.key.as_ref());
        let key = local_name(&key).to_ascii_lowercase();
        let val = match a.unescape_value() {
            Ok(v) => v.into_owned(),
            Err(_) => String::from_utf8_lossy(a.value.as_ref()).into_owned(),
        };
        (key, val.trim().to_string())
    })
}

/// Text content up to the element's closing tag, trimmed. Empty text is
/// treated as absent. Markup the XML reader rejects (a bare `&`, say) is
/// re-read from the raw source up to the closing tag instead.
fn read_element_text(reader: &mut XmlReader<&[u8]>, xml: &str, name: &str) -> Option<String> {
    let start = reader.buffer_position() as usize;
    let mut text = String::new();
    let mut depth = 1usize;
    loop {
        match reader.read_event() {
            Ok(Event::Text(t)) => text.push_str(&String::from_utf8_lossy(t.as_ref())),
            Ok(Event::CData(t)) => text.push_str(&String::from_utf8_lossy(t.as_ref())),
            Ok(Event::GeneralRef(r)) => {
                let reference = String::from_utf8_lossy(r.as_ref()).to_string();
                match resolve_reference(&reference) {
                    Some(ch) => text.push(ch),
                    None => {
                        text.push('&');
                        text.push_str(&reference);
                        text.push(';');
                    }
                }
            }
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                tracing::debug!(element = name, error = %e, "re-reading element text from source");
                return raw_element_text(xml, start, name);
            }
            _ => {}
        }
    }
    let text = collapse_whitespace(&text);
    (!text.is_empty()).then_some(text)
}

/// Source text from `start` up to `</name`, decoded as HTML. `None` when
/// the element is never closed.
fn raw_element_text(xml: &str, start: usize, name: &str) -> Option<String> {
    let rest = xml.get(start..)?;
    let close = format!("</{}", name.to_ascii_lowercase());
    // ASCII lowercasing keeps byte offsets aligned with `rest`.
    let end = rest.to_ascii_lowercase().find(&close)?;
    let text = html_to_text(&rest[..end]);
    (!text.is_empty()).then_some(text)
}

fn resolve_reference(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPUB3_OPF: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="3.0" unique-identifier="uid">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
    <dc:title id="t1">The Sample &amp; Friends</dc:title>
    <dc:title>Second Title</dc:title>
    <dc:creator id="c1">Jane Doe</dc:creator>
  </metadata>
  <manifest>
    <item id="nav" href="nav.xhtml" media-type="application/xhtml+xml" properties="nav"/>
    <item href="images/front.jpg" properties="cover-image" id="front" media-type="image/jpeg"/>
    <item id="ch1" href="text/ch1.xhtml" media-type="application/xhtml+xml"/>
    <item media-type="application/xhtml+xml" href="text/ch2.xhtml" id="ch2"/>
    <item id="css" href="style.css" media-type="text/css"/>
  </manifest>
  <spine>
    <itemref idref="ch1"/>
    <itemref idref="css"/>
    <itemref idref="missing"/>
    <itemref idref="ch2"/>
  </spine>
</package>"#;

    #[test]
    fn reads_first_title_and_creator() {
        let doc = parse_opf(EPUB3_OPF);
        assert_eq!(doc.title.as_deref(), Some("The Sample & Friends"));
        assert_eq!(doc.creator.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn title_tags_match_case_insensitively() {
        let doc = parse_opf("<package><metadata><DC:Title>Loud</dc:title></metadata></package>");
        assert_eq!(doc.title.as_deref(), Some("Loud"));
        assert_eq!(doc.creator, None);
    }

    #[test]
    fn spine_maps_through_xhtml_manifest() {
        let doc = parse_opf(EPUB3_OPF);
        assert_eq!(doc.reading_order(), vec!["text/ch1.xhtml", "text/ch2.xhtml"]);
    }

    #[test]
    fn cover_image_property_wins() {
        let doc = parse_opf(EPUB3_OPF);
        assert_eq!(doc.cover_href(), Some("images/front.jpg"));
    }

    #[test]
    fn cover_from_meta_element() {
        let opf = r#"<package><metadata><meta name="cover" content="img-1"/></metadata>
            <manifest>
              <item id="cover-page" href="cover.xhtml" media-type="application/xhtml+xml"/>
              <item id="img-1" href="art.png" media-type="image/png"/>
            </manifest></package>"#;
        assert_eq!(parse_opf(opf).cover_href(), Some("art.png"));
    }

    #[test]
    fn cover_meta_with_content_first() {
        let opf = r#"<package><metadata><meta content="img-1" name="cover"/></metadata>
            <manifest><item id="img-1" href="art.gif" media-type="image/gif"/></manifest></package>"#;
        assert_eq!(parse_opf(opf).cover_href(), Some("art.gif"));
    }

    #[test]
    fn cover_from_image_id_heuristic() {
        let opf = r#"<package><manifest>
              <item id="cover-page" href="cover.xhtml" media-type="application/xhtml+xml"/>
              <item id="my-cover-art" href="c.webp" media-type="image/webp"/>
            </manifest></package>"#;
        assert_eq!(parse_opf(opf).cover_href(), Some("c.webp"));
    }

    #[test]
    fn dangling_cover_meta_falls_through() {
        let opf = r#"<package><metadata><meta name="cover" content="nope"/></metadata>
            <manifest><item id="cover" href="c.png" media-type="image/png"/></manifest></package>"#;
        assert_eq!(parse_opf(opf).cover_href(), Some("c.png"));
    }

    #[test]
    fn no_cover_when_nothing_matches() {
        let doc = parse_opf(r#"<package><manifest><item id="a" href="a.xhtml" media-type="application/xhtml+xml"/></manifest></package>"#);
        assert_eq!(doc.cover_href(), None);
    }

    #[test]
    fn empty_title_is_absent() {
        let doc = parse_opf("<package><metadata><dc:title>   </dc:title></metadata></package>");
        assert_eq!(doc.title, None);
    }

    #[test]
    fn bare_ampersand_keeps_whole_title() {
        let opf = r#"<package><metadata><dc:title>Tom & Jerry</dc:title><dc:creator>Hanna</dc:creator></metadata>
            <manifest><item id="a" href="a.xhtml" media-type="application/xhtml+xml"/></manifest>
            <spine><itemref idref="a"/></spine></package>"#;
        let doc = parse_opf(opf);
        assert_eq!(doc.title.as_deref(), Some("Tom & Jerry"));
        assert_eq!(doc.creator.as_deref(), Some("Hanna"));
        assert_eq!(doc.reading_order(), vec!["a.xhtml"]);
    }

    #[test]
    fn raw_text_needs_a_closing_tag() {
        assert_eq!(raw_element_text("<dc:title>A &amp; B</DC:TITLE>", 10, "dc:title").as_deref(), Some("A & B"));
        assert_eq!(raw_element_text("<dc:title>never closed", 10, "dc:title"), None);
    }

    #[test]
    fn malformed_tail_keeps_earlier_items() {
        let opf = r#"<package><metadata><dc:title>Partial</dc:title></metadata>
            <manifest><item id="a" href="a.xhtml" media-type="application/xhtml+xml"/></manifest>
            <spine><itemref idref="a"/><itemref idref="b" <<<"#;
        let doc = parse_opf(opf);
        assert_eq!(doc.title.as_deref(), Some("Partial"));
        assert_eq!(doc.reading_order(), vec!["a.xhtml"]);
    }
}
