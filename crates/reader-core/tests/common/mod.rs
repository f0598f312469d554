#![allow(dead_code)]

use std::io::{Cursor, Write};

use zip::{write::SimpleFileOptions, ZipWriter};

pub const CONTAINER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>"#;

pub fn xhtml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<html xmlns="http://www.w3.org/1999/xhtml"><head></head>
<body>{body}</body></html>"#
    )
}

/// Zip the given (name, bytes) entries in order.
pub fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, data) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

pub fn sample_opf(metadata: &str, manifest: &str, spine: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="3.0">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">{metadata}</metadata>
  <manifest>{manifest}</manifest>
  <spine>{spine}</spine>
</package>"#
    )
}

/// The two-chapter book: "Sample", no author, no cover.
pub fn minimal_epub() -> Vec<u8> {
    let opf = sample_opf(
        "<dc:title>Sample</dc:title>",
        r#"<item id="ch1" href="ch1.xhtml" media-type="application/xhtml+xml"/>
           <item id="ch2" href="ch2.xhtml" media-type="application/xhtml+xml"/>"#,
        r#"<itemref idref="ch1"/><itemref idref="ch2"/>"#,
    );
    let ch1 = xhtml("<p>Hello</p>");
    let ch2 = xhtml("<p>World</p>");
    build_zip(&[
        ("mimetype", b"application/epub+zip".as_slice()),
        ("META-INF/container.xml", CONTAINER.as_bytes()),
        ("OEBPS/content.opf", opf.as_bytes()),
        ("OEBPS/ch1.xhtml", ch1.as_bytes()),
        ("OEBPS/ch2.xhtml", ch2.as_bytes()),
    ])
}
