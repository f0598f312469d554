use base64::{engine::general_purpose::STANDARD, Engine as _};

const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// Image MIME type from a file extension, defaulting to JPEG.
pub fn mime_for_path(path: &str) -> &'static str {
    let ext = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => DEFAULT_IMAGE_MIME,
    }
}

pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// MIME type and decoded size of a `data:` URL, for display.
pub fn describe_data_url(url: &str) -> Option<(&str, usize)> {
    let rest = url.strip_prefix("data:")?;
    let (mime, payload) = rest.split_once(";base64,")?;
    let padding = payload.bytes().rev().take_while(|b| *b == b'=').count();
    Some((mime, ((payload.len() / 4) * 3).saturating_sub(padding.min(2))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_from_extension() {
        assert_eq!(mime_for_path("images/cover.JPG"), "image/jpeg");
        assert_eq!(mime_for_path("cover.jpeg"), "image/jpeg");
        assert_eq!(mime_for_path("a/b.png"), "image/png");
        assert_eq!(mime_for_path("x.gif"), "image/gif");
        assert_eq!(mime_for_path("x.webp"), "image/webp");
        assert_eq!(mime_for_path("x.svg"), "image/jpeg");
        assert_eq!(mime_for_path("noext"), "image/jpeg");
    }

    #[test]
    fn encodes_data_url() {
        assert_eq!(data_url("image/png", b"abc"), "data:image/png;base64,YWJj");
    }

    #[test]
    fn describes_data_url() {
        assert_eq!(describe_data_url("data:image/png;base64,YWJj"), Some(("image/png", 3)));
        assert_eq!(describe_data_url("data:image/gif;base64,YWI="), Some(("image/gif", 2)));
        assert_eq!(describe_data_url("https://example.com/c.jpg"), None);
    }
}
