/// Number of leading UTF-16 units that identify a text.
pub const FINGERPRINT_PREFIX: usize = 200;

/// Key under which the reading position of `text` is stored.
///
/// Only the first 200 UTF-16 units are hashed, so texts that share that
/// prefix share a saved position.
pub fn text_fingerprint(text: &str) -> String {
    let hash = text
        .encode_utf16()
        .take(FINGERPRINT_PREFIX)
        .fold(0i32, |hash, unit| {
            hash.wrapping_mul(31).wrapping_add(unit as i32)
        });
    hash.to_string()
}
