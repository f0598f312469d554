use unicode_segmentation::UnicodeSegmentation;

/// Split text into display words on runs of whitespace. Punctuation stays
/// attached to its word.
pub fn split_words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Visible length of a word, counted in grapheme clusters.
pub fn word_len(word: &str) -> usize {
    word.graphemes(true).count()
}

/// Words `start..start + count` joined by single spaces, clamped to the
/// end of the sequence.
pub fn word_group(words: &[String], start: usize, count: usize) -> String {
    if start >= words.len() {
        return String::new();
    }
    let end = (start + count.max(1)).min(words.len());
    words[start..end].join(" ")
}
