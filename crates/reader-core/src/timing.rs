use std::time::Duration;

use crate::words::word_len;

pub const MIN_WPM: u16 = 50;
pub const MAX_WPM: u16 = 1500;
pub const DEFAULT_WPM: u16 = 300;
pub const WPM_STEP: u16 = 25;
pub const WPM_FINE_STEP: u16 = 10;

const LENGTH_FACTOR: f64 = 0.04;
const SENTENCE_END_MULTIPLIER: f64 = 2.5;
const CLAUSE_END_MULTIPLIER: f64 = 1.8;

/// Index of the letter that stays fixed on screen for a word of `len`
/// characters.
pub fn fixation_index(len: usize) -> usize {
    match len {
        0..=1 => 0,
        2..=5 => 1,
        6..=9 => 2,
        10..=13 => 3,
        _ => 4,
    }
}

pub fn orp_position(word: &str) -> usize {
    fixation_index(word_len(word))
}

pub fn clamp_wpm(wpm: u16) -> u16 {
    wpm.clamp(MIN_WPM, MAX_WPM)
}

/// Milliseconds per word at `wpm`, after clamping the rate.
pub fn base_delay_ms(wpm: u16) -> f64 {
    60_000.0 / clamp_wpm(wpm) as f64
}

/// How long `word` stays on screen given a base per-word delay in ms.
///
/// Sentence and clause punctuation replace the length-based multiplier
/// rather than adding to it.
pub fn word_delay_ms(word: &str, base_ms: f64) -> f64 {
    let multiplier = if word.ends_with(['.', '!', '?']) {
        SENTENCE_END_MULTIPLIER
    } else if word.ends_with([',', ';', ':']) {
        CLAUSE_END_MULTIPLIER
    } else {
        1.0 + (word_len(word) as f64).sqrt() * LENGTH_FACTOR
    };
    base_ms * multiplier
}

pub fn word_delay(word: &str, base_ms: f64) -> Duration {
    Duration::from_secs_f64(word_delay_ms(word, base_ms).max(0.0) / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn fixation_table() {
        let cases = [
            (0, 0),
            (1, 0),
            (2, 1),
            (3, 1),
            (4, 1),
            (5, 1),
            (6, 2),
            (9, 2),
            (10, 3),
            (13, 3),
            (14, 4),
            (20, 4),
        ];
        for (len, expected) in cases {
            assert_eq!(fixation_index(len), expected, "len {len}");
        }
    }

    #[test]
    fn orp_uses_word_length() {
        assert_eq!(orp_position("a"), 0);
        assert_eq!(orp_position("hello"), 1);
        assert_eq!(orp_position("reading"), 2);
        assert_eq!(orp_position("extraordinary"), 3);
        assert_eq!(orp_position("incomprehensibilities"), 4);
    }

    #[test]
    fn plain_words_scale_with_sqrt_length() {
        let base = 200.0;
        for word in ["a", "word", "reading", "extraordinarily"] {
            let expected = base * (1.0 + (word.len() as f64).sqrt() * 0.04);
            assert!((word_delay_ms(word, base) - expected).abs() < EPS, "{word}");
        }
    }

    #[test]
    fn punctuation_overrides_length() {
        let base = 200.0;
        assert!((word_delay_ms("end.", base) - 500.0).abs() < EPS);
        assert!((word_delay_ms("hi!", base) - 500.0).abs() < EPS);
        assert!((word_delay_ms("why?", base) - 500.0).abs() < EPS);
        assert!((word_delay_ms("list,", base) - 360.0).abs() < EPS);
        assert!((word_delay_ms("semi;", base) - 360.0).abs() < EPS);
        assert!((word_delay_ms("colon:", base) - 360.0).abs() < EPS);
    }

    #[test]
    fn trailing_quote_hides_punctuation() {
        let base = 100.0;
        let expected = base * (1.0 + 5f64.sqrt() * 0.04);
        assert!((word_delay_ms("end.\"", base) - expected).abs() < EPS);
    }

    #[test]
    fn base_delay_from_wpm() {
        assert!((base_delay_ms(300) - 200.0).abs() < EPS);
        assert!((base_delay_ms(10) - 1200.0).abs() < EPS);
        assert!((base_delay_ms(5000) - 40.0).abs() < EPS);
    }

    #[test]
    fn wpm_is_clamped() {
        assert_eq!(clamp_wpm(0), MIN_WPM);
        assert_eq!(clamp_wpm(300), 300);
        assert_eq!(clamp_wpm(u16::MAX), MAX_WPM);
    }

    #[test]
    fn duration_matches_ms() {
        assert_eq!(word_delay("end.", 200.0), Duration::from_millis(500));
    }
}
