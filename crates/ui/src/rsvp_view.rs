use std::time::Instant;

use reader_core::{
    playback::{clamp_words_per_display, MAX_WORDS_PER_DISPLAY},
    split_words, Playback,
};

use crate::theme::Theme;

mod render;
#[cfg(test)]
mod tests;

pub const OPACITY_STEP: f32 = 0.1;

/// The reading surface: one word group pinned at its fixation letter, with
/// dimmed neighbours on either side.
pub struct RsvpView {
    pub playback: Playback,
    pub side_opacity: f32,
    pub theme: Theme,
    pub title: Option<String>,
}

impl RsvpView {
    pub fn new(text: &str, wpm: u16, words_per_display: usize, side_opacity: f32) -> Self {
        Self {
            playback: Playback::new(split_words(text), wpm, words_per_display),
            side_opacity: side_opacity.clamp(0.0, 1.0),
            theme: Theme::default(),
            title: None,
        }
    }

    pub fn index(&self) -> usize {
        self.playback.index()
    }

    pub fn word_count(&self) -> usize {
        self.playback.len()
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    pub fn wpm(&self) -> u16 {
        self.playback.wpm()
    }

    pub fn set_text(&mut self, text: &str, index: usize, now: Instant) {
        self.playback.set_words(split_words(text), index, now);
    }

    pub fn adjust_opacity(&mut self, steps: i8) {
        let next = self.side_opacity + steps as f32 * OPACITY_STEP;
        // Round to one decimal so repeated steps land on 0.0 and 1.0 exactly.
        self.side_opacity = ((next * 10.0).round() / 10.0).clamp(0.0, 1.0);
    }

    /// 1, 2, ... up to the maximum, then back to 1.
    pub fn cycle_words_per_display(&mut self, now: Instant) {
        let current = self.playback.words_per_display();
        let next = if current >= MAX_WORDS_PER_DISPLAY {
            1
        } else {
            clamp_words_per_display(current + 1)
        };
        self.playback.set_words_per_display(next, now);
    }
}
