//! Word sequencing for rapid serial display.
//!
//! Playback is a two-state machine with at most one pending advance. Any
//! change that could make a pending advance stale (play state, index, word
//! sequence, group size) drops it and, while playing, schedules a fresh one
//! from the time of the change.

use std::time::{Duration, Instant};

use crate::timing::{base_delay_ms, clamp_wpm, orp_position, word_delay};
use crate::words::word_group;

pub const MIN_WORDS_PER_DISPLAY: usize = 1;
pub const MAX_WORDS_PER_DISPLAY: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScheduledAdvance {
    due: Instant,
    generation: u64,
}

#[derive(Debug, Clone)]
pub struct Playback {
    words: Vec<String>,
    index: usize,
    wpm: u16,
    words_per_display: usize,
    state: PlaybackState,
    generation: u64,
    scheduled: Option<ScheduledAdvance>,
}

impl Playback {
    pub fn new(words: Vec<String>, wpm: u16, words_per_display: usize) -> Self {
        Self {
            words,
            index: 0,
            wpm: clamp_wpm(wpm),
            words_per_display: clamp_words_per_display(words_per_display),
            state: PlaybackState::Stopped,
            generation: 0,
            scheduled: None,
        }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn wpm(&self) -> u16 {
        self.wpm
    }

    /// Changing the rate does not disturb an advance that is already due;
    /// the new rate applies from the next word.
    pub fn set_wpm(&mut self, wpm: u16) {
        self.wpm = clamp_wpm(wpm);
    }

    pub fn adjust_wpm(&mut self, delta: i16) {
        let next = (self.wpm as i32 + delta as i32).clamp(0, u16::MAX as i32) as u16;
        self.set_wpm(next);
    }

    pub fn words_per_display(&self) -> usize {
        self.words_per_display
    }

    pub fn set_words_per_display(&mut self, count: usize, now: Instant) {
        self.words_per_display = clamp_words_per_display(count);
        self.invalidate(now);
    }

    /// Identifies the current pending advance; bumps on every invalidation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.scheduled
            .filter(|s| s.generation == self.generation)
            .map(|s| s.due)
    }

    fn last_index(&self) -> usize {
        self.words.len().saturating_sub(1)
    }

    pub fn play(&mut self, now: Instant) {
        if self.words.is_empty() || self.is_playing() {
            return;
        }
        self.state = PlaybackState::Playing;
        self.invalidate(now);
    }

    pub fn pause(&mut self, now: Instant) {
        if !self.is_playing() {
            return;
        }
        self.state = PlaybackState::Stopped;
        self.invalidate(now);
    }

    pub fn toggle(&mut self, now: Instant) {
        if self.is_playing() {
            self.pause(now);
        } else {
            self.play(now);
        }
    }

    /// Replace the word sequence and move to `index` (clamped). Playback
    /// stops because the old schedule refers to a different text.
    pub fn set_words(&mut self, words: Vec<String>, index: usize, now: Instant) {
        self.words = words;
        self.index = index.min(self.last_index());
        self.state = PlaybackState::Stopped;
        self.invalidate(now);
    }

    pub fn seek(&mut self, index: usize, now: Instant) {
        self.index = index.min(self.last_index());
        self.invalidate(now);
    }

    pub fn step_forward(&mut self, steps: usize, now: Instant) {
        self.seek(self.index.saturating_add(steps), now);
    }

    pub fn step_back(&mut self, steps: usize, now: Instant) {
        self.seek(self.index.saturating_sub(steps), now);
    }

    pub fn reset(&mut self, now: Instant) {
        self.seek(0, now);
    }

    /// Fire the pending advance if it is due. Returns true when the index
    /// moved. Reaching the last word stops playback.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_due() else {
            return false;
        };
        if now < due {
            return false;
        }
        if self.index >= self.last_index() {
            self.state = PlaybackState::Stopped;
            self.invalidate(now);
            return false;
        }
        self.index = (self.index + self.words_per_display).min(self.last_index());
        self.invalidate(now);
        true
    }

    fn invalidate(&mut self, now: Instant) {
        self.generation = self.generation.wrapping_add(1);
        self.scheduled = match self.state {
            PlaybackState::Playing => Some(ScheduledAdvance {
                due: now + self.current_delay(),
                generation: self.generation,
            }),
            PlaybackState::Stopped => None,
        };
    }

    /// Words currently on screen, joined by spaces.
    pub fn current_group(&self) -> String {
        word_group(&self.words, self.index, self.words_per_display)
    }

    pub fn current_delay(&self) -> Duration {
        word_delay(&self.current_group(), base_delay_ms(self.wpm))
    }

    pub fn current_orp(&self) -> usize {
        orp_position(&self.current_group())
    }

    pub fn previous_word(&self) -> Option<&str> {
        self.index
            .checked_sub(1)
            .and_then(|i| self.words.get(i))
            .map(String::as_str)
    }

    pub fn following_word(&self) -> Option<&str> {
        self.words
            .get(self.index + self.words_per_display)
            .map(String::as_str)
    }

    /// Fraction of the text read, counting the current word.
    pub fn progress(&self) -> f32 {
        if self.words.is_empty() {
            0.0
        } else {
            (self.index + 1) as f32 / self.words.len() as f32
        }
    }
}

pub fn clamp_words_per_display(count: usize) -> usize {
    count.clamp(MIN_WORDS_PER_DISPLAY, MAX_WORDS_PER_DISPLAY)
}
