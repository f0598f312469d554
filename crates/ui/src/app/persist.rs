use std::time::{Duration, Instant};

use tracing::debug;

use super::App;

/// Minimum spacing between saves while words are advancing on their own.
pub(super) const SAVE_INTERVAL: Duration = Duration::from_secs(2);

impl App {
    /// Copy the view's position and settings into the persisted state.
    pub(super) fn sync_state(&mut self) {
        self.state.record_position(self.rsvp.index());
        self.state.wpm = self.rsvp.wpm();
        self.state.side_opacity = self.rsvp.side_opacity;
        self.state.words_per_display = self.rsvp.playback.words_per_display();
        self.dirty = true;
    }

    pub(super) fn persist_now(&mut self, now: Instant) {
        self.sync_state();
        self.store.save(&self.state);
        self.last_saved = now;
        self.dirty = false;
        debug!(index = self.rsvp.index(), "state saved");
    }

    /// Save if something changed and the last save is old enough.
    pub(super) fn maybe_persist(&mut self, now: Instant) {
        if self.dirty && now.saturating_duration_since(self.last_saved) >= SAVE_INTERVAL {
            self.persist_now(now);
        }
    }
}
