use std::{
    path::PathBuf,
    sync::mpsc::{channel, Receiver, Sender},
    time::Instant,
};

use reader_core::{AppState, StateStore};

use crate::{
    prompt_view::PromptView,
    rsvp_view::RsvpView,
    theme::Theme,
    views::AlertView,
};

use super::types::Incoming;

pub struct App {
    pub state: AppState,
    pub rsvp: RsvpView,
    pub prompt: Option<PromptView>,
    pub alert: Option<AlertView>,
    pub show_help: bool,
    pub show_info: bool,
    pub status: Option<String>,
    pub(super) store: StateStore,
    /// File currently being loaded in the background.
    pub(super) loading: Option<PathBuf>,
    pub(super) incoming_tx: Sender<Incoming>,
    pub(super) incoming_rx: Receiver<Incoming>,
    pub(super) last_saved: Instant,
    pub(super) dirty: bool,
}

impl App {
    /// Build the reader around a restored state, resuming the saved
    /// position of its text.
    pub fn new(state: AppState, store: StateStore) -> Self {
        let mut rsvp = RsvpView::new(
            &state.text,
            state.wpm,
            state.words_per_display,
            state.side_opacity,
        );
        rsvp.playback
            .seek(state.saved_position(), Instant::now());
        rsvp.title = state
            .book_metadata
            .as_ref()
            .and_then(|meta| meta.display_title());
        let (incoming_tx, incoming_rx) = channel();
        Self {
            state,
            rsvp,
            prompt: None,
            alert: None,
            show_help: false,
            show_info: false,
            status: None,
            store,
            loading: None,
            incoming_tx,
            incoming_rx,
            last_saved: Instant::now(),
            dirty: false,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.rsvp.theme = theme;
        self
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    pub fn into_state(self) -> AppState {
        self.state
    }

    pub(super) fn refresh_title(&mut self) {
        self.rsvp.title = self
            .state
            .book_metadata
            .as_ref()
            .and_then(|meta| meta.display_title());
    }
}
