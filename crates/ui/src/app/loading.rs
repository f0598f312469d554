use std::{path::PathBuf, sync::mpsc::TryRecvError, thread, time::Instant};

use reader_core::{load_path, lookup::lookup_metadata, types::DocumentFormat, LoadedText};
use tracing::{info, warn};

use crate::views::AlertView;

use super::{types::Incoming, App};

impl App {
    /// Read `path` on a worker thread. Refused while another load runs.
    pub fn start_load(&mut self, path: PathBuf) {
        if let Some(current) = &self.loading {
            self.status = Some(format!("Still loading {}", display_name(current)));
            return;
        }
        info!(path = %path.display(), "loading file");
        self.status = None;
        self.loading = Some(path.clone());
        let tx = self.incoming_tx.clone();
        thread::spawn(move || {
            let result = load_path(&path);
            let _ = tx.send(Incoming::Loaded(result));
        });
    }

    /// Ask the online catalogue for fields the current book lacks.
    pub fn start_lookup(&mut self) {
        if !self.state.online_lookup {
            return;
        }
        let Some(meta) = self.state.book_metadata.clone() else {
            return;
        };
        let complete = meta.title.is_some() && meta.author.is_some() && meta.cover.is_some();
        if complete || (meta.title.is_none() && meta.author.is_none()) {
            return;
        }
        let fingerprint = self.state.fingerprint();
        let tx = self.incoming_tx.clone();
        thread::spawn(move || {
            let metadata = lookup_metadata(meta.title.as_deref(), meta.author.as_deref());
            let _ = tx.send(Incoming::Lookup {
                fingerprint,
                metadata,
            });
        });
    }

    /// Apply every finished background result.
    pub fn poll_incoming(&mut self, now: Instant) {
        loop {
            match self.incoming_rx.try_recv() {
                Ok(Incoming::Loaded(Ok(loaded))) => self.finish_load(loaded, now),
                Ok(Incoming::Loaded(Err(e))) => {
                    let name = self.loading.take().map(|p| display_name(&p));
                    warn!(file = ?name, error = %e, "load failed");
                    self.alert = Some(AlertView::new("Cannot open file", e.to_string()));
                }
                Ok(Incoming::Lookup {
                    fingerprint,
                    metadata,
                }) => self.finish_lookup(&fingerprint, metadata, now),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
    }

    fn finish_load(&mut self, loaded: LoadedText, now: Instant) {
        self.loading = None;
        let name = display_name(&loaded.source);
        let is_epub = loaded.format == DocumentFormat::Epub;
        let index = self.state.apply_loaded(loaded);
        self.rsvp.set_text(&self.state.text, index, now);
        self.refresh_title();
        info!(file = %name, words = self.rsvp.word_count(), index, "text loaded");
        self.status = Some(format!("Loaded {name}"));
        self.persist_now(now);
        if is_epub {
            self.start_lookup();
        }
    }

    fn finish_lookup(
        &mut self,
        fingerprint: &str,
        found: Option<reader_core::BookMetadata>,
        now: Instant,
    ) {
        // The text may have changed while the request was in flight.
        if fingerprint != self.state.fingerprint() {
            return;
        }
        let (Some(found), Some(meta)) = (found, self.state.book_metadata.as_mut()) else {
            return;
        };
        meta.merge_missing(found);
        self.refresh_title();
        self.persist_now(now);
    }
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
