use std::{
    io::{stdout, Stdout},
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use reader_core::AppState;
use tracing::{debug, info};

use crate::views::{HelpView, InfoView};

use super::types::{Command, CommandOutcome};
use super::App;

/// Upper bound on how long the loop waits for input before redrawing.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

type Term = Terminal<CrosstermBackend<Stdout>>;

impl App {
    /// Run the reader until the user quits and return the final state,
    /// which has already been saved. The terminal is restored and the state
    /// saved even when the loop fails.
    pub fn run(mut self) -> std::io::Result<AppState> {
        let raw_ok = enable_raw_mode().is_ok();
        let result = self.drive(raw_ok);
        let restored = if raw_ok { disable_raw_mode() } else { Ok(()) };
        self.shutdown(Instant::now());
        result.and(restored)?;
        Ok(self.into_state())
    }

    fn drive(&mut self, raw_ok: bool) -> std::io::Result<()> {
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        let result = if raw_ok {
            self.event_loop(&mut terminal)
        } else {
            // Non-interactive fallback: draw once and exit cleanly
            terminal.draw(|f| self.render(f)).map(|_| ())
        };

        let restored = execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .and_then(|_| terminal.show_cursor());
        result.and(restored)
    }

    /// Stop playback and write the final position.
    pub(super) fn shutdown(&mut self, now: Instant) {
        self.rsvp.playback.pause(now);
        self.persist_now(now);
        info!(index = self.rsvp.index(), "reader closed");
    }

    fn event_loop(&mut self, terminal: &mut Term) -> std::io::Result<()> {
        loop {
            let now = Instant::now();
            self.poll_incoming(now);
            self.advance(now);
            terminal.draw(|f| self.render(f))?;

            if !event::poll(self.poll_timeout(Instant::now()))? {
                continue;
            }
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(command) = Command::from_key(self, key) {
                    debug!(?command, "command");
                    if self.apply_command(command, Instant::now()) == CommandOutcome::Exit {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Fire the scheduled advance and keep the saved position in step.
    pub(super) fn advance(&mut self, now: Instant) {
        let was_playing = self.rsvp.is_playing();
        if self.rsvp.playback.tick(now) {
            self.sync_state();
        }
        if was_playing && !self.rsvp.is_playing() {
            self.status = Some("Finished".into());
            self.persist_now(now);
        } else {
            self.maybe_persist(now);
        }
    }

    pub(super) fn poll_timeout(&self, now: Instant) -> Duration {
        match self.rsvp.playback.next_due() {
            Some(due) => due.saturating_duration_since(now).min(POLL_INTERVAL),
            None => POLL_INTERVAL,
        }
    }

    fn status_line(&self) -> Option<String> {
        match &self.loading {
            Some(path) => Some(format!(
                "Loading {}...",
                path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default()
            )),
            None => self.status.clone(),
        }
    }

    pub fn render(&self, f: &mut Frame<'_>) {
        let size = f.area();
        self.rsvp.render(f, size, self.status_line().as_deref());
        if self.show_info {
            InfoView {
                metadata: self.state.book_metadata.clone(),
                word_count: self.rsvp.word_count(),
                fingerprint: self.state.fingerprint(),
                online_lookup: self.state.online_lookup,
            }
            .render(f, size);
        }
        if self.show_help {
            HelpView.render(f, size);
        }
        if let Some(prompt) = &self.prompt {
            prompt.render(f, size);
        }
        if let Some(alert) = &self.alert {
            alert.render(f, size);
        }
    }
}
