use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use reader_core::timing::{WPM_FINE_STEP, WPM_STEP};

use crate::prompt_view::PromptView;

use super::types::{Command, CommandOutcome, PromptCommand};
use super::App;

const BIG_STEP: usize = 10;

impl Command {
    pub(super) fn from_key(app: &App, key: KeyEvent) -> Option<Self> {
        if app.alert.is_some() {
            return matches!(key.code, KeyCode::Esc | KeyCode::Enter).then_some(Command::CloseAlert);
        }
        if app.prompt.is_some() {
            return match key.code {
                KeyCode::Esc => Some(Command::Prompt(PromptCommand::Cancel)),
                KeyCode::Enter => Some(Command::Prompt(PromptCommand::Submit)),
                KeyCode::Backspace => Some(Command::Prompt(PromptCommand::Backspace)),
                KeyCode::Char(c) => Some(Command::Prompt(PromptCommand::Insert(c))),
                _ => None,
            };
        }
        if app.show_help {
            return matches!(key.code, KeyCode::Esc | KeyCode::Char('?'))
                .then_some(Command::CloseHelp);
        }
        if app.show_info {
            return matches!(key.code, KeyCode::Esc | KeyCode::Char('i'))
                .then_some(Command::CloseInfo);
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let big = ctrl || key.modifiers.contains(KeyModifiers::SHIFT);
        let step = if big { BIG_STEP } else { 1 };
        match key.code {
            KeyCode::Char('q') => Some(Command::Exit),
            KeyCode::Char('c') if ctrl => Some(Command::Exit),
            KeyCode::Char(' ') => Some(Command::TogglePlay),
            KeyCode::Right => Some(Command::StepForward(step)),
            KeyCode::Left => Some(Command::StepBack(step)),
            KeyCode::Up => Some(Command::AdjustWpm(WPM_STEP as i16)),
            KeyCode::Down => Some(Command::AdjustWpm(-(WPM_STEP as i16))),
            KeyCode::Char('+') | KeyCode::Char('=') => Some(Command::AdjustWpm(WPM_FINE_STEP as i16)),
            KeyCode::Char('-') | KeyCode::Char('_') => {
                Some(Command::AdjustWpm(-(WPM_FINE_STEP as i16)))
            }
            KeyCode::Char('[') => Some(Command::AdjustOpacity(-1)),
            KeyCode::Char(']') => Some(Command::AdjustOpacity(1)),
            KeyCode::Char('w') => Some(Command::CycleWordsPerDisplay),
            KeyCode::Char('r') | KeyCode::Home => Some(Command::Reset),
            KeyCode::Char('o') => Some(Command::OpenPrompt),
            KeyCode::Char('i') => Some(Command::ToggleInfo),
            KeyCode::Char('n') => Some(Command::ToggleLookup),
            KeyCode::Char('?') => Some(Command::ToggleHelp),
            _ => None,
        }
    }
}

impl App {
    pub(super) fn apply_command(&mut self, command: Command, now: Instant) -> CommandOutcome {
        match command {
            Command::Exit => return CommandOutcome::Exit,
            Command::Prompt(prompt) => self.apply_prompt_command(prompt),
            Command::CloseAlert => self.alert = None,
            Command::CloseHelp => self.show_help = false,
            Command::CloseInfo => self.show_info = false,
            Command::ToggleHelp => self.show_help = !self.show_help,
            Command::ToggleInfo => self.show_info = !self.show_info,
            Command::OpenPrompt => {
                if self.is_loading() {
                    self.status = Some("A file is already loading".into());
                } else {
                    self.prompt = Some(PromptView::new());
                }
            }
            Command::TogglePlay => {
                self.rsvp.playback.toggle(now);
                self.status = None;
                self.persist_now(now);
            }
            Command::StepForward(steps) => {
                self.rsvp.playback.step_forward(steps, now);
                self.persist_now(now);
            }
            Command::StepBack(steps) => {
                self.rsvp.playback.step_back(steps, now);
                self.persist_now(now);
            }
            Command::Reset => {
                self.rsvp.playback.reset(now);
                self.persist_now(now);
            }
            Command::AdjustWpm(delta) => {
                self.rsvp.playback.adjust_wpm(delta);
                self.persist_now(now);
            }
            Command::AdjustOpacity(steps) => {
                self.rsvp.adjust_opacity(steps);
                self.persist_now(now);
            }
            Command::CycleWordsPerDisplay => {
                self.rsvp.cycle_words_per_display(now);
                self.persist_now(now);
            }
            Command::ToggleLookup => {
                self.state.online_lookup = !self.state.online_lookup;
                self.status = Some(
                    if self.state.online_lookup {
                        "Online lookup on"
                    } else {
                        "Online lookup off"
                    }
                    .into(),
                );
                self.persist_now(now);
                self.start_lookup();
            }
        }
        CommandOutcome::Continue
    }

    fn apply_prompt_command(&mut self, command: PromptCommand) {
        match command {
            PromptCommand::Cancel => {
                self.prompt = None;
            }
            PromptCommand::Submit => {
                if let Some(path) = self.prompt.take().and_then(|p| p.path()) {
                    self.start_load(path);
                }
            }
            PromptCommand::Backspace => {
                if let Some(prompt) = &mut self.prompt {
                    prompt.backspace();
                }
            }
            PromptCommand::Insert(c) => {
                if let Some(prompt) = &mut self.prompt {
                    prompt.push_char(c);
                }
            }
        }
    }
}
