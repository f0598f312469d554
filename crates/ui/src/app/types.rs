use reader_core::{BookMetadata, LoadError, LoadedText};

/// Results delivered by background workers.
pub enum Incoming {
    Loaded(Result<LoadedText, LoadError>),
    /// Online metadata for the text whose fingerprint is `fingerprint`.
    Lookup {
        fingerprint: String,
        metadata: Option<BookMetadata>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum PromptCommand {
    Cancel,
    Submit,
    Backspace,
    Insert(char),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Command {
    Exit,
    TogglePlay,
    StepForward(usize),
    StepBack(usize),
    Reset,
    AdjustWpm(i16),
    AdjustOpacity(i8),
    CycleWordsPerDisplay,
    OpenPrompt,
    ToggleInfo,
    ToggleLookup,
    ToggleHelp,
    CloseHelp,
    CloseInfo,
    CloseAlert,
    Prompt(PromptCommand),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum CommandOutcome {
    Continue,
    Exit,
}
