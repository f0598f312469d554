use std::path::PathBuf;

use clap::Parser;
use reader_core::AppState;

#[derive(Parser, Debug)]
#[command(
    name = "rapid",
    version,
    about = "Speed-read EPUB and plain text files one word at a time"
)]
pub struct Cli {
    /// .epub or .txt file to open; without it the last text is resumed
    pub path: Option<PathBuf>,

    /// Reading speed in words per minute
    #[arg(short = 'w', long = "wpm", value_parser = clap::value_parser!(u16).range(50..=1500))]
    pub wpm: Option<u16>,

    /// Words shown at once
    #[arg(short = 'n', long = "words-per-display", value_parser = clap::value_parser!(u8).range(1..=5))]
    pub words_per_display: Option<u8>,

    /// Fill missing book details from Open Library
    #[arg(long = "online-lookup")]
    pub online_lookup: bool,

    /// Use this state file instead of the one in the config directory
    #[arg(long = "state-file")]
    pub state_file: Option<PathBuf>,

    /// Write debug logs to rapid.log in the config directory
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Cli {
    /// Command line settings win over the saved ones.
    pub fn apply_overrides(&self, state: &mut AppState) {
        if let Some(wpm) = self.wpm {
            state.wpm = wpm;
        }
        if let Some(count) = self.words_per_display {
            state.words_per_display = count as usize;
        }
        if self.online_lookup {
            state.online_lookup = true;
        }
        state.sanitize();
    }
}
