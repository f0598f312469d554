mod cli;
mod logging;
mod settings;

use std::process::ExitCode;

use clap::Parser;
use reader_core::{config, load_path, types::DocumentFormat, StateStore};
use tracing::{error, info};
use ui::App;

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match logging::init(cli.verbose) {
        Ok(Some(path)) => info!(path = %path.display(), "logging enabled"),
        Ok(None) => {}
        Err(e) => eprintln!("rapid: logging disabled: {e}"),
    }

    let store = match &cli.state_file {
        Some(path) => StateStore::new(path),
        None => StateStore::default_location(),
    };
    let mut state = store.load();
    cli.apply_overrides(&mut state);

    let mut lookup = false;
    if let Some(path) = &cli.path {
        match load_path(path) {
            Ok(loaded) => {
                lookup = loaded.format == DocumentFormat::Epub;
                state.apply_loaded(loaded);
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "cannot open file");
                eprintln!("rapid: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    let theme = settings::load_theme(config::config_path().as_deref());
    let mut app = App::new(state, store).with_theme(theme);
    if lookup {
        app.start_lookup();
    }

    match app.run() {
        Ok(state) => {
            info!(wpm = state.wpm, "reader closed");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "terminal error");
            eprintln!("rapid: terminal error: {e}");
            ExitCode::FAILURE
        }
    }
}
