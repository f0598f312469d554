pub mod config;
pub mod epub;
pub mod fingerprint;
pub mod loader;
pub mod lookup;
pub mod normalize;
pub mod playback;
pub mod state;
pub mod timing;
pub mod types;
pub mod words;

pub use fingerprint::text_fingerprint;
pub use loader::{load_path, LoadError};
pub use playback::{Playback, PlaybackState};
pub use state::{AppState, StateStore};
pub use types::{BookMetadata, ExtractedBook, LoadedText};
pub use words::split_words;
