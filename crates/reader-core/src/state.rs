use std::{
    collections::HashMap,
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use crate::{
    config,
    fingerprint::text_fingerprint,
    playback::clamp_words_per_display,
    timing::{clamp_wpm, DEFAULT_WPM},
    types::{BookMetadata, LoadedText},
};

pub const DEFAULT_SIDE_OPACITY: f32 = 0.3;
pub const DEFAULT_WORDS_PER_DISPLAY: usize = 1;

/// Everything that survives a restart: the current text, reading positions
/// per text, and reader settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppState {
    #[serde(deserialize_with = "wide_wpm")]
    pub wpm: u16,
    pub text: String,
    pub positions: HashMap<String, usize>,
    pub side_opacity: f32,
    #[serde(deserialize_with = "wide_words_per_display")]
    pub words_per_display: usize,
    pub book_metadata: Option<BookMetadata>,
    pub online_lookup: bool,
    pub updated_at: Option<String>,
}

// Numeric settings accept any JSON number and saturate into the field type;
// `sanitize` then clamps them to their valid range.
fn wide_wpm<'de, D: Deserializer<'de>>(de: D) -> Result<u16, D::Error> {
    Ok(Option::<f64>::deserialize(de)?.map_or(DEFAULT_WPM, |n| n.round() as u16))
}

fn wide_words_per_display<'de, D: Deserializer<'de>>(de: D) -> Result<usize, D::Error> {
    Ok(Option::<f64>::deserialize(de)?.map_or(DEFAULT_WORDS_PER_DISPLAY, |n| n as usize))
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            wpm: DEFAULT_WPM,
            text: String::new(),
            positions: HashMap::new(),
            side_opacity: DEFAULT_SIDE_OPACITY,
            words_per_display: DEFAULT_WORDS_PER_DISPLAY,
            book_metadata: None,
            online_lookup: false,
            updated_at: None,
        }
    }
}

impl AppState {
    /// Pull every setting back into its valid range.
    pub fn sanitize(&mut self) {
        self.wpm = clamp_wpm(self.wpm);
        self.words_per_display = clamp_words_per_display(self.words_per_display);
        self.side_opacity = if self.side_opacity.is_finite() {
            self.side_opacity.clamp(0.0, 1.0)
        } else {
            DEFAULT_SIDE_OPACITY
        };
    }

    pub fn fingerprint(&self) -> String {
        text_fingerprint(&self.text)
    }

    pub fn record_position(&mut self, index: usize) {
        self.positions.insert(self.fingerprint(), index);
    }

    /// Last index stored for the current text; callers clamp it to the
    /// word count.
    pub fn saved_position(&self) -> usize {
        self.positions
            .get(&self.fingerprint())
            .copied()
            .unwrap_or(0)
    }

    /// Replace the current text with a freshly loaded file and return the
    /// index to resume from.
    pub fn apply_loaded(&mut self, loaded: LoadedText) -> usize {
        self.text = loaded.text;
        self.book_metadata = loaded.metadata.filter(|m| !m.is_empty());
        let index = self.saved_position();
        self.record_position(index);
        index
    }
}

/// Storage boundary for [`AppState`]. Neither direction ever fails: a
/// missing or corrupt file loads as defaults and a failed write is logged
/// and dropped.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: Option<PathBuf>,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// `state.json` in the platform config directory, if there is one.
    pub fn default_location() -> Self {
        Self {
            path: config::state_path(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn load(&self) -> AppState {
        let Some(path) = &self.path else {
            return AppState::default();
        };
        let data = match fs::read(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no saved state");
                return AppState::default();
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read saved state, using defaults");
                return AppState::default();
            }
        };
        match serde_json::from_slice::<AppState>(&data) {
            Ok(mut state) => {
                state.sanitize();
                state
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "saved state is corrupt, using defaults");
                AppState::default()
            }
        }
    }

    pub fn save(&self, state: &AppState) {
        if let Err(e) = self.try_save(state) {
            warn!(error = %e, "failed to save state");
        }
    }

    fn try_save(&self, state: &AppState) -> std::io::Result<()> {
        let path = self
            .path
            .as_ref()
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "no config dir"))?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let mut record = state.clone();
        record.updated_at = Some(Utc::now().to_rfc3339());
        let s = serde_json::to_string_pretty(&record).map_err(std::io::Error::other)?;
        let tmp = path.with_extension("json.tmp");
        let mut f = fs::File::create(&tmp)?;
        f.write_all(s.as_bytes())?;
        f.sync_all()?;
        fs::rename(&tmp, path)
    }
}
