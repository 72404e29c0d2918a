//! Layered configuration: embedded defaults plus an optional user
//! override file in the platform config directory.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

use serde::Deserialize;

use chordloop_audio::{EngineSettings, DEFAULT_BASE_OCTAVE, DEFAULT_BPM};
use chordloop_types::{ChordQuality, ChordSymbol, PitchClass, Progression, TheoryError};

const DEFAULT_CONFIG: &str = include_str!("../config.toml");
const DEFAULT_OSC_ADDR: &str = "127.0.0.1:57120";

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    defaults: DefaultsConfig,
    #[serde(default)]
    engine: EngineConfig,
}

#[derive(Deserialize, Default)]
struct DefaultsConfig {
    bpm: Option<f32>,
    base_octave: Option<i32>,
    progression: Option<Vec<String>>,
}

#[derive(Deserialize, Default)]
struct EngineConfig {
    osc_addr: Option<String>,
    event_log: Option<bool>,
    rng_seed: Option<u64>,
}

pub struct Config {
    defaults: DefaultsConfig,
    engine: EngineConfig,
}

impl Config {
    pub fn load() -> Self {
        let mut base: ConfigFile =
            toml::from_str(DEFAULT_CONFIG).expect("Failed to parse embedded config.toml");

        if let Some(path) = user_config_path() {
            if path.exists() {
                match std::fs::read_to_string(&path) {
                    Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                        Ok(user) => {
                            merge_defaults(&mut base.defaults, user.defaults);
                            merge_engine(&mut base.engine, user.engine);
                        }
                        Err(e) => {
                            log::warn!(target: "config", "ignoring malformed config {}: {}", path.display(), e)
                        }
                    },
                    Err(e) => {
                        log::warn!(target: "config", "could not read config {}: {}", path.display(), e)
                    }
                }
            }
        }

        Config {
            defaults: base.defaults,
            engine: base.engine,
        }
    }

    pub fn bpm(&self) -> f32 {
        match self.defaults.bpm {
            Some(bpm) if bpm.is_finite() && bpm > 0.0 => bpm,
            Some(bpm) => {
                log::warn!(target: "config", "ignoring invalid bpm {}", bpm);
                DEFAULT_BPM
            }
            None => DEFAULT_BPM,
        }
    }

    pub fn base_octave(&self) -> i32 {
        self.defaults.base_octave.unwrap_or(DEFAULT_BASE_OCTAVE)
    }

    /// The startup progression. Unparseable entries are skipped with a
    /// warning; if nothing parseable remains the built-in progression
    /// is used.
    pub fn progression(&self) -> Progression {
        let entries = match &self.defaults.progression {
            Some(entries) => entries,
            None => return Progression::default(),
        };
        let chords: Vec<ChordSymbol> = entries
            .iter()
            .filter_map(|entry| match parse_chord(entry) {
                Ok(chord) => Some(chord),
                Err(e) => {
                    log::warn!(target: "config", "skipping chord {:?}: {}", entry, e);
                    None
                }
            })
            .collect();
        if chords.is_empty() {
            Progression::default()
        } else {
            Progression::from_chords(chords)
        }
    }

    pub fn osc_addr(&self) -> SocketAddr {
        let text = self.engine.osc_addr.as_deref().unwrap_or(DEFAULT_OSC_ADDR);
        match text.parse() {
            Ok(addr) => addr,
            Err(e) => {
                log::warn!(target: "config", "invalid osc_addr {:?}: {}", text, e);
                DEFAULT_OSC_ADDR.parse().expect("default osc addr parses")
            }
        }
    }

    pub fn event_log_enabled(&self) -> bool {
        self.engine.event_log.unwrap_or(false)
    }

    /// Where the note event log goes when enabled:
    /// `<data dir>/chordloop/notes.jsonl`.
    pub fn event_log_path(&self) -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("chordloop")
            .join("notes.jsonl")
    }

    pub fn engine_settings(&self) -> EngineSettings {
        let fallback = EngineSettings::default();
        EngineSettings {
            bpm: self.bpm(),
            base_octave: self.base_octave(),
            rng_seed: self.engine.rng_seed.unwrap_or(fallback.rng_seed),
        }
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("chordloop").join("config.toml"))
}

fn merge_defaults(base: &mut DefaultsConfig, user: DefaultsConfig) {
    if user.bpm.is_some() {
        base.bpm = user.bpm;
    }
    if user.base_octave.is_some() {
        base.base_octave = user.base_octave;
    }
    if user.progression.is_some() {
        base.progression = user.progression;
    }
}

fn merge_engine(base: &mut EngineConfig, user: EngineConfig) {
    if user.osc_addr.is_some() {
        base.osc_addr = user.osc_addr;
    }
    if user.event_log.is_some() {
        base.event_log = user.event_log;
    }
    if user.rng_seed.is_some() {
        base.rng_seed = user.rng_seed;
    }
}

/// Chord string parse error.
#[derive(Debug)]
pub enum ChordParseError {
    /// Not of the form "Root quality".
    Malformed(String),
    UnknownRoot(String),
    Quality(TheoryError),
}

impl From<TheoryError> for ChordParseError {
    fn from(e: TheoryError) -> Self {
        Self::Quality(e)
    }
}

impl fmt::Display for ChordParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(s) => write!(f, "malformed chord {:?}, expected \"Root quality\"", s),
            Self::UnknownRoot(s) => write!(f, "unknown root {:?}", s),
            Self::Quality(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ChordParseError {}

/// Parse a chord string like "C maj7" or "F# min".
pub fn parse_chord(s: &str) -> Result<ChordSymbol, ChordParseError> {
    let mut parts = s.split_whitespace();
    let (root, quality) = match (parts.next(), parts.next(), parts.next()) {
        (Some(root), Some(quality), None) => (root, quality),
        _ => return Err(ChordParseError::Malformed(s.to_string())),
    };
    let root =
        PitchClass::parse(root).ok_or_else(|| ChordParseError::UnknownRoot(root.to_string()))?;
    let quality = ChordQuality::from_key(quality)?;
    Ok(ChordSymbol::new(root, quality))
}
