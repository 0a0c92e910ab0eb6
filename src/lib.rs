//! rpncalc: a button-driven arithmetic expression builder.
//!
//! Input arrives one key at a time. Each key is routed to an append policy
//! that decides how the token sequence changes, so the expression is always
//! well formed enough to display. Pressing equals repairs the tail, converts
//! the infix tokens to reverse Polish notation with the shunting-yard
//! algorithm and evaluates them on a stack.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal front end (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, effects                          │
//! │  - Append policies, input processor                 │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Engine        │   │ Storage Layer │   │ UI / Voice    │
//! │ (engine/)     │   │ (storage/)    │   │ (ui/, voice/) │
//! │ - Sanitizer   │   │ - JSON I/O    │   │ - View model  │
//! │ - RPN convert │   │ - History     │   │ - Renderer    │
//! │ - Evaluator   │   │ - Backend API │   │ - Word table  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Tokens, buttons, errors (domain/)                │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```toml
//! # ~/.config/rpncalc/config.toml
//! trace_level = "debug"
//! history_limit = 50
//!
//! [format]
//! scientific_upper = 1e10
//! fraction_digits = 8
//!
//! [display]
//! grouping_separator = " "
//! decimal_separator = ","
//! ```
//!
//! # Example
//!
//! ```rust
//! use rpncalc::{handle_event, initialize, Button, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! for button in [Button::Digit(2), Button::Add, Button::Digit(3), Button::Multiply, Button::Digit(4), Button::Equals] {
//!     let (_changed, _effects) = handle_event(&mut state, &Event::Button(button))?;
//! }
//! assert_eq!(state.snapshot().display_text(), "14");
//! # Ok::<(), rpncalc::CalcError>(())
//! ```

pub mod app;
pub mod domain;
pub mod engine;
pub mod infrastructure;
pub mod observability;
pub mod storage;
pub mod ui;
pub mod voice;

pub use app::{handle, handle_event, AppState, CalculatorState, Effect, Event, Snapshot};
pub use domain::{Button, CalcError, Result, Token};
pub use engine::FormatPolicy;
pub use observability::Rotation;
pub use ui::DisplayOptions;

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Application configuration.
///
/// Loaded from `config.toml` in the platform config directory. Every field
/// has a default, so a partial or missing file is fine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tracing filter, e.g. `info` or `rpncalc=debug`. `RUST_LOG` wins.
    pub trace_level: Option<String>,

    /// Trace file. Default: `<data dir>/traces.json`.
    pub trace_file: Option<PathBuf>,

    /// Trace file size limit and backup count.
    pub trace_rotation: Rotation,

    /// History file. Default: `<data dir>/history.json`.
    pub history_file: Option<PathBuf>,

    /// Persist finished calculations.
    pub history_enabled: bool,

    /// Maximum calculations kept on disk.
    pub history_limit: usize,

    /// Result rendering thresholds.
    pub format: FormatPolicy,

    /// Display localization.
    pub display: DisplayOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trace_level: None,
            trace_file: None,
            trace_rotation: Rotation::default(),
            history_file: None,
            history_enabled: true,
            history_limit: storage::json::DEFAULT_HISTORY_LIMIT,
            format: FormatPolicy::default(),
            display: DisplayOptions::default(),
        }
    }
}

impl Config {
    /// Reads a TOML configuration file.
    ///
    /// Paths inside the file may start with `~`.
    ///
    /// # Errors
    ///
    /// Returns [`CalcError::Io`] if the file cannot be read and
    /// [`CalcError::Config`] if it is not valid TOML for this structure.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parses TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`CalcError::Config`] on malformed input.
    ///
    /// ```rust
    /// use rpncalc::Config;
    ///
    /// let config = Config::from_toml("history_enabled = false\n[format]\nfraction_digits = 4\n")?;
    /// assert!(!config.history_enabled);
    /// assert_eq!(config.format.fraction_digits, 4);
    /// assert_eq!(config.format.significant_digits, 6);
    /// # Ok::<(), rpncalc::CalcError>(())
    /// ```
    pub fn from_toml(contents: &str) -> Result<Self> {
        let mut config: Self =
            toml::from_str(contents).map_err(|e| CalcError::Config(e.to_string()))?;
        config.expand_paths();
        Ok(config)
    }

    /// Loads `explicit` if given, else the default config file if it exists,
    /// else defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when the chosen file exists but cannot be parsed, or
    /// when an explicit path cannot be read.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            tracing::debug!(path = ?path, "loading configuration");
            return Self::from_file(path);
        }

        let default_path = infrastructure::config_file();
        if default_path.exists() {
            tracing::debug!(path = ?default_path, "loading configuration");
            Self::from_file(&default_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Builds a configuration from flat key/value pairs.
    ///
    /// Unknown keys are ignored and unparsable values keep their defaults.
    ///
    /// # Parsing Rules
    ///
    /// - `trace_level`, `trace_file`, `history_file`: taken as is
    /// - `history_enabled`: `true`/`false`
    /// - `history_limit`, `fraction_digits`, `significant_digits`,
    ///   `trace_max_backups`: unsigned integers
    /// - `trace_max_bytes`: unsigned integer
    /// - `scientific_upper`, `scientific_lower`: floats
    /// - `grouping_separator`, `decimal_separator`: a single character;
    ///   an empty `grouping_separator` disables grouping
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use rpncalc::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("fraction_digits".to_string(), "3".to_string());
    /// map.insert("decimal_separator".to_string(), ",".to_string());
    /// map.insert("history_limit".to_string(), "many".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.format.fraction_digits, 3);
    /// assert_eq!(config.display.decimal_separator, ',');
    /// assert_eq!(config.history_limit, 100);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        fn parsed<T: std::str::FromStr>(map: &BTreeMap<String, String>, key: &str) -> Option<T> {
            map.get(key).and_then(|v| v.trim().parse().ok())
        }
        fn single_char(value: &str) -> Option<char> {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c),
                _ => None,
            }
        }

        let mut config = Self::default();

        config.trace_level = map.get("trace_level").cloned();
        config.trace_file = map.get("trace_file").map(PathBuf::from);
        config.history_file = map.get("history_file").map(PathBuf::from);
        if let Some(enabled) = parsed(map, "history_enabled") {
            config.history_enabled = enabled;
        }
        if let Some(limit) = parsed(map, "history_limit") {
            config.history_limit = limit;
        }
        if let Some(bytes) = parsed(map, "trace_max_bytes") {
            config.trace_rotation.max_bytes = bytes;
        }
        if let Some(backups) = parsed(map, "trace_max_backups") {
            config.trace_rotation.max_backups = backups;
        }

        if let Some(upper) = parsed(map, "scientific_upper") {
            config.format.scientific_upper = upper;
        }
        if let Some(lower) = parsed(map, "scientific_lower") {
            config.format.scientific_lower = lower;
        }
        if let Some(digits) = parsed(map, "fraction_digits") {
            config.format.fraction_digits = digits;
        }
        if let Some(digits) = parsed(map, "significant_digits") {
            config.format.significant_digits = digits;
        }

        if let Some(value) = map.get("grouping_separator") {
            config.display.grouping_separator = single_char(value);
        }
        if let Some(separator) = map.get("decimal_separator").and_then(|v| single_char(v)) {
            config.display.decimal_separator = separator;
        }

        config.expand_paths();
        config
    }

    /// History file after applying the default location.
    #[must_use]
    pub fn history_path(&self) -> PathBuf {
        self.history_file
            .clone()
            .unwrap_or_else(infrastructure::history_file)
    }

    fn expand_paths(&mut self) {
        for path in [&mut self.trace_file, &mut self.history_file].into_iter().flatten() {
            if let Some(text) = path.to_str() {
                *path = infrastructure::expand_tilde(text);
            }
        }
    }
}

/// Creates the expression store for a configuration.
///
/// Tracing is not started here; call
/// [`observability::init_tracing`] first if spans should be recorded.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(
        history_enabled = config.history_enabled,
        history_limit = config.history_limit,
        fraction_digits = config.format.fraction_digits,
        "initializing calculator"
    );
    AppState::new(config.format).with_history_limit(config.history_limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert!(config.history_enabled);
        assert_eq!(config.history_limit, 100);
        assert_eq!(config.display.decimal_separator, '.');
        assert_eq!(config.display.grouping_separator, None);
    }

    #[test]
    fn toml_sections() {
        let config = Config::from_toml(
            r#"
            trace_level = "debug"
            history_file = "/tmp/h.json"

            [trace_rotation]
            max_backups = 1

            [display]
            grouping_separator = " "
            decimal_separator = ","
            "#,
        )
        .unwrap();

        assert_eq!(config.trace_level.as_deref(), Some("debug"));
        assert_eq!(config.history_path(), PathBuf::from("/tmp/h.json"));
        assert_eq!(config.trace_rotation.max_backups, 1);
        assert_eq!(config.trace_rotation.max_bytes, Rotation::default().max_bytes);
        assert_eq!(config.display.grouping_separator, Some(' '));
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let err = Config::from_toml("history_limit = \"lots\"").unwrap_err();
        assert!(matches!(err, CalcError::Config(_)));
    }

    #[test]
    fn map_disables_grouping_with_empty_value() {
        let mut map = BTreeMap::new();
        map.insert("grouping_separator".to_string(), String::new());
        map.insert("history_enabled".to_string(), "false".to_string());
        let config = Config::from_map(&map);
        assert_eq!(config.display.grouping_separator, None);
        assert!(!config.history_enabled);
    }

    #[test]
    fn initialize_uses_format_policy() {
        let mut config = Config::default();
        config.format.fraction_digits = 2;
        let state = initialize(&config);
        assert_eq!(state.format.fraction_digits, 2);
        assert_eq!(state.expression, vec![Token::zero()]);
    }

    #[test]
    fn initialize_uses_history_limit() {
        let config = Config {
            history_limit: 7,
            ..Config::default()
        };
        assert_eq!(initialize(&config).history_limit, 7);
    }
}
