//! Platform paths for configuration and data files.
//!
//! Locations follow the platform conventions reported by the `dirs` crate:
//!
//! | File          | Linux default                              |
//! |---------------|--------------------------------------------|
//! | configuration | `~/.config/rpncalc/config.toml`            |
//! | history       | `~/.local/share/rpncalc/history.json`      |
//! | traces        | `~/.local/share/rpncalc/traces.json`       |
//!
//! Setting `RPNCALC_DATA_DIR` relocates the data directory, which is how
//! tests and sandboxed runs keep their files apart.

use std::path::PathBuf;

/// Environment variable overriding [`data_dir`].
pub const DATA_DIR_ENV: &str = "RPNCALC_DATA_DIR";

const APP_DIR: &str = "rpncalc";

/// Directory for history and trace files.
///
/// Falls back to the current directory when the platform reports no data
/// directory.
#[must_use]
pub fn data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Directory holding `config.toml`.
#[must_use]
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

#[must_use]
pub fn history_file() -> PathBuf {
    data_dir().join("history.json")
}

#[must_use]
pub fn trace_file() -> PathBuf {
    data_dir().join("traces.json")
}

/// Expands a leading `~` to the home directory.
///
/// Paths in the configuration file may be written relative to the home
/// directory. Without a known home directory the path is returned as is.
///
/// # Examples
///
/// ```
/// use rpncalc::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/absolute/path"), PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = dirs::home_dir();
    match (path.strip_prefix('~'), home) {
        (Some(""), Some(home)) => home,
        (Some(rest), Some(home)) if rest.starts_with('/') => {
            home.join(rest.trim_start_matches('/'))
        }
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_expansion() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~"), home);
            assert_eq!(expand_tilde("~/calc/history.json"), home.join("calc/history.json"));
        }
        assert_eq!(expand_tilde("~other/x"), PathBuf::from("~other/x"));
        assert_eq!(expand_tilde("relative"), PathBuf::from("relative"));
    }

    #[test]
    fn files_live_under_their_directories() {
        assert!(history_file().starts_with(data_dir()));
        assert!(config_file().ends_with("rpncalc/config.toml"));
    }
}
