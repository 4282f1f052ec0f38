//! YAML settings file, the defaults layer below CLI flags.
//!
//! Resolution order for each value: CLI flag, then settings file, then the
//! built-in default. The file is searched at `config/settings.yaml`,
//! `settings.yaml`, and `~/.perfwatch/settings.yaml`, first hit wins; a
//! missing file is not an error.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub loadtest: LoadtestSettings,
    pub reports: ReportsSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoadtestSettings {
    pub requests: Option<u64>,
    pub concurrent: Option<u64>,
    /// Per-request timeout in seconds.
    pub timeout: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReportsSettings {
    pub output_dir: Option<PathBuf>,
}

impl Settings {
    /// Loads settings from `explicit` if given (a missing explicit file is an
    /// error), otherwise from the first search path that exists, otherwise
    /// returns the defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        for path in Self::search_paths() {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from("config/settings.yaml"),
            PathBuf::from("settings.yaml"),
        ];
        if let Some(home) = std::env::var_os("HOME") {
            paths.push(PathBuf::from(home).join(".perfwatch").join("settings.yaml"));
        }
        paths
    }

    fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file: {}", path.display()))?;
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&raw)
            .with_context(|| format!("failed to parse settings file: {}", path.display()))
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.reports
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("reports"))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use std::io::Write as _;

    fn write_settings(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn full_settings_file_parses() {
        let file = write_settings(
            "loadtest:\n  requests: 250\n  concurrent: 20\n  timeout: 15\nreports:\n  output_dir: out/reports\n",
        );

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.loadtest.requests, Some(250));
        assert_eq!(settings.loadtest.concurrent, Some(20));
        assert_eq!(settings.loadtest.timeout, Some(15));
        assert_eq!(settings.reports_dir(), PathBuf::from("out/reports"));
    }

    #[test]
    fn partial_settings_leave_the_rest_unset() {
        let file = write_settings("loadtest:\n  requests: 50\n");

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.loadtest.requests, Some(50));
        assert_eq!(settings.loadtest.concurrent, None);
        assert_eq!(settings.loadtest.timeout, None);
        assert_eq!(settings.reports_dir(), PathBuf::from("reports"));
    }

    #[test]
    fn empty_file_yields_defaults() {
        let file = write_settings("");
        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.loadtest.requests, None);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        assert!(Settings::load(Some(Path::new("/nonexistent/settings.yaml"))).is_err());
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let file = write_settings("loadtest: [not, a, map\n");
        assert!(Settings::load(Some(file.path())).is_err());
    }
}
