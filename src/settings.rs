use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{RackError, RackResult};

/// Settings file looked up in the working directory when none is given.
pub const DEFAULT_SETTINGS_FILE: &str = "appsettings.json";

fn default_column() -> String {
    "DEFAULT".to_string()
}

/// Names of the config columns that pick the template sheet and the new sheet name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    #[serde(rename = "RackSelectSheetType", default = "default_column")]
    pub sheet_type_column: String,
    #[serde(rename = "RackSelectSheetName", default = "default_column")]
    pub sheet_name_column: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sheet_type_column: default_column(),
            sheet_name_column: default_column(),
        }
    }
}

impl Settings {
    pub fn new(sheet_type_column: impl Into<String>, sheet_name_column: impl Into<String>) -> Self {
        Self {
            sheet_type_column: sheet_type_column.into(),
            sheet_name_column: sheet_name_column.into(),
        }
    }

    pub fn from_json(json: &str) -> RackResult<Self> {
        serde_json::from_str(json).map_err(|e| RackError::Settings(e.to_string()))
    }

    pub fn from_file(path: &Path) -> RackResult<Self> {
        let json = fs::read_to_string(path)
            .map_err(|e| RackError::Settings(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json(&json)
            .map_err(|e| RackError::Settings(format!("{}: {e}", path.display())))
    }

    /// Loads `explicit` when given (it must exist), otherwise `appsettings.json`
    /// in `dir` if present, otherwise the defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> RackResult<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let fallback: PathBuf = dir.join(DEFAULT_SETTINGS_FILE);
        if fallback.is_file() {
            Self::from_file(&fallback)
        } else {
            Ok(Self::default())
        }
    }

    /// Replaces the column names given on the command line.
    pub fn with_overrides(mut self, sheet_type: Option<String>, sheet_name: Option<String>) -> Self {
        if let Some(column) = sheet_type {
            self.sheet_type_column = column;
        }
        if let Some(column) = sheet_name {
            self.sheet_name_column = column;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn reads_appsettings_keys() {
        let settings =
            Settings::from_json(r#"{"RackSelectSheetType": "type", "RackSelectSheetName": "name"}"#)
                .unwrap();
        assert_eq!(settings, Settings::new("type", "name"));
    }

    #[test]
    fn missing_keys_default() {
        let settings = Settings::from_json(r#"{"Logging": {"LogLevel": "Trace"}}"#).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.sheet_type_column, "DEFAULT");
    }

    #[test]
    fn malformed_json_is_a_settings_error() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert_eq!(err.exit_code(), 11);
    }

    #[test]
    fn discover_prefers_explicit_file() {
        let dir = TempDir::new().unwrap();
        let explicit = dir.path().join("custom.json");
        fs::write(&explicit, r#"{"RackSelectSheetType": "kind"}"#).unwrap();
        fs::write(
            dir.path().join(DEFAULT_SETTINGS_FILE),
            r#"{"RackSelectSheetType": "ignored"}"#,
        )
        .unwrap();

        let settings = Settings::discover(Some(&explicit), dir.path()).unwrap();
        assert_eq!(settings.sheet_type_column, "kind");
        assert_eq!(settings.sheet_name_column, "DEFAULT");
    }

    #[test]
    fn discover_falls_back_to_appsettings_then_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            Settings::discover(None, dir.path()).unwrap(),
            Settings::default()
        );

        fs::write(
            dir.path().join(DEFAULT_SETTINGS_FILE),
            r#"{"RackSelectSheetType": "type", "RackSelectSheetName": "name"}"#,
        )
        .unwrap();
        assert_eq!(
            Settings::discover(None, dir.path()).unwrap(),
            Settings::new("type", "name")
        );
    }

    #[test]
    fn explicit_file_must_exist() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(
            Settings::discover(Some(&missing), dir.path()),
            Err(RackError::Settings(_))
        ));
    }

    #[test]
    fn overrides_win() {
        let settings = Settings::new("type", "name").with_overrides(Some("kind".into()), None);
        assert_eq!(settings, Settings::new("kind", "name"));
    }
}
