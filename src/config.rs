//! Driver settings, read from TOML.
//!
//! ```toml
//! precision = 3
//! color = false
//! shapes = ["circle 3", "rectangle 4 5"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub const MAX_PRECISION: usize = 10;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Decimals printed for areas and perimeters.
    pub precision: usize,
    pub color: bool,
    /// Descriptions used when `report` is given none on the command line.
    pub shapes: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            precision: 2,
            color: true,
            shapes: vec![
                "circle 3".to_string(),
                "rectangle 4 5".to_string(),
                "circle 6".to_string(),
                "rectangle 10 10".to_string(),
            ],
        }
    }
}

impl Settings {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded settings from {}", path.display());
        Self::from_toml_str(&content)
    }

    pub fn with_precision(mut self, precision: usize) -> Result<Self, ConfigError> {
        self.precision = precision;
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.precision > MAX_PRECISION {
            return Err(ConfigError::Invalid {
                field: "precision",
                reason: format!("{} exceeds the maximum of {}", self.precision, MAX_PRECISION),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_document_uses_defaults() {
        assert_eq!(Settings::from_toml_str("").unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_document() {
        let settings = Settings::from_toml_str("precision = 4\nshapes = [\"circle 1\"]").unwrap();
        assert_eq!(settings.precision, 4);
        assert!(settings.color);
        assert_eq!(settings.shapes, ["circle 1"]);
    }

    #[test]
    fn test_rejects_unknown_keys_and_bad_types() {
        assert!(matches!(
            Settings::from_toml_str("colour = false"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Settings::from_toml_str("precision = \"two\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_precision_is_bounded() {
        let err = Settings::from_toml_str("precision = 11").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "precision", .. }));
        assert!(Settings::default().with_precision(11).is_err());
        assert_eq!(Settings::default().with_precision(0).unwrap().precision, 0);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "color = false").unwrap();
        writeln!(file, "shapes = [\"rectangle 2 8\", \"circle 3.5\"]").unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert!(!settings.color);
        assert_eq!(settings.shapes.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = Settings::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("missing.toml"));
    }
}
