//! Configuration layer: the platform data directory and `config.json`.
//!
//! The component runs inside a data directory laid out by the platform:
//! `config.json` at the root, input tables under `in/tables/`, and outputs
//! under `out/tables/`. Everything here is read once at startup and never
//! mutated.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Sub-directory holding the input CSV tables.
pub const IN_TABLES_DIR: &str = "in/tables";
/// Sub-directory receiving the output log and its manifest.
pub const OUT_TABLES_DIR: &str = "out/tables";
/// Configuration file name at the data-dir root.
pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone)]
/// Root of the platform data directory.
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    pub fn in_tables_dir(&self) -> PathBuf {
        self.root.join(IN_TABLES_DIR)
    }

    pub fn out_tables_dir(&self) -> PathBuf {
        self.root.join(OUT_TABLES_DIR)
    }

    /// Read and parse `config.json`.
    pub fn load_config(&self) -> Result<ConfigFile, ConfigError> {
        let path = self.config_path();
        let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
            path: path.display().to_string(),
            source,
        })
    }

    /// Resolve the configured input tables to concrete files under
    /// `in/tables/`, preserving the configured order.
    pub fn input_tables(&self, config: &ConfigFile) -> Vec<InputTable> {
        let dir = self.in_tables_dir();
        config
            .storage
            .input
            .tables
            .iter()
            .map(|mapping| InputTable {
                name: mapping.destination.clone(),
                path: dir.join(&mapping.destination),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
/// Top-level shape of `config.json`.
pub struct ConfigFile {
    #[serde(default)]
    pub parameters: Parameters,
    #[serde(default)]
    pub storage: Storage,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
/// User-supplied component parameters.
///
/// All fields are optional at the serde level so that the validator, not the
/// parser, decides what a missing credential means for the run.
pub struct Parameters {
    #[serde(default)]
    pub account_sid: Option<String>,
    #[serde(default, rename = "#auth_token")]
    pub auth_token: Option<String>,
    #[serde(default)]
    pub messaging_service_sid: Option<String>,
    #[serde(default)]
    pub output_log: Option<OutputLogFlag>,
}

impl Parameters {
    /// True when the component was saved without any configuration at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether a delivery log should be written for this run.
    pub fn output_log_enabled(&self) -> bool {
        self.output_log
            .as_ref()
            .is_some_and(OutputLogFlag::is_truthy)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
/// Boolean-ish `output_log` value.
///
/// Older configurations stored this as a string or number instead of a JSON
/// bool; strings `"false"` and `"0"` (and empty) count as false.
pub enum OutputLogFlag {
    Bool(bool),
    Number(serde_json::Number),
    String(String),
}

impl OutputLogFlag {
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(value) => *value,
            Self::Number(value) => value.as_f64().is_some_and(|n| n != 0.0),
            Self::String(value) => {
                let trimmed = value.trim();
                !trimmed.is_empty()
                    && !trimmed.eq_ignore_ascii_case("false")
                    && trimmed != "0"
            }
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Storage {
    #[serde(default)]
    pub input: InputMapping,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputMapping {
    #[serde(default)]
    pub tables: Vec<TableMapping>,
}

#[derive(Debug, Clone, Deserialize)]
/// One entry of `storage.input.tables`.
pub struct TableMapping {
    #[serde(default)]
    pub source: Option<String>,
    pub destination: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A configured input table resolved to a file on disk.
pub struct InputTable {
    pub name: String,
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const FULL_CONFIG: &str = r##"
    {
      "parameters": {
        "account_sid": "AC123",
        "#auth_token": "secret",
        "messaging_service_sid": "MG999",
        "output_log": true
      },
      "storage": {
        "input": {
          "tables": [
            {"source": "in.c-main.contacts", "destination": "contacts.csv"},
            {"source": "in.c-main.reminders", "destination": "reminders.csv"}
          ]
        }
      }
    }
    "##;

    fn write_config(dir: &tempfile::TempDir, contents: &str) -> DataDir {
        let data_dir = DataDir::new(dir.path());
        let mut file = std::fs::File::create(data_dir.config_path()).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        data_dir
    }

    #[test]
    fn loads_parameters_including_hashed_token_key() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = write_config(&dir, FULL_CONFIG);

        let config = data_dir.load_config().unwrap();
        assert_eq!(config.parameters.account_sid.as_deref(), Some("AC123"));
        assert_eq!(config.parameters.auth_token.as_deref(), Some("secret"));
        assert_eq!(
            config.parameters.messaging_service_sid.as_deref(),
            Some("MG999")
        );
        assert!(config.parameters.output_log_enabled());
    }

    #[test]
    fn resolves_input_tables_in_configured_order() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = write_config(&dir, FULL_CONFIG);

        let config = data_dir.load_config().unwrap();
        let tables = data_dir.input_tables(&config);
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].name, "contacts.csv");
        assert_eq!(tables[0].path, data_dir.in_tables_dir().join("contacts.csv"));
        assert_eq!(tables[1].name, "reminders.csv");
    }

    #[test]
    fn empty_parameters_detected() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = write_config(&dir, r#"{"parameters": {}}"#);

        let config = data_dir.load_config().unwrap();
        assert!(config.parameters.is_empty());
        assert!(data_dir.input_tables(&config).is_empty());
    }

    #[test]
    fn missing_config_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = DataDir::new(dir.path());
        assert!(matches!(
            data_dir.load_config(),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn malformed_config_file_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = write_config(&dir, "{ nope");
        assert!(matches!(
            data_dir.load_config(),
            Err(ConfigError::Json { .. })
        ));
    }

    #[test]
    fn output_log_flag_truthiness() {
        assert!(OutputLogFlag::Bool(true).is_truthy());
        assert!(!OutputLogFlag::Bool(false).is_truthy());
        assert!(OutputLogFlag::Number(1.into()).is_truthy());
        assert!(!OutputLogFlag::Number(0.into()).is_truthy());
        assert!(OutputLogFlag::String("yes".to_owned()).is_truthy());
        assert!(!OutputLogFlag::String("false".to_owned()).is_truthy());
        assert!(!OutputLogFlag::String("0".to_owned()).is_truthy());
        assert!(!OutputLogFlag::String("".to_owned()).is_truthy());
    }
}
