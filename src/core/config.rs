//! Job set configuration and its JSON config-file representation.
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, LoadError, Result};
use crate::types::DataContext;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".doc-template-go.json";

/// One template render task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Job {
    /// Template to render
    pub file: PathBuf,
    /// Output path; empty means stdout
    pub output: PathBuf,
    /// JSON data file for this job; empty means none
    pub data_file: PathBuf,
    /// Literal data, used when no other data source applies
    pub data: DataContext,
}

impl Job {
    /// A job rendering `file` to stdout with no data.
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            ..Self::default()
        }
    }

    pub fn writes_to_stdout(&self) -> bool {
        self.output.as_os_str().is_empty()
    }
}

/// A job set plus file-level defaults that behave like the matching CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Configuration {
    /// Where this configuration was loaded from
    #[serde(skip)]
    pub config_file: PathBuf,
    /// Single template replacing the job set
    pub file: PathBuf,
    /// Output path applied to every job
    pub output: PathBuf,
    /// Data file applied to every job
    pub data_file: PathBuf,
    /// Inline JSON object applied to every job
    pub data: String,
    /// Fail on undefined template variables
    pub strict: bool,
    pub templates: Vec<Job>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON file.
    ///
    /// A missing file, an empty file or invalid JSON is a [`Error::ConfigLoad`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config_load = |source: LoadError| Error::ConfigLoad {
            path: path.to_path_buf(),
            source,
        };

        let content = fs::read_to_string(path).map_err(|e| config_load(e.into()))?;
        let mut config: Configuration =
            serde_json::from_str(&content).map_err(|e| config_load(e.into()))?;
        config.config_file = path.to_path_buf();

        debug!(
            "Loaded configuration from {:?} with {} template(s)",
            path,
            config.templates.len()
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DynamicValue;

    #[test]
    fn test_load_missing_file() {
        let err = Configuration::load("does not exist").unwrap_err();
        assert!(matches!(
            err,
            Error::ConfigLoad {
                source: LoadError::Io(_),
                ..
            }
        ));
    }

    #[test]
    fn test_load_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "").unwrap();

        let err = Configuration::load(&path).unwrap_err();
        assert!(matches!(
            err,
            Error::ConfigLoad {
                source: LoadError::Json(_),
                ..
            }
        ));
    }

    #[test]
    fn test_load_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{
                "Templates": [
                    {
                        "File": "template1.tmpl",
                        "Output": "output1.txt",
                        "DataFile": "datafile1.json"
                    },
                    {
                        "File": "template2.tmpl",
                        "Data": {"name": "world"},
                        "Unknown": 3
                    }
                ]
            }"#,
        )
        .unwrap();

        let config = Configuration::load(&path).unwrap();

        let mut second = Job::new("template2.tmpl");
        second
            .data
            .insert("name".to_string(), DynamicValue::from("world"));
        let expected = Configuration {
            config_file: path.clone(),
            templates: vec![
                Job {
                    file: "template1.tmpl".into(),
                    output: "output1.txt".into(),
                    data_file: "datafile1.json".into(),
                    data: DataContext::new(),
                },
                second,
            ],
            ..Configuration::default()
        };
        assert_eq!(config, expected);
        assert!(!config.templates[0].writes_to_stdout());
        assert!(config.templates[1].writes_to_stdout());
    }

    #[test]
    fn test_load_top_level_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"File": "one.tmpl", "Output": "out.txt", "Data": "{\"k\": 1}"}"#,
        )
        .unwrap();

        let config = Configuration::load(&path).unwrap();
        assert_eq!(config.file, PathBuf::from("one.tmpl"));
        assert_eq!(config.output, PathBuf::from("out.txt"));
        assert_eq!(config.data, "{\"k\": 1}");
        assert!(config.data_file.as_os_str().is_empty());
        assert!(config.templates.is_empty());
    }
}
