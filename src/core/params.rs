use std::path::PathBuf;

use crate::core::config::DEFAULT_CONFIG_FILE;

/// Run-level overrides as given on the command line. Unset fields leave the
/// config file's values in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOptions {
    /// Config file; `None` means the default file, which may be absent
    pub config: Option<PathBuf>,
    /// Single template replacing the job set
    pub file: Option<PathBuf>,
    /// Output path for every job
    pub output: Option<PathBuf>,
    /// JSON data file for every job
    pub data_file: Option<PathBuf>,
    /// Inline JSON object for every job
    pub data: Option<String>,
    /// Positional `key=value` arguments
    pub args: Vec<String>,
    /// Treat undefined template variables as render errors
    pub strict: bool,
}

impl RunOptions {
    /// The config file to read, falling back to [`DEFAULT_CONFIG_FILE`].
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }
}
