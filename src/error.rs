//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Every failure of a run maps to one variant; per-job failures are wrapped in
//! [`Error::Job`] so the caller knows which template broke.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Underlying cause of a failed load of a config file, data file or template.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Syntax(#[from] minijinja::Error),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not load config file {}: {source}", path.display())]
    ConfigLoad {
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    #[error("no templates configured")]
    NoTemplates,

    #[error("could not load data file {}: {source}", path.display())]
    DataFile {
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    #[error("invalid inline data: {0}")]
    DataArg(#[source] serde_json::Error),

    #[error("could not open template {}: {source}", path.display())]
    TemplateOpen {
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    #[error("could not render template {}: {source}", path.display())]
    TemplateRender {
        path: PathBuf,
        #[source]
        source: minijinja::Error,
    },

    #[error("could not write output {target}: {source}")]
    Output {
        target: String,
        #[source]
        source: std::io::Error,
    },

    #[error("template #{index} ({}): {source}", template.display())]
    Job {
        index: usize,
        template: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wrap a per-job failure with the job's position and template path.
    pub fn in_job(self, index: usize, template: impl Into<PathBuf>) -> Self {
        Error::Job {
            index,
            template: template.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, looking through any [`Error::Job`] wrapper.
    pub fn root(&self) -> &Error {
        match self {
            Error::Job { source, .. } => source.root(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_wrapper_names_the_template() {
        let err = Error::NoTemplates.in_job(2, "reports/weekly.tmpl");
        assert_eq!(
            err.to_string(),
            "template #2 (reports/weekly.tmpl): no templates configured"
        );
        assert!(matches!(err.root(), Error::NoTemplates));
    }

    #[test]
    fn output_error_mentions_target() {
        let err = Error::Output {
            target: "out.txt".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::AlreadyExists, "file exists"),
        };
        assert_eq!(err.to_string(), "could not write output out.txt: file exists");
    }
}
