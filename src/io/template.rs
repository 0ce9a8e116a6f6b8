//! Template loading and rendering on top of minijinja.
use std::error::Error as _;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use minijinja::{Environment, ErrorKind, UndefinedBehavior};

use crate::error::{Error, LoadError, Result};
use crate::types::DataContext;

/// A parsed template file, ready to render.
#[derive(Debug)]
pub struct DocTemplate {
    path: PathBuf,
    name: String,
    env: Environment<'static>,
}

impl DocTemplate {
    /// Load and parse the template at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, false)
    }

    /// Like [`DocTemplate::open`]; with `strict` set, rendering fails on
    /// undefined variables instead of printing nothing.
    pub fn open_with(path: impl AsRef<Path>, strict: bool) -> Result<Self> {
        let path = path.as_ref();
        let template_open = |source: LoadError| Error::TemplateOpen {
            path: path.to_path_buf(),
            source,
        };

        let source = fs::read_to_string(path).map_err(|e| template_open(e.into()))?;
        let name = path.display().to_string();

        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        if strict {
            env.set_undefined_behavior(UndefinedBehavior::Strict);
        }
        env.add_template_owned(name.clone(), source)
            .map_err(|e| template_open(e.into()))?;

        Ok(Self {
            path: path.to_path_buf(),
            name,
            env,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Render against `data` and stream the result into `writer`.
    ///
    /// Write failures surfaced by the engine become [`Error::Output`] carrying
    /// the writer's own I/O error; the target is named `writer` since only the
    /// caller knows what it is.
    pub fn render<W: Write>(&self, data: &DataContext, writer: W) -> Result<()> {
        let template = self
            .env
            .get_template(&self.name)
            .map_err(|e| self.render_error(e))?;
        template
            .render_to_write(data, writer)
            .map(|_| ())
            .map_err(|e| self.render_error(e))
    }

    fn render_error(&self, err: minijinja::Error) -> Error {
        if err.kind() == ErrorKind::WriteFailure {
            let source = match err.source().and_then(|s| s.downcast_ref::<io::Error>()) {
                Some(io_err) => io::Error::new(io_err.kind(), io_err.to_string()),
                None => io::Error::other(err.to_string()),
            };
            return Error::Output {
                target: "writer".to_string(),
                source,
            };
        }
        Error::TemplateRender {
            path: self.path.clone(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DynamicValue;

    fn write_template(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("template.tmpl");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_open_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = DocTemplate::open(dir.path().join("does not exist")).unwrap_err();
        assert!(matches!(
            err,
            Error::TemplateOpen {
                source: LoadError::Io(_),
                ..
            }
        ));
    }

    #[test]
    fn test_open_invalid_syntax() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_template(dir.path(), "{% if x %}never closed");
        let err = DocTemplate::open(&path).unwrap_err();
        assert!(matches!(
            err,
            Error::TemplateOpen {
                source: LoadError::Syntax(_),
                ..
            }
        ));
    }

    #[test]
    fn test_render_empty() {
        let dir = tempfile::tempdir().unwrap();
        let template = DocTemplate::open(write_template(dir.path(), "")).unwrap();
        let mut out = Vec::new();
        template.render(&DataContext::new(), &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_render_loops_and_conditionals() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_template(
            dir.path(),
            "Hello {{ name }}!\n{% for i in items %}- {{ i }}\n{% endfor %}{% if done %}done{% endif %}\n",
        );
        let template = DocTemplate::open(&path).unwrap();

        let mut data = DataContext::new();
        data.insert("name".to_string(), DynamicValue::from("world"));
        data.insert(
            "items".to_string(),
            DynamicValue::List(vec![DynamicValue::from("a"), DynamicValue::from("b")]),
        );
        data.insert("done".to_string(), DynamicValue::Bool(true));

        let mut out = Vec::new();
        template.render(&data, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Hello world!\n- a\n- b\ndone\n"
        );
    }

    #[test]
    fn test_strict_undefined() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_template(dir.path(), "{{ missing }}");

        let mut out = Vec::new();
        DocTemplate::open(&path)
            .unwrap()
            .render(&DataContext::new(), &mut out)
            .unwrap();
        assert!(out.is_empty());

        let template = DocTemplate::open_with(&path, true).unwrap();
        let err = template
            .render(&DataContext::new(), Vec::<u8>::new())
            .unwrap_err();
        match err {
            Error::TemplateRender { path, .. } => assert_eq!(path, template.path()),
            other => panic!("unexpected error: {other}"),
        }
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed by reader"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_keeps_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_template(dir.path(), "some output");
        let template = DocTemplate::open(&path).unwrap();

        let err = template
            .render(&DataContext::new(), ClosedPipe)
            .unwrap_err();
        match err {
            Error::Output { target, source } => {
                assert_eq!(target, "writer");
                assert_eq!(source.kind(), io::ErrorKind::BrokenPipe);
                assert!(source.to_string().contains("pipe closed"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
