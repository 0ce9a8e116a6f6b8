//! Render destinations: stdout or a freshly created file.
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Stdout, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Error, Result};

pub enum Destination {
    Stdout(Stdout),
    File { path: PathBuf, writer: BufWriter<File> },
}

impl Destination {
    /// Stdout for an empty path, otherwise a new file. An existing file at
    /// `output` is an [`Error::Output`]; it is never overwritten.
    pub fn open(output: &Path) -> Result<Self> {
        if output.as_os_str().is_empty() {
            return Ok(Destination::Stdout(io::stdout()));
        }

        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(output)
            .map_err(|source| Error::Output {
                target: output.display().to_string(),
                source,
            })?;
        debug!("Created output file {:?}", output);

        Ok(Destination::File {
            path: output.to_path_buf(),
            writer: BufWriter::new(file),
        })
    }

    /// Human-readable name for error messages.
    pub fn label(&self) -> String {
        match self {
            Destination::Stdout(_) => "stdout".to_string(),
            Destination::File { path, .. } => path.display().to_string(),
        }
    }

    /// Flush and close. If the buffered tail cannot be written the partial
    /// file is removed, as after a failed render.
    pub fn finish(self) -> Result<()> {
        match self {
            Destination::Stdout(mut out) => out.flush().map_err(|source| Error::Output {
                target: "stdout".to_string(),
                source,
            }),
            Destination::File { path, writer } => match writer.into_inner() {
                Ok(_) => Ok(()),
                Err(e) => {
                    let source = e.into_error();
                    remove_partial(&path);
                    Err(Error::Output {
                        target: path.display().to_string(),
                        source,
                    })
                }
            },
        }
    }

    /// Close after a failed render. The partial file is removed so a later
    /// run is not blocked by the exclusive create.
    pub fn abandon(self) {
        if let Destination::File { path, writer } = self {
            drop(writer);
            remove_partial(&path);
        }
    }
}

fn remove_partial(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        warn!("Could not remove partial output {:?}: {}", path, e);
    }
}

impl Write for Destination {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Destination::Stdout(out) => out.write(buf),
            Destination::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Destination::Stdout(out) => out.flush(),
            Destination::File { writer, .. } => writer.flush(),
        }
    }
}
