use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, LoadError, Result};
use crate::types::DataContext;

/// Read a JSON data file holding a top-level object.
pub fn read_data_file(path: &Path) -> Result<DataContext> {
    let data_file = |source: LoadError| Error::DataFile {
        path: path.to_path_buf(),
        source,
    };

    let content = fs::read(path).map_err(|e| data_file(e.into()))?;
    let data: DataContext = serde_json::from_slice(&content).map_err(|e| data_file(e.into()))?;

    debug!("Read {} key(s) from data file {:?}", data.len(), path);
    Ok(data)
}
