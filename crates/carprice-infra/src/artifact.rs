//! Opening startup artifacts (datasets, models)

use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use carprice_types::{Error, Result};

/// Open an artifact file, reporting a missing file as [`Error::DataUnavailable`]
pub fn open_artifact(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::DataUnavailable(path.display().to_string()),
        _ => Error::Io(e),
    })
}
