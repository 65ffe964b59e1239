use std::fs::{self, File};
use std::path::Path;

use crate::errors::Result;

/// Creates the report file, making any missing parent directories first.
/// An existing file at the path is truncated.
pub(crate) fn create_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(File::create(path)?)
}
