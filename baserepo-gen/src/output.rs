//! Output writer for generated files.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};
use std::io::{self, Write};
use tracing::debug;

use crate::error::GenerateError;

/// Replaces the file at `path` with `contents`.
///
/// The text goes to a hidden sibling first and is then renamed over `path`,
/// so readers see either the previous file or the complete new one.
///
/// # Errors
///
/// Returns [`GenerateError::Write`] when the directory cannot be opened or
/// the file cannot be written or renamed.
pub fn write_atomic(path: &Utf8Path, contents: &str) -> Result<(), GenerateError> {
    let write_error = |source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file_name = path.file_name().ok_or_else(|| {
        write_error(io::Error::new(
            io::ErrorKind::InvalidInput,
            "output path has no file name",
        ))
    })?;
    let directory = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let dir = Dir::open_ambient_dir(directory, ambient_authority()).map_err(write_error)?;

    let temp_name = format!(".{file_name}.tmp");
    let result = write_file(&dir, &temp_name, contents)
        .and_then(|()| dir.rename(&temp_name, &dir, file_name));
    if let Err(source) = result {
        if let Err(cleanup) = dir.remove_file(&temp_name) {
            debug!(path = %directory.join(&temp_name), error = %cleanup, "temporary file not removed");
        }
        return Err(write_error(source));
    }
    Ok(())
}

fn write_file(dir: &Dir, name: &str, contents: &str) -> io::Result<()> {
    let mut file = dir.open_with(
        name,
        OpenOptions::new().write(true).create(true).truncate(true),
    )?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}
