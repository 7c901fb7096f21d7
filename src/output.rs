//! Writing generated files without touching unchanged ones.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;

/// Writes `contents` to `path` unless the file already holds exactly that.
///
/// Returns `true` if the file was written. Leaving identical files alone
/// keeps their timestamps, so build systems do not rebuild dependents.
pub fn write_if_changed(path: impl AsRef<Path>, contents: &str) -> io::Result<bool> {
    let path = path.as_ref();
    match fs::read(path) {
        Ok(existing) if existing == contents.as_bytes() => return Ok(false),
        Ok(_) => {}
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    fs::write(path, contents)?;
    Ok(true)
}
