//! Crash-safe file replacement: write a sibling temp file, then rename.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("file"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Replace `path` with `contents` so readers never observe a partial file.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let temp = temp_path(path);
    finish(&temp, fs::write(&temp, contents).and_then(|()| fs::rename(&temp, path)))
}

/// Copy `from` over `to` with the same guarantee as [`write_atomic`].
pub fn copy_atomic(from: &Path, to: &Path) -> io::Result<()> {
    let temp = temp_path(to);
    finish(&temp, fs::copy(from, &temp).and_then(|_| fs::rename(&temp, to)))
}

/// Create `path` only if it does not exist, filling it with `fill`.
///
/// Returns `Ok(false)` when the file is already there. A failed fill removes
/// the new file so the next call starts over instead of seeing a stub.
pub fn create_new_with(
    path: &Path,
    fill: impl FnOnce(&mut fs::File) -> io::Result<()>,
) -> io::Result<bool> {
    let mut file = match fs::OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(e),
    };
    match fill(&mut file).and_then(|()| file.sync_all()) {
        Ok(()) => Ok(true),
        Err(e) => {
            drop(file);
            let _ = fs::remove_file(path);
            Err(e)
        }
    }
}

/// Drop a half-written temp file when any step failed.
fn finish(temp: &Path, result: io::Result<()>) -> io::Result<()> {
    if result.is_err() {
        let _ = fs::remove_file(temp);
    }
    result
}
