//! Image discovery for the backdrop picker.

use crate::error::SyncError;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Extensions WezTerm can load as a background, compared case-insensitively.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "ico", "tiff", "pnm", "dds", "tga", "webp",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackdropImage {
    pub filename: String,
    pub path: PathBuf,
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.iter().any(|i| i.eq_ignore_ascii_case(ext)))
}

/// Image files directly inside `dir`, sorted by file name.
///
/// A missing directory yields an empty list; a path that is not a directory
/// is an error.
pub fn list_backdrop_images(dir: &Path) -> Result<Vec<BackdropImage>, SyncError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(_) if dir.exists() && !dir.is_dir() => {
            return Err(SyncError::io(
                dir,
                io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
            ));
        }
        Err(e) => return Err(SyncError::io(dir, e)),
    };

    let mut images: Vec<BackdropImage> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_image(path))
        .filter_map(|path| {
            let filename = path.file_name()?.to_string_lossy().into_owned();
            Some(BackdropImage { filename, path })
        })
        .collect();
    images.sort_by(|a, b| a.filename.cmp(&b.filename));
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_lists_images_sorted() {
        let dir = tempdir().unwrap();
        for name in ["b.PNG", "a.jpg", "notes.txt", "c.webp", "noext"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }
        fs::create_dir(dir.path().join("d.png")).unwrap();

        let names: Vec<String> = list_backdrop_images(dir.path())
            .unwrap()
            .into_iter()
            .map(|i| i.filename)
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.PNG", "c.webp"]);
    }

    #[test]
    fn test_missing_dir_is_empty() {
        let dir = tempdir().unwrap();
        assert!(list_backdrop_images(&dir.path().join("nope")).unwrap().is_empty());
    }

    #[test]
    fn test_file_is_an_error() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("image.png");
        fs::write(&file, "x").unwrap();
        assert!(list_backdrop_images(&file).is_err());
    }
}
