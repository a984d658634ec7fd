use crate::constants::ALLOWED_EXTENSIONS;
use crate::error::{ForgeError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Check if a path has a recognized image extension (case-insensitive).
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// List the image files directly inside `folder` (non-recursive).
///
/// Keeps regular files whose extension belongs to the allowed set.
/// Order follows directory enumeration and is not guaranteed sorted.
/// Fails with `FolderNotFound` if the folder does not exist; an
/// existing folder with no matching files yields an empty vec.
pub fn parse_images(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(ForgeError::FolderNotFound(folder.to_path_buf()));
    }

    let mut images = Vec::new();
    for entry in WalkDir::new(folder).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| {
            e.into_io_error()
                .map(ForgeError::Io)
                .unwrap_or_else(|| ForgeError::FolderNotFound(folder.to_path_buf()))
        })?;
        let path = entry.path();
        if path.is_file() && is_image_file(path) {
            images.push(path.to_path_buf());
        }
    }

    Ok(images)
}
