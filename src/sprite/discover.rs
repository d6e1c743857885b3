use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::warn;

use crate::error::SheetError;

const SUPPORTED_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "tga", "tif", "tiff", "webp",
];

/// Gather image paths from an optional list file and explicit inputs.
///
/// List-file entries come first, then `inputs`, each in the given order.
/// Directories are walked recursively in sorted order. Files that are not
/// supported images are skipped with a warning.
pub fn collect_image_paths(
    inputs: &[impl AsRef<Path>],
    input_list: Option<&Path>,
) -> Result<Vec<PathBuf>> {
    let mut candidates = Vec::new();

    if let Some(list) = input_list {
        candidates.extend(read_input_list(list)?);
    }
    candidates.extend(inputs.iter().map(|p| p.as_ref().to_path_buf()));

    let mut paths = Vec::new();
    for path in candidates {
        if !path.exists() {
            return Err(SheetError::InputNotFound(path).into());
        }

        if path.is_dir() {
            collect_from_directory(&path, &mut paths)?;
        } else if is_supported_image(&path) {
            paths.push(path);
        } else {
            warn!("{} is not an image file", path.display());
        }
    }

    if paths.is_empty() {
        return Err(SheetError::NoImages.into());
    }

    Ok(paths)
}

/// One path per line; blank lines are ignored
fn read_input_list(list: &Path) -> Result<Vec<PathBuf>> {
    let content = fs::read_to_string(list).map_err(|e| SheetError::InputListRead {
        path: list.to_path_buf(),
        source: e,
    })?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect())
}

fn collect_from_directory(dir: &Path, paths: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("failed to read directory: {}", dir.display()))?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            collect_from_directory(&path, paths)?;
        } else if is_supported_image(&path) {
            paths.push(path);
        }
    }

    Ok(())
}

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
