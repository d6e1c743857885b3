use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::SheetError;

/// Identifier for an image path as it appears in the map.
///
/// Absolute paths keep only the file stem. Relative paths keep their
/// directories, lose the extension, and always use `/` as separator.
/// Case is kept as written; only collision checks compare case-insensitively.
pub fn packed_name(path: &Path) -> String {
    if path.is_absolute() || path.has_root() {
        return path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
    }

    let without_ext = match path.extension() {
        Some(_) => path.with_extension(""),
        None => path.to_path_buf(),
    };

    without_ext.to_string_lossy().replace('\\', "/")
}

/// Fail if two paths map to the same identifier (compared case-insensitively)
pub fn check_name_collisions(paths: &[PathBuf]) -> Result<(), SheetError> {
    let mut used: HashMap<String, &PathBuf> = HashMap::with_capacity(paths.len());

    for path in paths {
        let name = packed_name(path);
        if let Some(first) = used.insert(name.to_lowercase(), path) {
            return Err(SheetError::NameCollision {
                name,
                first: first.clone(),
                second: path.clone(),
            });
        }
    }

    Ok(())
}
