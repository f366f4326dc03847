use std::fs;
use std::io;
use std::path::Path;

use crate::error::Result;
use crate::settings::SETTINGS_FILE;

pub const LOCAL_STORAGE_DIR: &str = "Local Storage";

/// Deletes everything under `user_data_dir` except the settings file and the
/// local storage directory, which holds the player's save data. Returns the number of
/// top-level entries removed. The first filesystem error aborts the clear.
pub fn clear_user_data(user_data_dir: &Path) -> Result<usize> {
    let protected = [
        user_data_dir.join(SETTINGS_FILE),
        user_data_dir.join(LOCAL_STORAGE_DIR),
    ];

    let entries = match fs::read_dir(user_data_dir) {
        Ok(entries) => entries.collect::<io::Result<Vec<_>>>()?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e.into()),
    };

    let mut removed = 0;
    for entry in entries {
        let path = entry.path();
        if protected.contains(&path) {
            continue;
        }

        // file_type() does not follow symlinks: a linked directory is unlinked, not emptied
        if entry.file_type()?.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
        tracing::debug!("Cleared {}", path.display());
        removed += 1;
    }

    tracing::info!(
        "Cleared {} cached entries from {}",
        removed,
        user_data_dir.display()
    );
    Ok(removed)
}
