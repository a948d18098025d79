//! core::atomic
//!
//! Crash-safe file replacement shared by every on-disk store.
//!
//! Contents are written to a sibling temp file, synced, then renamed over
//! the target, so readers see either the old file or the new one.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Atomically replace `path` with `contents`.
///
/// Creates parent directories as needed. When `mode` is given (unix only),
/// permissions are applied to the temp file before any bytes are written.
pub fn write_atomic(path: &Path, contents: &[u8], mode: Option<u32>) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut temp_name = path.as_os_str().to_os_string();
    temp_name.push(".tmp");
    let temp_path = Path::new(&temp_name);

    {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(temp_path)?;

        #[cfg(unix)]
        if let Some(mode) = mode {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(mode))?;
        }
        #[cfg(not(unix))]
        let _ = mode;

        file.write_all(contents)?;
        file.sync_all()?;
    }

    if let Err(e) = fs::rename(temp_path, path) {
        let _ = fs::remove_file(temp_path);
        return Err(e);
    }
    Ok(())
}
