//! Atomic file replacement shared by the config and token stores.

use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Who may read a file written by [`write_atomically`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FileAccess {
    /// Default permissions of the process umask.
    Shared,
    /// Owner read/write only (`0600` on unix).
    OwnerOnly,
}

/// Replaces `path` with `contents` via a temp file in the same directory,
/// creating missing parent directories first.
///
/// Readers see either the old file or the new one, never a partial write.
pub(crate) fn write_atomically(path: &Path, contents: &[u8], access: FileAccess) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut temp_file = NamedTempFile::new_in(parent)?;
    if access == FileAccess::OwnerOnly {
        restrict_to_owner(temp_file.as_file())?;
    }
    temp_file.write_all(contents)?;
    temp_file.as_file().sync_all()?;
    temp_file.persist(path).map_err(|e| e.error)?;

    Ok(())
}

#[cfg(unix)]
fn restrict_to_owner(file: &std::fs::File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_to_owner(_file: &std::fs::File) -> io::Result<()> {
    Ok(())
}
