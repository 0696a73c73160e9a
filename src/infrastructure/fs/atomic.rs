//! Atomic file replacement
//!
//! Content goes to a temporary file in the destination directory which is
//! then renamed over the target, so readers never see a truncated file.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::SolidResult;

/// Replace `path` with `content`, creating parent directories as needed.
pub fn write_atomic(path: &Path, content: &[u8]) -> SolidResult<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(content)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(unix)]
pub fn set_mode(path: &Path, mode: u32) -> SolidResult<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))?;
    Ok(())
}

#[cfg(not(unix))]
pub fn set_mode(_path: &Path, _mode: u32) -> SolidResult<()> {
    Ok(())
}
