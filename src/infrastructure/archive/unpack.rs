//! Bundle extraction for `pull`

use std::fs::File;
use std::path::Path;

use flate2::read::GzDecoder;
use tracing::debug;

use crate::error::SolidResult;

/// Extract a gzip tarball into `dest`, creating it when missing.
pub fn unpack_bundle(bundle: &Path, dest: &Path) -> SolidResult<()> {
    std::fs::create_dir_all(dest)?;
    let file = File::open(bundle)?;
    let mut archive = tar::Archive::new(GzDecoder::new(file));
    archive.set_preserve_mtime(true);
    archive.unpack(dest)?;
    debug!(dest = %dest.display(), "bundle unpacked");
    Ok(())
}
