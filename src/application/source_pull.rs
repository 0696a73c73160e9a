//! `pull` - download a project's deployed source and unpack it locally

use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::ports::PlatformApi;
use crate::error::SolidResult;
use crate::infrastructure::archive::{unpack_bundle, BundleGuard};

/// Temporary download written inside the destination
pub const PULL_TEMP_FILE: &str = ".solidactions-pull.tar.gz";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullResult {
    pub destination: PathBuf,
    pub bytes: usize,
}

/// Fetch the source of `slug` into `destination`, overwriting existing files.
/// The temporary download is removed whether unpacking succeeds or not.
pub fn pull_source<A>(api: &A, slug: &str, destination: &Path) -> SolidResult<PullResult>
where
    A: PlatformApi + ?Sized,
{
    let bytes = api
        .download_source(slug)
        .map_err(|e| e.or_not_found(format!("Project \"{}\"", slug), None))?;

    std::fs::create_dir_all(destination)?;
    let guard = BundleGuard::new(destination.join(PULL_TEMP_FILE));
    std::fs::write(guard.path(), &bytes)?;
    unpack_bundle(guard.path(), destination)?;
    info!(slug, bytes = bytes.len(), "source pulled");

    Ok(PullResult {
        destination: destination.to_path_buf(),
        bytes: bytes.len(),
    })
}
