//! Bundle creation

use std::fs::File;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use ignore::WalkBuilder;
use tracing::{debug, warn};

use crate::error::{SolidError, SolidResult};

/// Bundle file written at the project root while deploying
pub const BUNDLE_FILE_NAME: &str = ".solidactions-deploy.tar.gz";

/// Gitignore-style patterns excluded at any depth
pub const EXCLUDED_PATTERNS: [&str; 5] = [
    "node_modules/",
    ".git/",
    "dist/",
    "vendor/",
    BUNDLE_FILE_NAME,
];

/// A finished bundle on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    pub path: PathBuf,
    /// Compressed size in bytes
    pub bytes: u64,
    pub file_count: usize,
}

/// Removes the bundle file when dropped, on success and failure alike.
#[derive(Debug)]
pub struct BundleGuard {
    path: PathBuf,
}

impl BundleGuard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for BundleGuard {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "removed bundle"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e, "failed to remove bundle"),
        }
    }
}

fn exclusion_matcher(root: &Path) -> SolidResult<Gitignore> {
    let mut builder = GitignoreBuilder::new(root);
    for pattern in EXCLUDED_PATTERNS {
        builder
            .add_line(None, pattern)
            .map_err(|e| SolidError::InvalidInput(e.to_string()))?;
    }
    builder
        .build()
        .map_err(|e| SolidError::InvalidInput(e.to_string()))
}

/// Write `source_dir` into a bundle at `dest` with maximum compression.
///
/// A failed write leaves whatever was written in place; callers hold a
/// [`BundleGuard`] for cleanup.
pub fn create_bundle(source_dir: &Path, dest: &Path) -> SolidResult<Bundle> {
    let matcher = exclusion_matcher(source_dir)?;
    let file = File::create(dest)?;
    let encoder = GzEncoder::new(file, Compression::best());
    let mut tar = tar::Builder::new(encoder);
    tar.follow_symlinks(false);

    let root = source_dir.to_path_buf();
    let walker = WalkBuilder::new(source_dir)
        .standard_filters(false)
        .hidden(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| {
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            let relative = entry.path().strip_prefix(&root).unwrap_or(entry.path());
            relative.as_os_str().is_empty()
                || !matcher
                    .matched_path_or_any_parents(relative, is_dir)
                    .is_ignore()
        })
        .build();

    let mut file_count = 0;
    for entry in walker {
        let entry = entry.map_err(|e| SolidError::Io(std::io::Error::other(e.to_string())))?;
        let Some(file_type) = entry.file_type() else {
            continue;
        };
        if !(file_type.is_file() || file_type.is_symlink()) {
            continue;
        }
        let path = entry.path();
        if path == dest {
            continue;
        }
        let relative = path
            .strip_prefix(source_dir)
            .map_err(|e| SolidError::Io(std::io::Error::other(e.to_string())))?;
        tar.append_path_with_name(path, relative)?;
        file_count += 1;
    }

    let encoder = tar.into_inner()?;
    let file = encoder.finish()?;
    file.sync_all()?;
    let bytes = file.metadata()?.len();
    debug!(files = file_count, bytes, "bundle written");

    Ok(Bundle {
        path: dest.to_path_buf(),
        bytes,
        file_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::fs;
    use tempfile::tempdir;

    fn entries(bundle: &Path) -> Vec<String> {
        let file = File::open(bundle).unwrap();
        let mut archive = tar::Archive::new(GzDecoder::new(file));
        let mut names: Vec<String> = archive
            .entries()
            .unwrap()
            .map(|e| e.unwrap().path().unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        names.sort();
        names
    }

    #[test]
    fn excludes_dependency_vcs_and_build_dirs_at_any_depth() {
        let src = tempdir().unwrap();
        let root = src.path();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::create_dir_all(root.join("packages/a/node_modules/x")).unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::create_dir_all(root.join("dist")).unwrap();
        fs::create_dir_all(root.join("lib/vendor")).unwrap();
        fs::write(root.join("solidactions.yaml"), "workflows: []\n").unwrap();
        fs::write(root.join(".env"), "A=1\n").unwrap();
        fs::write(root.join("src/main.ts"), "export {}\n").unwrap();
        fs::write(root.join("src/dist.ts"), "export {}\n").unwrap();
        fs::write(root.join("node_modules/pkg/index.js"), "").unwrap();
        fs::write(root.join("packages/a/node_modules/x/i.js"), "").unwrap();
        fs::write(root.join("packages/a/index.js"), "").unwrap();
        fs::write(root.join(".git/HEAD"), "ref").unwrap();
        fs::write(root.join("dist/out.js"), "").unwrap();
        fs::write(root.join("lib/vendor/v.js"), "").unwrap();

        let dest = root.join(BUNDLE_FILE_NAME);
        let bundle = create_bundle(root, &dest).unwrap();

        assert_eq!(
            entries(&dest),
            vec![
                ".env",
                "packages/a/index.js",
                "solidactions.yaml",
                "src/dist.ts",
                "src/main.ts"
            ]
        );
        assert_eq!(bundle.file_count, 5);
        assert!(bundle.bytes > 0);
    }

    #[test]
    fn previous_bundle_is_not_included() {
        let src = tempdir().unwrap();
        let root = src.path();
        fs::write(root.join("a.txt"), "a").unwrap();
        let dest = root.join(BUNDLE_FILE_NAME);
        create_bundle(root, &dest).unwrap();
        create_bundle(root, &dest).unwrap();
        assert_eq!(entries(&dest), vec!["a.txt"]);
    }

    #[test]
    fn guard_removes_bundle_on_drop() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(BUNDLE_FILE_NAME);
        fs::write(&path, "partial").unwrap();
        {
            let _guard = BundleGuard::new(&path);
        }
        assert!(!path.exists());
    }

    #[test]
    fn guard_tolerates_missing_file() {
        let dir = tempdir().unwrap();
        drop(BundleGuard::new(dir.path().join("never-written")));
    }
}
