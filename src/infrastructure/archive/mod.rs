//! Source bundle archiving
//!
//! Bundles are gzip-compressed tarballs. `bundle` writes one from a project
//! tree, `unpack` restores a downloaded one.

mod bundle;
mod unpack;

pub use bundle::{create_bundle, Bundle, BundleGuard, BUNDLE_FILE_NAME, EXCLUDED_PATTERNS};
pub use unpack::unpack_bundle;
