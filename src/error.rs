//! Error types for the scan pipeline.
//!
//! Almost everything in this crate degrades to "absent" rather than failing:
//! missing manifests, unreadable entries, and malformed files are normal
//! inputs. The only fatal condition a caller can hit is a scan root that
//! cannot be listed at all.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scan root does not exist: {0}")]
    RootNotFound(PathBuf),

    #[error("scan root is not a directory: {0}")]
    RootNotDirectory(PathBuf),

    #[error("failed to list scan root {path}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}
