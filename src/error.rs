//! Crate error taxonomy.
//!
//! Per-file and build-level failures are hard errors; row-level malformed
//! data is recovered locally in the reader and never surfaces here. Cache
//! deserialize failures are internal to [`crate::cache`] and degrade to a
//! rebuild instead of appearing in this enum.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TrendexError>;

#[derive(Debug, Error)]
pub enum TrendexError {
    /// Neither header-search strategy located a rank/term header row. Fatal
    /// to the whole build: silently dropping the week would break the
    /// contiguous-coverage invariant uptrend detection relies on.
    #[error("no recognizable header row in {}", path.display())]
    HeaderNotFound { path: PathBuf },

    /// A single week cannot express a trend.
    #[error("need at least 2 weekly snapshots to build an index, found {found}")]
    InsufficientData { found: usize },

    /// A snapshot file could not be read off disk.
    #[error("failed to read snapshot {}: {source}", path.display())]
    Snapshot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory listing or cache store I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
