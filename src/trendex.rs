//! Primary handle owning the current trend index.
//!
//! The serving layer holds one `Trendex` for the lifetime of the process.
//! Queries fetch an `Arc` snapshot of the current index and run entirely
//! against it; `rebuild` constructs a brand-new index and swaps the slot
//! under a short write lock, so readers never observe a partially built
//! index and in-flight queries finish against the snapshot they started
//! with.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::cache::{self, CacheOutcome};
use crate::error::Result;
use crate::query;
use crate::types::{SeriesPoint, TrendIndex, UptrendQuery, UptrendRecord, WeekId, WeekSummary};

/// Outcome summary of an explicit reindex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebuildReport {
    pub week_count: usize,
    pub term_count: usize,
    pub outcome: CacheOutcome,
    pub signature: String,
}

/// Owning handle for the current [`TrendIndex`].
#[derive(Debug)]
pub struct Trendex {
    source_dir: PathBuf,
    cache_dir: PathBuf,
    current: RwLock<Arc<TrendIndex>>,
}

impl Trendex {
    /// Resolve an index for `source_dir` (cache hit or full build) and wrap
    /// it in a serving handle.
    pub fn open(source_dir: impl Into<PathBuf>, cache_dir: impl Into<PathBuf>) -> Result<Self> {
        let source_dir = source_dir.into();
        let cache_dir = cache_dir.into();
        let lookup = cache::get_or_build(&source_dir, &cache_dir)?;
        Ok(Self {
            source_dir,
            cache_dir,
            current: RwLock::new(Arc::new(lookup.index)),
        })
    }

    /// A consistent snapshot of the current index. The snapshot stays valid
    /// for as long as the caller holds it, across any number of rebuilds.
    #[must_use]
    pub fn snapshot(&self) -> Arc<TrendIndex> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Rebuild from the source directory and atomically replace the current
    /// index. Unchanged inputs resolve from the cache, so an explicit
    /// rebuild after no file changes is cheap.
    pub fn rebuild(&self) -> Result<RebuildReport> {
        let lookup = cache::get_or_build(&self.source_dir, &self.cache_dir)?;
        let report = RebuildReport {
            week_count: lookup.index.week_count(),
            term_count: lookup.index.term_count(),
            outcome: lookup.outcome,
            signature: lookup.signature,
        };

        let next = Arc::new(lookup.index);
        match self.current.write() {
            Ok(mut guard) => *guard = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }

        tracing::info!(
            index.weeks = report.week_count,
            index.terms = report.term_count,
            cache.outcome = ?report.outcome,
            "trend index replaced"
        );
        Ok(report)
    }

    /// Week listing for range pickers.
    #[must_use]
    pub fn list_weeks(&self) -> Vec<WeekSummary> {
        self.snapshot().list_weeks()
    }

    /// Strict uptrends over a week range. See [`crate::query::uptrends`].
    #[must_use]
    pub fn uptrends(&self, query: &UptrendQuery) -> Vec<UptrendRecord> {
        query::uptrends(&self.snapshot(), query)
    }

    /// Rank time series for one term. See [`crate::query::series`].
    #[must_use]
    pub fn series(&self, term: &str, start_week: WeekId, end_week: WeekId) -> Vec<SeriesPoint> {
        query::series(&self.snapshot(), term, start_week, end_week)
    }

    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    #[must_use]
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }
}
