#![deny(clippy::all, clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![allow(clippy::module_name_repetitions)]
//
// Strategic lint exceptions - these are allowed project-wide for pragmatic reasons:
//
// Documentation lints: Many internal/self-documenting functions don't need extensive docs.
// Public APIs should still have proper documentation.
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
//
// Cast safety: The only casts in this codebase go between week counts and
// week ids, both bounded by the number of snapshot files on disk.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
//
// Low-value pedantic lints that add noise:
#![allow(clippy::implicit_hasher)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// The trendex-core crate version (matches `Cargo.toml`).
pub const TRENDEX_CORE_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cache;
pub mod constants;
pub mod error;
pub mod filter;
pub mod index;
pub mod locate;
pub mod query;
pub mod reader;
mod trendex;
pub mod types;

pub use cache::{CacheLookup, CacheOutcome, get_or_build, source_signature};
pub use constants::*;
pub use error::{Result, TrendexError};
pub use filter::{TermFilter, sanitize_term};
pub use index::build_index;
pub use locate::snapshot_files;
pub use query::{series, uptrends};
pub use reader::{SnapshotDialect, TextEncoding, read_snapshot};
pub use trendex::{RebuildReport, Trendex};
pub use types::{
    SeriesPoint, SnapshotFile, TrendIndex, UptrendQuery, UptrendRecord, WeekEntry, WeekId,
    WeekSummary,
};
