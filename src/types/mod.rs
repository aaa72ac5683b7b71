//! Public types exposed by the `trendex-core` crate.

pub mod index;
pub mod query;

pub use index::{SnapshotFile, TrendIndex, WeekEntry, WeekId};
pub use query::{SeriesPoint, UptrendQuery, UptrendRecord, WeekSummary};
