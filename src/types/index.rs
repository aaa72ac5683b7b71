//! Index data model: an ordered week axis plus per-term rank history.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::query::WeekSummary;

/// 1-based positional week identifier, assigned in ascending capture-date
/// order at build time. Positional, not calendar-derived: adding an older
/// file and rebuilding shifts the ids of every later week, so a `WeekId` is
/// only meaningful against the [`TrendIndex`] it came from.
pub type WeekId = u32;

/// A candidate weekly input file discovered by the locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotFile {
    /// Capture date embedded in the file name.
    pub capture_date: NaiveDate,
    pub path: PathBuf,
}

/// One entry on the index week axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekEntry {
    pub week_id: WeekId,
    pub capture_date: NaiveDate,
}

/// Immutable index over a complete set of weekly snapshots.
///
/// Built once per build or rebuild, then shared read-only; a reindex swaps
/// in a brand-new value rather than mutating in place, so readers never
/// observe a half-built index. Within one file a repeated term keeps its
/// best (lowest) rank; a term absent from a week simply has no entry for
/// that week id, which is distinct from any numeric rank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendIndex {
    weeks: Vec<WeekEntry>,
    term_ranks: HashMap<String, BTreeMap<WeekId, u32>>,
}

impl TrendIndex {
    pub(crate) fn new(
        weeks: Vec<WeekEntry>,
        term_ranks: HashMap<String, BTreeMap<WeekId, u32>>,
    ) -> Self {
        Self { weeks, term_ranks }
    }

    /// Ordered week axis, oldest first. `weeks()[i].week_id == i + 1`.
    #[must_use]
    pub fn weeks(&self) -> &[WeekEntry] {
        &self.weeks
    }

    #[must_use]
    pub fn week_count(&self) -> usize {
        self.weeks.len()
    }

    #[must_use]
    pub fn term_count(&self) -> usize {
        self.term_ranks.len()
    }

    /// Highest valid week id, i.e. the most recent week.
    #[must_use]
    pub fn last_week(&self) -> WeekId {
        self.weeks.len() as WeekId
    }

    /// Capture date for a week id, `None` when the id is outside the axis.
    #[must_use]
    pub fn capture_date(&self, week_id: WeekId) -> Option<NaiveDate> {
        let pos = week_id.checked_sub(1)? as usize;
        self.weeks.get(pos).map(|week| week.capture_date)
    }

    /// Display label for a week. Ids outside the axis still render a label
    /// so series over a stale range stay presentable.
    #[must_use]
    pub fn week_label(&self, week_id: WeekId) -> String {
        match self.capture_date(week_id) {
            Some(date) => format!("Week {week_id} ({date})"),
            None => format!("Week {week_id}"),
        }
    }

    /// Rank history for a normalized (lowercase, trimmed) term.
    #[must_use]
    pub fn ranks(&self, term: &str) -> Option<&BTreeMap<WeekId, u32>> {
        self.term_ranks.get(term)
    }

    /// Iterate every indexed term with its rank history. Iteration order is
    /// unspecified; queries that need determinism sort their results.
    pub fn terms(&self) -> impl Iterator<Item = (&str, &BTreeMap<WeekId, u32>)> {
        self.term_ranks
            .iter()
            .map(|(term, ranks)| (term.as_str(), ranks))
    }

    /// Week listing for range pickers in the serving layer.
    #[must_use]
    pub fn list_weeks(&self) -> Vec<WeekSummary> {
        self.weeks
            .iter()
            .map(|week| WeekSummary {
                week_id: week.week_id,
                label: self.week_label(week.week_id),
                date: week.capture_date,
            })
            .collect()
    }
}
