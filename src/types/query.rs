//! Query request and response records consumed by the serving layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::index::WeekId;
use crate::constants::DEFAULT_UPTREND_LIMIT;

/// Parameters shaping an uptrend scan over a week range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UptrendQuery {
    pub start_week: WeekId,
    pub end_week: WeekId,
    /// Comma- and/or whitespace-separated phrases; a term must whole-word
    /// match at least one when any are given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,
    /// Phrases that disqualify a term on any whole-word match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,
    /// Records skipped after sorting, for paging.
    #[serde(default)]
    pub offset: usize,
    /// Cap applied after sorting and `offset`.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_UPTREND_LIMIT
}

impl UptrendQuery {
    /// Unfiltered, unpaged query over `[start_week, end_week]`.
    #[must_use]
    pub fn range(start_week: WeekId, end_week: WeekId) -> Self {
        Self {
            start_week,
            end_week,
            include: None,
            exclude: None,
            offset: 0,
            limit: DEFAULT_UPTREND_LIMIT,
        }
    }
}

/// A term whose rank strictly improved at every week step of the range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UptrendRecord {
    pub term: String,
    /// Rank in the first week of the range.
    pub start_rank: u32,
    /// Rank in the last week of the range.
    pub end_rank: u32,
    /// `start_rank - end_rank`; always positive under strict detection.
    pub total_improvement: u32,
    /// Number of weeks in the inclusive range.
    pub weeks: u32,
}

/// One point of a term's rank time series. `rank` stays `None` for weeks
/// the term was not observed so charts can render the gap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub week_id: WeekId,
    pub week_label: String,
    pub rank: Option<u32>,
}

/// One row of the week listing surfaced to range pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSummary {
    pub week_id: WeekId,
    pub label: String,
    pub date: NaiveDate,
}
