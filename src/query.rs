//! Read queries over a built index: strict uptrends and per-term series.

use std::collections::BTreeMap;

use crate::filter::{TermFilter, sanitize_term};
use crate::types::{SeriesPoint, TrendIndex, UptrendQuery, UptrendRecord, WeekId};

/// Terms whose rank strictly improves at every consecutive week step of the
/// requested range, ordered by total improvement descending with ties
/// broken by the better (lower) final rank, then by term.
///
/// The range is normalized (swapped if reversed); a span of fewer than two
/// weeks yields no results. The full candidate set is sorted before
/// `offset` and `limit` are applied, so paging is deterministic.
#[must_use]
pub fn uptrends(index: &TrendIndex, query: &UptrendQuery) -> Vec<UptrendRecord> {
    let (start, end) = ordered_range(query.start_week, query.end_week);
    let span = end - start + 1;
    if span < 2 {
        return Vec::new();
    }

    let filter = TermFilter::parse(query.include.as_deref(), query.exclude.as_deref());

    let mut results: Vec<UptrendRecord> = index
        .terms()
        .filter(|(term, _)| sanitize_term(term) && filter.passes(term))
        .filter_map(|(term, ranks)| {
            strict_uptrend(ranks, start, end).map(|(start_rank, end_rank)| UptrendRecord {
                term: term.to_owned(),
                start_rank,
                end_rank,
                total_improvement: start_rank - end_rank,
                weeks: span,
            })
        })
        .collect();

    results.sort_by(|a, b| {
        b.total_improvement
            .cmp(&a.total_improvement)
            .then(a.end_rank.cmp(&b.end_rank))
            .then_with(|| a.term.cmp(&b.term))
    });

    results
        .into_iter()
        .skip(query.offset)
        .take(query.limit)
        .collect()
}

/// Strict detection over `[start, end]`: a recorded rank in every week and
/// a strictly lower rank at every consecutive step. Any coverage gap,
/// plateau, or regression disqualifies. Returns `(start_rank, end_rank)`.
fn strict_uptrend(
    ranks: &BTreeMap<WeekId, u32>,
    start: WeekId,
    end: WeekId,
) -> Option<(u32, u32)> {
    let mut start_rank = 0u32;
    let mut last_rank: Option<u32> = None;

    for week in start..=end {
        let rank = *ranks.get(&week)?;
        match last_rank {
            None => start_rank = rank,
            Some(prev) if prev > rank => {}
            Some(_) => return None,
        }
        last_rank = Some(rank);
    }

    last_rank.map(|end_rank| (start_rank, end_rank))
}

/// Dense rank time series for one term over `[start, end]`, one point per
/// week in ascending order. Weeks the term was not observed carry
/// `rank: None`; gaps are part of the answer, not skipped rows.
#[must_use]
pub fn series(
    index: &TrendIndex,
    term: &str,
    start_week: WeekId,
    end_week: WeekId,
) -> Vec<SeriesPoint> {
    let (start, end) = ordered_range(start_week, end_week);
    let term = term.trim().to_lowercase();
    let ranks = index.ranks(&term);

    (start..=end)
        .map(|week_id| SeriesPoint {
            week_id,
            week_label: index.week_label(week_id),
            rank: ranks.and_then(|map| map.get(&week_id).copied()),
        })
        .collect()
}

fn ordered_range(a: WeekId, b: WeekId) -> (WeekId, WeekId) {
    if a <= b { (a, b) } else { (b, a) }
}
