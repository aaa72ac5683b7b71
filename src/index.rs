//! Index construction from an ordered snapshot file list.

use std::collections::{BTreeMap, HashMap};

use crate::error::{Result, TrendexError};
use crate::reader;
use crate::types::{SnapshotFile, TrendIndex, WeekEntry, WeekId};

/// Build a [`TrendIndex`] from located snapshot files.
///
/// Week ids are assigned `1..=N` by position in the ordered input. A parser
/// failure on any file aborts the whole build and propagates with the
/// offending file attached; a partial index would silently break the
/// contiguous-week coverage that uptrend detection relies on.
pub fn build_index(files: &[SnapshotFile]) -> Result<TrendIndex> {
    if files.len() < 2 {
        return Err(TrendexError::InsufficientData {
            found: files.len(),
        });
    }

    let mut weeks = Vec::with_capacity(files.len());
    let mut term_ranks: HashMap<String, BTreeMap<WeekId, u32>> = HashMap::new();

    for (pos, file) in files.iter().enumerate() {
        let week_id = pos as WeekId + 1;
        weeks.push(WeekEntry {
            week_id,
            capture_date: file.capture_date,
        });

        let parsed = reader::read_snapshot(&file.path)?;
        for (term, rank) in parsed {
            term_ranks.entry(term).or_default().insert(week_id, rank);
        }
    }

    let index = TrendIndex::new(weeks, term_ranks);
    tracing::info!(
        index.weeks = index.week_count(),
        index.terms = index.term_count(),
        "built trend index"
    );
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn snapshot(dir: &TempDir, name: &str, day: u32, rows: &str) -> SnapshotFile {
        let path = dir.path().join(name);
        fs::write(&path, format!("Search Frequency Rank,Search Term\n{rows}")).unwrap();
        SnapshotFile {
            capture_date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            path,
        }
    }

    #[test]
    fn assigns_positional_week_ids() {
        let dir = TempDir::new().unwrap();
        let files = vec![
            snapshot(&dir, "terms_2024_01_07.csv", 7, "10,widget\n"),
            snapshot(&dir, "terms_2024_01_14.csv", 14, "5,widget\n"),
            snapshot(&dir, "terms_2024_01_21.csv", 21, "2,widget\n"),
        ];

        let index = build_index(&files).unwrap();
        assert_eq!(index.week_count(), 3);
        let ids: Vec<_> = index.weeks().iter().map(|w| w.week_id).collect();
        assert_eq!(ids, vec![1, 2, 3], "gapless ascending week ids");
        assert_eq!(
            index.capture_date(1),
            NaiveDate::from_ymd_opt(2024, 1, 7)
        );
        let ranks = index.ranks("widget").unwrap();
        assert_eq!(ranks[&1], 10);
        assert_eq!(ranks[&3], 2);
    }

    #[test]
    fn fewer_than_two_weeks_fails() {
        let dir = TempDir::new().unwrap();
        let files = vec![snapshot(&dir, "terms_2024_01_07.csv", 7, "1,widget\n")];
        let err = build_index(&files).unwrap_err();
        assert!(matches!(err, TrendexError::InsufficientData { found: 1 }));
        assert!(matches!(
            build_index(&[]).unwrap_err(),
            TrendexError::InsufficientData { found: 0 }
        ));
    }

    #[test]
    fn unparseable_week_aborts_build() {
        let dir = TempDir::new().unwrap();
        let good = snapshot(&dir, "terms_2024_01_07.csv", 7, "1,widget\n");
        let bad_path = dir.path().join("terms_2024_01_14.csv");
        fs::write(&bad_path, "completely,unrecognizable\ncontent,here\n").unwrap();
        let bad = SnapshotFile {
            capture_date: NaiveDate::from_ymd_opt(2024, 1, 14).unwrap(),
            path: bad_path.clone(),
        };

        let err = build_index(&[good, bad]).unwrap_err();
        match err {
            TrendexError::HeaderNotFound { path } => assert_eq!(path, bad_path),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
