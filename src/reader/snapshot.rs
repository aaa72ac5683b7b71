//! Single-pass snapshot parsing over a sniffed dialect.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{Result, TrendexError};

use super::sniff::{self, SnapshotDialect};
use super::split_fields;

/// Read one weekly snapshot into `term -> best (lowest) rank observed`.
///
/// Terms are normalized lowercase and trimmed. Rows with a missing or empty
/// rank or term cell, or a rank that does not parse as a positive integer
/// after stripping thousands separators, are skipped; nothing row-level is
/// an error. The only hard failures are unreadable bytes and an
/// unlocatable header.
pub fn read_snapshot(path: &Path) -> Result<HashMap<String, u32>> {
    let bytes = fs_err::read(path).map_err(|source| TrendexError::Snapshot {
        path: path.to_path_buf(),
        source,
    })?;
    let (text, encoding) = sniff::decode_bytes(&bytes);
    let dialect = sniff::sniff(path, &text, encoding)?;
    let ranks = parse_rows(&text, &dialect);
    tracing::debug!(
        snapshot.path = %path.display(),
        snapshot.terms = ranks.len(),
        snapshot.encoding = ?dialect.encoding,
        snapshot.header_row = dialect.header_row,
        "parsed weekly snapshot"
    );
    Ok(ranks)
}

pub(crate) fn parse_rows(text: &str, dialect: &SnapshotDialect) -> HashMap<String, u32> {
    let mut ranks: HashMap<String, u32> = HashMap::new();

    for line in text.lines().skip(dialect.header_row + 1) {
        let cells = split_fields(line, dialect.delimiter);
        let Some(rank_raw) = cells.get(dialect.rank_col).map(|cell| cell.trim()) else {
            continue;
        };
        let Some(term_raw) = cells.get(dialect.term_col).map(|cell| cell.trim()) else {
            continue;
        };
        if rank_raw.is_empty() || term_raw.is_empty() {
            continue;
        }

        let Ok(rank) = rank_raw.replace(',', "").parse::<u32>() else {
            continue;
        };
        if rank == 0 {
            continue;
        }

        let term = term_raw.to_lowercase();
        // Exports repeat the header before each reporting block.
        if term.starts_with("search term") {
            continue;
        }

        ranks
            .entry(term)
            .and_modify(|best| *best = (*best).min(rank))
            .or_insert(rank);
    }

    ranks
}
