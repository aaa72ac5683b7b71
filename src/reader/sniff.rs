//! Dialect sniffing for weekly snapshot files.
//!
//! Settles how a file should be read before any data row is touched:
//! encoding (8-bit default with a 16-bit fallback), field delimiter, header
//! row position, and which columns carry rank and term. Header detection
//! cascades from an exact token match to a relaxed rank/term fallback;
//! exhausting both is the one hard per-file failure.

use std::path::Path;

use crate::constants::{
    HEADER_FALLBACK_LINES, HEADER_SCAN_LINES, RANK_HEADER_TOKEN, TERM_HEADER_TOKEN,
};
use crate::error::{Result, TrendexError};

use super::split_fields;

/// Candidate field delimiters, in priority order.
const CANDIDATES: &[u8] = b",\t";

/// Text encoding detected for a snapshot file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// 8-bit default; an optional UTF-8 BOM is tolerated.
    Utf8,
    /// 16-bit fallback, entered when UTF-8 decoding fails. Endianness comes
    /// from the BOM, little-endian without one.
    Utf16,
}

/// How one snapshot file should be decoded and which columns carry data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotDialect {
    pub encoding: TextEncoding,
    pub delimiter: u8,
    /// 0-based line index of the header row; data starts on the next line.
    pub header_row: usize,
    pub rank_col: usize,
    pub term_col: usize,
}

/// Decode raw snapshot bytes: UTF-8 first, UTF-16 on decode failure.
///
/// BOM-less UTF-16 text is byte-for-byte valid UTF-8 (every other byte is
/// NUL), so a nominally successful decode containing NULs also counts as a
/// failed attempt.
pub(crate) fn decode_bytes(bytes: &[u8]) -> (String, TextEncoding) {
    let without_bom = bytes.strip_prefix(b"\xef\xbb\xbf").unwrap_or(bytes);
    if let Ok(text) = std::str::from_utf8(without_bom) {
        if !text.contains('\0') {
            return (text.to_owned(), TextEncoding::Utf8);
        }
    }
    (decode_utf16(bytes), TextEncoding::Utf16)
}

fn decode_utf16(bytes: &[u8]) -> String {
    let (big_endian, body) = match bytes {
        [0xfe, 0xff, rest @ ..] => (true, rest),
        [0xff, 0xfe, rest @ ..] => (false, rest),
        _ => (false, bytes),
    };
    let units = body.chunks_exact(2).map(|pair| {
        if big_endian {
            u16::from_be_bytes([pair[0], pair[1]])
        } else {
            u16::from_le_bytes([pair[0], pair[1]])
        }
    });
    // Lossy on unpaired surrogates: a mangled character is a row-level
    // problem, not a file-level one.
    char::decode_utf16(units)
        .map(|unit| unit.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Locate the header row and column bindings in decoded snapshot text.
///
/// Strategy 1 scans the first [`HEADER_SCAN_LINES`] lines for a row whose
/// cells contain both recognized column tokens, trying each candidate
/// delimiter; the delimiter that reveals the tokens is the file's delimiter.
/// Strategy 2 relaxes to the first row near the top whose first two
/// populated cells look like a rank/term header. Exhausting both fails with
/// [`TrendexError::HeaderNotFound`].
pub fn sniff(path: &Path, text: &str, encoding: TextEncoding) -> Result<SnapshotDialect> {
    let lines: Vec<&str> = text.lines().take(HEADER_SCAN_LINES).collect();

    for (row, line) in lines.iter().enumerate() {
        for &delimiter in CANDIDATES {
            let cells: Vec<String> = split_fields(line, delimiter)
                .iter()
                .map(|cell| cell.trim().to_lowercase())
                .collect();
            let rank_col = cells.iter().position(|cell| cell == RANK_HEADER_TOKEN);
            let term_col = cells.iter().position(|cell| cell == TERM_HEADER_TOKEN);
            if let (Some(rank_col), Some(term_col)) = (rank_col, term_col) {
                return Ok(SnapshotDialect {
                    encoding,
                    delimiter,
                    header_row: row,
                    rank_col,
                    term_col,
                });
            }
        }
    }

    for (row, line) in lines.iter().take(HEADER_FALLBACK_LINES).enumerate() {
        let delimiter = detect_delimiter(line);
        let cells = split_fields(line, delimiter);
        let populated: Vec<(usize, String)> = cells
            .iter()
            .enumerate()
            .map(|(col, cell)| (col, cell.trim().to_lowercase()))
            .filter(|(_, cell)| !cell.is_empty())
            .collect();
        if let [(rank_col, first), (term_col, second), ..] = populated.as_slice() {
            if first.contains("rank") && second.contains("term") {
                return Ok(SnapshotDialect {
                    encoding,
                    delimiter,
                    header_row: row,
                    rank_col: *rank_col,
                    term_col: *term_col,
                });
            }
        }
    }

    Err(TrendexError::HeaderNotFound {
        path: path.to_path_buf(),
    })
}

/// Most frequent candidate delimiter on a line; comma when neither appears.
fn detect_delimiter(line: &str) -> u8 {
    let mut best = b',';
    let mut best_count = 0usize;
    for &delim in CANDIDATES {
        let count = line.bytes().filter(|&b| b == delim).count();
        if count > best_count {
            best_count = count;
            best = delim;
        }
    }
    best
}
