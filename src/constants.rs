//! Central tunables for locating headers, capping results, and naming cache
//! blobs. Everything here is deliberate configuration surface, not magic.

/// Number of leading lines scanned when locating a header row.
pub const HEADER_SCAN_LINES: usize = 200;

/// Line budget for the relaxed rank/term fallback header search.
pub const HEADER_FALLBACK_LINES: usize = 15;

/// Recognized header cell naming the rank column.
pub const RANK_HEADER_TOKEN: &str = "search frequency rank";

/// Recognized header cell naming the term column.
pub const TERM_HEADER_TOKEN: &str = "search term";

/// Cap on uptrend results when the caller does not supply one.
pub const DEFAULT_UPTREND_LIMIT: usize = 2000;

/// File name prefix for serialized index blobs in the cache directory.
pub const CACHE_FILE_PREFIX: &str = "index_";

/// File name extension for serialized index blobs.
pub const CACHE_FILE_EXT: &str = "bin";

/// Signature reported for a missing or empty source directory.
pub const EMPTY_SIGNATURE: &str = "empty";
