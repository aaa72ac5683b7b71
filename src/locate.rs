//! Weekly snapshot file discovery.
//!
//! Finds files matching the `<prefix>_YYYY_MM_DD.<ext>` naming shape in a
//! source directory and orders them oldest-first. Contents are not opened
//! here; the locator only decides which files participate in a build.

use std::path::Path;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;
use crate::types::SnapshotFile;

/// Weekly snapshot naming shape: a non-empty prefix, an underscore-separated
/// date, and an extension.
#[allow(clippy::expect_used)]
static SNAPSHOT_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^.+_([0-9]{4})_([0-9]{2})_([0-9]{2})\.[a-z0-9]+$")
        .expect("snapshot name pattern compiles")
});

/// List the weekly snapshot files under `dir`, ordered by capture date
/// ascending, ties broken by file name.
///
/// Files that do not match the naming shape (or embed an impossible date)
/// are silently excluded; arbitrary non-snapshot files may coexist in the
/// directory. A missing directory yields an empty list, not an error.
pub fn snapshot_files(dir: &Path) -> Result<Vec<SnapshotFile>> {
    let mut files = Vec::new();
    if !dir.is_dir() {
        return Ok(files);
    }

    for entry in fs_err::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        let Some(capture_date) = capture_date(name) else {
            continue;
        };
        files.push(SnapshotFile { capture_date, path });
    }

    files.sort_by(|a, b| {
        (a.capture_date, a.path.file_name()).cmp(&(b.capture_date, b.path.file_name()))
    });
    tracing::debug!(
        locate.dir = %dir.display(),
        locate.files = files.len(),
        "located weekly snapshots"
    );
    Ok(files)
}

/// Capture date embedded in a snapshot file name, `None` if the name does
/// not match the shape or the date is not a real calendar date.
fn capture_date(name: &str) -> Option<NaiveDate> {
    let caps = SNAPSHOT_NAME.captures(name)?;
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
