//! Content-addressed index cache.
//!
//! A built [`TrendIndex`] is persisted as one bincode blob per source
//! signature; the signature hashes the source directory's file listing
//! (name, size, mtime), so any change to the file set invalidates the key.
//! Corrupted or incompatible blobs never surface as errors; they degrade
//! to a rebuild with a warning, trading a slower request for availability.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use atomic_write_file::AtomicWriteFile;
use serde::{Deserialize, Serialize};

use crate::constants::{CACHE_FILE_EXT, CACHE_FILE_PREFIX, EMPTY_SIGNATURE};
use crate::error::Result;
use crate::index::build_index;
use crate::locate::snapshot_files;
use crate::types::TrendIndex;

/// How a [`get_or_build`] call was satisfied. Doubles as the build-count
/// probe in tests: a `Hit` proves no snapshot file was parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheOutcome {
    /// A blob for the current signature existed and decoded.
    Hit,
    /// No blob for the current signature; built and persisted.
    MissBuilt,
    /// A blob existed but failed to decode; rebuilt from source.
    RebuiltAfterCorrupt,
}

/// A resolved index plus the probe data callers use for observability.
#[derive(Debug, Clone)]
pub struct CacheLookup {
    pub index: TrendIndex,
    pub outcome: CacheOutcome,
    pub signature: String,
}

/// Content signature over the source listing: blake3 of the sorted
/// `name:size:mtime` triples. A missing directory signs as
/// [`EMPTY_SIGNATURE`].
pub fn source_signature(source_dir: &Path) -> Result<String> {
    if !source_dir.is_dir() {
        return Ok(EMPTY_SIGNATURE.to_owned());
    }

    let mut entries: Vec<String> = Vec::new();
    for entry in fs_err::read_dir(source_dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        let meta = fs_err::metadata(&path)?;
        let mtime = match meta.modified()?.duration_since(UNIX_EPOCH) {
            Ok(age) => age.as_secs(),
            Err(_) => 0,
        };
        entries.push(format!("{name}:{}:{mtime}", meta.len()));
    }
    entries.sort_unstable();
    Ok(blake3::hash(entries.join("|").as_bytes())
        .to_hex()
        .to_string())
}

/// Resolve an index for `source_dir`: decode the cached blob when the
/// signature matches, otherwise locate, build, and persist.
///
/// Decode failures degrade to a rebuild and are reported through
/// [`CacheOutcome`], never as errors. Build failures (unreadable week,
/// missing header, fewer than two weeks) do propagate.
pub fn get_or_build(source_dir: &Path, cache_dir: &Path) -> Result<CacheLookup> {
    let signature = source_signature(source_dir)?;
    let blob_path = blob_path(cache_dir, &signature);

    let mut outcome = CacheOutcome::MissBuilt;
    if blob_path.is_file() {
        match load_blob(&blob_path) {
            Ok(index) => {
                tracing::debug!(cache.signature = %signature, "index cache hit");
                return Ok(CacheLookup {
                    index,
                    outcome: CacheOutcome::Hit,
                    signature,
                });
            }
            Err(reason) => {
                tracing::warn!(
                    cache.signature = %signature,
                    cache.reason = %reason,
                    "index cache deserialize failed, rebuilding"
                );
                outcome = CacheOutcome::RebuiltAfterCorrupt;
            }
        }
    }

    let files = snapshot_files(source_dir)?;
    let index = build_index(&files)?;
    persist_blob(cache_dir, &blob_path, &index, &signature);

    Ok(CacheLookup {
        index,
        outcome,
        signature,
    })
}

fn blob_path(cache_dir: &Path, signature: &str) -> PathBuf {
    cache_dir.join(format!("{CACHE_FILE_PREFIX}{signature}.{CACHE_FILE_EXT}"))
}

fn load_blob(path: &Path) -> std::result::Result<TrendIndex, String> {
    let bytes = fs_err::read(path).map_err(|err| err.to_string())?;
    let (index, consumed) =
        bincode::serde::decode_from_slice::<TrendIndex, _>(&bytes, bincode::config::standard())
            .map_err(|err| err.to_string())?;
    if consumed != bytes.len() {
        return Err(format!(
            "trailing bytes in cache blob ({consumed} of {} consumed)",
            bytes.len()
        ));
    }
    Ok(index)
}

/// Persist a freshly built index under its signature, then prune blobs for
/// superseded signatures. Write failures are warnings, not errors: the
/// caller still gets the built index, the next request just rebuilds.
fn persist_blob(cache_dir: &Path, path: &Path, index: &TrendIndex, signature: &str) {
    let bytes = match bincode::serde::encode_to_vec(index, bincode::config::standard()) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(error = %err, "index cache encode failed, serving unpersisted index");
            return;
        }
    };
    if let Err(err) = fs_err::create_dir_all(cache_dir) {
        tracing::warn!(error = %err, "index cache directory unavailable, serving unpersisted index");
        return;
    }
    if let Err(err) = write_atomic(path, &bytes) {
        tracing::warn!(
            cache.blob = %path.display(),
            error = %err,
            "index cache write failed, serving unpersisted index"
        );
        return;
    }
    tracing::debug!(
        cache.signature = %signature,
        cache.bytes = bytes.len(),
        "persisted index cache blob"
    );
    prune_superseded(cache_dir, signature);
}

fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = AtomicWriteFile::open(path)?;
    file.write_all(bytes)?;
    file.commit()
}

/// Remove blobs whose signature has been superseded. The signature key
/// makes them unreachable, so keeping them only leaks disk. Best-effort.
fn prune_superseded(cache_dir: &Path, keep_signature: &str) {
    let Ok(entries) = fs_err::read_dir(cache_dir) else {
        return;
    };
    let keep = format!("{CACHE_FILE_PREFIX}{keep_signature}.{CACHE_FILE_EXT}");
    let suffix = format!(".{CACHE_FILE_EXT}");

    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if name == keep || !name.starts_with(CACHE_FILE_PREFIX) || !name.ends_with(&suffix) {
            continue;
        }
        match fs_err::remove_file(&path) {
            Ok(()) => tracing::debug!(cache.pruned = %name, "removed superseded index cache blob"),
            Err(err) => {
                tracing::debug!(cache.blob = %name, error = %err, "failed to prune cache blob");
            }
        }
    }
}
