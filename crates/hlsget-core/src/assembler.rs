//! Final artifact assembly.
//!
//! Concatenates segment blobs in strict index order into the output file,
//! then removes the transient per-segment storage and the progress record.
//! The output is written to a `.part` path and atomically renamed, so a
//! failed or interrupted assembly never leaves a truncated artifact under
//! the final name, and all transient state survives for a retry.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::fetcher::blob_path;
use crate::progress::ProgressStore;

#[derive(Debug, Error)]
pub enum AssembleError {
    /// A blob expected from the manifest is absent. Refusing to assemble
    /// beats silently producing a truncated artifact, even when the
    /// progress record claims completeness.
    #[error("segment blob {index} is missing")]
    MissingSegment { index: usize },
    #[error("assembly I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Concatenate blobs `0..segment_count` from `work_dir` into `output_path`.
///
/// Preconditions are verified by listing: every expected blob must exist
/// before a single byte is written. On success the blobs, the working
/// directory, and the progress record are all removed (cleanup problems are
/// logged, not fatal). On failure everything is left intact.
pub fn assemble(
    work_dir: &Path,
    segment_count: usize,
    output_path: &Path,
    store: &ProgressStore,
) -> Result<(), AssembleError> {
    for index in 0..segment_count {
        if !blob_path(work_dir, index).is_file() {
            return Err(AssembleError::MissingSegment { index });
        }
    }

    let part = part_path(output_path);
    if let Err(e) = concat_blobs(work_dir, segment_count, &part) {
        let _ = fs::remove_file(&part);
        return Err(e.into());
    }
    fs::rename(&part, output_path)?;
    tracing::info!(
        segments = segment_count,
        output = %output_path.display(),
        "assembled output artifact"
    );

    for index in 0..segment_count {
        let blob = blob_path(work_dir, index);
        if let Err(e) = fs::remove_file(&blob) {
            tracing::warn!(blob = %blob.display(), error = %e, "failed to remove segment blob");
        }
    }
    if let Err(e) = fs::remove_dir_all(work_dir) {
        tracing::warn!(dir = %work_dir.display(), error = %e, "failed to remove working directory");
    }
    if let Err(e) = store.clear() {
        tracing::warn!(error = %e, "failed to remove progress record");
    }
    Ok(())
}

fn concat_blobs(work_dir: &Path, segment_count: usize, part: &Path) -> io::Result<()> {
    let mut out = fs::File::create(part)?;
    for index in 0..segment_count {
        let mut blob = fs::File::open(blob_path(work_dir, index))?;
        io::copy(&mut blob, &mut out)?;
    }
    out.sync_all()
}

fn part_path(output_path: &Path) -> PathBuf {
    let mut o = output_path.as_os_str().to_owned();
    o.push(".part");
    PathBuf::from(o)
}
