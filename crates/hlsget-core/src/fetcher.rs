//! Single-segment HTTP GET, streamed to a local blob file.
//!
//! The body is written to `<dest>.part` through the curl write callback and
//! renamed to `<dest>` only after a complete 2xx transfer, so a partially
//! written blob is never visible under its final name. On any failure the
//! partial file is removed and the classified error is returned; retrying
//! is the caller's job (`retry::run_with_retry`).

use crate::retry::SegmentError;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Extension of on-disk segment blobs.
pub const SEGMENT_EXTENSION: &str = "ts";

/// Per-attempt wall-clock timeout for one segment transfer.
pub const SEGMENT_TIMEOUT: Duration = Duration::from_secs(10);

/// Path of the blob for `index` inside `work_dir` (e.g. `ts_files/3.ts`).
pub fn blob_path(work_dir: &Path, index: usize) -> PathBuf {
    work_dir.join(format!("{}.{}", index, SEGMENT_EXTENSION))
}

/// Download one segment to `dest`.
///
/// A successful return guarantees `dest` holds the complete response body;
/// on error `dest` is left absent (a stale blob from an earlier session is
/// not touched on failure).
pub fn fetch_segment(url: &str, dest: &Path) -> Result<(), SegmentError> {
    let part = part_path(dest);
    let mut file = fs::File::create(&part).map_err(SegmentError::Storage)?;
    let mut write_err: Option<std::io::Error> = None;

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(SegmentError::Curl)?;
    easy.follow_location(true).map_err(SegmentError::Curl)?;
    easy.max_redirections(10).map_err(SegmentError::Curl)?;
    easy.timeout(SEGMENT_TIMEOUT).map_err(SegmentError::Curl)?;

    {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| match file.write_all(data) {
                Ok(()) => Ok(data.len()),
                Err(e) => {
                    write_err = Some(e);
                    Ok(0) // abort transfer
                }
            })
            .map_err(SegmentError::Curl)?;
        if let Err(e) = transfer.perform() {
            drop(transfer);
            let _ = fs::remove_file(&part);
            if e.is_write_error() {
                if let Some(io_err) = write_err {
                    return Err(SegmentError::Storage(io_err));
                }
            }
            return Err(SegmentError::Curl(e));
        }
    }

    let code = easy.response_code().map_err(SegmentError::Curl)?;
    if !(200..300).contains(&code) {
        let _ = fs::remove_file(&part);
        return Err(SegmentError::Http(code));
    }

    // Blob must be durable before its index can be marked complete.
    file.sync_all().map_err(SegmentError::Storage)?;
    drop(file);
    fs::rename(&part, dest).map_err(SegmentError::Storage)?;
    Ok(())
}

/// Temp path for an in-flight blob: appends `.part` (e.g. `3.ts` → `3.ts.part`).
fn part_path(dest: &Path) -> PathBuf {
    let mut o = dest.as_os_str().to_owned();
    o.push(".part");
    PathBuf::from(o)
}
