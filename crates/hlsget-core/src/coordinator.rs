//! Bounded-concurrency download coordination.
//!
//! Computes the pending segment list from the progress record, runs a fixed
//! pool of worker threads over a shared queue, and marks each index durably
//! complete before its unit of work counts as finished. A single segment's
//! permanent failure does not abort siblings in flight; failures are
//! aggregated into the returned `DownloadResult`.

use anyhow::{Context, Result};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::mpsc;
use std::sync::Mutex;

use crate::fetcher;
use crate::manifest::{Manifest, Segment};
use crate::progress::ProgressStore;
use crate::retry::{run_with_retry, RetryPolicy, SegmentError};

/// Knobs for one coordination run.
#[derive(Debug, Clone, Copy)]
pub struct CoordinatorOptions {
    /// Fixed worker pool width (capped at the pending segment count).
    pub worker_count: usize,
    /// Per-segment retry policy.
    pub retry: RetryPolicy,
}

impl Default for CoordinatorOptions {
    fn default() -> Self {
        Self {
            worker_count: 5,
            retry: RetryPolicy::default(),
        }
    }
}

/// One segment that exhausted its retries.
#[derive(Debug)]
pub struct FailedSegment {
    pub index: usize,
    pub cause: SegmentError,
}

/// Outcome of a coordination run. `succeeded` counts segments newly
/// completed by this run; segments already in the progress record are
/// skipped, not re-fetched.
#[derive(Debug, Default)]
pub struct DownloadResult {
    pub succeeded: usize,
    pub failed: Vec<FailedSegment>,
}

impl DownloadResult {
    /// True when every pending segment completed; assembly may proceed.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Download every segment of `manifest` not yet recorded in `store`,
/// writing blobs into `work_dir`.
pub fn run(
    manifest: &Manifest,
    store: &ProgressStore,
    work_dir: &Path,
    options: &CoordinatorOptions,
) -> Result<DownloadResult> {
    std::fs::create_dir_all(work_dir)
        .with_context(|| format!("failed to create working directory {}", work_dir.display()))?;

    let completed = store.completed();
    let pending: Vec<Segment> = manifest
        .segments
        .iter()
        .filter(|s| !completed.contains(&s.index))
        .cloned()
        .collect();

    let total = manifest.len();
    if pending.is_empty() {
        tracing::info!(total, "all segments already downloaded, nothing to do");
        return Ok(DownloadResult::default());
    }
    tracing::info!(
        pending = pending.len(),
        skipped = completed.len(),
        total,
        "starting segment downloads"
    );

    let count = pending.len();
    let num_workers = options.worker_count.max(1).min(count);
    let retry = options.retry;
    let queue: Mutex<VecDeque<Segment>> = Mutex::new(pending.into_iter().collect());
    let (tx, rx) = mpsc::channel::<(usize, Result<(), SegmentError>)>();

    let mut result = DownloadResult::default();
    std::thread::scope(|scope| {
        for _ in 0..num_workers {
            let tx = tx.clone();
            let queue = &queue;
            scope.spawn(move || loop {
                let segment = match queue.lock().unwrap().pop_front() {
                    Some(s) => s,
                    None => break,
                };
                let dest = fetcher::blob_path(work_dir, segment.index);
                let res = run_with_retry(&retry, || {
                    fetcher::fetch_segment(segment.uri.as_str(), &dest)
                })
                // The unit of work is not done until the checkpoint is
                // durable; a failed mark means a re-fetch on resume.
                .and_then(|()| {
                    store
                        .mark_complete(segment.index)
                        .map_err(SegmentError::Storage)
                });
                let _ = tx.send((segment.index, res));
            });
        }
        drop(tx);

        let mut done = completed.len();
        for (index, res) in rx.iter() {
            match res {
                Ok(()) => {
                    done += 1;
                    result.succeeded += 1;
                    tracing::info!(index, done, total, "segment complete");
                }
                Err(cause) => {
                    tracing::warn!(index, error = %cause, "segment failed after retries");
                    result.failed.push(FailedSegment { index, cause });
                }
            }
        }
    });

    if !result.is_complete() {
        result.failed.sort_by_key(|f| f.index);
        tracing::warn!(
            succeeded = result.succeeded,
            failed = result.failed.len(),
            "download incomplete; progress retained for resume"
        );
    }
    Ok(result)
}
