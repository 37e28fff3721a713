//! One end-to-end session: manifest URL in, assembled artifact out.
//!
//! The caller (CLI, or whatever discovered the manifest URL) supplies the
//! URL and a destination name; everything else comes from configuration.
//! Only one session may be active against a given working directory at a
//! time; nothing enforces that, it is a documented constraint.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::assembler;
use crate::config::HlsgetConfig;
use crate::coordinator::{self, CoordinatorOptions, DownloadResult};
use crate::manifest;
use crate::progress::ProgressStore;
use crate::retry::RetryPolicy;

/// Session parameters, usually derived from `HlsgetConfig` with CLI overrides.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub worker_count: usize,
    pub work_dir: PathBuf,
    pub progress_file: PathBuf,
    pub retry: RetryPolicy,
}

impl SessionOptions {
    pub fn from_config(cfg: &HlsgetConfig) -> Self {
        Self {
            worker_count: cfg.worker_count,
            work_dir: cfg.work_dir.clone(),
            progress_file: cfg.progress_file.clone(),
            retry: RetryPolicy::from_config(cfg.retry.as_ref()),
        }
    }
}

/// What a session run produced.
#[derive(Debug)]
pub enum SessionOutcome {
    /// Every segment downloaded and the artifact was assembled; transient
    /// state is gone.
    Completed {
        output: PathBuf,
        segment_count: usize,
    },
    /// Some segments failed permanently. No artifact was produced; the
    /// progress record and completed blobs are retained, so a retry only
    /// fetches the failed indices.
    Incomplete(DownloadResult),
}

/// Run one session: load the manifest, download pending segments, and, if
/// nothing failed, assemble the output artifact.
///
/// Manifest and assembly errors abort the session; per-segment failures are
/// reported through `SessionOutcome::Incomplete` instead.
pub fn run(manifest_url: &str, output_name: &str, opts: &SessionOptions) -> Result<SessionOutcome> {
    let manifest = manifest::load(manifest_url)
        .with_context(|| format!("failed to load manifest {}", manifest_url))?;

    let store = ProgressStore::open(&opts.progress_file).with_context(|| {
        format!(
            "failed to open progress record {}",
            opts.progress_file.display()
        )
    })?;

    let coordinator_opts = CoordinatorOptions {
        worker_count: opts.worker_count,
        retry: opts.retry,
    };
    let result = coordinator::run(&manifest, &store, &opts.work_dir, &coordinator_opts)?;
    if !result.is_complete() {
        return Ok(SessionOutcome::Incomplete(result));
    }

    let output = PathBuf::from(output_name);
    assembler::assemble(&opts.work_dir, manifest.len(), &output, &store)
        .with_context(|| format!("failed to assemble {}", output.display()))?;

    Ok(SessionOutcome::Completed {
        output,
        segment_count: manifest.len(),
    })
}
