use anyhow::Result;
use hlsget_core::config::HlsgetConfig;
use hlsget_core::session::{self, SessionOptions, SessionOutcome};
use std::path::PathBuf;

/// Command-line overrides applied on top of the config file.
#[derive(Debug, Default)]
pub struct FetchOverrides {
    pub workers: Option<usize>,
    pub work_dir: Option<PathBuf>,
    pub progress_file: Option<PathBuf>,
}

pub fn run_fetch(
    cfg: &HlsgetConfig,
    url: &str,
    output: &str,
    overrides: FetchOverrides,
) -> Result<()> {
    let mut opts = SessionOptions::from_config(cfg);
    if let Some(workers) = overrides.workers {
        opts.worker_count = workers;
    }
    if let Some(work_dir) = overrides.work_dir {
        opts.work_dir = work_dir;
    }
    if let Some(progress_file) = overrides.progress_file {
        opts.progress_file = progress_file;
    }

    match session::run(url, output, &opts)? {
        SessionOutcome::Completed {
            output,
            segment_count,
        } => {
            println!(
                "Downloaded {} segments and assembled {}",
                segment_count,
                output.display()
            );
            Ok(())
        }
        SessionOutcome::Incomplete(result) => {
            println!(
                "Downloaded {} segments, {} failed:",
                result.succeeded,
                result.failed.len()
            );
            for failed in &result.failed {
                println!("  segment {}: {}", failed.index, failed.cause);
            }
            anyhow::bail!(
                "{} segments failed; completed progress was kept, re-run to retry only those",
                result.failed.len()
            )
        }
    }
}
