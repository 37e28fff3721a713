//! CLI for the hlsget stream downloader.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use hlsget_core::config;
use std::path::PathBuf;

use commands::{run_clean, run_fetch, run_status, FetchOverrides};

/// Top-level CLI for the hlsget stream downloader.
#[derive(Debug, Parser)]
#[command(name = "hlsget")]
#[command(about = "hlsget: resumable HLS media stream downloader", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download a media playlist's segments and assemble the output file.
    Fetch {
        /// URL of the m3u8 media playlist (supplied by whatever discovered it).
        url: String,

        /// Name of the assembled output file.
        output: String,

        /// Number of concurrent segment downloads (default from config).
        #[arg(long, value_name = "N")]
        workers: Option<usize>,

        /// Directory for transient per-segment files (default from config).
        #[arg(long, value_name = "PATH")]
        work_dir: Option<PathBuf>,

        /// Path of the progress record (default from config).
        #[arg(long, value_name = "PATH")]
        progress_file: Option<PathBuf>,
    },

    /// Show how many segments the progress record marks complete.
    Status,

    /// Remove the working directory and the progress record.
    Clean,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch {
                url,
                output,
                workers,
                work_dir,
                progress_file,
            } => run_fetch(
                &cfg,
                &url,
                &output,
                FetchOverrides {
                    workers,
                    work_dir,
                    progress_file,
                },
            ),
            CliCommand::Status => run_status(&cfg),
            CliCommand::Clean => run_clean(&cfg),
        }
    }
}

#[cfg(test)]
mod tests;
