use super::{Cli, CliCommand};
use clap::Parser;

#[test]
fn parses_fetch_with_defaults() {
    let cli = Cli::try_parse_from(["hlsget", "fetch", "http://example.com/index.m3u8", "ep1.mp4"])
        .unwrap();
    match cli.command {
        CliCommand::Fetch {
            url,
            output,
            workers,
            work_dir,
            progress_file,
        } => {
            assert_eq!(url, "http://example.com/index.m3u8");
            assert_eq!(output, "ep1.mp4");
            assert!(workers.is_none());
            assert!(work_dir.is_none());
            assert!(progress_file.is_none());
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn parses_fetch_overrides() {
    let cli = Cli::try_parse_from([
        "hlsget",
        "fetch",
        "http://example.com/index.m3u8",
        "ep1.mp4",
        "--workers",
        "3",
        "--work-dir",
        "segments",
        "--progress-file",
        "done.txt",
    ])
    .unwrap();
    match cli.command {
        CliCommand::Fetch {
            workers,
            work_dir,
            progress_file,
            ..
        } => {
            assert_eq!(workers, Some(3));
            assert_eq!(work_dir.as_deref(), Some(std::path::Path::new("segments")));
            assert_eq!(
                progress_file.as_deref(),
                Some(std::path::Path::new("done.txt"))
            );
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn fetch_requires_url_and_output() {
    assert!(Cli::try_parse_from(["hlsget", "fetch"]).is_err());
    assert!(Cli::try_parse_from(["hlsget", "fetch", "http://example.com/index.m3u8"]).is_err());
}

#[test]
fn parses_status_and_clean() {
    assert!(matches!(
        Cli::try_parse_from(["hlsget", "status"]).unwrap().command,
        CliCommand::Status
    ));
    assert!(matches!(
        Cli::try_parse_from(["hlsget", "clean"]).unwrap().command,
        CliCommand::Clean
    ));
}
