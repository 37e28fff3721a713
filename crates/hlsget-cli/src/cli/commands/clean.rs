use anyhow::Result;
use hlsget_core::config::HlsgetConfig;

/// Drop all transient session state: per-segment blobs and the progress
/// record. Works even on a corrupt record; the next fetch starts from
/// scratch.
pub fn run_clean(cfg: &HlsgetConfig) -> Result<()> {
    match std::fs::remove_dir_all(&cfg.work_dir) {
        Ok(()) => println!("Removed {}", cfg.work_dir.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    match std::fs::remove_file(&cfg.progress_file) {
        Ok(()) => println!("Cleared progress record {}", cfg.progress_file.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
