use anyhow::Result;
use hlsget_core::config::HlsgetConfig;
use hlsget_core::progress::ProgressStore;

pub fn run_status(cfg: &HlsgetConfig) -> Result<()> {
    let store = ProgressStore::open(&cfg.progress_file)?;
    let completed = store.completed();
    if completed.is_empty() {
        println!("No progress recorded at {}", cfg.progress_file.display());
        return Ok(());
    }
    println!(
        "{} segments recorded complete in {} (highest index {})",
        completed.len(),
        cfg.progress_file.display(),
        completed.iter().next_back().unwrap()
    );
    Ok(())
}
