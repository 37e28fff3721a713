//! Durable progress record: which segment indices are fully downloaded.
//!
//! Persisted as a plain-text file, one ascending integer index per line.
//! Every checkpoint rewrites the whole file through a temp file + atomic
//! rename, so a crash mid-write leaves either the old or the new complete
//! state readable. The write path is serialized behind a mutex; this is the
//! one shared-mutable resource in a session.

use std::collections::BTreeSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Durable set of completed segment indices for one session.
///
/// Safe to share across worker threads: `mark_complete` takes an internal
/// lock, and the persisted content is the union of all marked indices
/// regardless of completion order.
#[derive(Debug)]
pub struct ProgressStore {
    path: PathBuf,
    completed: Mutex<BTreeSet<usize>>,
}

impl ProgressStore {
    /// Open the progress record at `path`, loading any prior state.
    /// A missing file is an empty record, not an error.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let completed = match fs::read_to_string(&path) {
            Ok(data) => parse_record(&data)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeSet::new(),
            Err(e) => return Err(e),
        };
        if !completed.is_empty() {
            tracing::info!(
                completed = completed.len(),
                path = %path.display(),
                "resuming from existing progress record"
            );
        }
        Ok(Self {
            path,
            completed: Mutex::new(completed),
        })
    }

    /// Snapshot of the completed-index set.
    pub fn completed(&self) -> BTreeSet<usize> {
        self.completed.lock().unwrap().clone()
    }

    /// Durably merge `index` into the record. The index is only visible to
    /// a later `open` once the rewritten file has been renamed into place.
    pub fn mark_complete(&self, index: usize) -> io::Result<()> {
        let mut completed = self.completed.lock().unwrap();
        if !completed.insert(index) {
            return Ok(());
        }
        if let Err(e) = self.persist(&completed) {
            // Roll back: a failed checkpoint must not count as complete.
            completed.remove(&index);
            return Err(e);
        }
        Ok(())
    }

    /// Remove the persisted record entirely. Idempotent.
    pub fn clear(&self) -> io::Result<()> {
        let mut completed = self.completed.lock().unwrap();
        completed.clear();
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Path of the on-disk record.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrite the whole record (caller holds the lock): write a temp file,
    /// sync, then rename over the old one.
    fn persist(&self, completed: &BTreeSet<usize>) -> io::Result<()> {
        let mut tmp = self.path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let mut file = fs::File::create(&tmp)?;
        let mut buf = String::new();
        for index in completed {
            buf.push_str(&index.to_string());
            buf.push('\n');
        }
        file.write_all(buf.as_bytes())?;
        file.sync_all()?;
        drop(file);

        fs::rename(&tmp, &self.path)
    }
}

fn parse_record(data: &str) -> io::Result<BTreeSet<usize>> {
    let mut set = BTreeSet::new();
    for line in data.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let index: usize = line.parse().map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("malformed progress record line: {:?}", line),
            )
        })?;
        set.insert(index);
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn missing_file_is_empty_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProgressStore::open(dir.path().join("progress.txt")).unwrap();
        assert!(store.completed().is_empty());
    }

    #[test]
    fn mark_complete_persists_sorted_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.txt");
        let store = ProgressStore::open(&path).unwrap();
        store.mark_complete(7).unwrap();
        store.mark_complete(0).unwrap();
        store.mark_complete(3).unwrap();

        let data = fs::read_to_string(&path).unwrap();
        assert_eq!(data, "0\n3\n7\n");
    }

    #[test]
    fn reopen_reads_prior_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.txt");
        {
            let store = ProgressStore::open(&path).unwrap();
            store.mark_complete(1).unwrap();
            store.mark_complete(2).unwrap();
        }
        let store = ProgressStore::open(&path).unwrap();
        assert_eq!(store.completed(), BTreeSet::from([1, 2]));

        // New marks merge with loaded state.
        store.mark_complete(0).unwrap();
        let data = fs::read_to_string(&path).unwrap();
        assert_eq!(data, "0\n1\n2\n");
    }

    #[test]
    fn concurrent_marks_are_a_union() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.txt");
        let store = Arc::new(ProgressStore::open(&path).unwrap());

        let mut handles = Vec::new();
        for worker in 0..4usize {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                for i in 0..25usize {
                    store.mark_complete(worker * 25 + i).unwrap();
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }

        let expected: BTreeSet<usize> = (0..100).collect();
        assert_eq!(store.completed(), expected);
        let reloaded = ProgressStore::open(&path).unwrap();
        assert_eq!(reloaded.completed(), expected);
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.txt");
        let store = ProgressStore::open(&path).unwrap();
        store.mark_complete(0).unwrap();
        assert!(path.exists());
        store.clear().unwrap();
        assert!(!path.exists());
        store.clear().unwrap();
        assert!(store.completed().is_empty());
    }

    #[test]
    fn malformed_line_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.txt");
        fs::write(&path, "0\nnot-a-number\n2\n").unwrap();
        let err = ProgressStore::open(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn trailing_newline_and_blanks_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.txt");
        fs::write(&path, "0\n\n5\n").unwrap();
        let store = ProgressStore::open(&path).unwrap();
        assert_eq!(store.completed(), BTreeSet::from([0, 5]));
    }
}
