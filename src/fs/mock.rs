// src/fs/mock.rs

use super::FileSystem;
use anyhow::{Result, anyhow};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// In-memory filesystem for tests.
///
/// Clones share state, so a test can hold one handle while the code under
/// test holds another. `size_reads()` exposes how often `file_size` was
/// called per path, which lets tests assert the validator's short-circuit
/// (a missing artifact must not trigger a size read).
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    files: Arc<Mutex<HashMap<PathBuf, Vec<u8>>>>,
    dirs: Arc<Mutex<HashSet<PathBuf>>>,
    size_reads: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.files.lock().unwrap().insert(path, content.into());
    }

    /// Convenience: a file whose content is `size` filler bytes.
    pub fn add_file_of_size(&self, path: impl AsRef<Path>, size: usize) {
        self.add_file(path, vec![0u8; size]);
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut dirs = self.dirs.lock().unwrap();
        let mut current = path.as_ref().to_path_buf();
        loop {
            dirs.insert(current.clone());
            match current.parent() {
                Some(p) if !p.as_os_str().is_empty() => current = p.to_path_buf(),
                _ => break,
            }
        }
    }

    /// Paths for which `file_size` has been called, in call order.
    pub fn size_reads(&self) -> Vec<PathBuf> {
        self.size_reads.lock().unwrap().clone()
    }
}

impl FileSystem for MockFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.lock().unwrap().contains(path)
    }

    fn file_size(&self, path: &Path) -> Result<u64> {
        self.size_reads.lock().unwrap().push(path.to_path_buf());
        let files = self.files.lock().unwrap();
        match files.get(path) {
            Some(content) => Ok(content.len() as u64),
            None => Err(anyhow!("File not found: {:?}", path)),
        }
    }

    fn append(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        let mut files = self.files.lock().unwrap();
        files
            .entry(path.to_path_buf())
            .or_default()
            .extend_from_slice(contents);
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.add_dir(path);
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let files = self.files.lock().unwrap();
        match files.get(path) {
            Some(content) => {
                String::from_utf8(content.clone()).map_err(|e| anyhow!("Invalid UTF-8: {}", e))
            }
            None => Err(anyhow!("File not found: {:?}", path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_accumulates_in_order() {
        let fs = MockFileSystem::new();
        let path = Path::new("/data/log.csv");
        fs.append(path, b"a\n").unwrap();
        fs.append(path, b"b\n").unwrap();
        assert_eq!(fs.read_to_string(path).unwrap(), "a\nb\n");
    }

    #[test]
    fn size_reads_are_recorded() {
        let fs = MockFileSystem::new();
        fs.add_file_of_size("/data/images/1.jpg", 3);
        assert_eq!(fs.file_size(Path::new("/data/images/1.jpg")).unwrap(), 3);
        assert_eq!(fs.size_reads(), vec![PathBuf::from("/data/images/1.jpg")]);
    }
}
