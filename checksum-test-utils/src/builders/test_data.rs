//! Builders for deterministic test files and directory layouts

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Builder that writes test files into an existing directory
pub struct TestFileBuilder {
    base_dir: PathBuf,
    generated_files: Vec<PathBuf>,
}

impl TestFileBuilder {
    /// Create a builder rooted at `base_dir`
    pub fn new(base_dir: &Path) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
            generated_files: Vec::new(),
        }
    }

    /// Generate deterministic pseudo-random content for a given seed
    ///
    /// The same seed and size always produce the same bytes, so expected
    /// digests stay stable across runs.
    pub fn deterministic_content(size: usize, seed: u64) -> Vec<u8> {
        let mut content = Vec::with_capacity(size);
        let mut state = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15).wrapping_add(1);

        for _ in 0..size {
            content.push((state >> 24) as u8);
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        }
        content
    }

    /// Write a deterministic file and return its path
    pub fn generate_deterministic_file(
        &mut self,
        name: &str,
        size: usize,
        seed: u64,
    ) -> io::Result<PathBuf> {
        let file_path = self.base_dir.join(name);
        fs::write(&file_path, Self::deterministic_content(size, seed))?;
        self.generated_files.push(file_path.clone());
        Ok(file_path)
    }

    /// Write a file with the given content
    pub fn generate_file(&mut self, name: &str, content: &[u8]) -> io::Result<PathBuf> {
        let file_path = self.base_dir.join(name);
        fs::write(&file_path, content)?;
        self.generated_files.push(file_path.clone());
        Ok(file_path)
    }

    /// Paths of everything generated so far
    pub fn generated_files(&self) -> &[PathBuf] {
        &self.generated_files
    }

    /// Remove all generated files
    pub fn cleanup(&mut self) {
        for file_path in &self.generated_files {
            let _ = fs::remove_file(file_path);
        }
        self.generated_files.clear();
    }
}

impl Drop for TestFileBuilder {
    fn drop(&mut self) {
        self.cleanup();
    }
}

/// Self-contained temporary directory tree for resolver and batch tests
pub struct FixtureTree {
    dir: TempDir,
}

impl FixtureTree {
    /// Create an empty temporary tree
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    /// Root of the tree
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Create a file with content, creating parent directories as needed
    pub fn file(self, relative: &str, content: &[u8]) -> io::Result<Self> {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(self)
    }

    /// Create an empty subdirectory
    pub fn dir(self, relative: &str) -> io::Result<Self> {
        fs::create_dir_all(self.dir.path().join(relative))?;
        Ok(self)
    }

    /// Absolute path of an entry as a string, for use as resolver input
    pub fn input(&self, relative: &str) -> String {
        self.dir.path().join(relative).display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_content_is_stable() {
        let first = TestFileBuilder::deterministic_content(256, 42);
        let second = TestFileBuilder::deterministic_content(256, 42);
        assert_eq!(first, second);
        assert_ne!(first, TestFileBuilder::deterministic_content(256, 43));
    }

    #[test]
    fn test_builder_writes_and_cleans_up() {
        let dir = TempDir::new().unwrap();
        let mut builder = TestFileBuilder::new(dir.path());

        let path = builder.generate_deterministic_file("a.bin", 64, 1).unwrap();
        assert!(path.exists());

        builder.cleanup();
        assert!(!path.exists());
    }

    #[test]
    fn test_fixture_tree() {
        let tree = FixtureTree::new()
            .unwrap()
            .file("x/y.txt", b"nested")
            .unwrap()
            .dir("empty")
            .unwrap();

        assert!(tree.root().join("x/y.txt").is_file());
        assert!(tree.root().join("empty").is_dir());
    }
}
