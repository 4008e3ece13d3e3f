use anyhow::Result;
use std::path::Path;

/// Abstraction over file system reads, so extraction can run against fixtures
pub trait FileSystem: Send + Sync {
    /// Read file contents as a string
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Check if a path is a file
    fn is_file(&self, path: &Path) -> bool;
}

/// Real file system implementation using std::fs
#[derive(Debug, Default, Clone)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// In-memory file system for testing
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::{Arc, RwLock};

    #[derive(Debug, Default, Clone)]
    pub struct InMemoryFileSystem {
        files: Arc<RwLock<HashMap<PathBuf, String>>>,
    }

    impl InMemoryFileSystem {
        pub fn new() -> Self {
            Self::default()
        }

        /// Add a source file
        pub fn add_file(&self, path: impl AsRef<Path>, contents: impl Into<String>) {
            self.files
                .write()
                .unwrap()
                .insert(path.as_ref().to_path_buf(), contents.into());
        }
    }

    impl FileSystem for InMemoryFileSystem {
        fn read_to_string(&self, path: &Path) -> Result<String> {
            self.files
                .read()
                .unwrap()
                .get(path)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("File not found: {}", path.display()))
        }

        fn is_file(&self, path: &Path) -> bool {
            self.files.read().unwrap().contains_key(path)
        }
    }
}
