//! Shared test fixtures and utilities for integration tests.
//!
//! [`TempWorkspace`] provides a temporary directory that is removed on drop,
//! used to lay out small corpora on disk for indexing.

use findfiles::InvertedIndex;
use findfiles::corpus::{WalkOptions, index_directory};
use rstest::fixture;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary workspace directory for test isolation.
///
/// # Example
///
/// ```ignore
/// let workspace = TempWorkspace::new();
/// workspace.create_file("notes/graph.txt", "graph theory");
/// assert!(workspace.path().join("notes/graph.txt").exists());
/// ```
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempWorkspace {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempWorkspace {
    /// Creates a new empty temporary workspace.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    /// Returns the root path of this workspace.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Creates a file with the given content within this workspace.
    ///
    /// Parent directories are created automatically if they don't exist.
    ///
    /// # Panics
    /// Panics if file creation fails.
    pub fn create_file(&self, path: &str, content: impl AsRef<[u8]>) {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("Failed to create parent directory for '{}': {}", path, e)
            });
        }
        std::fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Failed to write file '{}': {}", path, e));
    }

    /// Document id the index assigns to a file in this workspace.
    pub fn doc_id(&self, path: &str) -> String {
        self.root.join(path).display().to_string()
    }

    /// Indexes the whole workspace with default walk options.
    pub fn index(&self) -> InvertedIndex {
        index_directory(&self.root, &WalkOptions::default()).expect("Failed to index workspace")
    }
}

impl Default for TempWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// A small corpus about data structures.
///
/// | file               | words                           |
/// |--------------------|---------------------------------|
/// | `trees/rbt.txt`    | red black tree a tree balanced  |
/// | `trees/avl.txt`    | avl tree balanced rotation      |
/// | `maps/hash.txt`    | hash map bucket hash            |
/// | `maps/ordered.txt` | ordered map built on a tree     |
///
/// 20 word occurrences in total.
#[fixture]
pub fn data_structures() -> TempWorkspace {
    let workspace = TempWorkspace::new();
    workspace.create_file("trees/rbt.txt", "Red-black tree: a tree, BALANCED.");
    workspace.create_file("trees/avl.txt", "AVL tree (balanced) rotation");
    workspace.create_file("maps/hash.txt", "hash map; bucket & hash");
    workspace.create_file("maps/ordered.txt", "Ordered map, built on a tree.");
    workspace
}
