//! File discovery and directory indexing.

use crate::error::Result;
use crate::search::{InvertedIndex, tokenize_file};
use anyhow::{Context, bail};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Options controlling which files a directory walk visits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkOptions {
    /// Visit hidden files and directories.
    pub hidden: bool,
    /// Honour `.gitignore`, `.ignore` and similar files.
    pub respect_ignore: bool,
    /// Follow symbolic links.
    pub follow_links: bool,
    /// Maximum directory depth below the root, unlimited if `None`.
    pub max_depth: Option<usize>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            hidden: true,
            respect_ignore: false,
            follow_links: false,
            max_depth: None,
        }
    }
}

/// Returns every regular file below `root`, sorted by path.
pub fn discover_files(root: &Path, options: &WalkOptions) -> Result<Vec<PathBuf>> {
    let metadata = std::fs::metadata(root)
        .with_context(|| format!("Failed to access search directory {}", root.display()))?;
    if !metadata.is_dir() {
        bail!("{} is not a directory", root.display());
    }

    let mut files: Vec<PathBuf> = WalkBuilder::new(root)
        .standard_filters(options.respect_ignore)
        .hidden(!options.hidden)
        .follow_links(options.follow_links)
        .max_depth(options.max_depth)
        .build()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    Ok(files)
}

/// Builds an index over every file below `root`.
///
/// Each file is indexed under its path as displayed. Files that cannot be read
/// are logged and skipped.
pub fn index_directory(root: &Path, options: &WalkOptions) -> Result<InvertedIndex> {
    let start = std::time::Instant::now();
    let files = discover_files(root, options)?;
    tracing::debug!("Discovered {} files under {}", files.len(), root.display());

    let mut index = InvertedIndex::new();
    let mut skipped = 0;
    for path in files {
        match tokenize_file(&path) {
            Ok(words) => {
                index.add_document(path.display().to_string(), words);
            }
            Err(e) => {
                tracing::warn!("{:#}", e);
                skipped += 1;
            }
        }
    }

    tracing::info!(
        "Built search index: {} documents, {} unique terms, {} word occurrences ({} skipped) in {:?}",
        index.document_count(),
        index.term_count(),
        index.corpus_size(),
        skipped,
        start.elapsed()
    );

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_discover_files_recurses_and_sorts() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "b.txt", "b");
        write(temp.path(), "a/z.txt", "z");
        write(temp.path(), "a/deeper/y.txt", "y");

        let_assert!(Ok(files) = discover_files(temp.path(), &WalkOptions::default()));
        let relative: Vec<_> = files
            .iter()
            .map(|f| f.strip_prefix(temp.path()).unwrap().to_path_buf())
            .collect();
        check!(
            relative
                == vec![
                    PathBuf::from("a/deeper/y.txt"),
                    PathBuf::from("a/z.txt"),
                    PathBuf::from("b.txt"),
                ]
        );
    }

    #[test]
    fn test_hidden_files_follow_options() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), ".notes", "hidden");
        write(temp.path(), "visible.txt", "shown");

        let_assert!(Ok(all) = discover_files(temp.path(), &WalkOptions::default()));
        check!(all.len() == 2);

        let options = WalkOptions {
            hidden: false,
            ..WalkOptions::default()
        };
        let_assert!(Ok(visible) = discover_files(temp.path(), &options));
        check!(visible.len() == 1);
    }

    #[test]
    fn test_max_depth_limits_walk() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "top.txt", "top");
        write(temp.path(), "sub/inner.txt", "inner");

        let options = WalkOptions {
            max_depth: Some(1),
            ..WalkOptions::default()
        };
        let_assert!(Ok(files) = discover_files(temp.path(), &options));
        check!(files == vec![temp.path().join("top.txt")]);
    }

    #[test]
    fn test_root_must_be_a_directory() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "file.txt", "x");

        check!(discover_files(&temp.path().join("file.txt"), &WalkOptions::default()).is_err());
        check!(discover_files(&temp.path().join("absent"), &WalkOptions::default()).is_err());
    }

    #[test]
    fn test_index_directory_uses_paths_as_ids() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "graph.txt", "Graph theory, graph search.");

        let_assert!(Ok(index) = index_directory(temp.path(), &WalkOptions::default()));
        let id = temp.path().join("graph.txt").display().to_string();
        let_assert!(Some(stats) = index.doc_stats(&id));
        check!(stats.length() == 4);
        check!(stats.frequency("graph") == 2);
        check!(index.corpus_size() == 4);
    }
}
