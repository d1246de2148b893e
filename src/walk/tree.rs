// src/walk/tree.rs
// =============================================================================
// Recursive directory walk over the content root.
//
// How it works:
// 1. List the directory and sort the entries (read_dir order is unspecified,
//    sorting makes two runs over the same tree print identically)
// 2. Recurse into subdirectories
// 3. Keep files whose extension is a document extension
//
// Each call returns the documents it found and the caller folds them into
// its own list. No shared mutable state crosses recursion levels.
//
// Symlinked directories are not followed, so a link cycle can't loop us.
// =============================================================================

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

// Lists every document under `root`, depth-first, in sorted order
//
// Returns an error if `root` is not a directory or any directory in the tree
// can't be listed. An unreadable *file* is not an error here; that shows up
// later when we try to read it.
pub fn collect_documents(
    root: &Path,
    is_document: &dyn Fn(&Path) -> bool,
) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(Error::ContentRootMissing {
            path: root.to_path_buf(),
        });
    }
    scan_dir(root, is_document)
}

fn scan_dir(dir: &Path, is_document: &dyn Fn(&Path) -> bool) -> Result<Vec<PathBuf>> {
    let read_err = |source: std::io::Error| Error::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dir)
        .map_err(read_err)?
        .map(|entry| entry.and_then(|e| Ok((e.path(), e.file_type()?))))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(read_err)?;
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    entries
        .into_iter()
        .try_fold(Vec::new(), |mut found, (path, file_type)| {
            if file_type.is_dir() {
                found.extend(scan_dir(&path, is_document)?);
            } else if (file_type.is_file() || path.is_file()) && is_document(&path) {
                // path.is_file() lets symlinks to documents through
                found.push(path);
            }
            Ok(found)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::testing::write_doc;

    fn docs(root: &Path) -> Vec<PathBuf> {
        let config = Config::default();
        collect_documents(root, &|p: &Path| config.is_document(p))
            .expect("walk")
            .into_iter()
            .map(|p| p.strip_prefix(root).expect("under root").to_path_buf())
            .collect()
    }

    #[test]
    fn test_walk_is_recursive_sorted_and_filtered() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_doc(dir.path(), "zeta.md", "");
        write_doc(dir.path(), "alpha.mdx", "");
        write_doc(dir.path(), "guide/b.md", "");
        write_doc(dir.path(), "guide/a.md", "");
        write_doc(dir.path(), "guide/deeper/c.mdx", "");
        write_doc(dir.path(), "img/logo.png", "");
        write_doc(dir.path(), "notes.txt", "");

        assert_eq!(
            docs(dir.path()),
            vec![
                PathBuf::from("alpha.mdx"),
                PathBuf::from("guide/a.md"),
                PathBuf::from("guide/b.md"),
                PathBuf::from("guide/deeper/c.mdx"),
                PathBuf::from("zeta.md"),
            ]
        );
    }

    #[test]
    fn test_walk_respects_extension_list() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_doc(dir.path(), "a.md", "");
        write_doc(dir.path(), "b.mdx", "");

        let config = Config {
            extensions: vec!["md".to_string()],
            ..Config::default()
        };
        let found =
            collect_documents(dir.path(), &|p: &Path| config.is_document(p)).expect("walk");
        assert_eq!(found, vec![dir.path().join("a.md")]);
    }

    #[test]
    fn test_empty_root_yields_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(docs(dir.path()).is_empty());
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = collect_documents(&dir.path().join("nope"), &|_: &Path| true);
        assert!(matches!(result, Err(Error::ContentRootMissing { .. })));
    }

    #[test]
    fn test_file_as_root_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_doc(dir.path(), "a.md", "");
        let result = collect_documents(&dir.path().join("a.md"), &|_: &Path| true);
        assert!(matches!(result, Err(Error::ContentRootMissing { .. })));
    }
}
