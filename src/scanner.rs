//! Workspace file enumeration.

use std::path::PathBuf;

use walkdir::WalkDir;

/// Enumerates source files under a workspace root and reads their contents.
pub struct Scanner {
    root: PathBuf,
}

impl Scanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root-relative paths of every file whose extension is in `extensions`.
    /// Unreadable directory entries are logged and skipped.
    pub fn scan(&self, extensions: &[&str]) -> Vec<String> {
        let mut paths = Vec::new();
        for entry in WalkDir::new(&self.root) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("skipping unreadable entry: {e}");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let matches = entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| extensions.contains(&ext));
            if !matches {
                continue;
            }
            if let Ok(relative) = entry.path().strip_prefix(&self.root) {
                paths.push(relative.to_string_lossy().into_owned());
            }
        }
        paths
    }

    /// Contents of a root-relative file. Read failures are logged and yield
    /// an empty string so indexing can continue past a bad file.
    pub fn file_content(&self, relative: &str) -> String {
        let path = self.root.join(relative);
        match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("failed to read {}: {e}", path.display());
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod scanner_tests {
    use super::*;

    #[test]
    fn test_scan_filters_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.php"), "<?php\n").unwrap();
        std::fs::write(dir.path().join("b.txt"), "notes\n").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub/c.php"), "<?php\n").unwrap();

        let mut paths = Scanner::new(dir.path()).scan(&["php"]);
        paths.sort();
        assert_eq!(paths, vec!["a.php".to_string(), "sub/c.php".to_string()]);
    }

    #[test]
    fn test_scan_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Scanner::new(dir.path()).scan(&["php"]).is_empty());
    }

    #[test]
    fn test_file_content() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.php"), "<?php\n$x = 1;\n").unwrap();

        let scanner = Scanner::new(dir.path());
        assert_eq!(scanner.file_content("a.php"), "<?php\n$x = 1;\n");
        // A missing file reads as empty rather than failing the index pass.
        assert_eq!(scanner.file_content("missing.php"), "");
    }
}
