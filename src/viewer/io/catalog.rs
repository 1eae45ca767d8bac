//! Directory catalog of image files and page navigation over it.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, info};

use crate::viewer::common::error::{Result, ViewerError};

/// Result of a page navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMove {
    /// The page start changed
    Moved,
    /// Already on the last page; nothing changed
    End,
    /// Moved past the beginning; clamped to the first image
    First,
}

/// Sorted list of image paths found under a directory, with the index of the
/// first image on the current page.
#[derive(Debug, Clone, Default)]
pub struct ImageCatalog {
    paths: Vec<PathBuf>,
    page_start: usize,
}

impl ImageCatalog {
    /// Recursively collects files under `dir` whose names match `pattern`.
    ///
    /// `*` matches any run of characters and `?` a single one. Hidden entries
    /// (names starting with `.`) are skipped.
    pub fn scan(dir: impl AsRef<Path>, pattern: &str) -> Result<Self> {
        let dir = dir.as_ref();
        let matcher = wildcard_regex(pattern)?;

        let mut paths = Vec::new();
        walk(dir, &matcher, &mut paths)?;
        paths.sort();

        info!("Found {} images under {} matching {}", paths.len(), dir.display(), pattern);
        Ok(Self::from_paths(paths))
    }

    pub fn from_paths(paths: Vec<PathBuf>) -> Self {
        Self { paths, page_start: 0 }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.paths.get(index).map(PathBuf::as_path)
    }

    pub fn page_start(&self) -> usize {
        self.page_start
    }

    /// Paths shown on the current page of `page_size` tiles.
    pub fn page(&self, page_size: usize) -> &[PathBuf] {
        let start = self.page_start.min(self.paths.len());
        let end = (start + page_size).min(self.paths.len());
        &self.paths[start..end]
    }

    pub fn next_page(&mut self, page_size: usize) -> PageMove {
        if self.page_start + page_size < self.paths.len() {
            self.page_start += page_size;
            debug!(page_start = self.page_start, "Next page");
            PageMove::Moved
        } else {
            debug!("End of images");
            PageMove::End
        }
    }

    pub fn prev_page(&mut self, page_size: usize) -> PageMove {
        match self.page_start.checked_sub(page_size) {
            Some(start) => {
                self.page_start = start;
                debug!(page_start = self.page_start, "Previous page");
                PageMove::Moved
            }
            None => {
                self.page_start = 0;
                debug!("First image");
                PageMove::First
            }
        }
    }
}

/// Anchored regex equivalent of a file-name wildcard pattern.
pub fn wildcard_regex(pattern: &str) -> Result<Regex> {
    if pattern.is_empty() {
        return Err(ViewerError::InvalidPattern("empty pattern".to_string()));
    }
    if pattern.contains(['/', '\\']) {
        return Err(ViewerError::InvalidPattern(format!(
            "{}: patterns match file names, not paths",
            pattern
        )));
    }

    let mut source = String::from("^");
    for c in pattern.chars() {
        match c {
            '*' => source.push_str(".*"),
            '?' => source.push('.'),
            other => source.push_str(&regex::escape(&other.to_string())),
        }
    }
    source.push('$');

    Regex::new(&source).map_err(|e| ViewerError::InvalidPattern(e.to_string()))
}

fn walk(dir: &Path, matcher: &Regex, out: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| ViewerError::InputReadError(format!("{}: {}", dir.display(), e)))?;

    for entry in entries {
        let entry = entry?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        if entry.file_type()?.is_dir() {
            walk(&path, matcher, out)?;
        } else if matcher.is_match(&name) {
            out.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_scan_is_recursive_and_sorted() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "b.tif");
        touch(dir.path(), "a.tif");
        touch(dir.path(), "nested/deeper/c.tif");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "README");

        let catalog = ImageCatalog::scan(dir.path(), "*.tif").unwrap();

        let names: Vec<_> = catalog
            .paths()
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("a.tif"),
                PathBuf::from("b.tif"),
                PathBuf::from("nested/deeper/c.tif"),
            ]
        );
    }

    #[test]
    fn test_default_pattern_needs_an_extension() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "img.png");
        touch(dir.path(), "README");
        touch(dir.path(), ".hidden.png");

        let catalog = ImageCatalog::scan(dir.path(), "*.*").unwrap();

        assert_eq!(catalog.len(), 1);
        assert!(catalog.get(0).unwrap().ends_with("img.png"));
    }

    #[test]
    fn test_wildcards() {
        let re = wildcard_regex("img_??.tif").unwrap();
        assert!(re.is_match("img_01.tif"));
        assert!(!re.is_match("img_1.tif"));
        assert!(!re.is_match("img_01xtif"));

        assert!(matches!(wildcard_regex(""), Err(ViewerError::InvalidPattern(_))));
        assert!(matches!(wildcard_regex("a/*.tif"), Err(ViewerError::InvalidPattern(_))));
    }

    #[test]
    fn test_missing_dir_is_read_error() {
        let dir = TempDir::new().unwrap();
        let result = ImageCatalog::scan(dir.path().join("missing"), "*.*");
        assert!(matches!(result, Err(ViewerError::InputReadError(_))));
    }

    #[test]
    fn test_paging() {
        let paths = (0..5).map(|i| PathBuf::from(format!("{}.tif", i))).collect();
        let mut catalog = ImageCatalog::from_paths(paths);

        assert_eq!(catalog.page(2).len(), 2);
        assert_eq!(catalog.next_page(2), PageMove::Moved);
        assert_eq!(catalog.next_page(2), PageMove::Moved);
        assert_eq!(catalog.page_start(), 4);
        assert_eq!(catalog.page(2), &[PathBuf::from("4.tif")]);
        assert_eq!(catalog.next_page(2), PageMove::End);
        assert_eq!(catalog.page_start(), 4);

        assert_eq!(catalog.prev_page(3), PageMove::Moved);
        assert_eq!(catalog.page_start(), 1);
        assert_eq!(catalog.prev_page(3), PageMove::First);
        assert_eq!(catalog.page_start(), 0);
    }
}
