//! Recursive source file discovery.

use crate::config::Config;
use glob::Pattern;
use std::path::{Path, PathBuf, MAIN_SEPARATOR_STR};
use walkdir::WalkDir;

/// Decides which entries of the tree are visited and kept.
#[derive(Debug, Clone)]
pub struct FileFilter {
    extensions: Vec<String>,
    exclude_extensions: Vec<String>,
    ignore: Vec<String>,
    ignore_globs: Vec<Pattern>,
}

/// Entries containing wildcards are also matched as glob patterns.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?') || pattern.contains('[')
}

impl FileFilter {
    pub fn new(extensions: &[String], exclude_extensions: &[String], ignore: &[String]) -> Self {
        let ignore_globs = ignore
            .iter()
            .filter(|p| is_glob_pattern(p))
            .filter_map(|p| Pattern::new(p).ok())
            .collect();
        FileFilter {
            extensions: extensions.to_vec(),
            exclude_extensions: exclude_extensions.to_vec(),
            ignore: ignore.to_vec(),
            ignore_globs,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.extensions, &config.exclude_extensions, &config.ignore)
    }

    /// True when an ignore entry names this entry, equals its path, or
    /// matches a trailing part or a directory run of its path below `root`.
    pub fn is_ignored(&self, path: &Path, root: &Path) -> bool {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        let full = path.to_string_lossy();
        let sep = MAIN_SEPARATOR_STR;
        let below_root = path.strip_prefix(root).unwrap_or(path);
        let anchored = format!("{sep}{}", below_root.to_string_lossy());

        let literal = self.ignore.iter().any(|pattern| {
            name == pattern.as_str()
                || full == pattern.as_str()
                || anchored.ends_with(&format!("{sep}{pattern}"))
                || anchored.contains(&format!("{sep}{pattern}{sep}"))
        });
        literal
            || self
                .ignore_globs
                .iter()
                .any(|glob| glob.matches(&name) || glob.matches_path(below_root))
    }

    /// Suffix match, so `.test.js` can exclude what `.js` includes.
    pub fn accepts_file(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().map(|n| n.to_string_lossy()) else {
            return false;
        };
        self.extensions.iter().any(|ext| name.ends_with(ext.as_str()))
            && !self
                .exclude_extensions
                .iter()
                .any(|ext| name.ends_with(ext.as_str()))
    }
}

/// Every accepted file below `root`, in no particular order.
///
/// Ignored directories are not descended into. Entries that cannot be read
/// are skipped, so a missing or unreadable root yields an empty list.
pub fn walk(root: &Path, filter: &FileFilter) -> Vec<PathBuf> {
    WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !filter.is_ignored(entry.path(), root))
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && filter.accepts_file(entry.path()))
        .map(|entry| entry.into_path())
        .collect()
}
