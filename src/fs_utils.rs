//! Filesystem and path helpers
//!
//! This module provides:
//! - `normalize_path`: Strips the Windows `\\?\` prefix from canonicalized paths
//! - `clean_path`: Lexically removes `.` and `..` components
//! - `display_name`: Forward-slash rendering used for record file names
//! - `expand_inputs`: Turns file and directory arguments into source files

use std::path::{Component, Path, PathBuf};

use ignore::WalkBuilder;
use tracing::{debug, warn};

use crate::error::{DocgenError, Result};
use crate::lang::Lang;

/// Normalize Windows paths by removing the `\\?\` prefix if present.
///
/// On Windows, `Path::canonicalize()` returns paths with the extended-length path prefix
/// (`\\?\C:\...`), which breaks comparisons between canonical and user-given paths.
/// This function strips the prefix on Windows while being a no-op on Unix.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use tsdocgen::fs_utils::normalize_path;
///
/// // On Unix, path is returned unchanged
/// let path = PathBuf::from("/home/user/repo");
/// assert_eq!(normalize_path(&path), path);
/// ```
pub fn normalize_path(path: &Path) -> PathBuf {
    #[cfg(windows)]
    {
        let s = path.to_string_lossy();
        // Handle UNC paths: \\?\UNC\server\share -> \\server\share
        if let Some(stripped) = s.strip_prefix(r"\\?\UNC\") {
            return PathBuf::from(format!(r"\\{}", stripped));
        }
        // Handle local paths: \\?\C:\path -> C:\path
        if let Some(stripped) = s.strip_prefix(r"\\?\") {
            return PathBuf::from(stripped);
        }
    }
    path.to_path_buf()
}

/// Remove `.` components and fold `name/..` pairs without touching the disk.
///
/// Leading `..` components of a relative path are kept.
///
/// ```
/// use std::path::{Path, PathBuf};
/// use tsdocgen::fs_utils::clean_path;
///
/// assert_eq!(clean_path(Path::new("src/./lib/../util.ts")), PathBuf::from("src/util.ts"));
/// ```
pub fn clean_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}

/// Identity used to avoid adding one file to a program twice
pub fn file_key(path: &Path) -> PathBuf {
    std::fs::canonicalize(path)
        .map(|p| normalize_path(&p))
        .unwrap_or_else(|_| clean_path(path))
}

/// File name as it appears in output records: cleaned, forward slashes
pub fn display_name(path: &Path) -> String {
    let cleaned = clean_path(path);
    let text = cleaned.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        text.into_owned()
    } else {
        text.replace(std::path::MAIN_SEPARATOR, "/")
    }
}

/// Expand file and directory arguments into the list of program roots.
///
/// Files are taken as given. Directories are walked with gitignore rules
/// applied, keeping supported sources (JavaScript only with `allow_js`),
/// sorted by path, down to `max_depth` levels.
///
/// # Errors
///
/// Returns `DocgenError::FileNotFound` for an argument that does not exist.
pub fn expand_inputs(inputs: &[PathBuf], allow_js: bool, max_depth: usize) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_file() {
            files.push(input.clone());
        } else if input.is_dir() {
            let mut found = walk_sources(input, allow_js, max_depth);
            debug!(dir = %input.display(), files = found.len(), "expanded directory");
            files.append(&mut found);
        } else {
            return Err(DocgenError::FileNotFound {
                path: input.display().to_string(),
            });
        }
    }

    Ok(files)
}

fn walk_sources(root: &Path, allow_js: bool, max_depth: usize) -> Vec<PathBuf> {
    let mut builder = WalkBuilder::new(root);
    builder.max_depth(Some(max_depth));
    builder.follow_links(false);
    builder.hidden(true);
    builder.sort_by_file_path(|a, b| a.cmp(b));

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let path = entry.path();
        match Lang::from_path(path) {
            Ok(lang) if lang.is_javascript() && !allow_js => {}
            Ok(_) => files.push(path.to_path_buf()),
            Err(_) => {}
        }
    }
    files
}
