//! Filesystem operations
//!
//! Path helpers and existence probes.

use std::path::{Component, Path, PathBuf};

/// Whether `path` names an existing entry of any type
///
/// Follows symlinks like `stat`; a dangling link does not exist.
pub fn exists(path: &Path) -> bool {
    std::fs::metadata(path).is_ok()
}

/// Make `path` absolute against `base` and clean it lexically
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        clean(path)
    } else {
        clean(&base.join(path))
    }
}

/// Lexically remove `.` components and resolve `..` against preceding ones
///
/// Does not touch the filesystem. `..` directly under the root is dropped.
pub fn clean(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match cleaned.components().next_back() {
                Some(Component::Normal(_)) => {
                    cleaned.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => cleaned.push(".."),
            },
            other => cleaned.push(other.as_os_str()),
        }
    }
    if cleaned.as_os_str().is_empty() {
        cleaned.push(".");
    }
    cleaned
}
