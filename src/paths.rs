//! Workspace path utilities.
//!
//! Remote workspace paths are plain strings rooted at `~/`. A trailing `/`
//! marks a directory; anything else is a file. These helpers classify and
//! decompose such paths without touching the remote service.

use crate::error::{Error, Result};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// The root of every workspace hierarchy.
pub const ROOT: &str = "~/";

/// Characters that may not appear in a file or directory name.
pub const FORBIDDEN_NAME_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

// ─────────────────────────────────────────────────────────────────────────────
// Classification & Decomposition
// ─────────────────────────────────────────────────────────────────────────────

/// Check whether a workspace path denotes a directory.
pub fn is_directory(path: &str) -> bool {
    path.ends_with('/')
}

/// Check whether a path is the workspace root.
pub fn is_root(path: &str) -> bool {
    path == ROOT
}

/// Get the parent directory of a workspace path.
///
/// For a file path this is everything up to and including the last `/`;
/// for a directory path the trailing `/` is stripped first.
///
/// # Errors
///
/// Returns `Error::InvalidPath` when called on the root (which has no
/// parent) or on a path with no separator at all.
pub fn parent_of(path: &str) -> Result<String> {
    if is_root(path) {
        return Err(Error::invalid_path(path, "the workspace root has no parent"));
    }

    let trimmed = path.strip_suffix('/').unwrap_or(path);
    match trimmed.rfind('/') {
        Some(idx) => Ok(trimmed[..=idx].to_string()),
        None => Err(Error::invalid_path(path, "no parent separator")),
    }
}

/// Get the last path component (without any trailing separator).
///
/// For `~/src/main.py` this is `main.py`; for `~/src/` it is `src`.
pub fn basename(path: &str) -> &str {
    let trimmed = path.strip_suffix('/').unwrap_or(path);
    match trimmed.rfind('/') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// Compose a child path under a directory.
pub fn join(directory: &str, name: &str, as_directory: bool) -> String {
    if as_directory {
        format!("{}{}/", directory, name)
    } else {
        format!("{}{}", directory, name)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Name Validation
// ─────────────────────────────────────────────────────────────────────────────

/// Validate an entry name before it is sent to the remote service.
///
/// Fails fast on empty names and names containing any forbidden character,
/// so no network round-trip is wasted on a request the server would reject.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid_path(name, "name is empty"));
    }

    if let Some(bad) = name.chars().find(|c| FORBIDDEN_NAME_CHARS.contains(c)) {
        return Err(Error::invalid_path(
            name,
            format!("name contains forbidden character '{}'", bad),
        ));
    }

    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_directory() {
        assert!(is_directory("~/"));
        assert!(is_directory("~/src/"));
        assert!(!is_directory("~/src/main.py"));
        assert!(!is_directory("~/README"));
    }

    #[test]
    fn test_parent_of_file() {
        assert_eq!(parent_of("~/src/main.py").unwrap(), "~/src/");
        assert_eq!(parent_of("~/README").unwrap(), "~/");
    }

    #[test]
    fn test_parent_of_directory() {
        assert_eq!(parent_of("~/src/").unwrap(), "~/");
        assert_eq!(parent_of("~/src/util/").unwrap(), "~/src/");
    }

    #[test]
    fn test_parent_of_root_fails() {
        let err = parent_of(ROOT).unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));
    }

    #[test]
    fn test_basename() {
        assert_eq!(basename("~/src/main.py"), "main.py");
        assert_eq!(basename("~/src/"), "src");
        assert_eq!(basename("~/src/util/"), "util");
        assert_eq!(basename("~/README"), "README");
    }

    #[test]
    fn test_parent_plus_basename_roundtrip() {
        // For directories, parent + basename + "/" reconstructs the path;
        // for files, parent + basename does.
        for dir in ["~/src/", "~/src/util/", "~/docs/"] {
            let rebuilt = format!("{}{}/", parent_of(dir).unwrap(), basename(dir));
            assert_eq!(rebuilt, dir);
        }
        for file in ["~/src/main.py", "~/notes.txt"] {
            let rebuilt = format!("{}{}", parent_of(file).unwrap(), basename(file));
            assert_eq!(rebuilt, file);
        }
    }

    #[test]
    fn test_join() {
        assert_eq!(join("~/", "main.py", false), "~/main.py");
        assert_eq!(join("~/src/", "util", true), "~/src/util/");
    }

    #[test]
    fn test_validate_name_accepts_plain_names() {
        assert!(validate_name("main.py").is_ok());
        assert!(validate_name("data set 1.csv").is_ok());
        assert!(validate_name(".gitignore").is_ok());
    }

    #[test]
    fn test_validate_name_rejects_empty() {
        assert!(validate_name("").is_err());
    }

    #[test]
    fn test_validate_name_rejects_forbidden_characters() {
        for name in [
            "a\\b", "a/b", "a:b", "a*b", "a?b", "a\"b", "a<b", "a>b", "a|b",
        ] {
            assert!(validate_name(name).is_err(), "expected rejection: {}", name);
        }
    }
}
