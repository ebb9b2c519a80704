//! File classification for the editor surface.
//!
//! Maps a file name's extension to a syntax-highlighting mode identifier,
//! or flags it as a raster image that must be fetched as a binary payload.
//! The mapping is a static, enumerated table; unknown extensions fall back
//! to the plain-text mode.

// ─────────────────────────────────────────────────────────────────────────────
// Classification
// ─────────────────────────────────────────────────────────────────────────────

/// The plain-text fallback mode for unknown extensions.
pub const PLAIN_MODE: &str = "";

/// How the editor should treat a file, derived from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Syntax-highlighting mode identifier (empty for plain text)
    pub mode: &'static str,
    /// Whether the file is a raster image rather than editable text
    pub is_image: bool,
}

impl Classification {
    /// The plain-text classification.
    pub fn plain() -> Self {
        Self {
            mode: PLAIN_MODE,
            is_image: false,
        }
    }
}

/// Classify a file name by its extension (everything after the final `.`).
///
/// Always returns a value; files without an extension or with an unknown
/// one get the plain-text classification.
pub fn classify(filename: &str) -> Classification {
    let ext = match filename.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => return Classification::plain(),
    };

    if is_image_extension(&ext) {
        return Classification {
            mode: PLAIN_MODE,
            is_image: true,
        };
    }

    Classification {
        mode: mode_for_extension(&ext),
        is_image: false,
    }
}

/// Look up the syntax mode for a lowercased extension.
fn mode_for_extension(ext: &str) -> &'static str {
    match ext {
        "py" => "python",
        "js" => "javascript",
        "ts" => "typescript",
        "html" | "htm" => "html",
        "css" => "css",
        "json" => "json",
        "yaml" | "yml" => "yaml",
        "xml" => "xml",
        "md" => "markdown",
        "sh" => "shell",
        "sql" => "sql",
        "c" | "h" => "c",
        "cpp" => "cpp",
        "java" => "java",
        "go" => "go",
        _ => PLAIN_MODE,
    }
}

/// Check whether a lowercased extension names a raster image format.
fn is_image_extension(ext: &str) -> bool {
    matches!(ext, "png" | "jpg" | "jpeg" | "gif")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
