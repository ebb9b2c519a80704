//! Console settings for the workspace IDE.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Settings
// ─────────────────────────────────────────────────────────────────────────────

/// User preferences for the IDE console.
///
/// Persisted as JSON in the platform config directory. Unknown or missing
/// fields fall back to defaults on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Recently opened workspace identifiers, most recent first
    pub recent_workspaces: Vec<String>,

    /// Entry names the presentation layer hides from the tree
    pub hidden_patterns: Vec<String>,

    /// Whether delete operations require a confirmation dialog
    pub confirm_delete: bool,

    /// Editor font size in points
    pub font_size: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            recent_workspaces: Vec::new(),
            hidden_patterns: Settings::DEFAULT_HIDDEN_PATTERNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            confirm_delete: true,
            font_size: 14.0,
        }
    }
}

impl Settings {
    /// Entry names hidden by default. Workspaces mostly hold Python job
    /// code, so interpreter droppings dominate the list.
    pub const DEFAULT_HIDDEN_PATTERNS: &'static [&'static str] =
        &["__pycache__", ".ipynb_checkpoints", ".git", "*.pyc"];

    /// Maximum number of remembered workspaces.
    pub const MAX_RECENT_WORKSPACES: usize = 10;

    /// Minimum allowed font size.
    pub const MIN_FONT_SIZE: f32 = 8.0;

    /// Maximum allowed font size.
    pub const MAX_FONT_SIZE: f32 = 72.0;

    /// Record a workspace as the most recently opened one.
    ///
    /// Moves an already-known id to the front; the list is capped at
    /// [`Settings::MAX_RECENT_WORKSPACES`].
    pub fn add_recent_workspace(&mut self, workspace: impl Into<String>) {
        let workspace = workspace.into();
        self.recent_workspaces.retain(|w| w != &workspace);
        self.recent_workspaces.insert(0, workspace);
        self.recent_workspaces
            .truncate(Self::MAX_RECENT_WORKSPACES);
    }

    /// Check if an entry name matches a hidden pattern (exact name or a
    /// `*.ext` suffix wildcard).
    pub fn is_hidden(&self, name: &str) -> bool {
        for pattern in &self.hidden_patterns {
            if pattern == name {
                return true;
            }
            if let Some(suffix) = pattern.strip_prefix('*') {
                if name.ends_with(suffix) {
                    return true;
                }
            }
        }
        false
    }

    /// Clamp out-of-range values and trim oversized lists.
    pub fn sanitize(&mut self) {
        self.font_size = self
            .font_size
            .clamp(Self::MIN_FONT_SIZE, Self::MAX_FONT_SIZE);
        self.recent_workspaces
            .truncate(Self::MAX_RECENT_WORKSPACES);
    }

    /// Load settings from JSON and sanitize them to ensure validity.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
