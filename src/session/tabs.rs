//! Open-file tab management for the editor surface.
//!
//! The editing session owns every open tab and its content buffer. At most
//! one tab is active at a time; activation mirrors the visible editor
//! surface. Content buffers are mutated in place and persisted explicitly.

use crate::error::{Error, Result};
use crate::paths;
use log::{debug, info};

// ─────────────────────────────────────────────────────────────────────────────
// Tab
// ─────────────────────────────────────────────────────────────────────────────

/// Buffered content of an open tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabContent {
    /// Editable text buffer
    Text(String),
    /// Base64 payload of an image, kept opaque
    Binary(String),
}

impl TabContent {
    /// The raw buffer, regardless of variant.
    pub fn as_str(&self) -> &str {
        match self {
            TabContent::Text(s) | TabContent::Binary(s) => s,
        }
    }
}

/// One file open for editing.
#[derive(Debug, Clone)]
pub struct Tab {
    /// Workspace path this tab is bound to (unique across open tabs)
    pub path: String,

    /// Display label (the path's basename)
    pub label: String,

    /// Buffered content
    pub content: TabContent,
}

impl Tab {
    fn new(path: String, content: TabContent) -> Self {
        let label = paths::basename(&path).to_string();
        Self {
            path,
            label,
            content,
        }
    }

    /// Whether this tab holds a binary payload instead of editable text.
    pub fn is_binary(&self) -> bool {
        matches!(self.content, TabContent::Binary(_))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Editing Session
// ─────────────────────────────────────────────────────────────────────────────

/// The set of currently open tabs plus the active-tab pointer.
#[derive(Debug, Clone, Default)]
pub struct EditingSession {
    tabs: Vec<Tab>,
    active: Option<usize>,
}

impl EditingSession {
    /// Create an empty editing session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of open tabs.
    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    /// Get all tabs in open order (read-only).
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// Get the active tab, if any.
    pub fn active_tab(&self) -> Option<&Tab> {
        self.active.and_then(|idx| self.tabs.get(idx))
    }

    /// Get the active tab's path, if any.
    pub fn active_path(&self) -> Option<&str> {
        self.active_tab().map(|t| t.path.as_str())
    }

    /// Check whether a tab exists for a path.
    pub fn contains(&self, path: &str) -> bool {
        self.find(path).is_some()
    }

    /// Find a tab's index by path.
    fn find(&self, path: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.path == path)
    }

    /// Get a tab's buffered content.
    pub fn content(&self, path: &str) -> Option<&TabContent> {
        self.find(path).map(|idx| &self.tabs[idx].content)
    }

    /// Open a tab with freshly fetched content and make it active.
    ///
    /// If a tab for the path already exists (a late completion racing a
    /// structural change), its buffer is replaced: last response wins.
    pub fn open_tab(&mut self, path: &str, content: TabContent) {
        if let Some(idx) = self.find(path) {
            self.tabs[idx].content = content;
            self.active = Some(idx);
            debug!("Reused existing tab for {}", path);
            return;
        }

        self.tabs.push(Tab::new(path.to_string(), content));
        self.active = Some(self.tabs.len() - 1);
        info!("Opened tab: {}", path);
    }

    /// Switch the active tab.
    ///
    /// Activation only; never touches content or the network.
    pub fn switch_to(&mut self, path: &str) -> Result<()> {
        match self.find(path) {
            Some(idx) => {
                self.active = Some(idx);
                debug!("Switched to tab {}", path);
                Ok(())
            }
            None => Err(Error::UnknownTab {
                path: path.to_string(),
            }),
        }
    }

    /// Replace a tab's buffered content in place.
    ///
    /// This is the sole local-edit mutation path; keystrokes route here.
    pub fn set_content(&mut self, path: &str, content: String) -> Result<()> {
        let idx = self.find(path).ok_or_else(|| Error::UnknownTab {
            path: path.to_string(),
        })?;
        match &mut self.tabs[idx].content {
            TabContent::Text(buffer) | TabContent::Binary(buffer) => *buffer = content,
        }
        Ok(())
    }

    /// Close a tab.
    ///
    /// If it was active, activation moves to the tab immediately following
    /// it in open order, else the one immediately preceding, else none.
    /// Closing a non-active tab never changes the active path.
    ///
    /// Returns the new active path.
    pub fn close(&mut self, path: &str) -> Result<Option<String>> {
        let idx = self.find(path).ok_or_else(|| Error::UnknownTab {
            path: path.to_string(),
        })?;

        self.tabs.remove(idx);
        info!("Closed tab: {}", path);

        self.active = match self.active {
            Some(active) if active == idx => {
                if idx < self.tabs.len() {
                    Some(idx) // the next tab slid into this slot
                } else if idx > 0 {
                    Some(idx - 1)
                } else {
                    None
                }
            }
            Some(active) if active > idx => Some(active - 1),
            other => other,
        };

        Ok(self.active_path().map(|p| p.to_string()))
    }

    /// Rebind a tab to a new path after a confirmed rename.
    ///
    /// The content buffer and activation state are preserved.
    pub fn rename_tab(&mut self, old_path: &str, new_path: &str) -> Result<()> {
        let idx = self.find(old_path).ok_or_else(|| Error::UnknownTab {
            path: old_path.to_string(),
        })?;
        let tab = &mut self.tabs[idx];
        tab.path = new_path.to_string();
        tab.label = paths::basename(new_path).to_string();
        debug!("Rebound tab {} -> {}", old_path, new_path);
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn text(content: &str) -> TabContent {
        TabContent::Text(content.to_string())
    }

    fn session_with(pathnames: &[&str]) -> EditingSession {
        let mut session = EditingSession::new();
        for path in pathnames {
            session.open_tab(path, text("content"));
        }
        session
    }

    #[test]
    fn test_open_tab_appends_and_activates() {
        let mut session = EditingSession::new();
        session.open_tab("~/a.py", text("a"));
        session.open_tab("~/b.py", text("b"));

        assert_eq!(session.tab_count(), 2);
        assert_eq!(session.active_path(), Some("~/b.py"));
        assert_eq!(session.tabs()[0].label, "a.py");
    }

    #[test]
    fn test_open_tab_reuse_replaces_content_and_activates() {
        let mut session = session_with(&["~/a.py", "~/b.py"]);
        session.open_tab("~/a.py", text("fresh"));

        assert_eq!(session.tab_count(), 2);
        assert_eq!(session.active_path(), Some("~/a.py"));
        assert_eq!(session.content("~/a.py").unwrap().as_str(), "fresh");
    }

    #[test]
    fn test_switch_to() {
        let mut session = session_with(&["~/a.py", "~/b.py"]);
        session.switch_to("~/a.py").unwrap();
        assert_eq!(session.active_path(), Some("~/a.py"));

        let err = session.switch_to("~/missing.py").unwrap_err();
        assert!(matches!(err, Error::UnknownTab { .. }));
        assert_eq!(session.active_path(), Some("~/a.py"));
    }

    #[test]
    fn test_set_content_mutates_in_place() {
        let mut session = session_with(&["~/a.py"]);
        session.set_content("~/a.py", "edited".to_string()).unwrap();
        assert_eq!(session.content("~/a.py").unwrap().as_str(), "edited");

        assert!(session.set_content("~/missing.py", String::new()).is_err());
    }

    #[test]
    fn test_close_active_prefers_next_tab() {
        let mut session = session_with(&["~/a.py", "~/b.py", "~/c.py"]);
        session.switch_to("~/b.py").unwrap();

        let new_active = session.close("~/b.py").unwrap();
        assert_eq!(new_active.as_deref(), Some("~/c.py"));
        assert_eq!(session.active_path(), Some("~/c.py"));
    }

    #[test]
    fn test_close_active_falls_back_to_previous() {
        let mut session = session_with(&["~/a.py", "~/b.py"]);
        session.switch_to("~/b.py").unwrap();

        let new_active = session.close("~/b.py").unwrap();
        assert_eq!(new_active.as_deref(), Some("~/a.py"));
    }

    #[test]
    fn test_close_last_tab_leaves_no_active() {
        let mut session = session_with(&["~/a.py"]);
        let new_active = session.close("~/a.py").unwrap();
        assert_eq!(new_active, None);
        assert_eq!(session.tab_count(), 0);
        assert_eq!(session.active_path(), None);
    }

    #[test]
    fn test_close_non_active_keeps_active_path() {
        let mut session = session_with(&["~/a.py", "~/b.py", "~/c.py"]);
        session.switch_to("~/c.py").unwrap();

        session.close("~/a.py").unwrap();
        assert_eq!(session.active_path(), Some("~/c.py"));

        session.close("~/b.py").unwrap();
        assert_eq!(session.active_path(), Some("~/c.py"));
    }

    #[test]
    fn test_close_unknown_tab_fails() {
        let mut session = session_with(&["~/a.py"]);
        assert!(matches!(
            session.close("~/missing.py"),
            Err(Error::UnknownTab { .. })
        ));
    }

    #[test]
    fn test_rename_tab_preserves_content_and_activation() {
        let mut session = session_with(&["~/a.py", "~/b.py"]);
        session.switch_to("~/a.py").unwrap();
        session.set_content("~/a.py", "body".to_string()).unwrap();

        session.rename_tab("~/a.py", "~/renamed.py").unwrap();
        assert!(!session.contains("~/a.py"));
        assert_eq!(session.active_path(), Some("~/renamed.py"));
        assert_eq!(session.content("~/renamed.py").unwrap().as_str(), "body");
        assert_eq!(session.tabs()[0].label, "renamed.py");
    }

    #[test]
    fn test_binary_tab() {
        let mut session = EditingSession::new();
        session.open_tab("~/logo.png", TabContent::Binary("aGVsbG8=".into()));
        assert!(session.active_tab().unwrap().is_binary());
        assert_eq!(session.content("~/logo.png").unwrap().as_str(), "aGVsbG8=");
    }
}
