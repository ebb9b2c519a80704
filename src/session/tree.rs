//! Lazily loaded mirror of the remote directory hierarchy.
//!
//! The tree session owns every [`TreeNode`] exclusively. Directories start
//! unloaded and are populated only from a confirmed listing; structural
//! mutations (create/rename/delete) are applied here only after the remote
//! service confirmed them, so a failed call never leaves partial state.

use crate::error::{Error, Result};
use crate::highlight;
use crate::paths;
use log::{debug, warn};

// ─────────────────────────────────────────────────────────────────────────────
// Tree Node
// ─────────────────────────────────────────────────────────────────────────────

/// A node in the workspace tree representing a remote file or directory.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Full workspace path of this entry (unique across the tree)
    pub path: String,

    /// Display label: the basename, with a trailing `/` for directories
    pub label: String,

    /// Type of node (file, or directory with lazily loaded children)
    pub kind: TreeNodeKind,

    /// Whether this node is expanded in the presentation layer
    pub is_expanded: bool,
}

/// The kind of tree node.
#[derive(Debug, Clone)]
pub enum TreeNodeKind {
    /// A regular file (always a leaf)
    File,

    /// A directory. `children` is `None` until the first successful
    /// listing; `Some(vec![])` means "loaded, zero children".
    Directory { children: Option<Vec<TreeNode>> },
}

/// Icon classification derived from a node's current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    /// A collapsed directory
    DirectoryClosed,
    /// An expanded directory
    DirectoryOpen,
    /// A raster image file
    Image,
    /// Any other file
    File,
}

impl TreeNode {
    /// Create a new file node.
    pub fn file(path: String) -> Self {
        let label = paths::basename(&path).to_string();
        Self {
            path,
            label,
            kind: TreeNodeKind::File,
            is_expanded: false,
        }
    }

    /// Create a new directory node with unloaded children.
    pub fn directory(path: String) -> Self {
        let label = format!("{}/", paths::basename(&path));
        Self {
            path,
            label,
            kind: TreeNodeKind::Directory { children: None },
            is_expanded: false,
        }
    }

    /// Create a node from a listing entry name (trailing `/` denotes a
    /// directory), placed under the given parent directory.
    pub fn from_entry(parent_path: &str, entry: &str) -> Self {
        if entry.ends_with('/') {
            Self::directory(format!("{}{}", parent_path, entry))
        } else {
            Self::file(format!("{}{}", parent_path, entry))
        }
    }

    /// Check if this node is a directory.
    pub fn is_directory(&self) -> bool {
        matches!(self.kind, TreeNodeKind::Directory { .. })
    }

    /// Check if this node is a leaf (files are leaves, directories are not).
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, TreeNodeKind::File)
    }

    /// Check whether a directory's children have been loaded.
    ///
    /// Always `true` for files (a leaf has nothing left to load).
    pub fn is_loaded(&self) -> bool {
        match &self.kind {
            TreeNodeKind::File => true,
            TreeNodeKind::Directory { children } => children.is_some(),
        }
    }

    /// Get children if this is a loaded directory.
    pub fn children(&self) -> Option<&[TreeNode]> {
        match &self.kind {
            TreeNodeKind::Directory {
                children: Some(children),
            } => Some(children),
            _ => None,
        }
    }

    /// Get mutable children if this is a loaded directory.
    fn children_mut(&mut self) -> Option<&mut Vec<TreeNode>> {
        match &mut self.kind {
            TreeNodeKind::Directory {
                children: Some(children),
            } => Some(children),
            _ => None,
        }
    }

    /// Icon classification for this node in its current state.
    ///
    /// Derived on read from the path and expand flag, so a rename that
    /// changes the extension is reflected without bookkeeping.
    pub fn icon(&self) -> IconKind {
        match &self.kind {
            TreeNodeKind::Directory { .. } => {
                if self.is_expanded {
                    IconKind::DirectoryOpen
                } else {
                    IconKind::DirectoryClosed
                }
            }
            TreeNodeKind::File => {
                if highlight::classify(&self.label).is_image {
                    IconKind::Image
                } else {
                    IconKind::File
                }
            }
        }
    }

    /// Syntax/image classification for this node (files only make sense,
    /// but directories harmlessly classify as plain).
    pub fn classification(&self) -> highlight::Classification {
        highlight::classify(paths::basename(&self.path))
    }

    /// Find a node by path.
    pub fn find(&self, target: &str) -> Option<&TreeNode> {
        if self.path == target {
            return Some(self);
        }

        if let TreeNodeKind::Directory {
            children: Some(children),
        } = &self.kind
        {
            for child in children {
                if let Some(found) = child.find(target) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Find a mutable node by path.
    fn find_mut(&mut self, target: &str) -> Option<&mut TreeNode> {
        if self.path == target {
            return Some(self);
        }

        if let TreeNodeKind::Directory {
            children: Some(children),
        } = &mut self.kind
        {
            for child in children {
                if let Some(found) = child.find_mut(target) {
                    return Some(found);
                }
            }
        }
        None
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tree Session
// ─────────────────────────────────────────────────────────────────────────────

/// The client-side tree of one remote workspace, plus the selection state
/// used for targeting create/rename/delete operations.
#[derive(Debug, Clone)]
pub struct TreeSession {
    root: TreeNode,
    selected: String,
}

impl TreeSession {
    /// Create a session with an unloaded root node. No remote contact.
    pub fn new() -> Self {
        debug!("Tree session initialized at {}", paths::ROOT);
        Self {
            root: TreeNode::directory(paths::ROOT.to_string()),
            selected: paths::ROOT.to_string(),
        }
    }

    /// The root node (`~/`).
    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    /// Find a node by path.
    pub fn find(&self, path: &str) -> Option<&TreeNode> {
        self.root.find(path)
    }

    /// Check whether a directory's children have been loaded.
    pub fn is_loaded(&self, path: &str) -> bool {
        self.find(path).map(|n| n.is_loaded()).unwrap_or(false)
    }

    /// The currently selected path (root when nothing else is selected).
    pub fn selected(&self) -> &str {
        &self.selected
    }

    /// Select a node by path.
    ///
    /// Returns `true` if the node exists and was selected.
    pub fn select(&mut self, path: &str) -> bool {
        if self.find(path).is_some() {
            self.selected = path.to_string();
            true
        } else {
            warn!("Cannot select unknown node: {}", path);
            false
        }
    }

    /// Set a directory's expand flag without touching its children.
    ///
    /// Returns `true` if the node exists and is a directory.
    pub fn set_expanded(&mut self, path: &str, expanded: bool) -> bool {
        match self.root.find_mut(path) {
            Some(node) if node.is_directory() => {
                node.is_expanded = expanded;
                true
            }
            _ => false,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Confirmed-Mutation Appliers
    // ─────────────────────────────────────────────────────────────────────────

    /// Store a confirmed listing as a directory's children and mark the
    /// directory expanded.
    ///
    /// Population is atomic: this is only called after a successful remote
    /// listing, so a failed load leaves the directory unloaded and
    /// retryable with no partial children.
    pub fn apply_children(&mut self, directory: &str, entries: &[String]) -> Result<()> {
        let node = self
            .root
            .find_mut(directory)
            .ok_or_else(|| Error::invalid_path(directory, "no such directory in tree"))?;
        if !node.is_directory() {
            return Err(Error::invalid_path(directory, "not a directory"));
        }

        let children: Vec<TreeNode> = entries
            .iter()
            .map(|entry| TreeNode::from_entry(directory, entry))
            .collect();
        debug!("Loaded {} entries under {}", children.len(), directory);

        node.kind = TreeNodeKind::Directory {
            children: Some(children),
        };
        node.is_expanded = true;
        Ok(())
    }

    /// Append a confirmed new entry under a loaded directory.
    ///
    /// Returns the new node's full path.
    pub fn apply_create(
        &mut self,
        parent: &str,
        name: &str,
        as_directory: bool,
    ) -> Result<String> {
        let new_path = paths::join(parent, name, as_directory);
        let parent_node = self
            .root
            .find_mut(parent)
            .ok_or_else(|| Error::invalid_path(parent, "no such directory in tree"))?;
        let children = parent_node
            .children_mut()
            .ok_or_else(|| Error::invalid_path(parent, "directory is not loaded"))?;

        let entry = if as_directory {
            format!("{}/", name)
        } else {
            name.to_string()
        };
        children.push(TreeNode::from_entry(parent, &entry));
        debug!("Created tree node {}", new_path);
        Ok(new_path)
    }

    /// Rewrite a node's path and label in place after a confirmed rename.
    ///
    /// Node identity is preserved; descendants of a renamed directory are
    /// NOT rewritten and keep their stale paths until the subtree is
    /// reloaded on the next expansion.
    ///
    /// Returns the `(old_path, new_path)` pair.
    pub fn apply_rename(&mut self, path: &str, new_name: &str) -> Result<(String, String)> {
        let was_directory = paths::is_directory(path);
        let new_path = paths::join(&paths::parent_of(path)?, new_name, was_directory);

        let node = self
            .root
            .find_mut(path)
            .ok_or_else(|| Error::invalid_path(path, "no such node in tree"))?;

        let old_path = std::mem::replace(&mut node.path, new_path.clone());
        node.label = if was_directory {
            format!("{}/", new_name)
        } else {
            new_name.to_string()
        };
        debug!("Renamed tree node {} -> {}", old_path, new_path);

        if self.selected == old_path {
            self.selected = new_path.clone();
        }
        Ok((old_path, new_path))
    }

    /// Remove a node from its parent's children after a confirmed delete.
    ///
    /// Selection falls back to the root when the deleted node (or anything
    /// underneath it) was selected.
    pub fn apply_delete(&mut self, path: &str) -> Result<()> {
        let parent = paths::parent_of(path)?;
        let parent_node = self
            .root
            .find_mut(&parent)
            .ok_or_else(|| Error::invalid_path(path, "parent not present in tree"))?;
        let children = parent_node
            .children_mut()
            .ok_or_else(|| Error::invalid_path(path, "parent is not loaded"))?;

        let before = children.len();
        children.retain(|c| c.path != path);
        if children.len() == before {
            return Err(Error::invalid_path(path, "no such node in tree"));
        }
        debug!("Deleted tree node {}", path);

        let selected_was_inside =
            paths::is_directory(path) && self.selected.starts_with(path);
        if self.selected == path || selected_was_inside {
            self.selected = paths::ROOT.to_string();
        }
        Ok(())
    }
}

impl Default for TreeSession {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded_session() -> TreeSession {
        let mut tree = TreeSession::new();
        tree.apply_children(
            "~/",
            &["src/".to_string(), "README.md".to_string()],
        )
        .unwrap();
        tree.apply_children(
            "~/src/",
            &["main.py".to_string(), "logo.png".to_string()],
        )
        .unwrap();
        tree
    }

    #[test]
    fn test_new_session_has_unloaded_root() {
        let tree = TreeSession::new();
        assert_eq!(tree.root().path, "~/");
        assert_eq!(tree.root().label, "~/");
        assert!(!tree.root().is_loaded());
        assert_eq!(tree.selected(), "~/");
    }

    #[test]
    fn test_apply_children_populates_and_expands() {
        let tree = loaded_session();
        let root = tree.root();
        assert!(root.is_loaded());
        assert!(root.is_expanded);
        assert_eq!(root.children().unwrap().len(), 2);

        let src = tree.find("~/src/").unwrap();
        assert!(src.is_directory());
        assert!(!src.is_leaf());
        assert_eq!(src.label, "src/");

        let file = tree.find("~/README.md").unwrap();
        assert!(file.is_leaf());
        assert_eq!(file.label, "README.md");
    }

    #[test]
    fn test_loaded_empty_directory_differs_from_unloaded() {
        let mut tree = TreeSession::new();
        tree.apply_children("~/", &["empty/".to_string()]).unwrap();

        assert!(!tree.is_loaded("~/empty/"));
        tree.apply_children("~/empty/", &[]).unwrap();
        assert!(tree.is_loaded("~/empty/"));
        assert_eq!(tree.find("~/empty/").unwrap().children().unwrap().len(), 0);
    }

    #[test]
    fn test_icons_follow_state() {
        let mut tree = loaded_session();
        assert_eq!(tree.find("~/src/").unwrap().icon(), IconKind::DirectoryOpen);
        tree.set_expanded("~/src/", false);
        assert_eq!(
            tree.find("~/src/").unwrap().icon(),
            IconKind::DirectoryClosed
        );
        assert_eq!(tree.find("~/src/logo.png").unwrap().icon(), IconKind::Image);
        assert_eq!(tree.find("~/src/main.py").unwrap().icon(), IconKind::File);
    }

    #[test]
    fn test_apply_create_appends_child() {
        let mut tree = loaded_session();
        let path = tree.apply_create("~/src/", "notes.txt", false).unwrap();
        assert_eq!(path, "~/src/notes.txt");

        let node = tree.find("~/src/notes.txt").unwrap();
        assert!(node.is_leaf());
        assert_eq!(node.label, "notes.txt");
        assert_eq!(tree.find("~/src/").unwrap().children().unwrap().len(), 3);
    }

    #[test]
    fn test_apply_create_on_unloaded_directory_fails() {
        let mut tree = TreeSession::new();
        tree.apply_children("~/", &["src/".to_string()]).unwrap();
        assert!(tree.apply_create("~/src/", "a.txt", false).is_err());
    }

    #[test]
    fn test_apply_rename_rewrites_in_place() {
        let mut tree = loaded_session();
        let (old, new) = tree.apply_rename("~/src/main.py", "app.py").unwrap();
        assert_eq!(old, "~/src/main.py");
        assert_eq!(new, "~/src/app.py");

        assert!(tree.find("~/src/main.py").is_none());
        let node = tree.find("~/src/app.py").unwrap();
        assert_eq!(node.label, "app.py");
    }

    #[test]
    fn test_apply_rename_changes_classification() {
        let mut tree = loaded_session();
        tree.apply_rename("~/src/main.py", "main.png").unwrap();
        assert_eq!(tree.find("~/src/main.png").unwrap().icon(), IconKind::Image);
    }

    #[test]
    fn test_apply_rename_leaves_descendants_stale() {
        // Documented limitation: descendants keep their old path prefix
        // until the subtree is reloaded on the next expansion.
        let mut tree = loaded_session();
        tree.apply_rename("~/src/", "lib").unwrap();

        let dir = tree.find("~/lib/").unwrap();
        assert_eq!(dir.label, "lib/");
        let stale: Vec<&str> = dir
            .children()
            .unwrap()
            .iter()
            .map(|c| c.path.as_str())
            .collect();
        assert_eq!(stale, vec!["~/src/main.py", "~/src/logo.png"]);
    }

    #[test]
    fn test_apply_delete_removes_node() {
        let mut tree = loaded_session();
        tree.apply_delete("~/src/main.py").unwrap();
        assert!(tree.find("~/src/main.py").is_none());
        assert_eq!(tree.find("~/src/").unwrap().children().unwrap().len(), 1);
    }

    #[test]
    fn test_apply_delete_resets_selection_to_root() {
        let mut tree = loaded_session();
        assert!(tree.select("~/src/main.py"));
        tree.apply_delete("~/src/main.py").unwrap();
        assert_eq!(tree.selected(), "~/");
    }

    #[test]
    fn test_apply_delete_of_unrelated_node_keeps_selection() {
        let mut tree = loaded_session();
        assert!(tree.select("~/README.md"));
        tree.apply_delete("~/src/main.py").unwrap();
        assert_eq!(tree.selected(), "~/README.md");
    }

    #[test]
    fn test_select_unknown_node_fails() {
        let mut tree = loaded_session();
        assert!(!tree.select("~/nope.txt"));
        assert_eq!(tree.selected(), "~/");
    }
}
