//! Workspace session orchestration.
//!
//! This module wires the tree session and the editing session to the remote
//! file service in response to user intents:
//! - Lazy tree expansion and structural mutations (create/rename/delete)
//! - File opening, tab switching, saving, and the busy guard serializing
//!   content-affecting operations on the single editor surface
//! - The request queue delivering one remote completion at a time

mod tabs;
mod tree;

pub use tabs::{EditingSession, Tab, TabContent};
pub use tree::{IconKind, TreeNode, TreeNodeKind, TreeSession};

use crate::error::{Error, Result};
use crate::highlight;
use crate::paths;
use crate::remote::RemoteWorkspace;
use log::{debug, info, warn};
use std::collections::VecDeque;
use std::sync::Arc;

// ─────────────────────────────────────────────────────────────────────────────
// Remote Requests & Session Events
// ─────────────────────────────────────────────────────────────────────────────

/// One queued call against the remote file service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteRequest {
    /// List a directory for lazy tree expansion
    ListChildren { directory: String },
    /// Fetch a file's content to open it in a tab
    ReadFile { path: String, binary: bool },
    /// Persist a tab's buffered content
    WriteFile { path: String, content: String },
    /// Create a file or directory under a loaded parent
    CreateEntry {
        parent: String,
        name: String,
        as_directory: bool,
    },
    /// Rename a file or directory
    RenameEntry { path: String, new_name: String },
    /// Delete a file or directory
    DeleteEntry { path: String },
    /// Reset the whole workspace
    ResetWorkspace { purge_all: bool },
}

/// Outcome of one completed remote request, for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A directory listing landed and the tree was populated
    ChildrenLoaded { directory: String },
    /// A file's content landed and its tab is now open and active
    FileOpened { path: String },
    /// A save round-trip completed
    FileSaved { path: String },
    /// A new entry was confirmed and appended to the tree
    EntryCreated { path: String },
    /// An entry was renamed; any open tab was rebound in place
    EntryRenamed { from: String, to: String },
    /// An entry was deleted; an open file tab was closed
    EntryDeleted { path: String },
    /// The workspace was reset remotely; the session should be discarded
    /// and reinitialized by the host
    WorkspaceReset { purge_all: bool },
    /// The remote service rejected the request; local state is unchanged
    OperationFailed {
        request: RemoteRequest,
        message: String,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Busy Guard
// ─────────────────────────────────────────────────────────────────────────────

/// The content-affecting operation currently in flight, if any.
///
/// The editor buffer is a single shared mutable slot; a second concurrent
/// load or save would race on which response populates it last, so content
/// intents are rejected outright while one is pending (never queued).
#[derive(Debug, Clone, PartialEq, Eq)]
enum EditorActivity {
    Idle,
    Busy(PendingEdit),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingEdit {
    Load { path: String },
    Save { path: String },
}

// ─────────────────────────────────────────────────────────────────────────────
// Session Controller
// ─────────────────────────────────────────────────────────────────────────────

/// Orchestrates one workspace session: tree + tabs + remote service.
///
/// All session state lives here; nothing is global. User intents validate
/// and queue remote requests; [`SessionController::pump`] executes exactly
/// one queued request and applies its confirmed mutation, so at most one
/// remote call is outstanding at any moment. Requests always run to
/// completion and apply their effect even if the user navigated away in
/// the meantime (no cancellation).
pub struct SessionController {
    client: Arc<dyn RemoteWorkspace>,
    workspace: String,
    tree: TreeSession,
    tabs: EditingSession,
    activity: EditorActivity,
    queue: VecDeque<RemoteRequest>,
}

impl SessionController {
    /// Create a session for a workspace. No remote contact happens here;
    /// the root stays unloaded until its first expansion.
    pub fn new(client: Arc<dyn RemoteWorkspace>, workspace: impl Into<String>) -> Self {
        let workspace = workspace.into();
        info!("Workspace session started: {}", workspace);
        Self {
            client,
            workspace,
            tree: TreeSession::new(),
            tabs: EditingSession::new(),
            activity: EditorActivity::Idle,
            queue: VecDeque::new(),
        }
    }

    /// The workspace identifier this session is bound to.
    pub fn workspace(&self) -> &str {
        &self.workspace
    }

    /// The tree session (read access).
    pub fn tree(&self) -> &TreeSession {
        &self.tree
    }

    /// The editing session (read access).
    pub fn tabs(&self) -> &EditingSession {
        &self.tabs
    }

    /// Whether a content load or save is in flight.
    pub fn is_busy(&self) -> bool {
        self.activity != EditorActivity::Idle
    }

    /// The path of the in-flight content operation, if any (for "still
    /// loading" notices).
    pub fn busy_path(&self) -> Option<&str> {
        match &self.activity {
            EditorActivity::Idle => None,
            EditorActivity::Busy(PendingEdit::Load { path })
            | EditorActivity::Busy(PendingEdit::Save { path }) => Some(path),
        }
    }

    /// How many remote requests are queued.
    pub fn pending_requests(&self) -> usize {
        self.queue.len()
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.is_busy() {
            return Err(Error::EditorBusy);
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Editor Intents (busy-guarded)
    // ─────────────────────────────────────────────────────────────────────────

    /// Open a file: reuse an existing tab, or queue a content fetch.
    ///
    /// Returns `true` when an existing tab was activated with no remote
    /// call (idempotent reopen), `false` when a load was queued.
    ///
    /// # Errors
    ///
    /// `Error::EditorBusy` while a load or save is in flight;
    /// `Error::InvalidPath` for directory paths.
    pub fn open_file(&mut self, path: &str) -> Result<bool> {
        if paths::is_directory(path) {
            return Err(Error::invalid_path(path, "cannot open a directory"));
        }
        self.ensure_idle()?;

        if self.tabs.contains(path) {
            self.tabs.switch_to(path)?;
            return Ok(true);
        }

        let binary = highlight::classify(paths::basename(path)).is_image;
        self.activity = EditorActivity::Busy(PendingEdit::Load {
            path: path.to_string(),
        });
        self.push_request(RemoteRequest::ReadFile {
            path: path.to_string(),
            binary,
        });
        Ok(false)
    }

    /// Queue a save of a tab's buffered content.
    ///
    /// The buffer is snapshotted at queue time and is never altered by the
    /// save itself, so a failed save loses nothing and can be retried.
    pub fn save(&mut self, path: &str) -> Result<()> {
        self.ensure_idle()?;
        let content = self
            .tabs
            .content(path)
            .ok_or_else(|| Error::UnknownTab {
                path: path.to_string(),
            })?
            .as_str()
            .to_string();

        self.activity = EditorActivity::Busy(PendingEdit::Save {
            path: path.to_string(),
        });
        self.push_request(RemoteRequest::WriteFile {
            path: path.to_string(),
            content,
        });
        Ok(())
    }

    /// Switch the active tab. Rejected while a load or save is in flight.
    pub fn switch_to(&mut self, path: &str) -> Result<()> {
        self.ensure_idle()?;
        self.tabs.switch_to(path)
    }

    /// Close a tab; returns the new active path.
    pub fn close_tab(&mut self, path: &str) -> Result<Option<String>> {
        self.tabs.close(path)
    }

    /// Replace a tab's buffered content (the keystroke path).
    pub fn set_content(&mut self, path: &str, content: String) -> Result<()> {
        self.tabs.set_content(path, content)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Tree Intents (not busy-guarded)
    // ─────────────────────────────────────────────────────────────────────────

    /// Select a tree node as the target for create/rename/delete.
    pub fn select(&mut self, path: &str) -> bool {
        self.tree.select(path)
    }

    /// Expand a directory.
    ///
    /// Already-loaded directories expand from cache with no remote call and
    /// return `true`; otherwise a listing is queued (duplicate pending
    /// listings are coalesced) and `false` is returned.
    pub fn expand(&mut self, path: &str) -> Result<bool> {
        if !paths::is_directory(path) {
            return Err(Error::invalid_path(path, "not a directory"));
        }
        let node = self
            .tree
            .find(path)
            .ok_or_else(|| Error::invalid_path(path, "no such node in tree"))?;

        if node.is_loaded() {
            self.tree.set_expanded(path, true);
            return Ok(true);
        }

        let request = RemoteRequest::ListChildren {
            directory: path.to_string(),
        };
        if !self.queue.contains(&request) {
            self.push_request(request);
        }
        Ok(false)
    }

    /// Collapse a directory; its cached children are kept.
    pub fn collapse(&mut self, path: &str) -> bool {
        self.tree.set_expanded(path, false)
    }

    /// Queue creation of a new entry under a loaded directory.
    ///
    /// The name is validated before anything is queued.
    pub fn create_entry(&mut self, parent: &str, name: &str, as_directory: bool) -> Result<()> {
        paths::validate_name(name)?;
        let parent_node = self
            .tree
            .find(parent)
            .ok_or_else(|| Error::invalid_path(parent, "no such directory in tree"))?;
        if !parent_node.is_directory() {
            return Err(Error::invalid_path(parent, "not a directory"));
        }
        if !parent_node.is_loaded() {
            return Err(Error::invalid_path(parent, "directory is not loaded"));
        }

        self.push_request(RemoteRequest::CreateEntry {
            parent: parent.to_string(),
            name: name.to_string(),
            as_directory,
        });
        Ok(())
    }

    /// Queue a rename of an existing entry.
    pub fn rename_entry(&mut self, path: &str, new_name: &str) -> Result<()> {
        paths::validate_name(new_name)?;
        if paths::is_root(path) {
            return Err(Error::invalid_path(path, "cannot rename the root"));
        }
        if self.tree.find(path).is_none() {
            return Err(Error::invalid_path(path, "no such node in tree"));
        }

        self.push_request(RemoteRequest::RenameEntry {
            path: path.to_string(),
            new_name: new_name.to_string(),
        });
        Ok(())
    }

    /// Queue deletion of an existing entry.
    pub fn delete_entry(&mut self, path: &str) -> Result<()> {
        if paths::is_root(path) {
            return Err(Error::invalid_path(path, "cannot delete the root"));
        }
        if self.tree.find(path).is_none() {
            return Err(Error::invalid_path(path, "no such node in tree"));
        }

        self.push_request(RemoteRequest::DeleteEntry {
            path: path.to_string(),
        });
        Ok(())
    }

    /// Queue a workspace reset. On success the remote hierarchy may have
    /// changed shape entirely, so the host is expected to discard this
    /// session and start a fresh one; local state is not touched here.
    pub fn reset_workspace(&mut self, purge_all: bool) {
        self.push_request(RemoteRequest::ResetWorkspace { purge_all });
    }

    fn push_request(&mut self, request: RemoteRequest) {
        debug!("Queued remote request: {:?}", request);
        self.queue.push_back(request);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Completion Pump
    // ─────────────────────────────────────────────────────────────────────────

    /// Execute the oldest queued request and apply its confirmed mutation.
    ///
    /// Exactly one remote call is performed per invocation; its completion
    /// resumes exactly one continuation. Returns `None` when the queue is
    /// empty. On failure all local state is left as it was before the call
    /// and the error is surfaced in the returned event.
    pub fn pump(&mut self) -> Option<SessionEvent> {
        let request = self.queue.pop_front()?;
        let event = self.execute(request);
        if let SessionEvent::OperationFailed { message, .. } = &event {
            warn!("Remote operation failed: {}", message);
        }
        Some(event)
    }

    /// Pump until the request queue is drained, collecting every event.
    pub fn pump_all(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.pump() {
            events.push(event);
        }
        events
    }

    fn execute(&mut self, request: RemoteRequest) -> SessionEvent {
        match request.clone() {
            RemoteRequest::ReadFile { path, binary } => {
                let result = self.client.read_file(&self.workspace, &path, binary);
                // The guard drops on completion regardless of outcome.
                self.activity = EditorActivity::Idle;
                match result {
                    Ok(payload) => {
                        let content = if binary {
                            TabContent::Binary(payload)
                        } else {
                            TabContent::Text(payload)
                        };
                        self.tabs.open_tab(&path, content);
                        SessionEvent::FileOpened { path }
                    }
                    Err(err) => Self::failure(request, err),
                }
            }

            RemoteRequest::WriteFile { path, content } => {
                let result = self.client.write_file(&self.workspace, &path, &content);
                self.activity = EditorActivity::Idle;
                match result {
                    Ok(()) => {
                        info!("Saved file: {}", path);
                        SessionEvent::FileSaved { path }
                    }
                    Err(err) => Self::failure(request, err),
                }
            }

            RemoteRequest::ListChildren { directory } => {
                match self.client.list_children(&self.workspace, &directory) {
                    Ok(entries) => match self.tree.apply_children(&directory, &entries) {
                        Ok(()) => SessionEvent::ChildrenLoaded { directory },
                        Err(err) => Self::failure(request, err),
                    },
                    Err(err) => Self::failure(request, err),
                }
            }

            RemoteRequest::CreateEntry {
                parent,
                name,
                as_directory,
            } => {
                let path = paths::join(&parent, &name, as_directory);
                let result = if as_directory {
                    self.client.create_directory(&self.workspace, &path)
                } else {
                    self.client.create_file(&self.workspace, &path)
                };
                match result.and_then(|()| self.tree.apply_create(&parent, &name, as_directory)) {
                    Ok(path) => {
                        info!("Created entry: {}", path);
                        SessionEvent::EntryCreated { path }
                    }
                    Err(err) => Self::failure(request, err),
                }
            }

            RemoteRequest::RenameEntry { path, new_name } => {
                let was_directory = paths::is_directory(&path);
                let new_path = match paths::parent_of(&path) {
                    Ok(parent) => paths::join(&parent, &new_name, was_directory),
                    Err(err) => return Self::failure(request, err),
                };

                let result = if was_directory {
                    self.client
                        .rename_directory(&self.workspace, &path, &new_path)
                } else {
                    self.client.rename_file(&self.workspace, &path, &new_path)
                };
                match result.and_then(|()| self.tree.apply_rename(&path, &new_name)) {
                    Ok((from, to)) => {
                        if !was_directory && self.tabs.contains(&from) {
                            // The open tab follows the rename with its
                            // content untouched.
                            if let Err(err) = self.tabs.rename_tab(&from, &to) {
                                warn!("Tab rebind after rename failed: {}", err);
                            }
                        }
                        info!("Renamed entry: {} -> {}", from, to);
                        SessionEvent::EntryRenamed { from, to }
                    }
                    Err(err) => Self::failure(request, err),
                }
            }

            RemoteRequest::DeleteEntry { path } => {
                let result = if paths::is_directory(&path) {
                    self.client.delete_directory(&self.workspace, &path)
                } else {
                    self.client.delete_file(&self.workspace, &path)
                };
                match result.and_then(|()| self.tree.apply_delete(&path)) {
                    Ok(()) => {
                        if self.tabs.contains(&path) {
                            // Deleting an open file closes its tab with the
                            // usual activation transfer.
                            if let Err(err) = self.tabs.close(&path) {
                                warn!("Tab close after delete failed: {}", err);
                            }
                        }
                        info!("Deleted entry: {}", path);
                        SessionEvent::EntryDeleted { path }
                    }
                    Err(err) => Self::failure(request, err),
                }
            }

            RemoteRequest::ResetWorkspace { purge_all } => {
                match self.client.reset_workspace(&self.workspace, purge_all) {
                    Ok(()) => {
                        info!("Workspace reset (purge_all: {})", purge_all);
                        SessionEvent::WorkspaceReset { purge_all }
                    }
                    Err(err) => Self::failure(request, err),
                }
            }
        }
    }

    fn failure(request: RemoteRequest, err: Error) -> SessionEvent {
        SessionEvent::OperationFailed {
            request,
            message: err.to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
