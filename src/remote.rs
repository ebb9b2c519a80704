//! Remote workspace file-service contract.
//!
//! The session core never talks to the network itself; it consumes this
//! trait, which the hosting application implements against the platform's
//! storage HTTP API. All operations are keyed by an opaque workspace
//! identifier supplied by the hosting session.

use crate::error::Result;

// ─────────────────────────────────────────────────────────────────────────────
// Remote Workspace Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Contract for the external file service backing a workspace.
///
/// Directory entries use the workspace path convention: a trailing `/`
/// denotes a directory. Binary reads return the payload base64-encoded;
/// the session core treats that payload as opaque.
///
/// Failures are reported as `Error::Remote` with a human-readable message;
/// the service does not expose structured error codes to this layer.
pub trait RemoteWorkspace: Send + Sync {
    /// List the names of the entries directly under a directory.
    fn list_children(&self, workspace: &str, directory: &str) -> Result<Vec<String>>;

    /// Read a file's content (text, or a base64 payload when `binary`).
    fn read_file(&self, workspace: &str, path: &str, binary: bool) -> Result<String>;

    /// Write a file's content.
    fn write_file(&self, workspace: &str, path: &str, content: &str) -> Result<()>;

    /// Rename a file.
    fn rename_file(&self, workspace: &str, old_path: &str, new_path: &str) -> Result<()>;

    /// Rename a directory.
    fn rename_directory(&self, workspace: &str, old_path: &str, new_path: &str) -> Result<()>;

    /// Create an empty file.
    fn create_file(&self, workspace: &str, path: &str) -> Result<()>;

    /// Create an empty directory.
    fn create_directory(&self, workspace: &str, path: &str) -> Result<()>;

    /// Delete a file.
    fn delete_file(&self, workspace: &str, path: &str) -> Result<()>;

    /// Delete a directory and everything under it.
    fn delete_directory(&self, workspace: &str, path: &str) -> Result<()>;

    /// Reset the workspace to its provisioned state, optionally purging
    /// all user data.
    fn reset_workspace(&self, workspace: &str, purge_all: bool) -> Result<()>;
}

// ─────────────────────────────────────────────────────────────────────────────
// In-Memory Test Double
// ─────────────────────────────────────────────────────────────────────────────
