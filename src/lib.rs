//! nimbus - Client session core for a cloud workspace IDE
//!
//! This crate models the browser console's editing session against a remote
//! workspace: a lazily loaded file tree, open-file tabs with buffered
//! content, and a session controller that serializes content-affecting
//! remote calls behind a busy guard. The remote file service itself is an
//! external collaborator consumed through the [`remote::RemoteWorkspace`]
//! trait; rendering is left entirely to the hosting presentation layer.

pub mod config;
pub mod error;
pub mod highlight;
pub mod paths;
pub mod remote;
pub mod session;

pub use error::{Error, Result};
pub use session::{RemoteRequest, SessionController, SessionEvent};
