//! Configuration module for the nimbus session core
//!
//! This module handles console preferences for the workspace IDE,
//! including serialization/deserialization to/from JSON and persistent
//! storage to platform-specific directories.

mod persistence;
mod settings;

pub use persistence::*;
pub use settings::*;
