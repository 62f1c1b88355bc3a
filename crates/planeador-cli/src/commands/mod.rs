//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `plan` - Load a snapshot, compute and render the plan
//! - `template` - Print a starter snapshot

pub mod plan;
pub mod template;

// Re-export command functions for main.rs
pub use plan::*;
pub use template::*;
