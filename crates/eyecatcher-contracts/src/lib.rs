// Public contracts for the Eye Catcher API
// This crate defines the DTOs shared by the server and the participant runner.
// Wire field names are camelCase to match the browser client.

pub mod analytics;
pub mod common;
pub mod result;
pub mod topic;

pub use analytics::*;
pub use common::*;
pub use result::*;
pub use topic::*;
