//! Filemeta HTTP API
//!
//! Axum router, handlers, and application setup for the file metadata service.

pub mod api_doc;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
pub mod utils;

pub use state::{AppState, FileState};
