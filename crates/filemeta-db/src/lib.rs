//! Database access for filemeta
//!
//! Connection pool setup, embedded migrations, and the repository that stores
//! and looks up file metadata rows.

pub mod db;

pub use db::file::{FileMetadataRepository, FileMetadataStore};
pub use db::pool::{connect, connect_options, connect_with_options, MIGRATOR};
