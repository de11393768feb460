//! Filemeta Core Library
//!
//! This crate provides the domain model for uploaded-file metadata, the metadata
//! builder that validates uploads, error types, and configuration shared by the
//! other filemeta crates.

pub mod config;
pub mod error;
pub mod metadata;
pub mod models;

// Re-export commonly used types
pub use config::{Config, DatabaseConfig};
pub use error::{AppError, ErrorMetadata, LogLevel, ValidationError};
pub use metadata::{IdGenerator, MetadataBuilder, NameTimeIdGenerator, MAX_FILE_NAME_LENGTH};
pub use models::{FileMetadata, FileMetadataResponse, UploadedFile};
