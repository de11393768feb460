//! Database repositories for data access layer
//
// Pool construction and migrations
pub mod pool;
//
// File metadata repository
pub mod file;
