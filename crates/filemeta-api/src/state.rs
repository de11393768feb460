//! Application state shared by all handlers.

use filemeta_core::{Config, MetadataBuilder};
use filemeta_db::FileMetadataStore;
use std::sync::Arc;

/// Metadata builder and the store records are handed to.
#[derive(Clone)]
pub struct FileState {
    pub store: Arc<dyn FileMetadataStore>,
    pub builder: MetadataBuilder,
}

#[derive(Clone)]
pub struct AppState {
    pub files: FileState,
    pub config: Config,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn FileMetadataStore>,
        builder: MetadataBuilder,
    ) -> Self {
        Self {
            files: FileState { store, builder },
            config,
        }
    }
}
