//! Metadata builder: turns an upload into a validated [`FileMetadata`] record.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::models::{FileMetadata, UploadedFile};

/// Default upper bound on file name length, counted in characters.
pub const MAX_FILE_NAME_LENGTH: usize = 30;

/// Namespace for identifiers derived by [`NameTimeIdGenerator`].
const FILE_ID_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2b0e_8a4d_4c3f_9e57_1d2a_b3c4_d5e6);

/// Produces the storage identifier of a file from its name and creation time.
pub trait IdGenerator: Send + Sync {
    fn generate(&self, name: &str, created_at: DateTime<Utc>) -> Uuid;
}

/// UUIDv5 over `"{name}:{created_at}"` with nanosecond precision.
///
/// Same inputs give the same identifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameTimeIdGenerator;

impl IdGenerator for NameTimeIdGenerator {
    fn generate(&self, name: &str, created_at: DateTime<Utc>) -> Uuid {
        let seed = format!(
            "{}:{}",
            name,
            created_at.to_rfc3339_opts(SecondsFormat::Nanos, true)
        );
        Uuid::new_v5(&FILE_ID_NAMESPACE, seed.as_bytes())
    }
}

#[derive(Clone)]
pub struct MetadataBuilder {
    generator: Arc<dyn IdGenerator>,
    max_name_length: usize,
}

impl MetadataBuilder {
    pub fn new(generator: Arc<dyn IdGenerator>) -> Self {
        Self {
            generator,
            max_name_length: MAX_FILE_NAME_LENGTH,
        }
    }

    pub fn with_max_name_length(mut self, max_name_length: usize) -> Self {
        self.max_name_length = max_name_length;
        self
    }

    pub fn max_name_length(&self) -> usize {
        self.max_name_length
    }

    /// Build a record stamped with the current server time.
    pub fn build(
        &self,
        owner_id: i64,
        file: &UploadedFile,
    ) -> Result<FileMetadata, ValidationError> {
        self.build_at(owner_id, file, Utc::now())
    }

    /// Build a record stamped with `created_at`.
    ///
    /// The name is checked before the generator runs; a rejected upload
    /// produces no record and no generator call.
    pub fn build_at(
        &self,
        owner_id: i64,
        file: &UploadedFile,
        created_at: DateTime<Utc>,
    ) -> Result<FileMetadata, ValidationError> {
        let name = file
            .file_name
            .as_deref()
            .ok_or(ValidationError::MissingFileName)?;

        let length = name.chars().count();
        if length > self.max_name_length {
            return Err(ValidationError::FileNameTooLong {
                length,
                max: self.max_name_length,
            });
        }

        let uuid = self.generator.generate(name, created_at);

        Ok(FileMetadata::from_parts(
            owner_id,
            name.to_string(),
            file.size.unwrap_or(0),
            uuid,
            created_at,
        ))
    }
}

impl Default for MetadataBuilder {
    fn default() -> Self {
        Self::new(Arc::new(NameTimeIdGenerator))
    }
}

impl std::fmt::Debug for MetadataBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataBuilder")
            .field("max_name_length", &self.max_name_length)
            .finish_non_exhaustive()
    }
}
