use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// What the upload mechanism knows about an inbound file.
///
/// The file contents are not part of the handle; only the metadata the
/// transport reported is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub size: Option<i64>,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, size: i64) -> Self {
        Self {
            file_name: Some(file_name.into()),
            size: Some(size),
        }
    }
}

/// Metadata record for one uploaded file.
///
/// Built once per upload by [`crate::MetadataBuilder`] and never modified
/// afterwards, so fields are only exposed through accessors. There is no
/// other way to obtain one; a literal does not compile:
///
/// ```compile_fail
/// let record = filemeta_core::FileMetadata {
///     owner_id: 1,
///     name: "n".repeat(40),
///     size: -5,
///     uuid: uuid::Uuid::nil(),
///     created_at: chrono::Utc::now(),
/// };
/// ```
///
/// and neither does decoding one from JSON:
///
/// ```compile_fail
/// let record: filemeta_core::FileMetadata =
///     serde_json::from_str(r#"{"owner_id":1,"name":"n","size":1}"#).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    owner_id: i64,
    name: String,
    size: i64,
    uuid: Uuid,
    created_at: DateTime<Utc>,
}

impl FileMetadata {
    /// Assemble a record from already-validated parts.
    pub(crate) fn from_parts(
        owner_id: i64,
        name: String,
        size: i64,
        uuid: Uuid,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            owner_id,
            name,
            size,
            uuid,
            created_at,
        }
    }

    pub fn owner_id(&self) -> i64 {
        self.owner_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    /// Storage-system identifier, distinct from the human-readable name.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FileMetadataResponse {
    /// Status code of the store operation (always 200 in a success body)
    pub status: u16,
    pub uuid: Uuid,
    pub name: String,
    pub size: i64,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<FileMetadata> for FileMetadataResponse {
    fn from(metadata: FileMetadata) -> Self {
        FileMetadataResponse {
            status: 200,
            uuid: metadata.uuid,
            name: metadata.name,
            size: metadata.size,
            owner_id: metadata.owner_id,
            created_at: metadata.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_from_metadata() {
        let created_at = Utc::now();
        let uuid = Uuid::new_v4();
        let metadata =
            FileMetadata::from_parts(7, "report.pdf".to_string(), 2048, uuid, created_at);

        let response = FileMetadataResponse::from(metadata);
        assert_eq!(response.status, 200);
        assert_eq!(response.uuid, uuid);
        assert_eq!(response.name, "report.pdf");
        assert_eq!(response.size, 2048);
        assert_eq!(response.owner_id, 7);
        assert_eq!(response.created_at, created_at);
    }

    #[test]
    fn test_response_serializes_uuid_as_string() {
        let uuid = Uuid::new_v4();
        let metadata =
            FileMetadata::from_parts(1, "a.txt".to_string(), 10, uuid, Utc::now());
        let json = serde_json::to_value(FileMetadataResponse::from(metadata)).unwrap();
        assert_eq!(json["uuid"], serde_json::json!(uuid.to_string()));
        assert_eq!(json["status"], serde_json::json!(200));
    }
}
