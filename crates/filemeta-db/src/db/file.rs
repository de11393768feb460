//! File metadata repository: inserts into and queries the `file` table.

use async_trait::async_trait;
use filemeta_core::{AppError, FileMetadata};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Persistence of file metadata records.
///
/// Both operations run a single statement; a failure is reported as
/// [`AppError::Persistence`] with no retry.
#[async_trait]
pub trait FileMetadataStore: Send + Sync {
    /// Insert one row for `metadata`. Equivalent records are not deduplicated.
    async fn post(&self, metadata: &FileMetadata) -> Result<(), AppError>;

    /// Identifiers of every row named `name`, in storage order.
    ///
    /// No match is an empty vector, not an error.
    async fn get(&self, name: &str) -> Result<Vec<Uuid>, AppError>;

    /// Round-trip to the backing store for readiness checks.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Repository for the `file` table.
#[derive(Clone)]
pub struct FileMetadataRepository {
    pool: PgPool,
}

impl FileMetadataRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl FileMetadataStore for FileMetadataRepository {
    #[tracing::instrument(skip(self, metadata), fields(
        db.system = "postgresql",
        db.table = "file",
        db.operation = "insert",
        file.uuid = %metadata.uuid(),
        file.owner_id = metadata.owner_id()
    ))]
    async fn post(&self, metadata: &FileMetadata) -> Result<(), AppError> {
        sqlx::query::<Postgres>(
            r#"
            INSERT INTO file (owner_id, file_name, file_size, uuid, create_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(metadata.owner_id())
        .bind(metadata.name())
        .bind(metadata.size())
        .bind(metadata.uuid())
        .bind(metadata.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                error = ?e,
                file_name = %metadata.name(),
                "Cannot insert file metadata"
            );
            AppError::Persistence(e)
        })?;

        Ok(())
    }

    #[tracing::instrument(skip(self), fields(
        db.system = "postgresql",
        db.table = "file",
        db.operation = "select"
    ))]
    async fn get(&self, name: &str) -> Result<Vec<Uuid>, AppError> {
        let uuids: Vec<Uuid> = sqlx::query_scalar::<Postgres, Uuid>(
            "SELECT uuid FROM file WHERE file_name = $1",
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = ?e, file_name = %name, "Cannot look up file metadata");
            AppError::Persistence(e)
        })?;

        tracing::debug!(matches = uuids.len(), "File metadata lookup complete");
        Ok(uuids)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
