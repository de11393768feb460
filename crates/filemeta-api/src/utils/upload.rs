//! Multipart parsing for file uploads

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use filemeta_core::{AppError, UploadedFile};

use crate::constants::{FILE_FIELD, OWNER_ID_FIELD};

/// What a multipart upload carried.
#[derive(Debug, Default)]
pub struct MultipartUpload {
    pub file: UploadedFile,
    /// Raw `owner_id` form field, if one was sent
    pub owner_id: Option<String>,
}

/// Read the `file` field and an optional `owner_id` field.
///
/// File contents are streamed through to count their size and then dropped.
/// Only one `file` field is accepted; unknown fields are skipped. A file over
/// `max_size_bytes`, or a body cut off by the request size limit, is rejected
/// as too large.
pub async fn extract_upload(
    mut multipart: Multipart,
    max_size_bytes: usize,
) -> Result<MultipartUpload, AppError> {
    let read_error = |context: &str, err: MultipartError| {
        multipart_error(context, err, max_size_bytes)
    };

    let mut file: Option<UploadedFile> = None;
    let mut owner_id: Option<String> = None;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| read_error("Failed to read multipart", e))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if field_name == FILE_FIELD {
            if file.is_some() {
                return Err(AppError::InvalidInput(
                    "Multiple file fields are not allowed; send exactly one field named 'file'"
                        .to_string(),
                ));
            }

            let file_name = field
                .file_name()
                .map(|s| s.to_string())
                .filter(|s| !s.is_empty());

            let mut size: i64 = 0;
            while let Some(chunk) = field
                .chunk()
                .await
                .map_err(|e| read_error("Failed to read file data", e))?
            {
                size += chunk.len() as i64;
                if size as u64 > max_size_bytes as u64 {
                    return Err(too_large(max_size_bytes));
                }
            }

            file = Some(UploadedFile {
                file_name,
                size: Some(size),
            });
        } else if field_name == OWNER_ID_FIELD {
            let value = field
                .text()
                .await
                .map_err(|e| read_error("Failed to read owner_id", e))?;
            owner_id = Some(value);
        }
    }

    let file = file.ok_or_else(|| AppError::InvalidInput("No file provided".to_string()))?;

    Ok(MultipartUpload { file, owner_id })
}

fn multipart_error(context: &str, err: MultipartError, max_size_bytes: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return too_large(max_size_bytes);
    }
    AppError::InvalidInput(format!("{}: {}", context, err.body_text()))
}

fn too_large(max_size_bytes: usize) -> AppError {
    AppError::PayloadTooLarge(format!(
        "File size exceeds maximum allowed size of {} MB",
        max_size_bytes / 1024 / 1024
    ))
}

/// Resolve the owner from the query string, falling back to the form field.
pub fn resolve_owner_id(
    query: Option<&str>,
    form_field: Option<&str>,
) -> Result<i64, AppError> {
    let raw = query
        .or(form_field)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::InvalidInput("owner_id is required".to_string()))?;

    raw.parse::<i64>().map_err(|_| {
        AppError::InvalidInput(format!("owner_id must be an integer, got '{}'", raw))
    })
}
