use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::{extract_upload, resolve_owner_id};
use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, Query, State},
    Json,
};
use filemeta_core::FileMetadataResponse;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    owner_id: Option<String>,
}

#[utoipa::path(
    get,
    path = "/file/get/{name}",
    tag = "files",
    params(
        ("name" = String, Path, description = "Exact file name to look up")
    ),
    responses(
        (status = 200, description = "Identifiers of every record with this name, possibly empty", body = Vec<Uuid>),
        (status = 503, description = "Metadata storage unavailable", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_file(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Vec<Uuid>>, HttpAppError> {
    let uuids = state.files.store.get(&name).await?;

    tracing::debug!(count = uuids.len(), "File lookup completed");

    Ok(Json(uuids))
}

#[utoipa::path(
    post,
    path = "/file/post/",
    tag = "files",
    params(
        ("owner_id" = Option<i64>, Query, description = "Owner of the file; may be sent as a form field instead")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Metadata recorded", body = FileMetadataResponse),
        (status = 400, description = "Invalid upload or file name too long", body = ErrorResponse),
        (status = 413, description = "File larger than the upload limit", body = ErrorResponse),
        (status = 503, description = "Metadata storage unavailable", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, query, multipart))]
pub async fn post_file(
    State(state): State<Arc<AppState>>,
    Query(query): Query<OwnerQuery>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<FileMetadataResponse>, HttpAppError> {
    let upload = extract_upload(multipart?, state.config.max_file_size_bytes).await?;
    let owner_id = resolve_owner_id(query.owner_id.as_deref(), upload.owner_id.as_deref())?;

    let metadata = state.files.builder.build(owner_id, &upload.file)?;
    state.files.store.post(&metadata).await?;

    tracing::info!(
        uuid = %metadata.uuid(),
        file_name = %metadata.name(),
        size = metadata.size(),
        owner_id = metadata.owner_id(),
        "File metadata recorded"
    );

    Ok(Json(metadata.into()))
}
