//! OpenAPI documentation, served at `/api/openapi.json`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use filemeta_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Filemeta API",
        version = "0.1.0",
        description = "Records metadata for uploaded files and looks up storage identifiers by file name."
    ),
    paths(
        handlers::file::get_file,
        handlers::file::post_file,
    ),
    components(
        schemas(
            models::FileMetadataResponse,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "files", description = "File metadata recording and lookup")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_file_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/file/get/{name}"));
        assert!(doc.paths.paths.contains_key("/file/post/"));
    }
}
