//! Route paths and fixed limits.

pub const SERVICE_NAME: &str = "filemeta";

pub const FILE_GET_PATH: &str = "/file/get/{name}";
pub const FILE_POST_PATH: &str = "/file/post/";
pub const OPENAPI_PATH: &str = "/api/openapi.json";

/// Multipart field carrying the uploaded file.
pub const FILE_FIELD: &str = "file";
/// Multipart field that may carry the owner instead of the query string.
pub const OWNER_ID_FIELD: &str = "owner_id";

pub const HEALTH_CHECK_TIMEOUT_SECS: u64 = 5;
