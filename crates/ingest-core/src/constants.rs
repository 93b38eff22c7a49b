/// Page size used when a caller omits `pageSize` or sends a non-positive value.
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Upper bound for a single listing page.
pub const MAX_PAGE_SIZE: i64 = 1000;

/// Prefix under which every blob key is generated.
pub const BLOB_KEY_PREFIX: &str = "files";

/// Content type recorded when the client does not send one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Shared-secret header checked by the API key middleware.
pub const API_KEY_HEADER: &str = "X-API-KEY";
