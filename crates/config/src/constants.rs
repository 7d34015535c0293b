//! Fixed service endpoints and request deadlines
//!
//! These are the values the services document. The config file may point
//! the endpoints elsewhere (staging, a local mock) but never changes the
//! request paths appended to them.

pub const BUGLY_BASE_URL: &str = "https://api.bugly.qq.com";
pub const BUGLY_SYMBOL_UPLOAD_PATH: &str = "/openapi/file/upload/symbol";

pub const PGYER_BASE_URL: &str = "http://www.pgyer.com";
pub const PGYER_UPLOAD_PATH: &str = "/apiv1/app/upload";

/// Deadline for posting a chat message, in seconds
pub const BEARY_CHAT_TIMEOUT_SECS: u64 = 120;
/// Deadline for uploading a symbol file, in seconds
pub const BUGLY_TIMEOUT_SECS: u64 = 300;
/// Deadline for uploading an app package, in seconds
pub const PGYER_TIMEOUT_SECS: u64 = 120;

pub const CONNECT_TIMEOUT_SECS: u64 = 30;
