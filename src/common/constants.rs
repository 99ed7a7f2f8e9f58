pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024; // 1MB
pub const DEFAULT_BUFFER_SIZE: usize = 8192; // 8KB
pub const DEFAULT_MAX_HEADER_SIZE: usize = 8192; // 8KB

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_CONNECTION_STRING: &str = "memory://";
pub const DEFAULT_DATABASE_NAME: &str = "topicd";
pub const DEFAULT_AUTH_COOKIE: &str = "topicd-token";
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const CRLF: &str = "\r\n";
pub const CRLF_BYTES: &[u8] = b"\r\n";

/// Path segment naming the topic resource
pub const TOPIC_RESOURCE: &str = "topic";

/// Deepest accepted path, counted as `/`-separated segments including the
/// empty leading one: `/<prefix>/<prefix>/topic/<id>`
pub const MAX_PATH_SEGMENTS: usize = 5;

pub const ALLOWED_METHODS: &str = "POST,GET,OPTION,PUT,DELETE,OPTION";

pub const SERVER_NAME: &str = concat!("topicd/", env!("CARGO_PKG_VERSION"));
