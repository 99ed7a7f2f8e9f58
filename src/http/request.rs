use crate::http::headers::{Headers, names as header_names};
use crate::http::method::Method;
use crate::http::version::Version;

/// HTTP request as read off the wire
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,

    /// Request target (path + query string)
    pub target: String,

    pub version: Version,

    pub headers: Headers,

    pub body: Vec<u8>,
}

impl Request {
    pub fn new(method: Method, target: impl Into<String>, version: Version) -> Self {
        Self {
            method,
            target: target.into(),
            version,
            headers: Headers::new(),
            body: Vec::new(),
        }
    }

    /// Path part of the target, without query string
    pub fn path(&self) -> &str {
        match self.target.split_once('?') {
            Some((path, _)) => path,
            None => &self.target,
        }
    }

    pub fn content_length(&self) -> Option<usize> {
        self.headers
            .get(header_names::CONTENT_LENGTH)
            .and_then(|v| v.trim().parse().ok())
    }

    pub fn is_chunked(&self) -> bool {
        self.headers
            .get(header_names::TRANSFER_ENCODING)
            .map(|v| v.eq_ignore_ascii_case("chunked"))
            .unwrap_or(false)
    }

    /// Check if connection should be kept alive after this request
    pub fn should_keep_alive(&self) -> bool {
        match self.headers.get(header_names::CONNECTION) {
            Some(conn) if conn.eq_ignore_ascii_case("close") => false,
            Some(conn) if conn.eq_ignore_ascii_case("keep-alive") => true,
            _ => self.version.keep_alive_by_default(),
        }
    }
}

/// Decode `%XX` escapes in a path segment.
///
/// Malformed escapes are kept literally; invalid UTF-8 is replaced.
pub fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
            if let Some(byte) = hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                decoded.push(byte);
                i += 3;
                continue;
            }
        }
        decoded.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&decoded).into_owned()
}
