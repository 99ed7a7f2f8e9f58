use crate::common::constants::SERVER_NAME;
use crate::http::headers::{Headers, names as header_names};
use crate::http::status::StatusCode;
use crate::http::version::Version;

/// HTTP response as written to the wire
#[derive(Debug, Clone)]
pub struct Response {
    pub version: Version,
    pub status: StatusCode,
    pub headers: Headers,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(version: Version, status: StatusCode) -> Self {
        let mut headers = Headers::new();
        headers.set(header_names::SERVER, SERVER_NAME);
        headers.set("Date", http_date(chrono::Utc::now()));

        Self {
            version,
            status,
            headers,
            body: Vec::new(),
        }
    }

    /// Plain-text error response used by the host for protocol failures
    pub fn plain(version: Version, status: StatusCode, message: &str) -> Self {
        let mut response = Self::new(version, status);
        response.set_content_type("text/plain; charset=utf-8");
        response.set_body(message.as_bytes().to_vec());
        response
    }

    pub fn set_content_type(&mut self, content_type: &str) {
        self.headers.set(header_names::CONTENT_TYPE, content_type);
    }

    pub fn set_connection(&mut self, connection: &str) {
        self.headers.set(header_names::CONNECTION, connection);
    }

    /// Set body and keep Content-Length in step
    pub fn set_body(&mut self, body: Vec<u8>) {
        self.body = body;
        self.headers
            .set(header_names::CONTENT_LENGTH, self.body.len().to_string());
    }

    pub fn has_body(&self) -> bool {
        self.status.allows_body() && !self.body.is_empty()
    }
}

/// IMF-fixdate, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`
pub fn http_date(at: chrono::DateTime<chrono::Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
