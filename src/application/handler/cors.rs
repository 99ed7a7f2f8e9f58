use crate::common::constants::ALLOWED_METHODS;
use crate::http::headers::{Headers, names as header_names};

/// Computes the CORS headers attached to every response
#[derive(Debug, Clone, Default)]
pub struct CorsPolicy {
    allowed_origins: Vec<String>,
    allow_any: bool,
}

impl CorsPolicy {
    pub fn new(allowed_origins: Vec<String>) -> Self {
        let allow_any = allowed_origins.iter().any(|origin| origin == "*");
        Self {
            allowed_origins,
            allow_any,
        }
    }

    pub fn is_allowed(&self, origin: &str) -> bool {
        self.allow_any || self.allowed_origins.iter().any(|allowed| allowed == origin)
    }

    /// Fixed allow-methods header plus the allow-origin echo when the
    /// request's `Origin` is on the list
    pub fn response_headers(&self, request_headers: &Headers) -> Headers {
        let mut headers = Headers::new();
        headers.set(header_names::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS);
        headers.set(header_names::VARY, header_names::ORIGIN);

        if let Some(origin) = request_headers.get(header_names::ORIGIN) {
            if self.is_allowed(origin) {
                headers.set(header_names::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
                headers.set(header_names::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true");
            }
        }

        headers
    }
}
