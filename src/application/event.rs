use crate::common::error::{Result, ServerError};
use crate::http::headers::{Headers, names as header_names};
use crate::http::method::Method;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::status::StatusCode;
use crate::http::version::Version;
use serde::Serialize;

/// Request event handed to a [`RequestHandler`](crate::application::handler::RequestHandler)
#[derive(Debug, Clone)]
pub struct ApiEvent {
    pub http_method: Method,
    pub path: String,
    pub headers: Headers,
    pub body: Option<String>,
}

impl ApiEvent {
    pub fn new(http_method: Method, path: impl Into<String>) -> Self {
        Self {
            http_method,
            path: path.into(),
            headers: Headers::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.add(name, value);
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Build an event from a parsed wire request. An empty body becomes `None`.
    pub fn from_request(request: Request) -> Result<Self> {
        let path = request.path().to_string();
        let body = if request.body.is_empty() {
            None
        } else {
            Some(String::from_utf8(request.body).map_err(|e| {
                ServerError::ParseError(format!("Request body is not UTF-8: {}", e))
            })?)
        };

        Ok(Self {
            http_method: request.method,
            path,
            headers: request.headers,
            body,
        })
    }
}

/// Response produced by a handler: status, optional text body, headers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: StatusCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub headers: Headers,
}

impl ApiResponse {
    pub fn new(status_code: StatusCode, body: Option<String>, headers: Headers) -> Self {
        Self {
            status_code,
            body,
            headers,
        }
    }

    /// Convert to a wire response. JSON bodies are labelled as such, anything
    /// else goes out as plain text.
    pub fn into_http(self, version: Version) -> Response {
        let mut response = Response::new(version, self.status_code);
        response.headers.merge(&self.headers);

        if let Some(body) = self.body {
            if !response.headers.contains(header_names::CONTENT_TYPE) {
                let is_json = serde_json::from_str::<serde::de::IgnoredAny>(&body).is_ok();
                response.set_content_type(if is_json {
                    "application/json; charset=utf-8"
                } else {
                    "text/plain; charset=utf-8"
                });
            }
            response.set_body(body.into_bytes());
        }

        response
    }
}
