use serde::{Deserialize, Serialize};
use std::fmt;

/// HTTP status code (100..=599)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct StatusCode(u16);

impl StatusCode {
    pub const OK: StatusCode = StatusCode(200);
    pub const CREATED: StatusCode = StatusCode(201);
    pub const ACCEPTED: StatusCode = StatusCode(202);
    pub const NO_CONTENT: StatusCode = StatusCode(204);
    pub const BAD_REQUEST: StatusCode = StatusCode(400);
    pub const UNAUTHORIZED: StatusCode = StatusCode(401);
    pub const FORBIDDEN: StatusCode = StatusCode(403);
    pub const NOT_FOUND: StatusCode = StatusCode(404);
    pub const METHOD_NOT_ALLOWED: StatusCode = StatusCode(405);
    pub const REQUEST_TIMEOUT: StatusCode = StatusCode(408);
    pub const CONFLICT: StatusCode = StatusCode(409);
    pub const PAYLOAD_TOO_LARGE: StatusCode = StatusCode(413);
    pub const INTERNAL_SERVER_ERROR: StatusCode = StatusCode(500);
    pub const SERVICE_UNAVAILABLE: StatusCode = StatusCode(503);

    pub fn new(code: u16) -> Option<Self> {
        (100..=599).contains(&code).then_some(StatusCode(code))
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.0)
    }

    /// 1xx, 204 and 304 responses never carry a body
    pub fn allows_body(&self) -> bool {
        !(100..200).contains(&self.0) && self.0 != 204 && self.0 != 304
    }

    pub fn reason_phrase(&self) -> &'static str {
        match self.0 {
            200 => "OK",
            201 => "Created",
            202 => "Accepted",
            204 => "No Content",
            304 => "Not Modified",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            408 => "Request Timeout",
            409 => "Conflict",
            413 => "Payload Too Large",
            500 => "Internal Server Error",
            503 => "Service Unavailable",
            _ => "Unknown",
        }
    }
}

impl TryFrom<u16> for StatusCode {
    type Error = String;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        StatusCode::new(code).ok_or_else(|| format!("{} is not a valid HTTP status code", code))
    }
}

impl From<StatusCode> for u16 {
    fn from(status: StatusCode) -> Self {
        status.0
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_range() {
        assert!(StatusCode::new(100).is_some());
        assert!(StatusCode::new(599).is_some());
        assert!(StatusCode::new(99).is_none());
        assert!(StatusCode::new(600).is_none());
    }

    #[test]
    fn test_body_allowed() {
        assert!(StatusCode::OK.allows_body());
        assert!(StatusCode::NOT_FOUND.allows_body());
        assert!(!StatusCode::NO_CONTENT.allows_body());
    }

    #[test]
    fn test_serializes_as_number() {
        assert_eq!(serde_json::to_string(&StatusCode::CREATED).unwrap(), "201");
        let status: StatusCode = serde_json::from_str("409").unwrap();
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(serde_json::from_str::<StatusCode>("700").is_err());
    }

    #[test]
    fn test_reason_phrase() {
        assert_eq!(StatusCode::METHOD_NOT_ALLOWED.reason_phrase(), "Method Not Allowed");
        assert_eq!(StatusCode::new(418).unwrap().reason_phrase(), "Unknown");
    }
}
