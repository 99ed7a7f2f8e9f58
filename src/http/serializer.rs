use crate::common::constants::CRLF;
use crate::common::error::{Result, ServerError};
use crate::http::headers::names as header_names;
use crate::http::response::Response;
use std::io::Write;

/// Serialize HTTP responses to bytes
pub struct ResponseSerializer;

impl ResponseSerializer {
    fn write_status_line(buffer: &mut Vec<u8>, response: &Response) -> Result<()> {
        write!(
            buffer,
            "{} {} {}{}",
            response.version,
            response.status,
            response.status.reason_phrase(),
            CRLF
        )
        .map_err(|e| ServerError::HttpError(format!("Failed to write status line: {}", e)))
    }

    pub fn serialize(response: &Response) -> Result<Vec<u8>> {
        let mut buffer = Vec::with_capacity(256 + response.body.len());

        Self::write_status_line(&mut buffer, response)?;

        let allows_body = response.status.allows_body();
        for (name, value) in response.headers.iter() {
            // Content-Length is derived from the body below
            if name.eq_ignore_ascii_case(header_names::CONTENT_LENGTH) {
                continue;
            }
            write!(buffer, "{}: {}{}", name, value, CRLF)
                .map_err(|e| ServerError::HttpError(format!("Failed to write header: {}", e)))?;
        }
        if allows_body {
            write!(
                buffer,
                "{}: {}{}",
                header_names::CONTENT_LENGTH,
                response.body.len(),
                CRLF
            )
            .map_err(|e| ServerError::HttpError(format!("Failed to write header: {}", e)))?;
        }

        buffer.extend_from_slice(CRLF.as_bytes());

        if response.has_body() {
            buffer.extend_from_slice(&response.body);
        }

        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::status::StatusCode;
    use crate::http::version::Version;

    #[test]
    fn test_serialize_with_body() {
        let mut response = Response::new(Version::Http11, StatusCode::OK);
        response.set_content_type("application/json");
        response.set_body(br#"{"id":"a"}"#.to_vec());

        let text = String::from_utf8(ResponseSerializer::serialize(&response).unwrap()).unwrap();
        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("Content-Length: 10\r\n"));
        assert!(text.ends_with("\r\n\r\n{\"id\":\"a\"}"));
    }

    #[test]
    fn test_serialize_no_content() {
        let response = Response::new(Version::Http11, StatusCode::NO_CONTENT);
        let text = String::from_utf8(ResponseSerializer::serialize(&response).unwrap()).unwrap();
        assert!(text.starts_with("HTTP/1.1 204 No Content\r\n"));
        assert!(!text.contains("Content-Length"));
        assert!(text.ends_with("\r\n\r\n"));
    }

    #[test]
    fn test_serialize_empty_error_body() {
        let response = Response::new(Version::Http10, StatusCode::METHOD_NOT_ALLOWED);
        let text = String::from_utf8(ResponseSerializer::serialize(&response).unwrap()).unwrap();
        assert!(text.starts_with("HTTP/1.0 405 Method Not Allowed\r\n"));
        assert!(text.contains("Content-Length: 0\r\n"));
    }
}
