use crate::common::buffer::Buffer;
use crate::common::constants::{CRLF_BYTES, DEFAULT_MAX_BODY_SIZE, DEFAULT_MAX_HEADER_SIZE};
use crate::common::error::{Result, ServerError};
use crate::http::headers::{Headers, names as header_names};
use crate::http::method::Method;
use crate::http::request::Request;
use crate::http::version::Version;
use std::str;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    RequestLine,
    Headers,
    Body,
    ChunkedBody,
}

/// Incremental HTTP/1.x request parser.
///
/// Feed bytes with [`add_data`](Self::add_data) and call [`parse`](Self::parse)
/// until it yields a request. After a request is returned the parser starts
/// over on whatever bytes remain, so pipelined requests on a keep-alive
/// connection come out one at a time.
pub struct RequestParser {
    state: ParseState,
    buffer: Buffer,
    request: Option<Request>,
    header_lines: Vec<String>,
    header_bytes: usize,
    expected_body_size: usize,
    chunked_body: Vec<u8>,
    max_header_size: usize,
    max_body_size: usize,
}

impl RequestParser {
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_MAX_HEADER_SIZE, DEFAULT_MAX_BODY_SIZE)
    }

    pub fn with_limits(max_header_size: usize, max_body_size: usize) -> Self {
        Self {
            state: ParseState::RequestLine,
            buffer: Buffer::new(),
            request: None,
            header_lines: Vec::new(),
            header_bytes: 0,
            expected_body_size: 0,
            chunked_body: Vec::new(),
            max_header_size,
            max_body_size,
        }
    }

    pub fn add_data(&mut self, data: &[u8]) {
        self.buffer.extend(data);
    }

    /// True when no partial request is buffered
    pub fn is_idle(&self) -> bool {
        self.state == ParseState::RequestLine && self.buffer.is_empty()
    }

    /// Parse available data; `Ok(None)` means more bytes are needed
    pub fn parse(&mut self) -> Result<Option<Request>> {
        loop {
            match self.state {
                ParseState::RequestLine => match self.take_line()? {
                    // stray CRLF between pipelined requests
                    Some(line) if line.is_empty() => continue,
                    Some(line) => {
                        self.request = Some(parse_request_line(&line)?);
                        self.state = ParseState::Headers;
                    }
                    None => return Ok(None),
                },
                ParseState::Headers => match self.take_line()? {
                    Some(line) if line.is_empty() => self.finish_headers()?,
                    Some(line) => self.header_lines.push(line),
                    None => return Ok(None),
                },
                ParseState::Body => {
                    if self.buffer.len() < self.expected_body_size {
                        return Ok(None);
                    }
                    let body = self.buffer.drain(self.expected_body_size);
                    return self.complete(body).map(Some);
                }
                ParseState::ChunkedBody => {
                    return match self.parse_chunks()? {
                        Some(body) => self.complete(body).map(Some),
                        None => Ok(None),
                    };
                }
            }
        }
    }

    /// Pop one CRLF-terminated line, enforcing the header size limit
    fn take_line(&mut self) -> Result<Option<String>> {
        let Some(crlf_pos) = self.buffer.find(CRLF_BYTES) else {
            if self.header_bytes + self.buffer.len() > self.max_header_size {
                return Err(ServerError::ParseError(
                    "Request header section too large".to_string(),
                ));
            }
            return Ok(None);
        };

        self.header_bytes += crlf_pos + CRLF_BYTES.len();
        if self.header_bytes > self.max_header_size {
            return Err(ServerError::ParseError(
                "Request header section too large".to_string(),
            ));
        }

        let line_bytes = self.buffer.drain(crlf_pos + CRLF_BYTES.len());
        let line = str::from_utf8(&line_bytes[..crlf_pos])
            .map_err(|e| ServerError::ParseError(format!("Invalid UTF-8 in request head: {}", e)))?;
        Ok(Some(line.to_string()))
    }

    fn finish_headers(&mut self) -> Result<()> {
        let headers = Headers::from_lines(&self.header_lines)
            .map_err(|e| ServerError::ParseError(e.to_string()))?;
        self.header_lines.clear();

        let request = self
            .request
            .as_mut()
            .ok_or_else(|| ServerError::ParseError("Headers without request line".to_string()))?;
        request.headers = headers;

        if request.is_chunked() {
            self.state = ParseState::ChunkedBody;
            return Ok(());
        }

        let expected = match request.headers.get(header_names::CONTENT_LENGTH) {
            Some(raw) => request.content_length().ok_or_else(|| {
                ServerError::ParseError(format!("Invalid Content-Length: {}", raw))
            })?,
            None => 0,
        };
        if expected > self.max_body_size {
            return Err(ServerError::PayloadTooLarge(expected, self.max_body_size));
        }

        self.expected_body_size = expected;
        self.state = ParseState::Body;
        Ok(())
    }

    fn parse_chunks(&mut self) -> Result<Option<Vec<u8>>> {
        loop {
            let Some(line_end) = self.buffer.find(CRLF_BYTES) else {
                return Ok(None);
            };
            let data = self.buffer.as_slice();
            let size_line = str::from_utf8(&data[..line_end])
                .map_err(|e| ServerError::ParseError(format!("Invalid UTF-8 in chunk size: {}", e)))?;
            let size_str = size_line.split(';').next().unwrap_or_default().trim();
            let size = usize::from_str_radix(size_str, 16)
                .map_err(|_| ServerError::ParseError(format!("Invalid chunk size: {}", size_str)))?;

            // bound the client's size before any arithmetic on it
            let room = self.max_body_size.saturating_sub(self.chunked_body.len());
            if size > room {
                return Err(ServerError::PayloadTooLarge(
                    self.chunked_body.len().saturating_add(size),
                    self.max_body_size,
                ));
            }

            let data_start = line_end + CRLF_BYTES.len();

            if size == 0 {
                let needed = data_start + CRLF_BYTES.len();
                if data.len() < needed {
                    return Ok(None);
                }
                if &data[data_start..needed] != CRLF_BYTES {
                    return Err(ServerError::ParseError(
                        "Chunked trailers are not supported".to_string(),
                    ));
                }
                self.buffer.drain(needed);
                return Ok(Some(std::mem::take(&mut self.chunked_body)));
            }

            let needed = data_start + size + CRLF_BYTES.len();
            if data.len() < needed {
                return Ok(None);
            }
            if &data[data_start + size..needed] != CRLF_BYTES {
                return Err(ServerError::ParseError("Chunk not terminated by CRLF".to_string()));
            }
            let chunk = data[data_start..data_start + size].to_vec();
            self.buffer.drain(needed);
            self.chunked_body.extend_from_slice(&chunk);
        }
    }

    /// Hand out the finished request and get ready for the next one
    fn complete(&mut self, body: Vec<u8>) -> Result<Request> {
        let mut request = self
            .request
            .take()
            .ok_or_else(|| ServerError::ParseError("Body without request line".to_string()))?;
        request.body = body;

        self.state = ParseState::RequestLine;
        self.header_bytes = 0;
        self.expected_body_size = 0;
        self.chunked_body.clear();
        Ok(request)
    }

}

impl Default for RequestParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse request line: "METHOD /path HTTP/1.1"
fn parse_request_line(line: &str) -> Result<Request> {
    let mut parts = line.split(' ');
    let (Some(method), Some(target)) = (parts.next(), parts.next()) else {
        return Err(ServerError::ParseError(format!("Invalid request line: {}", line)));
    };

    let method = Method::from_str(method).map_err(|e| ServerError::ParseError(e.to_string()))?;

    if !target.starts_with('/') {
        return Err(ServerError::ParseError(format!("Invalid request target: {}", target)));
    }

    let version = match parts.next() {
        Some(v) => Version::from_str(v).map_err(|e| ServerError::ParseError(e.to_string()))?,
        None => Version::Http10,
    };

    if parts.next().is_some() {
        return Err(ServerError::ParseError(format!("Invalid request line: {}", line)));
    }

    Ok(Request::new(method, target, version))
}
