use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// HTTP request method.
///
/// Only the verbs the topic endpoint acts on get their own variant; every
/// other syntactically valid token is carried in `Other` so dispatch can
/// answer it with 405 instead of failing to parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    GET,
    POST,
    PUT,
    DELETE,
    OPTIONS,
    Other(String),
}

impl Method {
    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::OPTIONS => "OPTIONS",
            Method::Other(token) => token,
        }
    }

    /// Check if method is expected to carry a request body
    pub fn allows_body(&self) -> bool {
        matches!(self, Method::POST | Method::PUT)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = MethodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            "DELETE" => Ok(Method::DELETE),
            "OPTIONS" => Ok(Method::OPTIONS),
            "" => Err(MethodParseError::Empty),
            token if token.bytes().all(is_token_byte) => Ok(Method::Other(token.to_string())),
            token => Err(MethodParseError::InvalidToken(token.to_string())),
        }
    }
}

// RFC 9110 tchar
fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}

#[derive(Debug, Clone, Error)]
pub enum MethodParseError {
    #[error("Empty HTTP method")]
    Empty,

    #[error("Invalid HTTP method: {0}")]
    InvalidToken(String),
}
