use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// HTTP/1.x protocol version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Version {
    Http10,
    #[default]
    Http11,
}

impl Version {
    /// Whether connections stay open when the client sends no `Connection` header
    pub fn keep_alive_by_default(&self) -> bool {
        matches!(self, Version::Http11)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Version::Http10 => f.write_str("HTTP/1.0"),
            Version::Http11 => f.write_str("HTTP/1.1"),
        }
    }
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HTTP/1.0" => Ok(Version::Http10),
            "HTTP/1.1" => Ok(Version::Http11),
            _ => Err(VersionParseError::Unsupported(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum VersionParseError {
    #[error("Unsupported HTTP version: {0}")]
    Unsupported(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parsing() {
        assert_eq!(Version::from_str("HTTP/1.1").unwrap(), Version::Http11);
        assert_eq!(Version::from_str("HTTP/1.0").unwrap(), Version::Http10);
        assert!(Version::from_str("HTTP/2.0").is_err());
    }

    #[test]
    fn test_keep_alive_default() {
        assert!(Version::Http11.keep_alive_by_default());
        assert!(!Version::Http10.keep_alive_by_default());
        assert_eq!(Version::Http10.to_string(), "HTTP/1.0");
    }
}
