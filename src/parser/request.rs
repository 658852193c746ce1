//! HTTP request-line parsing and representation.

use std::str::FromStr;

use crate::parser::error::Error;
use crate::parser::method::Method;

/// The request line of one connection.
///
/// Built once from the first line the client sends and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// The HTTP method (GET, POST, etc.)
    pub method: Method,
    /// The request path, exactly as sent
    pub path: String,
    /// The protocol version token, exactly as sent
    pub version: String,
}

impl HttpRequest {
    /// Create a new request line.
    pub fn new(method: Method, path: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            version: version.into(),
        }
    }
}

/// Parse a request line from a byte slice.
///
/// The input is the first line of the connection, with or without its `\r\n` or `\n`
/// terminator. It must split on whitespace into exactly three tokens. The path is
/// kept verbatim: no percent-decoding and no normalization.
///
/// # Examples
///
/// ```
/// use filehttp_rs::{parse_request_line, Method};
///
/// let request = parse_request_line(b"GET /index.html HTTP/1.1\r\n").unwrap();
/// assert_eq!(request.method, Method::GET);
/// assert_eq!(request.path, "/index.html");
/// assert_eq!(request.version, "HTTP/1.1");
/// ```
pub fn parse_request_line(input: &[u8]) -> Result<HttpRequest, Error> {
    let line = std::str::from_utf8(input).map_err(|_| Error::InvalidEncoding)?;
    let line = line.trim_end_matches(['\r', '\n']);

    if line.trim().is_empty() {
        return Err(Error::EmptyRequest);
    }

    let mut parts = line.split_whitespace();
    let (Some(method), Some(path), Some(version), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(Error::MalformedRequestLine(line.to_string()));
    };

    Ok(HttpRequest::new(Method::from_str(method)?, path, version))
}
