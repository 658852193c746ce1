//! Error types for the request-line parser.

use thiserror::Error;

/// Errors that can occur while parsing a request line.
#[derive(Debug, Error)]
pub enum Error {
    /// Nothing was received before the peer stopped sending.
    #[error("Empty request")]
    EmptyRequest,

    /// The request line does not hold exactly method, path and version.
    #[error("Malformed request line: {0}")]
    MalformedRequestLine(String),

    /// The request line is not valid UTF-8.
    #[error("Request line is not valid UTF-8")]
    InvalidEncoding,

    /// No line terminator arrived within the configured limit.
    #[error("Request line exceeds {0} bytes")]
    RequestLineTooLong(usize),
}
