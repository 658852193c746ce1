//! HTTP response types and framing.

use std::time::SystemTime;

/// Room reserved for the status line and header block when framing.
const HEADER_CAPACITY: usize = 256;

/// HTTP status codes with their standard reason phrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Ok = 200,
    BadRequest = 400,
    NotFound = 404,
    MethodNotAllowed = 405,
    RequestTimeout = 408,
    InternalServerError = 500,
    ServiceUnavailable = 503,
}

impl StatusCode {
    /// Get the numeric code.
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Get the reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::RequestTimeout => "Request Timeout",
            StatusCode::InternalServerError => "Internal Server Error",
            StatusCode::ServiceUnavailable => "Service Unavailable",
        }
    }
}

/// Represents an HTTP response.
///
/// The header set is not stored: it is derived from the body and content type when
/// the response is framed, so it always matches what is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code
    pub status: StatusCode,
    /// The content type of the body, without charset
    pub content_type: String,
    /// The response body
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Create a new HTTP response with the given status code and no body.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            content_type: "text/plain".to_string(),
            body: Vec::new(),
        }
    }

    /// A `text/plain` response whose body is the status's reason phrase.
    pub fn status_page(status: StatusCode) -> Self {
        Self::new(status).with_body(status.reason_phrase(), "text/plain")
    }

    /// Set the response body and its content type.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>, content_type: impl Into<String>) -> Self {
        self.body = body.into();
        self.content_type = content_type.into();
        self
    }

    /// The ordered header set this response is framed with, dated `date`.
    ///
    /// `Date`, `Connection` and `Content-Length` are always present. `Content-Type` and
    /// `X-Content-Type-Options` follow only when the body is non-empty.
    pub fn headers_at(&self, date: SystemTime) -> Vec<(&'static str, String)> {
        let mut headers = vec![
            ("Date", httpdate::fmt_http_date(date)),
            ("Connection", "close".to_string()),
            ("Content-Length", self.body.len().to_string()),
        ];

        if !self.body.is_empty() {
            headers.push(("Content-Type", format!("{};charset=utf-8", self.content_type)));
            headers.push(("X-Content-Type-Options", "nosniff".to_string()));
        }

        headers
    }

    /// Convert the response to bytes, dated now.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_bytes_at(SystemTime::now())
    }

    /// Convert the response to bytes with the given `Date`.
    pub fn to_bytes_at(&self, date: SystemTime) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_CAPACITY + self.body.len());

        // Add the status line
        let status_line = format!(
            "HTTP/1.1 {} {}\r\n",
            self.status.as_u16(),
            self.status.reason_phrase()
        );
        bytes.extend_from_slice(status_line.as_bytes());

        // Add the headers
        for (name, value) in self.headers_at(date) {
            let header_line = format!("{name}: {value}\r\n");
            bytes.extend_from_slice(header_line.as_bytes());
        }

        // Add the empty line that separates headers from body
        bytes.extend_from_slice(b"\r\n");

        // Add the body
        bytes.extend_from_slice(&self.body);

        bytes
    }
}
