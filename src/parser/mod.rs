//! HTTP request-line parser.
//!
//! Only the first line of a connection is ever looked at: the method, the path and
//! the protocol version. Headers and bodies are left unread.

mod request;
mod method;
mod error;

// Re-export public items
pub use request::HttpRequest;
pub use method::Method;
pub use error::Error;

// Re-export the parse function
pub use request::parse_request_line;
