//! Static file server.
//!
//! One connection carries one request: the acceptor hands each connection to its own
//! task, the handler reads the request line, maps the path onto the document root,
//! and frames exactly one response before closing.

mod response;
mod config;
mod error;
mod handler;
mod http_server;
mod mime;
mod path;

// Re-export public items
pub use response::{HttpResponse, StatusCode};
pub use config::{ServerConfig, MAX_CONNECTIONS};
pub use error::Error;
pub use handler::RequestHandler;
pub use http_server::{Accept, AcceptFuture, HttpServer};
pub use mime::{
    extension, mime_for_extension, ContentProbe, FileCommandProbe, MimeResolver, NoProbe,
    ProbeFuture, FALLBACK_MIME_TYPE,
};
pub use path::PathResolver;
