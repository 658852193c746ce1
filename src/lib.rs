//! A minimal static file HTTP daemon.
//!
//! The daemon answers exactly one `GET` per connection out of a single document root,
//! then closes the connection.
//!
//! # Features
//!
//! - Parse the request line of a connection; headers and body are ignored
//! - Map request paths onto the document root, with a default document for `.../`
//! - Infer content types from a fixed extension table, falling back to a content probe
//! - Frame responses with `Date`, `Connection: close` and `Content-Length` headers
//! - One task per connection, with a connection limit and a request-line deadline
//!
//! # Examples
//!
//! ## Parsing a request line
//!
//! ```
//! use filehttp_rs::{parse_request_line, Method};
//!
//! let request = parse_request_line(b"GET /index.html HTTP/1.1\r\n").unwrap();
//! assert_eq!(request.method, Method::GET);
//! assert_eq!(request.path, "/index.html");
//! ```
//!
//! ## Error handling
//!
//! ```
//! use filehttp_rs::{parse_request_line, ParserError};
//!
//! match parse_request_line(b"GET\r\n") {
//!     Ok(_) => println!("Request parsed successfully"),
//!     Err(ParserError::MalformedRequestLine(line)) => {
//!         println!("Malformed request line: {}", line)
//!     }
//!     Err(err) => println!("Other error: {}", err),
//! }
//! ```
//!
//! ## Framing a response
//!
//! ```
//! use filehttp_rs::{HttpResponse, StatusCode};
//!
//! let bytes = HttpResponse::status_page(StatusCode::NotFound).to_bytes();
//! assert!(bytes.starts_with(b"HTTP/1.1 404 Not Found\r\n"));
//! assert!(bytes.ends_with(b"\r\n\r\nNot Found"));
//! ```
//!
//! ## Serving a directory
//!
//! ```no_run
//! use filehttp_rs::{HttpServer, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), filehttp_rs::ServerError> {
//!     let config = ServerConfig {
//!         document_root: "site".to_string(),
//!         ..ServerConfig::default()
//!     };
//!     HttpServer::new(config).start().await
//! }
//! ```

// Export the parser module
pub mod parser;

// Export the server module
pub mod server;

// Re-export commonly used items for convenience
pub use parser::{Error as ParserError, HttpRequest, Method, parse_request_line};
pub use server::{Error as ServerError, HttpResponse, HttpServer, ServerConfig, StatusCode};
