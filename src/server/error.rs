//! Error types for the file server.

use std::net::SocketAddr;

use thiserror::Error;

use crate::parser::Error as ParserError;

/// Errors that can occur during server operation.
#[derive(Debug, Error)]
pub enum Error {
    /// Error parsing the request line.
    #[error("Parse error: {0}")]
    ParseError(#[from] ParserError),

    /// I/O error on an established connection.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The client did not send a request line in time.
    #[error("Timed out reading request line")]
    Timeout,

    /// The configuration file could not be read or decoded.
    #[error("Invalid configuration {path}: {reason}")]
    Config { path: String, reason: String },

    /// The listening socket could not be created.
    #[error("Failed creating socket: {0}")]
    CreateSocket(#[source] std::io::Error),

    /// The listening socket could not be bound.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The bound socket could not be put into listening state.
    #[error("Failed to listen: {0}")]
    Listen(#[source] std::io::Error),
}

impl Error {
    /// Process exit status for a fault that stops the daemon.
    ///
    /// Only startup faults reach `main`; connection-level errors end their own task
    /// and get a code of their own in case one ever surfaces.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::CreateSocket(_) => 1,
            Error::Bind { .. } => 2,
            Error::Listen(_) => 3,
            Error::Config { .. } => 4,
            Error::ParseError(_) | Error::IoError(_) | Error::Timeout => 5,
        }
    }
}
