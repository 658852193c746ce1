//! Per-connection request handling.

use std::path::Path;
use std::sync::Arc;

use log::{info, warn};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::parser::{parse_request_line, Error as ParserError, HttpRequest};
use crate::server::config::ServerConfig;
use crate::server::error::Error;
use crate::server::mime::{ContentProbe, MimeResolver};
use crate::server::path::PathResolver;
use crate::server::response::{HttpResponse, StatusCode};

/// Serves one request per connection out of the document root.
///
/// Holds no per-connection state, so one handler is shared by every connection task.
#[derive(Clone)]
pub struct RequestHandler {
    paths: PathResolver,
    mime: MimeResolver,
    config: Arc<ServerConfig>,
}

impl RequestHandler {
    pub fn new(config: Arc<ServerConfig>, probe: Arc<dyn ContentProbe>) -> Self {
        Self {
            paths: PathResolver::new(config.document_root.clone(), config.default_document.clone()),
            mime: MimeResolver::new(probe),
            config,
        }
    }

    /// Handle a single connection: read the request line, answer it, close.
    ///
    /// Exactly one response is written on every path that gets as far as writing.
    /// Returns the status that was sent.
    pub async fn handle_connection(
        &self,
        socket: &mut (impl AsyncRead + AsyncWrite + Unpin),
    ) -> Result<StatusCode, Error> {
        let read =
            tokio::time::timeout(self.config.read_timeout(), self.read_request_line(socket)).await;

        let response = match read {
            Ok(Ok(line)) => match parse_request_line(&line) {
                Ok(request) => {
                    let response = self.respond(&request).await;
                    info!(
                        "{method} {path} {version} -> {status}",
                        method = request.method,
                        path = request.path,
                        version = request.version,
                        status = response.status.as_u16()
                    );
                    response
                }
                Err(e) => {
                    warn!("Rejecting request: {e}");
                    HttpResponse::status_page(StatusCode::BadRequest)
                }
            },
            Ok(Err(Error::ParseError(e))) => {
                warn!("Rejecting request: {e}");
                HttpResponse::status_page(StatusCode::BadRequest)
            }
            Ok(Err(e)) => return Err(e),
            Err(_) => {
                warn!("{}", Error::Timeout);
                HttpResponse::status_page(StatusCode::RequestTimeout)
            }
        };

        socket.write_all(&response.to_bytes()).await?;
        socket.flush().await?;
        socket.shutdown().await?;

        Ok(response.status)
    }

    /// Build the response for a parsed request line.
    pub async fn respond(&self, request: &HttpRequest) -> HttpResponse {
        if !request.method.is_retrieval() {
            return HttpResponse::status_page(StatusCode::MethodNotAllowed);
        }

        if self.config.reject_traversal && PathResolver::escapes_root(&request.path) {
            warn!("Refusing path outside document root: {}", request.path);
            return HttpResponse::status_page(StatusCode::NotFound);
        }

        let target = self.paths.resolve(&request.path);
        let file = match open_regular_file(&target).await {
            Some(file) => file,
            None => return HttpResponse::status_page(StatusCode::NotFound),
        };

        let mime_type = self.mime.resolve(&target).await;
        match read_all(file).await {
            Ok(body) => HttpResponse::new(StatusCode::Ok).with_body(body, mime_type),
            Err(e) => {
                warn!("Failed reading {}: {e}", target.display());
                HttpResponse::status_page(StatusCode::InternalServerError)
            }
        }
    }

    /// Read up to and including the first `\n`, bounded by `max_request_line`.
    async fn read_request_line(
        &self,
        socket: &mut (impl AsyncRead + Unpin),
    ) -> Result<Vec<u8>, Error> {
        let limit = self.config.max_request_line;
        let mut reader = BufReader::new(socket).take(limit as u64);
        let mut line = Vec::with_capacity(limit.min(1024));

        reader.read_until(b'\n', &mut line).await?;

        if !line.ends_with(b"\n") && line.len() >= limit {
            return Err(ParserError::RequestLineTooLong(limit).into());
        }
        Ok(line)
    }
}

// Directories open fine on unix but are not servable files.
async fn open_regular_file(target: &Path) -> Option<File> {
    let file = File::open(target).await.ok()?;
    let metadata = file.metadata().await.ok()?;
    if metadata.is_dir() {
        None
    } else {
        Some(file)
    }
}

async fn read_all(mut file: File) -> std::io::Result<Vec<u8>> {
    let len = file.metadata().await.map(|m| m.len() as usize).unwrap_or(0);
    let mut body = Vec::with_capacity(len);
    file.read_to_end(&mut body).await?;
    Ok(body)
}
