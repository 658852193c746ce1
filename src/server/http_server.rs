//! Listening endpoint and accept loop.

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info, warn};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tokio::signal;
use tokio::sync::Semaphore;

use crate::server::config::{ServerConfig, MAX_CONNECTIONS};
use crate::server::error::Error;
use crate::server::handler::RequestHandler;
use crate::server::mime::{ContentProbe, FileCommandProbe};
use crate::server::response::{HttpResponse, StatusCode};

/// How long a rejected client gets to send its request before the 503 goes out.
const REJECT_READ_GRACE: Duration = Duration::from_millis(100);

/// Type alias for a boxed future yielding one accepted connection.
pub type AcceptFuture<'a> =
    Pin<Box<dyn Future<Output = io::Result<(TcpStream, SocketAddr)>> + Send + 'a>>;

/// A source of inbound connections.
pub trait Accept: Send + Sync {
    /// Wait for the next connection.
    fn accept(&self) -> AcceptFuture<'_>;
}

impl Accept for TcpListener {
    fn accept(&self) -> AcceptFuture<'_> {
        Box::pin(TcpListener::accept(self))
    }
}

impl<T: Accept + ?Sized> Accept for Arc<T> {
    fn accept(&self) -> AcceptFuture<'_> {
        Accept::accept(&**self)
    }
}

/// A static file server.
pub struct HttpServer {
    /// The server configuration.
    pub config: Arc<ServerConfig>,
    handler: RequestHandler,
    connections: Arc<Semaphore>,
    connection_limit: usize,
}

impl HttpServer {
    /// Create a new server that probes unknown file types with the `file` command.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_probe(config, Arc::new(FileCommandProbe::default()))
    }

    /// Create a new server with a custom content probe.
    ///
    /// `max_connections` above [`MAX_CONNECTIONS`] is capped to it.
    pub fn with_probe(config: ServerConfig, probe: Arc<dyn ContentProbe>) -> Self {
        let config = Arc::new(config);
        let connection_limit = config.max_connections.min(MAX_CONNECTIONS);
        Self {
            handler: RequestHandler::new(Arc::clone(&config), probe),
            connections: Arc::new(Semaphore::new(connection_limit)),
            connection_limit,
            config,
        }
    }

    /// Create, bind and listen on the configured address.
    ///
    /// Each stage fails with its own error so the caller can exit with a distinct status.
    pub fn bind(&self) -> Result<TcpListener, Error> {
        let addr = self.config.addr;
        let socket = match addr {
            SocketAddr::V4(_) => TcpSocket::new_v4(),
            SocketAddr::V6(_) => TcpSocket::new_v6(),
        }
        .map_err(Error::CreateSocket)?;

        socket
            .bind(addr)
            .map_err(|source| Error::Bind { addr, source })?;

        self.listen(socket)
    }

    /// Put a bound socket into listening state with the configured backlog.
    pub fn listen(&self, socket: TcpSocket) -> Result<TcpListener, Error> {
        let listener = socket.listen(self.config.backlog).map_err(Error::Listen)?;
        if let Ok(addr) = listener.local_addr() {
            info!(
                "Serving {root} on http://{addr}",
                root = self.config.document_root
            );
        }
        Ok(listener)
    }

    /// Bind and serve until Ctrl+C.
    pub async fn start(&self) -> Result<(), Error> {
        let listener = self.bind()?;
        self.serve(listener, async {
            match signal::ctrl_c().await {
                Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown"),
                Err(e) => {
                    error!("Error setting up Ctrl+C handler: {e}");
                    std::future::pending::<()>().await;
                }
            }
        })
        .await;
        Ok(())
    }

    /// Accept connections from `listener` until `shutdown` completes.
    ///
    /// Every connection is handed to its own task. Accept failures are logged and
    /// never end the loop.
    pub async fn serve(&self, listener: impl Accept, shutdown: impl Future<Output = ()>) {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutting down server...");
                    break;
                }

                accept_result = listener.accept() => {
                    match accept_result {
                        Ok((socket, addr)) => self.dispatch(socket, addr),
                        Err(e) => Self::handle_accept_error(e).await,
                    }
                }
            }
        }

        drop(listener);
        self.perform_shutdown().await;
    }

    /// Hand an accepted connection to a new task.
    fn dispatch(&self, mut socket: TcpStream, addr: SocketAddr) {
        debug!("Accepted connection from {addr}");

        // Try to acquire a permit from the semaphore
        let permit = match Arc::clone(&self.connections).try_acquire_owned() {
            Ok(permit) => permit,
            Err(_) => {
                warn!("Connection limit reached, rejecting connection from {addr}");
                tokio::spawn(async move {
                    // Closing with the request unread would reset the connection.
                    let mut discard = [0u8; 1024];
                    let _ =
                        tokio::time::timeout(REJECT_READ_GRACE, socket.read(&mut discard)).await;

                    let response = HttpResponse::status_page(StatusCode::ServiceUnavailable);
                    if let Err(e) = socket.write_all(&response.to_bytes()).await {
                        debug!("Error rejecting {addr}: {e}");
                    }
                    let _ = socket.shutdown().await;
                });
                return;
            }
        };

        let handler = self.handler.clone();
        tokio::spawn(async move {
            // The permit is dropped when the task completes, releasing the semaphore slot
            let _permit = permit;

            if let Err(e) = handler.handle_connection(&mut socket).await {
                error!("Error handling connection from {addr}: {e}");
            }
        });
    }

    async fn handle_accept_error(e: io::Error) {
        error!("Error accepting connection: {e}");

        // Usually descriptor exhaustion; give in-flight connections time to finish.
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    /// Wait for in-flight connections to finish, up to 30 seconds.
    async fn perform_shutdown(&self) {
        let active = self.connection_limit - self.connections.available_permits();
        info!("Waiting for {active} active connections to complete...");

        // connection_limit <= MAX_CONNECTIONS <= u32::MAX
        let all = u32::try_from(self.connection_limit).unwrap_or(u32::MAX);
        let shutdown_timeout = Duration::from_secs(30);
        let drained =
            tokio::time::timeout(shutdown_timeout, self.connections.acquire_many(all)).await;

        match drained {
            Ok(Ok(_all)) => info!("Server shutdown complete"),
            Ok(Err(e)) => error!("Connection tracking failed during shutdown: {e}"),
            Err(_) => warn!("Shutdown timed out with connections still open"),
        }
    }
}
