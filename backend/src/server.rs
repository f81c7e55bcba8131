use crate::game::SharedTable;
use crate::session;
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Failed to bind listener on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
    #[error("Failed to install log subscriber: {0}")]
    Logging(#[from] tracing::subscriber::SetGlobalDefaultError),
}

pub async fn bind(addr: SocketAddr) -> Result<TcpListener, ServerError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })
}

// Seat limits are enforced by the table itself, so a full game is detected and
// rejected inside the spawned session rather than here.
pub async fn serve(listener: TcpListener, table: SharedTable) {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                info!("accepted connection from {}", addr);
                tokio::task::spawn(session::client_connection(
                    stream,
                    addr.to_string(),
                    table.clone(),
                ));
            }
            Err(e) => error!("error accepting client: {}", e),
        }
    }
}
