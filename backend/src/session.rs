use crate::client::Sender;
use crate::game::{Seating, SharedTable};
use common::{parse_move, SessionId};
use futures::StreamExt;
use thiserror::Error;
use tokio::io::{self, AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_util::codec::{AnyDelimiterCodec, AnyDelimiterCodecError, FramedRead};
use tracing::{error, info, warn};

// Longest move line accepted before the connection is dropped.
pub const MAX_LINE_LENGTH: usize = 64 * 1024;

// Why a session's read loop stopped. Either way the seat is released.
#[derive(Error, Debug)]
pub enum ConnectionError {
    #[error("peer disconnected")]
    PeerDisconnected,
    #[error("line exceeds the maximum length")]
    LineTooLong,
    #[error("transport error: {0}")]
    Transport(#[from] io::Error),
}

impl From<AnyDelimiterCodecError> for ConnectionError {
    fn from(err: AnyDelimiterCodecError) -> Self {
        match err {
            AnyDelimiterCodecError::MaxChunkLengthExceeded => ConnectionError::LineTooLong,
            AnyDelimiterCodecError::Io(e) => ConnectionError::Transport(e),
        }
    }
}

#[tracing::instrument(skip(stream, table))]
pub async fn client_connection<S>(stream: S, peer: String, table: SharedTable)
where
    S: AsyncRead + AsyncWrite + Send + 'static,
{
    let id = SessionId::new();
    let (client_reader, client_writer) = io::split(stream);
    let (client_sender, client_rcv) = mpsc::unbounded_channel();

    let writer = tokio::task::spawn(write_messages(client_writer, client_rcv, id));

    let rejected = {
        let mut table = table.lock().await;
        match table.seat_client(id, Sender(client_sender)) {
            Seating::Seated(outbox) => {
                outbox.deliver();
                None
            }
            Seating::Rejected(err, outbox) => {
                outbox.deliver();
                Some(err)
            }
        }
    };
    if let Some(err) = rejected {
        info!("rejecting client connected from {}: {}", peer, err);
        // The sink went away with the outbox, so the writer flushes and closes
        if let Err(e) = writer.await {
            error!("writer task for {} failed: {}", peer, e);
        }
        return;
    }
    info!("client {} connected from {}", id, peer);

    match read_moves(client_reader, id, &table).await {
        ConnectionError::PeerDisconnected => {}
        ConnectionError::LineTooLong => {
            warn!("client {} sent a line over {} bytes", id, MAX_LINE_LENGTH)
        }
        ConnectionError::Transport(e) => error!("error reading from client {}: {}", id, e),
    }

    table.lock().await.unseat_client(id).deliver();
    info!("client {} disconnected from {}", id, peer);
}

#[tracing::instrument(skip(reader, table))]
async fn read_moves<R>(reader: R, id: SessionId, table: &SharedTable) -> ConnectionError
where
    R: AsyncRead + Unpin,
{
    let codec =
        AnyDelimiterCodec::new_with_max_length(b"\n".to_vec(), Vec::new(), MAX_LINE_LENGTH);
    let mut lines = FramedRead::new(reader, codec);
    while let Some(line) = lines.next().await {
        let line = match line {
            Ok(line) => line,
            Err(e) => return ConnectionError::from(e),
        };
        let pos = parse_move(&String::from_utf8_lossy(&line));
        table.lock().await.handle_move(id, pos).deliver();
    }
    ConnectionError::PeerDisconnected
}

async fn write_messages<W>(
    mut writer: W,
    client_rcv: mpsc::UnboundedReceiver<String>,
    id: SessionId,
) where
    W: AsyncWrite + Unpin,
{
    let mut client_rcv = UnboundedReceiverStream::new(client_rcv);
    while let Some(msg) = client_rcv.next().await {
        if let Err(e) = writer.write_all(msg.as_bytes()).await {
            error!("error sending msg to client {}: {}", id, e);
            return;
        }
    }
    if let Err(e) = writer.shutdown().await {
        warn!("error closing connection to client {}: {}", id, e);
    }
}
