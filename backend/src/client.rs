use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Error, Debug)]
#[error("Error sending message")]
pub struct SendError;

// Output sink of one connection. The receiving end is drained onto the socket
// by that connection's writer task.
#[derive(Debug, Clone)]
pub struct Sender(pub mpsc::UnboundedSender<String>);

pub trait SendMsg {
    fn send(&self, msg: &str) -> Result<(), SendError>;
}

impl SendMsg for Sender {
    fn send(&self, msg: &str) -> Result<(), SendError> {
        self.0.send(msg.to_string()).map_err(|_| SendError)
    }
}
