use async_trait::async_trait;

use crate::message::Message;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolSendError {
    #[error("no connection to peer {0}")]
    NotConnected(String),
}

/// The `Pool` (connection registry) collaborator: the
/// transport's message send/broadcast surface, consumed abstractly. The
/// core never inspects connections directly, only through this trait.
#[async_trait]
pub trait ConnectionPool: Send + Sync {
    async fn broadcast_message(&self, msg: Message);
    async fn send_message(&self, addr: &str, msg: Message) -> Result<(), PoolSendError>;
    fn is_conn_exist(&self, addr: &str) -> bool;
    fn size(&self) -> usize;
}
