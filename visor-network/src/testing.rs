//! Test doubles for `ConnectionPool`: a plain recording queue instead of a
//! live transport, so gossip-handler tests can assert on exactly what was
//! sent.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::message::Message;
use crate::pool::{ConnectionPool, PoolSendError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Broadcast(Message),
    Direct(String, Message),
}

#[derive(Default)]
pub struct RecordingPool {
    sent: Mutex<Vec<Outbound>>,
    connected: Mutex<Vec<String>>,
}

impl RecordingPool {
    pub fn new() -> Self {
        RecordingPool::default()
    }

    pub fn with_peers(peers: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let pool = RecordingPool::new();
        *pool.connected.lock() = peers.into_iter().map(Into::into).collect();
        pool
    }

    pub fn sent(&self) -> Vec<Outbound> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl ConnectionPool for RecordingPool {
    async fn broadcast_message(&self, msg: Message) {
        self.sent.lock().push(Outbound::Broadcast(msg));
    }

    async fn send_message(&self, addr: &str, msg: Message) -> Result<(), PoolSendError> {
        if !self.is_conn_exist(addr) {
            return Err(PoolSendError::NotConnected(addr.to_string()));
        }
        self.sent.lock().push(Outbound::Direct(addr.to_string(), msg));
        Ok(())
    }

    fn is_conn_exist(&self, addr: &str) -> bool {
        self.connected.lock().iter().any(|p| p == addr)
    }

    fn size(&self) -> usize {
        self.connected.lock().len()
    }
}
