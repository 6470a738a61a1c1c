use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::block::SignedBlock;
use crate::crypto::PublicKey;

/// Static, post-startup configuration. The secret key is deliberately
/// excluded from `Serialize`/`Debug` so it never ends up in a dumped
/// config or a log line; loading it from disk is the surrounding
/// daemon's concern.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Config {
    /// When true, every mutating Visor operation and gossip handler is a
    /// silent no-op.
    #[serde(default)]
    pub disabled: bool,

    #[serde(default = "default_blocks_request_rate_secs")]
    pub blocks_request_rate_secs: u64,
    #[serde(default = "default_blocks_announce_rate_secs")]
    pub blocks_announce_rate_secs: u64,
    /// Max blocks requested/returned per `GetBlocks`/`GiveBlocks` round.
    #[serde(default = "default_blocks_response_count")]
    pub blocks_response_count: u64,
    #[serde(default = "default_blockchain_backup_rate_secs")]
    pub blockchain_backup_rate_secs: u64,
    /// Cadence of `RefreshUnconfirmed`; see DESIGN.md for the chosen default.
    #[serde(default = "default_unconfirmed_refresh_rate_secs")]
    pub unconfirmed_refresh_rate_secs: u64,
    /// Max transactions carried by one `GiveTxns` frame before a warning is
    /// logged. Processing still proceeds past this limit.
    #[serde(default = "default_txns_response_count")]
    pub txns_response_count: usize,

    #[serde(default)]
    pub is_master: bool,
    pub master_pub_key: PublicKey,
    #[serde(skip)]
    pub master_sec_key: Option<std::sync::Arc<crate::crypto::SecretKey>>,

    pub genesis_block: SignedBlock,
}

fn default_blocks_request_rate_secs() -> u64 {
    60
}
fn default_blocks_announce_rate_secs() -> u64 {
    60
}
fn default_blocks_response_count() -> u64 {
    20
}
fn default_blockchain_backup_rate_secs() -> u64 {
    30
}
fn default_unconfirmed_refresh_rate_secs() -> u64 {
    60
}
fn default_txns_response_count() -> usize {
    32
}

impl Config {
    pub fn blocks_request_rate(&self) -> Duration {
        Duration::from_secs(self.blocks_request_rate_secs)
    }
    pub fn blocks_announce_rate(&self) -> Duration {
        Duration::from_secs(self.blocks_announce_rate_secs)
    }
    pub fn blockchain_backup_rate(&self) -> Duration {
        Duration::from_secs(self.blockchain_backup_rate_secs)
    }
    pub fn unconfirmed_refresh_rate(&self) -> Duration {
        Duration::from_secs(self.unconfirmed_refresh_rate_secs)
    }
}
