//! The Visor actor: wires the chain, pool,
//! gossip, and height-estimator collaborators together behind a single
//! actix actor and drives the periodic sync triggers.

mod actor;
mod clock;
mod error;
mod gossip;
mod handlers;
mod height;
mod messages;

pub use actor::VisorActor;
pub use clock::{Clock, SystemClock};
pub use error::VisorError;
pub use height::estimate_blockchain_length;
pub use messages::{
    AnnounceBlocks, BroadcastTransaction, CreateAndPublishBlock, EstimateBlockchainLength,
    ExecuteSignedBlock, GetSignedBlocksSince, GossipMessage, HeadBkSeq, InjectTransaction, InjectTxn,
    PeerHeightSnapshot, RecordBlockchainLength, RefreshUnconfirmed, RemoveConnection, RequestBlocks,
    RequestBlocksFromAddr, ResendTransaction, ResendUnconfirmedTxns, SetTxnsAnnounced, Shutdown,
    UnConfirmFilterKnown, UnConfirmKnow,
};

#[cfg(test)]
pub use clock::FixedClock;

#[cfg(test)]
mod tests;
