//! One `actix::Message` per public Visor operation, plus `GossipMessage`
//! which carries a decoded wire message and its source peer into the
//! gossip handlers (see `gossip.rs`).

use actix::Message;
use visor_network::Message as WireMessage;
use visor_primitives::{Hash, SignedBlock, Transaction};

use crate::error::VisorError;

#[derive(Message)]
#[rtype(result = "u64")]
pub struct HeadBkSeq;

#[derive(Message)]
#[rtype(result = "()")]
pub struct RefreshUnconfirmed;

#[derive(Message)]
#[rtype(result = "()")]
pub struct RequestBlocks;

#[derive(Message)]
#[rtype(result = "()")]
pub struct AnnounceBlocks;

#[derive(Message)]
#[rtype(result = "Result<(), VisorError>")]
pub struct RequestBlocksFromAddr(pub String);

#[derive(Message)]
#[rtype(result = "Result<(), VisorError>")]
pub struct ExecuteSignedBlock(pub SignedBlock);

#[derive(Message)]
#[rtype(result = "Vec<SignedBlock>")]
pub struct GetSignedBlocksSince(pub u64, pub u64);

/// Raw pool insert; no fee/structural verification.
#[derive(Message)]
#[rtype(result = "Result<bool, VisorError>")]
pub struct InjectTxn(pub Transaction);

/// Fee check -> structural verify -> pool insert -> broadcast.
#[derive(Message)]
#[rtype(result = "Result<bool, VisorError>")]
pub struct InjectTransaction(pub Transaction);

#[derive(Message)]
#[rtype(result = "()")]
pub struct ResendTransaction(pub Hash);

#[derive(Message)]
#[rtype(result = "Vec<Hash>")]
pub struct ResendUnconfirmedTxns;

#[derive(Message)]
#[rtype(result = "()")]
pub struct SetTxnsAnnounced(pub Vec<Hash>);

#[derive(Message)]
#[rtype(result = "()")]
pub struct BroadcastTransaction(pub Transaction);

#[derive(Message)]
#[rtype(result = "Result<(), VisorError>")]
pub struct CreateAndPublishBlock;

#[derive(Message)]
#[rtype(result = "()")]
pub struct RecordBlockchainLength(pub String, pub u64);

#[derive(Message)]
#[rtype(result = "()")]
pub struct RemoveConnection(pub String);

#[derive(Message)]
#[rtype(result = "u64")]
pub struct EstimateBlockchainLength;

#[derive(Message)]
#[rtype(result = "Vec<Hash>")]
pub struct UnConfirmFilterKnown(pub Vec<Hash>);

#[derive(Message)]
#[rtype(result = "Vec<Transaction>")]
pub struct UnConfirmKnow(pub Vec<Hash>);

/// Read-only snapshot of the peer-height map, for daemon status reporting
/// alongside the height estimator.
#[derive(Message)]
#[rtype(result = "Vec<(String, u64)>")]
pub struct PeerHeightSnapshot;

#[derive(Message)]
#[rtype(result = "()")]
pub struct Shutdown;

/// A decoded gossip message plus the peer address it arrived from. Deliberately
/// non-owning and call-scoped — passed by value into a single handler call
/// and dropped afterwards, never stored, so there's no back-pointer to manage.
#[derive(Message)]
#[rtype(result = "()")]
pub struct GossipMessage {
    pub msg: WireMessage,
    pub source: String,
}
