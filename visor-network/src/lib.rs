//! Gossip wire messages, frame codec, the connection-registry collaborator
//! trait, and the peer-height map: no actor, no chain or pool state, just
//! the protocol surface other crates program against.

pub mod codec;
pub mod message;
pub mod peer_height;
pub mod pool;
pub mod testing;

pub use codec::{decode_tagged, encode_frame, read_frame_len, CodecError};
pub use message::{
    AnnounceBlocksMessage, AnnounceTxnsMessage, GetBlocksMessage, GetTxnsMessage, GiveBlocksMessage,
    GiveTxnsMessage, Message,
};
pub use peer_height::PeerHeightMap;
pub use pool::{ConnectionPool, PoolSendError};
