use borsh::{BorshDeserialize, BorshSerialize};
use visor_primitives::{Hash, SignedBlock, Transaction};

/// The six wire tags this crate registers. Values chosen to
/// interoperate with the existing network are preserved as plain ASCII.
pub const TAG_GET_BLOCKS: [u8; 4] = *b"GETB";
pub const TAG_GIVE_BLOCKS: [u8; 4] = *b"GIVB";
pub const TAG_ANNOUNCE_BLOCKS: [u8; 4] = *b"ANNB";
pub const TAG_GET_TXNS: [u8; 4] = *b"GETT";
pub const TAG_GIVE_TXNS: [u8; 4] = *b"GIVT";
pub const TAG_ANNOUNCE_TXNS: [u8; 4] = *b"ANNT";

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct GetBlocksMessage {
    pub last_block: u64,
    pub requested_blocks: u64,
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct GiveBlocksMessage {
    pub blocks: Vec<SignedBlock>,
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct AnnounceBlocksMessage {
    pub max_bk_seq: u64,
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct GetTxnsMessage {
    pub hashes: Vec<Hash>,
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct GiveTxnsMessage {
    pub txns: Vec<Transaction>,
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct AnnounceTxnsMessage {
    pub hashes: Vec<Hash>,
}

/// The full gossip vocabulary. `Message` does not carry its own source
/// address; the transport hands the source peer alongside the decoded
/// message to whatever dispatches it (see `visor-client`'s
/// `GossipMessage`, which pairs the two for a single handler call).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Message {
    GetBlocks(GetBlocksMessage),
    GiveBlocks(GiveBlocksMessage),
    AnnounceBlocks(AnnounceBlocksMessage),
    GetTxns(GetTxnsMessage),
    GiveTxns(GiveTxnsMessage),
    AnnounceTxns(AnnounceTxnsMessage),
}

impl Message {
    pub fn tag(&self) -> [u8; 4] {
        match self {
            Message::GetBlocks(_) => TAG_GET_BLOCKS,
            Message::GiveBlocks(_) => TAG_GIVE_BLOCKS,
            Message::AnnounceBlocks(_) => TAG_ANNOUNCE_BLOCKS,
            Message::GetTxns(_) => TAG_GET_TXNS,
            Message::GiveTxns(_) => TAG_GIVE_TXNS,
            Message::AnnounceTxns(_) => TAG_ANNOUNCE_TXNS,
        }
    }
}
