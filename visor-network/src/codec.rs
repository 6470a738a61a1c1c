//! Length-prefixed framing for the gossip messages: a `u32`
//! little-endian length, a 4-byte ASCII tag, then a borsh-encoded body.
//! Borsh already length-prefixes `Vec<T>` fields with a `u32` LE count and
//! writes fixed-width integers little-endian, so it satisfies the wire
//! format spec's requirements without any extra bookkeeping here.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::message::{
    AnnounceBlocksMessage, AnnounceTxnsMessage, GetBlocksMessage, GetTxnsMessage, GiveBlocksMessage,
    GiveTxnsMessage, Message, TAG_ANNOUNCE_BLOCKS, TAG_ANNOUNCE_TXNS, TAG_GET_BLOCKS, TAG_GET_TXNS,
    TAG_GIVE_BLOCKS, TAG_GIVE_TXNS,
};

#[derive(thiserror::Error, Debug)]
pub enum CodecError {
    #[error("frame shorter than the 4-byte tag")]
    Truncated,
    #[error("unknown message tag {0:?}")]
    UnknownTag([u8; 4]),
    #[error("borsh decode failed: {0}")]
    Borsh(#[from] std::io::Error),
}

/// Encodes `msg` as a full frame: `u32` length, tag, body.
pub fn encode_frame(msg: &Message) -> Vec<u8> {
    let mut body = Vec::new();
    match msg {
        Message::GetBlocks(m) => borsh::to_writer(&mut body, m),
        Message::GiveBlocks(m) => borsh::to_writer(&mut body, m),
        Message::AnnounceBlocks(m) => borsh::to_writer(&mut body, m),
        Message::GetTxns(m) => borsh::to_writer(&mut body, m),
        Message::GiveTxns(m) => borsh::to_writer(&mut body, m),
        Message::AnnounceTxns(m) => borsh::to_writer(&mut body, m),
    }
    .expect("borsh serialization of gossip messages is infallible");

    let mut frame = Vec::with_capacity(4 + 4 + body.len());
    frame.write_u32::<LittleEndian>((4 + body.len()) as u32).unwrap();
    frame.extend_from_slice(&msg.tag());
    frame.extend_from_slice(&body);
    frame
}

/// Decodes the tag+body portion of a frame (the caller has already stripped
/// the outer `u32` length prefix off the wire, e.g. via a length-delimited
/// codec in the transport layer).
pub fn decode_tagged(mut bytes: &[u8]) -> Result<Message, CodecError> {
    if bytes.len() < 4 {
        return Err(CodecError::Truncated);
    }
    let mut tag = [0u8; 4];
    tag.copy_from_slice(&bytes[..4]);
    bytes = &bytes[4..];

    Ok(match tag {
        TAG_GET_BLOCKS => Message::GetBlocks(GetBlocksMessage::try_from_slice(bytes)?),
        TAG_GIVE_BLOCKS => Message::GiveBlocks(GiveBlocksMessage::try_from_slice(bytes)?),
        TAG_ANNOUNCE_BLOCKS => Message::AnnounceBlocks(AnnounceBlocksMessage::try_from_slice(bytes)?),
        TAG_GET_TXNS => Message::GetTxns(GetTxnsMessage::try_from_slice(bytes)?),
        TAG_GIVE_TXNS => Message::GiveTxns(GiveTxnsMessage::try_from_slice(bytes)?),
        TAG_ANNOUNCE_TXNS => Message::AnnounceTxns(AnnounceTxnsMessage::try_from_slice(bytes)?),
        other => return Err(CodecError::UnknownTag(other)),
    })
}

/// Reads the `u32` LE length prefix from the front of `bytes`, if a full
/// prefix is present.
pub fn read_frame_len(mut bytes: &[u8]) -> Option<u32> {
    bytes.read_u32::<LittleEndian>().ok()
}

use borsh::BorshDeserialize;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_announce_blocks() {
        let msg = Message::AnnounceBlocks(AnnounceBlocksMessage { max_bk_seq: 42 });
        let frame = encode_frame(&msg);
        let len = read_frame_len(&frame).unwrap() as usize;
        assert_eq!(len, frame.len() - 4);
        let decoded = decode_tagged(&frame[4..]).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn round_trips_get_blocks() {
        let msg = Message::GetBlocks(GetBlocksMessage { last_block: 7, requested_blocks: 20 });
        let frame = encode_frame(&msg);
        let decoded = decode_tagged(&frame[4..]).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let mut frame = Vec::new();
        frame.extend_from_slice(b"ZZZZ");
        assert!(matches!(decode_tagged(&frame), Err(CodecError::UnknownTag(_))));
    }
}
