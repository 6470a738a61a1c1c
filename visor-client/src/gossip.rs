//! `Handler<GossipMessage>` and the six `process_*` methods it dispatches
//! to — one per wire message. These are where the
//! "announce -> request -> give" gossip loop actually lives.

use actix::{Context, Handler, ResponseFuture};
use visor_network::{
    AnnounceBlocksMessage, AnnounceTxnsMessage, GetBlocksMessage, GetTxnsMessage, GiveBlocksMessage,
    GiveTxnsMessage, Message as WireMessage,
};
use visor_primitives::Hash;

use crate::actor::VisorActor;
use crate::messages::GossipMessage;

impl Handler<GossipMessage> for VisorActor {
    type Result = ResponseFuture<()>;

    fn handle(&mut self, msg: GossipMessage, _ctx: &mut Context<Self>) -> Self::Result {
        if self.config.disabled {
            return Box::pin(async {});
        }
        match msg.msg {
            WireMessage::GetBlocks(m) => self.process_get_blocks(msg.source, m),
            WireMessage::GiveBlocks(m) => self.process_give_blocks(m),
            WireMessage::AnnounceBlocks(m) => self.process_announce_blocks(msg.source, m),
            WireMessage::GetTxns(m) => self.process_get_txns(msg.source, m),
            WireMessage::GiveTxns(m) => self.process_give_txns(m),
            WireMessage::AnnounceTxns(m) => self.process_announce_txns(msg.source, m),
        }
    }
}

impl VisorActor {
    /// A peer asked for blocks past `m.last_block`; answer directly to them
    /// only, not a broadcast.
    fn process_get_blocks(&mut self, source: String, m: GetBlocksMessage) -> ResponseFuture<()> {
        self.heights.record(&source, m.last_block);
        let blocks = self.chain.get_signed_blocks_since(m.last_block, m.requested_blocks);
        if blocks.is_empty() {
            return Box::pin(async {});
        }
        let conn = self.conn.clone();
        let wire = WireMessage::GiveBlocks(GiveBlocksMessage { blocks });
        Box::pin(async move {
            let _ = conn.send_message(&source, wire).await;
        })
    }

    /// Applies a batch of blocks in order, skipping any already at or below
    /// our head and stopping at the first that fails to execute (a later
    /// block can't be contiguous once an earlier one was rejected). On
    /// progress, re-announces our new head and re-requests more, letting a
    /// single batch fast-forward a lagging node across several rounds.
    fn process_give_blocks(&mut self, m: GiveBlocksMessage) -> ResponseFuture<()> {
        let max_seq = self.chain.head_seq();
        let mut processed = 0usize;
        let mut skipped = 0usize;

        for block in m.blocks {
            if block.seq() <= max_seq {
                skipped += 1;
                continue;
            }
            let hashes: Vec<Hash> = block.body.txns.iter().map(|t| t.hash()).collect();
            match self.chain.execute_signed_block(block) {
                Ok(()) => {
                    processed += 1;
                    self.pool.remove_confirmed(&hashes);
                }
                Err(err) => {
                    tracing::warn!(
                        target: "visor::gossip",
                        %err,
                        "block execution failed partway through a GiveBlocks batch; stopping"
                    );
                    break;
                }
            }
        }
        tracing::info!(target: "visor::gossip", processed, skipped, "applied GiveBlocks batch");

        if processed == 0 {
            return Box::pin(async {});
        }
        let head = self.chain.head_seq();
        let announce = WireMessage::AnnounceBlocks(AnnounceBlocksMessage { max_bk_seq: head });
        let request = WireMessage::GetBlocks(GetBlocksMessage {
            last_block: head,
            requested_blocks: self.config.blocks_response_count,
        });
        let conn = self.conn.clone();
        Box::pin(async move {
            conn.broadcast_message(announce).await;
            conn.broadcast_message(request).await;
        })
    }

    /// Records the sender's reported head; requests more blocks only when
    /// they claim to be ahead of us.
    fn process_announce_blocks(&mut self, source: String, m: AnnounceBlocksMessage) -> ResponseFuture<()> {
        self.heights.record(&source, m.max_bk_seq);
        if m.max_bk_seq <= self.chain.head_seq() {
            return Box::pin(async {});
        }
        let wire = WireMessage::GetBlocks(GetBlocksMessage {
            last_block: self.chain.head_seq(),
            requested_blocks: self.config.blocks_response_count,
        });
        let conn = self.conn.clone();
        Box::pin(async move {
            let _ = conn.send_message(&source, wire).await;
        })
    }

    /// Answers directly with whichever of the requested hashes we hold.
    fn process_get_txns(&mut self, source: String, m: GetTxnsMessage) -> ResponseFuture<()> {
        let txns = self.pool.get_known(&m.hashes);
        if txns.is_empty() {
            return Box::pin(async {});
        }
        let conn = self.conn.clone();
        let wire = WireMessage::GiveTxns(GiveTxnsMessage { txns });
        Box::pin(async move {
            let _ = conn.send_message(&source, wire).await;
        })
    }

    /// Inserts each transaction via the raw path, deliberately skipping the
    /// fee/structural verification `InjectTransaction` performs: the peer
    /// that announced these hashes already ran that pipeline once, and
    /// re-verifying here would be redundant work repeated for every hop of
    /// the relay.
    fn process_give_txns(&mut self, m: GiveTxnsMessage) -> ResponseFuture<()> {
        if m.txns.len() > self.config.txns_response_count {
            tracing::warn!(
                target: "visor::gossip",
                count = m.txns.len(),
                limit = self.config.txns_response_count,
                "GiveTxns batch exceeds the configured response count"
            );
        }
        let mut fresh = Vec::new();
        for tx in m.txns {
            let hash = tx.hash();
            match self.raw_inject_txn(tx) {
                Ok(false) => fresh.push(hash),
                Ok(true) => {}
                Err(err) => {
                    tracing::debug!(target: "visor::gossip", %err, "dropping unrelayable transaction");
                }
            }
        }
        if fresh.is_empty() {
            return Box::pin(async {});
        }
        let conn = self.conn.clone();
        let wire = WireMessage::AnnounceTxns(AnnounceTxnsMessage { hashes: fresh });
        Box::pin(async move {
            conn.broadcast_message(wire).await;
        })
    }

    /// Requests only the hashes we don't already hold, breaking the
    /// infinite relay loop an unconditional re-broadcast would cause.
    fn process_announce_txns(&mut self, source: String, m: AnnounceTxnsMessage) -> ResponseFuture<()> {
        let unknown = self.pool.filter_known(&m.hashes);
        if unknown.is_empty() {
            return Box::pin(async {});
        }
        let conn = self.conn.clone();
        let wire = WireMessage::GetTxns(GetTxnsMessage { hashes: unknown });
        Box::pin(async move {
            let _ = conn.send_message(&source, wire).await;
        })
    }
}
