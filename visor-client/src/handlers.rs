//! `Handler<M>` impls for every message in `messages.rs` — the Visor
//! actor's public contract. Each body does its state mutation
//! synchronously (already on the strand) and only reaches for
//! `ResponseFuture` when it needs to await the `ConnectionPool` (network
//! I/O is the one thing that genuinely lives outside the strand).

use actix::{Context, Handler, ResponseFuture};
use visor_network::{AnnounceBlocksMessage, GetBlocksMessage, GiveBlocksMessage, GiveTxnsMessage};
use visor_network::{Message as WireMessage, PoolSendError};
use visor_primitives::Hash;

use crate::actor::VisorActor;
use crate::error::VisorError;
use crate::height::estimate_blockchain_length;
use crate::messages::*;

impl VisorActor {
    pub(crate) fn make_get_blocks(&self) -> GetBlocksMessage {
        GetBlocksMessage {
            last_block: self.chain.head_seq(),
            requested_blocks: self.config.blocks_response_count,
        }
    }

    pub(crate) fn make_announce_blocks(&self) -> AnnounceBlocksMessage {
        AnnounceBlocksMessage { max_bk_seq: self.chain.head_seq() }
    }
}

impl Handler<HeadBkSeq> for VisorActor {
    type Result = u64;
    fn handle(&mut self, _msg: HeadBkSeq, _ctx: &mut Context<Self>) -> u64 {
        // Always readable, even when disabled.
        self.chain.head_seq()
    }
}

impl Handler<RefreshUnconfirmed> for VisorActor {
    type Result = ();
    fn handle(&mut self, _msg: RefreshUnconfirmed, _ctx: &mut Context<Self>) {
        if self.config.disabled {
            return;
        }
        let now = self.clock.now_unix();
        // See DESIGN.md for why this multiplier was chosen for the purge age.
        let max_age = self.config.unconfirmed_refresh_rate_secs.saturating_mul(10);
        self.pool.refresh(self.chain.as_ref(), now, max_age);
    }
}

impl Handler<RequestBlocks> for VisorActor {
    type Result = ResponseFuture<()>;
    fn handle(&mut self, _msg: RequestBlocks, _ctx: &mut Context<Self>) -> Self::Result {
        if self.config.disabled {
            return Box::pin(async {});
        }
        let wire = WireMessage::GetBlocks(self.make_get_blocks());
        let conn = self.conn.clone();
        Box::pin(async move {
            conn.broadcast_message(wire).await;
        })
    }
}

impl Handler<AnnounceBlocks> for VisorActor {
    type Result = ResponseFuture<()>;
    fn handle(&mut self, _msg: AnnounceBlocks, _ctx: &mut Context<Self>) -> Self::Result {
        if self.config.disabled {
            return Box::pin(async {});
        }
        let wire = WireMessage::AnnounceBlocks(self.make_announce_blocks());
        let conn = self.conn.clone();
        Box::pin(async move {
            conn.broadcast_message(wire).await;
        })
    }
}

impl Handler<RequestBlocksFromAddr> for VisorActor {
    type Result = ResponseFuture<Result<(), VisorError>>;
    fn handle(&mut self, msg: RequestBlocksFromAddr, _ctx: &mut Context<Self>) -> Self::Result {
        if self.config.disabled {
            return Box::pin(async { Ok(()) });
        }
        let wire = WireMessage::GetBlocks(self.make_get_blocks());
        let conn = self.conn.clone();
        let addr = msg.0;
        Box::pin(async move {
            conn.send_message(&addr, wire).await.map_err(|PoolSendError::NotConnected(a)| {
                VisorError::NotConnected(a)
            })
        })
    }
}

impl Handler<ExecuteSignedBlock> for VisorActor {
    type Result = Result<(), VisorError>;
    fn handle(&mut self, msg: ExecuteSignedBlock, _ctx: &mut Context<Self>) -> Self::Result {
        if self.config.disabled {
            return Ok(());
        }
        let hashes: Vec<Hash> = msg.0.body.txns.iter().map(|t| t.hash()).collect();
        self.chain.execute_signed_block(msg.0)?;
        self.pool.remove_confirmed(&hashes);
        Ok(())
    }
}

impl Handler<GetSignedBlocksSince> for VisorActor {
    type Result = Vec<visor_primitives::SignedBlock>;
    fn handle(&mut self, msg: GetSignedBlocksSince, _ctx: &mut Context<Self>) -> Self::Result {
        self.chain.get_signed_blocks_since(msg.0, msg.1)
    }
}

impl Handler<InjectTxn> for VisorActor {
    type Result = Result<bool, VisorError>;
    fn handle(&mut self, msg: InjectTxn, _ctx: &mut Context<Self>) -> Self::Result {
        if self.config.disabled {
            // Disabled means "no-op"; report as already-known so callers
            // don't treat this as a fresh insertion worth broadcasting.
            return Ok(true);
        }
        self.raw_inject_txn(msg.0)
    }
}

impl Handler<InjectTransaction> for VisorActor {
    type Result = ResponseFuture<Result<bool, VisorError>>;
    fn handle(&mut self, msg: InjectTransaction, _ctx: &mut Context<Self>) -> Self::Result {
        if self.config.disabled {
            return Box::pin(async { Ok(true) });
        }
        let tx = msg.0;
        let outcome: Result<bool, VisorError> = (|| {
            self.chain.verify_transaction_fee(&tx)?;
            tx.verify()?;
            self.raw_inject_txn(tx.clone())
        })();

        match outcome {
            Ok(false) => {
                let conn = self.conn.clone();
                let wire = WireMessage::GiveTxns(GiveTxnsMessage { txns: vec![tx] });
                Box::pin(async move {
                    conn.broadcast_message(wire).await;
                    Ok(false)
                })
            }
            other => Box::pin(async move { other }),
        }
    }
}

impl Handler<ResendTransaction> for VisorActor {
    type Result = ResponseFuture<()>;
    fn handle(&mut self, msg: ResendTransaction, _ctx: &mut Context<Self>) -> Self::Result {
        if self.config.disabled || !self.pool.is_known(&msg.0) {
            return Box::pin(async {});
        }
        let txs = self.pool.get_known(&[msg.0]);
        let conn = self.conn.clone();
        Box::pin(async move {
            if let Some(tx) = txs.into_iter().next() {
                conn.broadcast_message(WireMessage::GiveTxns(GiveTxnsMessage { txns: vec![tx] })).await;
            }
        })
    }
}

impl Handler<ResendUnconfirmedTxns> for VisorActor {
    type Result = ResponseFuture<Vec<Hash>>;
    fn handle(&mut self, _msg: ResendUnconfirmedTxns, _ctx: &mut Context<Self>) -> Self::Result {
        if self.config.disabled {
            return Box::pin(async { vec![] });
        }
        let entries = self.pool.iterate();
        let hashes: Vec<Hash> = entries.iter().map(|e| e.txn.hash()).collect();
        let txns: Vec<_> = entries.into_iter().map(|e| e.txn).collect();
        let conn = self.conn.clone();
        Box::pin(async move {
            if !txns.is_empty() {
                conn.broadcast_message(WireMessage::GiveTxns(GiveTxnsMessage { txns })).await;
            }
            hashes
        })
    }
}

impl Handler<SetTxnsAnnounced> for VisorActor {
    type Result = ();
    fn handle(&mut self, msg: SetTxnsAnnounced, _ctx: &mut Context<Self>) {
        if self.config.disabled {
            return;
        }
        let now = self.clock.now_unix();
        self.pool.set_announced(&msg.0, now);
    }
}

impl Handler<BroadcastTransaction> for VisorActor {
    type Result = ResponseFuture<()>;
    fn handle(&mut self, msg: BroadcastTransaction, _ctx: &mut Context<Self>) -> Self::Result {
        if self.config.disabled {
            return Box::pin(async {});
        }
        // Does not gate on local knowledge of the transaction: the higher
        // layers are expected to dedupe.
        let conn = self.conn.clone();
        let wire = WireMessage::GiveTxns(GiveTxnsMessage { txns: vec![msg.0] });
        Box::pin(async move {
            conn.broadcast_message(wire).await;
        })
    }
}

impl Handler<CreateAndPublishBlock> for VisorActor {
    type Result = ResponseFuture<Result<(), VisorError>>;
    fn handle(&mut self, _msg: CreateAndPublishBlock, _ctx: &mut Context<Self>) -> Self::Result {
        if self.config.disabled {
            return Box::pin(async { Ok(()) });
        }
        if !self.config.is_master {
            return Box::pin(async { Err(VisorError::NotMaster) });
        }
        let Some(signer) = self.config.master_sec_key.clone() else {
            return Box::pin(async { Err(VisorError::NotMaster) });
        };
        let pending: Vec<_> = self.pool.iterate().into_iter().map(|e| e.txn).collect();
        let now = self.clock.now_unix();

        let block = match self.chain.create_and_execute_block(pending, signer.as_ref(), now) {
            Ok(block) => block,
            Err(err) => return Box::pin(async move { Err(VisorError::from(err)) }),
        };
        let hashes: Vec<Hash> = block.body.txns.iter().map(|t| t.hash()).collect();
        self.pool.remove_confirmed(&hashes);
        let conn = self.conn.clone();
        let wire = WireMessage::GiveBlocks(GiveBlocksMessage { blocks: vec![block] });
        Box::pin(async move {
            conn.broadcast_message(wire).await;
            Ok(())
        })
    }
}

impl Handler<RecordBlockchainLength> for VisorActor {
    type Result = ();
    fn handle(&mut self, msg: RecordBlockchainLength, _ctx: &mut Context<Self>) {
        self.heights.record(&msg.0, msg.1);
    }
}

impl Handler<RemoveConnection> for VisorActor {
    type Result = ();
    fn handle(&mut self, msg: RemoveConnection, _ctx: &mut Context<Self>) {
        self.heights.remove(&msg.0);
    }
}

impl Handler<EstimateBlockchainLength> for VisorActor {
    type Result = u64;
    fn handle(&mut self, _msg: EstimateBlockchainLength, _ctx: &mut Context<Self>) -> u64 {
        estimate_blockchain_length(&self.heights.values(), self.chain.head_seq())
    }
}

impl Handler<UnConfirmFilterKnown> for VisorActor {
    type Result = Vec<Hash>;
    fn handle(&mut self, msg: UnConfirmFilterKnown, _ctx: &mut Context<Self>) -> Vec<Hash> {
        self.pool.filter_known(&msg.0)
    }
}

impl Handler<UnConfirmKnow> for VisorActor {
    type Result = Vec<visor_primitives::Transaction>;
    fn handle(&mut self, msg: UnConfirmKnow, _ctx: &mut Context<Self>) -> Self::Result {
        self.pool.get_known(&msg.0)
    }
}

impl Handler<PeerHeightSnapshot> for VisorActor {
    type Result = Vec<(String, u64)>;
    fn handle(&mut self, _msg: PeerHeightSnapshot, _ctx: &mut Context<Self>) -> Self::Result {
        self.heights.snapshot()
    }
}

impl Handler<Shutdown> for VisorActor {
    type Result = ();
    fn handle(&mut self, _msg: Shutdown, ctx: &mut Context<Self>) {
        // actix drains no further mailbox items past `stop()`; any
        // in-flight ResponseFuture already spawned is left to finish
        // observably.
        ctx.stop();
    }
}
