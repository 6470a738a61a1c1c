//! Scenario tests exercising the actor end-to-end through its public
//! message contract, driving the actor with a recording connection pool
//! instead of a live network.

use std::sync::Arc;

use actix::Actor;
use visor_chain::MemoryChain;
use visor_network::testing::{Outbound, RecordingPool};
use visor_network::{
    AnnounceBlocksMessage, AnnounceTxnsMessage, GetBlocksMessage, GiveBlocksMessage, GiveTxnsMessage,
    Message as WireMessage,
};
use visor_pool::MemoryPool;
use visor_primitives::block::{BlockBody, BlockHeader};
use visor_primitives::{
    Address, Config, OutputRef, SecretKey, SignedBlock, Transaction, TransactionHeader, TxOutput,
};

use crate::clock::FixedClock;
use crate::messages::*;
use crate::VisorActor;

fn genesis(sk: &SecretKey, payout: Address) -> SignedBlock {
    let body = BlockBody {
        txns: vec![{
            let mut tx = Transaction {
                inputs: vec![],
                outputs: vec![TxOutput { addr: payout, coins: 1_000, hours: 1_000 }],
                sigs: vec![],
                header: TransactionHeader::default(),
            };
            tx.header = tx.compute_header();
            tx
        }],
    };
    let header = BlockHeader {
        seq: 0,
        time: 0,
        prev: visor_primitives::Hash::ZERO,
        body_hash: body.hash(),
        fee_total: 0,
        version: 1,
    };
    let sig = sk.sign(&header.hash());
    SignedBlock { header, body, sig }
}

fn next_block(prev: &SignedBlock, sk: &SecretKey, seq: u64, time: u64) -> SignedBlock {
    let body = BlockBody::default();
    let header = BlockHeader { seq, time, prev: prev.hash(), body_hash: body.hash(), fee_total: 0, version: 1 };
    let sig = sk.sign(&header.hash());
    SignedBlock { header, body, sig }
}

fn test_config(sk: &SecretKey, genesis_block: SignedBlock, is_master: bool) -> Config {
    Config {
        disabled: false,
        blocks_request_rate_secs: 3600,
        blocks_announce_rate_secs: 3600,
        blocks_response_count: 20,
        blockchain_backup_rate_secs: 3600,
        unconfirmed_refresh_rate_secs: 3600,
        txns_response_count: 32,
        is_master,
        master_pub_key: sk.public_key(),
        master_sec_key: None,
        genesis_block,
    }
}

fn new_actor(
    sk: &SecretKey,
    genesis_block: SignedBlock,
    conn: Arc<RecordingPool>,
) -> actix::Addr<VisorActor> {
    let config = test_config(sk, genesis_block.clone(), false);
    let chain = Box::new(MemoryChain::new(genesis_block, sk.public_key()).unwrap());
    let pool = Box::new(MemoryPool::new());
    let clock = Arc::new(FixedClock::new(1_000));
    VisorActor::new(config, chain, pool, conn, clock).start()
}

#[actix_rt::test]
async fn give_blocks_fast_forwards_then_reannounces() {
    let sk = SecretKey::from_seed(&[1u8; 32]);
    let g = genesis(&sk, Address([9u8; 20]));
    let conn = Arc::new(RecordingPool::with_peers(["peer-a"]));
    let addr = new_actor(&sk, g.clone(), conn.clone()).clone();

    let b1 = next_block(&g, &sk, 1, 10);
    let b2 = next_block(&b1, &sk, 2, 20);

    addr.send(GossipMessage {
        msg: WireMessage::GiveBlocks(GiveBlocksMessage { blocks: vec![b1, b2] }),
        source: "peer-a".into(),
    })
    .await
    .unwrap();

    assert_eq!(addr.send(HeadBkSeq).await.unwrap(), 2);

    let sent = conn.sent();
    assert!(sent.iter().any(|m| matches!(m, Outbound::Broadcast(WireMessage::AnnounceBlocks(a)) if a.max_bk_seq == 2)));
    assert!(sent.iter().any(|m| matches!(m, Outbound::Broadcast(WireMessage::GetBlocks(_)))));
}

#[actix_rt::test]
async fn give_blocks_skips_already_known_and_stops_on_bad_block() {
    let sk = SecretKey::from_seed(&[2u8; 32]);
    let other_sk = SecretKey::from_seed(&[3u8; 32]);
    let g = genesis(&sk, Address([9u8; 20]));
    let conn = Arc::new(RecordingPool::new());
    let addr = new_actor(&sk, g.clone(), conn.clone());

    let b1 = next_block(&g, &sk, 1, 10);
    addr.send(ExecuteSignedBlock(b1.clone())).await.unwrap().unwrap();
    assert_eq!(addr.send(HeadBkSeq).await.unwrap(), 1);

    // b2 is signed by the wrong key: execution must fail and the batch
    // must stop there, even though a well-formed b3 follows it.
    let bad_b2 = next_block(&b1, &other_sk, 2, 20);
    let b3 = next_block(&bad_b2, &sk, 3, 30);

    addr.send(GossipMessage {
        msg: WireMessage::GiveBlocks(GiveBlocksMessage { blocks: vec![b1, bad_b2, b3] }),
        source: "peer-b".into(),
    })
    .await
    .unwrap();

    assert_eq!(addr.send(HeadBkSeq).await.unwrap(), 1);
}

#[actix_rt::test]
async fn get_blocks_answers_only_the_requester() {
    let sk = SecretKey::from_seed(&[4u8; 32]);
    let g = genesis(&sk, Address([9u8; 20]));
    let conn = Arc::new(RecordingPool::with_peers(["peer-a"]));
    let addr = new_actor(&sk, g.clone(), conn.clone());

    let b1 = next_block(&g, &sk, 1, 10);
    addr.send(ExecuteSignedBlock(b1)).await.unwrap().unwrap();

    addr.send(GossipMessage {
        msg: WireMessage::GetBlocks(GetBlocksMessage { last_block: 0, requested_blocks: 20 }),
        source: "peer-a".into(),
    })
    .await
    .unwrap();

    let sent = conn.sent();
    assert_eq!(sent.len(), 1);
    assert!(matches!(&sent[0], Outbound::Direct(addr, WireMessage::GiveBlocks(m)) if addr == "peer-a" && m.blocks.len() == 1));
}

#[actix_rt::test]
async fn announce_txns_requests_only_unknown_hashes() {
    let sk = SecretKey::from_seed(&[5u8; 32]);
    let g = genesis(&sk, Address([9u8; 20]));
    let conn = Arc::new(RecordingPool::with_peers(["peer-a"]));
    let addr = new_actor(&sk, g, conn.clone());

    let known = Transaction {
        inputs: vec![OutputRef { tx_hash: visor_primitives::Hash::ZERO, index: 0 }],
        outputs: vec![TxOutput { addr: Address([1u8; 20]), coins: 1, hours: 0 }],
        sigs: vec![visor_primitives::Signature([0u8; 64])],
        header: TransactionHeader::default(),
    };
    let mut known = known;
    known.header = known.compute_header();
    addr.send(InjectTxn(known.clone())).await.unwrap().unwrap();

    let unknown_hash = visor_primitives::Hash([7u8; 32]);
    addr.send(GossipMessage {
        msg: WireMessage::AnnounceTxns(AnnounceTxnsMessage { hashes: vec![known.hash(), unknown_hash] }),
        source: "peer-a".into(),
    })
    .await
    .unwrap();

    let sent = conn.sent();
    assert_eq!(sent.len(), 1);
    match &sent[0] {
        Outbound::Direct(addr, WireMessage::GetTxns(m)) => {
            assert_eq!(addr, "peer-a");
            assert_eq!(m.hashes, vec![unknown_hash]);
        }
        other => panic!("unexpected outbound message: {other:?}"),
    }
}

#[actix_rt::test]
async fn give_txns_injects_without_reverifying_then_relays_fresh_ones() {
    let sk = SecretKey::from_seed(&[6u8; 32]);
    let g = genesis(&sk, Address([9u8; 20]));
    let conn = Arc::new(RecordingPool::new());
    let addr = new_actor(&sk, g, conn.clone());

    let mut tx = Transaction {
        inputs: vec![OutputRef { tx_hash: visor_primitives::Hash::ZERO, index: 0 }],
        outputs: vec![TxOutput { addr: Address([1u8; 20]), coins: 1, hours: 0 }],
        sigs: vec![visor_primitives::Signature([0u8; 64])],
        header: TransactionHeader::default(),
    };
    tx.header = tx.compute_header();

    addr.send(GossipMessage {
        msg: WireMessage::GiveTxns(GiveTxnsMessage { txns: vec![tx.clone()] }),
        source: "peer-a".into(),
    })
    .await
    .unwrap();

    let hash = tx.hash();
    assert_eq!(addr.send(UnConfirmKnow(vec![hash])).await.unwrap(), vec![tx]);
    match conn.sent().as_slice() {
        [Outbound::Broadcast(WireMessage::AnnounceTxns(m))] => {
            assert_eq!(m.hashes, vec![hash]);
        }
        other => panic!("expected a single AnnounceTxns broadcast, got {other:?}"),
    }
}

#[actix_rt::test]
async fn disabled_node_ignores_gossip_and_commands() {
    let sk = SecretKey::from_seed(&[8u8; 32]);
    let g = genesis(&sk, Address([9u8; 20]));
    let conn = Arc::new(RecordingPool::with_peers(["peer-a"]));
    let mut config = test_config(&sk, g.clone(), false);
    config.disabled = true;
    let chain = Box::new(MemoryChain::new(g.clone(), sk.public_key()).unwrap());
    let pool = Box::new(MemoryPool::new());
    let clock = Arc::new(FixedClock::new(1_000));
    let addr = VisorActor::new(config, chain, pool, conn.clone(), clock).start();

    let b1 = next_block(&g, &sk, 1, 10);
    addr.send(GossipMessage {
        msg: WireMessage::GiveBlocks(GiveBlocksMessage { blocks: vec![b1] }),
        source: "peer-a".into(),
    })
    .await
    .unwrap();

    assert_eq!(addr.send(HeadBkSeq).await.unwrap(), 0);
    assert!(conn.sent().is_empty());
}

#[actix_rt::test]
async fn master_produces_and_publishes_a_block() {
    let sk = SecretKey::from_seed(&[10u8; 32]);
    let g = genesis(&sk, Address([9u8; 20]));
    let genesis_tx_hash = g.body.txns[0].hash();
    let conn = Arc::new(RecordingPool::with_peers(["peer-a"]));

    let mut config = test_config(&sk, g.clone(), true);
    config.master_sec_key = Some(Arc::new(SecretKey::from_seed(&[10u8; 32])));
    let chain = Box::new(MemoryChain::new(g, sk.public_key()).unwrap());
    let pool = Box::new(MemoryPool::new());
    let clock = Arc::new(FixedClock::new(1_000));
    let addr = VisorActor::new(config, chain, pool, conn.clone(), clock).start();

    let mut tx = Transaction {
        inputs: vec![OutputRef { tx_hash: genesis_tx_hash, index: 0 }],
        outputs: vec![TxOutput { addr: Address([2u8; 20]), coins: 1_000, hours: 500 }],
        sigs: vec![visor_primitives::Signature([0u8; 64])],
        header: TransactionHeader::default(),
    };
    tx.header = tx.compute_header();
    addr.send(InjectTxn(tx)).await.unwrap().unwrap();

    addr.send(CreateAndPublishBlock).await.unwrap().unwrap();

    assert_eq!(addr.send(HeadBkSeq).await.unwrap(), 1);
    assert!(matches!(conn.sent().as_slice(), [Outbound::Broadcast(WireMessage::GiveBlocks(_))]));
}

#[actix_rt::test]
async fn non_master_cannot_publish_a_block() {
    let sk = SecretKey::from_seed(&[11u8; 32]);
    let g = genesis(&sk, Address([9u8; 20]));
    let conn = Arc::new(RecordingPool::new());
    let addr = new_actor(&sk, g, conn);

    let err = addr.send(CreateAndPublishBlock).await.unwrap().unwrap_err();
    assert_eq!(err, crate::VisorError::NotMaster);
}
