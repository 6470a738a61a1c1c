use std::collections::HashMap;

use tracing::debug;
use visor_chain::Chain;
use visor_primitives::{Hash, Transaction};

use crate::error::PoolError;
use crate::{UnconfirmedPool, UnconfirmedTxn};

/// A plain `HashMap`-backed `UnconfirmedPool`. Good for a single node's
/// in-process pending set; sharding across multiple pools is out of scope.
#[derive(Default)]
pub struct MemoryPool {
    entries: HashMap<Hash, UnconfirmedTxn>,
}

impl MemoryPool {
    pub fn new() -> Self {
        MemoryPool::default()
    }
}

impl UnconfirmedPool for MemoryPool {
    fn inject_txn(&mut self, tx: Transaction, now: u64) -> Result<bool, PoolError> {
        let hash = tx.hash();
        if self.entries.contains_key(&hash) {
            return Ok(true);
        }
        self.entries.insert(
            hash,
            UnconfirmedTxn { txn: tx, received: now, announced: 0, is_valid: true, checked: now },
        );
        Ok(false)
    }

    fn filter_known(&self, hashes: &[Hash]) -> Vec<Hash> {
        hashes.iter().filter(|h| !self.entries.contains_key(h)).copied().collect()
    }

    fn get_known(&self, hashes: &[Hash]) -> Vec<Transaction> {
        hashes.iter().filter_map(|h| self.entries.get(h)).map(|e| e.txn.clone()).collect()
    }

    fn is_known(&self, hash: &Hash) -> bool {
        self.entries.contains_key(hash)
    }

    fn set_announced(&mut self, hashes: &[Hash], now: u64) {
        for h in hashes {
            if let Some(entry) = self.entries.get_mut(h) {
                entry.announced = now;
            }
        }
    }

    fn iterate(&self) -> Vec<UnconfirmedTxn> {
        let mut out: Vec<_> = self.entries.values().cloned().collect();
        out.sort_by_key(|e| e.received);
        out
    }

    fn refresh(&mut self, chain: &dyn Chain, now: u64, max_age_secs: u64) -> Vec<Hash> {
        let mut purged = Vec::new();
        self.entries.retain(|hash, entry| {
            if now.saturating_sub(entry.received) > max_age_secs {
                purged.push(*hash);
                return false;
            }
            entry.is_valid =
                chain.verify_transaction_fee(&entry.txn).is_ok() && entry.txn.verify().is_ok();
            entry.checked = now;
            true
        });
        if !purged.is_empty() {
            debug!(target: "visor::pool", count = purged.len(), "refresh purged aged transactions");
        }
        purged
    }

    fn remove_confirmed(&mut self, hashes: &[Hash]) {
        for h in hashes {
            self.entries.remove(h);
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
