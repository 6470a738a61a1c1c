//! The `UnconfirmedPool` collaborator: the pending-transaction set keyed
//! by transaction hash.

mod error;
mod memory;

pub use error::PoolError;
pub use memory::MemoryPool;

use visor_chain::Chain;
use visor_primitives::{Hash, Transaction};

/// Lifecycle record for a pending transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnconfirmedTxn {
    pub txn: Transaction,
    pub received: u64,
    pub announced: u64,
    pub is_valid: bool,
    pub checked: u64,
}

pub trait UnconfirmedPool: Send {
    /// Raw insert-if-new-by-hash; fee/structural checks are the injection
    /// pipeline's job, not this one's. Returns `Ok(true)` if `tx` was
    /// already known (duplicate, no-op), `Ok(false)` if it was newly
    /// inserted.
    fn inject_txn(&mut self, tx: Transaction, now: u64) -> Result<bool, PoolError>;

    /// Hashes from `hashes` not present in the pool.
    fn filter_known(&self, hashes: &[Hash]) -> Vec<Hash>;

    /// The subset of `hashes` the pool holds, as full transactions.
    fn get_known(&self, hashes: &[Hash]) -> Vec<Transaction>;

    fn is_known(&self, hash: &Hash) -> bool;

    fn set_announced(&mut self, hashes: &[Hash], now: u64);

    /// All pending entries, ordered by `received` ascending (oldest first) —
    /// the order `ResendUnconfirmedTxns` rebroadcasts in.
    fn iterate(&self) -> Vec<UnconfirmedTxn>;

    /// Revalidates every entry against `chain` and drops those older than
    /// `max_age_secs`. Returns the hashes of dropped entries.
    fn refresh(&mut self, chain: &dyn Chain, now: u64, max_age_secs: u64) -> Vec<Hash>;

    /// Drops entries included in a just-confirmed block.
    fn remove_confirmed(&mut self, hashes: &[Hash]);

    fn len(&self) -> usize;
}
