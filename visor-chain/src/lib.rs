//! The `Chain` collaborator: an append-only signed-block
//! store. This crate defines the trait the Visor actor programs against and
//! ships a small in-memory implementation for tests; a production node
//! would back this with a real UTXO-aware store.

mod error;
mod memory;

pub use error::ChainError;
pub use memory::MemoryChain;

use visor_primitives::{Hash, SecretKey, SignedBlock, Transaction};

/// Append-only signed-block store plus the minimal transaction-fee oracle
/// `InjectTransaction` needs.
pub trait Chain: Send {
    fn head_seq(&self) -> u64;
    fn head_hash(&self) -> Hash;

    /// At most `n` blocks with `seq > seq`, in increasing seq order.
    fn get_signed_blocks_since(&self, seq: u64, n: u64) -> Vec<SignedBlock>;

    /// Appends `block` iff it is valid and contiguous with the current head.
    /// Leaves the chain untouched on error.
    fn execute_signed_block(&mut self, block: SignedBlock) -> Result<(), ChainError>;

    /// Coin-hour accounting check used by the injection pipeline.
    fn verify_transaction_fee(&self, tx: &Transaction) -> Result<(), ChainError>;

    /// Builds a block out of `pending`, signs it with `signer`, executes it
    /// locally, and returns it. The caller is responsible for removing the
    /// included transactions from the pool afterwards.
    fn create_and_execute_block(
        &mut self,
        pending: Vec<Transaction>,
        signer: &SecretKey,
        time: u64,
    ) -> Result<SignedBlock, ChainError>;
}
