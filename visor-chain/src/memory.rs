use std::collections::HashMap;

use tracing::{debug, info};
use visor_primitives::block::{BlockBody, BlockHeader};
use visor_primitives::{Hash, OutputRef, PublicKey, SecretKey, SignedBlock, Transaction, TxOutput};

use crate::error::ChainError;
use crate::Chain;

/// An in-memory `Chain` that keeps every block and a toy UTXO index. Good
/// enough to exercise the Visor actor's contiguity/fee-gate logic in tests;
/// not a substitute for a real validating store.
pub struct MemoryChain {
    blocks: Vec<SignedBlock>,
    utxo: HashMap<OutputRef, TxOutput>,
    master_pub_key: PublicKey,
}

impl MemoryChain {
    /// `genesis` must be seq 0 and already signed by `master_pub_key`.
    pub fn new(genesis: SignedBlock, master_pub_key: PublicKey) -> Result<Self, ChainError> {
        genesis.verify(&master_pub_key, None)?;
        let mut chain = MemoryChain { blocks: Vec::new(), utxo: HashMap::new(), master_pub_key };
        chain.apply(&genesis);
        chain.blocks.push(genesis);
        Ok(chain)
    }

    fn apply(&mut self, block: &SignedBlock) {
        for tx in &block.body.txns {
            for input in &tx.inputs {
                self.utxo.remove(input);
            }
            for (index, output) in tx.outputs.iter().enumerate() {
                self.utxo.insert(OutputRef { tx_hash: tx.hash(), index: index as u16 }, output.clone());
            }
        }
    }

    fn tx_input_output_hours(&self, tx: &Transaction) -> Result<(u64, u64), ChainError> {
        let mut input_hours = 0u64;
        for input in &tx.inputs {
            let out = self
                .utxo
                .get(input)
                .ok_or(ChainError::UnknownInput(input.tx_hash, input.index))?;
            input_hours += out.hours;
        }
        Ok((input_hours, tx.output_hours()))
    }
}

impl Chain for MemoryChain {
    fn head_seq(&self) -> u64 {
        self.blocks.last().map(|b| b.seq()).unwrap_or(0)
    }

    fn head_hash(&self) -> Hash {
        self.blocks.last().map(|b| b.hash()).unwrap_or(Hash::ZERO)
    }

    fn get_signed_blocks_since(&self, seq: u64, n: u64) -> Vec<SignedBlock> {
        self.blocks
            .iter()
            .filter(|b| b.seq() > seq)
            .take(n as usize)
            .cloned()
            .collect()
    }

    fn execute_signed_block(&mut self, block: SignedBlock) -> Result<(), ChainError> {
        let expected = self.head_seq() + 1;
        if block.seq() != expected {
            return Err(ChainError::NotContiguous { expected, found: block.seq() });
        }
        block.verify(&self.master_pub_key, Some(&self.head_hash()))?;
        self.apply(&block);
        debug!(target: "visor::chain", seq = block.seq(), "executed signed block");
        self.blocks.push(block);
        Ok(())
    }

    fn verify_transaction_fee(&self, tx: &Transaction) -> Result<(), ChainError> {
        let (inputs, outputs) = self.tx_input_output_hours(tx)?;
        if outputs > inputs {
            return Err(ChainError::InsufficientFee { inputs, outputs });
        }
        Ok(())
    }

    fn create_and_execute_block(
        &mut self,
        pending: Vec<Transaction>,
        signer: &SecretKey,
        time: u64,
    ) -> Result<SignedBlock, ChainError> {
        if signer.public_key() != self.master_pub_key {
            return Err(ChainError::MasterKeyMismatch);
        }
        if pending.is_empty() {
            return Err(ChainError::EmptyPool);
        }
        let mut fee_total = 0u64;
        for tx in &pending {
            let (inputs, outputs) = self.tx_input_output_hours(tx)?;
            fee_total += inputs.saturating_sub(outputs);
        }
        let body = BlockBody { txns: pending };
        let header = BlockHeader {
            seq: self.head_seq() + 1,
            time,
            prev: self.head_hash(),
            body_hash: body.hash(),
            fee_total,
            version: 1,
        };
        let sig = signer.sign(&header.hash());
        let block = SignedBlock { header, body, sig };
        self.execute_signed_block(block.clone())?;
        info!(target: "visor::chain", seq = block.seq(), txns = block.body.txns.len(), "produced block");
        Ok(block)
    }
}
