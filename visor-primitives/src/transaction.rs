use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::crypto::Signature;
use crate::hash::{hash_borsh, Hash};

/// Opaque 20-byte output address. Derivation from a public key is a wallet
/// concern; this crate only moves the bytes around.
#[derive(BorshSerialize, BorshDeserialize, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Address(pub [u8; 20]);

/// A reference to a prior transaction's output, spent by a later transaction's input.
#[derive(BorshSerialize, BorshDeserialize, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct OutputRef {
    pub tx_hash: Hash,
    pub index: u16,
}

#[derive(BorshSerialize, BorshDeserialize, Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct TxOutput {
    pub addr: Address,
    pub coins: u64,
    pub hours: u64,
}

#[derive(BorshSerialize, BorshDeserialize, Serialize, Deserialize, Clone, PartialEq, Eq, Debug, Default)]
pub struct TransactionHeader {
    pub hash: Hash,
    pub inner_hash: Hash,
}

/// The inner, signable part of a transaction: everything except the
/// signatures and the cached header hashes.
#[derive(BorshSerialize, BorshDeserialize, Clone, PartialEq, Eq, Debug)]
struct TxInner {
    inputs: Vec<OutputRef>,
    outputs: Vec<TxOutput>,
}

#[derive(BorshSerialize, BorshDeserialize, Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct Transaction {
    pub inputs: Vec<OutputRef>,
    pub outputs: Vec<TxOutput>,
    pub sigs: Vec<Signature>,
    pub header: TransactionHeader,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TxVerifyError {
    #[error("transaction has no inputs")]
    NoInputs,
    #[error("transaction has no outputs")]
    NoOutputs,
    #[error("output {index} has zero coins")]
    ZeroCoinsOutput { index: usize },
    #[error("expected {expected} signatures, found {found}")]
    SignatureCountMismatch { expected: usize, found: usize },
    #[error("cached inner hash does not match the computed one")]
    InnerHashMismatch,
    #[error("cached hash does not match the computed one")]
    HashMismatch,
}

impl Transaction {
    fn inner(&self) -> TxInner {
        TxInner { inputs: self.inputs.clone(), outputs: self.outputs.clone() }
    }

    /// Recomputes `inner_hash` and `hash` from the current fields, ignoring
    /// whatever is cached in `header`. Used to build a transaction's header
    /// after construction, and to check it on the way in.
    pub fn compute_header(&self) -> TransactionHeader {
        let inner_hash = hash_borsh(&self.inner());
        let hash = hash_borsh(&(inner_hash, &self.sigs));
        TransactionHeader { hash, inner_hash }
    }

    /// Structural and self-consistency checks only: non-empty inputs and
    /// outputs, one signature per input, and cached hashes matching their
    /// recomputation. Per-input signature verification against the spending
    /// output's owner key requires the UTXO set and lives in `Chain`.
    pub fn verify(&self) -> Result<(), TxVerifyError> {
        if self.inputs.is_empty() {
            return Err(TxVerifyError::NoInputs);
        }
        if self.outputs.is_empty() {
            return Err(TxVerifyError::NoOutputs);
        }
        for (index, out) in self.outputs.iter().enumerate() {
            if out.coins == 0 {
                return Err(TxVerifyError::ZeroCoinsOutput { index });
            }
        }
        if self.sigs.len() != self.inputs.len() {
            return Err(TxVerifyError::SignatureCountMismatch {
                expected: self.inputs.len(),
                found: self.sigs.len(),
            });
        }
        let computed = self.compute_header();
        if computed.inner_hash != self.header.inner_hash {
            return Err(TxVerifyError::InnerHashMismatch);
        }
        if computed.hash != self.header.hash {
            return Err(TxVerifyError::HashMismatch);
        }
        Ok(())
    }

    pub fn hash(&self) -> Hash {
        self.header.hash
    }

    /// Sum of coin-hours carried by this transaction's outputs, used by
    /// fee accounting, which additionally needs the spent inputs' hours
    /// from the UTXO set.
    pub fn output_hours(&self) -> u64 {
        self.outputs.iter().map(|o| o.hours).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tx() -> Transaction {
        let mut tx = Transaction {
            inputs: vec![OutputRef { tx_hash: Hash::ZERO, index: 0 }],
            outputs: vec![TxOutput { addr: Address([1u8; 20]), coins: 10, hours: 1 }],
            sigs: vec![Signature([0u8; 64])],
            header: TransactionHeader::default(),
        };
        tx.header = tx.compute_header();
        tx
    }

    #[test]
    fn well_formed_transaction_verifies() {
        assert!(sample_tx().verify().is_ok());
    }

    #[test]
    fn tampered_output_breaks_inner_hash() {
        let mut tx = sample_tx();
        tx.outputs[0].coins = 999;
        assert_eq!(tx.verify(), Err(TxVerifyError::InnerHashMismatch));
    }

    #[test]
    fn missing_signature_is_rejected() {
        let mut tx = sample_tx();
        tx.sigs.clear();
        assert_eq!(
            tx.verify(),
            Err(TxVerifyError::SignatureCountMismatch { expected: 1, found: 0 })
        );
    }

    #[test]
    fn zero_coin_output_is_rejected() {
        let mut tx = sample_tx();
        tx.outputs.push(TxOutput { addr: Address([2u8; 20]), coins: 0, hours: 0 });
        tx.header = tx.compute_header();
        assert_eq!(tx.verify(), Err(TxVerifyError::ZeroCoinsOutput { index: 1 }));
    }
}
