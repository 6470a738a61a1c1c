use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::crypto::{verify as verify_sig, PublicKey, Signature};
use crate::hash::{hash_borsh, Hash};
use crate::transaction::Transaction;

#[derive(BorshSerialize, BorshDeserialize, Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct BlockHeader {
    pub seq: u64,
    pub time: u64,
    pub prev: Hash,
    pub body_hash: Hash,
    pub fee_total: u64,
    pub version: u32,
}

impl BlockHeader {
    pub fn hash(&self) -> Hash {
        hash_borsh(self)
    }
}

#[derive(BorshSerialize, BorshDeserialize, Serialize, Deserialize, Clone, PartialEq, Eq, Debug, Default)]
pub struct BlockBody {
    pub txns: Vec<Transaction>,
}

impl BlockBody {
    pub fn hash(&self) -> Hash {
        hash_borsh(self)
    }
}

#[derive(BorshSerialize, BorshDeserialize, Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct SignedBlock {
    pub header: BlockHeader,
    pub body: BlockBody,
    pub sig: Signature,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockVerifyError {
    #[error("header.body_hash does not match the hash of the block body")]
    BodyHashMismatch,
    #[error("signature does not verify against the master public key")]
    BadSignature,
    #[error("block at seq {seq} does not chain from the expected previous block {expected}, found {found}")]
    WrongPrev { seq: u64, expected: Hash, found: Hash },
}

impl SignedBlock {
    /// Validates the block's self-consistency: `body_hash` matches the
    /// body, the signature verifies against `master_pub_key`, and (when
    /// `expected_prev` is supplied) the block chains from it. Deeper
    /// validation — transaction execution, UTXO consistency — belongs to
    /// `Chain`.
    pub fn verify(
        &self,
        master_pub_key: &PublicKey,
        expected_prev: Option<&Hash>,
    ) -> Result<(), BlockVerifyError> {
        if self.header.body_hash != self.body.hash() {
            return Err(BlockVerifyError::BodyHashMismatch);
        }
        if let Some(expected) = expected_prev {
            if &self.header.prev != expected {
                return Err(BlockVerifyError::WrongPrev {
                    seq: self.header.seq,
                    expected: *expected,
                    found: self.header.prev,
                });
            }
        }
        if !verify_sig(&self.sig, &self.header.hash(), master_pub_key) {
            return Err(BlockVerifyError::BadSignature);
        }
        Ok(())
    }

    pub fn seq(&self) -> u64 {
        self.header.seq
    }

    pub fn hash(&self) -> Hash {
        self.header.hash()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::SecretKey;

    fn signed(seq: u64, prev: Hash, sk: &SecretKey) -> SignedBlock {
        let body = BlockBody { txns: vec![] };
        let header = BlockHeader { seq, time: 0, prev, body_hash: body.hash(), fee_total: 0, version: 1 };
        let sig = sk.sign(&header.hash());
        SignedBlock { header, body, sig }
    }

    #[test]
    fn genesis_chained_block_verifies() {
        let sk = SecretKey::from_seed(&[1u8; 32]);
        let pk = sk.public_key();
        let genesis = signed(0, Hash::ZERO, &sk);
        assert!(genesis.verify(&pk, None).is_ok());

        let next = signed(1, genesis.hash(), &sk);
        assert!(next.verify(&pk, Some(&genesis.hash())).is_ok());
    }

    #[test]
    fn wrong_prev_is_rejected() {
        let sk = SecretKey::from_seed(&[1u8; 32]);
        let pk = sk.public_key();
        let b = signed(5, Hash::ZERO, &sk);
        assert_eq!(
            b.verify(&pk, Some(&Hash([9u8; 32]))),
            Err(BlockVerifyError::WrongPrev { seq: 5, expected: Hash([9u8; 32]), found: Hash::ZERO })
        );
    }

    #[test]
    fn tampered_body_breaks_body_hash() {
        let sk = SecretKey::from_seed(&[1u8; 32]);
        let pk = sk.public_key();
        let mut b = signed(0, Hash::ZERO, &sk);
        b.body.txns.push(crate::transaction::Transaction {
            inputs: vec![],
            outputs: vec![],
            sigs: vec![],
            header: Default::default(),
        });
        assert_eq!(b.verify(&pk, None), Err(BlockVerifyError::BodyHashMismatch));
    }
}
