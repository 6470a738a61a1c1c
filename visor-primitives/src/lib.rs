//! Wire and data types shared across the Visor synchronization core:
//! hashes, signatures, transactions, signed blocks, and static config.
//!
//! This crate has no knowledge of networking or concurrency; it is the
//! dependency-free leaf of the workspace.

pub mod block;
pub mod config;
pub mod crypto;
pub mod hash;
pub mod transaction;

pub use block::{BlockBody, BlockHeader, BlockVerifyError, SignedBlock};
pub use config::Config;
pub use crypto::{verify, PublicKey, SecretKey, Signature};
pub use hash::{hash_borsh, hash_bytes, Hash};
pub use transaction::{Address, OutputRef, Transaction, TransactionHeader, TxOutput, TxVerifyError};
