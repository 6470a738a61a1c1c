use visor_primitives::hash::Hash;
use visor_primitives::BlockVerifyError;

/// Errors surfaced by the `Chain` collaborator: block execution failures,
/// fee violations, and block-production preconditions.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    #[error("block seq {found} is not contiguous with head+1 ({expected})")]
    NotContiguous { expected: u64, found: u64 },
    #[error(transparent)]
    Invalid(#[from] BlockVerifyError),
    #[error("transaction spends unknown output {0:?}")]
    UnknownInput(Hash, u16),
    #[error("transaction's output hours ({outputs}) exceed its input hours ({inputs})")]
    InsufficientFee { inputs: u64, outputs: u64 },
    #[error("cannot build a block: no master signing key configured")]
    NotMaster,
    #[error("signer's public key does not match the chain's configured master key")]
    MasterKeyMismatch,
    #[error("no pending transactions to build a block from")]
    EmptyPool,
}
