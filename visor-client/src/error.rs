use visor_chain::ChainError;
use visor_pool::PoolError;
use visor_primitives::TxVerifyError;

/// Errors surfaced across the Visor actor's public contract.
/// `Disabled` is deliberately not a variant here — a disabled node is a
/// silent no-op, not an error.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum VisorError {
    #[error("peer {0} is not connected")]
    NotConnected(String),
    #[error("node is not configured as master")]
    NotMaster,
    #[error(transparent)]
    InvalidTransaction(#[from] TxVerifyError),
    #[error(transparent)]
    Chain(#[from] ChainError),
    #[error(transparent)]
    Pool(#[from] PoolError),
}
