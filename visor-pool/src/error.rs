/// Errors from the raw pool insert. The in-memory pool never produces one —
/// duplicate detection is handled via the `Ok(bool)` channel — but the trait
/// carries the slot for implementations that impose a capacity bound or
/// other admission policy.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("pool is at capacity ({0} entries)")]
    Full(usize),
}
