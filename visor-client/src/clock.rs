use std::time::{SystemTime, UNIX_EPOCH};

/// A thin seam over wall-clock time: tests substitute a fixed/steppable
/// clock instead of racing `SystemTime::now()`.
pub trait Clock: Send + Sync {
    fn now_unix(&self) -> u64;
}

#[derive(Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> u64 {
        SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0)
    }
}

#[cfg(test)]
pub struct FixedClock(pub std::sync::atomic::AtomicU64);

#[cfg(test)]
impl FixedClock {
    pub fn new(t: u64) -> Self {
        FixedClock(std::sync::atomic::AtomicU64::new(t))
    }
    pub fn set(&self, t: u64) {
        self.0.store(t, std::sync::atomic::Ordering::SeqCst);
    }
}

#[cfg(test)]
impl Clock for FixedClock {
    fn now_unix(&self) -> u64 {
        self.0.load(std::sync::atomic::Ordering::SeqCst)
    }
}
