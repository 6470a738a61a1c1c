use std::collections::HashMap;

/// `peerAddress -> last reported LastBlock`. Entries are created
/// on receipt of any `GetBlocks`/`AnnounceBlocks` and destroyed on peer
/// disconnect (`RemoveConnection`).
#[derive(Default, Debug)]
pub struct PeerHeightMap {
    heights: HashMap<String, u64>,
}

impl PeerHeightMap {
    pub fn new() -> Self {
        PeerHeightMap::default()
    }

    pub fn record(&mut self, addr: &str, seq: u64) {
        self.heights.insert(addr.to_string(), seq);
    }

    pub fn remove(&mut self, addr: &str) {
        self.heights.remove(addr);
    }

    pub fn values(&self) -> Vec<u64> {
        self.heights.values().copied().collect()
    }

    pub fn snapshot(&self) -> Vec<(String, u64)> {
        self.heights.iter().map(|(k, v)| (k.clone(), *v)).collect()
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_then_remove_round_trips() {
        let mut m = PeerHeightMap::new();
        m.record("peer-a", 10);
        assert_eq!(m.values(), vec![10]);
        m.remove("peer-a");
        assert!(m.is_empty());
    }

    #[test]
    fn record_overwrites_previous_report() {
        let mut m = PeerHeightMap::new();
        m.record("peer-a", 10);
        m.record("peer-a", 15);
        assert_eq!(m.values(), vec![15]);
    }
}
