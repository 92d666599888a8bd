use std::collections::BTreeMap;

pub use crate::index::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strand {
    Forward,
    Reverse,
}

/// Hits of one query k-mer, split by the strand the k-mer was searched on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrandHits {
    pub forward: Vec<Position>,
    pub reverse: Vec<Position>,
}

impl StrandHits {
    pub fn total(&self) -> usize {
        self.forward.len() + self.reverse.len()
    }

    fn normalize(&mut self) {
        self.forward.sort_unstable();
        self.forward.dedup();
        self.reverse.sort_unstable();
        self.reverse.dedup();
    }
}

/// Query position -> hits, ordered by query position.
pub type LocationMap = BTreeMap<Position, StrandHits>;

/// Collects hits for detailed reports. A disabled recorder drops everything.
#[derive(Debug, Default)]
pub struct LocationRecorder {
    enabled: bool,
    map: LocationMap,
}

impl LocationRecorder {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, map: LocationMap::new() }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn record(&mut self, query: Position, hit: Position, strand: Strand) {
        if !self.enabled {
            return;
        }
        let entry = self.map.entry(query).or_default();
        match strand {
            Strand::Forward => entry.forward.push(hit),
            Strand::Reverse => entry.reverse.push(hit),
        }
    }

    /// Hands out the map with every hit list sorted ascending.
    pub fn finish(mut self) -> LocationMap {
        self.map.values_mut().for_each(StrandHits::normalize);
        self.map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_lists_come_out_sorted() {
        let q = Position::new(0, 3);
        let mut rec = LocationRecorder::new(true);
        rec.record(q, Position::new(1, 9), Strand::Forward);
        rec.record(q, Position::new(0, 3), Strand::Forward);
        rec.record(q, Position::new(0, 7), Strand::Reverse);
        rec.record(q, Position::new(0, 5), Strand::Forward);
        rec.record(q, Position::new(0, 1), Strand::Reverse);
        rec.record(q, Position::new(0, 5), Strand::Forward);
        let map = rec.finish();
        let hits = &map[&q];
        assert_eq!(hits.forward, vec![Position::new(0, 3), Position::new(0, 5), Position::new(1, 9)]);
        assert_eq!(hits.reverse, vec![Position::new(0, 1), Position::new(0, 7)]);
        assert_eq!(hits.total(), 5);
    }

    #[test]
    fn disabled_recorder_is_inert() {
        let mut rec = LocationRecorder::new(false);
        rec.record(Position::new(0, 0), Position::new(0, 0), Strand::Forward);
        assert!(rec.finish().is_empty());
    }
}
