use serde::{Deserialize, Serialize};

/// Database statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbStats {
    /// Total number of operations performed
    pub operations_count: u64,
    /// Records committed to both indices
    pub inserts: u64,
    /// Inserts refused for invalid input or an occupied coordinate
    pub rejected_inserts: u64,
    /// Records removed from both indices
    pub deletes: u64,
    /// Range searches served
    pub searches: u64,
    /// Records currently stored
    pub record_count: usize,
    /// Height of the spatial index (0 when empty)
    pub spatial_height: usize,
    /// Height of the name index (0 when empty)
    pub name_height: usize,
}

impl DbStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_operation(&mut self) {
        self.operations_count += 1;
    }

    pub fn record_insert(&mut self) {
        self.inserts += 1;
    }

    pub fn record_rejected_insert(&mut self) {
        self.rejected_inserts += 1;
    }

    pub fn record_deletes(&mut self, count: u64) {
        self.deletes += count;
    }

    pub fn record_search(&mut self) {
        self.searches += 1;
    }
}
