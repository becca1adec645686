//! Caller-owned working memory for the fragment compressor.
//!
//! The only mutable state the codec needs is a hash table of 16-bit
//! fragment-relative offsets.  [`WorkingMemory`] owns the allocation so that
//! repeated compress calls amortize it; each call re-borrows a
//! fragment-sized, freshly zeroed prefix.  Instances must not be shared
//! between threads mid-call — each caller owns one (or leases one from a
//! pool it manages itself).

use super::types::{MAX_HASH_TABLE_SIZE, MIN_HASH_TABLE_SIZE};

/// Reusable scratch backing the match-finder hash table.
pub struct WorkingMemory {
    table: Vec<u16>,
}

impl WorkingMemory {
    /// Create empty working memory; the table is allocated on first use.
    pub fn new() -> Self {
        Self { table: Vec::new() }
    }

    /// Borrow a zeroed hash table sized for a fragment of `fragment_len`
    /// bytes: the smallest power of two ≥ `fragment_len`, clamped to
    /// [256, 16384] slots.
    ///
    /// Only the returned prefix is zeroed; any larger allocation from a
    /// previous call keeps its stale tail untouched.
    pub fn hash_table(&mut self, fragment_len: usize) -> &mut [u16] {
        let mut size = MIN_HASH_TABLE_SIZE;
        while size < MAX_HASH_TABLE_SIZE && size < fragment_len {
            size <<= 1;
        }
        debug_assert!(size.is_power_of_two());

        if self.table.len() < size {
            self.table.resize(size, 0);
        }
        let table = &mut self.table[..size];
        table.fill(0);
        table
    }
}

impl Default for WorkingMemory {
    fn default() -> Self {
        Self::new()
    }
}
