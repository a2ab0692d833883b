//! Hash-keyed deduplication of extracted patterns into tile records

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::analysis::hashing::pattern_hash;
use crate::analysis::patterns::{Pattern, PatternSample, extract_patterns};
use crate::analysis::raster::RasterSource;

/// A deduplicated pattern and how often it was sampled
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileRecord {
    /// Content hash that identifies this record
    pub hash: u32,
    /// Pixels of the first pattern seen with this hash
    pub pattern: Pattern,
    /// Number of raster windows that hashed to this value
    pub frequency: usize,
}

/// Mapping from content hash to tile record
///
/// Identity is hash-only: two patterns with the same hash are the same tile
/// even if their pixels differ. Such collisions are merged (frequency added to
/// the first-seen record) and counted in [`PatternRegistry::collisions`].
/// Records keep first-insertion order, which fixes each tile's index.
#[derive(Clone, Debug)]
pub struct PatternRegistry {
    pattern_size: usize,
    records: Vec<TileRecord>,
    index_by_hash: HashMap<u32, usize>,
    collisions: usize,
}

impl PatternRegistry {
    /// Create an empty registry for patterns of the given side length
    pub fn new(pattern_size: usize) -> Self {
        Self {
            pattern_size,
            records: Vec::new(),
            index_by_hash: HashMap::new(),
            collisions: 0,
        }
    }

    /// Extract every window from `raster` and register it
    ///
    /// # Errors
    ///
    /// Returns an error if `pattern_size` is zero
    pub fn from_raster<R: RasterSource + ?Sized>(
        raster: &R,
        pattern_size: usize,
    ) -> crate::io::error::Result<Self> {
        let samples = extract_patterns(raster, pattern_size)?;
        let mut registry = Self::new(pattern_size);
        registry.register_samples(&samples);

        tracing::debug!(
            tiles = registry.len(),
            total_frequency = registry.total_frequency(),
            collisions = registry.collisions(),
            "registered patterns"
        );

        Ok(registry)
    }

    /// Register samples in the order given
    pub fn register_samples(&mut self, samples: &[PatternSample]) {
        for sample in samples {
            self.register(&sample.pattern);
        }
    }

    /// Register one pattern, returning the index of its tile
    pub fn register(&mut self, pattern: &Pattern) -> usize {
        let hash = pattern_hash(pattern.pixels());

        match self.index_by_hash.entry(hash) {
            Entry::Occupied(entry) => {
                let index = *entry.get();
                if let Some(record) = self.records.get_mut(index) {
                    record.frequency += 1;
                    if record.pattern != *pattern {
                        self.collisions += 1;
                        tracing::warn!(
                            hash,
                            tile = index,
                            "distinct patterns share a hash and were merged"
                        );
                    }
                }
                index
            }
            Entry::Vacant(entry) => {
                let index = self.records.len();
                entry.insert(index);
                self.records.push(TileRecord {
                    hash,
                    pattern: pattern.clone(),
                    frequency: 1,
                });
                index
            }
        }
    }

    /// Side length of registered patterns
    pub const fn pattern_size(&self) -> usize {
        self.pattern_size
    }

    /// Number of distinct tiles
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Test if nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in first-insertion order
    pub fn records(&self) -> &[TileRecord] {
        &self.records
    }

    /// Look up a record by content hash
    pub fn get_by_hash(&self, hash: u32) -> Option<&TileRecord> {
        self.index_by_hash
            .get(&hash)
            .and_then(|&index| self.records.get(index))
    }

    /// Frequency recorded for a hash, zero if absent
    pub fn frequency(&self, hash: u32) -> usize {
        self.get_by_hash(hash).map_or(0, |record| record.frequency)
    }

    /// Sum of all frequencies, equal to the number of samples registered
    pub fn total_frequency(&self) -> usize {
        self.records.iter().map(|record| record.frequency).sum()
    }

    /// Number of registrations whose hash matched a record with different pixels
    pub const fn collisions(&self) -> usize {
        self.collisions
    }

    /// Consume the registry and return its records
    pub fn into_records(self) -> Vec<TileRecord> {
        self.records
    }
}
