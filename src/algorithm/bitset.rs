use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset over tile indices
///
/// Used for adjacency sets and pattern-cell index sets. Indices are 0-based
/// positions into the tile catalogue (or into a pattern's cells). Insertion is
/// idempotent and order-independent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileBitset {
    bits: BitVec,
}

impl TileBitset {
    /// Create a bitset with no members
    pub fn new(capacity: usize) -> Self {
        Self {
            bits: bitvec![0; capacity],
        }
    }

    /// Create a bitset from a list of indices
    ///
    /// Indices at or beyond `capacity` are ignored.
    pub fn from_indices(indices: &[usize], capacity: usize) -> Self {
        let mut bitset = Self::new(capacity);
        for &index in indices {
            bitset.insert(index);
        }
        bitset
    }

    /// Insert an index, returning whether it was newly added
    pub fn insert(&mut self, index: usize) -> bool {
        match self.bits.get_mut(index) {
            Some(mut bit) => {
                let added = !*bit;
                *bit = true;
                added
            }
            None => false,
        }
    }

    /// Test membership
    pub fn contains(&self, index: usize) -> bool {
        self.bits.get(index).as_deref() == Some(&true)
    }

    /// Test whether every member of `self` is also in `other`
    pub fn is_subset(&self, other: &Self) -> bool {
        self.iter().all(|index| other.contains(index))
    }

    /// Count members
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Iterate members in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Extract all members as a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }
}

impl fmt::Display for TileBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileBitset({} tiles: {:?})", self.count(), self.to_vec())
    }
}
