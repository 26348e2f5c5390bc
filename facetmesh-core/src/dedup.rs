//! Point deduplication for soup-to-mesh indexing
//!
//! A bloom filter sits in front of an exact linear search over the points seen
//! so far. A "definitely absent" answer from the filter lets a new point be
//! appended without scanning; a "maybe present" answer falls back to the scan,
//! which either finds the duplicate or records a false positive.

use crate::error::{Error, Result};
use crate::geometry::points_equal;
use crate::point::{point_bits, Point3f};
use serde::{Deserialize, Serialize};

/// Smallest filter table, in bytes
const MIN_TABLE_BYTES: usize = 64;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a over the exact coordinate bit patterns of a point
#[inline]
fn hash_point(p: &Point3f) -> u64 {
    let mut hash = FNV_OFFSET;
    for word in point_bits(p) {
        for byte in word.to_le_bytes() {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(FNV_PRIME);
        }
    }
    hash
}

/// Bloom filter over point coordinates.
///
/// Bit positions use double hashing (`h1 + i * h2`) so a single FNV-1a hash
/// feeds every lookup. False positives are possible; false negatives are not.
#[derive(Debug, Clone)]
pub struct BloomFilter {
    bits: Vec<u8>,
    hash_count: u32,
}

impl BloomFilter {
    /// Create a filter with `table_bytes` bytes of bit table and `hash_count` bits per point
    pub fn new(table_bytes: usize, hash_count: u32) -> Self {
        Self {
            bits: vec![0u8; table_bytes.max(MIN_TABLE_BYTES)],
            hash_count: hash_count.max(1),
        }
    }

    /// Size a filter for a mesh of `expected_facets` facets.
    ///
    /// The table holds `expected_facets * complexity` bytes and each point is
    /// checked at `complexity * 4` bits, so raising the complexity trades memory
    /// for fewer false positives.
    pub fn for_facets(expected_facets: usize, complexity: u32) -> Self {
        let table_bytes = expected_facets.saturating_mul(complexity as usize);
        Self::new(table_bytes, complexity.saturating_mul(4))
    }

    /// Number of bits in the table
    pub fn bit_len(&self) -> usize {
        self.bits.len() * 8
    }

    /// Number of bits set per point
    pub fn hash_count(&self) -> u32 {
        self.hash_count
    }

    /// Insert a point
    pub fn insert(&mut self, p: &Point3f) {
        let nbits = self.bit_len() as u64;
        let (h1, h2) = Self::double_hash(hash_point(p));
        for i in 0..u64::from(self.hash_count) {
            let bit = (h1.wrapping_add(i.wrapping_mul(h2)) % nbits) as usize;
            self.bits[bit >> 3] |= 1 << (bit & 7);
        }
    }

    /// `false` means the point was definitely never inserted
    pub fn may_contain(&self, p: &Point3f) -> bool {
        let nbits = self.bit_len() as u64;
        let (h1, h2) = Self::double_hash(hash_point(p));
        (0..u64::from(self.hash_count)).all(|i| {
            let bit = (h1.wrapping_add(i.wrapping_mul(h2)) % nbits) as usize;
            self.bits[bit >> 3] & (1 << (bit & 7)) != 0
        })
    }

    #[inline]
    fn double_hash(hash: u64) -> (u64, u64) {
        let h1 = hash & 0xFFFF_FFFF;
        // odd step so positions never collapse onto one bit
        let h2 = (hash >> 32) | 1;
        (h1, h2)
    }
}

/// Statistics gathered while deduplicating points
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DedupStats {
    /// Points looked up
    pub lookups: usize,
    /// Lookups the filter could not rule out, each costing a linear search
    pub linear_searches: usize,
    /// Total point comparisons made by linear searches
    pub scan_cost: usize,
    /// Linear searches that found no match
    pub false_positives: usize,
    /// Distinct points indexed
    pub vertices: usize,
}

impl DedupStats {
    /// Linear searches avoided thanks to the filter
    pub fn searches_saved(&self) -> usize {
        self.lookups - self.linear_searches
    }

    /// Percentage of lookups that skipped the linear search
    pub fn searches_saved_percent(&self) -> f64 {
        if self.lookups == 0 {
            0.0
        } else {
            self.searches_saved() as f64 * 100.0 / self.lookups as f64
        }
    }

    /// Fraction of linear searches that were false positives
    pub fn false_positive_rate(&self) -> f64 {
        if self.linear_searches == 0 {
            0.0
        } else {
            self.false_positives as f64 / self.linear_searches as f64
        }
    }

    /// Mean comparisons per linear search
    pub fn average_scan_cost(&self) -> f64 {
        if self.linear_searches == 0 {
            0.0
        } else {
            self.scan_cost as f64 / self.linear_searches as f64
        }
    }
}

/// Maps coordinates to dense point slots, one slot per distinct coordinate
#[derive(Debug, Clone)]
pub struct PointIndex {
    filter: BloomFilter,
    points: Vec<Point3f>,
    stats: DedupStats,
}

impl PointIndex {
    /// Create an index sized for `expected_facets` facets
    pub fn new(expected_facets: usize, complexity: u32) -> Result<Self> {
        if complexity == 0 {
            return Err(Error::InvalidData(
                "Deduplication complexity must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            filter: BloomFilter::for_facets(expected_facets, complexity),
            points: Vec::with_capacity(expected_facets),
            stats: DedupStats::default(),
        })
    }

    /// Return the slot for `p`, creating one on first occurrence
    pub fn insert(&mut self, p: &Point3f) -> usize {
        self.stats.lookups += 1;

        if self.filter.may_contain(p) {
            self.stats.linear_searches += 1;
            for (slot, existing) in self.points.iter().enumerate() {
                self.stats.scan_cost += 1;
                if points_equal(existing, p) {
                    return slot;
                }
            }
            self.stats.false_positives += 1;
        }

        self.filter.insert(p);
        self.points.push(*p);
        self.stats.vertices = self.points.len();
        self.points.len() - 1
    }

    /// Points indexed so far, in slot order
    pub fn points(&self) -> &[Point3f] {
        &self.points
    }

    pub fn stats(&self) -> DedupStats {
        self.stats
    }

    /// Consume the index, releasing the filter
    pub fn into_parts(self) -> (Vec<Point3f>, DedupStats) {
        (self.points, self.stats)
    }
}
