//! Chunked bitmask over logic-index space.
//!
//! Chunk `i` holds logic bits `[32i, 32i + 31]`. All masks built against
//! the same [`TimeGrid`](super::TimeGrid) share one chunk count; comparing
//! masks of different widths is a programming error.

use serde::{Deserialize, Serialize};

use super::grid::MASK_CHUNK_BITS;
use crate::error::{Result, TimetableError};

/// Occupancy bitmask in logic space.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotMask {
    chunks: Vec<u32>,
}

impl SlotMask {
    /// Creates an all-zero mask with `chunk_count` chunks.
    pub fn empty(chunk_count: usize) -> Self {
        Self {
            chunks: vec![0; chunk_count],
        }
    }

    /// Builds a mask from raw chunks.
    pub fn from_chunks(chunks: Vec<u32>) -> Self {
        Self { chunks }
    }

    pub fn chunks(&self) -> &[u32] {
        &self.chunks
    }

    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    #[inline]
    fn locate(bit: usize) -> (usize, u32) {
        (bit / MASK_CHUNK_BITS, 1u32 << (bit % MASK_CHUNK_BITS))
    }

    /// Sets a logic bit.
    ///
    /// # Panics
    /// If `bit` lies beyond the mask width.
    pub fn set(&mut self, bit: usize) {
        let (chunk, flag) = Self::locate(bit);
        self.chunks[chunk] |= flag;
    }

    /// Whether a logic bit is set. Bits beyond the width read as unset.
    pub fn contains(&self, bit: usize) -> bool {
        let (chunk, flag) = Self::locate(bit);
        self.chunks.get(chunk).is_some_and(|c| c & flag != 0)
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.iter().all(|&c| c == 0)
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> u32 {
        self.chunks.iter().map(|c| c.count_ones()).sum()
    }

    /// Iterates set logic bits in ascending order.
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.chunks.iter().enumerate().flat_map(|(i, &chunk)| {
            (0..MASK_CHUNK_BITS)
                .filter(move |b| chunk & (1u32 << b) != 0)
                .map(move |b| i * MASK_CHUNK_BITS + b)
        })
    }

    /// Whether any chunk pair shares a set bit.
    ///
    /// # Panics
    /// If the chunk counts differ.
    pub fn intersects(&self, other: &Self) -> bool {
        assert_eq!(
            self.chunks.len(),
            other.chunks.len(),
            "mask width mismatch: masks built against different grids"
        );
        self.chunks
            .iter()
            .zip(&other.chunks)
            .any(|(a, b)| a & b != 0)
    }

    /// Checked form of [`intersects`](Self::intersects).
    pub fn try_intersects(&self, other: &Self) -> Result<bool> {
        self.check_width(other)?;
        Ok(self.intersects(other))
    }

    /// `self |= other`.
    ///
    /// # Panics
    /// If the chunk counts differ.
    pub fn union_with(&mut self, other: &Self) {
        assert_eq!(self.chunks.len(), other.chunks.len(), "mask width mismatch");
        for (a, b) in self.chunks.iter_mut().zip(&other.chunks) {
            *a |= b;
        }
    }

    /// `self &= !other`. Undoes a [`union_with`](Self::union_with) of a
    /// mask that was disjoint from `self` beforehand.
    ///
    /// # Panics
    /// If the chunk counts differ.
    pub fn remove(&mut self, other: &Self) {
        assert_eq!(self.chunks.len(), other.chunks.len(), "mask width mismatch");
        for (a, b) in self.chunks.iter_mut().zip(&other.chunks) {
            *a &= !b;
        }
    }

    /// Errors with `MaskWidthMismatch` unless both masks share a width.
    pub fn check_width(&self, other: &Self) -> Result<()> {
        if self.chunks.len() == other.chunks.len() {
            Ok(())
        } else {
            Err(TimetableError::MaskWidthMismatch {
                expected: self.chunks.len(),
                found: other.chunks.len(),
            })
        }
    }
}
