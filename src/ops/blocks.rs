//! Block-structured dimension bookkeeping for n-ary products.
//!
//! A block structure maps between the global ambient coordinate space and the
//! per-child local spaces of an n-ary Cartesian product: an ordered sequence
//! of (child index, dimension range) pairs partitioning `[0, total)`
//! contiguously in child order. It is a pure function of the immutable child
//! sequence, computed once at construction and stored.

use crate::errors::{SetError, SetResult};
use nalgebra::{DVector, Scalar};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// One contiguous slice of the ambient space owned by a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Index of the owning child in the product's child sequence.
    pub child: usize,
    /// First global dimension of the block (inclusive).
    pub start: usize,
    /// One past the last global dimension of the block.
    pub end: usize,
}

impl Block {
    /// Number of dimensions in the block.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the block covers no dimensions.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The global dimension range.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// The partition of an ambient space into contiguous per-child ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockStructure {
    blocks: Vec<Block>,
    total: usize,
}

impl BlockStructure {
    /// Build the partition from the ordered child dimensions.
    pub fn from_dims(dims: &[usize]) -> Self {
        let mut blocks = Vec::with_capacity(dims.len());
        let mut start = 0;
        for (child, &d) in dims.iter().enumerate() {
            blocks.push(Block {
                child,
                start,
                end: start + d,
            });
            start += d;
        }
        Self {
            blocks,
            total: start,
        }
    }

    /// Total ambient dimension covered by the partition.
    pub fn total_dim(&self) -> usize {
        self.total
    }

    /// Number of blocks.
    pub fn num_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// The `i`-th block.
    pub fn block(&self, i: usize) -> &Block {
        &self.blocks[i]
    }

    /// Iterate the blocks in child order.
    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    /// Index of the block owning a global dimension, if in range.
    pub fn block_of_dim(&self, dim: usize) -> Option<usize> {
        self.blocks
            .iter()
            .position(|b| b.start <= dim && dim < b.end)
    }

    /// Split a global vector into per-block local vectors.
    ///
    /// The caller checks the global length; block boundaries then split it
    /// with no overlap and no gap.
    pub fn split<N: Scalar>(&self, v: &DVector<N>) -> Vec<DVector<N>> {
        debug_assert_eq!(v.len(), self.total);
        self.blocks
            .iter()
            .map(|b| v.rows(b.start, b.len()).into_owned())
            .collect()
    }

    /// Reassemble per-block local vectors into one global vector.
    pub fn assemble<N: Scalar + num_traits::Zero + Copy>(
        &self,
        parts: &[DVector<N>],
    ) -> SetResult<DVector<N>> {
        if parts.len() != self.blocks.len() {
            return Err(SetError::dim_mismatch(
                "BlockStructure::assemble",
                self.blocks.len(),
                parts.len(),
            ));
        }
        let mut out = DVector::zeros(self.total);
        for (block, part) in self.blocks.iter().zip(parts.iter()) {
            if part.len() != block.len() {
                return Err(SetError::dim_mismatch(
                    "BlockStructure::assemble",
                    block.len(),
                    part.len(),
                ));
            }
            out.rows_mut(block.start, block.len()).copy_from(part);
        }
        Ok(out)
    }
}
