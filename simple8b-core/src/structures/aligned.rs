//! Cache-line aligned output block
//!
//! A `[u64; 240]` holds the output of any single Simple8b word. Aligning it
//! to 64 bytes lets the vector kernels use aligned stores and keeps every
//! 256-bit store inside one cache line.

use std::ops::{Deref, DerefMut};

use super::config::RUN_LENGTH;

/// Alignment of [`AlignedBlock`] in bytes
pub const BLOCK_ALIGNMENT: usize = 64;

/// 64-byte aligned destination for one decoded Simple8b word
#[derive(Debug, Clone, PartialEq, Eq)]
#[repr(C, align(64))]
pub struct AlignedBlock([u64; RUN_LENGTH]);

impl AlignedBlock {
    /// Zeroed block
    pub const fn new() -> Self {
        Self([0; RUN_LENGTH])
    }

    /// Block with every slot set to `value`
    pub const fn filled(value: u64) -> Self {
        Self([value; RUN_LENGTH])
    }

    #[inline]
    pub fn as_array(&self) -> &[u64; RUN_LENGTH] {
        &self.0
    }

    #[inline]
    pub fn as_array_mut(&mut self) -> &mut [u64; RUN_LENGTH] {
        &mut self.0
    }

    /// Fixed-size prefix for a kernel writing `N` values
    ///
    /// Returns `None` when `N` exceeds the block.
    #[inline]
    pub fn prefix_mut<const N: usize>(&mut self) -> Option<&mut [u64; N]> {
        self.0.first_chunk_mut::<N>()
    }
}

impl Default for AlignedBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for AlignedBlock {
    type Target = [u64; RUN_LENGTH];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for AlignedBlock {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
