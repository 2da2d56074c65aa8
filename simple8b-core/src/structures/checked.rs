//! Bounds-checked entry points for decoding into a caller slice
//!
//! The kernels take fixed-size arrays and never check anything. A decode loop
//! that writes into one long output slice at a moving cursor uses these
//! helpers to get the fixed-size window, with the check done once at the
//! call site.

use super::config::{
    FIXED_1X60, FIXED_2X30, FIXED_3X20, FIXED_4X15, KernelConfig, RUN_240, RUN_LENGTH,
};
use super::simd::{decode_fixed_1, decode_fixed_2, decode_fixed_3, decode_fixed_4, decode_run};
use crate::error::{Error, Result};

/// Borrow `N` slots of `dst` starting at `offset` as a fixed-size array
#[inline]
pub fn block_mut<const N: usize>(dst: &mut [u64], offset: usize) -> Result<&mut [u64; N]> {
    let available = dst.len().saturating_sub(offset);
    dst.get_mut(offset..)
        .and_then(|rest| rest.first_chunk_mut::<N>())
        .ok_or(Error::BufferTooSmall {
            needed: N,
            available,
        })
}

/// Run the kernel for `config` into the front of `dst`
///
/// Returns the number of values written, which is always `config.count`.
pub fn decode_into(config: KernelConfig, word: u64, dst: &mut [u64]) -> Result<usize> {
    if config == RUN_240 {
        decode_run(block_mut::<RUN_LENGTH>(dst, 0)?);
    } else if config == FIXED_1X60 {
        decode_fixed_1(word, block_mut(dst, 0)?);
    } else if config == FIXED_2X30 {
        decode_fixed_2(word, block_mut(dst, 0)?);
    } else if config == FIXED_3X20 {
        decode_fixed_3(word, block_mut(dst, 0)?);
    } else if config == FIXED_4X15 {
        decode_fixed_4(word, block_mut(dst, 0)?);
    } else {
        return Err(Error::UnsupportedConfig {
            count: config.count,
            bit_width: config.bit_width,
        });
    }
    Ok(config.count)
}
