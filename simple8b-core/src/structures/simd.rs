//! SIMD-accelerated Simple8b unpack kernels
//!
//! One kernel per supported selector:
//! - **Run**: 240 copies of `1` (selector 0, no payload)
//! - **Fixed width**: 60 x 1-bit, 30 x 2-bit, 20 x 3-bit, 15 x 4-bit fields
//!   packed from the low end of the word
//!
//! Supports:
//! - **AVX2** on x86_64: four 64-bit lanes per register, masked tail store
//! - **SSE2** on x86_64: run kernel only (the fixed widths fall back to scalar)
//! - **NEON** on aarch64: two 128-bit halves per group of four
//! - **Scalar fallback** for other architectures
//!
//! The ISA modules are public so a caller that already resolved CPU features
//! can call a kernel directly. The free functions at the bottom dispatch
//! through [`Backend::active`].
//!
//! Kernels never validate the word: bits above `count * bit_width` are
//! ignored, whatever their value.

use super::backend::Backend;
use super::config::RUN_LENGTH;

// ============================================================================
// NEON intrinsics for aarch64 (Apple Silicon, ARM servers)
// ============================================================================

#[cfg(all(feature = "simd", target_arch = "aarch64"))]
#[allow(unsafe_op_in_unsafe_fn)]
pub mod neon {
    use super::RUN_LENGTH;
    use crate::structures::config::RUN_VALUE;
    use std::arch::aarch64::*;

    /// Fill 240 slots with `1`, 8 values (64 bytes) per iteration
    #[target_feature(enable = "neon")]
    pub unsafe fn unpack_run_240(dst: &mut [u64; RUN_LENGTH]) {
        let ones = vdupq_n_u64(RUN_VALUE);
        let out = dst.as_mut_ptr();

        for chunk in 0..RUN_LENGTH / 8 {
            let base = out.add(chunk * 8);
            vst1q_u64(base, ones);
            vst1q_u64(base.add(2), ones);
            vst1q_u64(base.add(4), ones);
            vst1q_u64(base.add(6), ones);
        }
    }

    /// Generic fixed-width unpack on two `uint64x2_t` halves
    ///
    /// `lo` holds fields 0,1 and `hi` fields 2,3 of the current group. Each
    /// step masks out four values, then shifts every lane by `4 * BITS`.
    #[inline]
    #[target_feature(enable = "neon")]
    unsafe fn unpack_fixed<const COUNT: usize, const BITS: u32>(
        word: u64,
        dst: &mut [u64; COUNT],
    ) {
        let groups = COUNT / 4;
        let tail = COUNT % 4;

        let mut lo = vcombine_u64(vcreate_u64(word), vcreate_u64(word >> BITS));
        let mut hi = vcombine_u64(vcreate_u64(word >> (2 * BITS)), vcreate_u64(word >> (3 * BITS)));
        let mask = vdupq_n_u64((1u64 << BITS) - 1);
        // vshlq with a negative count is a logical right shift for unsigned lanes
        let shift = vdupq_n_s64(-((4 * BITS) as i64));

        let out = dst.as_mut_ptr();
        for group in 0..groups {
            let base = out.add(group * 4);
            vst1q_u64(base, vandq_u64(lo, mask));
            vst1q_u64(base.add(2), vandq_u64(hi, mask));
            lo = vshlq_u64(lo, shift);
            hi = vshlq_u64(hi, shift);
        }

        // No masked store on NEON: write exactly `tail` lanes
        let base = out.add(groups * 4);
        match tail {
            1 => vst1_u64(base, vget_low_u64(vandq_u64(lo, mask))),
            2 => vst1q_u64(base, vandq_u64(lo, mask)),
            3 => {
                vst1q_u64(base, vandq_u64(lo, mask));
                vst1_u64(base.add(2), vget_low_u64(vandq_u64(hi, mask)));
            }
            _ => {}
        }
    }

    /// 60 x 1-bit fields
    #[target_feature(enable = "neon")]
    pub unsafe fn unpack_1bit(word: u64, dst: &mut [u64; 60]) {
        unpack_fixed::<60, 1>(word, dst);
    }

    /// 30 x 2-bit fields
    #[target_feature(enable = "neon")]
    pub unsafe fn unpack_2bit(word: u64, dst: &mut [u64; 30]) {
        unpack_fixed::<30, 2>(word, dst);
    }

    /// 20 x 3-bit fields
    #[target_feature(enable = "neon")]
    pub unsafe fn unpack_3bit(word: u64, dst: &mut [u64; 20]) {
        unpack_fixed::<20, 3>(word, dst);
    }

    /// 15 x 4-bit fields
    #[target_feature(enable = "neon")]
    pub unsafe fn unpack_4bit(word: u64, dst: &mut [u64; 15]) {
        unpack_fixed::<15, 4>(word, dst);
    }

    /// Check if NEON is available (always true on aarch64)
    #[inline]
    pub fn is_available() -> bool {
        true
    }
}

// ============================================================================
// SSE intrinsics for x86_64 (Intel/AMD)
// ============================================================================

#[cfg(all(feature = "simd", target_arch = "x86_64"))]
#[allow(unsafe_op_in_unsafe_fn)]
pub mod sse {
    use super::RUN_LENGTH;
    use crate::structures::config::RUN_VALUE;
    use std::arch::x86_64::*;

    /// Fill 240 slots with `1` using 128-bit stores, 64 bytes per iteration
    #[target_feature(enable = "sse2")]
    pub unsafe fn unpack_run_240(dst: &mut [u64; RUN_LENGTH]) {
        let ones = _mm_set1_epi64x(RUN_VALUE as i64);
        let out = dst.as_mut_ptr() as *mut __m128i;

        for chunk in 0..RUN_LENGTH / 8 {
            let base = out.add(chunk * 4);
            _mm_storeu_si128(base, ones);
            _mm_storeu_si128(base.add(1), ones);
            _mm_storeu_si128(base.add(2), ones);
            _mm_storeu_si128(base.add(3), ones);
        }
    }

    /// SSE2 is part of the x86_64 baseline
    #[inline]
    pub fn is_available() -> bool {
        is_x86_feature_detected!("sse2")
    }
}

// ============================================================================
// AVX2 intrinsics for x86_64 (Intel/AMD with 256-bit registers)
// ============================================================================

#[cfg(all(feature = "simd", target_arch = "x86_64"))]
#[allow(unsafe_op_in_unsafe_fn)]
pub mod avx2 {
    use super::RUN_LENGTH;
    use crate::structures::aligned::AlignedBlock;
    use crate::structures::config::RUN_VALUE;
    use std::arch::x86_64::*;

    /// Fill 240 slots with `1`, two 256-bit stores (8 values) per iteration
    #[target_feature(enable = "avx2")]
    pub unsafe fn unpack_run_240(dst: &mut [u64; RUN_LENGTH]) {
        let ones = _mm256_set1_epi64x(RUN_VALUE as i64);
        let out = dst.as_mut_ptr() as *mut __m256i;

        for chunk in 0..RUN_LENGTH / 8 {
            _mm256_storeu_si256(out.add(chunk * 2), ones);
            _mm256_storeu_si256(out.add(chunk * 2 + 1), ones);
        }
    }

    /// Run fill with aligned stores into a 64-byte aligned block
    #[target_feature(enable = "avx2")]
    pub unsafe fn unpack_run_240_aligned(dst: &mut AlignedBlock) {
        let ones = _mm256_set1_epi64x(RUN_VALUE as i64);
        let out = dst.as_array_mut().as_mut_ptr() as *mut __m256i;

        for chunk in 0..RUN_LENGTH / 8 {
            _mm256_store_si256(out.add(chunk * 2), ones);
            _mm256_store_si256(out.add(chunk * 2 + 1), ones);
        }
    }

    /// Store mask with the low `tail` lanes set (sign bit drives maskstore)
    #[inline]
    #[target_feature(enable = "avx2")]
    unsafe fn tail_mask(tail: usize) -> __m256i {
        let lane = |i: usize| if i < tail { -1i64 } else { 0 };
        _mm256_set_epi64x(lane(3), lane(2), lane(1), lane(0))
    }

    /// Generic fixed-width unpack over four 64-bit lanes
    ///
    /// Lanes start as `[w, w >> b, w >> 2b, w >> 3b]`, so lane `j` of group
    /// `g` holds field `4g + j` in its low bits. A group is AND + store, then
    /// every lane shifts right by `4 * b` for the next group.
    #[inline]
    #[target_feature(enable = "avx2")]
    unsafe fn unpack_fixed<const COUNT: usize, const BITS: u32>(
        word: u64,
        dst: &mut [u64; COUNT],
    ) {
        let groups = COUNT / 4;
        let tail = COUNT % 4;

        let lo = _mm_set_epi64x((word >> BITS) as i64, word as i64);
        let hi = _mm_set_epi64x((word >> (3 * BITS)) as i64, (word >> (2 * BITS)) as i64);
        let mut lanes = _mm256_set_m128i(hi, lo);

        let mask = _mm256_set1_epi64x(((1u64 << BITS) - 1) as i64);
        let shift = _mm_cvtsi64_si128((4 * BITS) as i64);

        let out = dst.as_mut_ptr();
        for group in 0..groups {
            let values = _mm256_and_si256(lanes, mask);
            _mm256_storeu_si256(out.add(group * 4) as *mut __m256i, values);
            lanes = _mm256_srl_epi64(lanes, shift);
        }

        if tail > 0 {
            let values = _mm256_and_si256(lanes, mask);
            _mm256_maskstore_epi64(out.add(groups * 4) as *mut i64, tail_mask(tail), values);
        }
    }

    /// 60 x 1-bit fields (15 groups, no tail)
    #[target_feature(enable = "avx2")]
    pub unsafe fn unpack_1bit(word: u64, dst: &mut [u64; 60]) {
        unpack_fixed::<60, 1>(word, dst);
    }

    /// 30 x 2-bit fields (7 groups, tail of 2)
    #[target_feature(enable = "avx2")]
    pub unsafe fn unpack_2bit(word: u64, dst: &mut [u64; 30]) {
        unpack_fixed::<30, 2>(word, dst);
    }

    /// 20 x 3-bit fields (5 groups, no tail)
    #[target_feature(enable = "avx2")]
    pub unsafe fn unpack_3bit(word: u64, dst: &mut [u64; 20]) {
        unpack_fixed::<20, 3>(word, dst);
    }

    /// 15 x 4-bit fields (3 groups, tail of 3)
    #[target_feature(enable = "avx2")]
    pub unsafe fn unpack_4bit(word: u64, dst: &mut [u64; 15]) {
        unpack_fixed::<15, 4>(word, dst);
    }

    /// Check if AVX2 is available at runtime
    #[inline]
    pub fn is_available() -> bool {
        is_x86_feature_detected!("avx2")
    }
}

// ============================================================================
// Scalar fallback implementations
// ============================================================================

pub mod scalar {
    use super::RUN_LENGTH;
    use crate::structures::config::RUN_VALUE;

    /// Scalar run fill
    #[inline]
    pub fn unpack_run_240(dst: &mut [u64; RUN_LENGTH]) {
        dst.fill(RUN_VALUE);
    }

    /// Reference definition: `dst[i] = (word >> (i * BITS)) & mask`
    #[inline]
    pub fn unpack_fixed<const COUNT: usize, const BITS: u32>(word: u64, dst: &mut [u64; COUNT]) {
        let mask = (1u64 << BITS) - 1;
        for (i, out) in dst.iter_mut().enumerate() {
            *out = (word >> (i as u32 * BITS)) & mask;
        }
    }

    #[inline]
    pub fn unpack_1bit(word: u64, dst: &mut [u64; 60]) {
        unpack_fixed::<60, 1>(word, dst);
    }

    #[inline]
    pub fn unpack_2bit(word: u64, dst: &mut [u64; 30]) {
        unpack_fixed::<30, 2>(word, dst);
    }

    #[inline]
    pub fn unpack_3bit(word: u64, dst: &mut [u64; 20]) {
        unpack_fixed::<20, 3>(word, dst);
    }

    #[inline]
    pub fn unpack_4bit(word: u64, dst: &mut [u64; 15]) {
        unpack_fixed::<15, 4>(word, dst);
    }
}

// ============================================================================
// Public dispatch functions that select SIMD or scalar at runtime
// ============================================================================

/// Decode selector 0: write 240 copies of `1`
#[inline]
pub fn decode_run(dst: &mut [u64; RUN_LENGTH]) {
    Backend::active().decode_run(dst);
}

/// Decode 60 x 1-bit fields from the low 60 bits of `word`
#[inline]
pub fn decode_fixed_1(word: u64, dst: &mut [u64; 60]) {
    Backend::active().decode_fixed_1(word, dst);
}

/// Decode 30 x 2-bit fields from the low 60 bits of `word`
#[inline]
pub fn decode_fixed_2(word: u64, dst: &mut [u64; 30]) {
    Backend::active().decode_fixed_2(word, dst);
}

/// Decode 20 x 3-bit fields from the low 60 bits of `word`
#[inline]
pub fn decode_fixed_3(word: u64, dst: &mut [u64; 20]) {
    Backend::active().decode_fixed_3(word, dst);
}

/// Decode 15 x 4-bit fields from the low 60 bits of `word`
#[inline]
pub fn decode_fixed_4(word: u64, dst: &mut [u64; 15]) {
    Backend::active().decode_fixed_4(word, dst);
}
