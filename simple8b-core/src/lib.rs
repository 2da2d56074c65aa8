//! simple8b-core - Simple8b word decode kernels
//!
//! Simple8b packs between 1 and 240 small unsigned integers into one 64-bit
//! word. This crate provides the per-selector kernels that unpack a single
//! word into a fixed-size output array:
//! - The payload-free run of 240 ones (selector 0)
//! - 60 x 1-bit, 30 x 2-bit, 20 x 3-bit and 15 x 4-bit fields (selectors 2-5)
//!
//! Each kernel is available as scalar code and, with the `simd` feature, as
//! AVX2/SSE2 (x86_64) or NEON (aarch64) code. The top-level functions pick the
//! best backend for the running CPU once and reuse it.
//!
//! ```
//! let mut dst = [0u64; 15];
//! simple8b_core::decode_fixed_4((1 << 60) - 1, &mut dst);
//! assert_eq!(dst, [15; 15]);
//! ```

pub mod error;
pub mod structures;

pub use error::{Error, Result};

// Re-exports from structures
pub use structures::simd;
pub use structures::{
    AlignedBlock, Backend, FIXED_1X60, FIXED_2X30, FIXED_3X20, FIXED_4X15, KernelConfig,
    PAYLOAD_BITS, RUN_240, RUN_LENGTH, SUPPORTED_CONFIGS, block_mut, decode_fixed_1,
    decode_fixed_2, decode_fixed_3, decode_fixed_4, decode_into, decode_run,
};
