//! Runtime selection between the scalar and vector kernels
//!
//! Detection runs once per process. The chosen backend and the set of
//! backends the CPU supports are cached, so dispatching costs one load of
//! each. A pinned backend that cannot run falls back to scalar and is
//! reported once per process, not once per call.

use std::fmt;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, warn};

use super::config::RUN_LENGTH;
#[cfg(all(feature = "simd", target_arch = "x86_64"))]
use super::simd::{avx2, sse};
#[cfg(all(feature = "simd", target_arch = "aarch64"))]
use super::simd::neon;
use super::simd::scalar;

static ACTIVE: OnceLock<Backend> = OnceLock::new();

/// Bit `backend.index()` set when that backend can run here
static SUPPORTED: OnceLock<u8> = OnceLock::new();

/// One flag per backend: fallback already reported
static FALLBACK_WARNED: [AtomicBool; 4] = [
    AtomicBool::new(false),
    AtomicBool::new(false),
    AtomicBool::new(false),
    AtomicBool::new(false),
];

/// Instruction set a kernel family is compiled for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    Scalar,
    /// x86_64 baseline: vector run fill, scalar fixed widths
    Sse2,
    Avx2,
    Neon,
}

impl Backend {
    /// Best backend supported by the running CPU
    pub fn detect() -> Backend {
        [Backend::Avx2, Backend::Neon, Backend::Sse2]
            .into_iter()
            .find(|backend| backend.is_supported())
            .unwrap_or(Backend::Scalar)
    }

    /// Cached result of [`Backend::detect`]
    #[inline]
    pub fn active() -> Backend {
        *ACTIVE.get_or_init(|| {
            let backend = Backend::detect();
            debug!("simple8b: using {} unpack kernels", backend);
            backend
        })
    }

    /// Whether this backend can run on the current CPU with the enabled features
    pub fn is_supported(self) -> bool {
        match self {
            Backend::Scalar => true,
            #[cfg(all(feature = "simd", target_arch = "x86_64"))]
            Backend::Sse2 => sse::is_available(),
            #[cfg(all(feature = "simd", target_arch = "x86_64"))]
            Backend::Avx2 => avx2::is_available(),
            #[cfg(all(feature = "simd", target_arch = "aarch64"))]
            Backend::Neon => neon::is_available(),
            _ => false,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Backend::Scalar => "scalar",
            Backend::Sse2 => "sse2",
            Backend::Avx2 => "avx2",
            Backend::Neon => "neon",
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    /// Cached [`Backend::is_supported`] for every backend
    #[inline]
    fn supported_mask() -> u8 {
        *SUPPORTED.get_or_init(|| {
            [Backend::Scalar, Backend::Sse2, Backend::Avx2, Backend::Neon]
                .into_iter()
                .filter(|backend| backend.is_supported())
                .fold(0u8, |mask, backend| mask | (1 << backend.index()))
        })
    }

    /// `self` if it can run here, otherwise scalar
    #[inline]
    fn resolve(self) -> Backend {
        if Self::supported_mask() & (1 << self.index()) != 0 {
            self
        } else {
            self.fall_back()
        }
    }

    #[cold]
    fn fall_back(self) -> Backend {
        if !FALLBACK_WARNED[self.index()].swap(true, Ordering::Relaxed) {
            warn!(
                "simple8b: {} kernels unavailable on this CPU, falling back to scalar",
                self
            );
        }
        Backend::Scalar
    }

    /// Write 240 copies of `1` using this backend
    pub fn decode_run(self, dst: &mut [u64; RUN_LENGTH]) {
        match self.resolve() {
            #[cfg(all(feature = "simd", target_arch = "x86_64"))]
            Backend::Avx2 => unsafe { avx2::unpack_run_240(dst) },
            #[cfg(all(feature = "simd", target_arch = "x86_64"))]
            Backend::Sse2 => unsafe { sse::unpack_run_240(dst) },
            #[cfg(all(feature = "simd", target_arch = "aarch64"))]
            Backend::Neon => unsafe { neon::unpack_run_240(dst) },
            _ => scalar::unpack_run_240(dst),
        }
    }

    /// 60 x 1-bit fields using this backend
    pub fn decode_fixed_1(self, word: u64, dst: &mut [u64; 60]) {
        match self.resolve() {
            #[cfg(all(feature = "simd", target_arch = "x86_64"))]
            Backend::Avx2 => unsafe { avx2::unpack_1bit(word, dst) },
            #[cfg(all(feature = "simd", target_arch = "aarch64"))]
            Backend::Neon => unsafe { neon::unpack_1bit(word, dst) },
            _ => scalar::unpack_1bit(word, dst),
        }
    }

    /// 30 x 2-bit fields using this backend
    pub fn decode_fixed_2(self, word: u64, dst: &mut [u64; 30]) {
        match self.resolve() {
            #[cfg(all(feature = "simd", target_arch = "x86_64"))]
            Backend::Avx2 => unsafe { avx2::unpack_2bit(word, dst) },
            #[cfg(all(feature = "simd", target_arch = "aarch64"))]
            Backend::Neon => unsafe { neon::unpack_2bit(word, dst) },
            _ => scalar::unpack_2bit(word, dst),
        }
    }

    /// 20 x 3-bit fields using this backend
    pub fn decode_fixed_3(self, word: u64, dst: &mut [u64; 20]) {
        match self.resolve() {
            #[cfg(all(feature = "simd", target_arch = "x86_64"))]
            Backend::Avx2 => unsafe { avx2::unpack_3bit(word, dst) },
            #[cfg(all(feature = "simd", target_arch = "aarch64"))]
            Backend::Neon => unsafe { neon::unpack_3bit(word, dst) },
            _ => scalar::unpack_3bit(word, dst),
        }
    }

    /// 15 x 4-bit fields using this backend
    pub fn decode_fixed_4(self, word: u64, dst: &mut [u64; 15]) {
        match self.resolve() {
            #[cfg(all(feature = "simd", target_arch = "x86_64"))]
            Backend::Avx2 => unsafe { avx2::unpack_4bit(word, dst) },
            #[cfg(all(feature = "simd", target_arch = "aarch64"))]
            Backend::Neon => unsafe { neon::unpack_4bit(word, dst) },
            _ => scalar::unpack_4bit(word, dst),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
