//! Kernel configurations for the Simple8b selectors decoded by this crate
//!
//! A Simple8b word reserves its 4 high bits for the selector and packs the
//! values into the remaining 60 bits:
//!
//! | Selector | Bits | Count |
//! |----------|------|-------|
//! | 0        | 0    | 240   |
//! | 2        | 1    | 60    |
//! | 3        | 2    | 30    |
//! | 4        | 3    | 20    |
//! | 5        | 4    | 15    |
//!
//! Each row maps to a dedicated kernel; the configuration is never a runtime
//! parameter of the kernels themselves.

/// Number of values produced by the run kernel (selector 0)
pub const RUN_LENGTH: usize = 240;

/// Value repeated by the run kernel
pub const RUN_VALUE: u64 = 1;

/// Usable payload bits of a Simple8b word (the top 4 bits hold the selector)
pub const PAYLOAD_BITS: u32 = 60;

/// Number of 64-bit lanes in one 256-bit vector group
pub const GROUP_LANES: usize = 4;

/// Compile-time `(count, bit_width)` pair identifying a decode kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KernelConfig {
    /// Number of values the kernel writes
    pub count: usize,
    /// Width in bits of each packed field (0 for the run kernel)
    pub bit_width: u32,
}

/// 240 repetitions of `1`, no payload
pub const RUN_240: KernelConfig = KernelConfig::new(RUN_LENGTH, 0);
/// 60 x 1-bit fields
pub const FIXED_1X60: KernelConfig = KernelConfig::new(60, 1);
/// 30 x 2-bit fields
pub const FIXED_2X30: KernelConfig = KernelConfig::new(30, 2);
/// 20 x 3-bit fields
pub const FIXED_3X20: KernelConfig = KernelConfig::new(20, 3);
/// 15 x 4-bit fields
pub const FIXED_4X15: KernelConfig = KernelConfig::new(15, 4);

/// All configurations with a kernel in this crate, in selector order
pub const SUPPORTED_CONFIGS: [KernelConfig; 5] =
    [RUN_240, FIXED_1X60, FIXED_2X30, FIXED_3X20, FIXED_4X15];

impl KernelConfig {
    pub const fn new(count: usize, bit_width: u32) -> Self {
        Self { count, bit_width }
    }

    /// Mask selecting one field: `(1 << bit_width) - 1`, saturating at 64 bits
    #[inline]
    pub const fn mask(self) -> u64 {
        match self.bit_width {
            0 => 0,
            64.. => u64::MAX,
            width => u64::MAX >> (64 - width),
        }
    }

    /// Number of low word bits that carry data (saturating)
    #[inline]
    pub const fn payload_bits(self) -> u32 {
        let count = if self.count > u32::MAX as usize {
            u32::MAX
        } else {
            self.count as u32
        };
        count.saturating_mul(self.bit_width)
    }

    /// Number of full groups of four values
    #[inline]
    pub const fn groups(self) -> usize {
        self.count / GROUP_LANES
    }

    /// Values left over after the full groups (written with a masked store)
    #[inline]
    pub const fn tail(self) -> usize {
        self.count % GROUP_LANES
    }

    /// Whether this is the payload-free run of ones
    #[inline]
    pub const fn is_run(self) -> bool {
        self.bit_width == 0
    }

    /// Simple8b selector number for this configuration, if decoded here
    pub fn selector(self) -> Option<u8> {
        match (self.count, self.bit_width) {
            (RUN_LENGTH, 0) => Some(0),
            (60, 1) => Some(2),
            (30, 2) => Some(3),
            (20, 3) => Some(4),
            (15, 4) => Some(5),
            _ => None,
        }
    }

    /// Whether a kernel exists for this configuration
    #[inline]
    pub fn is_supported(self) -> bool {
        self.selector().is_some()
    }
}
