//! Error types for simple8b-core
//!
//! The kernels are total and never fail. These errors come only from the
//! checked helpers that carve a fixed-size destination out of a caller slice.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Output buffer too small: need {needed} values, {available} available")]
    BufferTooSmall { needed: usize, available: usize },

    #[error("No kernel for {count} values of {bit_width} bits")]
    UnsupportedConfig { count: usize, bit_width: u32 },
}

pub type Result<T> = std::result::Result<T, Error>;
