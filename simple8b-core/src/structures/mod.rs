mod aligned;
mod backend;
mod checked;
mod config;
pub mod simd;

pub use aligned::{AlignedBlock, BLOCK_ALIGNMENT};
pub use backend::Backend;
pub use checked::{block_mut, decode_into};
pub use config::{
    FIXED_1X60, FIXED_2X30, FIXED_3X20, FIXED_4X15, GROUP_LANES, KernelConfig, PAYLOAD_BITS,
    RUN_240, RUN_LENGTH, RUN_VALUE, SUPPORTED_CONFIGS,
};
pub use simd::{decode_fixed_1, decode_fixed_2, decode_fixed_3, decode_fixed_4, decode_run};
