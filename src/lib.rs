//! AXI Scatter-Gather DMA Driver
//!
//! A `no_std`, `no_alloc` control-plane driver for the AXI DMA engine in
//! scatter-gather mode, as exposed to a host through an XDMA user BAR.
//!
//! The crate prepares chains of transfer descriptors, writes them into device
//! memory, and drives each channel (MM2S host-to-device, S2MM device-to-host)
//! through reset, run and completion while decoding the hardware status.
//!
//! # Architecture
//!
//! 1. **Descriptor Layer** ([`descriptor`]): Descriptor records and fixed-capacity chains
//! 2. **Driver Layer** ([`driver`]): Reset, chain programming, transfer state machine
//! 3. **HAL Layer** ([`hal`]): Register-access capability and poll loop
//!
//! Every register and descriptor-memory access goes through a
//! [`RegisterAccess`] implementation; every wait goes through
//! `embedded_hal::delay::DelayNs`.
//!
//! # Features
//!
//! - `std`: Character-device register backend (`CharDevAccess`) and `StdDelay`
//! - `log`: Log resets, descriptor writes, transfer start/completion and errors
//! - `defmt`: Enable defmt formatting for public types
//!
//! # Testing
//!
//! Unit tests run on the host against `MockRegisters`. The character-device
//! backend and its tests are only built with the `std` feature:
//!
//! ```text
//! cargo test                  # core logic
//! cargo test --features std   # plus CharDevAccess / StdDelay
//! ```
//!
//! # Example
//!
//! ```ignore
//! use axi_sg_dma::{Channel, Descriptor, DescriptorChain, DmaConfig, DmaController, TailLink};
//!
//! const DESC_BASE: u64 = 0x2_0000;
//!
//! let mut chain: DescriptorChain<3> = DescriptorChain::new();
//! for i in 0..3 {
//!     chain.push(Descriptor::segment(0x8000_0000 + i * 0x400, 1024)?)?;
//! }
//! chain.link_contiguous(DESC_BASE, TailLink::SelfLoop)?;
//! chain.mark_frame()?;
//!
//! let mut dma = DmaController::open(DmaConfig::new());
//! dma.reset()?;
//! if let Err(e) = dma.run_chain(Channel::Mm2s, &chain, DESC_BASE) {
//!     std::process::exit(e.exit_code());
//! }
//! ```

#![no_std]
#![deny(missing_docs)]
#![forbid(unsafe_code)]
// Clippy lint levels live here; thresholds and config are in clippy.toml.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements,
    clippy::let_underscore_future
)]

// =============================================================================
// Modules
// =============================================================================

pub mod descriptor;
pub mod driver;
pub mod hal;

// Internal implementation details (pub(crate) only)
mod internal;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use descriptor::{Descriptor, DescriptorChain, DescriptorStatus, TailLink};
pub use driver::config::{
    Channel, ChannelRegisters, ChannelState, DeviceAddressing, DmaConfig, PollConfig, RegisterMap,
};
pub use driver::controller::DmaController;
pub use driver::error::{
    AccessError, AccessOp, AccessResult, ChainError, ChainResult, ChannelError, Error, Result,
};
pub use driver::program::{DescriptorProgram, ProgrammedChain};
pub use driver::reset::ResetSequencer;
pub use driver::status::{DmaStatus, StatusFlag};
pub use driver::transfer::TransferEngine;
pub use hal::RegisterAccess;
#[cfg(feature = "std")]
pub use hal::{CharDevAccess, StdDelay};

/// Raw register and descriptor field definitions.
///
/// Most users should prefer the driver APIs; these are for backends and
/// diagnostics that need to name a register or bit directly.
pub mod registers {
    pub use crate::internal::descriptor_bits::{control, offset as descriptor_offset, status};
    pub use crate::internal::register::dma::*;
}

/// Shared driver constants.
pub mod constants {
    pub use crate::internal::constants::{
        // XDMA user BAR defaults
        DEFAULT_DEVICE,
        DEFAULT_DMA_BASE,
        DEFAULT_XDMA_BIAS,
        // Descriptor geometry
        DESCRIPTOR_SIZE,
        MAX_BYTE_COUNT,
        // Timing
        POLL_INTERVAL_MS,
        RESET_TIMEOUT_MS,
        TRANSFER_TIMEOUT_MS,
    };
}
