//! Core driver components for the AXI scatter-gather DMA engine.
//!
//! - [`config`] - Configuration types and builder patterns
//! - [`error`] - Error types and result aliases
//! - [`status`] - Channel status register decoding
//! - [`reset`] - Soft reset sequencing for both channels
//! - [`program`] - Writing descriptor chains into device memory
//! - [`transfer`] - Per-channel start/poll state machine
//! - [`controller`] - Facade tying the above to one access backend
//!
//! # Example
//!
//! ```ignore
//! use axi_sg_dma::driver::{DmaConfig, PollConfig};
//!
//! let config = DmaConfig::new()
//!     .with_dma_base(0x6_0000)
//!     .with_transfer_poll(PollConfig::new(10, 5_000));
//! ```

// Submodules
pub mod config;
pub mod controller;
pub mod error;
pub mod program;
pub mod reset;
pub mod status;
pub mod transfer;

// Re-exports for convenience
pub use config::{
    Channel, ChannelRegisters, ChannelState, DeviceAddressing, DmaConfig, PollConfig, RegisterMap,
};
pub use controller::DmaController;
pub use error::{
    AccessError, AccessOp, AccessResult, ChainError, ChainResult, ChannelError, Error, Result,
};
pub use program::{DescriptorProgram, ProgrammedChain};
pub use reset::ResetSequencer;
pub use status::{DmaStatus, StatusFlag};
pub use transfer::TransferEngine;
