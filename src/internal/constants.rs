//! Centralized Constants
//!
//! This module provides a single source of truth for the sizes, timings and
//! default addresses used throughout the driver.
//!
//! # Note
//!
//! Hardware register bit definitions remain in their respective modules
//! (`register/dma.rs`, `descriptor_bits.rs`) as they are specific to those
//! hardware blocks.

// =============================================================================
// Descriptor Geometry
// =============================================================================

/// Size and alignment of one scatter-gather descriptor in bytes
pub const DESCRIPTOR_SIZE: usize = 64;

/// Largest byte count representable in the descriptor CONTROL length field
pub const MAX_BYTE_COUNT: u32 = (1 << 23) - 1;

// =============================================================================
// Timing Constants
// =============================================================================

/// Interval between register polls in milliseconds
pub const POLL_INTERVAL_MS: u32 = 10;

/// Default bound on waiting for a channel soft reset to complete
pub const RESET_TIMEOUT_MS: u32 = 1_000;

/// Default bound on waiting for a transfer to go idle
pub const TRANSFER_TIMEOUT_MS: u32 = 10_000;

// =============================================================================
// Default Device Addressing (XDMA user BAR)
// =============================================================================

/// Default register-access device node
pub const DEFAULT_DEVICE: &str = "/dev/xdma0_user";

/// Default AXI DMA register block base
pub const DEFAULT_DMA_BASE: u64 = 0x6_0000;

/// Default bias between host-visible and engine-visible addresses
pub const DEFAULT_XDMA_BIAS: u64 = 0x44A0_0000;
