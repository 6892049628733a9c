//! AXI DMA Register Definitions
//!
//! Offsets are relative to the DMA register base. Each channel (MM2S and S2MM)
//! has its own control, status, current-descriptor and tail-descriptor block.

// =============================================================================
// Register Offsets - MM2S (host-to-device)
// =============================================================================

/// MM2S DMA Control Register offset
pub const MM2S_DMACR_OFFSET: u64 = 0x00;
/// MM2S DMA Status Register offset
pub const MM2S_DMASR_OFFSET: u64 = 0x04;
/// MM2S Current Descriptor Pointer (low word) offset
pub const MM2S_CURDESC_OFFSET: u64 = 0x08;
/// MM2S Current Descriptor Pointer (high word) offset
pub const MM2S_CURDESC_MSB_OFFSET: u64 = 0x0C;
/// MM2S Tail Descriptor Pointer (low word) offset
pub const MM2S_TAILDESC_OFFSET: u64 = 0x10;
/// MM2S Tail Descriptor Pointer (high word) offset
pub const MM2S_TAILDESC_MSB_OFFSET: u64 = 0x14;

// =============================================================================
// Register Offsets - S2MM (device-to-host)
// =============================================================================

/// S2MM DMA Control Register offset
pub const S2MM_DMACR_OFFSET: u64 = 0x30;
/// S2MM DMA Status Register offset
pub const S2MM_DMASR_OFFSET: u64 = 0x34;
/// S2MM Current Descriptor Pointer (low word) offset
pub const S2MM_CURDESC_OFFSET: u64 = 0x38;
/// S2MM Current Descriptor Pointer (high word) offset
pub const S2MM_CURDESC_MSB_OFFSET: u64 = 0x3C;
/// S2MM Tail Descriptor Pointer (low word) offset
pub const S2MM_TAILDESC_OFFSET: u64 = 0x40;
/// S2MM Tail Descriptor Pointer (high word) offset
pub const S2MM_TAILDESC_MSB_OFFSET: u64 = 0x44;

// =============================================================================
// Control Register (DMACR) Bits
// =============================================================================

/// Run/Stop - 1 = run, 0 = stop after in-flight transfers
pub const DMACR_RS: u32 = 1 << 0;
/// Soft Reset - self-clearing once the channel has reset
pub const DMACR_RESET: u32 = 1 << 2;

// =============================================================================
// Status Register (DMASR) Bits
// =============================================================================

/// Halted - channel is stopped
pub const DMASR_HALTED: u32 = 1 << 0;
/// Idle - all queued descriptors have been processed
pub const DMASR_IDLE: u32 = 1 << 1;
/// DMA Internal Error
pub const DMASR_DMA_INT_ERR: u32 = 1 << 4;
/// DMA Slave Error - AXI slave returned an error response
pub const DMASR_DMA_SLV_ERR: u32 = 1 << 5;
/// DMA Decode Error - address decode error on the data path
pub const DMASR_DMA_DEC_ERR: u32 = 1 << 6;
/// Scatter-Gather Internal Error - descriptor fetched with Cmplt already set
pub const DMASR_SG_INT_ERR: u32 = 1 << 8;
/// Scatter-Gather Slave Error - slave error on descriptor fetch/update
pub const DMASR_SG_SLV_ERR: u32 = 1 << 9;
/// Scatter-Gather Decode Error - invalid descriptor address
pub const DMASR_SG_DEC_ERR: u32 = 1 << 10;

/// All error bits (direct path and descriptor fetch path)
pub const DMASR_ALL_ERRORS: u32 = DMASR_DMA_INT_ERR
    | DMASR_DMA_SLV_ERR
    | DMASR_DMA_DEC_ERR
    | DMASR_SG_INT_ERR
    | DMASR_SG_SLV_ERR
    | DMASR_SG_DEC_ERR;
