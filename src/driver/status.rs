//! Status register decoding for the AXI DMA channels.
//!
//! [`DmaStatus`] wraps a raw DMASR word and answers which of the named
//! conditions are asserted. Decoding is pure: no state, no register access.

use crate::internal::register::dma::{
    DMASR_ALL_ERRORS, DMASR_DMA_DEC_ERR, DMASR_DMA_INT_ERR, DMASR_DMA_SLV_ERR, DMASR_HALTED,
    DMASR_IDLE, DMASR_SG_DEC_ERR, DMASR_SG_INT_ERR, DMASR_SG_SLV_ERR,
};

// =============================================================================
// Status Flags
// =============================================================================

/// A named condition reported by the channel status register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusFlag {
    /// DMAIntErr - DMA internal error
    DmaInternal,
    /// DMASlvErr - AXI slave error on the data path
    DmaSlave,
    /// DMADecErr - address decode error on the data path
    DmaDecode,
    /// SGIntErr - descriptor fetched with its complete bit already set
    SgInternal,
    /// SGSlvErr - AXI slave error on descriptor fetch
    SgSlave,
    /// SGDecErr - address decode error on descriptor fetch
    SgDecode,
    /// Halted - channel stopped
    Halted,
    /// Idle - channel finished the queued descriptors
    Idle,
}

impl StatusFlag {
    /// Every flag, error conditions first
    pub const ALL: [StatusFlag; 8] = [
        StatusFlag::DmaInternal,
        StatusFlag::DmaSlave,
        StatusFlag::DmaDecode,
        StatusFlag::SgInternal,
        StatusFlag::SgSlave,
        StatusFlag::SgDecode,
        StatusFlag::Halted,
        StatusFlag::Idle,
    ];

    /// Bit of this flag in the status word
    pub const fn mask(self) -> u32 {
        match self {
            StatusFlag::DmaInternal => DMASR_DMA_INT_ERR,
            StatusFlag::DmaSlave => DMASR_DMA_SLV_ERR,
            StatusFlag::DmaDecode => DMASR_DMA_DEC_ERR,
            StatusFlag::SgInternal => DMASR_SG_INT_ERR,
            StatusFlag::SgSlave => DMASR_SG_SLV_ERR,
            StatusFlag::SgDecode => DMASR_SG_DEC_ERR,
            StatusFlag::Halted => DMASR_HALTED,
            StatusFlag::Idle => DMASR_IDLE,
        }
    }

    /// Whether this flag is an error condition
    pub const fn is_error(self) -> bool {
        self.mask() & DMASR_ALL_ERRORS != 0
    }

    /// Register field name
    pub const fn name(self) -> &'static str {
        match self {
            StatusFlag::DmaInternal => "DMAIntErr",
            StatusFlag::DmaSlave => "DMASlvErr",
            StatusFlag::DmaDecode => "DMADecErr",
            StatusFlag::SgInternal => "SGIntErr",
            StatusFlag::SgSlave => "SGSlvErr",
            StatusFlag::SgDecode => "SGDecErr",
            StatusFlag::Halted => "Halted",
            StatusFlag::Idle => "Idle",
        }
    }

    /// Human-readable description
    pub const fn description(self) -> &'static str {
        match self {
            StatusFlag::DmaInternal => "DMA internal error",
            StatusFlag::DmaSlave => "AXI slave error",
            StatusFlag::DmaDecode => "address decode error",
            StatusFlag::SgInternal => "descriptor complete bit error",
            StatusFlag::SgSlave => "SG AXI slave error",
            StatusFlag::SgDecode => "SG address decode error",
            StatusFlag::Halted => "channel halted",
            StatusFlag::Idle => "channel idle",
        }
    }
}

impl core::fmt::Display for StatusFlag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.name(), self.description())
    }
}

// =============================================================================
// Decoded Status Word
// =============================================================================

/// Decoded DMASR value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DmaStatus {
    raw: u32,
}

impl DmaStatus {
    /// Decode a raw status word
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self { raw }
    }

    /// The raw status word
    #[inline]
    pub const fn raw(&self) -> u32 {
        self.raw
    }

    /// Check a single condition
    #[inline]
    pub const fn contains(&self, flag: StatusFlag) -> bool {
        self.raw & flag.mask() != 0
    }

    /// Any error bit asserted
    #[inline]
    pub const fn has_error(&self) -> bool {
        self.raw & DMASR_ALL_ERRORS != 0
    }

    /// Only the error bits of the word
    #[inline]
    pub const fn error_bits(&self) -> u32 {
        self.raw & DMASR_ALL_ERRORS
    }

    /// Halted bit set
    #[inline]
    pub const fn is_halted(&self) -> bool {
        self.contains(StatusFlag::Halted)
    }

    /// Idle bit set
    #[inline]
    pub const fn is_idle(&self) -> bool {
        self.contains(StatusFlag::Idle)
    }

    /// All asserted conditions
    pub fn flags(self) -> impl Iterator<Item = StatusFlag> {
        StatusFlag::ALL
            .into_iter()
            .filter(move |f| self.contains(*f))
    }

    /// Asserted error conditions only
    pub fn errors(self) -> impl Iterator<Item = StatusFlag> {
        self.flags().filter(|f| f.is_error())
    }
}

impl From<u32> for DmaStatus {
    fn from(raw: u32) -> Self {
        Self::from_raw(raw)
    }
}

impl core::fmt::Display for DmaStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "0x{:08x}", self.raw)?;
        let mut first = true;
        for flag in self.flags() {
            f.write_str(if first { " [" } else { ", " })?;
            f.write_str(flag.name())?;
            first = false;
        }
        if !first {
            f.write_str("]")?;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
