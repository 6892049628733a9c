//! Configuration types for the AXI DMA driver

use crate::internal::constants::{
    DEFAULT_DEVICE, DEFAULT_DMA_BASE, DEFAULT_XDMA_BIAS, POLL_INTERVAL_MS, RESET_TIMEOUT_MS,
    TRANSFER_TIMEOUT_MS,
};
use crate::internal::register::dma::{
    MM2S_CURDESC_MSB_OFFSET, MM2S_CURDESC_OFFSET, MM2S_DMACR_OFFSET, MM2S_DMASR_OFFSET,
    MM2S_TAILDESC_MSB_OFFSET, MM2S_TAILDESC_OFFSET, S2MM_CURDESC_MSB_OFFSET, S2MM_CURDESC_OFFSET,
    S2MM_DMACR_OFFSET, S2MM_DMASR_OFFSET, S2MM_TAILDESC_MSB_OFFSET, S2MM_TAILDESC_OFFSET,
};

/// DMA channel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// Memory-mapped to stream (host-to-device)
    Mm2s,
    /// Stream to memory-mapped (device-to-host)
    S2mm,
}

impl Channel {
    /// Both channels, in reset order
    pub const ALL: [Channel; 2] = [Channel::Mm2s, Channel::S2mm];

    /// Short hardware name of the channel
    pub const fn as_str(self) -> &'static str {
        match self {
            Channel::Mm2s => "MM2S",
            Channel::S2mm => "S2MM",
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Channel::Mm2s => 0,
            Channel::S2mm => 1,
        }
    }
}

impl core::fmt::Display for Channel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Register offsets of one channel, relative to the DMA base address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelRegisters {
    /// DMACR - control register
    pub control: u64,
    /// DMASR - status register
    pub status: u64,
    /// CURDESC - current descriptor pointer, low word
    pub curdesc: u64,
    /// CURDESC_MSB - current descriptor pointer, high word
    pub curdesc_msb: u64,
    /// TAILDESC - tail descriptor pointer, low word
    pub taildesc: u64,
    /// TAILDESC_MSB - tail descriptor pointer, high word
    pub taildesc_msb: u64,
}

impl ChannelRegisters {
    /// Host-to-device channel register block
    pub const MM2S: Self = Self {
        control: MM2S_DMACR_OFFSET,
        status: MM2S_DMASR_OFFSET,
        curdesc: MM2S_CURDESC_OFFSET,
        curdesc_msb: MM2S_CURDESC_MSB_OFFSET,
        taildesc: MM2S_TAILDESC_OFFSET,
        taildesc_msb: MM2S_TAILDESC_MSB_OFFSET,
    };

    /// Device-to-host channel register block
    pub const S2MM: Self = Self {
        control: S2MM_DMACR_OFFSET,
        status: S2MM_DMASR_OFFSET,
        curdesc: S2MM_CURDESC_OFFSET,
        curdesc_msb: S2MM_CURDESC_MSB_OFFSET,
        taildesc: S2MM_TAILDESC_OFFSET,
        taildesc_msb: S2MM_TAILDESC_MSB_OFFSET,
    };
}

/// Register layout of both channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterMap {
    /// Host-to-device channel offsets
    pub mm2s: ChannelRegisters,
    /// Device-to-host channel offsets
    pub s2mm: ChannelRegisters,
}

impl Default for RegisterMap {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterMap {
    /// Standard AXI DMA register layout
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mm2s: ChannelRegisters::MM2S,
            s2mm: ChannelRegisters::S2MM,
        }
    }

    /// Offsets for the given channel
    #[inline]
    pub const fn channel(&self, channel: Channel) -> &ChannelRegisters {
        match channel {
            Channel::Mm2s => &self.mm2s,
            Channel::S2mm => &self.s2mm,
        }
    }
}

/// Where the engine lives and how its view of memory differs from ours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceAddressing {
    /// Device identifier handed to the register-access backend
    pub device: &'static str,
    /// Base address of the DMA register block
    pub dma_base: u64,
    /// Offset added to descriptor addresses written into engine-visible fields
    pub bias: u64,
}

impl Default for DeviceAddressing {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceAddressing {
    /// XDMA user BAR defaults
    #[must_use]
    pub const fn new() -> Self {
        Self {
            device: DEFAULT_DEVICE,
            dma_base: DEFAULT_DMA_BASE,
            bias: DEFAULT_XDMA_BIAS,
        }
    }

    /// Absolute address of a register offset
    #[inline]
    pub const fn register(&self, offset: u64) -> u64 {
        self.dma_base + offset
    }

    /// Address as seen by the engine
    #[inline]
    pub const fn biased(&self, address: u64) -> u64 {
        address.wrapping_add(self.bias)
    }
}

/// Polling behaviour for blocking register waits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollConfig {
    /// Sleep between polls in milliseconds
    pub interval_ms: u32,
    /// Give up after this many milliseconds; `None` waits forever
    pub timeout_ms: Option<u32>,
}

impl PollConfig {
    /// Poll every `interval_ms`, giving up after `timeout_ms`
    #[must_use]
    pub const fn new(interval_ms: u32, timeout_ms: u32) -> Self {
        Self {
            interval_ms,
            timeout_ms: Some(timeout_ms),
        }
    }

    /// Poll every 10 ms until the condition holds, with no bound
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            interval_ms: POLL_INTERVAL_MS,
            timeout_ms: None,
        }
    }

    /// Default reset wait
    #[must_use]
    pub const fn reset_default() -> Self {
        Self::new(POLL_INTERVAL_MS, RESET_TIMEOUT_MS)
    }

    /// Default transfer completion wait
    #[must_use]
    pub const fn transfer_default() -> Self {
        Self::new(POLL_INTERVAL_MS, TRANSFER_TIMEOUT_MS)
    }
}

/// Complete driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DmaConfig {
    /// Device, register base and address bias
    pub addressing: DeviceAddressing,
    /// Per-channel register offsets
    pub registers: RegisterMap,
    /// Soft reset wait
    pub reset_poll: PollConfig,
    /// Transfer completion wait
    pub transfer_poll: PollConfig,
    /// Also program the `*_MSB` descriptor pointer registers
    pub wide_addressing: bool,
}

impl Default for DmaConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DmaConfig {
    /// Create a new configuration with defaults
    #[must_use]
    pub const fn new() -> Self {
        Self {
            addressing: DeviceAddressing::new(),
            registers: RegisterMap::new(),
            reset_poll: PollConfig::reset_default(),
            transfer_poll: PollConfig::transfer_default(),
            wide_addressing: false,
        }
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    /// Set the device identifier
    #[must_use]
    pub const fn with_device(mut self, device: &'static str) -> Self {
        self.addressing.device = device;
        self
    }

    /// Set the DMA register block base address
    #[must_use]
    pub const fn with_dma_base(mut self, dma_base: u64) -> Self {
        self.addressing.dma_base = dma_base;
        self
    }

    /// Set the engine address bias
    #[must_use]
    pub const fn with_bias(mut self, bias: u64) -> Self {
        self.addressing.bias = bias;
        self
    }

    /// Replace the register layout
    #[must_use]
    pub const fn with_registers(mut self, registers: RegisterMap) -> Self {
        self.registers = registers;
        self
    }

    /// Set the soft reset poll behaviour
    #[must_use]
    pub const fn with_reset_poll(mut self, poll: PollConfig) -> Self {
        self.reset_poll = poll;
        self
    }

    /// Set the transfer completion poll behaviour
    #[must_use]
    pub const fn with_transfer_poll(mut self, poll: PollConfig) -> Self {
        self.transfer_poll = poll;
        self
    }

    /// Wait without bound for resets and transfers
    #[must_use]
    pub const fn with_unbounded_waits(mut self) -> Self {
        self.reset_poll = PollConfig::unbounded();
        self.transfer_poll = PollConfig::unbounded();
        self
    }

    /// Enable programming of the high descriptor pointer words
    #[must_use]
    pub const fn with_wide_addressing(mut self, enabled: bool) -> Self {
        self.wide_addressing = enabled;
        self
    }
}

/// Per-channel transfer state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelState {
    /// Descriptor pointers configured, not yet started
    #[default]
    Programmed,
    /// Run/stop set and tail written, waiting for idle
    Running,
    /// All descriptors processed
    Idle,
    /// Status register reported one or more error bits
    Error,
    /// Engine halted before going idle
    Halted,
}

// =============================================================================
// Unit Tests
// =============================================================================
