//! DMA controller facade
//!
//! [`DmaController`] owns the register-access backend, the delay provider and
//! the per-channel transfer state, and exposes the whole control flow:
//! reset once, program a descriptor chain, start a channel.

use embedded_hal::delay::DelayNs;

use super::config::{Channel, ChannelState, DmaConfig};
use super::error::Result;
use super::program::{DescriptorProgram, ProgrammedChain};
use super::reset::ResetSequencer;
use super::status::DmaStatus;
use super::transfer::TransferEngine;
use crate::descriptor::{DescriptorChain, DescriptorStatus};
use crate::hal::access::RegisterAccess;

/// Scatter-gather DMA controller
///
/// # Type Parameters
/// * `A` - Register-access backend
/// * `D` - Delay provider used between polls
///
/// # Example
///
/// ```ignore
/// let mut dma = DmaController::new(DmaConfig::new(), access, delay);
/// dma.reset()?;
/// dma.run_chain(Channel::Mm2s, &chain, 0x2_0000)?;
/// ```
#[derive(Debug)]
pub struct DmaController<A: RegisterAccess, D: DelayNs> {
    config: DmaConfig,
    access: A,
    delay: D,
    reset: ResetSequencer,
    program: DescriptorProgram,
    engine: TransferEngine,
}

impl<A: RegisterAccess, D: DelayNs> DmaController<A, D> {
    /// Create a controller from its configuration, access backend and delay
    pub fn new(config: DmaConfig, access: A, delay: D) -> Self {
        Self {
            reset: ResetSequencer::new(&config),
            program: DescriptorProgram::new(&config),
            engine: TransferEngine::new(&config),
            config,
            access,
            delay,
        }
    }

    /// Configuration the controller was built with
    pub fn config(&self) -> &DmaConfig {
        &self.config
    }

    /// Soft reset both channels, MM2S first
    pub fn reset(&mut self) -> Result<()> {
        self.reset.reset(&mut self.access, &mut self.delay)
    }

    /// Write a descriptor chain into device memory at `base`
    pub fn write_descriptors<const N: usize>(
        &mut self,
        chain: &DescriptorChain<N>,
        base: u64,
    ) -> Result<ProgrammedChain> {
        self.program.write(&mut self.access, chain, base)
    }

    /// Set the current and tail descriptor addresses of a channel
    pub fn set_descriptors(&mut self, channel: Channel, current: u64, tail: u64) {
        self.engine.set_descriptors(channel, current, tail);
    }

    /// Start a channel and wait for it to go idle
    pub fn start(&mut self, channel: Channel) -> Result<DmaStatus> {
        self.engine.start(&mut self.access, &mut self.delay, channel)
    }

    /// Program `chain` at `base`, point `channel` at it and run it to completion
    pub fn run_chain<const N: usize>(
        &mut self,
        channel: Channel,
        chain: &DescriptorChain<N>,
        base: u64,
    ) -> Result<DmaStatus> {
        let programmed = self.write_descriptors(chain, base)?;
        self.set_descriptors(channel, programmed.head, programmed.tail);
        self.start(channel)
    }

    /// Read back the status word of the descriptor at `address`
    pub fn descriptor_status(&mut self, address: u64) -> Result<DescriptorStatus> {
        Ok(self.program.read_status(&mut self.access, address)?)
    }

    /// Current state of a channel
    pub fn state(&self, channel: Channel) -> ChannelState {
        self.engine.state(channel)
    }

    /// Last status word read from a channel
    pub fn last_status(&self, channel: Channel) -> Option<DmaStatus> {
        self.engine.last_status(channel)
    }

    /// The transfer engine
    pub fn engine(&self) -> &TransferEngine {
        &self.engine
    }

    /// The register-access backend
    pub fn access(&self) -> &A {
        &self.access
    }

    /// Mutable register-access backend
    pub fn access_mut(&mut self) -> &mut A {
        &mut self.access
    }

    /// Consume the controller, returning the backend and delay
    pub fn release(self) -> (A, D) {
        (self.access, self.delay)
    }
}

#[cfg(feature = "std")]
impl DmaController<crate::hal::CharDevAccess, crate::hal::StdDelay> {
    /// Controller on the character device named in `config`, sleeping between polls
    pub fn open(config: DmaConfig) -> Self {
        let access = crate::hal::CharDevAccess::from_addressing(&config.addressing);
        Self::new(config, access, crate::hal::StdDelay)
    }
}
