//! Transfer engine: start a channel and drive it to completion
//!
//! Starting a channel is a fixed register sequence:
//!
//! 1. CURDESC <- current descriptor + bias
//! 2. DMACR   <- DMACR | RS (read-modify-write)
//! 3. TAILDESC <- tail descriptor + bias (this write starts descriptor fetch)
//!
//! The channel is then polled through its status register until it goes idle,
//! reports an error, or halts. Each channel keeps its own descriptor
//! addresses, state and last observed status.

use embedded_hal::delay::DelayNs;

use super::config::{
    Channel, ChannelRegisters, ChannelState, DeviceAddressing, DmaConfig, PollConfig, RegisterMap,
};
use super::error::{ChannelError, Result};
use super::status::DmaStatus;
use crate::hal::access::RegisterAccess;
use crate::hal::poll::{PollOutcome, poll_until};
use crate::internal::register::dma::DMACR_RS;

#[cfg(feature = "log")]
use log::{error, info, warn};

/// Bookkeeping for one channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ChannelSlot {
    current: u64,
    tail: u64,
    state: ChannelState,
    last_status: Option<DmaStatus>,
}

/// Per-channel start/poll state machine
#[derive(Debug, Clone)]
pub struct TransferEngine {
    addressing: DeviceAddressing,
    registers: RegisterMap,
    poll: PollConfig,
    wide_addressing: bool,
    slots: [ChannelSlot; 2],
}

impl TransferEngine {
    /// Create an engine for the DMA block described by `config`
    pub fn new(config: &DmaConfig) -> Self {
        Self {
            addressing: config.addressing,
            registers: config.registers,
            poll: config.transfer_poll,
            wide_addressing: config.wide_addressing,
            slots: [ChannelSlot::default(); 2],
        }
    }

    // =========================================================================
    // Channel bookkeeping
    // =========================================================================

    /// Set the current (head) and tail descriptor addresses of a channel
    ///
    /// Addresses are unbiased device-memory addresses. The channel returns
    /// to [`ChannelState::Programmed`].
    pub fn set_descriptors(&mut self, channel: Channel, current: u64, tail: u64) {
        let slot = self.slot_mut(channel);
        slot.current = current;
        slot.tail = tail;
        slot.state = ChannelState::Programmed;
    }

    /// Configured current descriptor address
    pub fn current_descriptor(&self, channel: Channel) -> u64 {
        self.slot(channel).current
    }

    /// Configured tail descriptor address
    pub fn tail_descriptor(&self, channel: Channel) -> u64 {
        self.slot(channel).tail
    }

    /// Current state of a channel
    pub fn state(&self, channel: Channel) -> ChannelState {
        self.slot(channel).state
    }

    /// Last status word read from a channel, if any
    pub fn last_status(&self, channel: Channel) -> Option<DmaStatus> {
        self.slot(channel).last_status
    }

    // =========================================================================
    // Start / poll
    // =========================================================================

    /// Start a channel and block until it goes idle
    ///
    /// Does not check that a descriptor chain was programmed; the configured
    /// addresses are written as-is.
    ///
    /// # Errors
    ///
    /// - [`ChannelError::Status`] when any error bit is set
    /// - [`ChannelError::Halted`] when the channel halts without an error bit
    /// - [`ChannelError::TransferTimeout`] when the poll bound runs out
    /// - the first failed register access
    pub fn start<A, D>(&mut self, access: &mut A, delay: &mut D, channel: Channel) -> Result<DmaStatus>
    where
        A: RegisterAccess,
        D: DelayNs,
    {
        self.kick(access, channel)?;
        self.wait(access, delay, channel)
    }

    /// Program the descriptor pointers and set run/stop, without waiting
    pub fn kick<A>(&mut self, access: &mut A, channel: Channel) -> Result<()>
    where
        A: RegisterAccess,
    {
        let regs = *self.registers.channel(channel);
        let slot = *self.slot(channel);
        let current = self.addressing.biased(slot.current);
        let tail = self.addressing.biased(slot.tail);

        #[cfg(feature = "log")]
        info!(
            "Starting {} transfer: current 0x{:x}, tail 0x{:x}",
            channel, current, tail
        );

        self.write_pointer(access, regs.curdesc, regs.curdesc_msb, current)?;
        access.modify(self.addressing.register(regs.control), |cr| cr | DMACR_RS)?;
        self.write_pointer(access, regs.taildesc, regs.taildesc_msb, tail)?;
        self.slot_mut(channel).state = ChannelState::Running;
        Ok(())
    }

    /// Read and classify the status register once
    ///
    /// Returns `Ok(Some(status))` when the channel is idle and `Ok(None)`
    /// while it is still busy.
    pub fn poll_once<A>(&mut self, access: &mut A, channel: Channel) -> Result<Option<DmaStatus>>
    where
        A: RegisterAccess,
    {
        let address = self
            .addressing
            .register(self.registers.channel(channel).status);
        let status = DmaStatus::from_raw(access.read(address)?);

        let slot = self.slot_mut(channel);
        slot.last_status = Some(status);

        if status.has_error() {
            slot.state = ChannelState::Error;
            #[cfg(feature = "log")]
            for flag in status.errors() {
                error!("{channel}: {flag}");
            }
            return Err(ChannelError::Status { channel, status }.into());
        }
        if status.is_halted() {
            slot.state = ChannelState::Halted;
            #[cfg(feature = "log")]
            error!("{channel}: DMA transfer halted, status {status}");
            return Err(ChannelError::Halted(channel).into());
        }
        if status.is_idle() {
            slot.state = ChannelState::Idle;
            return Ok(Some(status));
        }
        Ok(None)
    }

    /// Poll the status register until the channel goes idle
    pub fn wait<A, D>(&mut self, access: &mut A, delay: &mut D, channel: Channel) -> Result<DmaStatus>
    where
        A: RegisterAccess,
        D: DelayNs,
    {
        let poll = self.poll;
        match poll_until(delay, &poll, || self.poll_once(access, channel))? {
            PollOutcome::Ready(status) => {
                #[cfg(feature = "log")]
                info!("{channel} transfer complete");
                Ok(status)
            }
            PollOutcome::TimedOut => {
                #[cfg(feature = "log")]
                warn!("{channel} transfer did not complete within {:?} ms", poll.timeout_ms);
                Err(ChannelError::TransferTimeout(channel).into())
            }
        }
    }

    fn write_pointer<A>(&self, access: &mut A, low: u64, high: u64, value: u64) -> Result<()>
    where
        A: RegisterAccess,
    {
        // Without wide addressing only the low word reaches the engine
        access.write(self.addressing.register(low), value as u32)?;
        if self.wide_addressing {
            access.write(self.addressing.register(high), (value >> 32) as u32)?;
        }
        Ok(())
    }

    fn slot(&self, channel: Channel) -> &ChannelSlot {
        &self.slots[channel.index()]
    }

    fn slot_mut(&mut self, channel: Channel) -> &mut ChannelSlot {
        &mut self.slots[channel.index()]
    }

    /// Register block used for `channel`
    pub fn registers(&self, channel: Channel) -> &ChannelRegisters {
        self.registers.channel(channel)
    }
}
