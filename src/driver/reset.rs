//! Channel soft reset sequencing
//!
//! Resetting the engine writes the reset bit into each channel's control
//! register and waits for the hardware to clear it. The host-to-device channel
//! is always completed before the device-to-host channel is touched.

use embedded_hal::delay::DelayNs;

use super::config::{Channel, DeviceAddressing, DmaConfig, PollConfig, RegisterMap};
use super::error::{AccessError, AccessResult, ChannelError, Result};
use crate::hal::access::RegisterAccess;
use crate::hal::poll::{PollOutcome, poll_until};
use crate::internal::register::dma::DMACR_RESET;

#[cfg(feature = "log")]
use log::{info, warn};

/// Soft reset sequencer for both DMA channels
#[derive(Debug, Clone, Copy)]
pub struct ResetSequencer {
    addressing: DeviceAddressing,
    registers: RegisterMap,
    poll: PollConfig,
}

impl ResetSequencer {
    /// Create a sequencer for the engine described by `config`
    pub const fn new(config: &DmaConfig) -> Self {
        Self {
            addressing: config.addressing,
            registers: config.registers,
            poll: config.reset_poll,
        }
    }

    /// Reset both channels, MM2S first
    ///
    /// Returns once every channel's reset bit reads back as zero. An access
    /// failure or a channel that stays in reset past the poll bound aborts the
    /// sequence; later channels are left untouched.
    pub fn reset<A, D>(&self, access: &mut A, delay: &mut D) -> Result<()>
    where
        A: RegisterAccess,
        D: DelayNs,
    {
        #[cfg(feature = "log")]
        info!("Resetting DMA channels");

        for channel in Channel::ALL {
            self.reset_channel(access, delay, channel)?;
        }
        Ok(())
    }

    /// Reset a single channel and wait for the reset bit to clear
    pub fn reset_channel<A, D>(&self, access: &mut A, delay: &mut D, channel: Channel) -> Result<()>
    where
        A: RegisterAccess,
        D: DelayNs,
    {
        let control = self.control_address(channel);

        // Overwrite, not read-modify-write: reset clears every other control bit anyway
        access.write(control, DMACR_RESET)?;

        let outcome = poll_until(delay, &self.poll, || {
            let value = access.read(control)?;
            Ok::<_, AccessError>((value & DMACR_RESET == 0).then_some(()))
        })?;

        match outcome {
            PollOutcome::Ready(()) => {
                #[cfg(feature = "log")]
                info!("{channel} reset complete");
                Ok(())
            }
            PollOutcome::TimedOut => {
                #[cfg(feature = "log")]
                warn!("{channel} reset did not complete within {:?} ms", self.poll.timeout_ms);
                Err(ChannelError::ResetTimeout(channel).into())
            }
        }
    }

    /// Check whether a channel's reset bit is still set
    pub fn is_reset_in_progress<A>(&self, access: &mut A, channel: Channel) -> AccessResult<bool>
    where
        A: RegisterAccess,
    {
        Ok(access.read(self.control_address(channel))? & DMACR_RESET != 0)
    }

    /// Poll behaviour used while waiting
    pub const fn poll_config(&self) -> &PollConfig {
        &self.poll
    }

    fn control_address(&self, channel: Channel) -> u64 {
        self.addressing
            .register(self.registers.channel(channel).control)
    }
}
