//! Poll-until-condition primitive
//!
//! All blocking waits in the driver (reset completion, transfer completion)
//! share this loop: check, then sleep a fixed interval, until the condition
//! holds, the check fails, or the optional time bound runs out.

use embedded_hal::delay::DelayNs;

use crate::driver::config::PollConfig;

/// Result of a completed poll loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollOutcome<T> {
    /// The condition produced a value
    Ready(T),
    /// The time bound elapsed first
    TimedOut,
}

/// Poll `check` until it yields `Some`, sleeping `config.interval_ms` between checks
///
/// The condition is always checked at least once before the time bound is
/// considered, and once more after the final sleep. Errors from `check` end
/// the loop immediately. Each check advances the elapsed count by at least
/// 1 ms, so a zero interval still reaches the bound.
pub fn poll_until<D, T, E, F>(
    delay: &mut D,
    config: &PollConfig,
    mut check: F,
) -> Result<PollOutcome<T>, E>
where
    D: DelayNs,
    F: FnMut() -> Result<Option<T>, E>,
{
    let step_ms = config.interval_ms.max(1);
    let mut elapsed_ms = 0u32;
    loop {
        if let Some(value) = check()? {
            return Ok(PollOutcome::Ready(value));
        }
        if let Some(timeout_ms) = config.timeout_ms {
            if elapsed_ms >= timeout_ms {
                return Ok(PollOutcome::TimedOut);
            }
        }
        delay.delay_ms(config.interval_ms);
        elapsed_ms = elapsed_ms.saturating_add(step_ms);
    }
}
