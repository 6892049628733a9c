//! Hardware Abstraction Layer
//!
//! This module provides the seams between the DMA control logic and the
//! outside world: register access and blocking waits.
//!
//! # Modules
//!
//! - [`access`]: The [`RegisterAccess`] capability
//! - [`poll`]: Poll-until-condition loop with an optional time bound
//! - `chardev` (feature `std`): Character-device backend and a sleeping delay
//!
//! # Delay Integration
//!
//! All types that wait use `embedded_hal::delay::DelayNs` directly.
//! Pass any delay implementation from your HAL, or `StdDelay` on a host.

pub mod access;
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub mod chardev;
pub mod poll;

// Re-export commonly used types
pub use access::RegisterAccess;
#[cfg(feature = "std")]
pub use chardev::{CharDevAccess, StdDelay};
pub use poll::{PollOutcome, poll_until};
