//! Error types for the AXI DMA driver
//!
//! Errors are organized by domain for better diagnostics:
//! - [`AccessError`]: a register read or write through the access backend failed
//! - [`ChainError`]: descriptor chain construction and programming issues
//! - [`ChannelError`]: reset and transfer failures reported by a channel
//!
//! The unified [`Error`] enum wraps all domain errors and is returned
//! by most driver methods. The driver never terminates the process; callers
//! that exit on failure can use [`Error::exit_code`] for the status.

use super::config::Channel;
use super::status::DmaStatus;

// =============================================================================
// Register Access Errors
// =============================================================================

/// Direction of a failed register access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccessOp {
    /// 32-bit read
    Read,
    /// 32-bit write
    Write,
}

impl AccessOp {
    /// Returns a human-readable name of the operation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            AccessOp::Read => "reading",
            AccessOp::Write => "writing",
        }
    }
}

/// A register access failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccessError {
    /// Read or write
    pub op: AccessOp,
    /// Absolute device address of the access
    pub address: u64,
    /// Operating system error code, when the backend has one
    pub os_code: Option<i32>,
}

impl AccessError {
    /// A failed read at `address`
    #[must_use]
    pub const fn read(address: u64) -> Self {
        Self {
            op: AccessOp::Read,
            address,
            os_code: None,
        }
    }

    /// A failed write at `address`
    #[must_use]
    pub const fn write(address: u64) -> Self {
        Self {
            op: AccessOp::Write,
            address,
            os_code: None,
        }
    }

    /// Attach an operating system error code
    #[must_use]
    pub const fn with_os_code(mut self, code: i32) -> Self {
        self.os_code = Some(code);
        self
    }
}

impl core::fmt::Display for AccessError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "fail {} register at address 0x{:x}",
            self.op.as_str(),
            self.address
        )?;
        if let Some(code) = self.os_code {
            write!(f, " (os error {code})")?;
        }
        Ok(())
    }
}

// =============================================================================
// Descriptor Chain Errors
// =============================================================================

/// Descriptor chain construction and programming errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChainError {
    /// Descriptor list is empty
    Empty,
    /// Chain has no free descriptor slots
    Full,
    /// Byte count does not fit the 23-bit length field
    ByteCountTooLarge,
    /// Descriptor address is not 64-byte aligned
    UnalignedAddress,
}

impl core::fmt::Display for ChainError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ChainError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ChainError::Empty => "descriptor list is empty",
            ChainError::Full => "descriptor chain is full",
            ChainError::ByteCountTooLarge => "byte count exceeds descriptor length field",
            ChainError::UnalignedAddress => "descriptor address not 64-byte aligned",
        }
    }
}

// =============================================================================
// Channel Errors
// =============================================================================

/// Reset and transfer failures reported by a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelError {
    /// Status register reported one or more error bits
    Status {
        /// Channel that failed
        channel: Channel,
        /// Status word that carried the error bits
        status: DmaStatus,
    },
    /// Channel halted before reaching idle
    Halted(Channel),
    /// Reset bit did not clear in time
    ResetTimeout(Channel),
    /// Channel did not reach idle in time
    TransferTimeout(Channel),
}

impl ChannelError {
    /// Returns a human-readable description of the error kind
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ChannelError::Status { .. } => "wrong status register value",
            ChannelError::Halted(_) => "DMA transfer halted",
            ChannelError::ResetTimeout(_) => "soft reset timed out",
            ChannelError::TransferTimeout(_) => "transfer timed out",
        }
    }

    /// Channel the error refers to
    #[must_use]
    pub const fn channel(&self) -> Channel {
        match self {
            ChannelError::Status { channel, .. } => *channel,
            ChannelError::Halted(channel)
            | ChannelError::ResetTimeout(channel)
            | ChannelError::TransferTimeout(channel) => *channel,
        }
    }
}

impl core::fmt::Display for ChannelError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ChannelError::Status { channel, status } => {
                write!(f, "{channel}: {}: {status}", self.as_str())
            }
            _ => write!(f, "{}: {}", self.channel(), self.as_str()),
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// Match on the inner domain error for specific handling:
/// ```ignore
/// match result {
///     Err(Error::Chain(ChainError::Empty)) => { /* ... */ }
///     Err(Error::Channel(ChannelError::Status { status, .. })) => { /* ... */ }
///     Err(Error::Access(e)) => { /* ... */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Register access error
    Access(AccessError),
    /// Descriptor chain error
    Chain(ChainError),
    /// Channel error
    Channel(ChannelError),
}

impl Error {
    /// Process exit status for this error
    ///
    /// Status errors exit with the raw error bits of the status word, access
    /// errors with the OS error code when known, everything else with 1.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::Channel(ChannelError::Status { status, .. }) => status.error_bits() as i32,
            Error::Access(AccessError {
                os_code: Some(code),
                ..
            }) => *code,
            _ => 1,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Access(e) => write!(f, "access: {e}"),
            Error::Chain(e) => write!(f, "chain: {e}"),
            Error::Channel(e) => write!(f, "channel: {e}"),
        }
    }
}

// From impls for automatic conversion
impl From<AccessError> for Error {
    fn from(e: AccessError) -> Self {
        Error::Access(e)
    }
}

impl From<ChainError> for Error {
    fn from(e: ChainError) -> Self {
        Error::Chain(e)
    }
}

impl From<ChannelError> for Error {
    fn from(e: ChannelError) -> Self {
        Error::Channel(e)
    }
}

/// Result type alias for driver operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for register access
pub type AccessResult<T> = core::result::Result<T, AccessError>;

/// Result type alias for descriptor chain operations
pub type ChainResult<T> = core::result::Result<T, ChainError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    extern crate std;
    use std::format;

    use super::*;

    // =========================================================================
    // AccessError Tests
    // =========================================================================

    #[test]
    fn access_error_display_names_address() {
        let err = AccessError::read(0x6_0004);
        assert_eq!(
            format!("{}", err),
            "fail reading register at address 0x60004"
        );
    }

    #[test]
    fn access_error_display_with_os_code() {
        let err = AccessError::write(0x2_0018).with_os_code(13);
        let display = format!("{}", err);
        assert!(display.starts_with("fail writing register at address 0x20018"));
        assert!(display.contains("os error 13"));
    }

    // =========================================================================
    // ChainError Tests
    // =========================================================================

    #[test]
    fn chain_error_as_str_non_empty() {
        let variants = [
            ChainError::Empty,
            ChainError::Full,
            ChainError::ByteCountTooLarge,
            ChainError::UnalignedAddress,
        ];

        for variant in variants {
            assert!(!variant.as_str().is_empty(), "ChainError::{:?}", variant);
        }
    }

    #[test]
    fn chain_error_display() {
        assert_eq!(format!("{}", ChainError::Empty), "descriptor list is empty");
    }

    // =========================================================================
    // ChannelError Tests
    // =========================================================================

    #[test]
    fn channel_error_reports_channel() {
        assert_eq!(ChannelError::Halted(Channel::S2mm).channel(), Channel::S2mm);
        assert_eq!(
            ChannelError::ResetTimeout(Channel::Mm2s).channel(),
            Channel::Mm2s
        );
        let status = ChannelError::Status {
            channel: Channel::S2mm,
            status: DmaStatus::from_raw(0x10),
        };
        assert_eq!(status.channel(), Channel::S2mm);
    }

    #[test]
    fn channel_error_display_lists_conditions() {
        let err = ChannelError::Status {
            channel: Channel::Mm2s,
            status: DmaStatus::from_raw(0x0000_0110),
        };
        let display = format!("{}", err);
        assert!(display.starts_with("MM2S"));
        assert!(display.contains("DMAIntErr"));
        assert!(display.contains("SGIntErr"));
    }

    #[test]
    fn channel_error_display_halted() {
        let display = format!("{}", ChannelError::Halted(Channel::S2mm));
        assert_eq!(display, "S2MM: DMA transfer halted");
    }

    // =========================================================================
    // Unified Error Tests
    // =========================================================================

    #[test]
    fn error_from_domain_errors() {
        let err: Error = ChainError::Empty.into();
        assert_eq!(err, Error::Chain(ChainError::Empty));

        let err: Error = AccessError::read(4).into();
        assert!(matches!(err, Error::Access(_)));

        let err: Error = ChannelError::TransferTimeout(Channel::Mm2s).into();
        assert!(matches!(err, Error::Channel(ChannelError::TransferTimeout(_))));
    }

    #[test]
    fn error_display_prefixes_domain() {
        assert!(format!("{}", Error::Chain(ChainError::Full)).starts_with("chain: "));
        assert!(format!("{}", Error::Access(AccessError::read(0))).starts_with("access: "));
        assert!(
            format!("{}", Error::Channel(ChannelError::Halted(Channel::Mm2s)))
                .starts_with("channel: ")
        );
    }

    #[test]
    fn exit_code_status_error_uses_error_bits() {
        let err = Error::Channel(ChannelError::Status {
            channel: Channel::Mm2s,
            status: DmaStatus::from_raw(0x0000_0113),
        });
        assert_eq!(err.exit_code(), 0x110);
    }

    #[test]
    fn exit_code_access_error_uses_os_code() {
        let err = Error::Access(AccessError::read(0).with_os_code(2));
        assert_eq!(err.exit_code(), 2);
        assert_eq!(Error::Access(AccessError::read(0)).exit_code(), 1);
    }

    #[test]
    fn exit_code_failure_for_others() {
        assert_eq!(Error::Chain(ChainError::Empty).exit_code(), 1);
        assert_eq!(
            Error::Channel(ChannelError::Halted(Channel::S2mm)).exit_code(),
            1
        );
    }
}
