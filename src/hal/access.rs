//! Register access capability
//!
//! The driver never touches memory directly. Every 32-bit register or
//! descriptor-memory access goes through a [`RegisterAccess`] backend, so the
//! same sequencing code runs against hardware and against a simulated register
//! file in tests.

use crate::driver::error::AccessResult;

// =============================================================================
// Register Access Trait
// =============================================================================

/// Trait for 32-bit device register access
///
/// Addresses are absolute device-relative byte offsets. Values are in host
/// byte order; backends convert from/to the little-endian bus order. The
/// device identifier is owned by the backend.
pub trait RegisterAccess {
    /// Read one 32-bit word
    fn read(&mut self, address: u64) -> AccessResult<u32>;

    /// Write one 32-bit word
    fn write(&mut self, address: u64, value: u32) -> AccessResult<()>;

    /// Read-modify-write one 32-bit word, returning the value written
    fn modify<F>(&mut self, address: u64, f: F) -> AccessResult<u32>
    where
        F: FnOnce(u32) -> u32,
    {
        let value = f(self.read(address)?);
        self.write(address, value)?;
        Ok(value)
    }
}

impl<T: RegisterAccess + ?Sized> RegisterAccess for &mut T {
    fn read(&mut self, address: u64) -> AccessResult<u32> {
        (**self).read(address)
    }

    fn write(&mut self, address: u64, value: u32) -> AccessResult<()> {
        (**self).write(address, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockRegisters, RegisterOp};

    #[test]
    fn modify_reads_then_writes() {
        let mut regs = MockRegisters::new();
        regs.set(0x30, 0x0001_0002);

        let written = regs.modify(0x30, |v| v | 1).unwrap();

        assert_eq!(written, 0x0001_0003);
        assert_eq!(
            regs.ops(),
            [
                RegisterOp::Read(0x30, 0x0001_0002),
                RegisterOp::Write(0x30, 0x0001_0003)
            ]
        );
    }

    #[test]
    fn modify_stops_on_read_failure() {
        let mut regs = MockRegisters::new();
        regs.fail_reads_at(0x30);

        assert!(regs.modify(0x30, |v| v | 1).is_err());
        assert!(regs.writes().is_empty());
    }

    #[test]
    fn mutable_reference_forwards() {
        fn write_through<A: RegisterAccess>(mut access: A) {
            access.write(0x10, 7).unwrap();
        }

        let mut regs = MockRegisters::new();
        write_through(&mut regs);
        assert_eq!(regs.get(0x10), 7);
    }
}
