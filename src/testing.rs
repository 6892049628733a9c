//! Testing utilities and mock implementations
//!
//! This module provides mock implementations for testing the DMA driver
//! on the host without hardware access.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::vec::Vec;

use crate::driver::error::{AccessError, AccessResult};
use crate::hal::access::RegisterAccess;

// =============================================================================
// Mock Register File
// =============================================================================

/// One access observed by [`MockRegisters`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOp {
    /// Read of (address, value returned)
    Read(u64, u32),
    /// Write of (address, value)
    Write(u64, u32),
}

/// Simulated register file for driving the DMA logic without hardware
///
/// Unset addresses read as zero. Reads of an address with a scripted
/// sequence return the next scripted value (which then also becomes the
/// stored value), so hardware-side changes such as a self-clearing reset bit
/// can be modelled.
///
/// # Example
///
/// ```ignore
/// let mut regs = MockRegisters::new();
/// regs.script_reads(0x6_0000, &[0x4, 0x4, 0x0]); // reset bit clears on 3rd read
/// ```
#[derive(Debug, Default)]
pub struct MockRegisters {
    /// Current values: address -> value
    values: HashMap<u64, u32>,
    /// Pending scripted read values per address
    scripts: HashMap<u64, VecDeque<u32>>,
    /// Addresses whose reads fail
    failing_reads: HashSet<u64>,
    /// Addresses whose writes fail
    failing_writes: HashSet<u64>,
    /// Every access in order
    log: Vec<RegisterOp>,
}

impl MockRegisters {
    /// Create an empty register file
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a register value without logging an access
    pub fn set(&mut self, address: u64, value: u32) {
        self.values.insert(address, value);
    }

    /// Current value of a register (zero if never written)
    pub fn get(&self, address: u64) -> u32 {
        self.values.get(&address).copied().unwrap_or(0)
    }

    /// Queue values returned by successive reads of `address`
    pub fn script_reads(&mut self, address: u64, values: &[u32]) {
        self.scripts
            .entry(address)
            .or_default()
            .extend(values.iter().copied());
    }

    /// Make every read of `address` fail
    pub fn fail_reads_at(&mut self, address: u64) {
        self.failing_reads.insert(address);
    }

    /// Make every write of `address` fail
    pub fn fail_writes_at(&mut self, address: u64) {
        self.failing_writes.insert(address);
    }

    /// All accesses in order
    pub fn ops(&self) -> &[RegisterOp] {
        &self.log
    }

    /// Successful writes in order as (address, value)
    pub fn writes(&self) -> Vec<(u64, u32)> {
        self.log
            .iter()
            .filter_map(|op| match op {
                RegisterOp::Write(a, v) => Some((*a, *v)),
                RegisterOp::Read(..) => None,
            })
            .collect()
    }

    /// Successful reads of `address`
    pub fn reads_of(&self, address: u64) -> usize {
        self.log
            .iter()
            .filter(|op| matches!(op, RegisterOp::Read(a, _) if *a == address))
            .count()
    }

    /// Forget the access log
    pub fn clear_log(&mut self) {
        self.log.clear();
    }
}

impl RegisterAccess for MockRegisters {
    fn read(&mut self, address: u64) -> AccessResult<u32> {
        if self.failing_reads.contains(&address) {
            return Err(AccessError::read(address).with_os_code(5));
        }
        if let Some(value) = self.scripts.get_mut(&address).and_then(VecDeque::pop_front) {
            self.values.insert(address, value);
        }
        let value = self.get(address);
        self.log.push(RegisterOp::Read(address, value));
        Ok(value)
    }

    fn write(&mut self, address: u64, value: u32) -> AccessResult<()> {
        if self.failing_writes.contains(&address) {
            return Err(AccessError::write(address).with_os_code(5));
        }
        self.values.insert(address, value);
        self.log.push(RegisterOp::Write(address, value));
        Ok(())
    }
}

// =============================================================================
// Mock Delay
// =============================================================================

/// Delay that records requested time instead of sleeping
#[derive(Debug, Default)]
pub struct MockDelay {
    /// Total nanoseconds delayed
    total_ns: RefCell<u64>,
}

impl MockDelay {
    /// Create a new mock delay
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total nanoseconds that were "delayed"
    pub fn total_ns(&self) -> u64 {
        *self.total_ns.borrow()
    }

    /// Get total milliseconds that were "delayed"
    pub fn total_ms(&self) -> u64 {
        self.total_ns() / 1_000_000
    }

    /// Reset the delay counter
    pub fn reset(&self) {
        *self.total_ns.borrow_mut() = 0;
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        *self.total_ns.borrow_mut() += ns as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_registers_read_write() {
        let mut regs = MockRegisters::new();

        // Initially reads 0
        assert_eq!(regs.read(0x04).unwrap(), 0);

        regs.write(0x04, 0x1234).unwrap();
        assert_eq!(regs.read(0x04).unwrap(), 0x1234);

        assert_eq!(regs.writes(), std::vec![(0x04, 0x1234)]);
        assert_eq!(regs.reads_of(0x04), 2);
        regs.clear_log();
        assert!(regs.ops().is_empty());
        // values survive a cleared log
        assert_eq!(regs.get(0x04), 0x1234);
    }

    #[test]
    fn mock_registers_scripted_reads() {
        let mut regs = MockRegisters::new();
        regs.write(0x00, 0x4).unwrap();
        regs.script_reads(0x00, &[0x4, 0x0]);

        assert_eq!(regs.read(0x00).unwrap(), 0x4);
        assert_eq!(regs.read(0x00).unwrap(), 0x0);
        // Last scripted value sticks
        assert_eq!(regs.read(0x00).unwrap(), 0x0);
    }

    #[test]
    fn mock_registers_failures_not_logged() {
        let mut regs = MockRegisters::new();
        regs.fail_reads_at(0x08);
        regs.fail_writes_at(0x0C);

        assert_eq!(regs.read(0x08).unwrap_err(), AccessError::read(0x08).with_os_code(5));
        assert!(regs.write(0x0C, 1).is_err());
        assert!(regs.ops().is_empty());
    }

    #[test]
    fn mock_delay_tracking() {
        let mut delay = MockDelay::new();

        embedded_hal::delay::DelayNs::delay_ns(&mut delay, 1000);
        embedded_hal::delay::DelayNs::delay_ns(&mut delay, 2000);

        assert_eq!(delay.total_ns(), 3000);
        assert_eq!(delay.total_ms(), 0); // Less than 1ms

        embedded_hal::delay::DelayNs::delay_ms(&mut delay, 10);
        assert_eq!(delay.total_ms(), 10);

        delay.reset();
        assert_eq!(delay.total_ns(), 0);
    }
}
