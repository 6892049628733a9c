//! Character-device register backend (host builds)
//!
//! Accesses registers through a device node such as `/dev/xdma0_user` using
//! positioned 4-byte reads and writes. The device is opened for each access
//! and closed again afterwards; no handle is held between calls.
//!
//! Only compiled with the `std` feature; run its tests with
//! `cargo test --features std`.

extern crate std;

use std::fs::OpenOptions;
use std::io;
use std::os::unix::fs::FileExt;
use std::path::PathBuf;

use embedded_hal::delay::DelayNs;

use super::access::RegisterAccess;
use crate::driver::config::DeviceAddressing;
use crate::driver::error::{AccessError, AccessResult};

/// Register access through a character device node
#[derive(Debug, Clone)]
pub struct CharDevAccess {
    path: PathBuf,
}

impl CharDevAccess {
    /// Use the device node at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Use the device named in `addressing`
    pub fn from_addressing(addressing: &DeviceAddressing) -> Self {
        Self::new(addressing.device)
    }

    /// Device node path
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn open(&self, error: AccessError) -> AccessResult<std::fs::File> {
        OpenOptions::new()
            .read(true)
            .write(true)
            .open(&self.path)
            .map_err(|e| with_io_error(error, &e))
    }
}

fn with_io_error(error: AccessError, e: &io::Error) -> AccessError {
    match e.raw_os_error() {
        Some(code) => error.with_os_code(code),
        None => error,
    }
}

impl RegisterAccess for CharDevAccess {
    fn read(&mut self, address: u64) -> AccessResult<u32> {
        let error = AccessError::read(address);
        let file = self.open(error)?;
        let mut bytes = [0u8; 4];
        file.read_exact_at(&mut bytes, address)
            .map_err(|e| with_io_error(error, &e))?;
        Ok(u32::from_le_bytes(bytes))
    }

    fn write(&mut self, address: u64, value: u32) -> AccessResult<()> {
        let error = AccessError::write(address);
        let file = self.open(error)?;
        file.write_all_at(&value.to_le_bytes(), address)
            .map_err(|e| with_io_error(error, &e))
    }
}

/// `DelayNs` backed by `std::thread::sleep`
#[derive(Debug, Clone, Copy, Default)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(ns as u64));
    }
}
