//! Descriptor chain programming
//!
//! [`DescriptorProgram`] materialises a [`DescriptorChain`] into device
//! memory one 32-bit field write at a time. The first descriptor lands at the
//! caller's base address; every following descriptor lands at the (unbiased)
//! next-pointer of its predecessor. Only the value written into the hardware
//! next-pointer field carries the engine address bias.

use super::config::DmaConfig;
use super::error::{AccessResult, ChainError, Result};
use crate::descriptor::{Descriptor, DescriptorChain, DescriptorStatus};
use crate::hal::access::RegisterAccess;
use crate::internal::descriptor_bits::offset;

#[cfg(feature = "log")]
use log::{debug, info};

/// Where a chain ended up in device memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProgrammedChain {
    /// Address of the first written descriptor (unbiased)
    pub head: u64,
    /// Address of the last written descriptor (unbiased)
    pub tail: u64,
    /// Number of descriptors written
    pub count: usize,
}

/// Writes descriptor chains into device memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptorProgram {
    bias: u64,
}

impl DescriptorProgram {
    /// Programmer using the address bias of `config`
    pub const fn new(config: &DmaConfig) -> Self {
        Self::with_bias(config.addressing.bias)
    }

    /// Programmer with an explicit address bias
    pub const fn with_bias(bias: u64) -> Self {
        Self { bias }
    }

    /// Address bias applied to next-pointers
    pub const fn bias(&self) -> u64 {
        self.bias
    }

    /// Write every descriptor of `chain` starting at `base`
    ///
    /// Nodes are written in traversal order, stopping after the in-memory
    /// tail even if its hardware next-pointer closes a ring.
    ///
    /// # Errors
    ///
    /// [`ChainError::Empty`] before any write when the chain has no
    /// descriptors; the first failed access otherwise.
    pub fn write<A, const N: usize>(
        &self,
        access: &mut A,
        chain: &DescriptorChain<N>,
        base: u64,
    ) -> Result<ProgrammedChain>
    where
        A: RegisterAccess,
    {
        if chain.is_empty() {
            return Err(ChainError::Empty.into());
        }

        #[cfg(feature = "log")]
        info!(
            "Programming {} descriptors at 0x{:x}",
            chain.len(),
            base
        );

        let mut address = base;
        let mut tail = base;
        let mut count = 0;
        for (_, descriptor) in chain.iter() {
            self.write_descriptor(access, address, descriptor)?;
            tail = address;
            count += 1;
            address = descriptor.next_address();
        }

        #[cfg(feature = "log")]
        info!("Descriptor chain programmed, tail at 0x{:x}", tail);

        Ok(ProgrammedChain {
            head: base,
            tail,
            count,
        })
    }

    /// Write one descriptor's fields at `address`
    ///
    /// Field order is fixed: next-low, next-high, buffer-low, buffer-high,
    /// control, status (zeroed). Reserved and application words are not written.
    pub fn write_descriptor<A>(
        &self,
        access: &mut A,
        address: u64,
        descriptor: &Descriptor,
    ) -> AccessResult<()>
    where
        A: RegisterAccess,
    {
        let next = descriptor.biased_next_address(self.bias);
        let fields = [
            (offset::NXTDESC, next as u32),
            (offset::NXTDESC_MSB, (next >> 32) as u32),
            (offset::BUFFER_ADDRESS, descriptor.raw_buffer_addr()),
            (offset::BUFFER_ADDRESS_MSB, descriptor.raw_buffer_addr_msb()),
            (offset::CONTROL, descriptor.raw_control()),
            (offset::STATUS, 0),
        ];

        for (field, value) in fields {
            #[cfg(feature = "log")]
            debug!("write desc 0x{:x} = 0x{:08x}", address + field, value);
            access.write(address + field, value)?;
        }
        Ok(())
    }

    /// Read back the hardware-written status word of the descriptor at `address`
    pub fn read_status<A>(&self, access: &mut A, address: u64) -> AccessResult<DescriptorStatus>
    where
        A: RegisterAccess,
    {
        access
            .read(address + offset::STATUS)
            .map(DescriptorStatus::from_raw)
    }
}
