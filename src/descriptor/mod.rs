//! Scatter-gather descriptor record and descriptor chains.
//!
//! A [`Descriptor`] is the in-memory image of one hardware descriptor: the
//! fields the engine reads (next pointer, buffer address, control) and the
//! status word it writes back. A [`DescriptorChain`] orders descriptors with
//! explicit next-index links.

pub mod chain;

pub use chain::{ChainIter, DescriptorChain, TailLink};

use crate::driver::error::{ChainError, ChainResult};
use crate::internal::constants::{DESCRIPTOR_SIZE, MAX_BYTE_COUNT};
use crate::internal::descriptor_bits::{control, status};

#[inline(always)]
const fn lo(value: u64) -> u32 {
    (value & 0xFFFF_FFFF) as u32
}

#[inline(always)]
const fn hi(value: u64) -> u32 {
    (value >> 32) as u32
}

#[inline(always)]
const fn combine(high: u32, low: u32) -> u64 {
    ((high as u64) << 32) | low as u64
}

// =============================================================================
// Descriptor
// =============================================================================

/// One scatter-gather descriptor (64 bytes, 64-byte aligned).
///
/// Field order and padding match the hardware layout so that
/// `offset_of!` on this struct equals the device-side field offsets.
#[repr(C, align(64))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Descriptor {
    /// NXTDESC: next descriptor pointer, low word
    next_desc: u32,
    /// NXTDESC_MSB: next descriptor pointer, high word
    next_desc_msb: u32,
    /// BUFFER_ADDRESS: buffer address, low word
    buffer_addr: u32,
    /// BUFFER_ADDRESS_MSB: buffer address, high word
    buffer_addr_msb: u32,
    /// Reserved
    _reserved: [u32; 2],
    /// CONTROL: byte count | SOF | EOF
    control: u32,
    /// STATUS: written by hardware
    status: u32,
    /// APP0..APP4: application words, carried but not interpreted
    app: [u32; 5],
}

const _: () = assert!(core::mem::size_of::<Descriptor>() == DESCRIPTOR_SIZE);
const _: () = assert!(core::mem::align_of::<Descriptor>() == DESCRIPTOR_SIZE);

impl Descriptor {
    /// Size of the descriptor in bytes
    pub const SIZE: usize = DESCRIPTOR_SIZE;

    /// Create a zeroed descriptor.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next_desc: 0,
            next_desc_msb: 0,
            buffer_addr: 0,
            buffer_addr_msb: 0,
            _reserved: [0; 2],
            control: 0,
            status: 0,
            app: [0; 5],
        }
    }

    /// Descriptor for one buffer segment of `byte_count` bytes.
    pub const fn segment(buffer_address: u64, byte_count: u32) -> ChainResult<Self> {
        if byte_count > MAX_BYTE_COUNT {
            return Err(ChainError::ByteCountTooLarge);
        }
        let mut desc = Self::new();
        desc.buffer_addr = lo(buffer_address);
        desc.buffer_addr_msb = hi(buffer_address);
        desc.control = byte_count;
        Ok(desc)
    }

    /// Mark as first descriptor of a frame.
    #[must_use]
    pub const fn with_sof(mut self) -> Self {
        self.control |= control::SOF;
        self
    }

    /// Mark as last descriptor of a frame.
    #[must_use]
    pub const fn with_eof(mut self) -> Self {
        self.control |= control::EOF;
        self
    }

    /// Set the next descriptor pointer (device-memory address, unbiased).
    pub fn set_next_address(&mut self, address: u64) {
        self.next_desc = lo(address);
        self.next_desc_msb = hi(address);
    }

    /// Next descriptor pointer as stored in the record.
    #[inline(always)]
    #[must_use]
    pub const fn next_address(&self) -> u64 {
        combine(self.next_desc_msb, self.next_desc)
    }

    /// Next pointer as placed into hardware: the bias is added to the low word
    /// (widened to 64 bits) and the result is OR-ed with the high word.
    ///
    /// A carry out of the low word therefore lands in the high word instead of
    /// being added to it.
    #[inline]
    #[must_use]
    pub const fn biased_next_address(&self, bias: u64) -> u64 {
        ((self.next_desc_msb as u64) << 32) | (self.next_desc as u64).wrapping_add(bias)
    }

    /// Set the buffer address.
    pub fn set_buffer_address(&mut self, address: u64) {
        self.buffer_addr = lo(address);
        self.buffer_addr_msb = hi(address);
    }

    /// Buffer address.
    #[inline(always)]
    #[must_use]
    pub const fn buffer_address(&self) -> u64 {
        combine(self.buffer_addr_msb, self.buffer_addr)
    }

    /// Set the segment byte count, keeping the frame flags.
    pub fn set_byte_count(&mut self, byte_count: u32) -> ChainResult<()> {
        if byte_count > MAX_BYTE_COUNT {
            return Err(ChainError::ByteCountTooLarge);
        }
        self.control = (self.control & !control::LENGTH_MASK) | byte_count;
        Ok(())
    }

    /// Segment byte count.
    #[inline(always)]
    #[must_use]
    pub const fn byte_count(&self) -> u32 {
        self.control & control::LENGTH_MASK
    }

    /// Set or clear start-of-frame.
    pub fn set_sof(&mut self, sof: bool) {
        if sof {
            self.control |= control::SOF;
        } else {
            self.control &= !control::SOF;
        }
    }

    /// Set or clear end-of-frame.
    pub fn set_eof(&mut self, eof: bool) {
        if eof {
            self.control |= control::EOF;
        } else {
            self.control &= !control::EOF;
        }
    }

    /// Start-of-frame flag.
    #[inline(always)]
    #[must_use]
    pub const fn is_sof(&self) -> bool {
        self.control & control::SOF != 0
    }

    /// End-of-frame flag.
    #[inline(always)]
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        self.control & control::EOF != 0
    }

    /// Low word of the next pointer.
    #[inline(always)]
    #[must_use]
    pub const fn raw_next_desc(&self) -> u32 {
        self.next_desc
    }

    /// High word of the next pointer.
    #[inline(always)]
    #[must_use]
    pub const fn raw_next_desc_msb(&self) -> u32 {
        self.next_desc_msb
    }

    /// Low word of the buffer address.
    #[inline(always)]
    #[must_use]
    pub const fn raw_buffer_addr(&self) -> u32 {
        self.buffer_addr
    }

    /// High word of the buffer address.
    #[inline(always)]
    #[must_use]
    pub const fn raw_buffer_addr_msb(&self) -> u32 {
        self.buffer_addr_msb
    }

    /// Raw CONTROL word.
    #[inline(always)]
    #[must_use]
    pub const fn raw_control(&self) -> u32 {
        self.control
    }

    /// Raw STATUS word (zero until read back from hardware).
    #[inline(always)]
    #[must_use]
    pub const fn raw_status(&self) -> u32 {
        self.status
    }

    /// Application word `index` (0..5).
    #[must_use]
    pub fn app(&self, index: usize) -> Option<u32> {
        self.app.get(index).copied()
    }

    /// Set application word `index` (0..5). Out-of-range indices are ignored.
    pub fn set_app(&mut self, index: usize, value: u32) {
        if let Some(word) = self.app.get_mut(index) {
            *word = value;
        }
    }
}

// =============================================================================
// Descriptor Status
// =============================================================================

/// Decoded descriptor STATUS word as written back by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DescriptorStatus {
    raw: u32,
}

impl DescriptorStatus {
    /// Decode a raw status word
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self { raw }
    }

    /// The raw status word
    #[inline]
    pub const fn raw(&self) -> u32 {
        self.raw
    }

    /// Engine has processed this descriptor
    #[inline]
    pub const fn is_complete(&self) -> bool {
        self.raw & status::COMPLETE != 0
    }

    /// Any per-descriptor error bit set
    #[inline]
    pub const fn has_error(&self) -> bool {
        self.raw & status::ALL_ERRORS != 0
    }

    /// DMAIntErr
    #[inline]
    pub const fn internal_error(&self) -> bool {
        self.raw & status::DMA_INT_ERR != 0
    }

    /// DMASlvErr
    #[inline]
    pub const fn slave_error(&self) -> bool {
        self.raw & status::DMA_SLV_ERR != 0
    }

    /// DMADecErr
    #[inline]
    pub const fn decode_error(&self) -> bool {
        self.raw & status::DMA_DEC_ERR != 0
    }

    /// S2MM: descriptor held the start of a received frame
    #[inline]
    pub const fn rx_sof(&self) -> bool {
        self.raw & status::RXSOF != 0
    }

    /// S2MM: descriptor held the end of a received frame
    #[inline]
    pub const fn rx_eof(&self) -> bool {
        self.raw & status::RXEOF != 0
    }

    /// Bytes actually transferred for this descriptor
    #[inline]
    pub const fn transferred(&self) -> u32 {
        self.raw & status::TRANSFERRED_MASK
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::descriptor_bits::offset;
    use core::mem::offset_of;

    #[test]
    fn descriptor_layout_matches_hardware_offsets() {
        assert_eq!(offset_of!(Descriptor, next_desc) as u64, offset::NXTDESC);
        assert_eq!(offset_of!(Descriptor, next_desc_msb) as u64, offset::NXTDESC_MSB);
        assert_eq!(offset_of!(Descriptor, buffer_addr) as u64, offset::BUFFER_ADDRESS);
        assert_eq!(
            offset_of!(Descriptor, buffer_addr_msb) as u64,
            offset::BUFFER_ADDRESS_MSB
        );
        assert_eq!(offset_of!(Descriptor, _reserved) as u64, offset::RESERVED0);
        assert_eq!(offset_of!(Descriptor, control) as u64, offset::CONTROL);
        assert_eq!(offset_of!(Descriptor, status) as u64, offset::STATUS);
        assert_eq!(offset_of!(Descriptor, app) as u64, offset::APP0);
        assert_eq!(core::mem::size_of::<Descriptor>(), 64);
    }

    #[test]
    fn new_descriptor_is_zeroed() {
        let desc = Descriptor::new();
        assert_eq!(desc, Descriptor::default());
        assert_eq!(desc.raw_status(), 0);
        assert_eq!(desc.next_address(), 0);
    }

    #[test]
    fn segment_sets_buffer_and_count() {
        let desc = Descriptor::segment(0x1_8000_0400, 1024).unwrap();
        assert_eq!(desc.raw_buffer_addr(), 0x8000_0400);
        assert_eq!(desc.raw_buffer_addr_msb(), 0x1);
        assert_eq!(desc.buffer_address(), 0x1_8000_0400);
        assert_eq!(desc.byte_count(), 1024);
        assert!(!desc.is_sof());
        assert!(!desc.is_eof());
    }

    #[test]
    fn segment_rejects_oversized_count() {
        assert_eq!(
            Descriptor::segment(0, 1 << 23),
            Err(ChainError::ByteCountTooLarge)
        );
        assert!(Descriptor::segment(0, (1 << 23) - 1).is_ok());
    }

    #[test]
    fn frame_flags_keep_count() {
        let desc = Descriptor::segment(0, 1024).unwrap().with_sof().with_eof();
        assert_eq!(desc.raw_control(), 1024 | (1 << 27) | (1 << 26));
        assert_eq!(desc.byte_count(), 1024);
        assert!(desc.is_sof());
        assert!(desc.is_eof());
    }

    #[test]
    fn set_byte_count_preserves_flags() {
        let mut desc = Descriptor::segment(0, 16).unwrap().with_sof();
        desc.set_byte_count(4096).unwrap();
        assert_eq!(desc.byte_count(), 4096);
        assert!(desc.is_sof());
        assert_eq!(desc.set_byte_count(u32::MAX), Err(ChainError::ByteCountTooLarge));
    }

    #[test]
    fn set_and_clear_flags() {
        let mut desc = Descriptor::new();
        desc.set_sof(true);
        desc.set_eof(true);
        assert!(desc.is_sof() && desc.is_eof());
        desc.set_sof(false);
        assert!(!desc.is_sof());
        assert!(desc.is_eof());
    }

    #[test]
    fn next_address_split() {
        let mut desc = Descriptor::new();
        desc.set_next_address(0x2_0002_0040);
        assert_eq!(desc.raw_next_desc(), 0x0002_0040);
        assert_eq!(desc.raw_next_desc_msb(), 0x2);
        assert_eq!(desc.next_address(), 0x2_0002_0040);
    }

    #[test]
    fn biased_next_address_adds_to_low_word() {
        let mut desc = Descriptor::new();
        desc.set_next_address(0x2_0040);
        assert_eq!(desc.biased_next_address(0x44A0_0000), 0x44A2_0040);
    }

    #[test]
    fn biased_next_address_carry_is_ored_into_high_word() {
        let mut desc = Descriptor::new();
        desc.set_next_address(0x1_F000_0000);
        // low + bias = 0x1_3000_0000; OR with high word 0x1 keeps bit 32 set once
        assert_eq!(desc.biased_next_address(0x4000_0000), 0x1_3000_0000);
    }

    #[test]
    fn app_words_bounds() {
        let mut desc = Descriptor::new();
        desc.set_app(4, 0xDEAD_BEEF);
        desc.set_app(5, 1);
        assert_eq!(desc.app(4), Some(0xDEAD_BEEF));
        assert_eq!(desc.app(5), None);
    }

    #[test]
    fn descriptor_status_decode() {
        let status = DescriptorStatus::from_raw((1 << 31) | 1024);
        assert!(status.is_complete());
        assert!(!status.has_error());
        assert_eq!(status.transferred(), 1024);

        let status = DescriptorStatus::from_raw((1 << 31) | (1 << 29) | 12);
        assert!(status.has_error());
        assert!(status.slave_error());
        assert!(!status.internal_error());
        assert!(!status.decode_error());
    }

    #[test]
    fn descriptor_status_rx_frame_bits() {
        let status = DescriptorStatus::from_raw((1 << 27) | (1 << 26) | 60);
        assert!(status.rx_sof());
        assert!(status.rx_eof());
        assert!(!status.is_complete());
        assert_eq!(status.transferred(), 60);
    }
}
