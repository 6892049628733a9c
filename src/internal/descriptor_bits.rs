//! Scatter-gather descriptor layout and bit field constants.
//!
//! Based on the AXI DMA scatter-gather descriptor format. A descriptor is
//! 13 words padded to 64 bytes; the hardware addresses fields by fixed offset.

/// Byte offsets of descriptor fields from the descriptor base address
pub mod offset {
    /// NXTDESC - next descriptor pointer, low word
    pub const NXTDESC: u64 = 0x00;
    /// NXTDESC_MSB - next descriptor pointer, high word
    pub const NXTDESC_MSB: u64 = 0x04;
    /// BUFFER_ADDRESS - buffer address, low word
    pub const BUFFER_ADDRESS: u64 = 0x08;
    /// BUFFER_ADDRESS_MSB - buffer address, high word
    pub const BUFFER_ADDRESS_MSB: u64 = 0x0C;
    /// First reserved word
    pub const RESERVED0: u64 = 0x10;
    /// Second reserved word
    pub const RESERVED1: u64 = 0x14;
    /// CONTROL - byte count and frame flags
    pub const CONTROL: u64 = 0x18;
    /// STATUS - hardware-written completion state
    pub const STATUS: u64 = 0x1C;
    /// APP0 - first of five application words
    pub const APP0: u64 = 0x20;
}

/// Descriptor CONTROL word bit field constants
pub mod control {
    /// Buffer length mask (23 bits)
    pub const LENGTH_MASK: u32 = 0x007F_FFFF;
    /// End of Frame - last descriptor of a packet
    pub const EOF: u32 = 1 << 26;
    /// Start of Frame - first descriptor of a packet
    pub const SOF: u32 = 1 << 27;
}

/// Descriptor STATUS word bit field constants
pub mod status {
    /// Transferred byte count mask (26 bits)
    pub const TRANSFERRED_MASK: u32 = 0x03FF_FFFF;
    /// RXEOF - S2MM only, descriptor held the end of a received frame
    pub const RXEOF: u32 = 1 << 26;
    /// RXSOF - S2MM only, descriptor held the start of a received frame
    pub const RXSOF: u32 = 1 << 27;
    /// DMAIntErr - internal error while processing this descriptor
    pub const DMA_INT_ERR: u32 = 1 << 28;
    /// DMASlvErr - slave error while processing this descriptor
    pub const DMA_SLV_ERR: u32 = 1 << 29;
    /// DMADecErr - decode error while processing this descriptor
    pub const DMA_DEC_ERR: u32 = 1 << 30;
    /// Cmplt - descriptor has been processed by the engine
    pub const COMPLETE: u32 = 1 << 31;

    /// All per-descriptor error bits
    pub const ALL_ERRORS: u32 = DMA_INT_ERR | DMA_SLV_ERR | DMA_DEC_ERR;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_flags_do_not_overlap_length() {
        assert_eq!(control::SOF & control::LENGTH_MASK, 0);
        assert_eq!(control::EOF & control::LENGTH_MASK, 0);
        assert_ne!(control::SOF, control::EOF);
    }

    #[test]
    fn status_flags_above_transferred_count() {
        assert_eq!(status::COMPLETE & status::TRANSFERRED_MASK, 0);
        assert_eq!(status::ALL_ERRORS & status::TRANSFERRED_MASK, 0);
    }

    #[test]
    fn control_and_status_words_adjacent() {
        assert_eq!(offset::STATUS - offset::CONTROL, 4);
        assert_eq!(offset::CONTROL - offset::BUFFER_ADDRESS_MSB, 12);
    }
}
