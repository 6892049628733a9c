//! Register definitions for the AXI DMA engine
//!
//! Only offsets and bit masks live here. Register *access* goes through the
//! [`RegisterAccess`](crate::hal::RegisterAccess) capability so the same code
//! drives real hardware and the test register file.

pub mod dma;
