//! Internal Implementation Details
//!
//! This module contains implementation details that are not part of the public API.
//! Types in this module may change without notice between minor versions.
//!
//! # Contents
//!
//! - [`register`]: DMA register offsets and control/status bits
//! - [`constants`]: Sizes, timings and default addresses
//! - [`descriptor_bits`]: Descriptor field offsets and bit fields
//!
//! # Stability
//!
//! **WARNING:** This module is `pub(crate)` only. Do not depend on any types
//! or functions in this module from external code. They are subject to change
//! without notice.

pub(crate) mod constants;
pub(crate) mod descriptor_bits;
pub(crate) mod register;
