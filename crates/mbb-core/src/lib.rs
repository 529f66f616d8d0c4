//! # mbb-core
//!
//! Core types for multi-band image blending.
//!
//! This crate provides the foundational types used throughout the MBB-RS workspace:
//!
//! - [`ImageBuf`] - Owned, row-major, channel-interleaved `f32` buffer used for
//!   both three-channel images and single-channel masks
//! - [`BorderMode`] - Edge policy for out-of-range sample indices
//! - [`Error`] / [`Result`] - Buffer construction and access errors
//!
//! ## Crate Structure
//!
//! This crate has no internal dependencies. All other MBB-RS crates depend on
//! `mbb-core`:
//!
//! ```text
//! mbb-core (this crate)
//!    ^
//!    |
//!    +-- mbb-ops (resampling, pyramids, blending)
//!    +-- mbb-io (PNG/JPEG decode, display normalization)
//!    +-- mbb-cli (the `mbb` binary)
//! ```
//!
//! ## Value Range
//!
//! Buffers hold linear intensities, nominally in `[0, 1]`. Nothing in this
//! crate clamps: intermediate pyramid bands are signed and blended results may
//! overshoot. Clipping is a display-time concern handled by `mbb-io`.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod border;
pub mod error;
pub mod image;

pub use border::{map_index, BorderMode};
pub use error::{Error, Result};
pub use image::{ImageBuf, MASK_CHANNELS, RGB_CHANNELS};

/// Prelude module for convenient imports.
///
/// ```
/// use mbb_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::border::{map_index, BorderMode};
    pub use crate::error::{Error, Result};
    pub use crate::image::{ImageBuf, MASK_CHANNELS, RGB_CHANNELS};
}
