//! # mbb-ops
//!
//! Pyramid construction and mask-driven blending of two images.
//!
//! # Modules
//!
//! - [`resample`] - centred binomial downsample / upsample
//! - [`pyramid`] - Gaussian and Laplacian pyramids
//! - [`band`] - per-level blending with a single-channel mask
//! - [`reconstruct`] - collapsing a band pyramid
//! - [`multiband`] - the full Laplacian-pyramid blend
//! - [`naive`] - single-resolution baseline
//!
//! # Example
//!
//! ```rust
//! use mbb_core::ImageBuf;
//! use mbb_ops::{Blender, MultiBandBlending, NaiveBlending};
//!
//! let target = ImageBuf::filled(64, 64, &[1.0, 1.0, 1.0]).unwrap();
//! let source = ImageBuf::filled(64, 64, &[0.0, 0.0, 0.0]).unwrap();
//! let mask = ImageBuf::from_fn(64, 64, 1, |x, _, _| if x < 32 { 1.0 } else { 0.0 }).unwrap();
//!
//! let smooth = MultiBandBlending::new(4).blend(&target, &source, &mask).unwrap();
//! let hard = NaiveBlending.blend(&target, &source, &mask).unwrap();
//! assert_eq!(hard.get(32, 0, 0), 0.0);
//! assert!(smooth.get(32, 0, 0) > 0.0);
//! ```
//!
//! # Features
//!
//! - `parallel` (default) - Rayon row- and pyramid-level parallelism.
//!   Results are bit-identical with and without it.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod parallel;

pub mod band;
pub mod blender;
pub mod multiband;
pub mod naive;
pub mod pyramid;
pub mod reconstruct;
pub mod resample;

pub use blender::{validate_inputs, Blender};
pub use error::{OpsError, OpsResult};
pub use multiband::MultiBandBlending;
pub use naive::NaiveBlending;
pub use pyramid::Pyramid;
