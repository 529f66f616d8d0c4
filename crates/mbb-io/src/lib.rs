//! # mbb-io
//!
//! Loading and saving images for multi-band blending.
//!
//! Every image is read as a 3-channel `f32` [`ImageBuf`] with samples in
//! `[0, 1]`: gray is replicated to RGB, alpha is dropped, and integer samples
//! are divided by the maximum of their bit depth (255 or 65535). Masks are
//! read the same way and then averaged down to one channel.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use mbb_io::{read, read_mask, write_normalized};
//!
//! let target = read("target.jpg")?;
//! let mask = read_mask("mask.png")?;
//! write_normalized("out.png", &target)?;
//! ```
//!
//! # Supported Formats
//!
//! | Format | Read | Write | Bit Depths |
//! |--------|------|-------|------------|
//! | PNG | Yes | Yes | 8, 16 (read), 8 (write) |
//! | JPEG | Yes | Yes | 8, 16-bit gray (read), 8 (write) |
//!
//! # Feature Flags
//!
//! - `png` - PNG support (default)
//! - `jpeg` - JPEG support (default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod detect;
mod error;
#[cfg(any(feature = "png", feature = "jpeg"))]
mod samples;

pub mod display;
pub mod grid;

#[cfg(feature = "png")]
pub mod png;

#[cfg(feature = "jpeg")]
pub mod jpeg;

pub use detect::Format;
pub use display::{clip, normalize_min_max};
pub use error::{IoError, IoResult};

use mbb_core::ImageBuf;
use std::path::Path;
use tracing::debug;

/// Reads an image, detecting the format from magic bytes, then extension.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The format is not supported or its feature is disabled
/// - The file is corrupted or uses an unsupported bit depth
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageBuf> {
    let path = path.as_ref();
    let format = Format::detect(path)?;

    let image = match format {
        #[cfg(feature = "png")]
        Format::Png => png::read(path)?,

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::read(path)?,

        #[allow(unreachable_patterns)]
        _ => return Err(unsupported(path, format)),
    };
    debug!(
        path = %path.display(),
        format = format.name(),
        w = image.width(),
        h = image.height(),
        "read image"
    );
    Ok(image)
}

/// Reads a mask: [`read`], then the mean over channels.
///
/// The result has one channel with values in `[0, 1]`; 1 selects the
/// target, 0 the source.
pub fn read_mask<P: AsRef<Path>>(path: P) -> IoResult<ImageBuf> {
    Ok(read(path)?.channel_mean())
}

/// Writes an image, choosing the format from the extension.
///
/// Samples are clipped to `[0, 1]` and quantized to 8 bits. JPEG uses
/// quality 90. One-channel images are written as grayscale.
///
/// # Errors
///
/// Returns an error if:
/// - The extension is not a supported format
/// - The image has a channel count other than 1 or 3
/// - The file cannot be created
pub fn write<P: AsRef<Path>>(path: P, image: &ImageBuf) -> IoResult<()> {
    let path = path.as_ref();
    let format = Format::from_extension(path);

    match format {
        #[cfg(feature = "png")]
        Format::Png => png::write(path, image)?,

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::write(path, image)?,

        #[allow(unreachable_patterns)]
        _ => return Err(unsupported(path, format)),
    }
    debug!(path = %path.display(), format = format.name(), "wrote image");
    Ok(())
}

/// Min-max normalizes `image` (see [`normalize_min_max`]) and writes it.
pub fn write_normalized<P: AsRef<Path>>(path: P, image: &ImageBuf) -> IoResult<()> {
    write(path, &normalize_min_max(image))
}

fn unsupported(path: &Path, format: Format) -> IoError {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("unknown");
    match format {
        Format::Unknown => IoError::UnsupportedFormat(ext.to_string()),
        known => IoError::UnsupportedFormat(format!(
            "{} (built without the `{}` feature)",
            ext,
            known.name()
        )),
    }
}
