//! JPEG format support.
//!
//! Reads baseline and progressive JPEGs (gray, RGB, CMYK, 16-bit gray) into
//! `[0, 1]` RGB images and writes 8-bit gray or RGB at a chosen quality.
//!
//! # Example
//!
//! ```rust,ignore
//! use mbb_io::jpeg::{self, JpegOptions};
//!
//! let image = jpeg::read("photo.jpg")?;
//! jpeg::write_with("preview.jpg", &image, &JpegOptions { quality: 75 })?;
//! ```

use crate::samples::{be_bytes_to_u16, to_rgb, to_u8, Samples};
use crate::{IoError, IoResult};
use mbb_core::ImageBuf;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::trace;

/// Options for writing JPEG files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegOptions {
    /// Quality level 1-100. Default: 90.
    pub quality: u8,
}

impl Default for JpegOptions {
    fn default() -> Self {
        Self { quality: 90 }
    }
}

/// Reads a JPEG file as a 3-channel `[0, 1]` image.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageBuf> {
    let file = File::open(path.as_ref())?;
    let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(file));
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

    let width = info.width as usize;
    let height = info.height as usize;
    trace!(width, height, format = ?info.pixel_format, "decoded jpeg");

    match info.pixel_format {
        jpeg_decoder::PixelFormat::RGB24 => to_rgb(width, height, 3, &Samples::U8(pixels)),
        jpeg_decoder::PixelFormat::L8 => to_rgb(width, height, 1, &Samples::U8(pixels)),
        jpeg_decoder::PixelFormat::L16 => {
            to_rgb(width, height, 1, &Samples::U16(be_bytes_to_u16(&pixels)))
        }
        jpeg_decoder::PixelFormat::CMYK32 => {
            to_rgb(width, height, 3, &Samples::U8(cmyk_to_rgb(&pixels)))
        }
    }
}

/// Approximate CMYK to RGB, no color management.
fn cmyk_to_rgb(pixels: &[u8]) -> Vec<u8> {
    pixels
        .chunks_exact(4)
        .flat_map(|cmyk| {
            let k = 1.0 - cmyk[3] as f32 / 255.0;
            let ink = |v: u8| ((1.0 - v as f32 / 255.0) * k * 255.0).round() as u8;
            [ink(cmyk[0]), ink(cmyk[1]), ink(cmyk[2])]
        })
        .collect()
}

/// Writes an image as JPEG with default options (quality 90).
pub fn write<P: AsRef<Path>>(path: P, image: &ImageBuf) -> IoResult<()> {
    write_with(path, image, &JpegOptions::default())
}

/// Writes an image as JPEG.
///
/// One-channel images are written as grayscale, three-channel ones as RGB.
/// Values are clipped to `[0, 1]` before quantization.
pub fn write_with<P: AsRef<Path>>(path: P, image: &ImageBuf, options: &JpegOptions) -> IoResult<()> {
    let bytes = encode(image, options)?;
    std::fs::write(path.as_ref(), bytes)?;
    Ok(())
}

fn encode(image: &ImageBuf, options: &JpegOptions) -> IoResult<Vec<u8>> {
    use jpeg_encoder::{ColorType, Encoder};

    let color_type = match image.channels() {
        1 => ColorType::Luma,
        3 => ColorType::Rgb,
        n => return Err(IoError::EncodeError(format!("unsupported channel count: {}", n))),
    };
    let width = u16::try_from(image.width())
        .map_err(|_| IoError::EncodeError(format!("width {} exceeds JPEG limit", image.width())))?;
    let height = u16::try_from(image.height()).map_err(|_| {
        IoError::EncodeError(format!("height {} exceeds JPEG limit", image.height()))
    })?;

    let mut buffer = Vec::new();
    let encoder = Encoder::new(&mut buffer, options.quality.clamp(1, 100));
    encoder
        .encode(&to_u8(image), width, height, color_type)
        .map_err(|e: jpeg_encoder::EncodingError| IoError::EncodeError(e.to_string()))?;
    Ok(buffer)
}
