//! PNG format support.
//!
//! Reads 8- and 16-bit PNGs (gray, gray + alpha, RGB, RGBA, palette) into
//! `[0, 1]` RGB images. Writes 8-bit gray or RGB.
//!
//! # Example
//!
//! ```rust,ignore
//! use mbb_io::png::{read, write};
//!
//! let image = read("input.png")?;
//! write("output.png", &image)?;
//! ```

use crate::samples::{be_bytes_to_u16, to_rgb, to_u8, Samples};
use crate::{IoError, IoResult};
use mbb_core::ImageBuf;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::trace;

/// Reads a PNG file as a 3-channel `[0, 1]` image.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageBuf> {
    let file = File::open(path.as_ref())?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    // Palette -> RGB(A), sub-byte gray -> 8 bit.
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
    let bytes = &buf[..info.buffer_size()];

    let channels = match info.color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        other => {
            return Err(IoError::UnsupportedBitDepth(format!(
                "{:?} {:?}",
                other, info.bit_depth
            )))
        }
    };
    let samples = match info.bit_depth {
        png::BitDepth::Eight => Samples::U8(bytes.to_vec()),
        png::BitDepth::Sixteen => Samples::U16(be_bytes_to_u16(bytes)),
        other => {
            return Err(IoError::UnsupportedBitDepth(format!(
                "{:?} {:?}",
                info.color_type, other
            )))
        }
    };
    trace!(
        width = info.width,
        height = info.height,
        channels,
        depth = ?info.bit_depth,
        "decoded png"
    );

    to_rgb(info.width as usize, info.height as usize, channels, &samples)
}

/// Writes an image as an 8-bit PNG.
///
/// One-channel images are written as grayscale, three-channel ones as RGB.
/// Values are clipped to `[0, 1]` before quantization.
pub fn write<P: AsRef<Path>>(path: P, image: &ImageBuf) -> IoResult<()> {
    let color_type = match image.channels() {
        1 => png::ColorType::Grayscale,
        3 => png::ColorType::Rgb,
        n => return Err(IoError::EncodeError(format!("unsupported channel count: {}", n))),
    };
    let (width, height) = dimensions_u32(image)?;

    let file = File::create(path.as_ref())?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(color_type);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());
    encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    writer
        .write_image_data(&to_u8(image))
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    Ok(())
}

fn dimensions_u32(image: &ImageBuf) -> IoResult<(u32, u32)> {
    let w = u32::try_from(image.width())
        .map_err(|_| IoError::EncodeError(format!("width {} too large", image.width())))?;
    let h = u32::try_from(image.height())
        .map_err(|_| IoError::EncodeError(format!("height {} too large", image.height())))?;
    Ok((w, h))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn write_raw(path: &Path, w: u32, h: u32, color: png::ColorType, depth: png::BitDepth, data: &[u8]) {
        let file = File::create(path).unwrap();
        let mut enc = png::Encoder::new(BufWriter::new(file), w, h);
        enc.set_color(color);
        enc.set_depth(depth);
        let mut wr = enc.write_header().unwrap();
        wr.write_image_data(data).unwrap();
        wr.finish().unwrap();
    }

    #[test]
    fn test_roundtrip_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgb.png");
        let img = ImageBuf::from_fn(32, 16, 3, |x, y, c| match c {
            0 => x as f32 / 31.0,
            1 => y as f32 / 15.0,
            _ => 0.5,
        })
        .unwrap();

        write(&path, &img).unwrap();
        let back = read(&path).unwrap();
        assert_eq!(back.shape(), (16, 32, 3));
        // One 8-bit quantization step.
        assert!(back.max_abs_diff(&img).unwrap() <= 0.5 / 255.0 + 1e-6);
    }

    #[test]
    fn test_gray_written_and_expanded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mask.png");
        let mask = ImageBuf::from_fn(8, 8, 1, |x, _, _| if x < 4 { 1.0 } else { 0.0 }).unwrap();

        write(&path, &mask).unwrap();
        let back = read(&path).unwrap();
        assert_eq!(back.channels(), 3);
        assert_eq!(back.pixel(0, 0), &[1.0, 1.0, 1.0]);
        assert_eq!(back.pixel(7, 7), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_read_rgba16() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgba16.png");
        // One pixel: R=65535, G=0, B=32768, A=0 (big-endian).
        let data = [0xFF, 0xFF, 0x00, 0x00, 0x80, 0x00, 0x00, 0x00];
        write_raw(&path, 1, 1, png::ColorType::Rgba, png::BitDepth::Sixteen, &data);

        let img = read(&path).unwrap();
        assert_eq!(img.channels(), 3);
        assert_eq!(img.get(0, 0, 0), 1.0);
        assert_eq!(img.get(0, 0, 1), 0.0);
        assert_abs_diff_eq!(img.get(0, 0, 2), 0.5, epsilon = 1e-4);
    }

    #[test]
    fn test_write_rejects_two_channels() {
        let dir = tempfile::tempdir().unwrap();
        let img = ImageBuf::new(2, 2, 2).unwrap();
        assert!(matches!(
            write(dir.path().join("x.png"), &img),
            Err(IoError::EncodeError(_))
        ));
    }

    #[test]
    fn test_read_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.png");
        std::fs::write(&path, b"not a png at all").unwrap();
        assert!(matches!(read(&path), Err(IoError::DecodeError(_))));
    }
}
