//! Conversion between decoder samples and `[0, 1]` float images.
//!
//! Decoders hand back integer samples in one of four layouts: gray,
//! gray + alpha, RGB, RGBA. All of them become 3-channel RGB floats:
//! gray is replicated, alpha is dropped, and each sample is divided by the
//! maximum of its bit depth.

use crate::{IoError, IoResult};
use mbb_core::{ImageBuf, RGB_CHANNELS};

/// Integer samples as produced by a decoder.
#[derive(Debug, Clone)]
pub(crate) enum Samples {
    /// 8-bit samples, scaled by 255.
    U8(Vec<u8>),
    /// 16-bit samples, scaled by 65535.
    U16(Vec<u16>),
}

impl Samples {
    fn len(&self) -> usize {
        match self {
            Samples::U8(v) => v.len(),
            Samples::U16(v) => v.len(),
        }
    }

    #[inline]
    fn unit(&self, i: usize) -> f32 {
        match self {
            Samples::U8(v) => v[i] as f32 / u8::MAX as f32,
            Samples::U16(v) => v[i] as f32 / u16::MAX as f32,
        }
    }
}

/// Expands decoded samples with `channels` per pixel into an RGB image.
pub(crate) fn to_rgb(
    width: usize,
    height: usize,
    channels: usize,
    samples: &Samples,
) -> IoResult<ImageBuf> {
    // Source channel feeding each of R, G, B.
    let pick: [usize; 3] = match channels {
        1 | 2 => [0, 0, 0],
        3 | 4 => [0, 1, 2],
        n => {
            return Err(IoError::UnsupportedBitDepth(format!(
                "{} channels per pixel",
                n
            )))
        }
    };
    let expected = width * height * channels;
    if samples.len() < expected {
        return Err(IoError::DecodeError(format!(
            "decoder returned {} samples, expected {}",
            samples.len(),
            expected
        )));
    }

    let mut data = Vec::with_capacity(width * height * RGB_CHANNELS);
    for px in 0..width * height {
        let base = px * channels;
        data.extend(pick.iter().map(|&c| samples.unit(base + c)));
    }
    Ok(ImageBuf::from_data(width, height, RGB_CHANNELS, data)?)
}

/// Clips to `[0, 1]` and quantizes to 8 bits with rounding.
pub(crate) fn to_u8(image: &ImageBuf) -> Vec<u8> {
    image
        .data()
        .iter()
        .map(|&v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
        .collect()
}

/// Converts big-endian byte pairs to `u16` samples.
pub(crate) fn be_bytes_to_u16(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect()
}
