//! Image buffer type shared by images, masks, and pyramid levels.
//!
//! [`ImageBuf`] is a plain owned `Vec<f32>` with its shape. The same type
//! carries three-channel photographs, single-channel masks, and every level
//! of a Gaussian or Laplacian pyramid, so resampling code is written once.
//!
//! # Memory Layout
//!
//! Samples are stored **row-major**, top-to-bottom, channels interleaved:
//!
//! ```text
//! Memory: [R G B R G B R G B ...]  <- Row 0
//!         [R G B R G B R G B ...]  <- Row 1
//!         ...
//! ```
//!
//! The sample for `(x, y, c)` lives at `(y * width + x) * channels + c`.
//!
//! # Usage
//!
//! ```rust
//! use mbb_core::ImageBuf;
//!
//! let mut img = ImageBuf::filled(4, 2, &[1.0, 0.5, 0.25]).unwrap();
//! img.set(3, 1, 2, 0.75);
//!
//! assert_eq!(img.shape(), (2, 4, 3));
//! assert_eq!(img.pixel(3, 1), &[1.0, 0.5, 0.75]);
//! ```

use crate::{Error, Result};

/// Channel count of an RGB image.
pub const RGB_CHANNELS: usize = 3;

/// Channel count of a blending mask.
pub const MASK_CHANNELS: usize = 1;

/// Owned `f32` image buffer with a runtime channel count.
///
/// Width, height and channels are always non-zero and
/// `data.len() == width * height * channels`; every constructor checks this.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuf {
    data: Vec<f32>,
    width: usize,
    height: usize,
    channels: usize,
}

impl ImageBuf {
    /// Creates a zero-filled buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if any dimension is zero or the
    /// sample count overflows `usize`.
    pub fn new(width: usize, height: usize, channels: usize) -> Result<Self> {
        let len = checked_len(width, height, channels)?;
        Ok(Self {
            data: vec![0.0; len],
            width,
            height,
            channels,
        })
    }

    /// Wraps existing sample data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data.len()` does not equal
    /// `width * height * channels`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mbb_core::ImageBuf;
    ///
    /// let mask = ImageBuf::from_data(2, 2, 1, vec![1.0, 0.0, 1.0, 0.0]).unwrap();
    /// assert_eq!(mask.channels(), 1);
    /// assert!(ImageBuf::from_data(2, 2, 3, vec![0.0; 5]).is_err());
    /// ```
    pub fn from_data(width: usize, height: usize, channels: usize, data: Vec<f32>) -> Result<Self> {
        let expected = checked_len(width, height, channels)?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                channels,
                format!("expected {} samples, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Creates a buffer where every pixel equals `pixel`.
    ///
    /// The channel count is `pixel.len()`.
    pub fn filled(width: usize, height: usize, pixel: &[f32]) -> Result<Self> {
        let channels = pixel.len();
        let len = checked_len(width, height, channels)?;
        let mut data = Vec::with_capacity(len);
        for _ in 0..width * height {
            data.extend_from_slice(pixel);
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Creates a buffer by evaluating `f(x, y, c)` for every sample.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mbb_core::ImageBuf;
    ///
    /// // Left half 1.0, right half 0.0
    /// let mask = ImageBuf::from_fn(8, 4, 1, |x, _, _| if x < 4 { 1.0 } else { 0.0 }).unwrap();
    /// assert_eq!(mask.get(3, 0, 0), 1.0);
    /// assert_eq!(mask.get(4, 0, 0), 0.0);
    /// ```
    pub fn from_fn<F>(width: usize, height: usize, channels: usize, f: F) -> Result<Self>
    where
        F: Fn(usize, usize, usize) -> f32,
    {
        let len = checked_len(width, height, channels)?;
        let mut data = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                for c in 0..channels {
                    data.push(f(x, y, c));
                }
            }
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Returns the width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of interleaved channels.
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Returns `(height, width, channels)`, the array-shape order.
    #[inline]
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.height, self.width, self.channels)
    }

    /// Returns `width * height`.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Returns the raw samples.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Returns the raw samples mutably.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consumes the buffer, returning its samples.
    #[inline]
    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * self.channels
    }

    /// Returns one sample.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y, c)` is out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize, c: usize) -> f32 {
        debug_assert!(x < self.width && y < self.height && c < self.channels);
        self.data[self.offset(x, y) + c]
    }

    /// Returns one sample, or [`Error::OutOfBounds`].
    pub fn try_get(&self, x: usize, y: usize, c: usize) -> Result<f32> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        if c >= self.channels {
            return Err(Error::channel_mismatch(self.channels, c + 1));
        }
        Ok(self.get(x, y, c))
    }

    /// Sets one sample.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y, c)` is out of bounds.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, c: usize, value: f32) {
        debug_assert!(x < self.width && y < self.height && c < self.channels);
        let offset = self.offset(x, y);
        self.data[offset + c] = value;
    }

    /// Returns the channels of one pixel.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[f32] {
        let offset = self.offset(x, y);
        &self.data[offset..offset + self.channels]
    }

    /// Returns one row of interleaved samples.
    #[inline]
    pub fn row(&self, y: usize) -> &[f32] {
        let stride = self.width * self.channels;
        &self.data[y * stride..(y + 1) * stride]
    }

    /// Returns `true` if both buffers have the same width and height.
    ///
    /// Channel counts are not compared; a mask and an image may share a size.
    #[inline]
    pub fn same_size(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Returns [`Error::DimensionMismatch`] unless [`same_size`](Self::same_size).
    pub fn ensure_same_size(&self, other: &Self) -> Result<()> {
        if self.same_size(other) {
            Ok(())
        } else {
            Err(Error::dimension_mismatch(
                self.dimensions(),
                other.dimensions(),
            ))
        }
    }

    /// Returns [`Error::ChannelMismatch`] unless the buffer has `expected`
    /// channels.
    pub fn ensure_channels(&self, expected: usize) -> Result<()> {
        if self.channels == expected {
            Ok(())
        } else {
            Err(Error::channel_mismatch(expected, self.channels))
        }
    }

    /// Applies `f` to every sample.
    pub fn map<F: Fn(f32) -> f32>(&self, f: F) -> Self {
        Self {
            data: self.data.iter().map(|&v| f(v)).collect(),
            width: self.width,
            height: self.height,
            channels: self.channels,
        }
    }

    /// Combines two equally-shaped buffers sample by sample.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] or [`Error::ChannelMismatch`] if the
    /// shapes differ.
    pub fn zip_map<F: Fn(f32, f32) -> f32>(&self, other: &Self, f: F) -> Result<Self> {
        self.ensure_same_size(other)?;
        other.ensure_channels(self.channels)?;
        Ok(Self {
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
            width: self.width,
            height: self.height,
            channels: self.channels,
        })
    }

    /// Sample-wise `self + other`.
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.zip_map(other, |a, b| a + b)
    }

    /// Sample-wise `self - other`.
    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.zip_map(other, |a, b| a - b)
    }

    /// Collapses all channels into one by averaging them.
    ///
    /// A single-channel buffer is returned as an unchanged copy.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mbb_core::ImageBuf;
    ///
    /// let rgb = ImageBuf::filled(2, 2, &[0.0, 0.5, 1.0]).unwrap();
    /// let gray = rgb.channel_mean();
    /// assert_eq!(gray.channels(), 1);
    /// assert!((gray.get(1, 1, 0) - 0.5).abs() < 1e-6);
    /// ```
    pub fn channel_mean(&self) -> Self {
        if self.channels == 1 {
            return self.clone();
        }
        let inv = 1.0 / self.channels as f32;
        Self {
            data: self
                .data
                .chunks_exact(self.channels)
                .map(|px| px.iter().sum::<f32>() * inv)
                .collect(),
            width: self.width,
            height: self.height,
            channels: 1,
        }
    }

    /// Repeats a single-channel buffer across `channels` channels.
    ///
    /// # Errors
    ///
    /// [`Error::ChannelMismatch`] if `self` is not single-channel;
    /// [`Error::InvalidDimensions`] if `channels == 0`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mbb_core::ImageBuf;
    ///
    /// let mask = ImageBuf::from_data(2, 1, 1, vec![0.25, 1.0]).unwrap();
    /// let rgb = mask.broadcast(3).unwrap();
    /// assert_eq!(rgb.data(), &[0.25, 0.25, 0.25, 1.0, 1.0, 1.0]);
    /// ```
    pub fn broadcast(&self, channels: usize) -> Result<Self> {
        self.ensure_channels(1)?;
        let len = checked_len(self.width, self.height, channels)?;
        let mut data = Vec::with_capacity(len);
        for &v in &self.data {
            data.extend(std::iter::repeat_n(v, channels));
        }
        Ok(Self {
            data,
            width: self.width,
            height: self.height,
            channels,
        })
    }

    /// Returns the smallest and largest sample.
    pub fn min_max(&self) -> (f32, f32) {
        self.data
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// Largest absolute sample difference between two equally-shaped buffers.
    pub fn max_abs_diff(&self, other: &Self) -> Result<f32> {
        self.ensure_same_size(other)?;
        other.ensure_channels(self.channels)?;
        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .fold(0.0f32, |m, (&a, &b)| m.max((a - b).abs())))
    }
}

fn checked_len(width: usize, height: usize, channels: usize) -> Result<usize> {
    if width == 0 || height == 0 || channels == 0 {
        return Err(Error::invalid_dimensions(
            width,
            height,
            channels,
            "width, height, and channels must be > 0",
        ));
    }
    width
        .checked_mul(height)
        .and_then(|v| v.checked_mul(channels))
        .ok_or_else(|| {
            Error::invalid_dimensions(width, height, channels, "sample count overflows usize")
        })
}
