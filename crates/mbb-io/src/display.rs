//! Mapping blend results into displayable `[0, 1]` range.
//!
//! Blending output is unclamped. Before it is quantized for a file, it is
//! either clipped ([`clip`]) or stretched so its own minimum and maximum hit
//! 0 and 1 ([`normalize_min_max`]).

use mbb_core::ImageBuf;

/// Clamps every sample to `[0, 1]`.
pub fn clip(image: &ImageBuf) -> ImageBuf {
    image.map(|v| v.clamp(0.0, 1.0))
}

/// Linearly rescales so the image minimum maps to 0 and the maximum to 1.
///
/// Applied over all channels jointly. A constant image (max == min) maps to
/// all zeros.
///
/// # Example
///
/// ```rust
/// use mbb_core::ImageBuf;
/// use mbb_io::normalize_min_max;
///
/// let img = ImageBuf::from_data(3, 1, 1, vec![-1.0, 0.0, 1.0]).unwrap();
/// let n = normalize_min_max(&img);
/// assert_eq!(n.data(), &[0.0, 0.5, 1.0]);
/// ```
pub fn normalize_min_max(image: &ImageBuf) -> ImageBuf {
    let (lo, hi) = image.min_max();
    if hi <= lo {
        return image.map(|_| 0.0);
    }
    let range = hi - lo;
    image.map(|v| ((v - lo) / range).clamp(0.0, 1.0))
}
