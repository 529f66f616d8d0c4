//! Border handling for out-of-range sample indices.
//!
//! Separable filters read up to a few samples past either end of a row or
//! column. [`map_index`] folds such an index back into `0..len`.
//!
//! ```text
//! Reflect101, len = 5:   ... 2 1 | 0 1 2 3 4 | 3 2 ...
//! Clamp,      len = 5:   ... 0 0 | 0 1 2 3 4 | 4 4 ...
//! ```

/// Edge policy applied when a filter tap falls outside the signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderMode {
    /// Mirror about the edge sample without repeating it (`dcb|abcd|cba`).
    #[default]
    Reflect101,
    /// Repeat the edge sample (`aaa|abcd|ddd`).
    Clamp,
}

/// Maps a possibly out-of-range index into `0..len`.
///
/// `len` must be non-zero. A length-1 signal maps every index to 0 under
/// either policy.
///
/// # Example
///
/// ```rust
/// use mbb_core::{map_index, BorderMode};
///
/// assert_eq!(map_index(-1, 5, BorderMode::Reflect101), 1);
/// assert_eq!(map_index(5, 5, BorderMode::Reflect101), 3);
/// assert_eq!(map_index(-1, 5, BorderMode::Clamp), 0);
/// ```
#[inline]
pub fn map_index(i: isize, len: usize, mode: BorderMode) -> usize {
    debug_assert!(len > 0, "map_index on empty signal");
    if len == 1 {
        return 0;
    }
    match mode {
        BorderMode::Clamp => i.clamp(0, len as isize - 1) as usize,
        BorderMode::Reflect101 => {
            let period = (2 * len - 2) as isize;
            let r = i.rem_euclid(period) as usize;
            if r < len { r } else { 2 * len - 2 - r }
        }
    }
}
