//! Side-by-side comparison sheets.
//!
//! Tiles are laid out row-major into `columns` columns. Every cell is as large
//! as the largest tile; each tile is pasted at its cell's top-left corner.
//! Gaps and unused cell area are black.

use mbb_core::{Error, ImageBuf, Result, MASK_CHANNELS, RGB_CHANNELS};
use tracing::debug;

/// Composes `tiles` into one RGB image.
///
/// One-channel tiles (masks) are shown as gray. Sample values are copied
/// unchanged; clipping happens when the sheet is written.
///
/// # Errors
///
/// [`Error::InvalidDimensions`] if `tiles` is empty or `columns` is zero;
/// [`Error::ChannelMismatch`] for tiles that are neither 1- nor 3-channel.
///
/// # Example
///
/// ```rust
/// use mbb_core::ImageBuf;
/// use mbb_io::grid::compose_grid;
///
/// let a = ImageBuf::filled(4, 3, &[1.0, 0.0, 0.0]).unwrap();
/// let m = ImageBuf::filled(4, 3, &[0.5]).unwrap();
/// let sheet = compose_grid(&[&a, &m, &a], 2, 1).unwrap();
/// assert_eq!(sheet.dimensions(), (9, 7));
/// ```
pub fn compose_grid(tiles: &[&ImageBuf], columns: usize, gap: usize) -> Result<ImageBuf> {
    if tiles.is_empty() || columns == 0 {
        return Err(Error::invalid_dimensions(
            columns,
            tiles.len(),
            RGB_CHANNELS,
            "grid needs at least one tile and one column",
        ));
    }
    if let Some(bad) = tiles
        .iter()
        .find(|t| t.channels() != RGB_CHANNELS && t.channels() != MASK_CHANNELS)
    {
        return Err(Error::channel_mismatch(RGB_CHANNELS, bad.channels()));
    }

    let cell_w = tiles.iter().map(|t| t.width()).max().unwrap_or(1);
    let cell_h = tiles.iter().map(|t| t.height()).max().unwrap_or(1);
    let cols = columns.min(tiles.len());
    let rows = tiles.len().div_ceil(columns);
    let width = cols * cell_w + (cols - 1) * gap;
    let height = rows * cell_h + (rows - 1) * gap;
    debug!(width, height, cols, rows, "composing grid");

    let mut sheet = ImageBuf::new(width, height, RGB_CHANNELS)?;
    for (i, tile) in tiles.iter().enumerate() {
        let x0 = (i % columns) * (cell_w + gap);
        let y0 = (i / columns) * (cell_h + gap);
        paste(&mut sheet, tile, x0, y0);
    }
    Ok(sheet)
}

/// Copies `tile` into `sheet` at `(x0, y0)`. The caller guarantees it fits.
fn paste(sheet: &mut ImageBuf, tile: &ImageBuf, x0: usize, y0: usize) {
    let sheet_w = sheet.width();
    let tile_c = tile.channels();
    let data = sheet.data_mut();

    for y in 0..tile.height() {
        let src = tile.row(y);
        let start = ((y0 + y) * sheet_w + x0) * RGB_CHANNELS;
        let dst = &mut data[start..start + tile.width() * RGB_CHANNELS];
        for (out, px) in dst.chunks_exact_mut(RGB_CHANNELS).zip(src.chunks_exact(tile_c)) {
            if tile_c == MASK_CHANNELS {
                out.fill(px[0]);
            } else {
                out.copy_from_slice(px);
            }
        }
    }
}
