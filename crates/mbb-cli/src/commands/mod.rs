//! CLI command implementations

pub mod blend;
pub mod compare;
pub mod levels;

use anyhow::{Context, Result};
use mbb_core::ImageBuf;
use std::path::Path;

/// Load image from path
pub fn load_image(path: &Path) -> Result<ImageBuf> {
    mbb_io::read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Load a mask from path, averaged to one channel
pub fn load_mask(path: &Path) -> Result<ImageBuf> {
    mbb_io::read_mask(path).with_context(|| format!("Failed to load mask: {}", path.display()))
}

/// Save image to path, min-max normalized or clipped
pub fn save_image(path: &Path, image: &ImageBuf, normalize: bool) -> Result<()> {
    let res = if normalize {
        mbb_io::write_normalized(path, image)
    } else {
        mbb_io::write(path, image)
    };
    res.with_context(|| format!("Failed to save: {}", path.display()))
}

/// Target, source, and mask loaded from the three positional arguments.
pub struct Inputs {
    pub target: ImageBuf,
    pub source: ImageBuf,
    pub mask: ImageBuf,
}

impl Inputs {
    pub fn load(target: &Path, source: &Path, mask: &Path, verbose: u8) -> Result<Self> {
        let inputs = Self {
            target: load_image(target)?,
            source: load_image(source)?,
            mask: load_mask(mask)?,
        };
        if verbose > 0 {
            let (w, h) = inputs.target.dimensions();
            println!("Target: {} ({}x{})", target.display(), w, h);
            println!("Source: {}", source.display());
            println!("Mask:   {}", mask.display());
        }
        Ok(inputs)
    }

}
