//! Levels command: pyramid sizing for one image

use crate::LevelsArgs;
use anyhow::{Context, Result};
use mbb_ops::pyramid::max_levels;
use mbb_ops::resample::half_size;

pub fn run(args: LevelsArgs, verbose: u8) -> Result<()> {
    let image = super::load_image(&args.image)?;
    let (w, h) = image.dimensions();
    let max = max_levels(h, w).context("Cannot size a pyramid for this image")?;

    println!("{}", args.image.display());
    println!("  Size:       {}x{} ({} ch)", w, h, image.channels());
    println!("  Max levels: {}", max);

    if verbose > 0 {
        let (mut lw, mut lh) = (w, h);
        println!("  Level sizes:");
        for level in 0..=max {
            println!("    {:>2}: {}x{}", level, lw, lh);
            lw = half_size(lw);
            lh = half_size(lh);
        }
    }

    Ok(())
}
