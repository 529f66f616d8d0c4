//! Blend command

use crate::{BlendArgs, Method};
use anyhow::{Context, Result};
use mbb_ops::{Blender, MultiBandBlending, NaiveBlending};
use tracing::{info, warn};

pub fn run(args: BlendArgs, verbose: u8) -> Result<()> {
    let inputs = super::Inputs::load(&args.target, &args.source, &args.mask, verbose)?;

    let blender: Box<dyn Blender> = match args.method {
        Method::Multiband => {
            let multiband = args
                .levels
                .map_or_else(MultiBandBlending::auto, MultiBandBlending::new);
            if verbose > 0 {
                let levels = multiband
                    .resolve_levels(&inputs.target)
                    .context("Cannot size a pyramid for the target")?;
                println!("Multi-band blending with {} levels", levels);
            }
            Box::new(multiband)
        }
        Method::Naive => {
            if args.levels.is_some() {
                warn!("--levels has no effect with --method naive");
            }
            Box::new(NaiveBlending)
        }
    };

    let result = blender
        .blend(&inputs.target, &inputs.source, &inputs.mask)
        .with_context(|| format!("{} blend failed", blender.name()))?;
    let (lo, hi) = result.min_max();
    info!(method = blender.name(), lo, hi, "blend done");

    super::save_image(&args.output, &result, !args.no_normalize)?;

    if verbose > 0 {
        println!("Saved: {}", args.output.display());
    }

    Ok(())
}
