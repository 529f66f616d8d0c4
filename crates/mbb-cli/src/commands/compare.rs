//! Compare command: multi-band vs naive on the same inputs

use crate::CompareArgs;
use anyhow::{Context, Result};
use mbb_io::{grid::compose_grid, normalize_min_max};
use mbb_ops::{Blender, MultiBandBlending, NaiveBlending};
use tracing::info;

pub fn run(args: CompareArgs, verbose: u8) -> Result<()> {
    let inputs = super::Inputs::load(&args.target, &args.source, &args.mask, verbose)?;
    let blender = args
        .levels
        .map_or_else(MultiBandBlending::auto, MultiBandBlending::new);
    let levels = blender
        .resolve_levels(&inputs.target)
        .context("Cannot size a pyramid for the target")?;

    let multiband = blender
        .blend(&inputs.target, &inputs.source, &inputs.mask)
        .context("multiband blend failed")?;
    super::save_image(&args.multiband, &multiband, true)?;

    let naive = NaiveBlending
        .blend(&inputs.target, &inputs.source, &inputs.mask)
        .context("naive blend failed")?;
    super::save_image(&args.naive, &naive, true)?;

    info!(levels, "compare done");
    if verbose > 0 {
        println!("Multi-band ({} levels): {}", levels, args.multiband.display());
        println!("Naive:                 {}", args.naive.display());
    }

    if let Some(ref path) = args.grid {
        let multiband = normalize_min_max(&multiband);
        let naive = normalize_min_max(&naive);
        let tiles = [
            &inputs.target,
            &inputs.source,
            &inputs.mask,
            &multiband,
            &naive,
        ];
        let sheet =
            compose_grid(&tiles, args.columns, args.gap).context("Failed to compose grid")?;
        super::save_image(path, &sheet, false)?;
        if verbose > 0 {
            println!("Grid:                  {}", path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mbb_core::ImageBuf;
    use std::path::Path;

    fn write_inputs(dir: &Path) {
        let target = ImageBuf::from_fn(40, 24, 3, |x, y, c| {
            ((x * 5 + y * 3 + c) % 11) as f32 / 10.0
        })
        .unwrap();
        let source = target.map(|v| 1.0 - v);
        let mask = ImageBuf::from_fn(40, 24, 3, |x, _, _| if x < 20 { 1.0 } else { 0.0 }).unwrap();
        mbb_io::write(dir.join("target.png"), &target).unwrap();
        mbb_io::write(dir.join("source.png"), &source).unwrap();
        mbb_io::write(dir.join("mask.png"), &mask).unwrap();
    }

    #[test]
    fn test_compare_writes_both_results_and_sheet() {
        let dir = tempfile::tempdir().unwrap();
        write_inputs(dir.path());

        let args = CompareArgs {
            target: dir.path().join("target.png"),
            source: dir.path().join("source.png"),
            mask: dir.path().join("mask.png"),
            multiband: dir.path().join("multiband.jpg"),
            naive: dir.path().join("naive.jpg"),
            grid: Some(dir.path().join("sheet.png")),
            levels: None,
            columns: 3,
            gap: 8,
        };
        run(args, 0).unwrap();

        for name in ["multiband.jpg", "naive.jpg"] {
            let out = mbb_io::read(dir.path().join(name)).unwrap();
            assert_eq!(out.shape(), (24, 40, 3), "{}", name);
        }

        // The naive result is written normalized, so it spans the full range.
        let naive = mbb_io::read(dir.path().join("naive.jpg")).unwrap();
        let (lo, hi) = naive.min_max();
        assert!(lo < 0.05 && hi > 0.95, "naive range {}..{}", lo, hi);

        let sheet = mbb_io::read(dir.path().join("sheet.png")).unwrap();
        assert_eq!(sheet.dimensions(), (3 * 40 + 2 * 8, 2 * 24 + 8));
    }

    #[test]
    fn test_compare_rejects_too_many_levels() {
        let dir = tempfile::tempdir().unwrap();
        write_inputs(dir.path());

        let args = CompareArgs {
            target: dir.path().join("target.png"),
            source: dir.path().join("source.png"),
            mask: dir.path().join("mask.png"),
            multiband: dir.path().join("multiband.png"),
            naive: dir.path().join("naive.png"),
            grid: None,
            levels: Some(9),
            columns: 3,
            gap: 8,
        };
        assert!(run(args, 0).is_err());
        assert!(!dir.path().join("multiband.png").exists());
    }
}
