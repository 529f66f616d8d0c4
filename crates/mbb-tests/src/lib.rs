//! Integration tests for the mbb crates.
//!
//! End-to-end checks that files written by mbb-io survive a trip through
//! mbb-ops and back, plus whole-pipeline properties of the blenders.

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use mbb_core::ImageBuf;
    use mbb_ops::pyramid::{build_laplacian, max_levels};
    use mbb_ops::reconstruct::reconstruct;
    use mbb_ops::{Blender, MultiBandBlending, NaiveBlending, OpsError};
    use tempfile::tempdir;

    fn flat(w: usize, h: usize, v: f32) -> ImageBuf {
        ImageBuf::filled(w, h, &[v, v, v]).unwrap()
    }

    fn step_mask(w: usize, h: usize, split: usize) -> ImageBuf {
        ImageBuf::from_fn(w, h, 1, |x, _, _| if x < split { 1.0 } else { 0.0 }).unwrap()
    }

    fn photo_like(w: usize, h: usize, seed: usize) -> ImageBuf {
        ImageBuf::from_fn(w, h, 3, |x, y, c| {
            let base = (x as f32 / w as f32 + y as f32 / h as f32) * 0.4;
            let grain = ((x * 37 + y * 91 + c * 11 + seed * 7) % 19) as f32 / 90.0;
            base + grain
        })
        .unwrap()
    }

    /// Files on disk -> multiband -> normalized file on disk.
    #[test]
    fn test_png_pipeline() {
        let dir = tempdir().unwrap();
        let (t_path, s_path, m_path, out_path) = (
            dir.path().join("target.png"),
            dir.path().join("source.png"),
            dir.path().join("mask.png"),
            dir.path().join("multiband.png"),
        );
        mbb_io::write(&t_path, &flat(64, 64, 1.0)).unwrap();
        mbb_io::write(&s_path, &flat(64, 64, 0.0)).unwrap();
        mbb_io::write(&m_path, &step_mask(64, 64, 32)).unwrap();

        let target = mbb_io::read(&t_path).unwrap();
        let source = mbb_io::read(&s_path).unwrap();
        let mask = mbb_io::read_mask(&m_path).unwrap();
        assert_eq!(mask.channels(), 1);

        assert_eq!(max_levels(target.height(), target.width()).unwrap(), 6);
        // Flat inputs carry no detail bands, so at full depth the result is
        // the 1x1 mask mean everywhere. Four levels keep a visible ramp.
        let out = MultiBandBlending::new(4).blend(&target, &source, &mask).unwrap();
        mbb_io::write_normalized(&out_path, &out).unwrap();

        let back = mbb_io::read(&out_path).unwrap();
        assert_eq!(back.shape(), (64, 64, 3));
        // Normalized: the darkest and brightest pixels span the full range.
        let (lo, hi) = back.min_max();
        assert_eq!(lo, 0.0);
        assert_eq!(hi, 1.0);
        assert!(back.get(0, 10, 0) > back.get(63, 10, 0));
    }

    /// JPEG inputs, both blends written as JPEG, plus the comparison sheet.
    #[test]
    fn test_jpeg_compare_flow() {
        let dir = tempdir().unwrap();
        let t_path = dir.path().join("target.jpg");
        let s_path = dir.path().join("source.jpg");
        let m_path = dir.path().join("mask.jpg");
        mbb_io::write(&t_path, &photo_like(96, 64, 1)).unwrap();
        mbb_io::write(&s_path, &photo_like(96, 64, 2).map(|v| 1.0 - v)).unwrap();
        mbb_io::write(&m_path, &step_mask(96, 64, 48).broadcast(3).unwrap()).unwrap();

        let target = mbb_io::read(&t_path).unwrap();
        let source = mbb_io::read(&s_path).unwrap();
        let mask = mbb_io::read_mask(&m_path).unwrap();

        let multi = MultiBandBlending::auto().blend(&target, &source, &mask).unwrap();
        let naive = NaiveBlending.blend(&target, &source, &mask).unwrap();
        for (name, img) in [("multiband.jpg", &multi), ("naive.jpg", &naive)] {
            let path = dir.path().join(name);
            mbb_io::write_normalized(&path, img).unwrap();
            assert_eq!(mbb_io::read(&path).unwrap().shape(), (64, 96, 3));
        }

        let sheet = mbb_io::grid::compose_grid(
            &[&target, &source, &mask, &multi, &naive],
            3,
            4,
        )
        .unwrap();
        let sheet_path = dir.path().join("sheet.png");
        mbb_io::write(&sheet_path, &sheet).unwrap();
        assert_eq!(
            mbb_io::read(&sheet_path).unwrap().dimensions(),
            (3 * 96 + 2 * 4, 2 * 64 + 4)
        );
    }

    #[test]
    fn test_step_seam_multiband_vs_naive() {
        let (t, s, m) = (flat(64, 64, 1.0), flat(64, 64, 0.0), step_mask(64, 64, 32));
        let multi = MultiBandBlending::new(4).blend(&t, &s, &m).unwrap();
        let naive = NaiveBlending.blend(&t, &s, &m).unwrap();

        // Naive: a one-pixel jump from 1 to 0.
        assert_eq!(naive.get(31, 40, 1), 1.0);
        assert_eq!(naive.get(32, 40, 1), 0.0);

        // Multi-band: gradual, bounded, and still anchored at the far edges.
        let max_step = (1..64)
            .map(|x| (multi.get(x - 1, 40, 1) - multi.get(x, 40, 1)).abs())
            .fold(0.0f32, f32::max);
        assert!(max_step < 0.1, "max step {}", max_step);
        let (lo, hi) = multi.min_max();
        assert!(lo > -0.05 && hi < 1.05);
        assert!(multi.get(0, 40, 1) > 0.9);
        assert!(multi.get(63, 40, 1) < 0.1);
    }

    #[test]
    fn test_mask_extremes_reproduce_inputs() {
        let t = photo_like(45, 33, 3);
        let s = photo_like(45, 33, 4);
        let levels = max_levels(33, 45).unwrap();
        let blender = MultiBandBlending::new(levels);

        let all_t = blender.blend(&t, &s, &ImageBuf::filled(45, 33, &[1.0]).unwrap()).unwrap();
        let all_s = blender.blend(&t, &s, &ImageBuf::filled(45, 33, &[0.0]).unwrap()).unwrap();
        assert!(all_t.max_abs_diff(&t).unwrap() < 1e-5);
        assert!(all_s.max_abs_diff(&s).unwrap() < 1e-5);
    }

    #[test]
    fn test_round_trip_awkward_sizes() {
        for &(w, h) in &[(1, 17), (2, 2), (3, 64), (101, 7), (129, 65)] {
            let img = photo_like(w, h, w + h);
            let levels = max_levels(h, w).unwrap();
            let back = reconstruct(&build_laplacian(&img, levels).unwrap()).unwrap();
            assert_eq!(back.shape(), img.shape());
            assert!(back.max_abs_diff(&img).unwrap() < 1e-5, "{}x{}", w, h);
        }
    }

    #[test]
    fn test_blenders_interchangeable() {
        let t = photo_like(32, 24, 5);
        let s = photo_like(32, 24, 6);
        let m = ImageBuf::from_fn(32, 24, 1, |x, y, _| ((x + y) % 7) as f32 / 6.0).unwrap();

        let blenders: Vec<Box<dyn Blender>> = vec![
            Box::new(MultiBandBlending::auto()),
            Box::new(MultiBandBlending::new(0)),
            Box::new(NaiveBlending),
        ];
        let outs: Vec<ImageBuf> = blenders.iter().map(|b| b.blend(&t, &s, &m).unwrap()).collect();
        for out in &outs {
            assert_eq!(out.shape(), t.shape());
        }
        // Zero levels and naive agree.
        assert!(outs[1].max_abs_diff(&outs[2]).unwrap() < 1e-6);
        assert_eq!(blenders[0].name(), "multiband");
        assert_eq!(blenders[2].name(), "naive");
    }

    #[test]
    fn test_repeatable() {
        let t = photo_like(80, 60, 8);
        let s = photo_like(80, 60, 9);
        let m = step_mask(80, 60, 25);
        let a = mbb_ops::multiband::blend(&t, &s, &m, 5).unwrap();
        let b = mbb_ops::multiband::blend(&t, &s, &m, 5).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_mismatched_inputs_fail_before_work() {
        let t = flat(32, 32, 0.5);
        let s = flat(32, 16, 0.5);
        let m = step_mask(32, 32, 16);
        let err = MultiBandBlending::new(3).blend(&t, &s, &m).unwrap_err();
        assert!(matches!(err, OpsError::ShapeMismatch(_)));

        let err = MultiBandBlending::new(6).blend(&t, &t, &m).unwrap_err();
        assert!(matches!(err, OpsError::InvalidLevels { max: 5, .. }));
    }

    #[test]
    fn test_gray_mask_file_matches_in_memory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("soft.png");
        let soft = ImageBuf::from_fn(20, 10, 1, |x, _, _| x as f32 / 19.0).unwrap();
        mbb_io::write(&path, &soft).unwrap();

        let loaded = mbb_io::read_mask(&path).unwrap();
        assert_eq!(loaded.shape(), soft.shape());
        for x in 0..20 {
            assert_abs_diff_eq!(loaded.get(x, 5, 0), soft.get(x, 5, 0), epsilon = 0.5 / 255.0 + 1e-6);
        }
    }
}
