use st_core::{Axis, Cube, Error, Image};

/// Local maxima of `cube` that are not excluded and reach `low_threshold`.
///
/// The neighbourhood is 3 samples along `detection_axis`, 3 along scale and
/// 1 across, so neighbouring pixels on the perpendicular axis never compete.
/// A maximum must not be smaller than any neighbour; on plateaus the sample
/// that comes first (lower scale, then lower position) wins. The first and
/// last index along the detection axis and along scale never hold a maximum,
/// and neither does the global minimum of the cube.
pub fn find_maxima(
    cube: &Cube<f32>,
    detection_axis: Axis,
    exclusion: &Cube<bool>,
    low_threshold: f32,
) -> Result<Cube<bool>, Error> {
    let (w, h) = (cube.width(), cube.height());
    if (exclusion.width(), exclusion.height()) != (w, h) {
        return Err(Error::ShapeMismatch {
            what: "exclusion cube",
            expected: (w, h),
            actual: (exclusion.width(), exclusion.height()),
        });
    }
    if exclusion.num_scales() != cube.num_scales() {
        return Err(Error::InvalidParameter {
            name: "exclusion",
            reason: format!(
                "expected {} scales, got {}",
                cube.num_scales(),
                exclusion.num_scales()
            ),
        });
    }

    let n = cube.num_scales();
    let none = || cube.map_layers(|l| Image::new_fill(l.width(), l.height(), false));
    let Some((lo, hi)) = cube.min_max() else {
        return Ok(none());
    };
    if hi <= lo {
        return Ok(none());
    }

    let along_len = detection_axis.len(w, h);
    let layers = (0..n)
        .map(|s| {
            Image::from_fn(w, h, |x, y| {
                let along = match detection_axis {
                    Axis::X => x,
                    Axis::Y => y,
                };
                if s == 0 || s + 1 >= n || along == 0 || along + 1 >= along_len {
                    return false;
                }
                let v = cube.layer(s).data()[y * w + x];
                if v <= lo || v < low_threshold || exclusion.layer(s).data()[y * w + x] {
                    return false;
                }
                is_peak(cube, detection_axis, x, y, s, v)
            })
        })
        .collect();

    Cube::from_layers(w, h, layers)
}

/// Caller guarantees `(x, y, s)` is at least one sample away from the
/// detection-axis and scale borders.
fn is_peak(cube: &Cube<f32>, axis: Axis, x: usize, y: usize, s: usize, v: f32) -> bool {
    let w = cube.width();
    for ds in -1isize..=1 {
        let layer = cube.layer((s as isize + ds) as usize).data();
        for da in -1isize..=1 {
            if ds == 0 && da == 0 {
                continue;
            }
            let (nx, ny) = match axis {
                Axis::X => ((x as isize + da) as usize, y),
                Axis::Y => (x, (y as isize + da) as usize),
            };
            let nv = layer[ny * w + nx];
            if nv > v || (nv == v && (ds, da) < (0, 0)) {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use st_core::{Axis, Cube, Image};

    use super::find_maxima;

    fn cube_with(w: usize, h: usize, n: usize, points: &[(usize, usize, usize, f32)]) -> Cube<f32> {
        let mut layers: Vec<Image<f32>> = (0..n).map(|_| Image::new_fill(w, h, 0.0)).collect();
        for &(x, y, s, v) in points {
            *layers[s].get_mut(x, y).expect("in range") = v;
        }
        Cube::from_layers(w, h, layers).expect("cube")
    }

    fn no_exclusion(cube: &Cube<f32>) -> Cube<bool> {
        cube.map_layers(|l| Image::new_fill(l.width(), l.height(), false))
    }

    fn maxima_points(m: &Cube<bool>) -> Vec<(usize, usize, usize)> {
        let mut out = Vec::new();
        for s in 0..m.num_scales() {
            for y in 0..m.height() {
                for x in 0..m.width() {
                    if *m.get(x, y, s).expect("in range") {
                        out.push((x, y, s));
                    }
                }
            }
        }
        out
    }

    #[test]
    fn isolated_peak_is_found() {
        let cube = cube_with(3, 5, 3, &[(1, 2, 1, 1.0)]);
        let m = find_maxima(&cube, Axis::Y, &no_exclusion(&cube), 0.002).expect("maxima");
        assert_eq!(maxima_points(&m), vec![(1, 2, 1)]);
    }

    #[test]
    fn border_samples_are_never_maxima() {
        let cube = cube_with(5, 5, 3, &[(2, 0, 1, 1.0), (2, 2, 0, 1.0), (2, 4, 1, 0.5), (0, 2, 1, 0.8)]);
        let m = find_maxima(&cube, Axis::Y, &no_exclusion(&cube), 0.0).expect("maxima");
        // x = 0 is only a border across the detection axis.
        assert_eq!(maxima_points(&m), vec![(0, 2, 1)]);
    }

    #[test]
    fn perpendicular_neighbours_do_not_compete() {
        let cube = cube_with(3, 5, 3, &[(0, 2, 1, 0.5), (1, 2, 1, 1.0)]);
        let m = find_maxima(&cube, Axis::Y, &no_exclusion(&cube), 0.0).expect("maxima");
        assert_eq!(maxima_points(&m), vec![(0, 2, 1), (1, 2, 1)]);

        let m = find_maxima(&cube, Axis::X, &no_exclusion(&cube), 0.0).expect("maxima");
        assert_eq!(maxima_points(&m), vec![(1, 2, 1)]);
    }

    #[test]
    fn plateau_keeps_first_sample_only() {
        let cube = cube_with(1, 6, 3, &[(0, 2, 1, 1.0), (0, 3, 1, 1.0)]);
        let m = find_maxima(&cube, Axis::Y, &no_exclusion(&cube), 0.0).expect("maxima");
        assert_eq!(maxima_points(&m), vec![(0, 2, 1)]);
    }

    #[test]
    fn excluded_and_weak_peaks_are_dropped() {
        let cube = cube_with(4, 5, 3, &[(1, 2, 1, 1.0), (3, 2, 1, 0.001)]);
        let exclusion = cube.map_layers(|l| Image::from_fn(l.width(), l.height(), |x, _| x == 1));
        let m = find_maxima(&cube, Axis::Y, &exclusion, 0.002).expect("maxima");
        assert!(maxima_points(&m).is_empty());
    }

    #[test]
    fn constant_cube_has_no_maxima() {
        let layers = (0..4).map(|_| Image::new_fill(6, 6, 0.25f32)).collect();
        let cube = Cube::from_layers(6, 6, layers).expect("cube");
        let m = find_maxima(&cube, Axis::X, &no_exclusion(&cube), 0.0).expect("maxima");
        assert!(maxima_points(&m).is_empty());
    }

    #[test]
    fn mismatched_exclusion_is_rejected() {
        let cube = cube_with(3, 5, 3, &[]);
        let other = cube_with(3, 5, 2, &[]);
        assert!(find_maxima(&cube, Axis::Y, &no_exclusion(&other), 0.0).is_err());
    }
}
