//! Scale collapse, pruning and horizontal/vertical conflict resolution.

use serde::Serialize;
use st_core::{Cube, Image};
use st_morph::{Connectivity, remove_small_objects};

/// One ridge pixel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RidgeRecord {
    pub row: usize,
    pub col: usize,
    /// Scale of the strongest maximum at this pixel.
    pub sigma: f32,
    pub strength: f32,
}

/// Per-pixel summary of the maxima over all scales.
#[derive(Debug, Clone, PartialEq)]
pub struct CollapsedRidges {
    /// True where any scale holds a maximum.
    pub ridges: Image<bool>,
    /// Largest cube value among maxima, 0 elsewhere.
    pub strength: Image<f32>,
    /// First scale index reaching `strength`.
    pub scale_index: Image<usize>,
}

/// Zeroes non-maxima and reduces over scale with OR, max and first argmax.
pub fn collapse(cube: &Cube<f32>, maxima: &Cube<bool>) -> CollapsedRidges {
    let (w, h) = (cube.width(), cube.height());
    let mut ridges = Image::new_fill(w, h, false);
    let mut strength = Image::new_fill(w, h, 0.0f32);
    let mut scale_index = Image::new_fill(w, h, 0usize);

    for (s, (values, peaks)) in cube.layers().iter().zip(maxima.layers()).enumerate() {
        let it = values
            .data()
            .iter()
            .zip(peaks.data())
            .zip(ridges.data_mut())
            .zip(strength.data_mut())
            .zip(scale_index.data_mut());
        for ((((&v, &peak), ridge), best), idx) in it {
            let z = if peak { v } else { 0.0 };
            *ridge |= peak;
            if s == 0 || z > *best {
                *best = z;
                *idx = s;
            }
        }
    }

    CollapsedRidges {
        ridges,
        strength,
        scale_index,
    }
}

/// Horizontal ridges must be prominent.
pub fn prune_horizontal(collapsed: &CollapsedRidges, high_threshold: f32) -> Image<bool> {
    collapsed
        .ridges
        .zip_map(&collapsed.strength, |&r, &v| r && v >= high_threshold)
}

/// Vertical ridges must be prominent or part of an 8-connected run of at
/// least `min_length` ridge pixels.
pub fn prune_vertical(collapsed: &CollapsedRidges, high_threshold: f32, min_length: usize) -> Image<bool> {
    let long = remove_small_objects(&collapsed.ridges, min_length, Connectivity::C8);
    let prominent = prune_horizontal(collapsed, high_threshold);
    prominent.zip_map(&long, |&p, &l| p || l)
}

/// Records of the pixels set in `ridges`, in row-major order.
pub fn records(
    collapsed: &CollapsedRidges,
    ridges: &Image<bool>,
    sigma_for_index: impl Fn(usize) -> f32,
) -> Vec<RidgeRecord> {
    let w = ridges.width();
    ridges
        .data()
        .iter()
        .enumerate()
        .filter(|(_, r)| **r)
        .map(|(i, _)| RidgeRecord {
            row: i / w,
            col: i % w,
            sigma: sigma_for_index(collapsed.scale_index.data()[i]),
            strength: collapsed.strength.data()[i],
        })
        .collect()
}

/// Vertical span claimed by each horizontal record.
///
/// A record at `(row, col)` fills rows `row - r .. row + r` of column `col`
/// with its strength, where `r = round(sqrt(2) * sigma)` and both ends are
/// clamped to `[0, height - 1]` (end exclusive).
pub fn horizontal_region(records: &[RidgeRecord], width: usize, height: usize) -> Image<f32> {
    let mut region = Image::new_fill(width, height, 0.0f32);
    if width == 0 || height == 0 {
        return region;
    }

    let last = height as isize - 1;
    for rec in records {
        let reach = (std::f32::consts::SQRT_2 * rec.sigma).round_ties_even() as isize;
        let row = rec.row as isize;
        let start = (row - reach).clamp(0, last) as usize;
        let end = (row + reach).clamp(0, last) as usize;
        for y in start..end {
            if let Some(v) = region.get_mut(rec.col, y) {
                *v = rec.strength;
            }
        }
    }
    region
}

/// Drops vertical ridge pixels inside a non-zero horizontal region.
pub fn suppress_overlaps(vertical: &Image<bool>, region: &Image<f32>) -> Image<bool> {
    vertical.zip_map(region, |&r, &v| r && v == 0.0)
}

#[cfg(test)]
mod tests {
    use st_core::{Cube, Image};

    use super::{
        CollapsedRidges, RidgeRecord, collapse, horizontal_region, prune_horizontal,
        prune_vertical, records, suppress_overlaps,
    };

    fn collapsed_from(ridges: Image<bool>, strength: f32) -> CollapsedRidges {
        let (w, h) = ridges.shape();
        CollapsedRidges {
            strength: ridges.map(|&r| if r { strength } else { 0.0 }),
            scale_index: Image::new_fill(w, h, 1),
            ridges,
        }
    }

    #[test]
    fn collapse_takes_strongest_maximum_and_first_scale() {
        let values = vec![
            Image::new_fill(2, 1, 0.5f32),
            Image::new_fill(2, 1, 0.9f32),
            Image::new_fill(2, 1, 0.9f32),
        ];
        let peaks = vec![
            Image::from_vec(2, 1, vec![true, false]).expect("shape"),
            Image::from_vec(2, 1, vec![false, false]).expect("shape"),
            Image::from_vec(2, 1, vec![true, false]).expect("shape"),
        ];
        let cube = Cube::from_layers(2, 1, values).expect("cube");
        let maxima = Cube::from_layers(2, 1, peaks).expect("cube");

        let c = collapse(&cube, &maxima);
        assert_eq!(c.ridges.data(), &[true, false]);
        assert_eq!(c.strength.data(), &[0.9, 0.0]);
        assert_eq!(c.scale_index.data(), &[2, 0]);
    }

    #[test]
    fn weak_vertical_ridge_survives_when_long() {
        let long = Image::from_fn(10, 20, |x, y| x == 2 && y < 15);
        let short = Image::from_fn(10, 20, |x, y| x == 7 && y < 14);
        let both = long.zip_map(&short, |&a, &b| a || b);
        let c = collapsed_from(both, 0.003);

        let v = prune_vertical(&c, 0.006, 15);
        assert_eq!(v.count(), 15);
        assert!(*v.get(2, 0).expect("in range"));
        assert!(!v.get(7, 0).expect("in range"));

        assert!(!prune_horizontal(&c, 0.006).any());
    }

    #[test]
    fn strong_short_ridges_are_kept_in_both_orientations() {
        let c = collapsed_from(Image::from_fn(6, 6, |x, y| x == 3 && y == 3), 0.01);
        assert_eq!(prune_horizontal(&c, 0.006).count(), 1);
        assert_eq!(prune_vertical(&c, 0.006, 15).count(), 1);
    }

    #[test]
    fn records_are_row_major_with_mapped_sigma() {
        let ridges = Image::from_fn(4, 3, |x, y| (x, y) == (3, 0) || (x, y) == (1, 2));
        let c = collapsed_from(ridges.clone(), 0.02);
        let recs = records(&c, &ridges, |i| 10.0 * i as f32);

        assert_eq!(recs.len(), 2);
        assert_eq!((recs[0].row, recs[0].col), (0, 3));
        assert_eq!((recs[1].row, recs[1].col), (2, 1));
        assert_eq!(recs[1].sigma, 10.0);
        assert_eq!(recs[1].strength, 0.02);
    }

    #[test]
    fn horizontal_region_spans_half_open_clamped_rows() {
        let recs = [
            RidgeRecord { row: 10, col: 5, sigma: 1.343, strength: 0.5 },
            RidgeRecord { row: 0, col: 1, sigma: 1.343, strength: 0.25 },
        ];
        let region = horizontal_region(&recs, 8, 20);

        let col5: Vec<usize> = (0..20).filter(|&y| *region.get(5, y).expect("in range") != 0.0).collect();
        assert_eq!(col5, vec![8, 9, 10, 11]);
        assert_eq!(*region.get(5, 9).expect("in range"), 0.5);

        let col1: Vec<usize> = (0..20).filter(|&y| *region.get(1, y).expect("in range") != 0.0).collect();
        assert_eq!(col1, vec![0, 1]);
    }

    #[test]
    fn vertical_pixels_inside_horizontal_region_are_suppressed() {
        let recs = [RidgeRecord { row: 10, col: 5, sigma: 1.343, strength: 0.5 }];
        let region = horizontal_region(&recs, 8, 20);
        let vertical = Image::from_fn(8, 20, |x, y| (x == 5 && (y == 9 || y == 12)) || (x == 6 && y == 10));

        let kept = suppress_overlaps(&vertical, &region);
        assert!(!kept.get(5, 9).expect("in range"));
        assert!(*kept.get(5, 12).expect("in range"));
        assert!(*kept.get(6, 10).expect("in range"));
    }
}
