use st_core::Image;

pub const OTSU_BINS: usize = 256;

/// Otsu's global threshold over `values`.
///
/// The histogram spans `[min, max]` of the finite inputs in [`OTSU_BINS`]
/// equal bins; the returned threshold is the center of the bin that
/// maximizes between-class variance. Returns `None` when there are no finite
/// values or all of them are equal.
pub fn otsu_threshold(values: impl IntoIterator<Item = f32>) -> Option<f32> {
    let values: Vec<f32> = values.into_iter().filter(|v| v.is_finite()).collect();
    let (min_v, max_v) = values
        .iter()
        .fold(None, |acc: Option<(f32, f32)>, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;
    if max_v <= min_v {
        return None;
    }

    let lo = f64::from(min_v);
    let span = f64::from(max_v) - lo;
    let mut hist = [0u64; OTSU_BINS];
    for &v in &values {
        let t = (f64::from(v) - lo) / span * OTSU_BINS as f64;
        let bin = (t as usize).min(OTSU_BINS - 1);
        hist[bin] += 1;
    }

    let bin_width = span / OTSU_BINS as f64;
    let centers: Vec<f64> = (0..OTSU_BINS)
        .map(|i| lo + (i as f64 + 0.5) * bin_width)
        .collect();

    // Class weights and means below (inclusive) and above each split.
    let mut weight_lo = [0.0f64; OTSU_BINS];
    let mut mean_lo = [0.0f64; OTSU_BINS];
    let (mut w, mut s) = (0.0f64, 0.0f64);
    for i in 0..OTSU_BINS {
        w += hist[i] as f64;
        s += hist[i] as f64 * centers[i];
        weight_lo[i] = w;
        mean_lo[i] = if w > 0.0 { s / w } else { 0.0 };
    }

    let mut weight_hi = [0.0f64; OTSU_BINS];
    let mut mean_hi = [0.0f64; OTSU_BINS];
    let (mut w, mut s) = (0.0f64, 0.0f64);
    for i in (0..OTSU_BINS).rev() {
        w += hist[i] as f64;
        s += hist[i] as f64 * centers[i];
        weight_hi[i] = w;
        mean_hi[i] = if w > 0.0 { s / w } else { 0.0 };
    }

    let mut best_idx = 0usize;
    let mut best_var = f64::NEG_INFINITY;
    for i in 0..OTSU_BINS - 1 {
        let d = mean_lo[i] - mean_hi[i + 1];
        let var = weight_lo[i] * weight_hi[i + 1] * d * d;
        if var > best_var {
            best_var = var;
            best_idx = i;
        }
    }

    Some(centers[best_idx] as f32)
}

/// `true` where `img > threshold`.
pub fn binarize(img: &Image<f32>, threshold: f32) -> Image<bool> {
    img.map(|&v| v > threshold)
}

#[cfg(test)]
mod tests {
    use st_core::Image;

    use super::{binarize, otsu_threshold};

    #[test]
    fn bimodal_threshold_falls_between_modes() {
        let mut values = vec![0.1f32; 300];
        values.extend(std::iter::repeat_n(0.8f32, 100));
        values.extend([0.12, 0.09, 0.79, 0.83]);

        let t = otsu_threshold(values).expect("bimodal input");
        assert!(t > 0.12 && t < 0.79, "t = {t}");
    }

    #[test]
    fn two_values_split_at_first_bin() {
        let t = otsu_threshold([0.0f32, 1.0]).expect("two distinct values");
        assert!((t - 0.5 / 256.0).abs() < 1e-6);
    }

    #[test]
    fn constant_or_empty_input_has_no_threshold() {
        assert_eq!(otsu_threshold([0.3f32; 50]), None);
        assert_eq!(otsu_threshold(std::iter::empty()), None);
        assert_eq!(otsu_threshold([f32::NAN, f32::INFINITY]), None);
    }

    #[test]
    fn binarize_is_strict() {
        let img = Image::from_vec(3, 1, vec![0.2f32, 0.5, 0.7]).expect("valid image");
        assert_eq!(binarize(&img, 0.5).data(), &[false, false, true]);
    }
}
