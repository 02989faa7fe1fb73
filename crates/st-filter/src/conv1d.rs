use st_core::{BorderMode, map_index};

/// Convolves `signal` with an odd-length `kernel` of the given `radius`.
///
/// `out[i] = sum_k signal[i + radius - k] * kernel[k]`, with out-of-range
/// samples resolved through `border`.
pub fn convolve_f32(
    signal: &[f32],
    kernel: &[f32],
    radius: usize,
    border: &BorderMode<f32>,
    out: &mut [f32],
) {
    assert_eq!(out.len(), signal.len(), "out must match signal length");
    assert_eq!(
        kernel.len(),
        2 * radius + 1,
        "kernel len must be 2*radius+1"
    );

    let n = signal.len();
    if n == 0 {
        return;
    }

    let interior_start = radius.min(n);
    let interior_end = n.saturating_sub(radius).max(interior_start);

    for (i, out_i) in out.iter_mut().enumerate().take(interior_start) {
        *out_i = convolve_at_border(signal, kernel, radius, border, i);
    }

    // Full kernel footprint is in bounds here.
    for (i, out_i) in out
        .iter_mut()
        .enumerate()
        .take(interior_end)
        .skip(interior_start)
    {
        let window = &signal[i - radius..=i + radius];
        let mut acc = 0.0f32;
        for (s, k) in window.iter().zip(kernel.iter().rev()) {
            acc += s * k;
        }
        *out_i = acc;
    }

    for (i, out_i) in out.iter_mut().enumerate().skip(interior_end) {
        *out_i = convolve_at_border(signal, kernel, radius, border, i);
    }
}

fn convolve_at_border(
    signal: &[f32],
    kernel: &[f32],
    radius: usize,
    border: &BorderMode<f32>,
    i: usize,
) -> f32 {
    let n = signal.len();
    let mut acc = 0.0f32;
    for (k, &kv) in kernel.iter().enumerate() {
        let idx = i as isize + radius as isize - k as isize;
        let v = match map_index(idx, n, border) {
            Some(j) => signal[j],
            None => match border {
                BorderMode::Constant(c) => *c,
                _ => 0.0,
            },
        };
        acc += v * kv;
    }
    acc
}
