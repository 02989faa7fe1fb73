use st_core::{Axis, BorderMode, Image};

use crate::conv1d::convolve_f32;
use crate::kernels1d::GaussianKernel1D;

const SOBEL_DIFF: [f32; 3] = [1.0, 0.0, -1.0];
const SOBEL_SMOOTH: [f32; 3] = [1.0, 2.0, 1.0];

/// Convolves every line of `img` along `axis` with `kernel`.
///
/// Rows ([`Axis::X`]) are filtered in place on contiguous slices; columns
/// ([`Axis::Y`]) are gathered into a scratch line first.
pub fn filter_along(
    img: &Image<f32>,
    kernel: &[f32],
    radius: usize,
    axis: Axis,
    border: &BorderMode<f32>,
) -> Image<f32> {
    let (w, h) = img.shape();
    let mut out = Image::new_fill(w, h, 0.0f32);
    if w == 0 || h == 0 {
        return out;
    }

    match axis {
        Axis::X => {
            for y in 0..h {
                convolve_f32(img.row(y), kernel, radius, border, out.row_mut(y));
            }
        }
        Axis::Y => {
            let mut line = Vec::with_capacity(h);
            let mut filtered = vec![0.0f32; h];
            for x in 0..w {
                img.read_line(Axis::Y, x, &mut line);
                convolve_f32(&line, kernel, radius, border, &mut filtered);
                out.write_line(Axis::Y, x, &filtered);
            }
        }
    }

    out
}

/// 1D Gaussian blur along `axis` with reflected borders.
pub fn gaussian_filter1d(img: &Image<f32>, sigma: f32, axis: Axis) -> Image<f32> {
    let kernel = GaussianKernel1D::new(sigma);
    filter_along(img, &kernel.g, kernel.radius, axis, &BorderMode::Reflect)
}

/// Laplacian of Gaussian: sum over both axes of the second Gaussian
/// derivative along that axis, smoothed by the plain Gaussian along the other.
///
/// Bright blobs and ridges give negative responses; troughs give positive.
pub fn gaussian_laplace(img: &Image<f32>, sigma: f32) -> Image<f32> {
    let kernel = GaussianKernel1D::new(sigma);
    let border = BorderMode::Reflect;

    let d2_y = filter_along(img, &kernel.d2g, kernel.radius, Axis::Y, &border);
    let d2_y = filter_along(&d2_y, &kernel.g, kernel.radius, Axis::X, &border);

    let d2_x = filter_along(img, &kernel.d2g, kernel.radius, Axis::X, &border);
    let d2_x = filter_along(&d2_x, &kernel.g, kernel.radius, Axis::Y, &border);

    d2_y.zip_map(&d2_x, |a, b| a + b)
}

/// Sobel derivative along `axis` (central difference along `axis`,
/// `[1, 2, 1]` smoothing across it), reflected borders.
pub fn sobel(img: &Image<f32>, axis: Axis) -> Image<f32> {
    let border = BorderMode::Reflect;
    let diff = filter_along(img, &SOBEL_DIFF, 1, axis, &border);
    filter_along(&diff, &SOBEL_SMOOTH, 1, axis.perpendicular(), &border)
}
