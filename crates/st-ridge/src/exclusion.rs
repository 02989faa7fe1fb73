use log::warn;
use st_core::{Axis, Cube, Error, Image};
use st_filter::{gaussian_laplace, sobel};
use st_morph::{binarize, otsu_threshold};

/// Pixels whose absolute Sobel gradient along `gradient_axis` exceeds the
/// Otsu threshold of that gradient image.
///
/// A constant gradient image has no threshold and yields an empty mask.
pub fn slope_mask(img: &Image<f32>, gradient_axis: Axis) -> Image<bool> {
    let grad = sobel(img, gradient_axis).map(|v| v.abs());
    match otsu_threshold(grad.data().iter().copied()) {
        Some(t) => binarize(&grad, t),
        None => {
            warn!(
                "slope mask: constant gradient along {}, nothing excluded",
                gradient_axis.name()
            );
            Image::new_fill(img.width(), img.height(), false)
        }
    }
}

/// Pixels with a Laplacian-of-Gaussian response above `threshold`.
pub fn convex_mask(img: &Image<f32>, sigma: f32, threshold: f32) -> Image<bool> {
    binarize(&gaussian_laplace(img, sigma), threshold)
}

/// Cumulative exclusion cube.
///
/// Layer 0 is `base | (cube[0] < -threshold)`; every later layer adds its own
/// `cube[i] < -threshold` pixels to the previous one, so layer `i` always
/// contains layer `i - 1`.
pub fn build_exclusion(cube: &Cube<f32>, base: &Image<bool>, threshold: f32) -> Result<Cube<bool>, Error> {
    let shape = (cube.width(), cube.height());
    if base.shape() != shape {
        return Err(Error::ShapeMismatch {
            what: "exclusion base mask",
            expected: shape,
            actual: base.shape(),
        });
    }

    let mut layers: Vec<Image<bool>> = Vec::with_capacity(cube.num_scales());
    for layer in cube.layers() {
        let next = layers
            .last()
            .unwrap_or(base)
            .zip_map(layer, |&ex, &v| ex || v < -threshold);
        layers.push(next);
    }

    Cube::from_layers(shape.0, shape.1, layers)
}
