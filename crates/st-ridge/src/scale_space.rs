use st_core::{Axis, Cube, Error, Image};
use st_filter::gaussian_filter1d;

/// Difference-of-Gaussians cube along `axis`.
///
/// Layer `i` is `blur(sigmas[i]) - blur(sigmas[i + 1])`, so the cube has
/// `sigmas.len() - 1` layers.
pub fn build_scale_space(img: &Image<f32>, sigmas: &[f32], axis: Axis) -> Result<Cube<f32>, Error> {
    if sigmas.len() < 2 {
        return Err(Error::InvalidParameter {
            name: "sigmas",
            reason: format!("need at least two scales, got {}", sigmas.len()),
        });
    }

    let blurs: Vec<Image<f32>> = sigmas
        .iter()
        .map(|&sigma| gaussian_filter1d(img, sigma, axis))
        .collect();
    let layers = blurs
        .windows(2)
        .map(|pair| pair[0].zip_map(&pair[1], |a, b| a - b))
        .collect();

    Cube::from_layers(img.width(), img.height(), layers)
}

#[cfg(test)]
mod tests {
    use st_core::{Axis, Image};

    use super::build_scale_space;

    #[test]
    fn one_layer_per_adjacent_scale_pair() {
        let img = Image::new_fill(16, 12, 0.5f32);
        let cube = build_scale_space(&img, &[1.0, 2.0, 4.0, 8.0], Axis::Y).expect("cube");
        assert_eq!(cube.num_scales(), 3);
        assert_eq!((cube.width(), cube.height()), (16, 12));
    }

    #[test]
    fn flat_image_has_near_zero_response() {
        let img = Image::new_fill(20, 20, 0.7f32);
        let cube = build_scale_space(&img, &[0.7071, 1.343, 2.552], Axis::X).expect("cube");
        for layer in cube.layers() {
            assert!(layer.data().iter().all(|v| v.abs() < 1e-5));
        }
    }

    #[test]
    fn bright_row_responds_along_y_only() {
        let img = Image::from_fn(24, 21, |_, y| if y == 10 { 1.0f32 } else { 0.0 });
        let along_y = build_scale_space(&img, &[0.7071, 1.343, 2.552], Axis::Y).expect("cube");
        let along_x = build_scale_space(&img, &[0.7071, 1.343, 2.552], Axis::X).expect("cube");

        let center = along_y.get(12, 10, 0).copied().expect("in range");
        assert!(center > 0.1);
        assert!(along_y.get(12, 10, 0) > along_y.get(12, 11, 0));
        assert!(along_x.get(12, 10, 0).expect("in range").abs() < 1e-5);
    }

    #[test]
    fn single_sigma_is_rejected() {
        let img = Image::new_fill(4, 4, 0.0f32);
        assert!(build_scale_space(&img, &[1.0], Axis::Y).is_err());
    }
}
