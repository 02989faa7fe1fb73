use crate::{Error, Image};

/// Stack of equally sized images indexed by scale.
#[derive(Debug, Clone, PartialEq)]
pub struct Cube<T> {
    width: usize,
    height: usize,
    layers: Vec<Image<T>>,
}

impl<T> Cube<T> {
    /// Every layer must be `width x height`. An empty layer list is allowed.
    pub fn from_layers(width: usize, height: usize, layers: Vec<Image<T>>) -> Result<Self, Error> {
        for layer in &layers {
            if layer.shape() != (width, height) {
                return Err(Error::ShapeMismatch {
                    what: "cube layer",
                    expected: (width, height),
                    actual: layer.shape(),
                });
            }
        }

        Ok(Self {
            width,
            height,
            layers,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn num_scales(&self) -> usize {
        self.layers.len()
    }

    pub fn layer(&self, scale: usize) -> &Image<T> {
        &self.layers[scale]
    }

    pub fn layers(&self) -> &[Image<T>] {
        &self.layers
    }

    pub fn get(&self, x: usize, y: usize, scale: usize) -> Option<&T> {
        self.layers.get(scale)?.get(x, y)
    }

    /// Applies `f` to every layer, keeping the cube shape.
    pub fn map_layers<U>(&self, f: impl FnMut(&Image<T>) -> Image<U>) -> Cube<U> {
        let layers: Vec<Image<U>> = self.layers.iter().map(f).collect();
        debug_assert!(
            layers
                .iter()
                .all(|l| l.shape() == (self.width, self.height))
        );
        Cube {
            width: self.width,
            height: self.height,
            layers,
        }
    }
}

impl Cube<f32> {
    pub fn min_max(&self) -> Option<(f32, f32)> {
        self.layers
            .iter()
            .filter_map(Image::min_max)
            .reduce(|(a0, a1), (b0, b1)| (a0.min(b0), a1.max(b1)))
    }
}

#[cfg(test)]
mod tests {
    use super::Cube;
    use crate::{Error, Image};

    #[test]
    fn layers_must_share_shape() {
        let layers = vec![Image::new_fill(3, 2, 0.0f32), Image::new_fill(2, 3, 0.0f32)];
        let err = Cube::from_layers(3, 2, layers).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn indexing_and_min_max_span_all_layers() {
        let a = Image::from_vec(2, 1, vec![1.0f32, 2.0]).expect("valid image");
        let b = Image::from_vec(2, 1, vec![-4.0f32, 0.0]).expect("valid image");
        let cube = Cube::from_layers(2, 1, vec![a, b]).expect("valid cube");

        assert_eq!(cube.num_scales(), 2);
        assert_eq!(cube.get(0, 0, 1), Some(&-4.0));
        assert_eq!(cube.get(0, 0, 2), None);
        assert_eq!(cube.min_max(), Some((-4.0, 2.0)));

        let signs = cube.map_layers(|l| l.map(|&v| v >= 0.0));
        assert_eq!(signs.layer(1).data(), &[false, true]);
    }
}
