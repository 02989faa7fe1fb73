use crate::{Axis, Error};

/// Dense row-major 2D buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T> Image<T> {
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self, Error> {
        let expected = width.checked_mul(height).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;

        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Builds an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(width.saturating_mul(height));
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }

        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn row(&self, y: usize) -> &[T] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.width;
        &mut self.data[start..start + self.width]
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x)
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get_mut(y * self.width + x)
    }

    /// Fails with [`Error::ShapeMismatch`] unless `other` has the same shape.
    pub fn ensure_same_shape<U>(&self, other: &Image<U>, what: &'static str) -> Result<(), Error> {
        if self.shape() != other.shape() {
            return Err(Error::ShapeMismatch {
                what,
                expected: self.shape(),
                actual: other.shape(),
            });
        }
        Ok(())
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Image<U> {
        Image {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(f).collect(),
        }
    }

    /// Pixel-wise combination of two images of equal shape.
    pub fn zip_map<U, V>(&self, other: &Image<U>, mut f: impl FnMut(&T, &U) -> V) -> Image<V> {
        assert_eq!(self.shape(), other.shape(), "zip_map shape mismatch");
        Image {
            width: self.width,
            height: self.height,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| f(a, b))
                .collect(),
        }
    }
}

impl<T: Clone> Image<T> {
    pub fn new_fill(width: usize, height: usize, value: T) -> Self {
        let len = width.checked_mul(height).expect("image size overflow");
        Self {
            width,
            height,
            data: vec![value; len],
        }
    }

    /// Copies the 1D line at `index` along `axis` into `out`.
    ///
    /// For [`Axis::X`] the line is row `index`; for [`Axis::Y`] it is column
    /// `index`, gathered with stride `width`.
    pub fn read_line(&self, axis: Axis, index: usize, out: &mut Vec<T>) {
        out.clear();
        match axis {
            Axis::X => out.extend_from_slice(self.row(index)),
            Axis::Y => {
                assert!(index < self.width, "column index out of bounds");
                out.extend(
                    self.data
                        .iter()
                        .skip(index)
                        .step_by(self.width)
                        .take(self.height)
                        .cloned(),
                );
            }
        }
    }

    /// Inverse of [`Image::read_line`].
    pub fn write_line(&mut self, axis: Axis, index: usize, line: &[T]) {
        match axis {
            Axis::X => self.row_mut(index).clone_from_slice(line),
            Axis::Y => {
                assert!(index < self.width, "column index out of bounds");
                assert_eq!(line.len(), self.height, "column length mismatch");
                for (y, v) in line.iter().enumerate() {
                    self.data[y * self.width + index] = v.clone();
                }
            }
        }
    }
}

impl Image<bool> {
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    pub fn any(&self) -> bool {
        self.data.iter().any(|&v| v)
    }
}

impl Image<f32> {
    /// Returns `(min, max)` over all pixels, or `None` for an empty image.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        if self.data.is_empty() {
            return None;
        }

        let mut min_v = f32::INFINITY;
        let mut max_v = f32::NEG_INFINITY;
        for &v in &self.data {
            min_v = min_v.min(v);
            max_v = max_v.max(v);
        }
        Some((min_v, max_v))
    }
}
