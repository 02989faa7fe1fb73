use crate::{Error, Image};

/// Value image paired with an explicit validity image.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskedImage {
    values: Image<f32>,
    valid: Image<bool>,
}

impl MaskedImage {
    pub fn new(values: Image<f32>, valid: Image<bool>) -> Result<Self, Error> {
        values.ensure_same_shape(&valid, "validity mask")?;
        Ok(Self { values, valid })
    }

    /// Every pixel valid.
    pub fn fully_valid(values: Image<f32>) -> Self {
        let valid = Image::new_fill(values.width(), values.height(), true);
        Self { values, valid }
    }

    pub fn values(&self) -> &Image<f32> {
        &self.values
    }

    pub fn valid(&self) -> &Image<bool> {
        &self.valid
    }

    pub fn width(&self) -> usize {
        self.values.width()
    }

    pub fn height(&self) -> usize {
        self.values.height()
    }

    pub fn is_valid(&self, x: usize, y: usize) -> bool {
        self.valid.get(x, y).copied().unwrap_or(false)
    }

    /// Values of valid pixels, in row-major order.
    pub fn valid_values(&self) -> impl Iterator<Item = f32> + '_ {
        self.values
            .data()
            .iter()
            .zip(self.valid.data())
            .filter_map(|(&v, &ok)| ok.then_some(v))
    }

    /// Invalidates everything outside rows `y0..y1` and columns `x0..x1`.
    ///
    /// Bounds are clamped to the image; an empty box invalidates everything.
    pub fn restrict_to_box(&self, x0: usize, x1: usize, y0: usize, y1: usize) -> Self {
        let valid = Image::from_fn(self.width(), self.height(), |x, y| {
            self.is_valid(x, y) && (x0..x1).contains(&x) && (y0..y1).contains(&y)
        });
        Self {
            values: self.values.clone(),
            valid,
        }
    }

    /// Values with invalid pixels replaced by `fill`.
    pub fn filled(&self, fill: f32) -> Image<f32> {
        self.values
            .zip_map(&self.valid, |&v, &ok| if ok { v } else { fill })
    }
}

#[cfg(test)]
mod tests {
    use super::MaskedImage;
    use crate::Image;

    #[test]
    fn restrict_to_box_respects_existing_mask() {
        let values = Image::from_fn(4, 3, |x, y| (x + 10 * y) as f32);
        let valid = Image::from_fn(4, 3, |x, _| x != 2);
        let masked = MaskedImage::new(values, valid).expect("same shape");

        let boxed = masked.restrict_to_box(1, 4, 1, 3);
        let collected: Vec<f32> = boxed.valid_values().collect();
        assert_eq!(collected, vec![11.0, 13.0, 21.0, 23.0]);
        assert_eq!(boxed.filled(-1.0).row(0), &[-1.0, -1.0, -1.0, -1.0]);
    }

    #[test]
    fn mismatched_mask_is_rejected() {
        let values = Image::new_fill(4, 3, 0.0f32);
        let valid = Image::new_fill(3, 3, true);
        assert!(MaskedImage::new(values, valid).is_err());
    }
}
