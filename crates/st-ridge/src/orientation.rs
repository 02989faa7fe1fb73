use st_core::Axis;

/// Direction of the ridges being searched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Axis the difference-of-Gaussians blur runs along.
    ///
    /// Horizontal ridges have their curvature across rows, so they are
    /// blurred along `Y`.
    pub fn dog_axis(self) -> Axis {
        match self {
            Self::Horizontal => Axis::Y,
            Self::Vertical => Axis::X,
        }
    }

    /// Axis whose Sobel gradient marks steep slopes.
    pub fn gradient_axis(self) -> Axis {
        self.dog_axis().perpendicular()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}
