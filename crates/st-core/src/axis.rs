/// Image axis a 1D operation runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Along the row index, i.e. down a column.
    Y,
    /// Along the column index, i.e. across a row.
    X,
}

impl Axis {
    pub fn perpendicular(self) -> Self {
        match self {
            Self::Y => Self::X,
            Self::X => Self::Y,
        }
    }

    /// Number of samples along this axis for a `width x height` image.
    pub fn len(self, width: usize, height: usize) -> usize {
        match self {
            Self::Y => height,
            Self::X => width,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Y => "y",
            Self::X => "x",
        }
    }
}
