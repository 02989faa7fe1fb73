use serde::{Deserialize, Serialize};
use st_core::{Error, Point2f};
use st_hough::points_to_rho_theta;

/// Four corners of the recording area, in image coordinates.
///
/// JSON form: `{"top_left": [x, y], "top_right": [x, y], ...}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "CornerArrays", into = "CornerArrays")]
pub struct RoiCorners {
    pub top_left: Point2f,
    pub top_right: Point2f,
    pub bottom_left: Point2f,
    pub bottom_right: Point2f,
}

#[derive(Serialize, Deserialize)]
struct CornerArrays {
    top_left: [f32; 2],
    top_right: [f32; 2],
    bottom_left: [f32; 2],
    bottom_right: [f32; 2],
}

impl From<CornerArrays> for RoiCorners {
    fn from(c: CornerArrays) -> Self {
        let p = |[x, y]: [f32; 2]| Point2f::new(x, y);
        Self {
            top_left: p(c.top_left),
            top_right: p(c.top_right),
            bottom_left: p(c.bottom_left),
            bottom_right: p(c.bottom_right),
        }
    }
}

impl From<RoiCorners> for CornerArrays {
    fn from(c: RoiCorners) -> Self {
        let a = |p: Point2f| [p.x, p.y];
        Self {
            top_left: a(c.top_left),
            top_right: a(c.top_right),
            bottom_left: a(c.bottom_left),
            bottom_right: a(c.bottom_right),
        }
    }
}

/// Axis-aligned box of rows `top..bottom` and columns `left..right`.
///
/// Bounds may lie outside the image; see [`BoundingBox::clamped`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub top: i64,
    pub bottom: i64,
    pub left: i64,
    pub right: i64,
}

impl BoundingBox {
    /// `(x0, x1, y0, y1)` clamped to a `width x height` image.
    pub fn clamped(&self, width: usize, height: usize) -> (usize, usize, usize, usize) {
        let clamp = |v: i64, max: usize| v.clamp(0, max as i64) as usize;
        (
            clamp(self.left, width),
            clamp(self.right, width),
            clamp(self.top, height),
            clamp(self.bottom, height),
        )
    }
}

impl RoiCorners {
    pub fn new(top_left: Point2f, top_right: Point2f, bottom_left: Point2f, bottom_right: Point2f) -> Self {
        Self {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
        }
    }

    /// Axis-aligned rectangle `[x0, x1] x [y0, y1]`.
    pub fn rect(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self::new(
            Point2f::new(x0, y0),
            Point2f::new(x1, y0),
            Point2f::new(x0, y1),
            Point2f::new(x1, y1),
        )
    }

    pub fn from_json(text: &str) -> Result<Self, Error> {
        serde_json::from_str(text).map_err(|e| Error::InvalidRoi(format!("cannot parse corners: {e}")))
    }

    fn corners(&self) -> [(&'static str, Point2f); 4] {
        [
            ("top_left", self.top_left),
            ("top_right", self.top_right),
            ("bottom_left", self.bottom_left),
            ("bottom_right", self.bottom_right),
        ]
    }

    /// Corners must be finite, left of their right partner and above their
    /// bottom partner.
    pub fn validate(&self) -> Result<(), Error> {
        for (name, p) in self.corners() {
            if !p.x.is_finite() || !p.y.is_finite() {
                return Err(Error::InvalidRoi(format!("{name} corner is not finite")));
            }
        }

        let ordered = self.top_left.x < self.top_right.x
            && self.bottom_left.x < self.bottom_right.x
            && self.top_left.y < self.bottom_left.y
            && self.top_right.y < self.bottom_right.y;
        if !ordered {
            return Err(Error::InvalidRoi(format!(
                "corners are not ordered: {:?}",
                self.corners().map(|(_, p)| (p.x, p.y))
            )));
        }
        Ok(())
    }

    /// Largest axis-aligned box inside the quadrilateral, moved inward by
    /// `padding` on every side. Bounds are truncated toward zero.
    pub fn shrink(&self, padding: f64) -> Result<BoundingBox, Error> {
        let f = |v: f32| f64::from(v);
        let bbox = BoundingBox {
            top: (padding + f(self.top_left.y.max(self.top_right.y))) as i64,
            bottom: (f(self.bottom_left.y.min(self.bottom_right.y)) - padding) as i64,
            left: (padding + f(self.top_left.x.max(self.bottom_left.x))) as i64,
            right: (f(self.top_right.x.min(self.bottom_right.x)) - padding) as i64,
        };

        if bbox.top >= bbox.bottom || bbox.left >= bbox.right {
            return Err(Error::InvalidRoi(format!(
                "box shrunk by {padding} is empty: rows {}..{}, cols {}..{}",
                bbox.top, bbox.bottom, bbox.left, bbox.right
            )));
        }
        Ok(bbox)
    }

    /// Shoelace area of the polygon TL, TR, BR, BL.
    pub fn area(&self) -> f64 {
        let poly = [self.top_left, self.top_right, self.bottom_right, self.bottom_left];
        let twice: f64 = (0..4)
            .map(|i| {
                let (a, b) = (poly[i], poly[(i + 1) % 4]);
                f64::from(a.x) * f64::from(b.y) - f64::from(b.x) * f64::from(a.y)
            })
            .sum();
        twice.abs() / 2.0
    }

    /// Normal angle (radians) of the top edge, left to right.
    pub fn top_angle(&self) -> f32 {
        points_to_rho_theta(self.top_left, self.top_right).1
    }

    /// Normal angle (radians) of the bottom edge, right to left.
    pub fn bottom_angle(&self) -> f32 {
        points_to_rho_theta(self.bottom_right, self.bottom_left).1
    }
}
