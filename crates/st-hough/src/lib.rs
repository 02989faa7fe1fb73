//! Angle-constrained straight line search.
//!
//! Lines use the normal form `x*cos(theta) + y*sin(theta) = rho`, with `x`
//! the column and `y` the row. `theta` is the angle of the line normal, so a
//! horizontal line drawn left to right has `theta = 90 deg` and `rho` equal
//! to its row.
//!
//! [`HoughLineSearch`] only votes over the requested angle band, which keeps
//! the accumulator small when the caller already knows the dominant
//! direction (for example from a region-of-interest edge).

mod accumulator;
mod geometry;
mod search;

pub use accumulator::HoughAccumulator;
pub use geometry::{clip_line_to_image, points_to_rho_theta};
pub use search::{HoughLineSearch, HoughPeak};
