//! Multi-scale ridge detection.
//!
//! Pipeline per orientation:
//! - blur along the detection axis at a geometric list of scales and stack
//!   the differences of successive blurs ([`build_scale_space`]);
//! - accumulate pixels that may never be maxima, layer by layer
//!   ([`build_exclusion`]);
//! - keep local maxima along the detection axis and scale
//!   ([`find_maxima`]);
//! - collapse over scale and prune ([`aggregate`]).
//!
//! [`RidgeDetector`] runs the horizontal and vertical orientations
//! concurrently and gives horizontal ridges priority where they overlap.

pub mod aggregate;
mod config;
mod detector;
mod exclusion;
mod maxima;
mod orientation;
mod scale_space;

pub use aggregate::{CollapsedRidges, RidgeRecord};
pub use config::RidgeConfig;
pub use detector::{OutputMode, RidgeDetector, RidgeOutput};
pub use exclusion::{build_exclusion, convex_mask, slope_mask};
pub use maxima::find_maxima;
pub use orientation::Orientation;
pub use scale_space::build_scale_space;
