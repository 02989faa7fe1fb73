//! Linear filters used by the ridge detector.
//!
//! All 2D filters are separable and built from 1D passes along an
//! [`st_core::Axis`]. Gaussian kernels follow the common scientific-stack
//! conventions so responses are comparable with reference tooling:
//! - `radius = floor(4 * sigma + 0.5)`;
//! - the Gaussian is normalized to unit sum before derivatives are formed;
//! - borders use half-sample symmetric reflection.

pub mod conv1d;
pub mod kernels1d;
pub mod separable;

pub use kernels1d::GaussianKernel1D;
pub use separable::{filter_along, gaussian_filter1d, gaussian_laplace, sobel};
