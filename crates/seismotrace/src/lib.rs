//! Umbrella crate for the `seismotrace` workspace.
//!
//! Re-exports the image primitives, the filtering and segmentation helpers
//! and both detection pipelines.

pub use st_core::*;
pub use st_filter::*;
pub use st_hough::*;
pub use st_meanline::*;
pub use st_morph::*;
pub use st_ridge::*;
