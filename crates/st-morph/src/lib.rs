//! Binary segmentation helpers.
//!
//! - [`otsu_threshold`] picks a global threshold from a 256-bin histogram.
//! - [`label_components`] labels 4- or 8-connected foreground regions.
//! - [`remove_small_objects`] drops regions below a pixel-count floor.
//!
//! Masks are `Image<bool>`; `true` is foreground.

mod label;
mod threshold;

pub use label::{Components, Connectivity, label_components, remove_small_objects};
pub use threshold::{OTSU_BINS, binarize, otsu_threshold};
