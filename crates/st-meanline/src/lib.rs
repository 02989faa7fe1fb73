//! Meanline detection.
//!
//! Meanlines are the coarse, nearly parallel reference lines of a scanned
//! recording. [`MeanlineDetector`] shrinks the region of interest by half a
//! trace spacing, binarizes what is left with a global Otsu threshold, drops
//! small blobs and searches for straight lines close to the angle of the
//! ROI's top edge.

mod coords;
mod detector;
mod geojson;
mod params;
mod roi;

pub use coords::{EndpointSummary, endpoint_summaries, summaries_to_geojson};
pub use detector::{MeanlineDetector, MeanlineStats};
pub use geojson::{Feature, FeatureCollection, Geometry, meanlines_to_geojson};
pub use params::TraceParams;
pub use roi::{BoundingBox, RoiCorners};
