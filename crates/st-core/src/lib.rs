//! Foundational primitives for seismogram trace extraction.
//!
//! ## Images and Axes
//! Images are dense row-major buffers. Pixel `(x, y)` is column `x`, row `y`.
//! [`Axis::Y`] runs along the row index (down the image) and [`Axis::X`]
//! along the column index. A 1D filter "along `Axis::Y`" therefore mixes
//! pixels of one column.
//!
//! ## Cubes
//! A [`Cube`] is a stack of equally sized images indexed by scale. Pipelines
//! build new cubes per stage rather than mutating a shared one.
//!
//! ## Validity
//! [`MaskedImage`] pairs values with an explicit validity image. Aggregates
//! over a masked image only ever see valid pixels.
//!
//! ## Border Modes
//! Filters support constant fill and half-sample reflect (edge pixel is
//! repeated). Gaussian and Sobel filtering use reflect.

mod axis;
mod border;
mod cube;
mod error;
mod geom;
mod image;
mod masked;
mod observer;

pub use axis::Axis;
pub use border::{BorderMode, map_index};
pub use cube::Cube;
pub use error::Error;
pub use geom::{LineSegment, Point2f, Vec2f};
pub use image::Image;
pub use masked::MaskedImage;
pub use observer::{NoopObserver, PipelineObserver};
