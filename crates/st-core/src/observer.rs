use crate::{Image, LineSegment};

/// Checkpoint hooks invoked by the detection pipelines.
///
/// Stage names are `/`-separated, e.g. `ridges/horizontal/exclusion_02`.
/// All hooks default to no-ops. Implementations must be `Sync` because the
/// two ridge orientations run concurrently.
pub trait PipelineObserver: Sync {
    fn on_image(&self, _stage: &str, _image: &Image<f32>) {}

    fn on_mask(&self, _stage: &str, _mask: &Image<bool>) {}

    fn on_lines(&self, _stage: &str, _background: &Image<f32>, _lines: &[LineSegment]) {}
}

/// Observer that ignores every checkpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}
