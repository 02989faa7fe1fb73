use log::{debug, info};
use st_core::{Error, Image, NoopObserver, PipelineObserver};

use crate::aggregate::{
    self, CollapsedRidges, RidgeRecord, horizontal_region, prune_horizontal, prune_vertical,
    suppress_overlaps,
};
use crate::config::RidgeConfig;
use crate::exclusion::{build_exclusion, convex_mask, slope_mask};
use crate::maxima::find_maxima;
use crate::orientation::Orientation;
use crate::scale_space::build_scale_space;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Boolean ridge maps.
    #[default]
    Maps,
    /// Per-pixel ridge records.
    Records,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RidgeOutput {
    Maps {
        horizontal: Image<bool>,
        vertical: Image<bool>,
    },
    Records {
        horizontal: Vec<RidgeRecord>,
        vertical: Vec<RidgeRecord>,
    },
}

/// Horizontal and vertical ridge detection over one image.
#[derive(Debug, Clone)]
pub struct RidgeDetector {
    cfg: RidgeConfig,
    sigmas: Vec<f32>,
}

impl RidgeDetector {
    pub fn new(cfg: RidgeConfig) -> Result<Self, Error> {
        let sigmas = cfg.sigma_list()?;
        Ok(Self { cfg, sigmas })
    }

    pub fn config(&self) -> &RidgeConfig {
        &self.cfg
    }

    pub fn sigmas(&self) -> &[f32] {
        &self.sigmas
    }

    /// `dark` marks pixels that may never be ridges; it must match `img`.
    pub fn detect(&self, img: &Image<f32>, dark: &Image<bool>, mode: OutputMode) -> Result<RidgeOutput, Error> {
        self.detect_with_observer(img, dark, mode, &NoopObserver)
    }

    pub fn detect_with_observer(
        &self,
        img: &Image<f32>,
        dark: &Image<bool>,
        mode: OutputMode,
        observer: &dyn PipelineObserver,
    ) -> Result<RidgeOutput, Error> {
        img.ensure_same_shape(dark, "dark mask")?;
        let (w, h) = img.shape();

        let (horiz, vert) = if img.is_empty() {
            let empty = CollapsedRidges {
                ridges: Image::new_fill(w, h, false),
                strength: Image::new_fill(w, h, 0.0),
                scale_index: Image::new_fill(w, h, 0),
            };
            (empty.clone(), empty)
        } else {
            let (horiz, vert) = rayon::join(
                || self.run_orientation(img, dark, Orientation::Horizontal, observer),
                || self.run_orientation(img, dark, Orientation::Vertical, observer),
            );
            (horiz?, vert?)
        };

        let ridges_h = prune_horizontal(&horiz, self.cfg.high_threshold);
        let ridges_v = prune_vertical(&vert, self.cfg.high_threshold, self.cfg.min_ridge_length);

        let records_h = aggregate::records(&horiz, &ridges_h, |i| self.cfg.sigma_for_index(i));
        let region = horizontal_region(&records_h, w, h);
        observer.on_image("ridges/horizontal_region", &region);
        let ridges_v = suppress_overlaps(&ridges_v, &region);

        observer.on_mask("ridges/horizontal_ridges", &ridges_h);
        observer.on_mask("ridges/vertical_ridges", &ridges_v);
        info!(
            "ridges: {}x{} image, {} horizontal and {} vertical ridge pixels",
            w,
            h,
            ridges_h.count(),
            ridges_v.count()
        );

        Ok(match mode {
            OutputMode::Maps => RidgeOutput::Maps {
                horizontal: ridges_h,
                vertical: ridges_v,
            },
            OutputMode::Records => RidgeOutput::Records {
                horizontal: records_h,
                vertical: aggregate::records(&vert, &ridges_v, |i| self.cfg.sigma_for_index(i)),
            },
        })
    }

    /// Scale space, exclusion, maxima and collapse for one orientation,
    /// before pruning.
    pub fn run_orientation(
        &self,
        img: &Image<f32>,
        dark: &Image<bool>,
        orientation: Orientation,
        observer: &dyn PipelineObserver,
    ) -> Result<CollapsedRidges, Error> {
        img.ensure_same_shape(dark, "dark mask")?;
        let name = orientation.name();
        let stage = |what: &str| format!("ridges/{name}/{what}");

        let cube = build_scale_space(img, &self.sigmas, orientation.dog_axis())?;
        for (i, layer) in cube.layers().iter().enumerate() {
            observer.on_image(&stage(&format!("scale_space_{i:02}")), layer);
        }

        let convex = convex_mask(img, self.cfg.convex_sigma, self.cfg.convex_threshold);
        observer.on_mask(&stage("convex"), &convex);
        let slopes = slope_mask(img, orientation.gradient_axis());
        observer.on_mask(&stage("slopes"), &slopes);

        let base = dark
            .zip_map(&convex, |&d, &c| d || c)
            .zip_map(&slopes, |&dc, &s| dc || s);
        let exclusion = build_exclusion(&cube, &base, self.cfg.convex_threshold)?;
        for (i, layer) in exclusion.layers().iter().enumerate() {
            observer.on_mask(&stage(&format!("exclusion_{i:02}")), layer);
        }

        let maxima = find_maxima(&cube, orientation.dog_axis(), &exclusion, self.cfg.low_threshold)?;
        let collapsed = aggregate::collapse(&cube, &maxima);
        observer.on_mask(&stage("maxima"), &collapsed.ridges);
        observer.on_image(&stage("strength"), &collapsed.strength);

        debug!(
            "ridges/{name}: {} scales, {} convex, {} slope, {} excluded at top scale, {} maxima pixels",
            cube.num_scales(),
            convex.count(),
            slopes.count(),
            exclusion.layers().last().map_or(0, |l| l.count()),
            collapsed.ridges.count()
        );

        Ok(collapsed)
    }
}
