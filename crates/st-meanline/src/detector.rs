use log::{debug, info, warn};
use serde::Serialize;
use st_core::{Error, LineSegment, MaskedImage, NoopObserver, PipelineObserver};
use st_hough::HoughLineSearch;
use st_morph::{Connectivity, otsu_threshold, remove_small_objects};

use crate::params::TraceParams;
use crate::roi::RoiCorners;

/// Per-run summary returned next to the detected lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeanlineStats {
    pub num_meanlines: usize,
    pub roi_area: f64,
    /// Normal angle of the ROI top edge, radians.
    pub roi_angle_top: f32,
    /// Normal angle of the ROI bottom edge, radians.
    pub roi_angle_bottom: f32,
    /// Normal angle (degrees) of the first accepted Hough peak, which has
    /// the most votes. `None` when no line is found.
    pub theta_mode: Option<f32>,
}

#[derive(Debug, Clone, Default)]
pub struct MeanlineDetector {
    params: TraceParams,
}

impl MeanlineDetector {
    pub fn new(params: TraceParams) -> Result<Self, Error> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &TraceParams {
        &self.params
    }

    pub fn detect(&self, img: &MaskedImage, corners: &RoiCorners) -> Result<Vec<LineSegment>, Error> {
        self.detect_with_observer(img, corners, &NoopObserver)
            .map(|(lines, _)| lines)
    }

    pub fn detect_with_stats(
        &self,
        img: &MaskedImage,
        corners: &RoiCorners,
    ) -> Result<(Vec<LineSegment>, MeanlineStats), Error> {
        self.detect_with_observer(img, corners, &NoopObserver)
    }

    /// Invalidates everything outside the ROI shrunk by half a trace
    /// spacing.
    pub fn bound(&self, img: &MaskedImage, corners: &RoiCorners) -> Result<MaskedImage, Error> {
        corners.validate()?;
        let bbox = corners.shrink(self.params.padding())?;
        let (x0, x1, y0, y1) = bbox.clamped(img.width(), img.height());
        debug!("meanlines: bounded to rows {y0}..{y1}, cols {x0}..{x1}");
        Ok(img.restrict_to_box(x0, x1, y0, y1))
    }

    pub fn detect_with_observer(
        &self,
        img: &MaskedImage,
        corners: &RoiCorners,
        observer: &dyn PipelineObserver,
    ) -> Result<(Vec<LineSegment>, MeanlineStats), Error> {
        let bounded = self.bound(img, corners)?;
        observer.on_image("meanlines/bounded_image", &bounded.filled(0.0));

        let mut stats = MeanlineStats {
            num_meanlines: 0,
            roi_area: corners.area(),
            roi_angle_top: corners.top_angle(),
            roi_angle_bottom: corners.bottom_angle(),
            theta_mode: None,
        };

        let Some(threshold) = otsu_threshold(bounded.valid_values()) else {
            warn!("meanlines: bounded region is empty or constant, no lines");
            return Ok((Vec::new(), stats));
        };
        let binary = bounded
            .values()
            .zip_map(bounded.valid(), |&v, &ok| ok && v > threshold);
        observer.on_mask("meanlines/thresholded_image", &binary);

        let filtered = remove_small_objects(&binary, self.params.small_object_size(), Connectivity::C4);
        observer.on_mask("meanlines/filtered_image", &filtered);

        let top_deg = stats.roi_angle_top.to_degrees();
        let search = HoughLineSearch {
            min_angle_deg: top_deg - TraceParams::ANGLE_PADDING_DEG,
            max_angle_deg: top_deg + TraceParams::ANGLE_PADDING_DEG,
            min_separation_distance: self.params.min_separation_distance() as f32,
            min_separation_angle_deg: TraceParams::MIN_SEPARATION_ANGLE_DEG,
            ..HoughLineSearch::default()
        };
        let peaks = search.search(&filtered);
        let lines: Vec<LineSegment> = peaks.iter().map(|p| p.segment).collect();
        observer.on_lines("meanlines/meanlines", img.values(), &lines);

        stats.num_meanlines = lines.len();
        stats.theta_mode = peaks.first().map(|p| p.theta_deg);
        info!(
            "meanlines: threshold {:.4}, {} of {} pixels kept, found {} meanlines",
            threshold,
            filtered.count(),
            binary.count(),
            lines.len()
        );

        Ok((lines, stats))
    }
}

#[cfg(test)]
mod tests {
    use st_core::{Error, Image, MaskedImage, Point2f};

    use super::MeanlineDetector;
    use crate::{RoiCorners, TraceParams};

    fn banded(width: usize, height: usize, rows: &[usize]) -> MaskedImage {
        let values = Image::from_fn(width, height, |_, y| {
            if rows.iter().any(|&r| y.abs_diff(r) <= 1) { 1.0 } else { 0.1 }
        });
        MaskedImage::fully_valid(values)
    }

    #[test]
    fn full_scale_bound_insets_rectangle_by_75_pixels() {
        let img = MaskedImage::fully_valid(Image::new_fill(400, 300, 1.0));
        let roi = RoiCorners::rect(10.0, 20.0, 390.0, 280.0);
        let bounded = MeanlineDetector::default().bound(&img, &roi).expect("bound");

        let rows: Vec<usize> = (0..300).filter(|&y| bounded.is_valid(200, y)).collect();
        let cols: Vec<usize> = (0..400).filter(|&x| bounded.is_valid(x, 150)).collect();
        assert_eq!((rows[0], rows[rows.len() - 1] + 1), (95, 205));
        assert_eq!((cols[0], cols[cols.len() - 1] + 1), (85, 315));
        assert_eq!(bounded.valid().count(), 110 * 230);
    }

    #[test]
    fn finds_separated_horizontal_meanlines() {
        let img = banded(600, 500, &[150, 300]);
        let roi = RoiCorners::rect(0.0, 0.0, 599.0, 499.0);
        let (lines, stats) = MeanlineDetector::default()
            .detect_with_stats(&img, &roi)
            .expect("detect");

        assert_eq!(lines.len(), 2);
        let mut ys: Vec<f32> = lines.iter().map(|l| l.mid_y()).collect();
        ys.sort_by(|a, b| a.partial_cmp(b).expect("finite"));
        assert!((ys[0] - 150.0).abs() < 2.0);
        assert!((ys[1] - 300.0).abs() < 2.0);
        for line in &lines {
            assert!(line.start.x < line.end.x);
        }

        assert_eq!(stats.num_meanlines, 2);
        assert_eq!(stats.roi_area, 599.0 * 499.0);
        let mode = stats.theta_mode.expect("lines found");
        assert!((mode - 90.0).abs() <= 2.0);
    }

    #[test]
    fn tilted_roi_steers_angle_band() {
        let slope = 1.5f32.to_radians().tan();
        let offsets = [200.0f32, 380.0];
        let values = Image::from_fn(600, 500, |x, y| {
            let on_line = offsets
                .iter()
                .any(|&r| (y as f32 - (r + slope * x as f32)).abs() <= 1.5);
            if on_line { 1.0 } else { 0.1 }
        });
        let img = MaskedImage::fully_valid(values);
        let roi = RoiCorners::new(
            Point2f::new(0.0, 0.0),
            Point2f::new(599.0, 599.0 * slope),
            Point2f::new(0.0, 480.0),
            Point2f::new(599.0, 480.0 + 599.0 * slope),
        );
        assert!((roi.top_angle().to_degrees() - 91.5).abs() < 1e-3);

        let (mut lines, stats) = MeanlineDetector::default()
            .detect_with_stats(&img, &roi)
            .expect("detect");
        assert_eq!(lines.len(), 2);

        lines.sort_by(|a, b| a.mid_y().partial_cmp(&b.mid_y()).expect("finite"));
        for (line, r) in lines.iter().zip(offsets) {
            let dx = line.end.x - line.start.x;
            assert!(dx > 0.0);
            assert!(((line.end.y - line.start.y) / dx - slope).abs() < 0.004);
            for p in [line.start, line.end] {
                assert!((p.y - (r + slope * p.x)).abs() < 2.5, "{p:?} off line at {r}");
            }
        }

        let mode = stats.theta_mode.expect("lines found");
        assert!((mode - 91.5).abs() < 0.15, "theta_mode = {mode}");
    }

    #[test]
    fn blobs_smaller_than_object_size_are_ignored() {
        let values = Image::from_fn(400, 400, |x, y| {
            if (200..210).contains(&x) && (200..210).contains(&y) { 1.0 } else { 0.1 }
        });
        let img = MaskedImage::fully_valid(values);
        let roi = RoiCorners::rect(0.0, 0.0, 399.0, 399.0);
        assert!(MeanlineDetector::default().detect(&img, &roi).expect("detect").is_empty());
    }

    #[test]
    fn constant_region_yields_no_lines() {
        let img = MaskedImage::fully_valid(Image::new_fill(300, 300, 0.5));
        let roi = RoiCorners::rect(0.0, 0.0, 299.0, 299.0);
        let (lines, stats) = MeanlineDetector::default()
            .detect_with_stats(&img, &roi)
            .expect("detect");
        assert!(lines.is_empty());
        assert_eq!(stats.num_meanlines, 0);
        assert!(stats.theta_mode.is_none());
    }

    #[test]
    fn roi_smaller_than_padding_is_rejected() {
        let img = banded(300, 300, &[100]);
        let roi = RoiCorners::rect(50.0, 50.0, 150.0, 150.0);
        let err = MeanlineDetector::default().detect(&img, &roi).expect_err("too small");
        assert!(matches!(err, Error::InvalidRoi(_)));
    }

    #[test]
    fn smaller_scale_keeps_closer_lines_apart() {
        let img = banded(300, 250, &[80, 130]);
        let roi = RoiCorners::rect(0.0, 0.0, 299.0, 249.0);

        let quarter = MeanlineDetector::new(TraceParams::new(0.25).expect("scale")).expect("params");
        assert_eq!(quarter.detect(&img, &roi).expect("detect").len(), 2);
    }
}
