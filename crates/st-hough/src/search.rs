use log::debug;
use st_core::{Image, LineSegment};

use crate::accumulator::HoughAccumulator;
use crate::geometry::clip_line_to_image;

/// Accepted line: normal-form parameters, support and the image-clipped
/// segment.
#[derive(Debug, Clone, PartialEq)]
pub struct HoughPeak {
    pub rho: f32,
    pub theta_deg: f32,
    pub votes: u32,
    pub segment: LineSegment,
}

/// Line search restricted to normal angles in
/// `[min_angle_deg, max_angle_deg]`.
///
/// Peak selection:
/// - cells need at least `peak_threshold_frac * max_votes` votes (and at
///   least one vote);
/// - candidates are visited by descending votes, ties broken by lower angle
///   index then lower rho index;
/// - a candidate is rejected when an accepted peak is closer than
///   `min_separation_distance` in rho *and* closer than
///   `min_separation_angle_deg` in angle.
#[derive(Debug, Clone, PartialEq)]
pub struct HoughLineSearch {
    pub min_angle_deg: f32,
    pub max_angle_deg: f32,
    pub angle_step_deg: f32,
    pub min_separation_distance: f32,
    pub min_separation_angle_deg: f32,
    pub peak_threshold_frac: f32,
    pub max_lines: Option<usize>,
}

impl Default for HoughLineSearch {
    fn default() -> Self {
        Self {
            min_angle_deg: -90.0,
            max_angle_deg: 90.0,
            angle_step_deg: 0.1,
            min_separation_distance: 9.0,
            min_separation_angle_deg: 10.0,
            peak_threshold_frac: 0.5,
            max_lines: None,
        }
    }
}

impl HoughLineSearch {
    /// Sampled normal angles (radians), inclusive of both band ends.
    pub fn thetas(&self) -> Vec<f32> {
        let (lo, hi) = if self.min_angle_deg <= self.max_angle_deg {
            (self.min_angle_deg, self.max_angle_deg)
        } else {
            (self.max_angle_deg, self.min_angle_deg)
        };
        let step = if self.angle_step_deg > 0.0 {
            self.angle_step_deg
        } else {
            0.1
        };

        let n = ((hi - lo) / step).round() as usize + 1;
        (0..n)
            .map(|i| (lo + i as f32 * step).min(hi).to_radians())
            .collect()
    }

    pub fn search(&self, mask: &Image<bool>) -> Vec<HoughPeak> {
        let (w, h) = mask.shape();
        if w == 0 || h == 0 || !mask.any() {
            return Vec::new();
        }

        let mut acc = HoughAccumulator::new(w, h, self.thetas());
        acc.vote_mask(mask);

        let max_votes = acc.max_votes();
        if max_votes == 0 {
            return Vec::new();
        }
        let threshold = ((self.peak_threshold_frac * max_votes as f32).ceil() as u32).max(1);

        let mut candidates = Vec::new();
        for t in 0..acc.num_thetas() {
            for r in 0..acc.rho_bins() {
                let votes = acc.votes(t, r);
                if votes >= threshold {
                    candidates.push((votes, t, r));
                }
            }
        }
        candidates.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)).then(a.2.cmp(&b.2)));

        let mut accepted: Vec<HoughPeak> = Vec::new();
        for (votes, t, r) in candidates {
            if self.max_lines.is_some_and(|m| accepted.len() >= m) {
                break;
            }

            let rho = acc.index_to_rho(r);
            let theta = acc.theta(t);
            let theta_deg = theta.to_degrees();
            let too_close = accepted.iter().any(|p| {
                (p.rho - rho).abs() < self.min_separation_distance
                    && (p.theta_deg - theta_deg).abs() < self.min_separation_angle_deg
            });
            if too_close {
                continue;
            }

            let Some(segment) = clip_line_to_image(rho, theta, w, h) else {
                continue;
            };
            accepted.push(HoughPeak {
                rho,
                theta_deg,
                votes,
                segment,
            });
        }

        debug!(
            "hough: {} thetas, max votes {}, threshold {}, accepted {} lines",
            acc.num_thetas(),
            max_votes,
            threshold,
            accepted.len()
        );

        accepted
    }
}
