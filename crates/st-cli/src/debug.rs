use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{GrayImage, Rgb, RgbImage};
use log::{debug, warn};
use seismotrace::{Image, LineSegment, PipelineObserver};

use crate::io::{f32_to_u8_vis, save_luma_raw, save_mask};

/// Writes every pipeline checkpoint as a PNG under `dir`.
///
/// Stage `ridges/horizontal/slopes` lands in
/// `<dir>/ridges_horizontal_slopes.png`. Failures are logged and do not stop
/// the run.
#[derive(Debug, Clone)]
pub struct PngDumpObserver {
    dir: PathBuf,
}

impl PngDumpObserver {
    pub fn new(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating debug directory {}", dir.display()))?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn path_for(&self, stage: &str) -> PathBuf {
        self.dir.join(format!("{}.png", stage.replace('/', "_")))
    }

    fn report(&self, stage: &str, path: &Path, result: Result<()>) {
        match result {
            Ok(()) => debug!("debug image {stage} -> {}", path.display()),
            Err(e) => warn!("could not write debug image {stage}: {e:#}"),
        }
    }
}

impl PipelineObserver for PngDumpObserver {
    fn on_image(&self, stage: &str, image: &Image<f32>) {
        let path = self.path_for(stage);
        let vis = f32_to_u8_vis(image.data());
        self.report(stage, &path, save_luma_raw(&path, image.width(), image.height(), vis));
    }

    fn on_mask(&self, stage: &str, mask: &Image<bool>) {
        let path = self.path_for(stage);
        self.report(stage, &path, save_mask(&path, mask));
    }

    fn on_lines(&self, stage: &str, background: &Image<f32>, lines: &[LineSegment]) {
        let path = self.path_for(stage);
        let result = render_lines(background, lines).and_then(|rgb| {
            rgb.save(&path)
                .with_context(|| format!("saving image {}", path.display()))
        });
        self.report(stage, &path, result);
    }
}

fn render_lines(background: &Image<f32>, lines: &[LineSegment]) -> Result<RgbImage> {
    let (w, h) = (background.width() as u32, background.height() as u32);
    let gray = GrayImage::from_raw(w, h, f32_to_u8_vis(background.data()))
        .context("constructing GrayImage from background")?;
    let mut rgb = image::DynamicImage::ImageLuma8(gray).to_rgb8();

    for line in lines {
        draw_line(&mut rgb, line, Rgb([255, 0, 0]));
    }
    Ok(rgb)
}

fn draw_line(img: &mut RgbImage, line: &LineSegment, color: Rgb<u8>) {
    let steps = line.length().ceil().max(1.0) as usize;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let x = (line.start.x + t * (line.end.x - line.start.x)).round();
        let y = (line.start.y + t * (line.end.y - line.start.y)).round();
        if x < 0.0 || y < 0.0 {
            continue;
        }
        let (ux, uy) = (x as u32, y as u32);
        if ux < img.width() && uy < img.height() {
            img.put_pixel(ux, uy, color);
        }
    }
}
