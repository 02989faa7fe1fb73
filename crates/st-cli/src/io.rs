use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use image::GrayImage;
use serde::Serialize;
use serde::de::DeserializeOwned;
use seismotrace::Image;

pub fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}

/// Grayscale image scaled to `[0, 1]`.
pub fn load_gray_f32(path: &Path) -> Result<Image<f32>> {
    ensure_file_exists(path, "input")?;
    let luma = image::open(path)
        .with_context(|| format!("opening input image {}", path.display()))?
        .to_luma8();
    let (w, h) = luma.dimensions();
    let data = luma.into_raw().into_iter().map(|v| f32::from(v) / 255.0).collect();

    Image::from_vec(w as usize, h as usize, data)
        .with_context(|| format!("constructing image from {}", path.display()))
}

pub fn save_luma_raw(path: &Path, width: usize, height: usize, data: Vec<u8>) -> Result<()> {
    let gray = GrayImage::from_raw(width as u32, height as u32, data)
        .context("constructing GrayImage from raw bytes")?;
    gray.save(path)
        .with_context(|| format!("saving image {}", path.display()))
}

pub fn save_mask(path: &Path, mask: &Image<bool>) -> Result<()> {
    let data = mask.data().iter().map(|&m| if m { 255 } else { 0 }).collect();
    save_luma_raw(path, mask.width(), mask.height(), data)
}

/// Min/max stretched to `0..=255`; constant images map to black.
pub fn f32_to_u8_vis(data: &[f32]) -> Vec<u8> {
    let Some((min_v, max_v)) = data.iter().fold(None, |acc: Option<(f32, f32)>, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    }) else {
        return Vec::new();
    };

    if (max_v - min_v).abs() < 1e-12 {
        return vec![0u8; data.len()];
    }

    let scale = 255.0 / (max_v - min_v);
    data.iter()
        .map(|&v| ((v - min_v) * scale).round().clamp(0.0, 255.0) as u8)
        .collect()
}

pub fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(path, bytes).with_context(|| format!("writing json {}", path.display()))
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing json {}", path.display()))
}

/// Appends `value` as one JSON line, creating the file if needed.
pub fn append_json_line(path: &Path, value: &impl Serialize) -> Result<()> {
    let line = serde_json::to_string(value).context("serializing json line")?;
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    writeln!(file, "{line}").with_context(|| format!("appending to {}", path.display()))
}

/// Writes `rows` as comma-separated lines, with an optional header line.
pub fn write_csv<R, I>(path: &Path, header: Option<&str>, rows: R) -> Result<()>
where
    R: IntoIterator<Item = I>,
    I: IntoIterator<Item = String>,
{
    let mut file =
        fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    if let Some(header) = header {
        writeln!(file, "{header}").context("writing csv header")?;
    }
    for row in rows {
        let fields: Vec<String> = row.into_iter().collect();
        writeln!(file, "{}", fields.join(",")).context("writing csv row")?;
    }
    Ok(())
}
