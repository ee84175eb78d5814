//! Asset loading and artwork preparation
//!
//! Loads the two static images of the installation and prepares the artwork
//! for display and sampling.
//!
//! ## Design
//!
//! The artwork is resized once to its on-screen size. Pointer sampling and the
//! table builder both read from a second, blurred copy: the displayed image is
//! shrunk by the blur factor and smoothly scaled back up, which averages away
//! brush texture so neighbouring pointer positions report stable colours.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{ImageReader, RgbImage};
use log::debug;

use crate::config::KioskConfig;
use crate::error::{KioskError, Result};
use crate::layout::Layout;

/// Load an image from disk as 8-bit RGB
///
/// # Errors
///
/// Returns `KioskError::ImageLoadError` if the file cannot be opened or
/// decoded.
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    let reader = ImageReader::open(path).map_err(|e| {
        KioskError::image_load(format!("Failed to open image file: {}", path.display()), e)
    })?;

    let reader = reader.with_guessed_format().map_err(|e| {
        KioskError::image_load(format!("Failed to read image header: {}", path.display()), e)
    })?;

    let img = reader.decode().map_err(|e| {
        KioskError::image_load(format!("Failed to decode image: {}", path.display()), e)
    })?;

    debug!("Loaded {} ({}x{})", path.display(), img.width(), img.height());
    Ok(img.to_rgb8())
}

/// Smoothly downscale by `factor` and scale back up
///
/// `factor == 0` returns an unmodified copy.
pub fn blur_by_downscale(image: &RgbImage, factor: u32) -> RgbImage {
    if factor == 0 {
        return image.clone();
    }
    let (width, height) = image.dimensions();
    let small_w = (width / factor).max(2);
    let small_h = (height / factor).max(2);
    let small = imageops::resize(image, small_w, small_h, FilterType::Triangle);
    imageops::resize(&small, width, height, FilterType::Triangle)
}

/// Artwork at display size plus its blurred sample surface
#[derive(Debug, Clone)]
pub struct Artwork {
    /// What the visitor sees
    pub display: RgbImage,
    /// What pointer sampling and the table builder read
    pub sample: RgbImage,
}

impl Artwork {
    /// Resize `raw` to the layout's artwork size and build the sample surface
    pub fn prepare(raw: &RgbImage, layout: &Layout, blur_downscale: u32) -> Self {
        let (width, height) = layout.artwork_size();
        let display = imageops::resize(raw, width, height, FilterType::Triangle);
        let sample = blur_by_downscale(&display, blur_downscale);
        Self { display, sample }
    }

    /// Colour of the sample surface at artwork-local coordinates
    ///
    /// Coordinates are snapped down to a `step` grid (when `step > 1`) and
    /// clamped into the image.
    pub fn sample_at(&self, x: i32, y: i32, step: u32) -> [u8; 3] {
        let (width, height) = self.sample.dimensions();
        let (mut x, mut y) = (x, y);
        if step > 1 {
            let step = step as i32;
            x = x.div_euclid(step) * step;
            y = y.div_euclid(step) * step;
        }
        let x = x.clamp(0, width as i32 - 1) as u32;
        let y = y.clamp(0, height as i32 - 1) as u32;
        self.sample.get_pixel(x, y).0
    }
}

/// Everything loaded from disk at startup
#[derive(Debug, Clone)]
pub struct Assets {
    /// Background stretched to the screen size
    pub background: RgbImage,
    pub artwork: Artwork,
    pub layout: Layout,
}

impl Assets {
    /// Load both images and lay them out for the configured screen
    ///
    /// # Errors
    ///
    /// Either image failing to load is fatal for the kiosk.
    pub fn load(config: &KioskConfig) -> Result<Self> {
        let (screen_w, screen_h) = (config.display.screen_width, config.display.screen_height);

        let background = load_rgb(&config.assets.background_path)?;
        let background = imageops::resize(&background, screen_w, screen_h, FilterType::Triangle);

        let raw = load_rgb(&config.assets.artwork_path)?;
        let layout = Layout::compute(screen_w, screen_h, raw.width(), raw.height());
        let artwork = Artwork::prepare(&raw, &layout, config.sampling.blur_downscale);

        debug!(
            "Artwork placed at {:?} (ui scale {:.2})",
            layout.artwork,
            layout.scale.factor()
        );

        Ok(Self {
            background,
            artwork,
            layout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_missing_file_is_image_load_error() {
        let err = load_rgb(Path::new("nonexistent_file.jpg")).unwrap_err();
        assert!(matches!(err, KioskError::ImageLoadError { .. }));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_blur_keeps_size_and_flat_color() {
        let img = RgbImage::from_pixel(48, 36, Rgb([90, 120, 30]));
        let blurred = blur_by_downscale(&img, 12);
        assert_eq!(blurred.dimensions(), (48, 36));
        assert_eq!(blurred.get_pixel(20, 20).0, [90, 120, 30]);
    }

    #[test]
    fn test_blur_disabled() {
        let mut img = RgbImage::from_pixel(4, 4, Rgb([0, 0, 0]));
        img.put_pixel(1, 1, Rgb([255, 255, 255]));
        assert_eq!(blur_by_downscale(&img, 0), img);
    }

    #[test]
    fn test_sample_at_snaps_and_clamps() {
        let mut sample = RgbImage::from_pixel(10, 10, Rgb([0, 0, 0]));
        sample.put_pixel(4, 8, Rgb([1, 2, 3]));
        sample.put_pixel(9, 9, Rgb([7, 7, 7]));
        let artwork = Artwork {
            display: sample.clone(),
            sample,
        };

        assert_eq!(artwork.sample_at(7, 11, 4), [1, 2, 3]); // (4, 8)
        assert_eq!(artwork.sample_at(5, 8, 1), [0, 0, 0]);
        assert_eq!(artwork.sample_at(50, 50, 1), [7, 7, 7]);
        assert_eq!(artwork.sample_at(-3, -3, 4), [0, 0, 0]);
    }

    #[test]
    fn test_prepare_matches_layout_size() {
        let raw = RgbImage::from_pixel(160, 100, Rgb([200, 10, 10]));
        let layout = Layout::compute(1440, 900, 160, 100);
        let artwork = Artwork::prepare(&raw, &layout, 12);
        assert_eq!(artwork.display.dimensions(), layout.artwork_size());
        assert_eq!(artwork.sample.dimensions(), layout.artwork_size());
    }
}
