//! Crop-to-fill geometry and the PNG codec around it.
//!
//! The source is scaled uniformly until one axis matches the target exactly
//! and the other meets or exceeds it, then the excess is cropped equally
//! from both sides. Odd excess leaves the extra pixel on the right/bottom.
//! The crop window is mapped back onto the source before resampling, so a
//! sliver-shaped source never allocates its full scaled size.

use std::path::Path;

use common::config::{FULLSCREEN_HEIGHT, FULLSCREEN_WIDTH};
use image::{
    ImageError, ImageReader, RgbImage,
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    error::{LimitError, LimitErrorKind},
    imageops::{self, FilterType},
};

use crate::errors::ThumbError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSize {
    pub width: u32,
    pub height: u32,
}

impl Default for RenderSize {
    fn default() -> Self {
        Self::FULLSCREEN
    }
}

impl RenderSize {
    pub const FULLSCREEN: Self = Self {
        width: FULLSCREEN_WIDTH,
        height: FULLSCREEN_HEIGHT,
    };

    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    fn ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

/// Uniformly scaled size of a `width`×`height` source that covers `target`
pub fn fill_dimensions(width: u32, height: u32, target: RenderSize) -> (u32, u32) {
    let img_ratio = width as f64 / height as f64;

    if img_ratio > target.ratio() {
        let new_width = (target.height as f64 * img_ratio).round() as u32;

        (new_width.max(target.width), target.height)
    } else {
        let new_height = (target.width as f64 / img_ratio).round() as u32;

        (target.width, new_height.max(target.height))
    }
}

/// Top-left corner of the centered `target` window inside a scaled image
pub fn crop_origin(scaled_width: u32, scaled_height: u32, target: RenderSize) -> (u32, u32) {
    let left = (scaled_width - target.width) / 2;
    let top = (scaled_height - target.height) / 2;

    (left, top)
}

/// The `(x, y, width, height)` region of the source that survives the crop,
/// so only that region is ever resampled
pub fn source_window(width: u32, height: u32, target: RenderSize) -> (u32, u32, u32, u32) {
    let (new_width, new_height) = fill_dimensions(width, height, target);
    let (left, top) = crop_origin(new_width, new_height, target);

    let scale_x = width as f64 / new_width as f64;
    let scale_y = height as f64 / new_height as f64;

    let x = ((left as f64 * scale_x).floor() as u32).min(width - 1);
    let y = ((top as f64 * scale_y).floor() as u32).min(height - 1);
    let window_width = ((target.width as f64 * scale_x).round() as u32).clamp(1, width - x);
    let window_height = ((target.height as f64 * scale_y).round() as u32).clamp(1, height - y);

    (x, y, window_width, window_height)
}

/// Memory stays bounded by the source plus the target, whatever the aspect
pub fn crop_to_fill(image: &RgbImage, target: RenderSize) -> RgbImage {
    let (x, y, width, height) = source_window(image.width(), image.height(), target);
    let window = imageops::crop_imm(image, x, y, width, height).to_image();

    if window.dimensions() == (target.width, target.height) {
        return window;
    }

    imageops::resize(&window, target.width, target.height, FilterType::Lanczos3)
}

/// Decodes by content rather than extension and drops any alpha channel
pub fn decode_rgb(path: &Path) -> Result<RgbImage, ImageError> {
    let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;

    if image.width() == 0 || image.height() == 0 {
        return Err(ImageError::Limits(LimitError::from_kind(
            LimitErrorKind::DimensionError,
        )));
    }

    Ok(image.to_rgb8())
}

pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>, ImageError> {
    let mut buffer = Vec::new();

    // default zlib level, no extra optimisation passes
    let encoder = PngEncoder::new_with_quality(
        &mut buffer,
        CompressionType::Default,
        PngFilterType::Adaptive,
    );
    image.write_with_encoder(encoder)?;

    Ok(buffer)
}

/// Blocking: decode `source`, crop-to-fill, and encode as PNG
pub(crate) fn render_png(source: &Path, target: RenderSize) -> Result<Vec<u8>, ThumbError> {
    let image = decode_rgb(source).map_err(|err| ThumbError::DecodeFailed {
        path: source.to_path_buf(),
        source: err,
    })?;

    let rendered = crop_to_fill(&image, target);

    encode_png(&rendered).map_err(ThumbError::EncodeFailed)
}

#[cfg(test)]
mod tests {
    use image::Rgb;

    use super::*;

    const RED: Rgb<u8> = Rgb([255, 0, 0]);
    const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
    const BLUE: Rgb<u8> = Rgb([0, 0, 255]);

    #[test]
    fn fullscreen_source_is_unchanged_size() {
        assert_eq!(
            fill_dimensions(1920, 1080, RenderSize::FULLSCREEN),
            (1920, 1080)
        );
        assert_eq!(crop_origin(1920, 1080, RenderSize::FULLSCREEN), (0, 0));

        let image = RgbImage::from_pixel(1920, 1080, GREEN);
        let rendered = crop_to_fill(&image, RenderSize::FULLSCREEN);

        assert_eq!(rendered.dimensions(), (1920, 1080));
        assert_eq!(rendered, image);
    }

    #[test]
    fn wide_source_keeps_height_and_crops_sides() {
        assert_eq!(
            fill_dimensions(3840, 1080, RenderSize::FULLSCREEN),
            (3840, 1080)
        );
        assert_eq!(crop_origin(3840, 1080, RenderSize::FULLSCREEN), (960, 0));
    }

    #[test]
    fn wide_crop_is_symmetric() {
        // red | green | blue thirds, only the middle survives
        let image = RgbImage::from_fn(3840, 1080, |x, _| match x {
            0..960 => RED,
            960..2880 => GREEN,
            _ => BLUE,
        });

        let rendered = crop_to_fill(&image, RenderSize::FULLSCREEN);

        assert_eq!(rendered.dimensions(), (1920, 1080));
        assert!(rendered.pixels().all(|pixel| *pixel == GREEN));
    }

    #[test]
    fn tall_source_keeps_width_and_crops_top_and_bottom() {
        let (width, height) = fill_dimensions(1080, 1920, RenderSize::FULLSCREEN);

        assert_eq!((width, height), (1920, 3413));
        assert_eq!(
            crop_origin(width, height, RenderSize::FULLSCREEN),
            (0, 1166)
        );
    }

    #[test]
    fn scaling_is_uniform() {
        for (width, height) in [(480, 360), (1280, 720), (640, 480), (123, 457), (5000, 17)] {
            let (new_width, new_height) =
                fill_dimensions(width, height, RenderSize::FULLSCREEN);

            assert!(new_width >= 1920 && new_height >= 1080);
            assert!(new_width == 1920 || new_height == 1080);

            // one axis is exact, the other is rounded to the nearest pixel
            let scale = if new_width == 1920 {
                new_width as f64 / width as f64
            } else {
                new_height as f64 / height as f64
            };
            assert!((width as f64 * scale - new_width as f64).abs() <= 0.5 + f64::EPSILON);
            assert!((height as f64 * scale - new_height as f64).abs() <= 0.5 + f64::EPSILON);
        }
    }

    #[test]
    fn hq_default_upscales_to_fill() {
        // 4:3 hqdefault thumbnails are the common fallback tier
        assert_eq!(
            fill_dimensions(480, 360, RenderSize::FULLSCREEN),
            (1920, 1440)
        );
        assert_eq!(crop_origin(1920, 1440, RenderSize::FULLSCREEN), (0, 180));
    }

    #[test]
    fn window_matches_scaled_crop() {
        assert_eq!(
            source_window(3840, 1080, RenderSize::FULLSCREEN),
            (960, 0, 1920, 1080)
        );
        assert_eq!(
            source_window(1920, 1080, RenderSize::FULLSCREEN),
            (0, 0, 1920, 1080)
        );
        assert_eq!(
            source_window(480, 360, RenderSize::FULLSCREEN),
            (0, 45, 480, 270)
        );
    }

    #[test]
    fn extreme_aspect_window_stays_inside_source() {
        for (width, height) in [(4000, 1), (1, 4000), (65535, 3), (2, 65535)] {
            let (x, y, window_width, window_height) =
                source_window(width, height, RenderSize::FULLSCREEN);

            assert!(window_width >= 1 && window_height >= 1);
            assert!(x + window_width <= width && y + window_height <= height);
        }
    }

    #[test]
    fn one_pixel_high_source_renders_fullscreen() {
        let image = RgbImage::from_pixel(4000, 1, GREEN);

        let rendered = crop_to_fill(&image, RenderSize::FULLSCREEN);

        assert_eq!(rendered.dimensions(), (1920, 1080));
    }

    #[test]
    fn one_pixel_high_jpeg_renders_fullscreen() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("temp_thin.jpg");
        RgbImage::from_pixel(4000, 1, RED)
            .save_with_format(&source, image::ImageFormat::Jpeg)
            .unwrap();

        let png = render_png(&source, RenderSize::FULLSCREEN).unwrap();
        let decoded = image::load_from_memory(&png).unwrap();

        assert_eq!((decoded.width(), decoded.height()), (1920, 1080));
    }

    #[test]
    fn odd_excess_biases_left() {
        let target = RenderSize::new(10, 10);

        assert_eq!(crop_origin(13, 10, target), (1, 0));
    }

    #[test]
    fn any_aspect_renders_exact_target() {
        let target = RenderSize::new(64, 36);

        for (width, height) in [(200, 36), (36, 200), (64, 36), (7, 3), (31, 97)] {
            let image = RgbImage::from_pixel(width, height, BLUE);
            let rendered = crop_to_fill(&image, target);

            assert_eq!(rendered.dimensions(), (64, 36), "source {width}x{height}");
        }
    }

    #[test]
    fn decode_drops_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("temp_rgba.jpg");

        // PNG bytes behind a .jpg name, format is sniffed from content
        let rgba = image::RgbaImage::from_pixel(8, 4, image::Rgba([10, 20, 30, 40]));
        rgba.save_with_format(&path, image::ImageFormat::Png).unwrap();

        let decoded = decode_rgb(&path).unwrap();

        assert_eq!(decoded.dimensions(), (8, 4));
        assert_eq!(*decoded.get_pixel(0, 0), Rgb([10, 20, 30]));
    }

    #[test]
    fn garbage_is_a_decode_failure() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("temp_bad.jpg");
        std::fs::write(&source, b"definitely not an image").unwrap();

        let result = render_png(&source, RenderSize::FULLSCREEN);

        assert!(matches!(result, Err(ThumbError::DecodeFailed { .. })));
    }

    #[test]
    fn encoded_png_round_trips_dimensions() {
        let image = RgbImage::from_pixel(64, 36, RED);
        let png = encode_png(&image).unwrap();

        let decoded = image::load_from_memory(&png).unwrap();

        assert_eq!((decoded.width(), decoded.height()), (64, 36));
    }
}
