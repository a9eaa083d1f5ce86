use image::{DynamicImage, RgbaImage, imageops};

use crate::card::CroppedArea;

/// Neutral fill used when the card has no background image.
const FALLBACK_FILL: [u8; 4] = [0x37, 0x41, 0x51, 0xff];

/// Source rectangle mapped onto the full output canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SourceRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Resolve which part of the source image fills the output.
///
/// An active crop maps as-is (translation plus non-uniform scale in one
/// step; its aspect is assumed pre-matched upstream). Without one, the
/// source is center-fit: exactly one axis is trimmed symmetrically so the
/// remaining rect matches the output aspect.
pub(crate) fn resolve_source_rect(
    src_width: u32,
    src_height: u32,
    out_width: u32,
    out_height: u32,
    crop: Option<&CroppedArea>,
) -> SourceRect {
    if let Some(crop) = crop {
        if crop.is_active() {
            return SourceRect {
                x: crop.x,
                y: crop.y,
                width: crop.width,
                height: crop.height,
            };
        }
    }

    let src_aspect = src_width as f32 / src_height as f32;
    let out_aspect = out_width as f32 / out_height as f32;

    if src_aspect > out_aspect {
        // Source wider than output: trim left/right, keep full height.
        let width = src_height as f32 * out_aspect;
        SourceRect {
            x: (src_width as f32 - width) / 2.0,
            y: 0.0,
            width,
            height: src_height as f32,
        }
    } else {
        // Source taller than output: trim top/bottom, keep full width.
        let height = src_width as f32 / out_aspect;
        SourceRect {
            x: 0.0,
            y: (src_height as f32 - height) / 2.0,
            width: src_width as f32,
            height,
        }
    }
}

/// Produce the output-sized background pixels: either the resolved source
/// rect stretched over the whole canvas, or the neutral fill when there is
/// no image.
pub(crate) fn compose_background(
    source: Option<&DynamicImage>,
    crop: Option<&CroppedArea>,
    out_width: u32,
    out_height: u32,
) -> RgbaImage {
    let Some(source) = source else {
        return RgbaImage::from_pixel(out_width, out_height, image::Rgba(FALLBACK_FILL));
    };

    let rect = resolve_source_rect(source.width(), source.height(), out_width, out_height, crop);
    let x = (rect.x.max(0.0) as u32).min(source.width().saturating_sub(1));
    let y = (rect.y.max(0.0) as u32).min(source.height().saturating_sub(1));
    let width = (rect.width.round() as u32).clamp(1, source.width() - x);
    let height = (rect.height.round() as u32).clamp(1, source.height() - y);

    let cropped = source.crop_imm(x, y, width, height);
    imageops::resize(
        &cropped.to_rgba8(),
        out_width,
        out_height,
        imageops::FilterType::CatmullRom,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_source_trims_left_and_right() {
        // 4000x1000 into 2560x1440: full height kept, width trimmed.
        let rect = resolve_source_rect(4000, 1000, 2560, 1440, None);
        assert_eq!(rect.y, 0.0);
        assert_eq!(rect.height, 1000.0);
        let expected_width = 1000.0 * (2560.0 / 1440.0);
        assert!((rect.width - expected_width).abs() < 0.01);
        assert!((rect.x - (4000.0 - expected_width) / 2.0).abs() < 0.01);
    }

    #[test]
    fn tall_source_trims_top_and_bottom() {
        let rect = resolve_source_rect(1000, 4000, 1080, 1440, None);
        assert_eq!(rect.x, 0.0);
        assert_eq!(rect.width, 1000.0);
        let expected_height = 1000.0 / (1080.0 / 1440.0);
        assert!((rect.height - expected_height).abs() < 0.01);
        assert!((rect.y - (4000.0 - expected_height) / 2.0).abs() < 0.01);
    }

    #[test]
    fn active_crop_passes_through_unchanged() {
        let crop = CroppedArea { x: 12.0, y: 34.0, width: 640.0, height: 360.0 };
        let rect = resolve_source_rect(1920, 1080, 2560, 1440, Some(&crop));
        assert_eq!(rect, SourceRect { x: 12.0, y: 34.0, width: 640.0, height: 360.0 });
    }

    #[test]
    fn zero_width_crop_falls_back_to_center_fit() {
        let crop = CroppedArea { x: 12.0, y: 34.0, width: 0.0, height: 360.0 };
        let with_crop = resolve_source_rect(1920, 1080, 2560, 1440, Some(&crop));
        let without = resolve_source_rect(1920, 1080, 2560, 1440, None);
        assert_eq!(with_crop, without);
    }

    #[test]
    fn missing_image_fills_with_neutral_color() {
        let background = compose_background(None, None, 64, 36);
        assert_eq!(background.dimensions(), (64, 36));
        assert_eq!(background.get_pixel(0, 0).0, FALLBACK_FILL);
        assert_eq!(background.get_pixel(63, 35).0, FALLBACK_FILL);
    }

    #[test]
    fn composed_background_matches_output_size() {
        let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            320,
            200,
            image::Rgba([10, 20, 30, 255]),
        ));
        let background = compose_background(Some(&source), None, 128, 72);
        assert_eq!(background.dimensions(), (128, 72));
        assert_eq!(background.get_pixel(64, 36).0, [10, 20, 30, 255]);
    }

    #[test]
    fn explicit_crop_stretches_without_preserving_aspect() {
        // A 10x10 crop of a bicolor image stretched onto a 40x20 canvas:
        // every output pixel comes from the crop region only.
        let mut pixels = RgbaImage::from_pixel(100, 100, image::Rgba([0, 0, 0, 255]));
        for y in 0..10 {
            for x in 0..10 {
                pixels.put_pixel(x, y, image::Rgba([200, 0, 0, 255]));
            }
        }
        let source = DynamicImage::ImageRgba8(pixels);
        let crop = CroppedArea { x: 0.0, y: 0.0, width: 10.0, height: 10.0 };
        let background = compose_background(Some(&source), Some(&crop), 40, 20);
        assert_eq!(background.dimensions(), (40, 20));
        assert_eq!(background.get_pixel(20, 10).0, [200, 0, 0, 255]);
    }
}
