use std::io::Cursor;

use anyhow::{Context, Result};
use image::{DynamicImage, ImageFormat, imageops};

use crate::card::Rotation;

/// A rotated source image plus its new dimensions. Non-trivial rotations
/// re-encode as PNG so the contract stays lossless.
pub struct RotatedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Rotate an encoded image by a quarter-turn multiple. 0 degrees passes
/// the original bytes through untouched; 90 and 270 swap the reported
/// width and height.
pub fn rotate_image(bytes: &[u8], rotation: Rotation) -> Result<RotatedImage> {
    let source =
        image::load_from_memory(bytes).with_context(|| "failed to decode image for rotation")?;

    if rotation == Rotation::None {
        return Ok(RotatedImage {
            width: source.width(),
            height: source.height(),
            bytes: bytes.to_vec(),
        });
    }

    let buffer = source.to_rgba8();
    let rotated = match rotation {
        Rotation::Quarter => imageops::rotate90(&buffer),
        Rotation::Half => imageops::rotate180(&buffer),
        Rotation::ThreeQuarter => imageops::rotate270(&buffer),
        Rotation::None => unreachable!(),
    };

    let (width, height) = rotated.dimensions();
    let mut encoded = Vec::new();
    DynamicImage::ImageRgba8(rotated)
        .write_to(&mut Cursor::new(&mut encoded), ImageFormat::Png)
        .with_context(|| "failed to encode rotated image")?;

    Ok(RotatedImage {
        bytes: encoded,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn sample_png(width: u32, height: u32) -> Vec<u8> {
        let mut pixels = RgbaImage::from_pixel(width, height, image::Rgba([0, 0, 0, 255]));
        pixels.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(pixels)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("encode sample");
        bytes
    }

    #[test]
    fn zero_rotation_passes_bytes_through() {
        let png = sample_png(40, 30);
        let rotated = rotate_image(&png, Rotation::None).expect("rotate");
        assert_eq!(rotated.bytes, png);
        assert_eq!((rotated.width, rotated.height), (40, 30));
    }

    #[test]
    fn quarter_turn_swaps_dimensions() {
        let png = sample_png(40, 30);
        let rotated = rotate_image(&png, Rotation::Quarter).expect("rotate");
        assert_eq!((rotated.width, rotated.height), (30, 40));
        let decoded = image::load_from_memory(&rotated.bytes).expect("decode");
        assert_eq!((decoded.width(), decoded.height()), (30, 40));
    }

    #[test]
    fn half_turn_keeps_dimensions() {
        let png = sample_png(40, 30);
        let rotated = rotate_image(&png, Rotation::Half).expect("rotate");
        assert_eq!((rotated.width, rotated.height), (40, 30));
        let decoded = image::load_from_memory(&rotated.bytes).expect("decode");
        // The marker pixel moved to the opposite corner.
        assert_eq!(decoded.to_rgba8().get_pixel(39, 29).0, [255, 0, 0, 255]);
    }

    #[test]
    fn quarter_then_three_quarter_restores_orientation() {
        let png = sample_png(40, 30);
        let once = rotate_image(&png, Rotation::Quarter).expect("first turn");
        let back = rotate_image(&once.bytes, Rotation::ThreeQuarter).expect("second turn");
        assert_eq!((back.width, back.height), (40, 30));
        let decoded = image::load_from_memory(&back.bytes).expect("decode");
        assert_eq!(decoded.to_rgba8().get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        assert!(rotate_image(b"not an image", Rotation::Quarter).is_err());
    }
}
