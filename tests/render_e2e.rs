use std::io::Cursor;

use characa_card::card::{HorizontalAnchor, Orientation, Rotation, VerticalAnchor};
use characa_card::overlay::{
    StyleMode, layout_overlay, output_size, overlay_styles,
};
use characa_card::{
    CardData, OverlayLine, RenderOptions, build_overlay_content, render_card, rotate_image,
};
use image::{DynamicImage, ImageFormat, RgbaImage};

fn basic_card() -> CardData {
    let json = r#"{
        "characterName": "Tester",
        "dataCenter": "Gaia",
        "world": "Ridill",
        "design": {
            "orientation": "landscape",
            "textPosition": { "vertical": "bottom", "horizontal": "left" }
        }
    }"#;
    serde_json::from_str(json).expect("card json")
}

fn sample_png(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    let pixels = RgbaImage::from_pixel(width, height, image::Rgba(color));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(pixels)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("encode sample png");
    bytes
}

fn assert_pixel_near(actual: [u8; 4], expected: [u8; 4]) {
    for (a, b) in actual.iter().zip(expected.iter()) {
        assert!(
            a.abs_diff(*b) <= 2,
            "pixel {:?} not close to {:?}",
            actual,
            expected
        );
    }
}

#[tokio::test]
async fn landscape_card_renders_at_export_resolution() {
    let card = basic_card();

    // Exactly two content lines for name + data center.
    let content = build_overlay_content(&card);
    assert_eq!(content.lines.len(), 2);
    assert!(matches!(content.lines[0], OverlayLine::Title { .. }));
    assert!(matches!(content.lines[1], OverlayLine::Subtitle { .. }));

    // The box anchors bottom-left with padding from both edges.
    let styles = overlay_styles(card.design.orientation, StyleMode::Export);
    let output = output_size(card.design.orientation);
    let layout = layout_overlay(
        &content.lines,
        &styles,
        output.width as f32,
        output.height as f32,
        card.design.text_position,
        None,
    );
    assert_eq!(card.design.text_position.vertical, VerticalAnchor::Bottom);
    assert_eq!(card.design.text_position.horizontal, HorizontalAnchor::Left);
    assert_eq!(layout.box_x, styles.padding);
    assert!(
        (layout.box_y + layout.box_height + styles.padding - output.height as f32).abs() < 1e-3
    );

    let png = render_card(&card, None, &RenderOptions::default())
        .await
        .expect("render");
    let decoded = image::load_from_memory(&png).expect("decode png");
    assert_eq!((decoded.width(), decoded.height()), (2560, 1440));
}

#[tokio::test]
async fn portrait_card_renders_at_portrait_resolution() {
    let mut card = basic_card();
    card.design.orientation = Orientation::Portrait;
    let png = render_card(&card, None, &RenderOptions::default())
        .await
        .expect("render");
    let decoded = image::load_from_memory(&png).expect("decode png");
    assert_eq!((decoded.width(), decoded.height()), (1080, 1440));
}

#[tokio::test]
async fn background_image_is_composited_over_full_canvas() {
    let dir = tempfile::tempdir().expect("tempdir");
    let background = dir.path().join("bg.png");
    std::fs::write(&background, sample_png(320, 180, [10, 120, 40, 255])).expect("write bg");

    let mut card = basic_card();
    card.image.src = Some(background);

    let png = render_card(&card, None, &RenderOptions::default())
        .await
        .expect("render");
    let decoded = image::load_from_memory(&png).expect("decode png").to_rgba8();
    assert_eq!(decoded.dimensions(), (2560, 1440));
    // A spot far from the overlay box and watermark shows the image color.
    assert_pixel_near(decoded.get_pixel(2200, 100).0, [10, 120, 40, 255]);
}

#[tokio::test]
async fn missing_background_file_fails_the_render() {
    let mut card = basic_card();
    card.image.src = Some("does-not-exist.png".into());
    let result = render_card(&card, None, &RenderOptions::default()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn rotated_override_feeds_the_painter() {
    let bytes = sample_png(300, 200, [200, 30, 30, 255]);
    let rotated = rotate_image(&bytes, Rotation::Quarter).expect("rotate");
    assert_eq!((rotated.width, rotated.height), (200, 300));

    let card = basic_card();
    let png = render_card(&card, Some(&rotated), &RenderOptions::default())
        .await
        .expect("render");
    let decoded = image::load_from_memory(&png).expect("decode png").to_rgba8();
    assert_pixel_near(decoded.get_pixel(2200, 100).0, [200, 30, 30, 255]);
}

#[tokio::test]
async fn render_via_run_writes_named_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let card_path = dir.path().join("card.json");
    std::fs::write(
        &card_path,
        r#"{ "characterName": "Tester", "dataCenter": "Gaia" }"#,
    )
    .expect("write card json");
    let output_path = dir.path().join("out.png");

    let written = characa_card::run(
        characa_card::Config {
            card_path: Some(card_path.to_string_lossy().into_owned()),
            output: Some(output_path.to_string_lossy().into_owned()),
            ..characa_card::Config::default()
        },
        None,
    )
    .await
    .expect("run");

    assert_eq!(written, output_path.to_string_lossy());
    let decoded = image::open(&output_path).expect("open output");
    assert_eq!((decoded.width(), decoded.height()), (2560, 1440));
}

#[tokio::test]
async fn job_icons_appear_in_rendered_card() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join("Paladin.png"),
        sample_png(72, 72, [250, 210, 0, 255]),
    )
    .expect("write icon");

    let mut card = basic_card();
    card.play_style.jobs = vec!["paladin".to_string(), "unknown-job".to_string()];

    let options = RenderOptions {
        icons_dir: dir.path().to_path_buf(),
        ..RenderOptions::default()
    };
    let png = render_card(&card, None, &options).await.expect("render");
    let decoded = image::load_from_memory(&png).expect("decode png").to_rgba8();

    // The icon is drawn inside the bottom-left box: scan for its color.
    let found = decoded
        .pixels()
        .any(|pixel| pixel.0[0] > 200 && pixel.0[1] > 150 && pixel.0[2] < 80);
    assert!(found, "expected the job icon color somewhere in the card");
}
