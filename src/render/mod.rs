mod background;
mod icons;
mod rotate;
mod svg;

pub use rotate::{RotatedImage, rotate_image};

use std::collections::HashMap;
use std::io::Cursor;
use std::path::PathBuf;

use anyhow::{Context, Result};
use image::ImageFormat;

use crate::card::{CardData, Theme};
use crate::fonts::{FontMetrics, descent_px, resolve_card_font};
use crate::overlay::{
    BoxLayout, OverlayContent, OverlayLine, OverlayStyles, StyleMode, build_overlay_content,
    layout_overlay, output_size, overlay_styles,
};
use icons::IconData;

const WATERMARK: &str = "\u{a9} SQUARE ENIX";

/// Offsets for the watermark outline: eight surrounding directions drawn
/// in black before the white pass on top.
const OUTLINE_OFFSETS: [(f32, f32); 8] = [
    (-1.0, -1.0),
    (0.0, -1.0),
    (1.0, -1.0),
    (-1.0, 0.0),
    (1.0, 0.0),
    (-1.0, 1.0),
    (0.0, 1.0),
    (1.0, 1.0),
];

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub icons_dir: PathBuf,
    pub font_path: Option<PathBuf>,
    pub mode: StyleMode,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            icons_dir: PathBuf::from("icons/jobs"),
            font_path: None,
            mode: StyleMode::Export,
        }
    }
}

/// Render one card to PNG bytes.
///
/// The pipeline runs as a sequence of await barriers: background load,
/// icon fan-out, then a synchronous compose-and-rasterize step. The card
/// is never mutated; a render either yields a complete PNG or an error,
/// never a partial artifact. An empty character name skips the whole
/// overlay pass (no box), but the background and watermark always draw.
pub async fn render_card(
    card: &CardData,
    rotated: Option<&RotatedImage>,
    options: &RenderOptions,
) -> Result<Vec<u8>> {
    let output = output_size(card.design.orientation);
    let (canvas_width, canvas_height) = match options.mode {
        StyleMode::Export => (output.width, output.height),
        StyleMode::Preview(preview_width) => {
            let height =
                preview_width * output.height as f32 / output.width as f32;
            (preview_width.round() as u32, height.round() as u32)
        }
    };
    let styles = overlay_styles(card.design.orientation, options.mode);

    let source_bytes = match rotated {
        Some(rotated) => Some(rotated.bytes.clone()),
        None => match card.image.src.as_deref() {
            Some(path) => Some(tokio::fs::read(path).await.with_context(|| {
                format!("failed to read background image: {}", path.display())
            })?),
            None => None,
        },
    };
    let source = source_bytes
        .as_deref()
        .map(image::load_from_memory)
        .transpose()
        .with_context(|| "failed to decode background image")?;
    let composed = background::compose_background(
        source.as_ref(),
        card.image.cropped_area.as_ref(),
        canvas_width,
        canvas_height,
    );
    let mut background_png = Vec::new();
    image::DynamicImage::ImageRgba8(composed)
        .write_to(&mut Cursor::new(&mut background_png), ImageFormat::Png)
        .with_context(|| "failed to encode background")?;

    let font = resolve_card_font(options.font_path.as_deref(), card.design.font)?;

    let overlay = if card.character_name.is_empty() {
        None
    } else {
        let content = build_overlay_content(card);
        let layout = layout_overlay(
            &content.lines,
            &styles,
            canvas_width as f32,
            canvas_height as f32,
            card.design.text_position,
            font.metrics.as_ref(),
        );
        let icon_map = icons::load_job_icons(&options.icons_dir, &content.selected_jobs).await;
        Some((content, layout, icon_map))
    };

    let scene = Scene {
        canvas_width,
        canvas_height,
        background_uri: svg::data_uri("image/png", &background_png),
        theme: card.design.theme,
        styles: &styles,
        overlay: overlay
            .as_ref()
            .map(|(content, layout, icon_map)| OverlayScene {
                content,
                layout,
                icons: icon_map,
            }),
        font_family: &font.family,
        metrics: font.metrics.as_ref(),
    };
    let document = compose_card_svg(&scene);

    svg::rasterize_to_png(&document, font.metrics.as_ref().map(|metrics| metrics.data()))
}

struct OverlayScene<'a> {
    content: &'a OverlayContent,
    layout: &'a BoxLayout,
    icons: &'a HashMap<String, IconData>,
}

struct Scene<'a> {
    canvas_width: u32,
    canvas_height: u32,
    background_uri: String,
    theme: Theme,
    styles: &'a OverlayStyles,
    overlay: Option<OverlayScene<'a>>,
    font_family: &'a str,
    metrics: Option<&'a FontMetrics>,
}

/// Assemble the full card as an SVG document: background, overlay box and
/// lines, watermark. Pure string work so composition is testable without
/// rasterizing.
fn compose_card_svg(scene: &Scene<'_>) -> String {
    let mut document = String::new();
    document.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = scene.canvas_width,
        h = scene.canvas_height
    ));
    document.push_str(&format!(
        r#"<image href="{uri}" xlink:href="{uri}" x="0" y="0" width="{w}" height="{h}" preserveAspectRatio="none"/>"#,
        uri = scene.background_uri,
        w = scene.canvas_width,
        h = scene.canvas_height
    ));

    if let Some(overlay) = scene.overlay.as_ref() {
        draw_overlay(&mut document, scene, overlay);
    }

    draw_watermark(&mut document, scene);
    document.push_str("</svg>");
    document
}

fn draw_overlay(document: &mut String, scene: &Scene<'_>, overlay: &OverlayScene<'_>) {
    let styles = scene.styles;
    let layout = overlay.layout;
    // Solid box; the preview's backdrop blur is intentionally not
    // reproduced in exports.
    let (box_fill, text_color) = match scene.theme {
        Theme::Dark => ("#000000", "#ffffff"),
        Theme::Light => ("#ffffff", "#000000"),
    };
    document.push_str(&format!(
        r#"<rect x="{x}" y="{y}" width="{w}" height="{h}" rx="{rx}" fill="{fill}" fill-opacity="0.6"/>"#,
        x = layout.box_x,
        y = layout.box_y,
        w = layout.box_width,
        h = layout.box_height,
        rx = styles.border_radius,
        fill = box_fill,
    ));

    let text_x = layout.box_x + styles.box_padding;
    let mut cursor = layout.box_y + styles.box_padding;
    for (line, height) in overlay.content.lines.iter().zip(&layout.line_heights) {
        // Advance first: the baseline sits flush to the bottom of the
        // line's height band.
        cursor += height;
        match line {
            OverlayLine::Title { text } => {
                let baseline = cursor - descent_px(styles.title_font_size, scene.metrics);
                push_text(
                    document,
                    &TextElement {
                        text,
                        x: text_x,
                        y: baseline,
                        font_size: styles.title_font_size,
                        family: scene.font_family,
                        color: text_color,
                        bold: true,
                        anchor_end: false,
                    },
                );
            }
            OverlayLine::Subtitle { text } => {
                let baseline = cursor - descent_px(styles.subtitle_font_size, scene.metrics);
                push_text(
                    document,
                    &TextElement {
                        text,
                        x: text_x,
                        y: baseline,
                        font_size: styles.subtitle_font_size,
                        family: scene.font_family,
                        color: text_color,
                        bold: false,
                        anchor_end: false,
                    },
                );
            }
            OverlayLine::Section { text, .. } => {
                // Icon space is reserved by the layout pass; only the text
                // is drawn.
                let baseline = cursor - descent_px(styles.section_font_size, scene.metrics);
                push_text(
                    document,
                    &TextElement {
                        text,
                        x: text_x,
                        y: baseline,
                        font_size: styles.section_font_size,
                        family: scene.font_family,
                        color: text_color,
                        bold: true,
                        anchor_end: false,
                    },
                );
            }
            OverlayLine::Content { text } => {
                let baseline = cursor - descent_px(styles.content_font_size, scene.metrics);
                push_text(
                    document,
                    &TextElement {
                        text,
                        x: text_x + styles.content_indent,
                        y: baseline,
                        font_size: styles.content_font_size,
                        family: scene.font_family,
                        color: text_color,
                        bold: false,
                        anchor_end: false,
                    },
                );
            }
            OverlayLine::Jobs { jobs } => {
                let icon_y = cursor - styles.job_icon_size;
                let mut icon_x = text_x;
                for job in jobs {
                    // A missing icon keeps its slot: skip the image but
                    // still advance.
                    if let Some(icon) = overlay.icons.get(job.name_en) {
                        let uri = svg::data_uri(icon.mime, &icon.bytes);
                        document.push_str(&format!(
                            r#"<image href="{uri}" xlink:href="{uri}" x="{x}" y="{y}" width="{size}" height="{size}"/>"#,
                            uri = uri,
                            x = icon_x,
                            y = icon_y,
                            size = styles.job_icon_size,
                        ));
                    }
                    icon_x += styles.job_icon_size + styles.job_gap;
                }
            }
        }
    }
}

/// The watermark draws on every card regardless of other content: eight
/// black offset copies for the outline, then white on top, so it stays
/// legible over any background.
fn draw_watermark(document: &mut String, scene: &Scene<'_>) {
    let styles = scene.styles;
    let x = scene.canvas_width as f32 - styles.copyright_padding;
    let y = scene.canvas_height as f32
        - styles.copyright_padding
        - descent_px(styles.copyright_font_size, scene.metrics);

    for (dx, dy) in OUTLINE_OFFSETS {
        push_text(
            document,
            &TextElement {
                text: WATERMARK,
                x: x + dx,
                y: y + dy,
                font_size: styles.copyright_font_size,
                family: scene.font_family,
                color: "#000000",
                bold: false,
                anchor_end: true,
            },
        );
    }
    push_text(
        document,
        &TextElement {
            text: WATERMARK,
            x,
            y,
            font_size: styles.copyright_font_size,
            family: scene.font_family,
            color: "#ffffff",
            bold: false,
            anchor_end: true,
        },
    );
}

struct TextElement<'a> {
    text: &'a str,
    x: f32,
    y: f32,
    font_size: f32,
    family: &'a str,
    color: &'a str,
    bold: bool,
    anchor_end: bool,
}

fn push_text(document: &mut String, element: &TextElement<'_>) {
    document.push_str(&format!(
        r#"<text x="{x}" y="{y}" font-size="{size}" font-family="{family}" fill="{color}""#,
        x = element.x,
        y = element.y,
        size = element.font_size,
        family = svg::escape_xml(element.family),
        color = element.color,
    ));
    if element.bold {
        document.push_str(r#" font-weight="bold""#);
    }
    if element.anchor_end {
        document.push_str(r#" text-anchor="end""#);
    }
    document.push('>');
    document.push_str(&svg::escape_xml(element.text));
    document.push_str("</text>");
}
