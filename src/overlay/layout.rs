use crate::card::{HorizontalAnchor, TextPosition, VerticalAnchor};
use crate::fonts::{FontMetrics, measure_text_width_px};
use crate::overlay::{OverlayLine, OverlayStyles};

/// Resolved overlay box geometry in canvas pixels. `line_heights` is
/// parallel to the measured line sequence; the draw cursor advances by each
/// height before placing that line's baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxLayout {
    pub box_x: f32,
    pub box_y: f32,
    pub box_width: f32,
    pub box_height: f32,
    pub line_heights: Vec<f32>,
}

/// Measure one line's `(width, height)` extent.
///
/// Section lines reserve horizontal room for their icon even though only
/// the text is drawn, and use a fixed 1.8 height factor for visual
/// separation. Job rows use a fixed 1.5 factor independent of line
/// spacing.
pub fn measure_line(
    line: &OverlayLine,
    styles: &OverlayStyles,
    metrics: Option<&FontMetrics>,
) -> (f32, f32) {
    match line {
        OverlayLine::Title { text } => {
            let width = measure_text_width_px(text, styles.title_font_size, metrics);
            (width, styles.title_font_size * styles.line_spacing)
        }
        OverlayLine::Subtitle { text } => {
            let width = measure_text_width_px(text, styles.subtitle_font_size, metrics);
            (width, styles.subtitle_font_size * styles.line_spacing)
        }
        OverlayLine::Section { text, .. } => {
            let width = measure_text_width_px(text, styles.section_font_size, metrics)
                + styles.section_icon_size
                + styles.job_gap;
            (width, styles.section_font_size * 1.8)
        }
        OverlayLine::Content { text } => {
            let width = measure_text_width_px(text, styles.content_font_size, metrics)
                + styles.content_indent;
            (width, styles.content_font_size * styles.line_spacing)
        }
        OverlayLine::Jobs { jobs } => {
            let width = jobs.len() as f32 * (styles.job_icon_size + styles.job_gap);
            (width, styles.job_icon_size * 1.5)
        }
    }
}

/// Compute the overlay box size and anchor it on the canvas.
///
/// Width clamps to `styles.max_width` without re-measuring or wrapping;
/// inputs are expected to be short enough upstream. Nine anchor
/// combinations resolve independently per axis.
pub fn layout_overlay(
    lines: &[OverlayLine],
    styles: &OverlayStyles,
    canvas_width: f32,
    canvas_height: f32,
    position: TextPosition,
    metrics: Option<&FontMetrics>,
) -> BoxLayout {
    let mut max_line_width = 0.0f32;
    let mut line_heights = Vec::with_capacity(lines.len());
    let mut box_height = styles.box_padding * 2.0;

    for line in lines {
        let (width, height) = measure_line(line, styles, metrics);
        max_line_width = max_line_width.max(width);
        box_height += height;
        line_heights.push(height);
    }

    let box_width = (max_line_width + styles.box_padding * 2.0).min(styles.max_width);

    let box_x = match position.horizontal {
        HorizontalAnchor::Left => styles.padding,
        HorizontalAnchor::Center => (canvas_width - box_width) / 2.0,
        HorizontalAnchor::Right => canvas_width - box_width - styles.padding,
    };
    let box_y = match position.vertical {
        VerticalAnchor::Top => styles.padding,
        VerticalAnchor::Center => (canvas_height - box_height) / 2.0,
        VerticalAnchor::Bottom => canvas_height - box_height - styles.padding,
    };

    BoxLayout {
        box_x,
        box_y,
        box_width,
        box_height,
        line_heights,
    }
}
