use crate::card::Orientation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputSize {
    pub width: u32,
    pub height: u32,
}

/// Native export resolution per orientation.
pub fn output_size(orientation: Orientation) -> OutputSize {
    match orientation {
        Orientation::Landscape => OutputSize { width: 2560, height: 1440 },
        Orientation::Portrait => OutputSize { width: 1080, height: 1440 },
    }
}

/// Reference geometry calibrated at an orientation's native output
/// resolution. Every scaled style derives from these constants, which is
/// what keeps preview and export renders geometrically similar.
struct BaseStyles {
    title_font_size: f32,
    subtitle_font_size: f32,
    section_font_size: f32,
    content_font_size: f32,
    job_icon_size: f32,
    section_icon_size: f32,
    padding: f32,
    box_padding: f32,
    border_radius: f32,
    max_width_ratio: f32,
    line_spacing: f32,
    job_gap: f32,
    content_indent: f32,
    copyright_font_size: f32,
    copyright_padding: f32,
}

const LANDSCAPE_BASE: BaseStyles = BaseStyles {
    title_font_size: 80.0,
    subtitle_font_size: 60.0,
    section_font_size: 40.0,
    content_font_size: 36.0,
    job_icon_size: 72.0,
    section_icon_size: 32.0,
    padding: 32.0,
    box_padding: 32.0,
    border_radius: 32.0,
    max_width_ratio: 0.75,
    line_spacing: 1.3,
    job_gap: 8.0,
    content_indent: 16.0,
    copyright_font_size: 24.0,
    copyright_padding: 32.0,
};

const PORTRAIT_BASE: BaseStyles = BaseStyles {
    title_font_size: 80.0,
    subtitle_font_size: 60.0,
    section_font_size: 40.0,
    content_font_size: 36.0,
    job_icon_size: 72.0,
    section_icon_size: 32.0,
    padding: 32.0,
    box_padding: 32.0,
    border_radius: 32.0,
    max_width_ratio: 0.75,
    line_spacing: 1.3,
    job_gap: 8.0,
    content_indent: 16.0,
    copyright_font_size: 24.0,
    copyright_padding: 32.0,
};

fn base_styles(orientation: Orientation) -> &'static BaseStyles {
    match orientation {
        Orientation::Landscape => &LANDSCAPE_BASE,
        Orientation::Portrait => &PORTRAIT_BASE,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StyleMode {
    /// Render at a preview surface width in pixels; linear fields scale by
    /// `preview_width / output_width`.
    Preview(f32),
    /// Render at the native output resolution, base constants 1:1.
    Export,
}

/// Resolved geometry for one orientation at one scale.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayStyles {
    pub title_font_size: f32,
    pub subtitle_font_size: f32,
    pub section_font_size: f32,
    pub content_font_size: f32,
    pub job_icon_size: f32,
    pub section_icon_size: f32,
    pub padding: f32,
    pub box_padding: f32,
    pub border_radius: f32,
    pub max_width: f32,
    pub line_spacing: f32,
    pub job_gap: f32,
    pub content_indent: f32,
    pub copyright_font_size: f32,
    pub copyright_padding: f32,
}

/// Derive the overlay styles for an orientation at the requested scale.
/// `line_spacing` is a ratio and never scales; `max_width` is a share of
/// the reference width (preview width or output width).
pub fn overlay_styles(orientation: Orientation, mode: StyleMode) -> OverlayStyles {
    let base = base_styles(orientation);
    let output = output_size(orientation);
    let (scale, reference_width) = match mode {
        StyleMode::Preview(preview_width) => {
            (preview_width / output.width as f32, preview_width)
        }
        StyleMode::Export => (1.0, output.width as f32),
    };

    OverlayStyles {
        title_font_size: base.title_font_size * scale,
        subtitle_font_size: base.subtitle_font_size * scale,
        section_font_size: base.section_font_size * scale,
        content_font_size: base.content_font_size * scale,
        job_icon_size: base.job_icon_size * scale,
        section_icon_size: base.section_icon_size * scale,
        padding: base.padding * scale,
        box_padding: base.box_padding * scale,
        border_radius: base.border_radius * scale,
        max_width: reference_width * base.max_width_ratio,
        line_spacing: base.line_spacing,
        job_gap: base.job_gap * scale,
        content_indent: base.content_indent * scale,
        copyright_font_size: base.copyright_font_size * scale,
        copyright_padding: base.copyright_padding * scale,
    }
}
