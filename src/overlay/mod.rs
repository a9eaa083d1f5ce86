mod content;
mod layout;
mod style;

pub use content::{OverlayContent, build_overlay_content};
pub use layout::{BoxLayout, layout_overlay, measure_line};
pub use style::{OutputSize, OverlayStyles, StyleMode, output_size, overlay_styles};

use serde::Serialize;

use crate::jobs::JobInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionIcon {
    Gamepad,
    Clock,
}

/// One typed row of the overlay box. The set is closed: both the
/// measurement pass and the draw pass match exhaustively, so adding a
/// variant fails to compile until every pass handles it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OverlayLine {
    Title { text: String },
    Subtitle { text: String },
    Section { text: String, icon: SectionIcon },
    Content { text: String },
    Jobs { jobs: Vec<JobInfo> },
}
