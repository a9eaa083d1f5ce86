use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

pub mod card;
pub mod fonts;
pub mod jobs;
pub mod logging;
pub mod overlay;
pub mod render;

pub use card::CardData;
pub use jobs::{JobInfo, all_jobs, find_job};
pub use overlay::{OverlayContent, OverlayLine, StyleMode, build_overlay_content};
pub use render::{RenderOptions, RotatedImage, render_card, rotate_image};

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub card_path: Option<String>,
    pub output: Option<String>,
    pub icons_dir: Option<String>,
    pub font_path: Option<String>,
    pub preview_width: Option<f32>,
    pub verbose: bool,
}

/// Load a card, run the render pipeline and write the PNG. Returns the
/// path of the written file.
pub async fn run(config: Config, input: Option<String>) -> Result<String> {
    let raw = match config.card_path.as_deref() {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read card data: {}", path))?,
        None => input.ok_or_else(|| anyhow!("no card data (use --card or pipe JSON to stdin)"))?,
    };
    let card: CardData =
        serde_json::from_str(&raw).with_context(|| "failed to parse card data")?;

    // Rotation is a pre-pass: the painter receives an already-rotated
    // source and never needs to know the angle.
    let rotated = match card.image.src.as_deref() {
        Some(path) if card.image.rotation != card::Rotation::None => {
            let bytes = tokio::fs::read(path).await.with_context(|| {
                format!("failed to read background image: {}", path.display())
            })?;
            Some(rotate_image(&bytes, card.image.rotation)?)
        }
        _ => None,
    };

    let mut options = RenderOptions::default();
    if let Some(dir) = config.icons_dir.as_deref() {
        options.icons_dir = PathBuf::from(dir);
    }
    options.font_path = config.font_path.as_deref().map(PathBuf::from);
    if let Some(width) = config.preview_width {
        options.mode = StyleMode::Preview(width);
    }

    let png = render_card(&card, rotated.as_ref(), &options).await?;

    let output_path = config.output.clone().unwrap_or_else(default_file_name);
    tokio::fs::write(Path::new(&output_path), &png)
        .await
        .with_context(|| format!("failed to write card: {}", output_path))?;
    tracing::debug!("wrote {} bytes to {}", png.len(), output_path);
    Ok(output_path)
}

fn default_file_name() -> String {
    let format =
        time::macros::format_description!("[year][month][day]-[hour][minute][second]");
    let stamp = time::OffsetDateTime::now_utc()
        .format(&format)
        .unwrap_or_else(|_| "card".to_string());
    format!("characa-{}.png", stamp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_file_name_has_expected_shape() {
        let name = default_file_name();
        assert!(name.starts_with("characa-"));
        assert!(name.ends_with(".png"));
        assert_eq!(name.len(), "characa-YYYYMMDD-HHMMSS.png".len());
    }
}
