use crate::card::CardData;
use crate::jobs::{JobInfo, find_job};
use crate::overlay::{OverlayLine, SectionIcon};

/// Everything the overlay draws, derived from one card snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayContent {
    pub lines: Vec<OverlayLine>,
    pub selected_jobs: Vec<JobInfo>,
    pub has_play_style: bool,
    pub has_login_time: bool,
}

/// Build the ordered overlay lines for a card. Pure and deterministic: the
/// same card always yields the identical line sequence. Line order is fixed
/// by construction (title, subtitle, jobs, play-style, login-time).
pub fn build_overlay_content(card: &CardData) -> OverlayContent {
    let selected_jobs: Vec<JobInfo> = card
        .play_style
        .jobs
        .iter()
        .filter_map(|id| find_job(id))
        .collect();

    let has_play_style = !card.play_style.contents.is_empty()
        || card.play_style.attitude.is_some()
        || !selected_jobs.is_empty();
    let has_login_time = !card.login_time.days.is_empty() || !card.login_time.times.is_empty();

    let mut lines = Vec::new();

    if !card.character_name.is_empty() {
        lines.push(OverlayLine::Title {
            text: card.character_name.clone(),
        });
    }

    if !card.data_center.is_empty() {
        let text = if card.world.is_empty() {
            card.data_center.clone()
        } else {
            format!("{} @ {}", card.world, card.data_center)
        };
        lines.push(OverlayLine::Subtitle { text });
    }

    if !selected_jobs.is_empty() {
        lines.push(OverlayLine::Jobs {
            jobs: selected_jobs.clone(),
        });
    }

    if card.play_style.attitude.is_some() || !card.play_style.contents.is_empty() {
        lines.push(OverlayLine::Section {
            text: "プレイスタイル".to_string(),
            icon: SectionIcon::Gamepad,
        });
        let mut pieces: Vec<&str> = Vec::new();
        if let Some(attitude) = card.play_style.attitude {
            pieces.push(attitude.label());
        }
        pieces.extend(card.play_style.contents.iter().map(|tag| tag.label()));
        let style_text = pieces.join(" / ");
        if !style_text.is_empty() {
            lines.push(OverlayLine::Content { text: style_text });
        }
    }

    if has_login_time {
        lines.push(OverlayLine::Section {
            text: "ログイン".to_string(),
            icon: SectionIcon::Clock,
        });
        let day_text = card
            .login_time
            .days
            .iter()
            .map(|day| day.label())
            .collect::<Vec<_>>()
            .join("・");
        let time_text = card
            .login_time
            .times
            .iter()
            .map(|slot| slot.label())
            .collect::<Vec<_>>()
            .join("・");
        let login_text = [day_text, time_text]
            .into_iter()
            .filter(|half| !half.is_empty())
            .collect::<Vec<_>>()
            .join("・");
        if !login_text.is_empty() {
            lines.push(OverlayLine::Content { text: login_text });
        }
    }

    OverlayContent {
        lines,
        selected_jobs,
        has_play_style,
        has_login_time,
    }
}
