use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Immutable snapshot of one card for a single render. The renderer only
/// reads this; live editing state stays on the caller's side.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardData {
    #[serde(default)]
    pub character_name: String,
    #[serde(default)]
    pub data_center: String,
    #[serde(default)]
    pub world: String,
    #[serde(default)]
    pub play_style: PlayStyle,
    #[serde(default)]
    pub login_time: LoginTime,
    #[serde(default)]
    pub image: ImageSettings,
    #[serde(default)]
    pub design: DesignSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayStyle {
    #[serde(default)]
    pub contents: Vec<ContentTag>,
    #[serde(default)]
    pub attitude: Option<Attitude>,
    /// Job ids, resolved against the static job table at build time.
    #[serde(default)]
    pub jobs: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginTime {
    #[serde(default)]
    pub days: Vec<Day>,
    #[serde(default)]
    pub times: Vec<TimeSlot>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSettings {
    #[serde(default)]
    pub src: Option<PathBuf>,
    #[serde(default)]
    pub rotation: Rotation,
    #[serde(default)]
    pub cropped_area: Option<CroppedArea>,
}

/// Crop rectangle in source-image pixel space. Only meaningful when both
/// dimensions are positive; otherwise the background falls back to a
/// centered aspect-preserving fit.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CroppedArea {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CroppedArea {
    pub fn is_active(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "u16")]
pub enum Rotation {
    #[default]
    None,
    Quarter,
    Half,
    ThreeQuarter,
}

impl Rotation {
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::None => 0,
            Rotation::Quarter => 90,
            Rotation::Half => 180,
            Rotation::ThreeQuarter => 270,
        }
    }

    /// 90 and 270 degree rotations swap image width and height.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Quarter | Rotation::ThreeQuarter)
    }
}

impl TryFrom<u16> for Rotation {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Rotation::None),
            90 => Ok(Rotation::Quarter),
            180 => Ok(Rotation::Half),
            270 => Ok(Rotation::ThreeQuarter),
            other => Err(format!("rotation must be 0, 90, 180 or 270 (got {})", other)),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignSettings {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default)]
    pub text_position: TextPosition,
    #[serde(default)]
    pub font: FontChoice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Landscape,
    Portrait,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextPosition {
    #[serde(default)]
    pub vertical: VerticalAnchor,
    #[serde(default)]
    pub horizontal: HorizontalAnchor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAnchor {
    Top,
    Center,
    #[default]
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAnchor {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontChoice {
    #[default]
    System,
    NotoSansJp,
    MplusRounded,
    NotoSerifJp,
    ZenMaru,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentTag {
    Raid,
    Pvp,
    Housing,
    Chat,
    GathererCrafter,
    Glamour,
    Fishing,
    MobHunt,
    GoldSaucer,
    Dd,
    SpecialField,
    Roleplay,
    Achievement,
    TreasureMap,
    GilMaking,
    Roulette,
}

impl ContentTag {
    pub fn label(self) -> &'static str {
        match self {
            ContentTag::Raid => "レイド",
            ContentTag::Pvp => "PvP",
            ContentTag::Housing => "ハウジング",
            ContentTag::Chat => "雑談",
            ContentTag::GathererCrafter => "ギャザクラ",
            ContentTag::Glamour => "ミラプリ",
            ContentTag::Fishing => "釣り",
            ContentTag::MobHunt => "モブハン",
            ContentTag::GoldSaucer => "ゴールドソーサー",
            ContentTag::Dd => "DD",
            ContentTag::SpecialField => "特殊フィールド",
            ContentTag::Roleplay => "ロールプレイ",
            ContentTag::Achievement => "アチーブ集め",
            ContentTag::TreasureMap => "地図",
            ContentTag::GilMaking => "金策",
            ContentTag::Roulette => "ルレ",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Attitude {
    Hardcore,
    Casual,
    Enjoy,
    Lonely,
}

impl Attitude {
    pub fn label(self) -> &'static str {
        match self {
            Attitude::Hardcore => "ガチ勢",
            Attitude::Casual => "まったり",
            Attitude::Enjoy => "エンジョイ",
            Attitude::Lonely => "ぼっち",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Weekday,
    Weekend,
    Everyday,
    Irregular,
}

impl Day {
    pub fn label(self) -> &'static str {
        match self {
            Day::Weekday => "平日",
            Day::Weekend => "週末",
            Day::Everyday => "毎日",
            Day::Irregular => "不定期",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Night,
    Midnight,
}

impl TimeSlot {
    pub fn label(self) -> &'static str {
        match self {
            TimeSlot::Morning => "朝",
            TimeSlot::Afternoon => "昼",
            TimeSlot::Night => "夜",
            TimeSlot::Midnight => "深夜",
        }
    }
}
