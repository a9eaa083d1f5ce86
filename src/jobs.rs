use serde::Serialize;

/// One row of the static job reference table. `name_en` doubles as the
/// icon asset key (`<icons-dir>/<name_en>.png`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JobInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub name_en: &'static str,
    pub role: &'static str,
}

const JOBS: &[JobInfo] = &[
    JobInfo { id: "paladin", name: "ナイト", name_en: "Paladin", role: "tank" },
    JobInfo { id: "warrior", name: "戦士", name_en: "Warrior", role: "tank" },
    JobInfo { id: "dark-knight", name: "暗黒騎士", name_en: "DarkKnight", role: "tank" },
    JobInfo { id: "gunbreaker", name: "ガンブレイカー", name_en: "Gunbreaker", role: "tank" },
    JobInfo { id: "white-mage", name: "白魔道士", name_en: "WhiteMage", role: "healer" },
    JobInfo { id: "scholar", name: "学者", name_en: "Scholar", role: "healer" },
    JobInfo { id: "astrologian", name: "占星術師", name_en: "Astrologian", role: "healer" },
    JobInfo { id: "sage", name: "賢者", name_en: "Sage", role: "healer" },
    JobInfo { id: "monk", name: "モンク", name_en: "Monk", role: "dps" },
    JobInfo { id: "dragoon", name: "竜騎士", name_en: "Dragoon", role: "dps" },
    JobInfo { id: "ninja", name: "忍者", name_en: "Ninja", role: "dps" },
    JobInfo { id: "samurai", name: "侍", name_en: "Samurai", role: "dps" },
    JobInfo { id: "reaper", name: "リーパー", name_en: "Reaper", role: "dps" },
    JobInfo { id: "viper", name: "ヴァイパー", name_en: "Viper", role: "dps" },
    JobInfo { id: "bard", name: "吟遊詩人", name_en: "Bard", role: "dps" },
    JobInfo { id: "machinist", name: "機工士", name_en: "Machinist", role: "dps" },
    JobInfo { id: "dancer", name: "踊り子", name_en: "Dancer", role: "dps" },
    JobInfo { id: "black-mage", name: "黒魔道士", name_en: "BlackMage", role: "dps" },
    JobInfo { id: "summoner", name: "召喚士", name_en: "Summoner", role: "dps" },
    JobInfo { id: "red-mage", name: "赤魔道士", name_en: "RedMage", role: "dps" },
    JobInfo { id: "pictomancer", name: "ピクトマンサー", name_en: "Pictomancer", role: "dps" },
    JobInfo { id: "blue-mage", name: "青魔道士", name_en: "BlueMage", role: "dps" },
];

pub fn all_jobs() -> &'static [JobInfo] {
    JOBS
}

pub fn find_job(id: &str) -> Option<JobInfo> {
    JOBS.iter().find(|job| job.id == id).copied()
}
