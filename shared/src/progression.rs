//! Presentation of the pet's growth stage.
//!
//! Which stage a streak maps to is decided by the backend. This module only
//! turns (stage, consecutive days) into what the character card shows.

use crate::GrowthStage;

/// Everything the character card renders for a stage
#[derive(Debug, Clone, PartialEq)]
pub struct StageDisplay {
    pub stage: GrowthStage,
    pub name: &'static str,
    pub description: &'static str,
    pub next_target: &'static str,
    pub emoji: &'static str,
    /// 0.0..=100.0, unrounded
    pub percentage: f64,
}

impl StageDisplay {
    /// Percentage as shown next to the progress bar
    pub fn rounded_percentage(&self) -> u32 {
        self.percentage.round() as u32
    }
}

/// A stage change observed across a profile refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageTransition {
    pub from: GrowthStage,
    pub to: GrowthStage,
}

impl StageTransition {
    /// `Some` only when the two stages differ
    pub fn between(from: GrowthStage, to: GrowthStage) -> Option<Self> {
        (from != to).then_some(Self { from, to })
    }
}

pub fn describe_stage(stage: GrowthStage, consecutive_days: u32) -> StageDisplay {
    let (name, description, next_target, emoji) = match stage {
        GrowthStage::Chick => ("ひよこ", "歯磨き上手になってきたね！", "あと7日で次のステージ", "🐣"),
        GrowthStage::Chicken => ("にわとり", "歯磨き習慣がついてきた！", "あと14日で次のステージ", "🐤"),
        GrowthStage::Hawk => ("たか", "歯磨きマスターだね！", "あと30日で最終ステージ", "🦅"),
        GrowthStage::Phoenix => ("ほうおう", "歯磨きの達人！素晴らしい！", "おめでとう！", "🔥"),
        GrowthStage::Egg | GrowthStage::Unknown => {
            ("たまご", "歯磨きをはじめよう！", "あと3日で次のステージ", "🥚")
        }
    };

    StageDisplay {
        stage,
        name,
        description,
        next_target,
        emoji,
        percentage: progress_percentage(stage, consecutive_days),
    }
}

/// `min(days / required * 100, 100)`; the terminal stage is always full.
pub fn progress_percentage(stage: GrowthStage, consecutive_days: u32) -> f64 {
    match stage.days_required() {
        Some(required) => (f64::from(consecutive_days) / f64::from(required) * 100.0).min(100.0),
        None => 100.0,
    }
}
