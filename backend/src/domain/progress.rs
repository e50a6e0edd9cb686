//! Progress calculator: maps a total against the goal to a plant stage and
//! the text shown alongside it. Pure functions, no storage access.

use shared::{PlantStage, ProgressSnapshot};

/// Stage for `total` savings against `goal`.
///
/// A non-positive goal counts as zero progress.
pub fn stage_for(total: i64, goal: i64) -> PlantStage {
    let progress = if goal > 0 { total as f64 / goal as f64 } else { 0.0 };

    if progress < 0.25 {
        PlantStage::Seed
    } else if progress < 0.5 {
        PlantStage::Small
    } else if progress < 0.75 {
        PlantStage::Growing
    } else if progress < 1.0 {
        PlantStage::Almost
    } else {
        PlantStage::Bloom
    }
}

pub fn message_for(stage: PlantStage) -> &'static str {
    match stage {
        PlantStage::Seed => "Every journey begins with a seed 🌱",
        PlantStage::Small => "Nice start — keep going 💧",
        PlantStage::Growing => "Growing stronger every day 🌿",
        PlantStage::Almost => "Almost there ✨",
        PlantStage::Bloom => "In full bloom 🌸",
    }
}

/// Message for a stage given by name; unknown names get an empty message
pub fn message_for_name(name: &str) -> &'static str {
    name.parse::<PlantStage>().map(message_for).unwrap_or("")
}

/// Total clamped into `0..=goal`
pub fn progress_bar_value(total: i64, goal: i64) -> i64 {
    total.clamp(0, goal.max(0))
}

pub fn status_line(total: i64, goal: i64, stage: PlantStage) -> String {
    format!("🌱 Savings: {} / {}  |  Stage: {}", total, goal, stage)
}

pub fn snapshot(total: i64, goal: i64, goal_reached: bool) -> ProgressSnapshot {
    let stage = stage_for(total, goal);
    ProgressSnapshot {
        total,
        goal,
        stage,
        message: message_for(stage).to_string(),
        bar_value: progress_bar_value(total, goal),
        goal_reached,
        can_add_savings: total < goal,
        status_line: status_line(total, goal, stage),
    }
}
