use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single ledger row. Positive amounts are deposits, negative amounts withdrawals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsEntry {
    /// Auto-assigned, strictly increasing in insertion order
    pub id: i64,
    /// Signed, never zero
    pub amount: i64,
}

impl SavingsEntry {
    pub fn is_deposit(&self) -> bool {
        self.amount > 0
    }
}

/// Growth phase of the plant, derived from the ratio of total savings to the goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlantStage {
    Seed,
    Small,
    Growing,
    Almost,
    Bloom,
}

impl PlantStage {
    /// All stages in growth order
    pub const ALL: [PlantStage; 5] = [
        PlantStage::Seed,
        PlantStage::Small,
        PlantStage::Growing,
        PlantStage::Almost,
        PlantStage::Bloom,
    ];

    /// Lowercase name, also used as the asset file stem by presentation layers
    pub fn as_str(&self) -> &'static str {
        match self {
            PlantStage::Seed => "seed",
            PlantStage::Small => "small",
            PlantStage::Growing => "growing",
            PlantStage::Almost => "almost",
            PlantStage::Bloom => "bloom",
        }
    }
}

impl fmt::Display for PlantStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown plant stage '{0}'")]
pub struct UnknownStage(pub String);

impl FromStr for PlantStage {
    type Err = UnknownStage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlantStage::ALL
            .iter()
            .copied()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| UnknownStage(s.to_string()))
    }
}

/// Everything a presentation layer needs to render the current progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub total: i64,
    pub goal: i64,
    pub stage: PlantStage,
    /// Motivational text for the stage
    pub message: String,
    /// Total clamped into `0..=goal`, suitable for a progress bar
    pub bar_value: i64,
    /// Whether the persisted goal-reached flag is set
    pub goal_reached: bool,
    /// Deposits are blocked once the total meets the goal
    pub can_add_savings: bool,
    pub status_line: String,
}

/// Result of a successful deposit or withdrawal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsOutcome {
    /// Id of the new ledger entry; it becomes the pending undo target
    pub entry_id: i64,
    /// Total after the mutation
    pub total: i64,
    /// True only on the mutation that first carried the total to the goal
    pub goal_just_reached: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoOutcome {
    pub undone_entry_id: i64,
    /// False if the entry had already been removed (for example by a reset)
    pub entry_existed: bool,
    pub total: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetOutcome {
    pub entries_removed: u64,
    pub total: i64,
    /// Whether the goal-reached flag was cleared along with the ledger
    pub goal_flag_cleared: bool,
}

/// Notifications published by the savings service for presentation layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SavingsEvent {
    /// The total met the goal for the first time
    GoalReached { total: i64, goal: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names_round_trip_through_from_str() {
        for stage in PlantStage::ALL {
            assert_eq!(stage.as_str().parse::<PlantStage>(), Ok(stage));
        }
    }

    #[test]
    fn test_unknown_stage_name_is_rejected() {
        let err = "wilted".parse::<PlantStage>().unwrap_err();
        assert_eq!(err, UnknownStage("wilted".to_string()));
        assert_eq!(err.to_string(), "unknown plant stage 'wilted'");
        assert!("Seed".parse::<PlantStage>().is_err(), "names are lowercase only");
    }

    #[test]
    fn test_stages_are_ordered_by_growth() {
        assert!(PlantStage::Seed < PlantStage::Small);
        assert!(PlantStage::Almost < PlantStage::Bloom);
    }

    #[test]
    fn test_stage_serializes_lowercase() {
        let json = serde_json::to_string(&PlantStage::Growing).unwrap();
        assert_eq!(json, "\"growing\"");
    }

    #[test]
    fn test_goal_event_serializes_with_type_tag() {
        let event = SavingsEvent::GoalReached { total: 520, goal: 500 };
        let value = serde_json::to_value(event).unwrap();
        assert_eq!(value["type"], "goal_reached");
        assert_eq!(value["total"], 520);
    }

    #[test]
    fn test_entry_direction() {
        assert!(SavingsEntry { id: 1, amount: 50 }.is_deposit());
        assert!(!SavingsEntry { id: 2, amount: -20 }.is_deposit());
    }
}
