//! Built-in ranking rules.
//!
//! # Categories
//!
//! - **Aggregate**: gaps, morning classes, short days, lab spread, slot avoidance
//! - **Day-targeted**: occupied hours on one day
//! - **Slot-targeted**: one avoided (day, hour) cell
//!
//! # Score Convention
//! Every rule returns lower scores for preferred schedules.
//!
//! # JSON
//!
//! ```json
//! { "kind": "scoreKey", "key": "gapScore" }
//! { "kind": "dayTargeted", "key": "dayScore", "dayIndex": 4 }
//! { "kind": "slotTargeted", "dayIndex": 0, "hourIndex": 0 }
//! ```

use serde::{Deserialize, Serialize};

use super::RuleScore;
use crate::models::{Schedule, TimeGrid, TimetableScores};

/// Aggregate score a rule can rank by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreKey {
    #[serde(rename = "gapScore")]
    Gap,
    #[serde(rename = "morningScore")]
    Morning,
    #[serde(rename = "shortDayScore")]
    ShortDay,
    #[serde(rename = "labSpreadScore")]
    LabSpread,
    #[serde(rename = "slotAvoidanceScore")]
    SlotAvoidance,
}

impl ScoreKey {
    /// Stored value of this key. `SlotAvoidance` reads the last value
    /// written by ranking.
    pub fn value(self, scores: &TimetableScores) -> RuleScore {
        match self {
            ScoreKey::Gap => scores.gap_score,
            ScoreKey::Morning => scores.morning_score,
            ScoreKey::ShortDay => scores.short_day_score,
            ScoreKey::LabSpread => scores.lab_spread_score,
            ScoreKey::SlotAvoidance => scores.slot_avoidance_score,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ScoreKey::Gap => "gapScore",
            ScoreKey::Morning => "morningScore",
            ScoreKey::ShortDay => "shortDayScore",
            ScoreKey::LabSpread => "labSpreadScore",
            ScoreKey::SlotAvoidance => "slotAvoidanceScore",
        }
    }
}

/// Per-day score a day-targeted rule can rank by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayKey {
    /// Occupied hours on the day.
    #[default]
    #[serde(rename = "dayScore")]
    Occupancy,
}

/// One active ranking rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RankingRule {
    /// Rank by an aggregate score.
    ScoreKey { key: ScoreKey },
    /// Rank by a per-day score.
    #[serde(rename_all = "camelCase")]
    DayTargeted { key: DayKey, day_index: usize },
    /// Rank by whether a displayed cell is occupied.
    #[serde(rename_all = "camelCase")]
    SlotTargeted { day_index: usize, hour_index: usize },
}

impl RankingRule {
    pub fn minimize_gaps() -> Self {
        Self::ScoreKey { key: ScoreKey::Gap }
    }

    pub fn prefer_later() -> Self {
        Self::ScoreKey {
            key: ScoreKey::Morning,
        }
    }

    pub fn avoid_short_days() -> Self {
        Self::ScoreKey {
            key: ScoreKey::ShortDay,
        }
    }

    pub fn cluster_labs() -> Self {
        Self::ScoreKey {
            key: ScoreKey::LabSpread,
        }
    }

    pub fn avoid_day(day_index: usize) -> Self {
        Self::DayTargeted {
            key: DayKey::Occupancy,
            day_index,
        }
    }

    /// Avoid a displayed cell; `hour_index` is a render row.
    pub fn avoid_slot(day_index: usize, hour_index: usize) -> Self {
        Self::SlotTargeted {
            day_index,
            hour_index,
        }
    }

    /// The user-facing kind this rule instantiates.
    pub fn kind(&self) -> RuleKind {
        match self {
            Self::ScoreKey { key } => match key {
                ScoreKey::Gap => RuleKind::MinimizeGaps,
                ScoreKey::Morning => RuleKind::PreferLater,
                ScoreKey::ShortDay => RuleKind::AvoidShortDays,
                ScoreKey::LabSpread => RuleKind::ClusterLabs,
                ScoreKey::SlotAvoidance => RuleKind::AvoidSlot,
            },
            Self::DayTargeted { .. } => RuleKind::AvoidDay,
            Self::SlotTargeted { .. } => RuleKind::AvoidSlot,
        }
    }

    /// Logic bit of a slot-targeted rule; `None` for lunch, cells
    /// outside the grid, and other rule shapes.
    pub fn slot_bit(&self, grid: &TimeGrid) -> Option<usize> {
        match *self {
            Self::SlotTargeted {
                day_index,
                hour_index,
            } => grid
                .render_index(day_index, hour_index)
                .and_then(|r| grid.to_logic_index(r)),
            _ => None,
        }
    }

    /// Score of `schedule` under this rule, reading stored scores.
    ///
    /// `ScoreKey::SlotAvoidance` returns the stored
    /// `slot_avoidance_score`, which is only current after
    /// [`RankingEngine::rank`](super::RankingEngine::rank) or
    /// [`apply_slot_avoidance`](super::RankingEngine::apply_slot_avoidance).
    /// [`RankingEngine::evaluate`](super::RankingEngine::evaluate)
    /// recomputes it from the engine's slot rules instead.
    pub fn evaluate(&self, schedule: &Schedule, grid: &TimeGrid) -> RuleScore {
        match self {
            Self::ScoreKey { key } => key.value(&schedule.scores),
            Self::DayTargeted {
                key: DayKey::Occupancy,
                day_index,
            } => schedule.day_score(*day_index),
            Self::SlotTargeted { .. } => self
                .slot_bit(grid)
                .map_or(0, |bit| RuleScore::from(schedule.mask.contains(bit))),
        }
    }
}

/// User-facing preference kinds a host can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    MinimizeGaps,
    PreferLater,
    AvoidShortDays,
    ClusterLabs,
    AvoidDay,
    AvoidSlot,
}

impl RuleKind {
    pub const ALL: [RuleKind; 6] = [
        RuleKind::MinimizeGaps,
        RuleKind::PreferLater,
        RuleKind::AvoidShortDays,
        RuleKind::ClusterLabs,
        RuleKind::AvoidDay,
        RuleKind::AvoidSlot,
    ];

    pub fn id(self) -> &'static str {
        match self {
            RuleKind::MinimizeGaps => "minimize-gaps",
            RuleKind::PreferLater => "prefer-later",
            RuleKind::AvoidShortDays => "avoid-short-days",
            RuleKind::ClusterLabs => "cluster-labs",
            RuleKind::AvoidDay => "avoid-day",
            RuleKind::AvoidSlot => "avoid-slot",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            RuleKind::MinimizeGaps => "Minimize Gaps",
            RuleKind::PreferLater => "Prefer Later Classes",
            RuleKind::AvoidShortDays => "Avoid Short Days",
            RuleKind::ClusterLabs => "Cluster Labs",
            RuleKind::AvoidDay => "Avoid Day",
            RuleKind::AvoidSlot => "Avoid Time Slot",
        }
    }

    /// Whether more than one active instance makes sense.
    /// Only targeted kinds qualify.
    pub fn allow_multiple(self) -> bool {
        matches!(self, RuleKind::AvoidDay | RuleKind::AvoidSlot)
    }

    /// A fresh instance, targeting day 0 / row 0 where applicable.
    pub fn default_rule(self) -> RankingRule {
        match self {
            RuleKind::MinimizeGaps => RankingRule::minimize_gaps(),
            RuleKind::PreferLater => RankingRule::prefer_later(),
            RuleKind::AvoidShortDays => RankingRule::avoid_short_days(),
            RuleKind::ClusterLabs => RankingRule::cluster_labs(),
            RuleKind::AvoidDay => RankingRule::avoid_day(0),
            RuleKind::AvoidSlot => RankingRule::avoid_slot(0, 0),
        }
    }
}
