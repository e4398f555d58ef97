//! Generated timetable (solution) model.
//!
//! A schedule is one conflict-free choice of sections, one per
//! satisfiable course request, together with its combined mask and
//! quality scores. Scores are raw counts; lower is always better.

use serde::Serialize;

use super::mask::SlotMask;
use super::section::Section;

/// Quality metrics of a schedule. Lower is better for every field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableScores {
    /// Idle hours between the first and last class of each day, summed.
    pub gap_score: u32,
    /// `Σ (3 - h)` over occupied logic hours `h < 3`.
    pub morning_score: u32,
    /// `Σ (3 - n)` over days holding `n ∈ {1, 2}` classes.
    pub short_day_score: u32,
    /// Occupied hours per day.
    pub day_scores: Vec<u32>,
    /// Number of distinct days carrying lab blocks.
    pub lab_spread_score: u32,
    /// Active avoided slots this schedule occupies. Written by ranking.
    pub slot_avoidance_score: u32,
}

/// One complete, conflict-free assignment of sections.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    /// Chosen sections, in request order.
    pub selection: Vec<Section>,
    /// Bitwise OR of every selected section's mask.
    pub mask: SlotMask,
    pub scores: TimetableScores,
}

impl Schedule {
    /// Creates an unscored schedule.
    pub fn new(selection: Vec<Section>, mask: SlotMask) -> Self {
        Self {
            selection,
            mask,
            scores: TimetableScores::default(),
        }
    }

    /// Number of chosen sections.
    pub fn section_count(&self) -> usize {
        self.selection.len()
    }

    /// Chosen section for a course, if any.
    pub fn section_for_course(&self, course_code: &str) -> Option<&Section> {
        self.selection.iter().find(|s| s.course_code == course_code)
    }

    /// Section occupying a logic bit, if any.
    pub fn section_at(&self, logic_index: usize) -> Option<&Section> {
        self.selection
            .iter()
            .find(|s| s.mask().contains(logic_index))
    }

    /// Ids of the chosen sections, in request order.
    pub fn section_ids(&self) -> Vec<&str> {
        self.selection.iter().map(|s| s.id.as_str()).collect()
    }

    /// Occupied hours on `day` (0 outside the grid or before scoring).
    pub fn day_score(&self, day: usize) -> u32 {
        self.scores.day_scores.get(day).copied().unwrap_or(0)
    }
}
