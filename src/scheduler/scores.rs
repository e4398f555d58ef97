//! Timetable quality metrics.
//!
//! Computes per-day and aggregate scores from a schedule's combined
//! mask and selection.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Day score | Occupied hours on a day |
//! | Morning | `Σ (3 - h)` over occupied logic hours `h < 3` |
//! | Gap | `(last - first + 1) - occupied`, summed over busy days |
//! | Short day | `3 - occupied` for days with 1–2 classes |
//! | Lab spread | Distinct days carrying lab blocks |
//!
//! Slot avoidance depends on the active ranking rules and is filled in
//! by [`RankingEngine`](crate::ranking::RankingEngine), not here.

use crate::models::{Schedule, TimeGrid, TimetableScores};

/// Logic hours before this threshold accrue a morning penalty.
const MORNING_HOURS: usize = 3;

/// Days with at most this many classes count as short.
const SHORT_DAY_MAX: u32 = 2;

impl TimetableScores {
    /// Computes every mask-derived metric of `schedule`.
    ///
    /// `slot_avoidance_score` is carried over from the schedule unchanged.
    pub fn calculate(schedule: &Schedule, grid: &TimeGrid) -> Self {
        let hours = grid.schedulable_hours_per_day();
        let mut scores = Self {
            day_scores: vec![0; grid.day_count()],
            slot_avoidance_score: schedule.scores.slot_avoidance_score,
            ..Self::default()
        };

        for (day, day_score) in scores.day_scores.iter_mut().enumerate() {
            let mut first: Option<usize> = None;
            let mut last = 0;
            let mut count: u32 = 0;

            for hour in 0..hours {
                if !schedule.mask.contains(day * hours + hour) {
                    continue;
                }
                first.get_or_insert(hour);
                last = hour;
                count += 1;
                if hour < MORNING_HOURS {
                    scores.morning_score += (MORNING_HOURS - hour) as u32;
                }
            }

            *day_score = count;

            if let Some(first) = first {
                let span = (last - first + 1) as u32;
                scores.gap_score += span - count;
                if count <= SHORT_DAY_MAX {
                    scores.short_day_score += SHORT_DAY_MAX + 1 - count;
                }
            }
        }

        scores.lab_spread_score = lab_days(schedule, grid);
        scores
    }
}

fn lab_days(schedule: &Schedule, grid: &TimeGrid) -> u32 {
    let mut seen = vec![false; grid.day_count()];
    for block in schedule.selection.iter().flat_map(|s| s.lab_blocks.iter()) {
        if grid.to_logic_index(*block).is_none() {
            continue;
        }
        if let Some((day, _)) = grid.split_render(*block) {
            seen[day] = true;
        }
    }
    seen.iter().filter(|&&d| d).count() as u32
}

/// Recomputes and attaches the scores of `schedule`.
///
/// Pure in the schedule's mask and selection: calling it again yields
/// identical scores.
pub fn score(schedule: &mut Schedule, grid: &TimeGrid) {
    schedule.scores = TimetableScores::calculate(schedule, grid);
}
