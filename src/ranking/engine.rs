//! Rule engine for multi-criteria timetable ranking.
//!
//! Composes an ordered rule list into one lexicographic comparator:
//! the first rule whose scores differ decides, lower first. Full ties
//! keep generation order (the sort is stable).

use std::cmp::Ordering;

use tracing::debug;

use super::rules::{RankingRule, ScoreKey};
use super::RuleScore;
use crate::models::{Schedule, TimeGrid};

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Keep generation order.
    #[default]
    GenerationOrder,
    /// Lexicographic by chosen section ids.
    BySectionIds,
}

/// A composable ranking engine.
///
/// # Example
/// ```
/// use u_timetable::models::TimeGrid;
/// use u_timetable::ranking::{RankingEngine, RankingRule};
///
/// let engine = RankingEngine::new(TimeGrid::default())
///     .with_rule(RankingRule::minimize_gaps())
///     .with_rule(RankingRule::avoid_day(4));
/// assert_eq!(engine.rules().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RankingEngine {
    grid: TimeGrid,
    rules: Vec<RankingRule>,
    tie_breaker: TieBreaker,
}

impl RankingEngine {
    /// Creates an engine with no rules.
    pub fn new(grid: TimeGrid) -> Self {
        Self {
            grid,
            rules: Vec::new(),
            tie_breaker: TieBreaker::GenerationOrder,
        }
    }

    /// Appends a rule (lower precedence than the ones before it).
    pub fn with_rule(mut self, rule: RankingRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn with_rules(mut self, rules: impl IntoIterator<Item = RankingRule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    pub fn rules(&self) -> &[RankingRule] {
        &self.rules
    }

    /// Number of active slot rules whose cell `schedule` occupies.
    pub fn slot_avoidance(&self, schedule: &Schedule) -> RuleScore {
        self.rules
            .iter()
            .filter_map(|r| r.slot_bit(&self.grid))
            .filter(|&bit| schedule.mask.contains(bit))
            .count() as RuleScore
    }

    /// Writes `slot_avoidance_score` for every schedule.
    pub fn apply_slot_avoidance(&self, schedules: &mut [Schedule]) {
        for schedule in schedules {
            schedule.scores.slot_avoidance_score = self.slot_avoidance(schedule);
        }
    }

    /// Scores of `schedule` under each rule, in rule order.
    pub fn evaluate(&self, schedule: &Schedule) -> Vec<RuleScore> {
        self.rules
            .iter()
            .map(|rule| match rule {
                RankingRule::ScoreKey {
                    key: ScoreKey::SlotAvoidance,
                } => self.slot_avoidance(schedule),
                _ => rule.evaluate(schedule, &self.grid),
            })
            .collect()
    }

    /// Compares two schedules under the active rules.
    pub fn compare(&self, a: &Schedule, b: &Schedule) -> Ordering {
        self.evaluate(a)
            .cmp(&self.evaluate(b))
            .then_with(|| self.break_tie(a, b))
    }

    /// Ranked order as indices into `schedules`.
    pub fn sort_indices(&self, schedules: &[Schedule]) -> Vec<usize> {
        let keys: Vec<Vec<RuleScore>> = schedules.iter().map(|s| self.evaluate(s)).collect();
        let mut indices: Vec<usize> = (0..schedules.len()).collect();
        indices.sort_by(|&a, &b| {
            keys[a]
                .cmp(&keys[b])
                .then_with(|| self.break_tie(&schedules[a], &schedules[b]))
        });
        indices
    }

    /// Refreshes slot avoidance and returns `schedules` in ranked order.
    pub fn rank(&self, mut schedules: Vec<Schedule>) -> Vec<Schedule> {
        debug!(
            schedules = schedules.len(),
            rules = self.rules.len(),
            "ranking timetables"
        );
        self.apply_slot_avoidance(&mut schedules);
        let order = self.sort_indices(&schedules);

        let mut slots: Vec<Option<Schedule>> = schedules.into_iter().map(Some).collect();
        order
            .into_iter()
            .filter_map(|i| slots[i].take())
            .collect()
    }

    fn break_tie(&self, a: &Schedule, b: &Schedule) -> Ordering {
        match self.tie_breaker {
            TieBreaker::GenerationOrder => Ordering::Equal,
            TieBreaker::BySectionIds => a.section_ids().cmp(&b.section_ids()),
        }
    }
}
