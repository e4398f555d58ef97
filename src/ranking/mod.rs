//! Ranking rules and rule engine for generated timetables.
//!
//! Turns a user-ordered list of preference rules into one lexicographic
//! comparator over scored schedules.
//!
//! # Usage
//!
//! ```
//! use u_timetable::models::{Catalog, Course, CourseRequest, Section, TimeGrid};
//! use u_timetable::ranking::{RankingEngine, RankingRule};
//! use u_timetable::scheduler::generate;
//!
//! let grid = TimeGrid::default();
//! let catalog = Catalog::default().with_course(
//!     Course::new("CS101")
//!         .with_section(Section::lecture(&grid, "CS101", "1", "Kim", vec![0, 2]).unwrap())
//!         .with_section(Section::lecture(&grid, "CS101", "2", "Lee", vec![5, 6]).unwrap()),
//! );
//! let result = generate(&[CourseRequest::any("CS101")], &catalog, &grid).unwrap();
//!
//! let engine = RankingEngine::new(grid)
//!     .with_rule(RankingRule::minimize_gaps())
//!     .with_rule(RankingRule::prefer_later());
//! let ranked = engine.rank(result.schedules);
//! assert_eq!(ranked[0].section_ids(), vec!["CS101-2"]);
//! ```
//!
//! The engine never claims a single best timetable: it only orders what
//! the generator produced, and any rule list (including an empty one or
//! one with repeated kinds) is accepted.

mod engine;
pub mod rules;

pub use engine::{RankingEngine, TieBreaker};
pub use rules::{DayKey, RankingRule, RuleKind, ScoreKey};

use crate::models::{Schedule, TimeGrid};

/// Score returned by a ranking rule.
///
/// Lower scores = preferred (ranked first).
pub type RuleScore = u32;

/// Ranks `schedules` under `rules` (stable; ties keep input order).
pub fn rank(schedules: Vec<Schedule>, rules: &[RankingRule], grid: &TimeGrid) -> Vec<Schedule> {
    RankingEngine::new(grid.clone())
        .with_rules(rules.iter().cloned())
        .rank(schedules)
}
