//! Timetable generation and scoring.
//!
//! # Algorithm
//!
//! `TimetableGenerator` walks the requests depth-first, choosing one
//! eligible section per request and pruning any choice whose mask
//! overlaps the sections already chosen. Every complete, non-empty
//! selection is scored and emitted.
//!
//! # Scores
//!
//! `TimetableScores::calculate` derives gap, morning, short-day,
//! per-day and lab-spread metrics from a schedule's mask.

mod backtrack;
mod scores;

pub use backtrack::{generate, GenerationResult, TimetableGenerator};
pub use scores::score;
