//! Timetabling domain models.
//!
//! Provides the core data types for representing a weekly class
//! timetable problem and its solutions.
//!
//! # Domain Mappings
//!
//! | u-timetable | University | Training Center | Clinic Rota |
//! |-------------|-----------|-----------------|-------------|
//! | Course | Course | Program | Service |
//! | Section | Class Section | Cohort | Shift Pattern |
//! | CourseRequest | Enrolment Wish | Sign-up | Staffing Need |
//! | Schedule | Timetable | Weekly Plan | Weekly Rota |

mod grid;
mod mask;
mod request;
mod schedule;
mod section;

pub use grid::{hour_marks, GridConfig, TimeGrid, MASK_CHUNK_BITS};
pub use mask::SlotMask;
pub use request::{CourseRequest, RequestList, SectionFilter};
pub use schedule::{Schedule, TimetableScores};
pub use section::{Catalog, Course, Section};
