//! Class timetable engine.
//!
//! Enumerates every conflict-free combination of course sections a
//! student could attend, scores each combination, and ranks them under
//! an ordered list of user preferences.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `TimeGrid`, `SlotMask`, `Section`,
//!   `Course`, `Catalog`, `CourseRequest`, `Schedule`
//! - **`scheduler`**: Backtracking generation and timetable scoring
//! - **`ranking`**: Preference rules and the lexicographic ranking engine
//! - **`loader`**: Department-grouped course data import
//! - **`validation`**: Input integrity checks (duplicate ids, unknown courses, grid mismatch)
//!
//! # Example
//!
//! ```
//! use u_timetable::models::{Catalog, Course, CourseRequest, Section, TimeGrid};
//! use u_timetable::ranking::{rank, RankingRule};
//! use u_timetable::scheduler::generate;
//!
//! let grid = TimeGrid::default();
//! let catalog = Catalog::default()
//!     .with_course(Course::new("CS101")
//!         .with_section(Section::lecture(&grid, "CS101", "1", "Kim", vec![0, 1]).unwrap())
//!         .with_section(Section::lecture(&grid, "CS101", "2", "Lee", vec![6]).unwrap()))
//!     .with_course(Course::new("MA201")
//!         .with_section(Section::lecture(&grid, "MA201", "1", "Park", vec![1]).unwrap()));
//!
//! let requests = vec![CourseRequest::any("CS101"), CourseRequest::any("MA201")];
//! let result = generate(&requests, &catalog, &grid).unwrap();
//! assert_eq!(result.schedules.len(), 1);
//!
//! let ranked = rank(result.schedules, &[RankingRule::minimize_gaps()], &grid);
//! assert_eq!(ranked[0].section_ids(), vec!["CS101-2", "MA201-1"]);
//! ```

pub mod error;
pub mod loader;
pub mod models;
pub mod ranking;
pub mod scheduler;
pub mod validation;

pub use error::{Result, TimetableError};
