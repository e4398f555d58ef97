//! Course sections, courses, and the course catalog.
//!
//! A section's weekly occupancy is given in render indices (what a
//! calendar displays) and folded once, at construction, into a
//! [`SlotMask`] over logic space. Blocks on the lunch row are dropped.

use serde::Serialize;

use super::grid::TimeGrid;
use super::mask::SlotMask;
use crate::error::{Result, TimetableError};

/// One offering of a course: an instructor and a fixed weekly set of blocks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// `"{course_code}-{number}"`.
    pub id: String,
    pub course_code: String,
    pub number: String,
    pub instructor: String,
    /// Lecture blocks (render indices).
    pub lecture_blocks: Vec<usize>,
    /// Lab blocks (render indices).
    pub lab_blocks: Vec<usize>,
    mask: SlotMask,
}

impl Section {
    /// Builds a section and computes its mask against `grid`.
    ///
    /// # Errors
    /// `BlockOutOfRange` if any block lies outside the render grid.
    pub fn new(
        grid: &TimeGrid,
        course_code: impl Into<String>,
        number: impl Into<String>,
        instructor: impl Into<String>,
        lecture_blocks: Vec<usize>,
        lab_blocks: Vec<usize>,
    ) -> Result<Self> {
        let course_code = course_code.into();
        let number = number.into();
        let id = format!("{course_code}-{number}");

        let mut mask = SlotMask::empty(grid.chunk_count());
        for &block in lecture_blocks.iter().chain(&lab_blocks) {
            if block >= grid.render_len() {
                return Err(TimetableError::BlockOutOfRange {
                    section_id: id,
                    block,
                    render_len: grid.render_len(),
                });
            }
            if let Some(logic) = grid.to_logic_index(block) {
                mask.set(logic);
            }
        }

        Ok(Self {
            id,
            course_code,
            number,
            instructor: instructor.into(),
            lecture_blocks,
            lab_blocks,
            mask,
        })
    }

    /// Shorthand for a lecture-only section.
    pub fn lecture(
        grid: &TimeGrid,
        course_code: impl Into<String>,
        number: impl Into<String>,
        instructor: impl Into<String>,
        blocks: Vec<usize>,
    ) -> Result<Self> {
        Self::new(grid, course_code, number, instructor, blocks, Vec::new())
    }

    /// Occupancy mask in logic space.
    #[inline]
    pub fn mask(&self) -> &SlotMask {
        &self.mask
    }

    /// All blocks, lectures first.
    pub fn blocks(&self) -> impl Iterator<Item = usize> + '_ {
        self.lecture_blocks.iter().chain(&self.lab_blocks).copied()
    }

    /// Whether this section overlaps `candidate`.
    ///
    /// # Panics
    /// If `candidate` was built against a grid with a different chunk count.
    #[inline]
    pub fn conflicts(&self, candidate: &SlotMask) -> bool {
        self.mask.intersects(candidate)
    }

    /// Checked form of [`conflicts`](Self::conflicts).
    pub fn try_conflicts(&self, candidate: &SlotMask) -> Result<bool> {
        self.mask.try_intersects(candidate)
    }
}

/// A course and its sections, in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub code: String,
    pub name: String,
    pub sections: Vec<Section>,
}

impl Course {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: String::new(),
            sections: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    pub fn with_sections(mut self, sections: impl IntoIterator<Item = Section>) -> Self {
        self.sections.extend(sections);
        self
    }

    /// Distinct instructors, first-seen order.
    pub fn instructors(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for s in &self.sections {
            if !seen.contains(&s.instructor.as_str()) {
                seen.push(&s.instructor);
            }
        }
        seen
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }
}

/// Flat list of every offered course.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Catalog {
    pub courses: Vec<Course>,
}

impl Catalog {
    pub fn new(courses: Vec<Course>) -> Self {
        Self { courses }
    }

    pub fn with_course(mut self, course: Course) -> Self {
        self.courses.push(course);
        self
    }

    /// First course with the given code.
    pub fn find(&self, code: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.code == code)
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Course> {
        self.courses.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{hour_marks, GridConfig};

    fn small_grid() -> TimeGrid {
        TimeGrid::new(GridConfig::default().with_hours(hour_marks(8, 12)).with_lunch_row(2))
            .unwrap()
    }

    #[test]
    fn test_mask_from_blocks() {
        let grid = small_grid();
        // Day 1 render 8 → logic 6; day 4 render 24 → logic 19.
        let s = Section::lecture(&grid, "A", "1", "Kim", vec![8, 24]).unwrap();
        assert_eq!(s.id, "A-1");
        assert_eq!(s.mask().chunk_count(), 1);
        assert_eq!(s.mask().iter_ones().collect::<Vec<_>>(), vec![6, 19]);
    }

    #[test]
    fn test_lunch_blocks_are_skipped() {
        let grid = small_grid();
        let s = Section::lecture(&grid, "A", "1", "Kim", vec![2, 7, 12]).unwrap();
        assert!(s.mask().is_empty());
        assert_eq!(s.blocks().count(), 3);
    }

    #[test]
    fn test_lab_blocks_join_mask() {
        let grid = small_grid();
        let s = Section::new(&grid, "A", "1", "Kim", vec![0], vec![1]).unwrap();
        assert_eq!(s.mask().count_ones(), 2);
        assert_eq!(s.blocks().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn test_block_out_of_range() {
        let grid = small_grid();
        let err = Section::lecture(&grid, "A", "1", "Kim", vec![25]).unwrap_err();
        assert!(matches!(
            err,
            TimetableError::BlockOutOfRange { block: 25, render_len: 25, .. }
        ));
    }

    #[test]
    fn test_disjoint_sections_do_not_conflict() {
        let grid = small_grid();
        let a = Section::lecture(&grid, "A", "1", "Kim", vec![0, 5]).unwrap();
        // 2 and 7 are lunch; sharing them is not a conflict.
        let b = Section::lecture(&grid, "B", "1", "Lee", vec![1, 2, 7]).unwrap();
        let a_lunch = Section::lecture(&grid, "A", "2", "Kim", vec![2, 7]).unwrap();
        assert!(!a.conflicts(b.mask()));
        assert!(!b.conflicts(a_lunch.mask()));
    }

    #[test]
    fn test_shared_block_conflicts() {
        let grid = small_grid();
        let a = Section::lecture(&grid, "A", "1", "Kim", vec![0, 23]).unwrap();
        let b = Section::lecture(&grid, "B", "1", "Lee", vec![23]).unwrap();
        assert!(a.conflicts(b.mask()));
        assert!(b.conflicts(a.mask()));
    }

    #[test]
    fn test_try_conflicts_width_mismatch() {
        let small = small_grid();
        let big = TimeGrid::default();
        let a = Section::lecture(&small, "A", "1", "Kim", vec![0]).unwrap();
        let b = Section::lecture(&big, "B", "1", "Lee", vec![0]).unwrap();
        assert!(a.try_conflicts(b.mask()).is_err());
    }

    #[test]
    fn test_course_lookup() {
        let grid = small_grid();
        let course = Course::new("A")
            .with_name("Algebra")
            .with_section(Section::lecture(&grid, "A", "1", "Kim", vec![0]).unwrap())
            .with_section(Section::lecture(&grid, "A", "2", "Lee", vec![1]).unwrap())
            .with_section(Section::lecture(&grid, "A", "3", "Kim", vec![3]).unwrap());
        assert_eq!(course.instructors(), vec!["Kim", "Lee"]);
        assert_eq!(course.section("A-2").unwrap().instructor, "Lee");
        assert!(course.section("A-9").is_none());

        let catalog = Catalog::default().with_course(course);
        assert_eq!(catalog.len(), 1);
        assert!(catalog.find("A").is_some());
        assert!(catalog.find("B").is_none());
    }
}
