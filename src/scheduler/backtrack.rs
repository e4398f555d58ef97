//! Depth-first enumeration of conflict-free section combinations.
//!
//! # Algorithm
//!
//! 1. Plan: resolve each request to its candidate sections (catalog order).
//!    Unknown courses and empty candidate sets contribute no section;
//!    an empty set under a locked filter also yields a warning each time
//!    the search reaches it.
//! 2. Search: one decision per request, in request order. A candidate
//!    whose mask meets the accumulated mask is pruned; otherwise it is
//!    OR-ed in, the search descends, and on return the mask bits are
//!    removed again (explicit undo, single buffer, no per-frame copies).
//! 3. At full depth, a non-empty selection becomes a scored [`Schedule`].
//!
//! Results come out in strict depth-first, left-to-right order, so a
//! stable sort downstream resolves ties identically across runs.
//!
//! # Complexity
//! O(Π cᵢ) in the worst case, where cᵢ is the candidate count of request i.
//! Equal masks reached through different selections are not merged.

use serde::Serialize;
use tracing::{debug, trace, warn};

use super::scores::score;
use crate::error::{Result, TimetableError};
use crate::models::{Catalog, CourseRequest, Schedule, Section, SlotMask, TimeGrid};

/// Output of one generation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationResult {
    /// Scored schedules, in generation order.
    pub schedules: Vec<Schedule>,
    /// One message each time the search reaches a request whose locked
    /// filter matched no section, in visit order.
    pub warnings: Vec<String>,
}

impl GenerationResult {
    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    /// Warnings with repeats removed, first-seen order.
    pub fn unique_warnings(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for w in &self.warnings {
            if !seen.contains(&w.as_str()) {
                seen.push(w);
            }
        }
        seen
    }
}

/// How a single request takes part in the search.
#[derive(Debug)]
enum Step<'a> {
    /// Descends once without choosing a section.
    Pass { warning: Option<String> },
    /// Branches over these candidates.
    Branch(Vec<&'a Section>),
}

/// Backtracking timetable generator.
///
/// # Example
///
/// ```
/// use u_timetable::models::{Catalog, Course, CourseRequest, Section, TimeGrid};
/// use u_timetable::scheduler::TimetableGenerator;
///
/// let grid = TimeGrid::default();
/// let catalog = Catalog::default().with_course(
///     Course::new("CS101")
///         .with_section(Section::lecture(&grid, "CS101", "1", "Kim", vec![0, 1]).unwrap())
///         .with_section(Section::lecture(&grid, "CS101", "2", "Lee", vec![14, 15]).unwrap()),
/// );
///
/// let generator = TimetableGenerator::new(grid);
/// let result = generator.generate(&[CourseRequest::any("CS101")], &catalog).unwrap();
/// assert_eq!(result.len(), 2);
/// assert!(result.warnings.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimetableGenerator {
    grid: TimeGrid,
}

impl TimetableGenerator {
    pub fn new(grid: TimeGrid) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// Enumerates every conflict-free schedule for `requests`.
    ///
    /// # Errors
    /// `MaskWidthMismatch` if a candidate section was built against a grid
    /// with a different chunk count than this generator's grid.
    pub fn generate(
        &self,
        requests: &[CourseRequest],
        catalog: &Catalog,
    ) -> Result<GenerationResult> {
        debug!(
            requests = requests.len(),
            courses = catalog.len(),
            "generating timetables"
        );

        let steps = self.plan(requests, catalog)?;
        let mut search = Search::new(&self.grid, &steps);
        search.run();

        debug!(
            schedules = search.schedules.len(),
            warnings = search.warnings.len(),
            pruned = search.pruned,
            "generation finished"
        );

        Ok(GenerationResult {
            schedules: search.schedules,
            warnings: search.warnings,
        })
    }

    fn plan<'a>(&self, requests: &[CourseRequest], catalog: &'a Catalog) -> Result<Vec<Step<'a>>> {
        requests
            .iter()
            .map(|request| {
                let Some(course) = catalog.find(&request.course_code) else {
                    trace!(course = %request.course_code, "unknown course, request dropped");
                    return Ok(Step::Pass { warning: None });
                };

                let candidates: Vec<&'a Section> = course
                    .sections
                    .iter()
                    .filter(|s| request.filter.accepts(s))
                    .collect();
                for section in &candidates {
                    let found = section.mask().chunk_count();
                    if found != self.grid.chunk_count() {
                        return Err(TimetableError::MaskWidthMismatch {
                            expected: self.grid.chunk_count(),
                            found,
                        });
                    }
                }

                if candidates.is_empty() {
                    let warning = (!request.filter.is_any()).then(|| {
                        format!(
                            "No sections found for {} with the selected filter; the course has been ignored.",
                            request.course_code
                        )
                    });
                    return Ok(Step::Pass { warning });
                }

                Ok(Step::Branch(candidates))
            })
            .collect()
    }
}

/// Mutable search state: one mask and one selection buffer, undone on
/// the way back up.
struct Search<'g, 'a> {
    grid: &'g TimeGrid,
    steps: &'g [Step<'a>],
    mask: SlotMask,
    selection: Vec<&'a Section>,
    /// Next candidate to try, per depth.
    cursors: Vec<usize>,
    /// Whether a section was pushed at this depth.
    placed: Vec<bool>,
    schedules: Vec<Schedule>,
    warnings: Vec<String>,
    pruned: usize,
}

impl<'g, 'a> Search<'g, 'a> {
    fn new(grid: &'g TimeGrid, steps: &'g [Step<'a>]) -> Self {
        let depth = steps.len();
        Self {
            grid,
            steps,
            mask: SlotMask::empty(grid.chunk_count()),
            selection: Vec::with_capacity(depth),
            cursors: vec![0; depth],
            placed: vec![false; depth],
            schedules: Vec::new(),
            warnings: Vec::new(),
            pruned: 0,
        }
    }

    fn run(&mut self) {
        let mut depth = 0;
        loop {
            if depth == self.steps.len() {
                self.emit();
            } else if self.advance(depth) {
                depth += 1;
                continue;
            }
            if !self.retreat(&mut depth) {
                break;
            }
        }
    }

    /// Tries to take the next branch at `depth`. Returns `false` once the
    /// level is exhausted.
    fn advance(&mut self, depth: usize) -> bool {
        match &self.steps[depth] {
            Step::Pass { warning } => {
                if self.cursors[depth] > 0 {
                    return false;
                }
                self.cursors[depth] = 1;
                if let Some(message) = warning {
                    warn!("{message}");
                    self.warnings.push(message.clone());
                }
                true
            }
            Step::Branch(candidates) => {
                while let Some(&section) = candidates.get(self.cursors[depth]) {
                    self.cursors[depth] += 1;
                    if section.conflicts(&self.mask) {
                        self.pruned += 1;
                        continue;
                    }
                    self.mask.union_with(section.mask());
                    self.selection.push(section);
                    self.placed[depth] = true;
                    return true;
                }
                false
            }
        }
    }

    /// Leaves the current level and undoes the parent's placement.
    /// Returns `false` when the root is exhausted.
    fn retreat(&mut self, depth: &mut usize) -> bool {
        if *depth < self.steps.len() {
            self.cursors[*depth] = 0;
        }
        if *depth == 0 {
            return false;
        }
        *depth -= 1;
        if std::mem::take(&mut self.placed[*depth]) {
            if let Some(section) = self.selection.pop() {
                self.mask.remove(section.mask());
            }
        }
        true
    }

    fn emit(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        let selection = self.selection.iter().map(|&s| s.clone()).collect();
        let mut schedule = Schedule::new(selection, self.mask.clone());
        score(&mut schedule, self.grid);
        self.schedules.push(schedule);
    }
}

/// Convenience wrapper around [`TimetableGenerator::generate`].
pub fn generate(
    requests: &[CourseRequest],
    catalog: &Catalog,
    grid: &TimeGrid,
) -> Result<GenerationResult> {
    TimetableGenerator::new(grid.clone()).generate(requests, catalog)
}
