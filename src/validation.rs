//! Input validation for catalogs and course requests.
//!
//! Checks structural integrity before generation. Detects:
//! - Duplicate course codes and section ids
//! - Sections built against a different grid geometry
//! - Courses with no sections
//! - Requests for unknown or repeated courses
//!
//! Validation is advisory: the generator tolerates all of these except
//! a mask width mismatch, which it reports as an error.

use crate::models::{Catalog, CourseRequest, TimeGrid};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A section mask has a different chunk count than the grid.
    MaskWidthMismatch,
    /// A course has no sections.
    EmptyCourse,
    /// A request names a course missing from the catalog.
    UnknownCourse,
    /// The same course is requested more than once.
    DuplicateRequest,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

fn into_result(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a catalog against the grid it will be generated on.
///
/// Checks:
/// 1. No duplicate course codes
/// 2. No duplicate section ids within a course
/// 3. Every section mask matches the grid's chunk count
/// 4. Every course has at least one section
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_catalog(catalog: &Catalog, grid: &TimeGrid) -> ValidationResult {
    let mut errors = Vec::new();
    let mut codes = HashSet::new();

    for course in catalog.iter() {
        if !codes.insert(course.code.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate course code: {}", course.code),
            ));
        }

        if course.sections.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyCourse,
                format!("Course '{}' has no sections", course.code),
            ));
        }

        let mut section_ids = HashSet::new();
        for section in &course.sections {
            if !section_ids.insert(section.id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    format!(
                        "Duplicate section ID '{}' in course '{}'",
                        section.id, course.code
                    ),
                ));
            }

            let found = section.mask().chunk_count();
            if found != grid.chunk_count() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::MaskWidthMismatch,
                    format!(
                        "Section '{}' has {} mask chunks, grid expects {}",
                        section.id,
                        found,
                        grid.chunk_count()
                    ),
                ));
            }
        }
    }

    into_result(errors)
}

/// Validates a request list against a catalog.
///
/// Checks:
/// 1. Every requested course exists
/// 2. No course is requested twice
pub fn validate_requests(requests: &[CourseRequest], catalog: &Catalog) -> ValidationResult {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for request in requests {
        if !seen.insert(request.course_code.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateRequest,
                format!("Course '{}' is requested more than once", request.course_code),
            ));
        }

        if catalog.find(&request.course_code).is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownCourse,
                format!("Requested course '{}' is not in the catalog", request.course_code),
            ));
        }
    }

    into_result(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, GridConfig, Section};

    fn sample_catalog(grid: &TimeGrid) -> Catalog {
        Catalog::default()
            .with_course(
                Course::new("CS101")
                    .with_section(Section::lecture(grid, "CS101", "1", "Kim", vec![0, 1]).unwrap())
                    .with_section(Section::lecture(grid, "CS101", "2", "Lee", vec![15]).unwrap()),
            )
            .with_course(
                Course::new("MA201")
                    .with_section(Section::lecture(grid, "MA201", "1", "Park", vec![2]).unwrap()),
            )
    }

    #[test]
    fn test_valid_catalog() {
        let grid = TimeGrid::default();
        assert!(validate_catalog(&sample_catalog(&grid), &grid).is_ok());
    }

    #[test]
    fn test_duplicate_course_code() {
        let grid = TimeGrid::default();
        let catalog = sample_catalog(&grid).with_course(
            Course::new("CS101")
                .with_section(Section::lecture(&grid, "CS101", "9", "Kim", vec![3]).unwrap()),
        );

        let errors = validate_catalog(&catalog, &grid).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("course")));
    }

    #[test]
    fn test_duplicate_section_id() {
        let grid = TimeGrid::default();
        let catalog = Catalog::default().with_course(
            Course::new("CS101")
                .with_section(Section::lecture(&grid, "CS101", "1", "Kim", vec![0]).unwrap())
                .with_section(Section::lecture(&grid, "CS101", "1", "Lee", vec![1]).unwrap()),
        );

        let errors = validate_catalog(&catalog, &grid).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("CS101-1"));
    }

    #[test]
    fn test_empty_course() {
        let grid = TimeGrid::default();
        let catalog = Catalog::default().with_course(Course::new("EMPTY"));

        let errors = validate_catalog(&catalog, &grid).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptyCourse));
    }

    #[test]
    fn test_mask_width_mismatch() {
        // Eight days need four chunks instead of three.
        let wide = TimeGrid::new(
            GridConfig::default().with_days(["D1", "D2", "D3", "D4", "D5", "D6", "D7", "D8"]),
        )
        .unwrap();
        let grid = TimeGrid::default();
        assert_ne!(wide.chunk_count(), grid.chunk_count());

        let catalog = Catalog::default().with_course(
            Course::new("CS101")
                .with_section(Section::lecture(&wide, "CS101", "1", "Kim", vec![0]).unwrap()),
        );
        let errors = validate_catalog(&catalog, &grid).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::MaskWidthMismatch));
    }

    #[test]
    fn test_valid_requests() {
        let grid = TimeGrid::default();
        let requests = vec![
            CourseRequest::any("CS101"),
            CourseRequest::instructor("MA201", "Park"),
        ];
        assert!(validate_requests(&requests, &sample_catalog(&grid)).is_ok());
    }

    #[test]
    fn test_request_errors() {
        let grid = TimeGrid::default();
        let requests = vec![
            CourseRequest::any("CS101"),
            CourseRequest::section("CS101", "CS101-2"),
            CourseRequest::any("XX999"),
        ];

        let errors = validate_requests(&requests, &sample_catalog(&grid)).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateRequest);
        assert_eq!(errors[1].kind, ValidationErrorKind::UnknownCourse);
    }
}
