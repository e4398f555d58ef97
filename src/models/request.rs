//! User course requests.
//!
//! A request names a course and a filter narrowing which of its
//! sections are eligible. The JSON shape is the one the request-list
//! import/export uses:
//!
//! ```json
//! { "courseCode": "CS101", "filterType": "teacher", "filterValue": "Kim" }
//! ```

use serde::{Deserialize, Serialize};

use super::section::Section;
use crate::error::{Result, TimetableError};

/// Which sections of a course a request accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum SectionFilter {
    /// Every section.
    #[default]
    Any,
    /// Only the section with this id.
    Section(String),
    /// Only sections taught by this instructor.
    Instructor(String),
}

impl SectionFilter {
    /// Whether `section` passes the filter.
    pub fn accepts(&self, section: &Section) -> bool {
        match self {
            SectionFilter::Any => true,
            SectionFilter::Section(id) => section.id == *id,
            SectionFilter::Instructor(name) => section.instructor == *name,
        }
    }

    #[inline]
    pub fn is_any(&self) -> bool {
        matches!(self, SectionFilter::Any)
    }
}

/// A course the user wants in their timetable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCourseRequest", into = "RawCourseRequest")]
pub struct CourseRequest {
    pub course_code: String,
    pub filter: SectionFilter,
}

impl CourseRequest {
    /// Request accepting any section.
    pub fn any(course_code: impl Into<String>) -> Self {
        Self {
            course_code: course_code.into(),
            filter: SectionFilter::Any,
        }
    }

    /// Request locked to one section id.
    pub fn section(course_code: impl Into<String>, section_id: impl Into<String>) -> Self {
        Self {
            course_code: course_code.into(),
            filter: SectionFilter::Section(section_id.into()),
        }
    }

    /// Request locked to one instructor.
    pub fn instructor(course_code: impl Into<String>, instructor: impl Into<String>) -> Self {
        Self {
            course_code: course_code.into(),
            filter: SectionFilter::Instructor(instructor.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCourseRequest {
    course_code: String,
    #[serde(default = "default_filter_type")]
    filter_type: String,
    #[serde(default)]
    filter_value: Option<String>,
}

fn default_filter_type() -> String {
    "any".to_string()
}

impl TryFrom<RawCourseRequest> for CourseRequest {
    type Error = TimetableError;

    fn try_from(raw: RawCourseRequest) -> Result<Self> {
        let missing = |kind: &str| TimetableError::InvalidFilter {
            course_code: raw.course_code.clone(),
            reason: format!("filter type '{kind}' requires a filter value"),
        };

        let filter = match raw.filter_type.as_str() {
            "any" => SectionFilter::Any,
            "section" => {
                SectionFilter::Section(raw.filter_value.clone().ok_or_else(|| missing("section"))?)
            }
            "teacher" => {
                SectionFilter::Instructor(raw.filter_value.clone().ok_or_else(|| missing("teacher"))?)
            }
            other => {
                return Err(TimetableError::InvalidFilter {
                    course_code: raw.course_code.clone(),
                    reason: format!("unknown filter type '{other}'"),
                })
            }
        };

        Ok(Self {
            course_code: raw.course_code,
            filter,
        })
    }
}

impl From<CourseRequest> for RawCourseRequest {
    fn from(req: CourseRequest) -> Self {
        let (filter_type, filter_value) = match req.filter {
            SectionFilter::Any => ("any", None),
            SectionFilter::Section(id) => ("section", Some(id)),
            SectionFilter::Instructor(name) => ("teacher", Some(name)),
        };
        Self {
            course_code: req.course_code,
            filter_type: filter_type.to_string(),
            filter_value,
        }
    }
}

/// The exported request list: `{ "selectedCourses": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestList {
    pub selected_courses: Vec<CourseRequest>,
}

impl RequestList {
    pub fn new(selected_courses: Vec<CourseRequest>) -> Self {
        Self { selected_courses }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses an exported request list.
    ///
    /// # Errors
    /// `InvalidFormat` when `selectedCourses` is missing or not an array;
    /// `InvalidFilter` for a malformed entry.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let entries = value
            .get("selectedCourses")
            .and_then(|v| v.as_array())
            .ok_or_else(|| TimetableError::InvalidFormat("missing 'selectedCourses' array".into()))?;

        let selected_courses = entries
            .iter()
            .map(|entry| {
                let raw: RawCourseRequest = serde_json::from_value(entry.clone())?;
                CourseRequest::try_from(raw)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { selected_courses })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeGrid;

    #[test]
    fn test_filter_accepts() {
        let grid = TimeGrid::default();
        let s = Section::lecture(&grid, "CS101", "2", "Kim", vec![0]).unwrap();
        assert!(SectionFilter::Any.accepts(&s));
        assert!(SectionFilter::Section("CS101-2".into()).accepts(&s));
        assert!(!SectionFilter::Section("CS101-1".into()).accepts(&s));
        assert!(SectionFilter::Instructor("Kim".into()).accepts(&s));
        assert!(!SectionFilter::Instructor("Lee".into()).accepts(&s));
    }

    #[test]
    fn test_json_shape() {
        let req = CourseRequest::instructor("CS101", "Kim");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"courseCode": "CS101", "filterType": "teacher", "filterValue": "Kim"})
        );

        let any = serde_json::to_value(CourseRequest::any("MA201")).unwrap();
        assert_eq!(any["filterType"], "any");
        assert!(any["filterValue"].is_null());
    }

    #[test]
    fn test_request_list_round_trip() {
        let list = RequestList::new(vec![
            CourseRequest::any("MA201"),
            CourseRequest::section("CS101", "CS101-3"),
            CourseRequest::instructor("PH110", "Park"),
        ]);
        let json = list.to_json().unwrap();
        assert!(json.contains("selectedCourses"));
        assert_eq!(RequestList::from_json(&json).unwrap(), list);
    }

    #[test]
    fn test_import_rejects_missing_array() {
        assert!(matches!(
            RequestList::from_json(r#"{"courses": []}"#),
            Err(TimetableError::InvalidFormat(_))
        ));
        assert!(matches!(
            RequestList::from_json(r#"{"selectedCourses": 3}"#),
            Err(TimetableError::InvalidFormat(_))
        ));
        assert!(matches!(
            RequestList::from_json("not json"),
            Err(TimetableError::Serialization(_))
        ));
    }

    #[test]
    fn test_import_rejects_bad_filter() {
        let missing_value =
            r#"{"selectedCourses":[{"courseCode":"A","filterType":"section","filterValue":null}]}"#;
        assert!(matches!(
            RequestList::from_json(missing_value),
            Err(TimetableError::InvalidFilter { .. })
        ));

        let unknown = r#"{"selectedCourses":[{"courseCode":"A","filterType":"room"}]}"#;
        assert!(matches!(
            RequestList::from_json(unknown),
            Err(TimetableError::InvalidFilter { .. })
        ));
    }

    #[test]
    fn test_missing_filter_type_defaults_to_any() {
        let list = RequestList::from_json(r#"{"selectedCourses":[{"courseCode":"A"}]}"#).unwrap();
        assert_eq!(list.selected_courses, vec![CourseRequest::any("A")]);
    }
}
