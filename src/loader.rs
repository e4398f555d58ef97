//! Course data loading.
//!
//! Parses the department-grouped course file and hydrates every section
//! against a [`TimeGrid`]:
//!
//! ```json
//! [{
//!   "deptCode": "CS", "deptName": "Computer Science",
//!   "courses": [{
//!     "code": "CS101", "name": "Intro",
//!     "sections": [{ "num": 1, "instructor": "Kim", "lectures": [0, 1], "labs": [30] }]
//!   }]
//! }]
//! ```
//!
//! Section ids become `"{code}-{num}"`; `num` may be a string or integer.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::models::{Catalog, Course, Section, TimeGrid};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDepartment {
    dept_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    dept_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    courses: Vec<RawCourse>,
}

#[derive(Debug, Deserialize)]
struct RawCourse {
    code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    sections: Vec<RawSection>,
}

#[derive(Debug, Deserialize)]
struct RawSection {
    num: SectionNumber,
    #[serde(default, deserialize_with = "null_as_default")]
    instructor: String,
    #[serde(default, deserialize_with = "null_as_default")]
    lectures: Vec<usize>,
    #[serde(default, deserialize_with = "null_as_default")]
    labs: Vec<usize>,
}

/// Reads an explicit `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SectionNumber {
    Int(u64),
    Text(String),
}

impl SectionNumber {
    fn into_string(self) -> String {
        match self {
            SectionNumber::Int(n) => n.to_string(),
            SectionNumber::Text(s) => s,
        }
    }
}

/// A department and the codes of the courses it offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub code: String,
    pub name: String,
    pub course_codes: Vec<String>,
}

/// Browsing structure plus the flat catalog the generator consumes.
#[derive(Debug, Clone, Default)]
pub struct LoadedCatalog {
    pub departments: Vec<Department>,
    pub catalog: Catalog,
}

/// Parses department-grouped course data.
///
/// # Errors
/// `Serialization` for malformed JSON; `BlockOutOfRange` for a block
/// outside `grid`.
pub fn load_catalog(json: &str, grid: &TimeGrid) -> Result<LoadedCatalog> {
    let raw: Vec<RawDepartment> = serde_json::from_str(json)?;
    let mut loaded = LoadedCatalog::default();

    for dept in raw {
        let mut course_codes = Vec::with_capacity(dept.courses.len());
        for raw_course in dept.courses {
            let sections = raw_course
                .sections
                .into_iter()
                .map(|s| {
                    Section::new(
                        grid,
                        raw_course.code.as_str(),
                        s.num.into_string(),
                        s.instructor,
                        s.lectures,
                        s.labs,
                    )
                })
                .collect::<Result<Vec<_>>>()?;

            course_codes.push(raw_course.code.clone());
            loaded.catalog.courses.push(
                Course::new(raw_course.code)
                    .with_name(raw_course.name)
                    .with_sections(sections),
            );
        }
        loaded.departments.push(Department {
            code: dept.dept_code,
            name: dept.dept_name,
            course_codes,
        });
    }

    debug!(
        departments = loaded.departments.len(),
        courses = loaded.catalog.len(),
        "catalog loaded"
    );
    Ok(loaded)
}
