use serde::{Deserialize, Serialize};

use super::lenient;
use crate::fetch::ApiPayload;

/// A course row, enrolled or outstanding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseSummary {
    pub code: Option<String>,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_i64")]
    pub units: Option<i64>,
    pub grade: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub semester: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub level: Option<String>,
}

/// `GET /api/student/courses-overview`
///
/// This endpoint does not always send a success flag.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CoursesOverview {
    #[serde(default, deserialize_with = "lenient::optional_f64")]
    pub cgpa: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_i64")]
    pub outstanding_courses_count: Option<i64>,
    #[serde(default)]
    pub enrolled_courses: Vec<CourseSummary>,
    #[serde(default)]
    pub outstanding_courses: Vec<CourseSummary>,
}

impl ApiPayload for CoursesOverview {
    const REQUIRES_SUCCESS_FLAG: bool = false;
}

impl CoursesOverview {
    /// The explicit count, or the length of the outstanding list.
    pub fn outstanding_count(&self) -> i64 {
        self.outstanding_courses_count
            .unwrap_or(self.outstanding_courses.len() as i64)
    }
}
