use serde::{Deserialize, Serialize};

use super::lenient;
use crate::fetch::ApiPayload;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviseeResult {
    pub course_code: Option<String>,
    pub course_title: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_i64")]
    pub course_units: Option<i64>,
    pub semester: Option<String>,
    pub grade: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_f64")]
    pub grade_points: Option<f64>,
}

/// `GET /api/lecturer/advisees/{id}/results`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AdviseeResults {
    pub student_name: Option<String>,
    #[serde(default)]
    pub results: Vec<AdviseeResult>,
}

impl ApiPayload for AdviseeResults {}
