use serde::{Deserialize, Serialize};

use super::lenient;
use super::resources::Resource;
use crate::fetch::ApiPayload;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LecturerInfo {
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub office_location: Option<String>,
}

/// One row of the lecturer's advisee list, guardian contact included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisee {
    #[serde(deserialize_with = "lenient::id_string")]
    pub id: String,
    pub name: Option<String>,
    pub matric_number: Option<String>,
    pub email: Option<String>,
    pub degree: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_f64")]
    pub gpa: Option<f64>,
    pub guardian_name: Option<String>,
    pub guardian_email: Option<String>,
    pub guardian_phone: Option<String>,
    pub guardian_relationship: Option<String>,
}

impl Advisee {
    pub fn has_guardian_email(&self) -> bool {
        self.guardian_email
            .as_deref()
            .is_some_and(|e| !e.trim().is_empty())
    }
}

/// `GET /api/lecturer/data`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LecturerData {
    pub lecturer_info: Option<LecturerInfo>,
    #[serde(default)]
    pub advisees: Vec<Advisee>,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

impl ApiPayload for LecturerData {}
