//! Document-database records.

use serde::{Deserialize, Serialize};

use super::lenient;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegreeRef {
    pub name: Option<String>,
    pub faculty: Option<String>,
}

/// A `users` document. Students and lecturers share the collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub role: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub matric_number: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub degree: Option<DegreeRef>,
    #[serde(default, deserialize_with = "lenient::optional_f64")]
    pub gpa: Option<f64>,
    #[serde(rename = "advisorId")]
    pub advisor_id: Option<String>,
    pub guardian_name: Option<String>,
    pub guardian_email: Option<String>,
    pub guardian_phone: Option<String>,
    pub guardian_relationship: Option<String>,
    pub department: Option<String>,
    pub office_location: Option<String>,
}

impl UserProfile {
    pub fn advisor_id(&self) -> Option<&str> {
        self.advisor_id.as_deref().filter(|id| !id.trim().is_empty())
    }
}

/// A `results` document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    #[serde(rename = "studentId", default, deserialize_with = "lenient::optional_text")]
    pub student_id: Option<String>,
    /// Stored as an integer in some documents; normalised to the string form
    /// used by `courses` document ids.
    #[serde(rename = "courseId", default, deserialize_with = "lenient::optional_text")]
    pub course_id: Option<String>,
    pub grade: Option<String>,
    pub semester: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_f64")]
    pub gpa: Option<f64>,
}

/// A `courses` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub code: Option<String>,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_i64")]
    pub units: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_result_course_id_normalised() {
        let record: ResultRecord =
            serde_json::from_value(json!({"studentId": "s1", "courseId": 12, "gpa": 4})).unwrap();
        assert_eq!(record.course_id.as_deref(), Some("12"));
        assert_eq!(record.gpa, Some(4.0));
    }

    #[test]
    fn test_profile_advisor_and_degree() {
        let profile: UserProfile = serde_json::from_value(json!({
            "name": "Ada Obi",
            "advisorId": "",
            "degree": {"name": "B.Sc. Computer Science", "faculty": "Science"}
        }))
        .unwrap();
        assert_eq!(profile.advisor_id(), None);
        assert_eq!(
            profile.degree.and_then(|d| d.faculty).as_deref(),
            Some("Science")
        );
    }
}
