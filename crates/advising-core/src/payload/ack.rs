use serde::{Deserialize, Serialize};

use crate::fetch::ApiPayload;

/// A write acknowledgement: `{success, message}` with nothing else of use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Ack {}

impl ApiPayload for Ack {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForgotPasswordRequest {
    pub matric_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactGuardianRequest {
    pub message_body: String,
    pub subject: String,
    pub is_urgent: bool,
}

/// Body of `POST /api/lecturer/submit-grade`. `gpa` is sent as `null` when blank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeSubmission {
    pub student_id: String,
    pub course_id: String,
    pub grade: String,
    pub semester: String,
    pub gpa: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_grade_submission_sends_null_gpa() {
        let body = GradeSubmission {
            student_id: "42".into(),
            course_id: "7".into(),
            grade: "A".into(),
            semester: "2023/2024 - Semester 1".into(),
            gpa: None,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"student_id": "42", "course_id": "7", "grade": "A",
                   "semester": "2023/2024 - Semester 1", "gpa": null})
        );
    }
}
