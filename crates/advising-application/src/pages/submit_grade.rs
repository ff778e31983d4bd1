//! Grade entry form.

use std::sync::Arc;

use advising_core::fetch::{Endpoint, FetchError};
use advising_core::form::{FormOutcome, FormState, validate};
use advising_core::payload::{Ack, GradeSubmission};
use advising_core::session::{Session, SessionGuard, UserRole};
use tokio::sync::{Mutex, RwLock};

use super::submission::Submission;
use crate::context::AppContext;
use crate::error::{PageError, PageResult};

pub const PAGE: &str = "lecturer/submit-grade.html";

pub const FORM: &str = "submitGradeForm";
pub const STUDENT_ID: &str = "studentId";
pub const COURSE_ID: &str = "courseId";
pub const GRADE: &str = "grade";
pub const SEMESTER: &str = "semester";
pub const GPA: &str = "gpa";
pub const MESSAGE: &str = "submit-grade-message";
pub const SUBMIT: &str = "submit-grade-button";

const FIELDS: [&str; 5] = [STUDENT_ID, COURSE_ID, GRADE, SEMESTER, GPA];

pub struct SubmitGradePage {
    ctx: Arc<AppContext>,
    session: RwLock<Option<Session>>,
    form: Mutex<FormState>,
}

impl SubmitGradePage {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self {
            ctx,
            session: RwLock::new(None),
            form: Mutex::new(FormState::new()),
        }
    }

    pub async fn load(&self) -> PageResult<()> {
        let session = self
            .ctx
            .enter_page(PAGE, &SessionGuard::for_role(UserRole::Lecturer))
            .await?;
        *self.session.write().await = Some(session);
        Ok(())
    }

    pub async fn submit(&self) -> PageResult<FormOutcome> {
        let token = self
            .session
            .read()
            .await
            .as_ref()
            .map(|s| s.token.clone())
            .ok_or(PageError::NotLoaded)?;

        let flow = Submission::new(&self.ctx, &self.form, MESSAGE, SUBMIT);
        flow.begin().await?;

        let values = self
            .ctx
            .with_surface(|s| FIELDS.map(|id| s.value(id).to_string()))
            .await;
        let submission = match read_submission(&values) {
            Ok(submission) => submission,
            Err(e) => return Ok(flow.reject(e).await),
        };

        flow.start("Processing...").await?;
        tracing::debug!(course = %submission.course_id, "submitting grade");
        let result = self
            .ctx
            .rest()
            .post::<_, Ack>(&Endpoint::SubmitGrade, Some(&token), &submission)
            .await;
        let outcome = flow
            .complete(result, "Grade submitted successfully!", "Failed to submit grade.")
            .await;

        if outcome.is_success() {
            self.ctx
                .with_surface(|s| {
                    for id in FIELDS {
                        s.set_value(id, "");
                    }
                })
                .await;
        }
        Ok(outcome)
    }

    pub async fn logout(&self) -> PageResult<()> {
        self.ctx.logout().await
    }
}

fn read_submission(values: &[String; 5]) -> Result<GradeSubmission, FetchError> {
    let [student_id, course_id, grade, semester, gpa] = values;
    validate::all_required(
        &[
            student_id.as_str(),
            course_id.as_str(),
            grade.as_str(),
            semester.as_str(),
        ],
        "Student ID, Course ID, Grade, and Semester are required.",
    )?;
    let gpa = validate::optional_number(gpa, "Grade Points (GPA) must be a valid number if provided.")?;

    Ok(GradeSubmission {
        student_id: student_id.trim().to_string(),
        course_id: course_id.trim().to_string(),
        grade: grade.trim().to_string(),
        semester: semester.trim().to_string(),
        gpa,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(gpa: &str) -> [String; 5] {
        ["s1", "c9", "A", "First", gpa].map(str::to_string)
    }

    #[test]
    fn test_blank_gpa_is_null() {
        let submission = read_submission(&values("  ")).unwrap();
        assert_eq!(submission.gpa, None);
        assert_eq!(submission.grade, "A");
    }

    #[test]
    fn test_missing_required_field() {
        let mut fields = values("4.5");
        fields[2] = String::new();
        let err = read_submission(&fields).unwrap_err();
        assert_eq!(
            err.inline_message(""),
            "Student ID, Course ID, Grade, and Semester are required."
        );
    }

    #[test]
    fn test_non_numeric_gpa_rejected() {
        let err = read_submission(&values("four")).unwrap_err();
        assert_eq!(
            err.inline_message(""),
            "Grade Points (GPA) must be a valid number if provided."
        );
    }
}
