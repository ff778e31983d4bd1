use advising_application::PageResult;
use advising_application::pages::lecturer_dashboard::{
    CONTACT_BODY, CONTACT_SUBJECT, CONTACT_URGENT, NOTE_CONTENT,
};
use advising_application::pages::{
    ForgotPasswordPage, LecturerDashboardPage, SubmitGradePage, forgot_password, submit_grade,
};
use advising_core::form::FormOutcome;
use anyhow::Result;

use super::Client;

pub struct GradeFields {
    pub student_id: String,
    pub course_id: String,
    pub grade: String,
    pub semester: String,
    pub gpa: Option<String>,
}

pub async fn forgot_password(client: &Client, matric: &str) -> Result<()> {
    let ctx = client.ctx();
    let page = ForgotPasswordPage::new(ctx.clone());
    let result = async {
        page.load().await?;
        ctx.fill(forgot_password::MATRIC_NUMBER, matric).await;
        page.submit().await
    }
    .await;
    report(client, result).await
}

pub async fn submit_grade(client: &Client, fields: GradeFields) -> Result<()> {
    let ctx = client.ctx();
    let page = SubmitGradePage::new(ctx.clone());
    let result = async {
        page.load().await?;
        let gpa = fields.gpa.as_deref().unwrap_or_default();
        for (id, value) in [
            (submit_grade::STUDENT_ID, fields.student_id.as_str()),
            (submit_grade::COURSE_ID, fields.course_id.as_str()),
            (submit_grade::GRADE, fields.grade.as_str()),
            (submit_grade::SEMESTER, fields.semester.as_str()),
            (submit_grade::GPA, gpa),
        ] {
            ctx.fill(id, value).await;
        }
        page.submit().await
    }
    .await;
    report(client, result).await
}

pub async fn add_note(client: &Client, student_id: &str, content: &str) -> Result<()> {
    let ctx = client.ctx();
    let page = LecturerDashboardPage::new(ctx.clone());
    let result = async {
        page.load().await?;
        page.prepare_add_note(student_id).await;
        ctx.fill(NOTE_CONTENT, content).await;
        page.submit_note().await
    }
    .await;
    report(client, result).await
}

pub async fn contact_guardian(
    client: &Client,
    advisee_id: &str,
    subject: Option<String>,
    message: &str,
    urgent: bool,
) -> Result<()> {
    let ctx = client.ctx();
    let page = LecturerDashboardPage::new(ctx.clone());
    let result = async {
        page.load().await?;
        page.open_contact_guardian(advisee_id).await?;
        if let Some(subject) = &subject {
            ctx.fill(CONTACT_SUBJECT, subject).await;
        }
        ctx.fill(CONTACT_BODY, message).await;
        ctx.fill(CONTACT_URGENT, if urgent { "true" } else { "false" }).await;
        page.submit_contact_guardian().await
    }
    .await;
    let outcome = report(client, result).await;
    page.settle_auto_close().await;
    outcome
}

async fn report(client: &Client, result: PageResult<FormOutcome>) -> Result<()> {
    let result = result.map(|outcome| {
        let icon = if outcome.is_success() { "✅" } else { "❌" };
        println!("{icon} {}", outcome.message());
    });
    client.finish(result).await
}
