//! Official results, read from the document database.
//!
//! The student's `results` documents and the full `courses` collection are
//! fetched concurrently, then each result is decorated with its course by
//! `courseId`. Results whose course is missing are still shown.

use std::sync::Arc;

use advising_core::document::{
    CollectionQuery, Document, DocumentStore, SortDirection, collections, index_by_id,
    resolve_join,
};
use advising_core::fetch::FetchError;
use advising_core::payload::{CourseRecord, ResultRecord};
use advising_core::session::{SessionGuard, UserRole};
use advising_core::view::{FALLBACK, decimal_or_fallback, integer_or_fallback, text_or_fallback};

use crate::context::{AppContext, Landing};
use crate::error::{PageError, PageResult};
use crate::render::{Cell, TableLayout, Tone};

pub const PAGE: &str = "student/results.html";

pub const RESULTS_TABLE: &str = "results-table-body";

const PERMISSION_MESSAGE: &str = "You do not have permission to view these results.";
const UNAVAILABLE_MESSAGE: &str = "The results service is currently unavailable. Please try again later.";
const LOAD_FAILED: &str = "Failed to load results. Please check your connection or try again.";

/// A result row after the course join.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub code: String,
    pub title: String,
    pub units: String,
    pub semester: String,
    pub grade: String,
    pub gpa: String,
}

fn layout() -> TableLayout<ResultRow> {
    TableLayout::<ResultRow>::new("No official academic results found.")
        .column("Course Code", |r| Cell::text(&r.code))
        .column("Course Title", |r| Cell::text(&r.title))
        .column("Units", |r| Cell::text(&r.units))
        .column("Semester", |r| Cell::text(&r.semester))
        .column("Grade", |r| Cell::text(&r.grade))
        .column("Grade Points", |r| Cell::text(&r.gpa))
}

/// Joins results with course records. Every result yields exactly one row.
pub fn join_rows(results: Vec<ResultRecord>, courses: Vec<(String, CourseRecord)>) -> Vec<ResultRow> {
    let index = index_by_id(courses);
    resolve_join(results, &index, |r| r.course_id.as_deref())
        .into_iter()
        .map(|joined| {
            let course = joined.secondary;
            let result = joined.primary;
            ResultRow {
                code: text_or_fallback(course.and_then(|c| c.code.as_deref())),
                title: text_or_fallback(course.and_then(|c| c.title.as_deref())),
                units: course
                    .map(|c| integer_or_fallback(c.units))
                    .unwrap_or_else(|| FALLBACK.to_string()),
                semester: text_or_fallback(result.semester.as_deref()),
                grade: text_or_fallback(result.grade.as_deref()),
                gpa: decimal_or_fallback(result.gpa),
            }
        })
        .collect()
}

pub struct StudentResultsPage {
    ctx: Arc<AppContext>,
}

impl StudentResultsPage {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self { ctx }
    }

    pub async fn load(&self) -> PageResult<()> {
        let guard = SessionGuard::for_role(UserRole::Student).requiring_account_id();
        let session = self.ctx.enter_page(PAGE, &guard).await?;
        let documents = self.ctx.documents()?;
        let account_id = session.account_id.clone().ok_or(PageError::NotLoaded)?;

        let layout = layout();
        let loading = self
            .ctx
            .renderer()
            .placeholder_row(layout.colspan(), "Loading results...", Tone::Loading)?;
        self.ctx.with_surface(|s| s.set_html(RESULTS_TABLE, loading)).await;

        let fetch = fetch_rows(documents.as_ref(), &session.token, &account_id);
        let html = match self.ctx.land(RESULTS_TABLE, fetch).await {
            Landing::Fresh(rows) => {
                tracing::debug!(rows = rows.len(), "results joined");
                self.ctx.renderer().table(&layout, &rows)?
            }
            Landing::Failed(e) => self.ctx.renderer().placeholder_row(
                layout.colspan(),
                &failure_message(&e),
                Tone::Error,
            )?,
            Landing::Stale => return Ok(()),
        };
        self.ctx.with_surface(|s| s.set_html(RESULTS_TABLE, html)).await;
        Ok(())
    }

    pub async fn logout(&self) -> PageResult<()> {
        self.ctx.logout().await
    }
}

async fn fetch_rows(
    documents: &dyn DocumentStore,
    token: &str,
    account_id: &str,
) -> Result<Vec<ResultRow>, FetchError> {
    let query = CollectionQuery::new(collections::RESULTS)
        .where_eq("studentId", account_id)
        .order_by("semester", SortDirection::Descending);

    let (results, courses) = tokio::join!(
        documents.query(token, &query),
        documents.list(token, collections::COURSES)
    );
    let results: Vec<ResultRecord> = Document::decode_all(&results?)?
        .into_iter()
        .map(|(_, record)| record)
        .collect();
    let courses = Document::decode_all::<CourseRecord>(&courses?)?;

    Ok(join_rows(results, courses))
}

fn failure_message(error: &FetchError) -> String {
    match error {
        FetchError::Unauthorized { .. } => PERMISSION_MESSAGE.to_string(),
        FetchError::Status { status: 503, .. } => UNAVAILABLE_MESSAGE.to_string(),
        other => other.inline_message(LOAD_FAILED),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(course_id: Option<&str>, gpa: Option<f64>) -> ResultRecord {
        ResultRecord {
            student_id: Some("student_3".into()),
            course_id: course_id.map(str::to_string),
            grade: Some("B".into()),
            semester: Some("2023/2024 First".into()),
            gpa,
        }
    }

    #[test]
    fn test_join_keeps_unmatched_results() {
        let courses = vec![(
            "12".to_string(),
            CourseRecord {
                code: Some("CSC 201".into()),
                title: Some("Data Structures".into()),
                units: Some(3),
            },
        )];
        let rows = join_rows(
            vec![result(Some("12"), Some(3.5)), result(Some("99"), None)],
            courses,
        );

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].code, "CSC 201");
        assert_eq!(rows[0].units, "3");
        assert_eq!(rows[0].gpa, "3.50");
        assert_eq!(rows[1].code, "N/A");
        assert_eq!(rows[1].title, "N/A");
        assert_eq!(rows[1].units, "N/A");
        assert_eq!(rows[1].grade, "B");
        assert_eq!(rows[1].gpa, "N/A");
    }

    #[test]
    fn test_failure_messages() {
        let denied = FetchError::Unauthorized {
            message: "denied".into(),
        };
        assert_eq!(failure_message(&denied), PERMISSION_MESSAGE);

        let down = FetchError::Status {
            status: 503,
            message: "down".into(),
        };
        assert_eq!(failure_message(&down), UNAVAILABLE_MESSAGE);

        assert_eq!(
            failure_message(&FetchError::Decode("bad".into())),
            LOAD_FAILED
        );
    }
}
