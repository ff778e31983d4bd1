//! Student courses overview: CGPA, outstanding count and two course tables.

use std::sync::Arc;

use advising_core::fetch::Endpoint;
use advising_core::payload::{CourseSummary, CoursesOverview};
use advising_core::session::{SessionGuard, UserRole};
use advising_core::view::{decimal_or_fallback, integer_or_fallback, text_or_fallback};

use crate::context::{AppContext, Landing};
use crate::error::PageResult;
use crate::render::{Cell, TableLayout, Tone};

pub const PAGE: &str = "student/courses.html";

pub const USER_NAME: &str = "user-name";
pub const CGPA_DISPLAY: &str = "cgpa-display";
pub const OUTSTANDING_COUNT: &str = "outstanding-courses-count";
pub const ENROLLED_TABLE: &str = "enrolled-courses-table-body";
pub const OUTSTANDING_TABLE: &str = "outstanding-courses-table-body";

/// Epoch container covering both tables, which share one fetch.
const OVERVIEW: &str = "courses-overview";
const UNKNOWN_SUMMARY: &str = "--";

fn text(value: &Option<String>) -> Cell {
    Cell::text(text_or_fallback(value.as_deref()))
}

fn enrolled_layout() -> TableLayout<CourseSummary> {
    TableLayout::<CourseSummary>::new("No enrolled courses found.")
        .column("Course Code", |c| text(&c.code))
        .column("Course Title", |c| text(&c.title))
        .column("Units", |c| Cell::text(integer_or_fallback(c.units)))
        .column("Grade", |c| text(&c.grade))
        .column("Semester", |c| text(&c.semester))
}

fn outstanding_layout() -> TableLayout<CourseSummary> {
    TableLayout::<CourseSummary>::new("No outstanding courses found.")
        .column("Course Code", |c| text(&c.code))
        .column("Course Title", |c| text(&c.title))
        .column("Units", |c| Cell::text(integer_or_fallback(c.units)))
        .column("Level", |c| text(&c.level))
        .column("Semester", |c| text(&c.semester))
}

pub struct StudentCoursesPage {
    ctx: Arc<AppContext>,
}

impl StudentCoursesPage {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self { ctx }
    }

    pub async fn load(&self) -> PageResult<()> {
        let session = self
            .ctx
            .enter_page(PAGE, &SessionGuard::for_role(UserRole::Student))
            .await?;

        let enrolled = enrolled_layout();
        let outstanding = outstanding_layout();
        let renderer = self.ctx.renderer();
        let loading = renderer.placeholder_row(enrolled.colspan(), "Loading courses...", Tone::Loading)?;
        let name = session.display_name.clone();
        self.ctx
            .with_surface(|s| {
                s.set_text(USER_NAME, name);
                s.set_text(CGPA_DISPLAY, UNKNOWN_SUMMARY);
                s.set_text(OUTSTANDING_COUNT, UNKNOWN_SUMMARY);
                s.set_html(ENROLLED_TABLE, loading.clone());
                s.set_html(OUTSTANDING_TABLE, loading);
            })
            .await;

        let fetch = self
            .ctx
            .rest()
            .get::<CoursesOverview>(&Endpoint::CoursesOverview, Some(&session.token));

        match self.ctx.land(OVERVIEW, fetch).await {
            Landing::Fresh(reply) => {
                let overview = reply.payload;
                let enrolled_html = renderer.table(&enrolled, &overview.enrolled_courses)?;
                let outstanding_html = renderer.table(&outstanding, &overview.outstanding_courses)?;
                let cgpa = decimal_or_fallback(overview.cgpa);
                let count = overview.outstanding_count().to_string();
                self.ctx
                    .with_surface(|s| {
                        s.set_text(CGPA_DISPLAY, cgpa);
                        s.set_text(OUTSTANDING_COUNT, count);
                        s.set_html(ENROLLED_TABLE, enrolled_html);
                        s.set_html(OUTSTANDING_TABLE, outstanding_html);
                    })
                    .await;
            }
            Landing::Failed(e) => {
                let message = e.inline_message("Failed to load enrolled courses.");
                let enrolled_html =
                    renderer.placeholder_row(enrolled.colspan(), &message, Tone::Error)?;
                let outstanding_html =
                    renderer.placeholder_row(outstanding.colspan(), &message, Tone::Error)?;
                self.ctx
                    .with_surface(|s| {
                        s.set_html(ENROLLED_TABLE, enrolled_html);
                        s.set_html(OUTSTANDING_TABLE, outstanding_html);
                    })
                    .await;
            }
            Landing::Stale => {}
        }
        Ok(())
    }

    pub async fn logout(&self) -> PageResult<()> {
        self.ctx.logout().await
    }
}
