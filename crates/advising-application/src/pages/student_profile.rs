//! Student profile, read from the document database.
//!
//! The student's own `users` document fills the personal, academic and
//! guardian fields. A second get resolves the advisor named by `advisorId`.
//! A missing own document means the stored account id is wrong, so the page
//! reports it and ends the session.

use std::sync::Arc;

use advising_core::document::{DocumentStore, collections};
use advising_core::fetch::FetchError;
use advising_core::payload::UserProfile;
use advising_core::session::{SessionGuard, UserRole};
use advising_core::view::{decimal_or_fallback, text_or_fallback};

use crate::context::{AppContext, Landing};
use crate::error::{PageError, PageResult};
use crate::render::Tone;
use crate::surface::PageSurface;

pub const PAGE: &str = "student/profile.html";

pub const PROFILE_CARD: &str = "profile-details-card";
pub const FULL_NAME: &str = "profile-fullname";
pub const MATRIC_NUMBER: &str = "profile-matric-number";
pub const EMAIL: &str = "profile-email";
pub const DOB: &str = "profile-dob";
pub const GENDER: &str = "profile-gender";
pub const PHONE: &str = "profile-phone";
pub const ADDRESS: &str = "profile-address";
pub const DEGREE: &str = "profile-degree";
pub const FACULTY: &str = "profile-faculty";
pub const OVERALL_GPA: &str = "profile-overall-gpa";
pub const GUARDIAN_NAME: &str = "profile-guardian-name";
pub const GUARDIAN_EMAIL: &str = "profile-guardian-email";
pub const GUARDIAN_PHONE: &str = "profile-guardian-phone";
pub const GUARDIAN_RELATIONSHIP: &str = "profile-guardian-relationship";
pub const ADVISOR_NAME: &str = "profile-advisor-name";
pub const ADVISOR_EMAIL: &str = "profile-advisor-email";
pub const ADVISOR_DEPT: &str = "profile-advisor-dept";
pub const ADVISOR_OFFICE: &str = "profile-advisor-office";

const ADVISOR_BLOCK: &str = "profile-advisor";
const NOT_ASSIGNED: &str = "Not Assigned";
const ADVISOR_MISSING: &str = "Not Assigned / Profile Missing";
const PROFILE_MISSING: &str = "Your student profile could not be loaded. Please contact support.";
const LOAD_FAILED: &str =
    "Failed to load profile data. Please check your internet connection or try again later.";

pub struct StudentProfilePage {
    ctx: Arc<AppContext>,
}

impl StudentProfilePage {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self { ctx }
    }

    pub async fn load(&self) -> PageResult<()> {
        let guard = SessionGuard::for_role(UserRole::Student).requiring_account_id();
        let session = self.ctx.enter_page(PAGE, &guard).await?;
        let documents = self.ctx.documents()?;
        let account_id = session.account_id.clone().ok_or(PageError::NotLoaded)?;

        let fetch = fetch_profile(documents.as_ref(), &session.token, &account_id);
        let profile = match self.ctx.land(PROFILE_CARD, fetch).await {
            Landing::Fresh(profile) => profile,
            Landing::Failed(e) if e.is_not_found() => {
                tracing::warn!(account_id = %account_id, "student profile document missing");
                self.show_card_message(PROFILE_MISSING).await?;
                self.ctx.force_logout().await;
                return Ok(());
            }
            Landing::Failed(e) => {
                self.show_card_message(&e.inline_message(LOAD_FAILED)).await?;
                return Ok(());
            }
            Landing::Stale => return Ok(()),
        };

        self.ctx.with_surface(|s| paint_profile(s, &profile)).await;

        let Some(advisor_id) = profile.advisor_id() else {
            self.ctx
                .with_surface(|s| paint_advisor_placeholder(s, NOT_ASSIGNED))
                .await;
            return Ok(());
        };

        let fetch = documents.get(&session.token, collections::USERS, advisor_id);
        match self.ctx.land(ADVISOR_BLOCK, fetch).await {
            Landing::Fresh(Some(document)) => match document.decode::<UserProfile>() {
                Ok(advisor) => {
                    self.ctx.with_surface(|s| paint_advisor(s, &advisor)).await;
                }
                Err(e) => {
                    tracing::warn!(advisor_id, error = %e, "advisor document unreadable");
                    self.ctx
                        .with_surface(|s| paint_advisor_placeholder(s, ADVISOR_MISSING))
                        .await;
                }
            },
            Landing::Fresh(None) => {
                self.ctx
                    .with_surface(|s| paint_advisor_placeholder(s, ADVISOR_MISSING))
                    .await;
            }
            Landing::Failed(e) => {
                let message = e.inline_message("Could not load advisor details.");
                self.ctx
                    .with_surface(|s| paint_advisor_placeholder(s, &message))
                    .await;
            }
            Landing::Stale => {}
        }
        Ok(())
    }

    pub async fn logout(&self) -> PageResult<()> {
        self.ctx.logout().await
    }

    async fn show_card_message(&self, message: &str) -> PageResult<()> {
        let html = self.ctx.renderer().message(message, Tone::Error)?;
        self.ctx.with_surface(|s| s.set_html(PROFILE_CARD, html)).await;
        Ok(())
    }
}

async fn fetch_profile(
    documents: &dyn DocumentStore,
    token: &str,
    account_id: &str,
) -> Result<UserProfile, FetchError> {
    documents
        .get(token, collections::USERS, account_id)
        .await?
        .ok_or_else(|| FetchError::not_found("student profile", PROFILE_MISSING))?
        .decode()
}

fn paint_profile(surface: &mut PageSurface, profile: &UserProfile) {
    let degree = profile.degree.as_ref();
    let degree_name = degree
        .and_then(|d| d.name.as_deref())
        .filter(|n| !n.trim().is_empty())
        .unwrap_or(NOT_ASSIGNED);

    let fields = [
        (FULL_NAME, profile.name.as_deref()),
        (MATRIC_NUMBER, profile.matric_number.as_deref()),
        (EMAIL, profile.email.as_deref()),
        (DOB, profile.dob.as_deref()),
        (GENDER, profile.gender.as_deref()),
        (PHONE, profile.phone_number.as_deref()),
        (ADDRESS, profile.address.as_deref()),
        (FACULTY, degree.and_then(|d| d.faculty.as_deref())),
        (GUARDIAN_NAME, profile.guardian_name.as_deref()),
        (GUARDIAN_EMAIL, profile.guardian_email.as_deref()),
        (GUARDIAN_PHONE, profile.guardian_phone.as_deref()),
        (GUARDIAN_RELATIONSHIP, profile.guardian_relationship.as_deref()),
    ];
    for (id, value) in fields {
        surface.set_text(id, text_or_fallback(value));
    }
    surface.set_text(DEGREE, degree_name);
    surface.set_text(OVERALL_GPA, decimal_or_fallback(profile.gpa));
}

fn paint_advisor(surface: &mut PageSurface, advisor: &UserProfile) {
    surface.set_text(ADVISOR_NAME, text_or_fallback(advisor.name.as_deref()));
    surface.set_text(ADVISOR_EMAIL, text_or_fallback(advisor.email.as_deref()));
    surface.set_text(ADVISOR_DEPT, text_or_fallback(advisor.department.as_deref()));
    surface.set_text(
        ADVISOR_OFFICE,
        text_or_fallback(advisor.office_location.as_deref()),
    );
}

fn paint_advisor_placeholder(surface: &mut PageSurface, name: &str) {
    surface.set_text(ADVISOR_NAME, name);
    for id in [ADVISOR_EMAIL, ADVISOR_DEPT, ADVISOR_OFFICE] {
        surface.set_text(id, "");
    }
}
