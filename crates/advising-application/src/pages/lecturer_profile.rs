//! Lecturer profile card.

use std::sync::Arc;

use advising_core::fetch::{Endpoint, FetchError};
use advising_core::payload::LecturerData;
use advising_core::session::{SessionGuard, UserRole};
use advising_core::view::text_or_fallback;

use crate::context::{AppContext, Landing};
use crate::error::PageResult;
use crate::render::Tone;

pub const PAGE: &str = "lecturer/profile.html";

pub const PROFILE_CARD: &str = "lecturer-profile-card";
pub const PROFILE_NAME: &str = "profile-name";
pub const PROFILE_EMAIL: &str = "profile-email";
pub const PROFILE_DEPARTMENT: &str = "profile-department";
pub const PROFILE_OFFICE: &str = "profile-office";

pub struct LecturerProfilePage {
    ctx: Arc<AppContext>,
}

impl LecturerProfilePage {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self { ctx }
    }

    pub async fn load(&self) -> PageResult<()> {
        let session = self
            .ctx
            .enter_page(PAGE, &SessionGuard::for_role(UserRole::Lecturer))
            .await?;

        let rest = self.ctx.rest();
        let fetch = async {
            let reply = rest
                .get::<LecturerData>(&Endpoint::LecturerData, Some(&session.token))
                .await?;
            reply.payload.lecturer_info.ok_or_else(|| {
                FetchError::not_found("lecturer", "Lecturer information not found.")
            })
        };

        match self.ctx.land(PROFILE_CARD, fetch).await {
            Landing::Fresh(info) => {
                self.ctx
                    .with_surface(|s| {
                        s.set_text(PROFILE_NAME, text_or_fallback(info.name.as_deref()));
                        s.set_text(PROFILE_EMAIL, text_or_fallback(info.email.as_deref()));
                        s.set_text(
                            PROFILE_DEPARTMENT,
                            text_or_fallback(info.department.as_deref()),
                        );
                        s.set_text(
                            PROFILE_OFFICE,
                            text_or_fallback(info.office_location.as_deref()),
                        );
                    })
                    .await;
            }
            Landing::Failed(e) => {
                let message = format!(
                    "Could not load profile: {}",
                    e.inline_message("Lecturer information not found.")
                );
                let html = self.ctx.renderer().message(&message, Tone::Error)?;
                self.ctx.with_surface(|s| s.set_html(PROFILE_CARD, html)).await;
            }
            Landing::Stale => {}
        }
        Ok(())
    }

    pub async fn logout(&self) -> PageResult<()> {
        self.ctx.logout().await
    }
}
