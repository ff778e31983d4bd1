//! Public password reset request.

use std::sync::Arc;

use advising_core::fetch::Endpoint;
use advising_core::form::{FormOutcome, FormState, validate};
use advising_core::payload::{Ack, ForgotPasswordRequest};
use tokio::sync::Mutex;

use super::submission::Submission;
use crate::context::AppContext;
use crate::error::PageResult;

pub const PAGE: &str = "forgot-password.html";

pub const MATRIC_NUMBER: &str = "matricNumber";
pub const MESSAGE: &str = "message-area";
pub const SUBMIT: &str = "reset-button";

pub struct ForgotPasswordPage {
    ctx: Arc<AppContext>,
    form: Mutex<FormState>,
}

impl ForgotPasswordPage {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self {
            ctx,
            form: Mutex::new(FormState::new()),
        }
    }

    pub async fn load(&self) -> PageResult<()> {
        self.ctx.enter_public_page(PAGE).await?;
        Ok(())
    }

    /// Requests reset instructions for the matriculation number in the form.
    /// The request carries no bearer credential.
    pub async fn submit(&self) -> PageResult<FormOutcome> {
        let flow = Submission::new(&self.ctx, &self.form, MESSAGE, SUBMIT);
        flow.begin().await?;

        let raw = self
            .ctx
            .with_surface(|s| s.value(MATRIC_NUMBER).to_string())
            .await;
        let matric_number = match validate::required(&raw, "Please enter your Matric Number.") {
            Ok(value) => value,
            Err(e) => return Ok(flow.reject(e).await),
        };

        flow.start("Sending reset instructions...").await?;
        let result = self
            .ctx
            .rest()
            .post::<_, Ack>(
                &Endpoint::ForgotPassword,
                None,
                &ForgotPasswordRequest { matric_number },
            )
            .await;
        let outcome = flow
            .complete(
                result,
                "Password reset instructions sent successfully.",
                "Failed to send reset email.",
            )
            .await;

        if outcome.is_success() {
            self.ctx.fill(MATRIC_NUMBER, "").await;
        }
        Ok(outcome)
    }
}
