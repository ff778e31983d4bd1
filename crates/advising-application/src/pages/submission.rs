//! Submit flow shared by every modal and inline form.

use advising_core::fetch::{FetchError, Reply};
use advising_core::form::{FormOutcome, FormState};
use tokio::sync::Mutex;

use crate::context::AppContext;
use crate::error::PageResult;

/// Attribute on a status element describing how to style its text.
pub const TONE_ATTRIBUTE: &str = "data-tone";

/// One form's status area and submit control, driven through [`FormState`].
pub(crate) struct Submission<'a> {
    ctx: &'a AppContext,
    state: &'a Mutex<FormState>,
    status: &'static str,
    submit: &'static str,
}

impl<'a> Submission<'a> {
    pub(crate) fn new(
        ctx: &'a AppContext,
        state: &'a Mutex<FormState>,
        status: &'static str,
        submit: &'static str,
    ) -> Self {
        Self {
            ctx,
            state,
            status,
            submit,
        }
    }

    /// Enters validation. Refused while a submission is in flight.
    pub(crate) async fn begin(&self) -> PageResult<()> {
        self.state.lock().await.begin()?;
        self.show("", None).await;
        Ok(())
    }

    /// Validation failed: show why and go back to idle without a request.
    pub(crate) async fn reject(&self, error: FetchError) -> FormOutcome {
        let message = error.inline_message("Please check the form and try again.");
        self.state.lock().await.finish();
        self.show(&message, Some("error")).await;
        FormOutcome::Failed { message }
    }

    pub(crate) async fn start(&self, progress: &str) -> PageResult<()> {
        self.state.lock().await.start_submitting()?;
        let submit = self.submit;
        self.ctx.with_surface(|s| s.set_disabled(submit, true)).await;
        self.show(progress, Some("pending")).await;
        Ok(())
    }

    /// Settles the reply, re-enables the submit control and reports the outcome.
    pub(crate) async fn complete<T>(
        &self,
        result: Result<Reply<T>, FetchError>,
        success_fallback: &str,
        failure_fallback: &str,
    ) -> FormOutcome {
        let outcome = match self.ctx.settle(result).await {
            Ok(reply) => FormOutcome::Succeeded {
                message: reply
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| success_fallback.to_string()),
            },
            Err(e) => {
                tracing::warn!(status = self.status, error = %e, "submission failed");
                FormOutcome::Failed {
                    message: e.inline_message(failure_fallback),
                }
            }
        };

        self.state.lock().await.finish();
        let submit = self.submit;
        self.ctx.with_surface(|s| s.set_disabled(submit, false)).await;
        let tone = if outcome.is_success() { "success" } else { "error" };
        self.show(outcome.message(), Some(tone)).await;
        outcome
    }

    async fn show(&self, message: &str, tone: Option<&str>) {
        let status = self.status;
        self.ctx
            .with_surface(|s| {
                s.set_text(status, message);
                match tone {
                    Some(tone) => s.set_attribute(status, TONE_ATTRIBUTE, tone),
                    None => s.remove_attribute(status, TONE_ATTRIBUTE),
                }
            })
            .await;
    }
}
