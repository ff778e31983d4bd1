//! Modal and inline form submission state.
//!
//! `Idle -> Validating -> Submitting -> Idle`. A validation failure returns
//! straight to `Idle` without a request. While `Submitting` the submit action
//! is disabled and a second `begin` is refused.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("a submission is already in progress")]
    AlreadySubmitting,

    #[error("form must be validated before submitting")]
    NotValidated,
}

/// How a submission ended, with the message to show in the status area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Succeeded { message: String },
    Failed { message: String },
}

impl FormOutcome {
    pub fn message(&self) -> &str {
        match self {
            Self::Succeeded { message } | Self::Failed { message } => message,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormState {
    phase: FormPhase,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_submit_disabled(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    pub fn begin(&mut self) -> Result<(), FormError> {
        if self.phase == FormPhase::Submitting {
            return Err(FormError::AlreadySubmitting);
        }
        self.phase = FormPhase::Validating;
        Ok(())
    }

    pub fn start_submitting(&mut self) -> Result<(), FormError> {
        if self.phase != FormPhase::Validating {
            return Err(FormError::NotValidated);
        }
        self.phase = FormPhase::Submitting;
        Ok(())
    }

    /// Back to `Idle`, after success, failure or a rejected validation.
    pub fn finish(&mut self) {
        self.phase = FormPhase::Idle;
    }
}

/// Client-side field checks. Failures read exactly like remote failures.
pub mod validate {
    use crate::fetch::FetchError;

    /// Trimmed value, or a validation error when it is blank.
    pub fn required(value: &str, message: &str) -> Result<String, FetchError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(FetchError::validation(message));
        }
        Ok(trimmed.to_string())
    }

    /// Every value must be non-blank; one message covers them all.
    pub fn all_required(values: &[&str], message: &str) -> Result<(), FetchError> {
        if values.iter().any(|v| v.trim().is_empty()) {
            return Err(FetchError::validation(message));
        }
        Ok(())
    }

    /// Blank is `None`; anything else must parse as a finite number.
    pub fn optional_number(value: &str, message: &str) -> Result<Option<f64>, FetchError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(Some)
            .ok_or_else(|| FetchError::validation(message))
    }
}
