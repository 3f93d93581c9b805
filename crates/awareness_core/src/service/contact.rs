//! Contact page submit flow.
//!
//! # Responsibility
//! - Validate the form and surface field errors inline.
//! - Send valid submissions through an injected transport.
//! - Reflect the outcome as a banner status.
//!
//! # Invariants
//! - Invalid input never reaches the transport.
//! - The form is cleared only after a successful send.
//! - `is_submitting` is false whenever `submit` returns.

use crate::model::contact::{ContactField, ContactForm, ContactSubmission, FieldErrors};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::thread;
use std::time::Duration;

/// Simulated send delay of the built-in transport.
pub const DEFAULT_SUBMIT_LATENCY: Duration = Duration::from_millis(2_000);

pub const SUCCESS_BANNER: &str =
    "Дякуємо! Ваше повідомлення успішно відправлено. Ми зв'яжемося з вами найближчим часом.";
pub const ERROR_BANNER: &str = "Виникла помилка при відправці повідомлення. Спробуйте ще раз.";

/// Transport failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError(pub String);

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "contact transport failed: {}", self.0)
    }
}

impl Error for TransportError {}

/// Delivery channel for contact submissions.
pub trait ContactTransport {
    fn send(&self, submission: &ContactSubmission) -> Result<(), TransportError>;
}

/// Transport that only waits; no message leaves the process.
#[derive(Debug, Clone)]
pub struct SimulatedTransport {
    latency: Duration,
    fail: bool,
}

impl SimulatedTransport {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            fail: false,
        }
    }

    /// Transport whose every send fails after the delay.
    pub fn failing(latency: Duration) -> Self {
        Self {
            latency,
            fail: true,
        }
    }
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMIT_LATENCY)
    }
}

impl ContactTransport for SimulatedTransport {
    fn send(&self, _submission: &ContactSubmission) -> Result<(), TransportError> {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
        if self.fail {
            return Err(TransportError("simulated failure".to_string()));
        }
        Ok(())
    }
}

/// Banner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Success,
    Error,
}

impl SubmitStatus {
    pub fn banner(self) -> Option<&'static str> {
        match self {
            Self::Idle => None,
            Self::Success => Some(SUCCESS_BANNER),
            Self::Error => Some(ERROR_BANNER),
        }
    }
}

/// Contact page state.
#[derive(Debug, Clone, Default)]
pub struct ContactPage {
    form: ContactForm,
    errors: FieldErrors,
    status: SubmitStatus,
    is_submitting: bool,
}

impl ContactPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_field(&mut self, field: ContactField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn field_error(&self, field: ContactField) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Validates and sends the form.
    ///
    /// Validation failures leave the banner untouched and only fill field
    /// errors; transport failures set the error banner.
    pub fn submit(&mut self, transport: &impl ContactTransport) -> SubmitStatus {
        let submission = match self.form.validate() {
            Ok(submission) => submission,
            Err(errors) => {
                info!(
                    "event=contact_submit module=contact status=invalid fields={}",
                    errors.len()
                );
                self.errors = errors;
                return self.status;
            }
        };

        self.errors.clear();
        self.is_submitting = true;
        self.status = SubmitStatus::Idle;

        self.status = match transport.send(&submission) {
            Ok(()) => {
                info!(
                    "event=contact_submit module=contact status=ok category={}",
                    submission.category.as_str()
                );
                self.form = ContactForm::default();
                SubmitStatus::Success
            }
            Err(err) => {
                error!("event=contact_submit module=contact status=error error={err}");
                SubmitStatus::Error
            }
        };
        self.is_submitting = false;
        self.status
    }
}
