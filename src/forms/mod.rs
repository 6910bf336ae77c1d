// src/forms/mod.rs
//! Form state: field values, per-field errors and submission rules

pub mod application;
pub mod credentials;

pub use application::{
    ApplicationErrors, ApplicationField, ApplicationForm, Download, PendingSubmission,
    SubmissionStatus, SubmitRefused,
};
pub use credentials::{
    LoginErrors, LoginField, LoginForm, RegisterErrors, RegisterField, RegisterForm,
};

/// Result of pressing a form's submit control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    Invalid,
}

fn required(value: &str, message: &str) -> Option<String> {
    if value.is_empty() {
        Some(message.to_string())
    } else {
        None
    }
}
