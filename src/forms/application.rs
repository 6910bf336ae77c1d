// src/forms/application.rs
//! Job application form and its submission state machine.
//!
//! Status moves `Idle -> Submitting -> Success | Error` and only `reset`
//! goes back to `Idle`. Leaving `Submitting` requires the `PendingSubmission`
//! token that `begin_submit` hands out, so a result can never be recorded
//! for a submission that was not started.

use thiserror::Error;
use tracing::{info, warn};

use crate::core::service_client::{EnhancementService, ServiceError};
use crate::render::{render_result, ResultView};
use crate::types::{ApplicationPayload, EnhancementResult, ResumeFile};

pub const JSON_EXPORT_NAME: &str = "enhanced-resume.json";
pub const LATEX_EXPORT_NAME: &str = "resume-latex.tex";
pub const PDF_REQUIRED: &str = "Please upload a PDF file";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationField {
    JobDescription,
    CompanyName,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationErrors {
    pub job_description: Option<String>,
    pub company_name: Option<String>,
    pub resume: Option<String>,
}

impl ApplicationErrors {
    pub fn is_empty(&self) -> bool {
        self.job_description.is_none() && self.company_name.is_none() && self.resume.is_none()
    }

    pub fn len(&self) -> usize {
        [&self.job_description, &self.company_name, &self.resume]
            .iter()
            .filter(|e| e.is_some())
            .count()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Success(EnhancementResult),
    Error(String),
}

impl SubmissionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Success(_) => "success",
            Self::Error(_) => "error",
        }
    }
}

/// Proof that a submission is in flight. Consumed by `finish`.
#[derive(Debug)]
#[must_use = "an in-flight submission must be finished"]
pub struct PendingSubmission {
    generation: u64,
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SubmitRefused {
    #[error("a submission is already in progress")]
    InFlight,
    #[error("the form must be reset before submitting again")]
    NotIdle,
    #[error("the form has validation errors")]
    Invalid,
}

/// A file offered to the user for saving
#[derive(Debug, Clone, PartialEq)]
pub struct Download {
    pub file_name: &'static str,
    pub media_type: &'static str,
    pub contents: String,
}

#[derive(Debug, Clone, Default)]
pub struct ApplicationForm {
    job_description: String,
    company_name: String,
    resume: Option<ResumeFile>,
    file_name: String,
    errors: ApplicationErrors,
    status: SubmissionStatus,
    // Bumped by `reset` so results of abandoned submissions are dropped
    generation: u64,
}

impl ApplicationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: ApplicationField, value: impl Into<String>) {
        if self.is_submitting() {
            return;
        }
        let value = value.into();
        match field {
            ApplicationField::JobDescription => self.job_description = value,
            ApplicationField::CompanyName => self.company_name = value,
        }
    }

    pub fn value(&self, field: ApplicationField) -> &str {
        match field {
            ApplicationField::JobDescription => &self.job_description,
            ApplicationField::CompanyName => &self.company_name,
        }
    }

    /// Pick a resume. Files not reported as PDF are flagged right away and
    /// never get a display name.
    pub fn select_resume(&mut self, file: ResumeFile) {
        if self.is_submitting() {
            return;
        }

        if file.is_pdf() {
            self.file_name = file.file_name.clone();
            self.errors.resume = None;
        } else {
            warn!(
                "Rejected resume {} with media type {:?}",
                file.file_name, file.media_type
            );
            self.file_name.clear();
            self.errors.resume = Some(PDF_REQUIRED.to_string());
        }
        self.resume = Some(file);
    }

    pub fn resume(&self) -> Option<&ResumeFile> {
        self.resume.as_ref()
    }

    /// Name of the accepted resume, empty when none is accepted
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn errors(&self) -> &ApplicationErrors {
        &self.errors
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.status, SubmissionStatus::Submitting)
    }

    pub fn result(&self) -> Option<&EnhancementResult> {
        match &self.status {
            SubmissionStatus::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            SubmissionStatus::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Recompute every field error; true when the form may be submitted
    pub fn validate(&mut self) -> bool {
        let resume = match &self.resume {
            None => Some("Resume is required".to_string()),
            Some(file) if !file.is_pdf() => Some(PDF_REQUIRED.to_string()),
            Some(_) => None,
        };

        self.errors = ApplicationErrors {
            job_description: blank_check(&self.job_description, "Job description is required"),
            company_name: blank_check(&self.company_name, "Company name is required"),
            resume,
        };
        self.errors.is_empty()
    }

    /// Move `Idle -> Submitting` and build the payload to send.
    pub fn begin_submit(&mut self) -> Result<(PendingSubmission, ApplicationPayload), SubmitRefused> {
        match self.status {
            SubmissionStatus::Submitting => return Err(SubmitRefused::InFlight),
            SubmissionStatus::Success(_) | SubmissionStatus::Error(_) => {
                return Err(SubmitRefused::NotIdle)
            }
            SubmissionStatus::Idle => {}
        }

        if !self.validate() {
            info!("Application form has {} field error(s)", self.errors.len());
            return Err(SubmitRefused::Invalid);
        }
        let Some(resume) = self.resume.clone() else {
            return Err(SubmitRefused::Invalid);
        };

        let payload = ApplicationPayload {
            job_description: self.job_description.clone(),
            company_name: self.company_name.clone(),
            resume,
        };

        self.status = SubmissionStatus::Submitting;
        info!("Submission started for {}", payload.company_name);
        Ok((
            PendingSubmission {
                generation: self.generation,
            },
            payload,
        ))
    }

    /// Record the outcome of the submission started by `pending`.
    ///
    /// Outcomes of a submission abandoned by `reset` are discarded.
    pub fn finish(
        &mut self,
        pending: PendingSubmission,
        outcome: Result<EnhancementResult, ServiceError>,
    ) -> &SubmissionStatus {
        if pending.generation != self.generation || !self.is_submitting() {
            warn!("Discarding outcome of an abandoned submission");
            return &self.status;
        }

        self.status = match outcome {
            Ok(result) => {
                info!("Submission succeeded");
                SubmissionStatus::Success(result)
            }
            Err(e) => {
                warn!("Submission failed: {}", e);
                SubmissionStatus::Error(format!(
                    "Failed to enhance resume: {}. Please try again.",
                    e
                ))
            }
        };
        &self.status
    }

    /// Validate, send once, and record the outcome
    pub async fn submit<S>(&mut self, service: &S) -> Result<&SubmissionStatus, SubmitRefused>
    where
        S: EnhancementService + ?Sized,
    {
        let (pending, payload) = self.begin_submit()?;
        let outcome = service.enhance(&payload).await;
        Ok(self.finish(pending, outcome))
    }

    /// Back to a blank idle form, whatever the current state
    pub fn reset(&mut self) {
        *self = Self {
            generation: self.generation + 1,
            ..Self::default()
        };
    }

    /// Result screen for a successful submission
    pub fn view(&self) -> Option<ResultView> {
        self.result().map(render_result)
    }

    /// `enhanced_content` as pretty-printed JSON
    pub fn download_json(&self) -> Option<Download> {
        let result = self.result()?;
        let contents = serde_json::to_string_pretty(&result.enhanced_content).ok()?;
        Some(Download {
            file_name: JSON_EXPORT_NAME,
            media_type: "application/json",
            contents,
        })
    }

    /// The LaTeX source, verbatim, when the service returned one
    pub fn download_latex(&self) -> Option<Download> {
        let latex = self.result()?.latex()?;
        Some(Download {
            file_name: LATEX_EXPORT_NAME,
            media_type: "text/plain",
            contents: latex.to_string(),
        })
    }
}

fn blank_check(value: &str, message: &str) -> Option<String> {
    if value.trim().is_empty() {
        Some(message.to_string())
    } else {
        None
    }
}
