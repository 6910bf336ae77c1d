// src/core/service_client.rs
//! HTTP client for the resume enhancement service

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::types::{ApplicationPayload, EnhancementResult};

pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:5000/enhance-resume";

/// Why a submission did not produce a result. The `Display` text is the
/// reason shown to the user.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ServiceError {
    #[error("API error: {0}")]
    Status(u16),
    #[error("{0}")]
    Transport(String),
    #[error("invalid response from service: {0}")]
    Decode(String),
    #[error("could not prepare request: {0}")]
    Request(String),
}

/// Anything able to turn an application payload into an enhancement result
#[async_trait]
pub trait EnhancementService: Send + Sync {
    async fn enhance(&self, payload: &ApplicationPayload)
        -> Result<EnhancementResult, ServiceError>;
}

pub struct ServiceClient {
    client: reqwest::Client,
    endpoint: String,
}

impl ServiceClient {
    /// Create a client for the given endpoint. No timeout is configured: a
    /// submission either resolves or fails at the transport level.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_form(payload: &ApplicationPayload) -> Result<Form, ServiceError> {
        let resume = Part::bytes(payload.resume.bytes.clone())
            .file_name(payload.resume.file_name.clone())
            .mime_str(&payload.resume.media_type)
            .map_err(|e| ServiceError::Request(e.to_string()))?;

        Ok(Form::new()
            .text("jd", payload.job_description.clone())
            .text("company", payload.company_name.clone())
            .part("resume", resume))
    }
}

#[async_trait]
impl EnhancementService for ServiceClient {
    async fn enhance(
        &self,
        payload: &ApplicationPayload,
    ) -> Result<EnhancementResult, ServiceError> {
        let form = Self::build_form(payload)?;

        info!(
            "Calling enhancement service: {} (company: {}, resume: {})",
            self.endpoint, payload.company_name, payload.resume.file_name
        );

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!("Enhancement request failed: {}", e);
                ServiceError::Transport(e.to_string())
            })?;

        let status = response.status();
        info!("Enhancement service responded with {}", status);

        if !status.is_success() {
            error!("Enhancement service error status: {}", status);
            return Err(ServiceError::Status(status.as_u16()));
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        debug!("Raw enhancement response: {}", response_text);

        serde_json::from_str(&response_text).map_err(|e| {
            error!("Failed to decode enhancement response: {}", e);
            ServiceError::Decode(e.to_string())
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResumeFile;
    use axum::extract::Multipart;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    async fn spawn_service(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/enhance-resume", addr)
    }

    /// Echoes what it received so tests can inspect the multipart body
    async fn echo_handler(mut multipart: Multipart) -> Json<Value> {
        let mut received = serde_json::Map::new();
        while let Some(field) = multipart.next_field().await.unwrap() {
            let name = field.name().unwrap_or_default().to_string();
            if name == "resume" {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let len = field.bytes().await.unwrap().len();
                received.insert(
                    name,
                    json!(format!("{}|{}|{}", file_name, content_type, len)),
                );
            } else {
                received.insert(name, json!(field.text().await.unwrap()));
            }
        }

        Json(json!({
            "enhanced_content": {"Skills": {"Languages": "Go, Rust"}},
            "matching_keywords": [received["jd"], received["company"]],
            "recommendations": [received["resume"]],
            "latex_code": "\\section{Skills}"
        }))
    }

    fn payload() -> ApplicationPayload {
        ApplicationPayload {
            job_description: "Rust backend engineer".to_string(),
            company_name: "Acme".to_string(),
            resume: ResumeFile::new("resume.pdf", b"%PDF-1.7 test".to_vec()),
        }
    }

    #[tokio::test]
    async fn test_enhance_sends_multipart_fields() {
        let url = spawn_service(Router::new().route("/enhance-resume", post(echo_handler))).await;
        let client = ServiceClient::new(url).unwrap();

        let result = client.enhance(&payload()).await.unwrap();

        assert_eq!(
            result.matching_keywords.unwrap(),
            ["Rust backend engineer", "Acme"]
        );
        assert_eq!(
            result.recommendations.unwrap(),
            ["resume.pdf|application/pdf|13"]
        );
        assert_eq!(result.latex_code.as_deref(), Some("\\section{Skills}"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_reported_with_code() {
        let router = Router::new().route(
            "/enhance-resume",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let client = ServiceClient::new(spawn_service(router).await).unwrap();

        let err = client.enhance(&payload()).await.unwrap_err();

        assert_eq!(err, ServiceError::Status(500));
        assert_eq!(err.to_string(), "API error: 500");
    }

    #[tokio::test]
    async fn test_form_error_state_end_to_end() {
        use crate::forms::{ApplicationField, ApplicationForm};

        let router = Router::new().route(
            "/enhance-resume",
            post(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
        let client = ServiceClient::new(spawn_service(router).await).unwrap();
        let mut form = ApplicationForm::new();
        form.set(ApplicationField::JobDescription, "Rust backend engineer");
        form.set(ApplicationField::CompanyName, "Acme");
        form.select_resume(ResumeFile::new("resume.pdf", b"%PDF".to_vec()));

        let status = form.submit(&client).await.unwrap();
        assert_eq!(status.label(), "error");
        assert!(form.error_message().unwrap().contains("503"));
    }

    #[tokio::test]
    async fn test_loosely_typed_extras_still_succeed_end_to_end() {
        use crate::forms::{ApplicationField, ApplicationForm};

        let router = Router::new().route(
            "/enhance-resume",
            post(|| async {
                Json(json!({
                    "enhanced_content": {"Skills": {"Languages": "Go"}},
                    "matching_keywords": "rust, tokio",
                    "recommendations": [{"area": "Summary", "tip": "Quantify impact"}],
                    "latex_code": 42
                }))
            }),
        );
        let client = ServiceClient::new(spawn_service(router).await).unwrap();
        let mut form = ApplicationForm::new();
        form.set(ApplicationField::JobDescription, "Rust backend engineer");
        form.set(ApplicationField::CompanyName, "Acme");
        form.select_resume(ResumeFile::new("resume.pdf", b"%PDF".to_vec()));

        let status = form.submit(&client).await.unwrap();
        assert_eq!(status.label(), "success");

        let result = form.result().unwrap();
        assert_eq!(result.enhanced_content, Some(json!({"Skills": {"Languages": "Go"}})));
        assert!(result.keywords().is_none());
        assert!(result.recommendations().is_none());
        assert!(form.download_latex().is_none());
    }

    #[tokio::test]
    async fn test_unusable_media_type_fails_before_sending() {
        let mut payload = payload();
        payload.resume = payload.resume.with_media_type("not a media type");
        let client = ServiceClient::new(DEFAULT_SERVICE_URL).unwrap();

        let err = client.enhance(&payload).await.unwrap_err();
        assert!(matches!(err, ServiceError::Request(_)));
        assert!(err.to_string().starts_with("could not prepare request"));
    }

    #[tokio::test]
    async fn test_non_json_body_is_a_decode_error() {
        let router = Router::new().route("/enhance-resume", post(|| async { "<html>oops</html>" }));
        let client = ServiceClient::new(spawn_service(router).await).unwrap();

        let err = client.enhance(&payload()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_a_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ServiceClient::new(format!("http://{}/enhance-resume", addr)).unwrap();
        let err = client.enhance(&payload()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Transport(_)));
    }
}
