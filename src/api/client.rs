use chrono::Utc;
use reqwest::multipart::{Form, Part};
use tracing::{debug, info};

use super::ApiError;
use crate::config::ClientConfig;
use crate::model::{ApiStatus, ClassificationResult, ClassifyResponse, SubmissionInput};

/// Thin wrapper over the two endpoints exposed by the classification service.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// `GET /`. Returns whether the service answered with a 2xx status.
    pub async fn probe(&self) -> Result<bool, ApiError> {
        let response = self.http.get(self.config.endpoint("")).send().await?;
        let status = response.status();

        if status.is_success() {
            if let Ok(body) = response.json::<ApiStatus>().await {
                debug!(message = ?body.message, status = ?body.status, "api status");
            }
        }

        Ok(status.is_success())
    }

    /// `POST /classify` with a multipart body carrying `text` or `file`.
    pub async fn classify(
        &self,
        input: &SubmissionInput,
    ) -> Result<ClassificationResult, ApiError> {
        let form = build_form(input)?;
        let response = self
            .http
            .post(self.config.endpoint("classify"))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        info!(status = status.as_u16(), bytes = body.len(), "classify response");

        if !status.is_success() {
            let detail = serde_json::from_slice::<ClassifyResponse>(&body)
                .ok()
                .and_then(|parsed| parsed.detail_message());
            return Err(ApiError::Http {
                status: status.as_u16(),
                detail,
            });
        }

        let parsed: ClassifyResponse = serde_json::from_slice(&body)?;
        into_result(parsed)
    }
}

fn build_form(input: &SubmissionInput) -> Result<Form, ApiError> {
    let form = match input {
        SubmissionInput::Text(text) => Form::new().text("text", text.clone()),
        SubmissionInput::File(file) => {
            let part = Part::bytes(file.bytes.clone())
                .file_name(file.filename.clone())
                .mime_str(file.mime_type())?;
            Form::new().part("file", part)
        }
    };
    Ok(form)
}

fn into_result(body: ClassifyResponse) -> Result<ClassificationResult, ApiError> {
    if !body.success {
        return Err(ApiError::Unsuccessful);
    }

    Ok(ClassificationResult {
        category: body.category.ok_or(ApiError::MissingField("category"))?,
        response: body.response.ok_or(ApiError::MissingField("response"))?,
        preview: body.original_text,
        received_at: Utc::now(),
    })
}
