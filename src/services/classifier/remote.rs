use crate::config::DemoConfig;
use crate::error::AppError;
use crate::models::classify_types::{ErrorState, GenreResponse};
use crate::models::queue_types::PendingFile;
use crate::services::audio_files;
use crate::services::classifier::GenreClassifier;
use log::{debug, warn};
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;

/// Classifier backed by the HTTP prediction endpoint.
#[derive(Clone)]
pub struct RemoteClassifier {
    client: reqwest::Client,
    endpoint: String,
    field_name: String,
}

impl RemoteClassifier {
    pub fn new(config: &DemoConfig) -> Result<Self, AppError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| AppError {
            message: format!("Failed to create HTTP client: {}", e),
        })?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: reqwest::Client, config: &DemoConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            field_name: config.field_name.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_form(&self, file: &PendingFile) -> Result<Form, ErrorState> {
        let mut part = Part::stream_with_length(file.content.clone(), file.size()).file_name(file.name.clone());
        if let Some(mime) = audio_files::audio_mime(&file.name) {
            part = part
                .mime_str(mime)
                .map_err(|e| ErrorState::Message(e.to_string()))?;
        }
        Ok(Form::new().part(self.field_name.clone(), part))
    }
}

impl GenreClassifier for RemoteClassifier {
    async fn classify(&self, file: &PendingFile) -> Result<String, ErrorState> {
        let form = self.build_form(file)?;
        debug!("Uploading {} ({} bytes) to {}", file.name, file.size(), self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ErrorState::Message(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!("Could not read error body from {} for {}: {}", self.endpoint, file.name, e);
                    String::new()
                }
            };
            return Err(remote_error(status, &body));
        }

        let parsed: GenreResponse = response
            .json()
            .await
            .map_err(|e| ErrorState::Message(format!("Malformed prediction response: {}", e)))?;
        Ok(parsed.genre)
    }
}

/// Error bodies are echoed as-is: JSON when they parse, raw text otherwise.
fn remote_error(status: StatusCode, body: &str) -> ErrorState {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return ErrorState::Message(format!("Request failed with status code {}", status.as_u16()));
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(value) => ErrorState::Remote(value),
        Err(_) => ErrorState::Remote(serde_json::Value::String(trimmed.to_string())),
    }
}
