//! Download client for published Euler-pole model tables.

use std::fs;
use std::path::Path;

use reqwest::blocking::Client;

use crate::error::{AppError, ErrorKind};

const ENV_MODEL_URL: &str = "PALEOLAT_MODEL_URL";

/// Fetches a model CSV over HTTP(S).
pub struct ModelClient {
    client: Client,
    url: String,
}

impl ModelClient {
    /// Client for an explicit model URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    /// Client for the URL in `PALEOLAT_MODEL_URL` (a `.env` file is honored).
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let url = std::env::var(ENV_MODEL_URL).map_err(|_| {
            AppError::new(
                ErrorKind::Load,
                format!("Missing {ENV_MODEL_URL} in environment (.env)."),
            )
        })?;
        Ok(Self::new(url))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Download the model table and return its text.
    pub fn fetch_model(&self) -> Result<String, AppError> {
        let response = self.client.get(&self.url).send().map_err(|e| {
            AppError::new(ErrorKind::Load, format!("Model download failed: {e}"))
        })?;

        if !response.status().is_success() {
            return Err(AppError::new(
                ErrorKind::Load,
                format!("Model download failed: HTTP {} from {}", response.status(), self.url),
            ));
        }

        response.text().map_err(|e| {
            AppError::new(
                ErrorKind::Load,
                format!("Model download failed while reading the body: {e}"),
            )
        })
    }

    /// Download the model table to a local file.
    pub fn fetch_model_to(&self, path: &Path) -> Result<(), AppError> {
        let text = self.fetch_model()?;
        fs::write(path, text).map_err(|e| {
            AppError::new(
                ErrorKind::Load,
                format!("Failed to write model table '{}': {e}", path.display()),
            )
        })
    }
}
