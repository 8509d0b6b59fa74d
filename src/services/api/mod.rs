//! REST client for the roadtrip backend.

pub mod error;
pub mod routes;

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::Method;

use crate::models::config::AppConfig;
use crate::models::step::Roadtrip;

pub use error::ApiError;
pub use routes::{ApiRequest, HttpMethod};

/// Calls the planning grid makes against the backend.
///
/// Implementations block; callers run them off the UI thread.
#[cfg_attr(test, mockall::automock)]
pub trait PlanningBackend: Send + Sync {
    /// Load a roadtrip with its steps, accommodations and activities.
    fn fetch_roadtrip(&self, roadtrip_id: &str) -> Result<Roadtrip, ApiError>;

    /// Send a mutation (move or edit). Any 2xx status is success; the response
    /// body is not inspected.
    fn send(&self, request: &ApiRequest) -> Result<(), ApiError>;
}

pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .context("Failed to build backend HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
            token: config.api_token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build(&self, request: &ApiRequest) -> RequestBuilder {
        let method = match request.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
        };

        let mut builder = self
            .client
            .request(method, format!("{}{}", self.base_url, request.path));

        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        builder
    }

    fn execute(&self, request: &ApiRequest) -> Result<Response, ApiError> {
        log::debug!("{} {}", request.method.as_str(), request.path);

        let response = self.build(request).send()?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

impl PlanningBackend for ApiClient {
    fn fetch_roadtrip(&self, roadtrip_id: &str) -> Result<Roadtrip, ApiError> {
        let response = self.execute(&ApiRequest::roadtrip(roadtrip_id))?;
        let body = response.text()?;
        serde_json::from_str(&body).map_err(|err| ApiError::Decode(err.to_string()))
    }

    fn send(&self, request: &ApiRequest) -> Result<(), ApiError> {
        self.execute(request).map(|_| ())
    }
}
