use async_trait::async_trait;
use phishscope_core::{DetectionVerdict, FeatureVector, Fingerprint};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::service::{DetectionService, FingerprintService};
use crate::types::{DetectRequest, FingerprintRequest};

/// JSON-over-HTTP transport shared by both endpoint clients.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self::with_client(
            config.base_url.clone(),
            config.build_http_client()?,
        ))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;

        self.handle_response(path, response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        path: &str,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(path, status = status.as_u16(), "Backend returned non-success status");
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Client for `POST /fingerprint`.
#[derive(Clone)]
pub struct FingerprintClient {
    api: ApiClient,
}

impl FingerprintClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(ApiClient::from_config(config)?))
    }
}

#[async_trait]
impl FingerprintService for FingerprintClient {
    async fn fingerprint(&self, url: &str) -> Result<Fingerprint> {
        if url.trim().is_empty() {
            return Err(ClientError::InvalidRequest("url is empty".to_string()));
        }

        debug!(base_url = %self.api.base_url(), "Requesting fingerprint");
        let fingerprint: Fingerprint = self
            .api
            .post_json("/fingerprint", &FingerprintRequest::new(url))
            .await?;
        debug!(prefix = %fingerprint.prefix, "Fingerprint received");

        Ok(fingerprint)
    }
}

/// Client for `POST /detect`.
#[derive(Clone)]
pub struct DetectionClient {
    api: ApiClient,
}

impl DetectionClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(ApiClient::from_config(config)?))
    }
}

#[async_trait]
impl DetectionService for DetectionClient {
    async fn detect(&self, prefix: &str, features: &FeatureVector) -> Result<DetectionVerdict> {
        if prefix.trim().is_empty() {
            return Err(ClientError::InvalidRequest("prefix is empty".to_string()));
        }

        debug!(
            prefix,
            reputation_only = features.is_zeroed(),
            "Requesting detection"
        );
        let request = DetectRequest::new(prefix, features.clone());
        let verdict: DetectionVerdict = self.api.post_json("/detect", &request).await?;
        verdict.validate()?;

        debug!(
            prefix,
            result = verdict.result.as_str(),
            method = verdict.method.as_str(),
            confidence = verdict.confidence,
            "Detection verdict received"
        );
        Ok(verdict)
    }
}
