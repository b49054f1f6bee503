use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, Method};
use serde_json::Value;

use crate::api::errors::{ApiError, ApiResult, classify_response};
use crate::api::request::{ApiRequest, AuthPolicy, HttpMethod};
use crate::api::ApiTransport;
use crate::session::SessionStore;

/// reqwest-backed client that signs requests with the stored credential.
#[derive(Clone)]
pub struct HttpApiClient {
    http: Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl HttpApiClient {
    /// Creates a client for `base_url`.
    ///
    /// Without `timeout` a request that never answers stays pending.
    pub fn new(
        base_url: impl Into<String>,
        session: Arc<dyn SessionStore>,
        timeout: Option<Duration>,
    ) -> ApiResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|err| ApiError::Configuration(format!("Failed to create HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path_and_query: &str) -> String {
        format!("{}/{}", self.base_url, path_and_query.trim_start_matches('/'))
    }

    /// Builds the outgoing request, attaching the bearer token when one is stored.
    pub fn build_request(&self, request: &ApiRequest) -> ApiResult<reqwest::Request> {
        let credential = self.session.credential();
        if request.auth == AuthPolicy::Required && credential.is_none() {
            return Err(ApiError::AuthMissing);
        }

        let method = match request.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        };
        let url = self.url_for(&request.path_and_query()?);

        let mut builder = self
            .http
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(credential) = credential {
            builder = builder.bearer_auth(credential.access_token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        builder
            .build()
            .map_err(|err| ApiError::Configuration(format!("Failed to build request: {err}")))
    }
}

#[async_trait]
impl ApiTransport for HttpApiClient {
    async fn request(&self, request: ApiRequest) -> ApiResult<Value> {
        let outgoing = self.build_request(&request)?;
        debug!("{} {}", request.method.as_str(), outgoing.url());

        let response = self.http.execute(outgoing).await.map_err(|err| {
            warn!("No response for {} {}: {err}", request.method.as_str(), request.path);
            ApiError::Network(err.to_string())
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| ApiError::Network(format!("Failed to read response body: {err}")))?;

        classify_response(status, &body).inspect_err(|err| {
            warn!("{} {} failed: {err}", request.method.as_str(), request.path);
        })
    }
}
