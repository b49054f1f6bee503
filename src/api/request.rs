use serde::Serialize;
use serde_json::Value;

use crate::api::errors::{ApiError, ApiResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// Whether a request may be sent without a stored credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPolicy {
    /// Attach the bearer token when one is stored, send anyway otherwise.
    Optional,
    /// Fail with [`ApiError::AuthMissing`] before sending when no token is stored.
    Required,
}

/// A single call against the backend, relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub auth: AuthPolicy,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            query: Vec::new(),
            body: None,
            auth: AuthPolicy::Optional,
        }
    }

    pub fn post<B: Serialize>(path: impl Into<String>, body: &B) -> ApiResult<Self> {
        let body = serde_json::to_value(body)
            .map_err(|err| ApiError::Configuration(format!("Failed to encode body: {err}")))?;
        Ok(Self {
            method: HttpMethod::Post,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
            auth: AuthPolicy::Optional,
        })
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn require_auth(mut self) -> Self {
        self.auth = AuthPolicy::Required;
        self
    }

    /// Path with the URL-encoded query string appended.
    pub fn path_and_query(&self) -> ApiResult<String> {
        if self.query.is_empty() {
            return Ok(self.path.clone());
        }
        let encoded = serde_html_form::to_string(&self.query)
            .map_err(|err| ApiError::Configuration(format!("Failed to encode query: {err}")))?;
        Ok(format!("{}?{}", self.path, encoded))
    }
}
