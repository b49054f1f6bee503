//! Access to the backend REST API.
//!
//! Services talk to the backend through [`ApiTransport`] so they can be
//! exercised against in-process fakes; [`HttpApiClient`] is the reqwest-backed
//! implementation used by the binary.

use async_trait::async_trait;
use serde_json::Value;

pub mod errors;
pub mod http;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod request;

pub use errors::{ApiError, ApiResult, classify_response};
pub use http::HttpApiClient;
pub use request::{ApiRequest, AuthPolicy, HttpMethod};

#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Sends one request and returns the decoded JSON body.
    async fn request(&self, request: ApiRequest) -> ApiResult<Value>;
}
