//! Mock transport for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;
use serde_json::Value;

use crate::api::{ApiRequest, ApiResult, ApiTransport};

mock! {
    pub Transport {}

    #[async_trait]
    impl ApiTransport for Transport {
        async fn request(&self, request: ApiRequest) -> ApiResult<Value>;
    }
}
