use serde_json::Value;

use crate::api::{ApiClient, ApiError};

pub async fn check(client: &ApiClient) -> Result<Value, ApiError> {
    client.get("/health").await
}
