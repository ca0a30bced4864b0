use serde_json::Value;

use crate::api::{ApiClient, ApiError};

/// Everything the backend holds, across both data stores
pub async fn all_data(client: &ApiClient) -> Result<Value, ApiError> {
    client.get("/api/sync/all-data").await
}
