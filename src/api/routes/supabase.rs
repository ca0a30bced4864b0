//! Read-only passthrough to the Supabase tables

use serde_json::Value;

use crate::api::{ApiClient, ApiError};

pub async fn field_data(client: &ApiClient) -> Result<Value, ApiError> {
    client.get("/api/supabase/field-data").await
}

pub async fn users(client: &ApiClient) -> Result<Value, ApiError> {
    client.get("/api/supabase/users").await
}
