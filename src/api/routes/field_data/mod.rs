//! CRUD over `/api/field-data`

pub mod public;

use serde_json::Value;

use crate::api::{ApiClient, ApiError};
use public::FieldDataRecord;

fn record_path(id: &str) -> Result<String, ApiError> {
    if id.trim().is_empty() {
        return Err(ApiError::validation("Field data id is required"));
    }
    Ok(format!("/api/field-data/{}", urlencoding::encode(id)))
}

pub async fn list(client: &ApiClient) -> Result<Vec<Value>, ApiError> {
    client.get("/api/field-data").await
}

pub async fn get(client: &ApiClient, id: &str) -> Result<Value, ApiError> {
    client.get(&record_path(id)?).await
}

pub async fn create(client: &ApiClient, record: &FieldDataRecord) -> Result<Value, ApiError> {
    record.validate()?;
    client.post("/api/field-data", record).await
}

pub async fn update(
    client: &ApiClient,
    id: &str,
    record: &FieldDataRecord,
) -> Result<Value, ApiError> {
    let path = record_path(id)?;
    record.validate()?;
    client.put(&path, record).await
}

pub async fn delete(client: &ApiClient, id: &str) -> Result<Value, ApiError> {
    client.delete(&record_path(id)?).await
}
