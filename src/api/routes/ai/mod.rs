//! AI analysis endpoints under `/api/ai`

pub mod public;

use serde_json::Value;

use crate::api::{ApiClient, ApiError};
use public::{AnalyzeRequest, InsightsRequest};

pub async fn analyze_field_data(
    client: &ApiClient,
    request: &AnalyzeRequest,
) -> Result<Value, ApiError> {
    request.validate()?;
    client.post("/api/ai/analyze-field-data", request).await
}

pub async fn insights(client: &ApiClient, request: &InsightsRequest) -> Result<Value, ApiError> {
    client.post("/api/ai/insights", request).await
}
