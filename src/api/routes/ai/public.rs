use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::ApiError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(rename = "fieldData")]
    pub field_data: Value,
    #[serde(rename = "dataType")]
    pub data_type: String,
}

impl AnalyzeRequest {
    /// `field_data` must be a record or a non-empty list of records
    pub fn validate(&self) -> Result<(), ApiError> {
        match &self.field_data {
            Value::Object(_) => {}
            Value::Array(items) if !items.is_empty() => {}
            _ => {
                return Err(ApiError::validation(
                    "fieldData must be a record or a non-empty list of records",
                ));
            }
        }
        if self.data_type.trim().is_empty() {
            return Err(ApiError::validation("dataType is required"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum TimeRange {
    #[serde(rename = "7d")]
    #[value(name = "7d")]
    Week,
    #[default]
    #[serde(rename = "30d")]
    #[value(name = "30d")]
    Month,
    #[serde(rename = "90d")]
    #[value(name = "90d")]
    Quarter,
    #[serde(rename = "1y")]
    #[value(name = "1y")]
    Year,
    #[serde(rename = "all")]
    #[value(name = "all")]
    All,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InsightsRequest {
    #[serde(rename = "allFieldData")]
    pub all_field_data: Vec<Value>,
    #[serde(rename = "timeRange")]
    pub time_range: TimeRange,
}
