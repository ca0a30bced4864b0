use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::api::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Water,
    Health,
    Climate,
    Environment,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Water,
        Category::Health,
        Category::Climate,
        Category::Environment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Water => "water",
            Category::Health => "health",
            Category::Climate => "climate",
            Category::Environment => "environment",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ApiError::validation(format!("Unknown category: {}", s)))
    }
}

/// A field report as stored by the backend
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldDataRecord {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub category: Category,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub description: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_taken: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl FieldDataRecord {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.title.trim().is_empty() {
            return Err(ApiError::validation("Field data title is required"));
        }
        if self.location.trim().is_empty() {
            return Err(ApiError::validation("Field data location is required"));
        }
        if self.user_id.trim().is_empty() {
            return Err(ApiError::validation("Field data user_id is required"));
        }
        if let Some(lat) = self.latitude
            && !(-90.0..=90.0).contains(&lat)
        {
            return Err(ApiError::validation(format!(
                "Latitude out of range: {}",
                lat
            )));
        }
        if let Some(lng) = self.longitude
            && !(-180.0..=180.0).contains(&lng)
        {
            return Err(ApiError::validation(format!(
                "Longitude out of range: {}",
                lng
            )));
        }
        Ok(())
    }
}
