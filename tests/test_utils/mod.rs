//! Test utilities for integration tests
#![allow(dead_code)]

use serde_json::{Value, json};

use easytrack::api::ApiClient;
use easytrack::core::AppConfig;

/// Client pointed at a mock server
pub fn test_client(server: &mockito::ServerGuard) -> ApiClient {
    ApiClient::new(&test_config(server))
}

pub fn test_config(server: &mockito::ServerGuard) -> AppConfig {
    let mut config = AppConfig::with_base_url(&server.url());
    config.default_user_id = String::from("test-user");
    config.user_agent = String::from("easytrack-test");
    config.system_message = String::from("You are a helpful assistant.");
    config
}

/// Field reports as the backend returns them
pub fn sample_records() -> Vec<Value> {
    vec![
        json!({
            "_id": "65f1a0",
            "title": "Borehole inspection",
            "category": "water",
            "location": "Kisumu",
            "latitude": -0.0917,
            "longitude": 34.768,
            "description": "Pump handle broken, 200 households affected",
            "user_id": "u1",
            "time_taken": "2024-03-02T09:10:00Z",
            "created_at": "2024-03-02T09:30:00Z"
        }),
        json!({
            "_id": "65f1a1",
            "title": "Clinic stock check",
            "category": "health",
            "location": "Nairobi, Kenya",
            "latitude": -1.2921,
            "longitude": 36.8219,
            "description": "Malaria test kits running low",
            "user_id": "u2",
            "time_taken": "2024-04-10T14:00:00Z",
            "created_at": "2024-04-10T14:05:00Z"
        }),
        json!({
            "_id": "65f1a2",
            "title": "River level reading",
            "category": "climate",
            "location": "Nakuru",
            "latitude": null,
            "longitude": null,
            "description": "Level up 40cm after rains",
            "user_id": "u1",
            "time_taken": "2024-05-20T07:00:00Z",
            "created_at": "2024-05-20T07:15:00Z"
        }),
    ]
}
