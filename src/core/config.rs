use std::env;

use crate::filter::FilterOptions;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_USER_ID: &str = "anonymous";
pub const DEFAULT_SYSTEM_MESSAGE: &str = "You are EASY TRACK's field data assistant. You help \
community health workers and field officers understand water, health, climate and \
environment reports. Answer concisely and suggest concrete next steps when you can.";

/// Everything the client and controllers need, resolved once and
/// passed in at construction.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Backend base URL, `EASYTRACK_API_URL`
    pub api_base_url: String,
    /// User id sent with chat requests, `EASYTRACK_USER_ID`
    pub default_user_id: String,
    /// Reported in the chat request context, `EASYTRACK_USER_AGENT`
    pub user_agent: String,
    /// Instruction prefixed to every chat request, `EASYTRACK_SYSTEM_MESSAGE`
    pub system_message: String,
    /// Where exported files are written, `EASYTRACK_EXPORT_DIR`
    pub export_dir: String,
    pub filter_options: FilterOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        let api_base_url =
            env::var("EASYTRACK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let default_user_id =
            env::var("EASYTRACK_USER_ID").unwrap_or_else(|_| DEFAULT_USER_ID.to_string());
        let user_agent = env::var("EASYTRACK_USER_AGENT")
            .unwrap_or_else(|_| format!("easytrack/{}", env!("CARGO_PKG_VERSION")));
        let system_message = env::var("EASYTRACK_SYSTEM_MESSAGE")
            .unwrap_or_else(|_| DEFAULT_SYSTEM_MESSAGE.to_string());
        let export_dir = env::var("EASYTRACK_EXPORT_DIR").unwrap_or("./".to_string());

        Self {
            api_base_url,
            default_user_id,
            user_agent,
            system_message,
            export_dir,
            filter_options: FilterOptions::default(),
        }
    }
}

impl AppConfig {
    /// Config pointing at `api_base_url` with every other value at
    /// its documented fallback. Does not read the environment.
    pub fn with_base_url(api_base_url: &str) -> Self {
        Self {
            api_base_url: api_base_url.to_string(),
            default_user_id: DEFAULT_USER_ID.to_string(),
            user_agent: format!("easytrack/{}", env!("CARGO_PKG_VERSION")),
            system_message: DEFAULT_SYSTEM_MESSAGE.to_string(),
            export_dir: String::from("./"),
            filter_options: FilterOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn it_falls_back_to_loopback_when_unset() {
        unsafe {
            env::remove_var("EASYTRACK_API_URL");
            env::remove_var("EASYTRACK_USER_ID");
        }
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.default_user_id, DEFAULT_USER_ID);
        assert!(config.user_agent.starts_with("easytrack/"));
    }

    #[test]
    #[serial]
    fn it_reads_api_url_from_env() {
        unsafe {
            env::set_var("EASYTRACK_API_URL", "https://track.example.org");
            env::set_var("EASYTRACK_USER_ID", "user-42");
        }
        let config = AppConfig::default();
        unsafe {
            env::remove_var("EASYTRACK_API_URL");
            env::remove_var("EASYTRACK_USER_ID");
        }
        assert_eq!(config.api_base_url, "https://track.example.org");
        assert_eq!(config.default_user_id, "user-42");
    }
}
