#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the listing API; `/agencies` is appended to it.
    pub api_base_url: String,
    pub log_level: String,
    /// Whole-request timeout. `None` means requests never time out.
    pub http_timeout_secs: Option<u64>,
    pub http_connect_timeout_secs: u64,
    pub user_agent: String,
}
