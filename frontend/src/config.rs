use crate::services::logging::LogLevel;

/// Default backend address; a build can override it through `FLEET_API_BASE`
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000/api";

/// Runtime settings for the dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub notification_timeout_ms: u32,
    /// Wait before drawing analysis charts so the tab's canvases are laid out
    pub analysis_render_delay_ms: u32,
    pub log_level: LogLevel,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: option_env!("FLEET_API_BASE")
                .unwrap_or(DEFAULT_API_BASE)
                .trim_end_matches('/')
                .to_string(),
            notification_timeout_ms: 5000, // 5 seconds
            analysis_render_delay_ms: 100,
            log_level: LogLevel::Info,
        }
    }
}
