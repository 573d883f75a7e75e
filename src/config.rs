//! Deployment configuration read from the environment.

use crate::client::RoutingConfig;
use crate::traits::KeyValueStore;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the transit and journey-planning API.
    pub api_url: Option<String>,
    pub traccar_url: Option<String>,
    pub traccar_ws_url: Option<String>,
    pub traccar_token: Option<String>,
    /// Hides line overlays entirely.
    pub line_is_disabled: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| lookup(key).filter(|value| !value.is_empty());
        Self {
            api_url: value("API_URL"),
            traccar_url: value("TRACCAR_URL"),
            traccar_ws_url: value("TRACCAR_WS_URL"),
            traccar_token: value("TRACCAR_TOKEN"),
            line_is_disabled: value("LINE_IS_DISABLED")
                .is_some_and(|flag| matches!(flag.to_ascii_lowercase().as_str(), "1" | "true" | "yes")),
        }
    }

    /// Uses a stored `API_URL` when the environment did not set one.
    pub fn with_stored_api_url(mut self, store: &impl KeyValueStore) -> Self {
        if self.api_url.is_none() {
            self.api_url = store
                .get_item("API_URL")
                .and_then(|raw| serde_json::from_str::<String>(&raw).ok());
        }
        self
    }

    pub fn routing_config(&self) -> RoutingConfig {
        let mut config = RoutingConfig::default();
        if let Some(api_url) = &self.api_url {
            config.base_url = api_url.clone();
        }
        config
    }
}
