use pagecraft::config::AppConfig;

/// Name of the wasm-bindgen output under the pkg directory.
pub const BUNDLE_NAME: &str = "pagecraft";

#[derive(Clone)]
pub struct AppState {
    pub api_base_url: String,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            api_base_url: config.api_base_url.clone(),
        }
    }
}
