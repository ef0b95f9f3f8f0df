//! Environment overrides and `.env` loading.

use super::Config;
use std::path::Path;

/// Variables consulted for the API key, in priority order.
pub const API_KEY_VARS: [&str; 2] = ["DOCGEN_API_KEY", "API_KEY"];

/// Load `<root>/.env` into the process environment. Existing variables win.
pub fn load_dotenv(root: &Path) {
    match dotenvy::from_path(root.join(".env")) {
        Ok(()) => tracing::debug!("Loaded environment from {}", root.join(".env").display()),
        Err(e) if e.not_found() => tracing::debug!("No .env file in {}", root.display()),
        Err(e) => tracing::warn!("Error loading .env file: {}", e),
    }
}

/// Apply environment overrides from the process environment.
pub fn apply_env(config: &mut Config) {
    apply_env_from(config, |key| std::env::var(key).ok());
}

/// Apply environment overrides using `lookup` to resolve variables.
pub fn apply_env_from<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = API_KEY_VARS.iter().find_map(|var| lookup(var).filter(|v| !v.is_empty())) {
        config.api_key = Some(key);
    }
    if let Some(model) = lookup("DOCGEN_MODEL").filter(|v| !v.is_empty()) {
        config.model = model;
    }
    if let Some(endpoint) = lookup("DOCGEN_ENDPOINT").filter(|v| !v.is_empty()) {
        config.endpoint = endpoint;
    }
}
