//! Runtime configuration: CLI values merged with environment fallbacks.

use std::time::Duration;

use thiserror::Error;

use crate::api::ApiCredentials;
use crate::tui::style::ThemeKind;
use crate::tui::viewport::ViewportConfig;

/// Environment variables honored when CLI flags are absent.
pub const ENV_URL: &str = "GLPI_URL";
pub const ENV_APP_TOKEN: &str = "GLPI_APP_TOKEN";
pub const ENV_USER_TOKEN: &str = "GLPI_USER_TOKEN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing {name}: pass {flag} or set {env}")]
    Missing {
        name: &'static str,
        flag: &'static str,
        env: &'static str,
    },
}

/// Presentation and refresh settings for the dashboard.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Minimum interval between backend fetches.
    pub refresh: Duration,
    pub viewport: ViewportConfig,
    pub theme: ThemeKind,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh: Duration::from_secs(30),
            viewport: ViewportConfig::default(),
            theme: ThemeKind::Dark,
        }
    }
}

/// Merges CLI-provided credentials with environment fallbacks.
/// `env` is injected so the merge is testable without process state.
pub fn resolve_credentials(
    url: Option<String>,
    app_token: Option<String>,
    user_token: Option<String>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ApiCredentials, ConfigError> {
    let base_url = url.or_else(|| env(ENV_URL)).ok_or(ConfigError::Missing {
        name: "backend URL",
        flag: "--url",
        env: ENV_URL,
    })?;
    let app_token = app_token
        .or_else(|| env(ENV_APP_TOKEN))
        .ok_or(ConfigError::Missing {
            name: "application token",
            flag: "--app-token",
            env: ENV_APP_TOKEN,
        })?;
    let user_token = user_token
        .or_else(|| env(ENV_USER_TOKEN))
        .ok_or(ConfigError::Missing {
            name: "user token",
            flag: "--user-token",
            env: ENV_USER_TOKEN,
        })?;
    Ok(ApiCredentials {
        base_url,
        app_token,
        user_token,
    })
}

/// Reads credentials from CLI values with process-environment fallback.
pub fn credentials_from_env(
    url: Option<String>,
    app_token: Option<String>,
    user_token: Option<String>,
) -> Result<ApiCredentials, ConfigError> {
    resolve_credentials(url, app_token, user_token, |name| {
        std::env::var(name).ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_values_win_over_env() {
        let creds = resolve_credentials(
            Some("https://cli.example".to_string()),
            Some("cli-app".to_string()),
            Some("cli-user".to_string()),
            |_| Some("env-value".to_string()),
        )
        .unwrap();
        assert_eq!(creds.base_url, "https://cli.example");
        assert_eq!(creds.app_token, "cli-app");
    }

    #[test]
    fn env_fills_missing_values() {
        let creds = resolve_credentials(None, None, Some("u".to_string()), |name| {
            match name {
                ENV_URL => Some("https://env.example".to_string()),
                ENV_APP_TOKEN => Some("env-app".to_string()),
                _ => None,
            }
        })
        .unwrap();
        assert_eq!(creds.base_url, "https://env.example");
        assert_eq!(creds.user_token, "u");
    }

    #[test]
    fn missing_value_names_flag_and_env() {
        let err = resolve_credentials(None, None, None, |_| None).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("--url"));
        assert!(msg.contains(ENV_URL));
    }
}
