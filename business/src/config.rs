use log::{info, warn};
use safari_states::State;
use serde::Deserialize;
use ustr::Ustr;

const LOCAL_BACKEND: &str = "http://localhost:5000";
const HOSTED_BACKEND: &str = "https://adventure-safari-admin-backend2.onrender.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessConfig {
    pub api_base_url: String,
}

/// Environment overrides read on native start-up.
#[derive(Debug, Deserialize)]
struct RawEnv {
    #[serde(default)]
    safari_api_base_url: Option<String>,
}

impl BusinessConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
        }
    }

    /// Default config with `SAFARI_API_BASE_URL` applied when it is set.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    fn from_vars<I, S>(vars: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        match serde_env::from_iter::<_, _, RawEnv>(vars) {
            Ok(RawEnv {
                safari_api_base_url: Some(url),
            }) if !url.trim().is_empty() => {
                info!("Using API base url from SAFARI_API_BASE_URL: {url}");
                Self::new(url.trim().trim_end_matches('/'))
            }
            Ok(_) => Self::default(),
            Err(err) => {
                warn!("Ignoring malformed environment: {err}");
                Self::default()
            }
        }
    }

    pub fn api_url(&self) -> Ustr {
        if self.api_base_url.is_empty() {
            Ustr::from("/api")
        } else {
            Ustr::from(&format!("{}/api", self.api_base_url))
        }
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            api_base_url: if cfg!(target_arch = "wasm32") {
                String::new()
            } else if cfg!(feature = "env_prod") {
                HOSTED_BACKEND.to_owned()
            } else {
                LOCAL_BACKEND.to_owned()
            },
        }
    }
}

impl State for BusinessConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_appends_api_segment() {
        let config = BusinessConfig::new("http://127.0.0.1:9000");
        assert_eq!(config.api_url(), Ustr::from("http://127.0.0.1:9000/api"));
    }

    #[test]
    fn same_origin_config_uses_relative_api_path() {
        let config = BusinessConfig::new("");
        assert_eq!(config.api_url(), Ustr::from("/api"));
    }

    #[test]
    fn env_override_wins_and_drops_trailing_slash() {
        let config = BusinessConfig::from_vars(vec![("SAFARI_API_BASE_URL", "http://10.0.0.2:5000/")]);
        assert_eq!(config.api_base_url, "http://10.0.0.2:5000");
    }

    #[test]
    fn blank_env_override_falls_back_to_default() {
        let config = BusinessConfig::from_vars(vec![("SAFARI_API_BASE_URL", "  ")]);
        assert_eq!(config, BusinessConfig::default());
    }

    #[test]
    fn default_matches_build_environment() {
        let config = BusinessConfig::default();

        if cfg!(target_arch = "wasm32") {
            assert_eq!(config.api_base_url, "");
        } else if cfg!(feature = "env_prod") {
            assert_eq!(config.api_base_url, HOSTED_BACKEND);
        } else {
            assert_eq!(config.api_base_url, LOCAL_BACKEND);
            assert_eq!(config.api_url(), Ustr::from("http://localhost:5000/api"));
        }
    }
}
