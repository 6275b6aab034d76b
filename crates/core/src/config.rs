//! Client runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into the composition root.
//! Nothing below the binary reads environment variables; the `*_from_env_value` helpers take
//! the raw optional value so they can be exercised without touching the process environment.

use crate::constants::{DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT_SECS, TOKEN_FILE_NAME};
use crate::error::ConfigError;
use reqwest::Url;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// What the Patient, Doctor and Appointment repositories do when the backend is unreachable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Propagate the network error like every other repository.
    #[default]
    Disabled,
    /// Log a warning and serve the fixed sample dataset. Demo use only.
    SampleData,
}

/// Client configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    base_url: Url,
    timeout: Duration,
    token_file: Option<PathBuf>,
    fallback: FallbackPolicy,
}

impl ClientConfig {
    /// Create a new `ClientConfig`.
    ///
    /// `token_file` of `None` keeps the session token in memory only.
    pub fn new(
        base_url: Url,
        timeout: Duration,
        token_file: Option<PathBuf>,
        fallback: FallbackPolicy,
    ) -> Self {
        Self {
            base_url,
            timeout,
            token_file,
            fallback,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn token_file(&self) -> Option<&Path> {
        self.token_file.as_deref()
    }

    pub fn fallback(&self) -> FallbackPolicy {
        self.fallback
    }
}

/// Parse the backend base URL.
///
/// Falls back to [`DEFAULT_API_BASE_URL`] when unset or blank. Only `http` and `https` are
/// accepted, and a trailing `/` is added so relative endpoint paths join underneath it.
pub fn base_url_from_env_value(value: Option<String>) -> Result<Url, ConfigError> {
    let raw = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

    let normalised = if raw.ends_with('/') {
        raw.clone()
    } else {
        format!("{raw}/")
    };

    let url = Url::parse(&normalised).map_err(|e| ConfigError::InvalidBaseUrl {
        value: raw.clone(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl {
            value: raw,
            reason: format!("unsupported scheme {}", url.scheme()),
        });
    }

    Ok(url)
}

/// Parse the request timeout in whole seconds.
pub fn timeout_from_env_value(value: Option<String>) -> Result<Duration, ConfigError> {
    let Some(raw) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) else {
        return Ok(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    };

    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(raw)),
    }
}

/// Parse the sample-data fallback flag. Unset means [`FallbackPolicy::Disabled`].
pub fn fallback_policy_from_env_value(value: Option<String>) -> Result<FallbackPolicy, ConfigError> {
    let Some(raw) = value else {
        return Ok(FallbackPolicy::Disabled);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" | "off" => Ok(FallbackPolicy::Disabled),
        "1" | "true" | "yes" | "on" => Ok(FallbackPolicy::SampleData),
        _ => Err(ConfigError::InvalidFlag(raw)),
    }
}

/// Resolve where the session token is kept.
///
/// Unset means [`TOKEN_FILE_NAME`] in the working directory; `none` (or a blank value) keeps
/// the token in memory for the lifetime of the process.
pub fn token_file_from_env_value(value: Option<String>) -> Option<PathBuf> {
    match value.map(|v| v.trim().to_string()) {
        None => Some(PathBuf::from(TOKEN_FILE_NAME)),
        Some(v) if v.is_empty() || v.eq_ignore_ascii_case("none") => None,
        Some(v) => Some(PathBuf::from(v)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_defaults_when_unset_or_blank() {
        let url = base_url_from_env_value(None).expect("default");
        assert_eq!(url.as_str(), DEFAULT_API_BASE_URL);
        let url = base_url_from_env_value(Some("   ".into())).expect("blank");
        assert_eq!(url.as_str(), DEFAULT_API_BASE_URL);
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let url = base_url_from_env_value(Some("https://hms.example.org/api".into()))
            .expect("valid url");
        assert_eq!(url.as_str(), "https://hms.example.org/api/");
        assert_eq!(
            url.join("patients").expect("join").as_str(),
            "https://hms.example.org/api/patients"
        );
    }

    #[test]
    fn base_url_rejects_other_schemes() {
        let err = base_url_from_env_value(Some("ftp://hms.example.org".into()))
            .expect_err("should reject ftp");
        assert!(matches!(err, ConfigError::InvalidBaseUrl { reason, .. } if reason.contains("ftp")));
    }

    #[test]
    fn base_url_rejects_garbage() {
        assert!(base_url_from_env_value(Some("not a url".into())).is_err());
    }

    #[test]
    fn timeout_parses_seconds() {
        assert_eq!(
            timeout_from_env_value(None).expect("default"),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
        assert_eq!(
            timeout_from_env_value(Some("5".into())).expect("five"),
            Duration::from_secs(5)
        );
        assert!(timeout_from_env_value(Some("0".into())).is_err());
        assert!(timeout_from_env_value(Some("soon".into())).is_err());
    }

    #[test]
    fn fallback_flag_values() {
        assert_eq!(
            fallback_policy_from_env_value(None).expect("unset"),
            FallbackPolicy::Disabled
        );
        assert_eq!(
            fallback_policy_from_env_value(Some("TRUE".into())).expect("true"),
            FallbackPolicy::SampleData
        );
        assert_eq!(
            fallback_policy_from_env_value(Some("off".into())).expect("off"),
            FallbackPolicy::Disabled
        );
        let err = fallback_policy_from_env_value(Some("maybe".into())).expect_err("invalid");
        assert!(matches!(err, ConfigError::InvalidFlag(v) if v == "maybe"));
    }

    #[test]
    fn token_file_defaults_and_opt_out() {
        assert_eq!(
            token_file_from_env_value(None),
            Some(PathBuf::from(TOKEN_FILE_NAME))
        );
        assert_eq!(token_file_from_env_value(Some("NONE".into())), None);
        assert_eq!(token_file_from_env_value(Some(" ".into())), None);
        assert_eq!(
            token_file_from_env_value(Some("/tmp/hms.json".into())),
            Some(PathBuf::from("/tmp/hms.json"))
        );
    }
}
