//! Shared wire-mapping utilities for the HTTP repositories.

use crate::config::FallbackPolicy;
use crate::error::{ApiError, ApiResult};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};

/// Accepts both `{"data": ...}` resource envelopes and bare payloads.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    pub(crate) fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(data) => data,
        }
    }
}

/// The backend returned a 2xx payload that does not satisfy a domain invariant.
pub(crate) fn malformed(message: impl Into<String>) -> ApiError {
    ApiError::new(502, message)
}

/// Dates arrive either as `YYYY-MM-DD` or as a full RFC 3339 timestamp, depending on how the
/// backend model casts the column.
pub(crate) fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return Ok(None);
    };

    if let Ok(date) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| Some(dt.date_naive()))
        .map_err(|_| serde::de::Error::custom(format!("invalid date {raw}")))
}

/// Turns a wire key such as `diagnostic_test` into `Diagnostic Test`.
pub(crate) fn humanise(key: &str) -> String {
    key.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Serve `sample` instead of a network failure when the policy allows it.
pub(crate) fn or_sample_data<T>(
    result: ApiResult<T>,
    policy: FallbackPolicy,
    entity: &str,
    sample: impl FnOnce() -> T,
) -> ApiResult<T> {
    match result {
        Err(err) if err.is_network_error() && policy == FallbackPolicy::SampleData => {
            tracing::warn!("{entity} backend unreachable, serving sample data: {err}");
            Ok(sample())
        }
        other => other,
    }
}

/// User-facing replacements for classified errors, per operation.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ErrorMessages {
    auth: Option<&'static str>,
    forbidden: Option<&'static str>,
    not_found: Option<&'static str>,
    validation: Option<&'static str>,
}

impl ErrorMessages {
    pub(crate) const fn new() -> Self {
        Self {
            auth: None,
            forbidden: None,
            not_found: None,
            validation: None,
        }
    }

    pub(crate) const fn auth(mut self, message: &'static str) -> Self {
        self.auth = Some(message);
        self
    }

    pub(crate) const fn forbidden(mut self, message: &'static str) -> Self {
        self.forbidden = Some(message);
        self
    }

    pub(crate) const fn not_found(mut self, message: &'static str) -> Self {
        self.not_found = Some(message);
        self
    }

    pub(crate) const fn validation(mut self, message: &'static str) -> Self {
        self.validation = Some(message);
        self
    }

    pub(crate) fn apply(&self, err: ApiError) -> ApiError {
        let replacement = if err.is_auth_error() {
            self.auth
        } else if err.is_forbidden_error() {
            self.forbidden
        } else if err.is_not_found_error() {
            self.not_found
        } else if err.is_validation_error() {
            self.validation
        } else {
            None
        };

        match replacement {
            Some(message) => err.with_message(message),
            None => err,
        }
    }
}
