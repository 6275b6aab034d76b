//! # HMS Types
//!
//! Small validated value types shared by every layer of the HMS client:
//! - [`NonEmptyText`] for required free-text inputs
//! - [`Paginated`] for the backend's page envelope
//! - [`DateRange`] for report and list filters

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Errors that can occur when creating validated value types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
    /// A date range whose start falls after its end
    #[error("date range start {from} is after end {to}")]
    InvertedRange { from: NaiveDate, to: NaiveDate },
}

/// A trimmed string with at least one non-whitespace character.
///
/// Used for search queries, names and other inputs the backend rejects when blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Trims `input` and rejects it if nothing is left.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns `None` for blank input instead of an error.
    pub fn optional(input: impl AsRef<str>) -> Option<Self> {
        Self::new(input).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// The backend's pagination envelope.
///
/// Services pass this through untouched apart from mapping `data`; they never re-paginate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub current_page: u32,
    pub last_page: u32,
    pub per_page: u32,
    pub total: u64,
}

impl<T> Paginated<T> {
    /// Maps every item while keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            current_page: self.current_page,
            last_page: self.last_page,
            per_page: self.per_page,
            total: self.total,
        }
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page < self.last_page
    }
}

/// Inclusive calendar date range, rendered as `YYYY-MM-DD` query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub const QUERY_FORMAT: &'static str = "%Y-%m-%d";

    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, TextError> {
        if from > to {
            return Err(TextError::InvertedRange { from, to });
        }
        Ok(Self { from, to })
    }

    /// The `days` days ending on (and including) `today`.
    pub fn last_days(today: NaiveDate, days: u32) -> Self {
        let span = i64::from(days.saturating_sub(1));
        Self {
            from: today - Duration::days(span),
            to: today,
        }
    }

    /// Query parameters in the form the backend expects.
    pub fn query_pairs(&self) -> [(&'static str, String); 2] {
        [
            ("start_date", self.from.format(Self::QUERY_FORMAT).to_string()),
            ("end_date", self.to.format(Self::QUERY_FORMAT).to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn non_empty_text_trims_and_rejects_blank() {
        assert_eq!(NonEmptyText::new("  Aung  ").unwrap().as_str(), "Aung");
        assert_eq!(NonEmptyText::new("   "), Err(TextError::Empty));
        assert!(NonEmptyText::optional("").is_none());
    }

    #[test]
    fn non_empty_text_deserialize_rejects_blank() {
        let err = serde_json::from_str::<NonEmptyText>("\"  \"").expect_err("blank rejected");
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn paginated_map_keeps_metadata() {
        let page = Paginated {
            data: vec![1, 2, 3],
            current_page: 2,
            last_page: 4,
            per_page: 3,
            total: 11,
        };
        let mapped = page.map(|n| n * 10);
        assert_eq!(mapped.data, vec![10, 20, 30]);
        assert_eq!(mapped.current_page, 2);
        assert_eq!(mapped.total, 11);
        assert!(mapped.has_next_page());
    }

    #[test]
    fn paginated_decodes_backend_envelope() {
        let json = r#"{"data":["a"],"current_page":1,"last_page":1,"per_page":15,"total":1}"#;
        let page: Paginated<String> = serde_json::from_str(json).expect("decode");
        assert_eq!(page.data, vec!["a".to_string()]);
        assert!(!page.has_next_page());
    }

    #[test]
    fn date_range_rejects_inverted_bounds() {
        let err = DateRange::new(date(2026, 3, 2), date(2026, 3, 1)).expect_err("inverted");
        assert!(matches!(err, TextError::InvertedRange { .. }));
    }

    #[test]
    fn date_range_last_days_is_inclusive() {
        let range = DateRange::last_days(date(2026, 3, 30), 30);
        assert_eq!(range.from, date(2026, 3, 1));
        let [start, end] = range.query_pairs();
        assert_eq!(start, ("start_date", "2026-03-01".to_string()));
        assert_eq!(end, ("end_date", "2026-03-30".to_string()));
    }
}
