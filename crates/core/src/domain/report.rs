//! Aggregated, read-only statistics. A report has no identity: it is the result of a query
//! over a date range.

use chrono::NaiveDate;
use hms_types::DateRange;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTotals {
    pub patients: u64,
    pub admissions: u64,
    pub treatments: u64,
    pub active_admissions: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePoint {
    pub date: NaiveDate,
    pub count: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DashboardReport {
    pub range: DateRange,
    pub totals: ReportTotals,
    pub patients_by_status: Vec<CategoryCount>,
    pub admissions_by_type: Vec<CategoryCount>,
    pub treatments_by_outcome: Vec<CategoryCount>,
    pub admissions_over_time: Vec<TimePoint>,
}
