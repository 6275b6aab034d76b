use crate::domain::DashboardReport;
use crate::hooks::{Hook, QueryState};
use crate::services::ReportService;
use hms_types::DateRange;
use std::sync::{Arc, Mutex, PoisonError};

/// Dashboard statistics for a selectable date range. `None` means the default window.
pub struct DashboardHook {
    service: Arc<ReportService>,
    hook: Hook<DashboardReport>,
    range: Mutex<Option<DateRange>>,
}

impl DashboardHook {
    pub fn new(service: Arc<ReportService>) -> Self {
        Self {
            service,
            hook: Hook::new(),
            range: Mutex::new(None),
        }
    }

    pub fn state(&self) -> QueryState<DashboardReport> {
        self.hook.state()
    }

    fn range(&self) -> Option<DateRange> {
        *self.range.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub async fn refresh(&self) -> bool {
        self.hook.run(self.service.dashboard(self.range())).await
    }

    pub async fn set_range(&self, range: Option<DateRange>) -> bool {
        *self.range.lock().unwrap_or_else(PoisonError::into_inner) = range;
        self.refresh().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fakes::FakeReports;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn selected_range_is_used_for_reload() {
        let hook = DashboardHook::new(Arc::new(ReportService::new(Arc::new(
            FakeReports::default(),
        ))));
        let day = NaiveDate::from_ymd_opt(2026, 5, 1).expect("date");
        let range = DateRange::new(day, day).expect("range");
        hook.set_range(Some(range)).await;
        hook.refresh().await;
        assert_eq!(hook.state().data.expect("report").range, range);
    }
}
