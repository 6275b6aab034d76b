//! Presentation state containers.
//!
//! A hook owns the latest [`QueryState`] for one view and the service that fills it. Every
//! load takes a [`Ticket`] from a generation counter; a response is applied only if its
//! ticket is still the newest, so a slow superseded request can never overwrite the result
//! of a later one. Requests are not cancelled, their results are dropped.

mod admissions;
mod dashboard;
mod lookups;
mod patients;
mod staff;
mod treatments;
mod users;

pub use admissions::AdmissionsHook;
pub use dashboard::DashboardHook;
pub use lookups::{DepartmentsHook, WardsHook};
pub use patients::PatientsHook;
pub use staff::StaffHook;
pub use treatments::TreatmentsHook;
pub use users::UsersHook;

use crate::error::{ApiError, ApiResult};
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

/// What a view renders: the last good data, whether a load is in flight, and the last error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<ApiError>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

/// Identifies one load. Only the newest ticket may settle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

struct Inner<T> {
    state: QueryState<T>,
    generation: u64,
}

/// Shared, generation-guarded [`QueryState`].
pub struct Hook<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T> Clone for Hook<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for Hook<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                state: QueryState::default(),
                generation: 0,
            })),
        }
    }
}

impl<T: Clone> Hook<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> QueryState<T> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .state
            .clone()
    }

    /// Starts a load. Previous data stays visible until the new result arrives.
    pub fn begin(&self) -> Ticket {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.generation += 1;
        inner.state.loading = true;
        inner.state.error = None;
        Ticket(inner.generation)
    }

    /// Applies `result` if `ticket` is still current. Returns whether it was applied.
    pub fn settle(&self, ticket: Ticket, result: ApiResult<T>) -> bool {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if ticket.0 != inner.generation {
            tracing::debug!(
                ticket = ticket.0,
                current = inner.generation,
                "discarding stale response"
            );
            return false;
        }
        match result {
            Ok(data) => {
                inner.state.data = Some(data);
                inner.state.error = None;
            }
            Err(err) => inner.state.error = Some(err),
        }
        inner.state.loading = false;
        true
    }

    /// `begin`, await `load`, `settle`.
    pub async fn run<F>(&self, load: F) -> bool
    where
        F: Future<Output = ApiResult<T>>,
    {
        let ticket = self.begin();
        let result = load.await;
        self.settle(ticket, result)
    }
}
