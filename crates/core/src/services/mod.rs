//! Application services.
//!
//! One service per entity family. Each wraps its repository behind an `Arc<dyn ...>`,
//! projects domain entities into presentation DTOs and adds the small amount of logic that
//! does not belong to transport: search delegation, local input checks, badge
//! classification, option lists. Lists and page envelopes are returned unchanged in shape;
//! mutations call the repository once and return the refreshed detail DTO.
//!
//! [`nrc`] and [`address`] are pure codecs with static lookup tables and no repository.

pub mod address;
pub mod admission;
pub mod appointment;
pub mod auth;
pub mod department;
pub mod doctor;
pub mod nrc;
pub mod patient;
pub mod report;
pub mod staff;
pub mod treatment;
pub mod user;
pub mod ward;

#[cfg(test)]
pub(crate) mod fakes;

pub use admission::{AdmissionDetailDto, AdmissionDto, AdmissionService, BadgeVariant};
pub use appointment::{AppointmentDto, AppointmentService};
pub use auth::AuthService;
pub use department::{DepartmentDto, DepartmentService};
pub use doctor::{DoctorDto, DoctorService};
pub use patient::{PatientDto, PatientService};
pub use report::ReportService;
pub use staff::{StaffDirectory, StaffDto, StaffService};
pub use treatment::{TreatmentDetailDto, TreatmentListDto, TreatmentService};
pub use user::{UserDto, UserService};
pub use ward::WardService;

use crate::error::{ApiError, ApiResult};
use hms_types::NonEmptyText;
use serde::Serialize;

/// A `value`/`label` pair for select inputs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Rejects blank required text before it reaches the backend.
pub(crate) fn required(field: &str, value: &str) -> ApiResult<NonEmptyText> {
    NonEmptyText::new(value)
        .map_err(|_| ApiError::invalid_input(field, format!("The {} field is required.", field.replace('_', " "))))
}

/// Rejects a zero id used as a parent reference.
pub(crate) fn reference(field: &str, id: u64) -> ApiResult<u64> {
    if id == 0 {
        return Err(ApiError::invalid_input(
            field,
            format!("The {} field must reference an existing record.", field.replace('_', " ")),
        ));
    }
    Ok(id)
}
