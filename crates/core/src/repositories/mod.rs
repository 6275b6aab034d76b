//! Repository contracts and their HTTP implementations.
//!
//! Each trait abstracts one entity family behind the backend so that services never see the
//! transport. The `Http*Repository` types translate the backend's snake_case wire schema into
//! domain entities and either return fully-populated values or propagate a classified
//! [`ApiError`](crate::error::ApiError).
//!
//! Patient, Doctor and Appointment repositories honour
//! [`FallbackPolicy`](crate::config::FallbackPolicy): with `SampleData`, a network failure is
//! logged and answered with a fixed sample dataset. Classified backend errors are never
//! masked.

pub mod admission;
pub mod appointment;
pub mod auth;
pub mod department;
pub mod doctor;
pub mod patient;
pub mod report;
pub mod staff;
pub mod treatment;
pub mod user;
pub mod ward;

mod helpers;

pub use admission::HttpAdmissionRepository;
pub use appointment::HttpAppointmentRepository;
pub use auth::HttpAuthRepository;
pub use department::HttpDepartmentRepository;
pub use doctor::HttpDoctorRepository;
pub use patient::HttpPatientRepository;
pub use report::HttpReportRepository;
pub use staff::HttpStaffRepository;
pub use treatment::HttpTreatmentRepository;
pub use user::HttpUserRepository;
pub use ward::HttpWardRepository;

use crate::domain::{
    Admission, AdmissionUpdate, Appointment, Credentials, DashboardReport, DeathConfirmation,
    Department, DischargeRequest, Doctor, NewAdmission, NewPatient, NewTreatment, NewUser,
    Patient, PatientUpdate, Session, Staff, StaffRole, Treatment, TreatmentUpdate, User,
    UserUpdate, WardCatalog,
};
use crate::error::ApiResult;
use async_trait::async_trait;
use hms_types::{DateRange, Paginated};

#[async_trait]
pub trait PatientRepository: Send + Sync {
    async fn fetch_all(&self) -> ApiResult<Vec<Patient>>;
    async fn search(&self, query: &str) -> ApiResult<Vec<Patient>>;
    async fn get_by_id(&self, id: u64) -> ApiResult<Patient>;
    async fn create(&self, input: &NewPatient) -> ApiResult<Patient>;
    async fn update(&self, id: u64, input: &PatientUpdate) -> ApiResult<Patient>;
}

#[async_trait]
pub trait DoctorRepository: Send + Sync {
    async fn fetch_all(&self) -> ApiResult<Vec<Doctor>>;
}

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn fetch_all(&self) -> ApiResult<Vec<Appointment>>;
}

#[async_trait]
pub trait AdmissionRepository: Send + Sync {
    async fn fetch_page(&self, page: u32) -> ApiResult<Paginated<Admission>>;
    async fn fetch_for_patient(&self, patient_id: u64) -> ApiResult<Vec<Admission>>;
    async fn get_by_id(&self, id: u64) -> ApiResult<Admission>;
    async fn create(&self, input: &NewAdmission) -> ApiResult<Admission>;
    async fn update(&self, id: u64, input: &AdmissionUpdate) -> ApiResult<Admission>;
    async fn discharge(&self, id: u64, input: &DischargeRequest) -> ApiResult<Admission>;
    async fn confirm_death(&self, id: u64, input: &DeathConfirmation) -> ApiResult<Admission>;
    async fn convert_to_inpatient(&self, id: u64) -> ApiResult<Admission>;
}

/// Treatments are always addressed through their patient and admission.
#[async_trait]
pub trait TreatmentRepository: Send + Sync {
    async fn fetch_for_admission(
        &self,
        patient_id: u64,
        admission_id: u64,
    ) -> ApiResult<Vec<Treatment>>;
    async fn get_by_id(&self, patient_id: u64, admission_id: u64, id: u64)
        -> ApiResult<Treatment>;
    async fn create(
        &self,
        patient_id: u64,
        admission_id: u64,
        input: &NewTreatment,
    ) -> ApiResult<Treatment>;
    async fn update(
        &self,
        patient_id: u64,
        admission_id: u64,
        id: u64,
        input: &TreatmentUpdate,
    ) -> ApiResult<Treatment>;
}

#[async_trait]
pub trait StaffRepository: Send + Sync {
    async fn fetch_all(&self) -> ApiResult<Vec<Staff>>;
    async fn fetch_by_role(&self, role: StaffRole) -> ApiResult<Vec<Staff>>;
    async fn get_by_id(&self, id: u64) -> ApiResult<Staff>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Active accounts, or soft-deleted ones when `deleted` is set.
    async fn fetch_all(&self, deleted: bool) -> ApiResult<Vec<User>>;
    async fn get_by_id(&self, id: u64) -> ApiResult<User>;
    async fn create(&self, input: &NewUser) -> ApiResult<User>;
    async fn update(&self, id: u64, input: &UserUpdate) -> ApiResult<User>;
    /// Soft-delete.
    async fn delete(&self, id: u64) -> ApiResult<()>;
    async fn restore(&self, id: u64) -> ApiResult<User>;
}

#[async_trait]
pub trait WardRepository: Send + Sync {
    async fn fetch_catalog(&self) -> ApiResult<WardCatalog>;
}

#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    async fn fetch_all(&self) -> ApiResult<Vec<Department>>;
}

#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn fetch_dashboard(&self, range: DateRange) -> ApiResult<DashboardReport>;
}

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> ApiResult<Session>;
    async fn logout(&self) -> ApiResult<()>;
    async fn current_user(&self) -> ApiResult<User>;
}
