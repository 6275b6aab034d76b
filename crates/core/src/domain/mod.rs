//! Domain entities.
//!
//! Plain data shapes for everything the backend manages. No transport concerns live here:
//! repositories translate the backend's wire schema into these types and services project
//! them into DTOs.
//!
//! Enums serialise as the backend's snake_case strings so request bodies can carry them
//! directly.

pub mod admission;
pub mod appointment;
pub mod department;
pub mod doctor;
pub mod patient;
pub mod report;
pub mod staff;
pub mod treatment;
pub mod user;
pub mod ward;

pub use admission::{
    Admission, AdmissionStatus, AdmissionType, AdmissionUpdate, DeathConfirmation,
    DischargeRequest, NewAdmission,
};
pub use appointment::{Appointment, AppointmentStatus};
pub use department::Department;
pub use doctor::Doctor;
pub use patient::{Gender, NewPatient, Patient, PatientStatus, PatientUpdate};
pub use report::{CategoryCount, DashboardReport, ReportTotals, TimePoint};
pub use staff::{Staff, StaffRef, StaffRole};
pub use treatment::{NewTreatment, Treatment, TreatmentOutcome, TreatmentType, TreatmentUpdate};
pub use user::{Credentials, NewUser, Session, User, UserRole, UserUpdate};
pub use ward::{Ward, WardCatalog};
