//! Composition root.
//!
//! [`register_defaults`] binds every [`ServiceToken`] to its HTTP-backed implementation;
//! [`AppServices::from_container`] resolves all of them eagerly so wiring mistakes surface at
//! startup. Hosts and tests can re-register individual tokens between the two steps.

use crate::config::ClientConfig;
use crate::container::{Container, ServiceToken};
use crate::error::WiringError;
use crate::http::ApiClient;
use crate::repositories::{
    AdmissionRepository, AppointmentRepository, AuthRepository, DepartmentRepository,
    DoctorRepository, HttpAdmissionRepository, HttpAppointmentRepository, HttpAuthRepository,
    HttpDepartmentRepository, HttpDoctorRepository, HttpPatientRepository,
    HttpReportRepository, HttpStaffRepository, HttpTreatmentRepository, HttpUserRepository,
    HttpWardRepository, PatientRepository, ReportRepository, StaffRepository,
    TreatmentRepository, UserRepository, WardRepository,
};
use crate::services::{
    AdmissionService, AppointmentService, AuthService, DepartmentService, DoctorService,
    PatientService, ReportService, StaffService, TreatmentService, UserService, WardService,
};
use crate::token::TokenStore;
use std::sync::Arc;

/// Registers a repository built from the shared [`ApiClient`].
fn register_repository<R>(
    container: &Container,
    token: ServiceToken,
    build: impl Fn(Arc<ApiClient>) -> R + Send + Sync + 'static,
) where
    R: Clone + Send + Sync + 'static,
{
    container.register(token, move |r| Ok(build(r.resolve(ServiceToken::ApiClient)?)));
}

/// Registers a service built from one resolved repository.
fn register_service<D, S>(
    container: &Container,
    token: ServiceToken,
    dependency: ServiceToken,
    build: impl Fn(D) -> S + Send + Sync + 'static,
) where
    D: Clone + Send + Sync + 'static,
    S: Send + Sync + 'static,
{
    container.register(token, move |r| Ok(Arc::new(build(r.resolve(dependency)?))));
}

pub fn register_defaults(container: &Container, cfg: ClientConfig, tokens: Arc<dyn TokenStore>) {
    let fallback = cfg.fallback();

    container.register_instance(ServiceToken::TokenStore, tokens);
    container.register(ServiceToken::ApiClient, move |r| {
        let tokens: Arc<dyn TokenStore> = r.resolve(ServiceToken::TokenStore)?;
        ApiClient::new(&cfg, tokens)
            .map(Arc::new)
            .map_err(|e| WiringError::Construction {
                token: ServiceToken::ApiClient,
                message: e.to_string(),
            })
    });

    register_repository(container, ServiceToken::PatientRepository, move |c| {
        Arc::new(HttpPatientRepository::new(c, fallback)) as Arc<dyn PatientRepository>
    });
    register_repository(container, ServiceToken::DoctorRepository, move |c| {
        Arc::new(HttpDoctorRepository::new(c, fallback)) as Arc<dyn DoctorRepository>
    });
    register_repository(container, ServiceToken::AppointmentRepository, move |c| {
        Arc::new(HttpAppointmentRepository::new(c, fallback)) as Arc<dyn AppointmentRepository>
    });
    register_repository(container, ServiceToken::AdmissionRepository, |c| {
        Arc::new(HttpAdmissionRepository::new(c)) as Arc<dyn AdmissionRepository>
    });
    register_repository(container, ServiceToken::TreatmentRepository, |c| {
        Arc::new(HttpTreatmentRepository::new(c)) as Arc<dyn TreatmentRepository>
    });
    register_repository(container, ServiceToken::StaffRepository, |c| {
        Arc::new(HttpStaffRepository::new(c)) as Arc<dyn StaffRepository>
    });
    register_repository(container, ServiceToken::UserRepository, |c| {
        Arc::new(HttpUserRepository::new(c)) as Arc<dyn UserRepository>
    });
    register_repository(container, ServiceToken::WardRepository, |c| {
        Arc::new(HttpWardRepository::new(c)) as Arc<dyn WardRepository>
    });
    register_repository(container, ServiceToken::DepartmentRepository, |c| {
        Arc::new(HttpDepartmentRepository::new(c)) as Arc<dyn DepartmentRepository>
    });
    register_repository(container, ServiceToken::ReportRepository, |c| {
        Arc::new(HttpReportRepository::new(c)) as Arc<dyn ReportRepository>
    });
    register_repository(container, ServiceToken::AuthRepository, |c| {
        Arc::new(HttpAuthRepository::new(c)) as Arc<dyn AuthRepository>
    });

    register_service(
        container,
        ServiceToken::PatientService,
        ServiceToken::PatientRepository,
        PatientService::new,
    );
    register_service(
        container,
        ServiceToken::DoctorService,
        ServiceToken::DoctorRepository,
        DoctorService::new,
    );
    register_service(
        container,
        ServiceToken::AppointmentService,
        ServiceToken::AppointmentRepository,
        AppointmentService::new,
    );
    register_service(
        container,
        ServiceToken::AdmissionService,
        ServiceToken::AdmissionRepository,
        AdmissionService::new,
    );
    register_service(
        container,
        ServiceToken::TreatmentService,
        ServiceToken::TreatmentRepository,
        TreatmentService::new,
    );
    register_service(
        container,
        ServiceToken::StaffService,
        ServiceToken::StaffRepository,
        StaffService::new,
    );
    register_service(
        container,
        ServiceToken::UserService,
        ServiceToken::UserRepository,
        UserService::new,
    );
    register_service(
        container,
        ServiceToken::WardService,
        ServiceToken::WardRepository,
        WardService::new,
    );
    register_service(
        container,
        ServiceToken::DepartmentService,
        ServiceToken::DepartmentRepository,
        DepartmentService::new,
    );
    register_service(
        container,
        ServiceToken::ReportService,
        ServiceToken::ReportRepository,
        ReportService::new,
    );
    container.register(ServiceToken::AuthService, |r| {
        Ok(Arc::new(AuthService::new(
            r.resolve(ServiceToken::AuthRepository)?,
            r.resolve(ServiceToken::TokenStore)?,
        )))
    });
}

/// Every service, resolved once at startup.
#[derive(Clone)]
pub struct AppServices {
    pub tokens: Arc<dyn TokenStore>,
    pub auth: Arc<AuthService>,
    pub patients: Arc<PatientService>,
    pub doctors: Arc<DoctorService>,
    pub appointments: Arc<AppointmentService>,
    pub admissions: Arc<AdmissionService>,
    pub treatments: Arc<TreatmentService>,
    pub staff: Arc<StaffService>,
    pub users: Arc<UserService>,
    pub wards: Arc<WardService>,
    pub departments: Arc<DepartmentService>,
    pub reports: Arc<ReportService>,
}

impl AppServices {
    /// Registers the HTTP-backed defaults and resolves everything.
    pub fn wire(cfg: &ClientConfig, tokens: Arc<dyn TokenStore>) -> Result<Self, WiringError> {
        let container = Container::new();
        register_defaults(&container, cfg.clone(), tokens);
        Self::from_container(&container)
    }

    pub fn from_container(container: &Container) -> Result<Self, WiringError> {
        Ok(Self {
            tokens: container.resolve(ServiceToken::TokenStore)?,
            auth: container.resolve(ServiceToken::AuthService)?,
            patients: container.resolve(ServiceToken::PatientService)?,
            doctors: container.resolve(ServiceToken::DoctorService)?,
            appointments: container.resolve(ServiceToken::AppointmentService)?,
            admissions: container.resolve(ServiceToken::AdmissionService)?,
            treatments: container.resolve(ServiceToken::TreatmentService)?,
            staff: container.resolve(ServiceToken::StaffService)?,
            users: container.resolve(ServiceToken::UserService)?,
            wards: container.resolve(ServiceToken::WardService)?,
            departments: container.resolve(ServiceToken::DepartmentService)?,
            reports: container.resolve(ServiceToken::ReportService)?,
        })
    }
}
