//! Token-keyed dependency container.
//!
//! Factories are registered against a closed set of [`ServiceToken`]s and produce each
//! service at most once; later resolutions return the cached instance. A factory receives a
//! [`Resolver`] to pull its own dependencies, and the resolver tracks the path of tokens
//! under construction so a dependency cycle fails with [`WiringError::Cycle`] instead of
//! recursing forever.
//!
//! Instances are stored type-erased and handed out by cloning, so services are registered as
//! `Arc`s and every resolution of a token shares one allocation.

use crate::error::WiringError;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Every injectable dependency.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ServiceToken {
    TokenStore,
    ApiClient,
    PatientRepository,
    DoctorRepository,
    AppointmentRepository,
    AdmissionRepository,
    TreatmentRepository,
    StaffRepository,
    UserRepository,
    WardRepository,
    DepartmentRepository,
    ReportRepository,
    AuthRepository,
    PatientService,
    DoctorService,
    AppointmentService,
    AdmissionService,
    TreatmentService,
    StaffService,
    UserService,
    WardService,
    DepartmentService,
    ReportService,
    AuthService,
}

impl ServiceToken {
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceToken::TokenStore => "TokenStore",
            ServiceToken::ApiClient => "ApiClient",
            ServiceToken::PatientRepository => "PatientRepository",
            ServiceToken::DoctorRepository => "DoctorRepository",
            ServiceToken::AppointmentRepository => "AppointmentRepository",
            ServiceToken::AdmissionRepository => "AdmissionRepository",
            ServiceToken::TreatmentRepository => "TreatmentRepository",
            ServiceToken::StaffRepository => "StaffRepository",
            ServiceToken::UserRepository => "UserRepository",
            ServiceToken::WardRepository => "WardRepository",
            ServiceToken::DepartmentRepository => "DepartmentRepository",
            ServiceToken::ReportRepository => "ReportRepository",
            ServiceToken::AuthRepository => "AuthRepository",
            ServiceToken::PatientService => "PatientService",
            ServiceToken::DoctorService => "DoctorService",
            ServiceToken::AppointmentService => "AppointmentService",
            ServiceToken::AdmissionService => "AdmissionService",
            ServiceToken::TreatmentService => "TreatmentService",
            ServiceToken::StaffService => "StaffService",
            ServiceToken::UserService => "UserService",
            ServiceToken::WardService => "WardService",
            ServiceToken::DepartmentService => "DepartmentService",
            ServiceToken::ReportService => "ReportService",
            ServiceToken::AuthService => "AuthService",
        }
    }
}

impl fmt::Display for ServiceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type Instance = Arc<dyn Any + Send + Sync>;
type Factory = Arc<dyn Fn(&mut Resolver<'_>) -> Result<Instance, WiringError> + Send + Sync>;

fn erase<F>(factory: F) -> Factory
where
    F: Fn(&mut Resolver<'_>) -> Result<Instance, WiringError> + Send + Sync + 'static,
{
    Arc::new(factory)
}

#[derive(Default)]
pub struct Container {
    factories: RwLock<HashMap<ServiceToken, Factory>>,
    instances: RwLock<HashMap<ServiceToken, Instance>>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `factory` for `token`, replacing any earlier registration and its cached
    /// instance.
    pub fn register<T, F>(&self, token: ServiceToken, factory: F)
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(&mut Resolver<'_>) -> Result<T, WiringError> + Send + Sync + 'static,
    {
        let erased = erase(move |resolver| {
            factory(resolver).map(|value| Arc::new(value) as Instance)
        });
        self.factories
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(token, erased);
        self.instances
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&token);
    }

    /// Registers an already-built value.
    pub fn register_instance<T>(&self, token: ServiceToken, value: T)
    where
        T: Clone + Send + Sync + 'static,
    {
        self.register(token, move |_| Ok(value.clone()));
    }

    pub fn is_registered(&self, token: ServiceToken) -> bool {
        self.factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&token)
    }

    /// Returns the cached instance for `token`, constructing it first if needed.
    pub fn resolve<T>(&self, token: ServiceToken) -> Result<T, WiringError>
    where
        T: Clone + Send + Sync + 'static,
    {
        Resolver {
            container: self,
            path: Vec::new(),
        }
        .resolve(token)
    }

    fn cached(&self, token: ServiceToken) -> Option<Instance> {
        self.instances
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&token)
            .cloned()
    }

    fn factory(&self, token: ServiceToken) -> Option<Factory> {
        self.factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&token)
            .cloned()
    }

    /// Keeps whichever instance was stored first if two resolutions raced.
    fn store(&self, token: ServiceToken, instance: Instance) -> Instance {
        self.instances
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(token)
            .or_insert(instance)
            .clone()
    }
}

/// Handle passed to factories for resolving their dependencies.
pub struct Resolver<'c> {
    container: &'c Container,
    path: Vec<ServiceToken>,
}

impl Resolver<'_> {
    pub fn resolve<T>(&mut self, token: ServiceToken) -> Result<T, WiringError>
    where
        T: Clone + Send + Sync + 'static,
    {
        let instance = match self.container.cached(token) {
            Some(instance) => instance,
            None => self.construct(token)?,
        };
        instance
            .downcast_ref::<T>()
            .cloned()
            .ok_or(WiringError::TypeMismatch(token))
    }

    fn construct(&mut self, token: ServiceToken) -> Result<Instance, WiringError> {
        if self.path.contains(&token) {
            let mut cycle = self.path.clone();
            cycle.push(token);
            return Err(WiringError::Cycle(cycle));
        }
        let factory = self
            .container
            .factory(token)
            .ok_or(WiringError::Unregistered(token))?;

        // No lock is held while the factory runs; it re-enters the container.
        self.path.push(token);
        let built = factory(self);
        self.path.pop();

        tracing::debug!(%token, "constructed");
        Ok(self.container.store(token, built?))
    }
}
