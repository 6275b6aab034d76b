//! In-memory repositories for service, hook and wiring tests.

use crate::domain::*;
use crate::error::{ApiError, ApiResult};
use crate::repositories::*;
use async_trait::async_trait;
use chrono::NaiveDate;
use hms_types::{DateRange, Paginated};
use std::sync::Mutex;

pub(crate) fn patient(id: u64, name: &str) -> Patient {
    Patient {
        id,
        name: name.to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 6, 15),
        gender: Some(Gender::Female),
        department: Some("Cardiology".to_string()),
        status: PatientStatus::Outpatient,
        doctor: Some(StaffRef {
            id: 1,
            name: "Dr. Thida Win".to_string(),
            email: None,
        }),
        last_visit: None,
        nrc_number: None,
        address: None,
        phone: None,
        blood_type: None,
    }
}

pub(crate) fn admission(id: u64, status: AdmissionStatus) -> Admission {
    Admission {
        id,
        admission_number: format!("ADM-{id:05}"),
        admission_type: AdmissionType::Inpatient,
        status,
        ward: Some("ICU".to_string()),
        bed_number: Some("4".to_string()),
        patient_id: 11,
        patient_name: Some("Aung Kyaw".to_string()),
        doctor: None,
        admitted_at: NaiveDate::from_ymd_opt(2026, 1, 2),
        discharged_at: None,
        diagnosis: Some("Pneumonia".to_string()),
        discharge_summary: None,
        death_cause: None,
    }
}

pub(crate) fn treatment(id: u64) -> Treatment {
    Treatment {
        id,
        admission_id: 8,
        patient_id: 3,
        treatment_type: TreatmentType::Medication,
        name: "Amoxicillin".to_string(),
        notes: Some("Take with food".to_string()),
        medications: Some("Amoxicillin".to_string()),
        dosage: Some("500mg TDS".to_string()),
        findings: None,
        outcome: TreatmentOutcome::Ongoing,
        doctor: None,
        nurse: Some(StaffRef {
            id: 9,
            name: "Nurse May".to_string(),
            email: None,
        }),
        treatment_date: NaiveDate::from_ymd_opt(2026, 1, 3),
        created_at: None,
        updated_at: None,
    }
}

pub(crate) fn staff(id: u64, role: StaffRole) -> Staff {
    Staff {
        id,
        name: format!("{} {id}", role.as_str()),
        email: format!("staff{id}@hms.test"),
        role,
    }
}

pub(crate) fn user(id: u64, role: UserRole) -> User {
    User {
        id,
        name: format!("User {id}"),
        email: format!("user{id}@hms.test"),
        role,
        email_verified_at: None,
        created_at: None,
        updated_at: None,
        deleted_at: None,
    }
}

#[derive(Default)]
pub(crate) struct FakePatients {
    pub patients: Vec<Patient>,
    pub searches: Mutex<Vec<String>>,
}

#[async_trait]
impl PatientRepository for FakePatients {
    async fn fetch_all(&self) -> ApiResult<Vec<Patient>> {
        Ok(self.patients.clone())
    }

    async fn search(&self, query: &str) -> ApiResult<Vec<Patient>> {
        if let Ok(mut searches) = self.searches.lock() {
            searches.push(query.to_string());
        }
        Ok(self
            .patients
            .iter()
            .filter(|p| p.name.contains(query))
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: u64) -> ApiResult<Patient> {
        self.patients
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ApiError::new(404, "Not Found"))
    }

    async fn create(&self, input: &NewPatient) -> ApiResult<Patient> {
        let mut created = patient(100, &input.name);
        created.nrc_number = input.nrc_number.clone();
        created.address = input.address.clone();
        Ok(created)
    }

    async fn update(&self, id: u64, input: &PatientUpdate) -> ApiResult<Patient> {
        let mut updated = self.get_by_id(id).await?;
        if let Some(name) = &input.name {
            updated.name = name.clone();
        }
        Ok(updated)
    }
}

#[derive(Default)]
pub(crate) struct FakeAdmissions {
    pub admissions: Vec<Admission>,
    pub mutations: Mutex<Vec<&'static str>>,
}

impl FakeAdmissions {
    /// Mutating repository calls, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.mutations.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.mutations.lock().unwrap().push(call);
    }

    fn find(&self, id: u64) -> ApiResult<Admission> {
        self.admissions
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| ApiError::new(404, "Not Found"))
    }
}

#[async_trait]
impl AdmissionRepository for FakeAdmissions {
    async fn fetch_page(&self, page: u32) -> ApiResult<Paginated<Admission>> {
        Ok(Paginated {
            data: self.admissions.clone(),
            current_page: page,
            last_page: 4,
            per_page: 15,
            total: 50,
        })
    }

    async fn fetch_for_patient(&self, patient_id: u64) -> ApiResult<Vec<Admission>> {
        Ok(self
            .admissions
            .iter()
            .filter(|a| a.patient_id == patient_id)
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: u64) -> ApiResult<Admission> {
        self.find(id)
    }

    async fn create(&self, input: &NewAdmission) -> ApiResult<Admission> {
        self.record("create");
        let mut created = admission(200, AdmissionStatus::Admitted);
        created.patient_id = input.patient_id;
        Ok(created)
    }

    async fn update(&self, id: u64, _input: &AdmissionUpdate) -> ApiResult<Admission> {
        self.record("update");
        self.find(id)
    }

    async fn discharge(&self, id: u64, input: &DischargeRequest) -> ApiResult<Admission> {
        self.record("discharge");
        let mut admission = self.find(id)?;
        admission.status = AdmissionStatus::Discharged;
        admission.discharged_at = Some(input.discharged_at);
        admission.discharge_summary = input.discharge_summary.clone();
        Ok(admission)
    }

    async fn confirm_death(&self, id: u64, input: &DeathConfirmation) -> ApiResult<Admission> {
        self.record("confirm_death");
        let mut admission = self.find(id)?;
        admission.status = AdmissionStatus::Deceased;
        admission.death_cause = Some(input.death_cause.clone());
        Ok(admission)
    }

    async fn convert_to_inpatient(&self, id: u64) -> ApiResult<Admission> {
        self.record("convert_to_inpatient");
        let mut admission = self.find(id)?;
        if admission.admission_type == AdmissionType::Inpatient {
            return Err(ApiError::invalid_input(
                "admission_type",
                "This admission is already an inpatient admission.",
            ));
        }
        admission.admission_type = AdmissionType::Inpatient;
        Ok(admission)
    }
}

#[derive(Default)]
pub(crate) struct FakeTreatments {
    pub treatments: Vec<Treatment>,
}

#[async_trait]
impl TreatmentRepository for FakeTreatments {
    async fn fetch_for_admission(
        &self,
        patient_id: u64,
        admission_id: u64,
    ) -> ApiResult<Vec<Treatment>> {
        Ok(self
            .treatments
            .iter()
            .filter(|t| t.patient_id == patient_id && t.admission_id == admission_id)
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, _p: u64, _a: u64, id: u64) -> ApiResult<Treatment> {
        self.treatments
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| ApiError::new(404, "Not Found"))
    }

    async fn create(&self, p: u64, a: u64, input: &NewTreatment) -> ApiResult<Treatment> {
        let mut created = treatment(300);
        created.patient_id = p;
        created.admission_id = a;
        created.name = input.name.clone();
        Ok(created)
    }

    async fn update(
        &self,
        p: u64,
        a: u64,
        id: u64,
        input: &TreatmentUpdate,
    ) -> ApiResult<Treatment> {
        let mut updated = self.get_by_id(p, a, id).await?;
        if let Some(outcome) = input.outcome {
            updated.outcome = outcome;
        }
        Ok(updated)
    }
}

#[derive(Default)]
pub(crate) struct FakeStaff {
    pub staff: Vec<Staff>,
}

#[async_trait]
impl StaffRepository for FakeStaff {
    async fn fetch_all(&self) -> ApiResult<Vec<Staff>> {
        Ok(self.staff.clone())
    }

    async fn fetch_by_role(&self, role: StaffRole) -> ApiResult<Vec<Staff>> {
        Ok(self.staff.iter().filter(|s| s.role == role).cloned().collect())
    }

    async fn get_by_id(&self, id: u64) -> ApiResult<Staff> {
        self.staff
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| ApiError::new(404, "Staff member not found."))
    }
}

#[derive(Default)]
pub(crate) struct FakeUsers {
    pub users: Vec<User>,
    pub deleted: Vec<User>,
}

#[async_trait]
impl UserRepository for FakeUsers {
    async fn fetch_all(&self, deleted: bool) -> ApiResult<Vec<User>> {
        Ok(if deleted {
            self.deleted.clone()
        } else {
            self.users.clone()
        })
    }

    async fn get_by_id(&self, id: u64) -> ApiResult<User> {
        self.users
            .iter()
            .chain(self.deleted.iter())
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| ApiError::new(404, "User not found."))
    }

    async fn create(&self, input: &NewUser) -> ApiResult<User> {
        let mut created = user(400, input.role);
        created.name = input.name.clone();
        created.email = input.email.clone();
        Ok(created)
    }

    async fn update(&self, id: u64, input: &UserUpdate) -> ApiResult<User> {
        let mut updated = self.get_by_id(id).await?;
        if let Some(role) = input.role {
            updated.role = role;
        }
        Ok(updated)
    }

    async fn delete(&self, id: u64) -> ApiResult<()> {
        let target = self.get_by_id(id).await?;
        if target.is_root() {
            return Err(ApiError::new(
                403,
                "Cannot delete this user. Root users cannot be deleted.",
            ));
        }
        Ok(())
    }

    async fn restore(&self, id: u64) -> ApiResult<User> {
        let mut restored = self.get_by_id(id).await?;
        restored.deleted_at = None;
        Ok(restored)
    }
}

#[derive(Default)]
pub(crate) struct FakeWards {
    pub catalog: WardCatalog,
}

#[async_trait]
impl WardRepository for FakeWards {
    async fn fetch_catalog(&self) -> ApiResult<WardCatalog> {
        Ok(self.catalog.clone())
    }
}

#[derive(Default)]
pub(crate) struct FakeDepartments {
    pub departments: Vec<Department>,
}

#[async_trait]
impl DepartmentRepository for FakeDepartments {
    async fn fetch_all(&self) -> ApiResult<Vec<Department>> {
        Ok(self.departments.clone())
    }
}

/// Records every requested range and answers with an empty report.
#[derive(Default)]
pub(crate) struct FakeReports {
    pub ranges: Mutex<Vec<DateRange>>,
}

#[async_trait]
impl ReportRepository for FakeReports {
    async fn fetch_dashboard(&self, range: DateRange) -> ApiResult<DashboardReport> {
        if let Ok(mut ranges) = self.ranges.lock() {
            ranges.push(range);
        }
        Ok(DashboardReport {
            range,
            totals: ReportTotals::default(),
            patients_by_status: Vec::new(),
            admissions_by_type: Vec::new(),
            treatments_by_outcome: Vec::new(),
            admissions_over_time: Vec::new(),
        })
    }
}

/// Accepts the password `secret`; `logout_error` makes logout fail.
#[derive(Default)]
pub(crate) struct FakeAuth {
    pub logout_error: Option<ApiError>,
}

#[async_trait]
impl AuthRepository for FakeAuth {
    async fn login(&self, credentials: &Credentials) -> ApiResult<Session> {
        if credentials.password != "secret" {
            return Err(ApiError::new(401, "Invalid email or password."));
        }
        Ok(Session {
            token: "session-token".to_string(),
            user: user(1, UserRole::RootUser),
        })
    }

    async fn logout(&self) -> ApiResult<()> {
        match &self.logout_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    async fn current_user(&self) -> ApiResult<User> {
        Ok(user(1, UserRole::RootUser))
    }
}
