use crate::domain::{Gender, NewPatient, Patient, PatientStatus, PatientUpdate};
use crate::error::{ApiError, ApiResult};
use crate::repositories::PatientRepository;
use crate::services::address::{format_address_for_display, parse_address_json};
use crate::services::nrc::is_valid_nrc_format;
use crate::services::required;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Patient row as shown in lists and detail headers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PatientDto {
    pub id: u64,
    pub name: String,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub department: Option<String>,
    pub status: PatientStatus,
    pub status_label: &'static str,
    pub doctor_name: Option<String>,
    pub last_visit: Option<DateTime<Utc>>,
    pub nrc_number: Option<String>,
    pub address: String,
    pub phone: Option<String>,
}

pub fn to_patient_dto(patient: Patient, today: NaiveDate) -> PatientDto {
    PatientDto {
        age: patient.age_on(today),
        address: format_address_for_display(patient.address.as_deref()),
        id: patient.id,
        name: patient.name,
        gender: patient.gender,
        department: patient.department,
        status: patient.status,
        status_label: patient.status.label(),
        doctor_name: patient.doctor.map(|d| d.name),
        last_visit: patient.last_visit,
        nrc_number: patient.nrc_number,
        phone: patient.phone,
    }
}

fn check_nrc(nrc: Option<&str>) -> ApiResult<()> {
    match nrc {
        Some(value) if !is_valid_nrc_format(value) => Err(ApiError::invalid_input(
            "nrc_number",
            "The NRC number must look like 12/LaMaNa(N)123456.",
        )),
        _ => Ok(()),
    }
}

fn check_address(address: Option<&str>) -> ApiResult<()> {
    match address {
        Some(value) if parse_address_json(value).is_none() => Err(ApiError::invalid_input(
            "address",
            "Select a region, district and township.",
        )),
        _ => Ok(()),
    }
}

pub struct PatientService {
    repo: Arc<dyn PatientRepository>,
}

impl PatientService {
    pub fn new(repo: Arc<dyn PatientRepository>) -> Self {
        Self { repo }
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    fn project(patients: Vec<Patient>) -> Vec<PatientDto> {
        let today = Self::today();
        patients
            .into_iter()
            .map(|p| to_patient_dto(p, today))
            .collect()
    }

    pub async fn list(&self) -> ApiResult<Vec<PatientDto>> {
        Ok(Self::project(self.repo.fetch_all().await?))
    }

    /// A blank query lists every patient.
    pub async fn search(&self, query: &str) -> ApiResult<Vec<PatientDto>> {
        let query = query.trim();
        if query.is_empty() {
            return self.list().await;
        }
        Ok(Self::project(self.repo.search(query).await?))
    }

    pub async fn get(&self, id: u64) -> ApiResult<PatientDto> {
        let patient = self.repo.get_by_id(id).await?;
        Ok(to_patient_dto(patient, Self::today()))
    }

    /// New records must carry a well-formed NRC number and a structured address when either
    /// is given.
    pub async fn create(&self, input: &NewPatient) -> ApiResult<PatientDto> {
        required("name", &input.name)?;
        check_nrc(input.nrc_number.as_deref())?;
        check_address(input.address.as_deref())?;
        let patient = self.repo.create(input).await?;
        Ok(to_patient_dto(patient, Self::today()))
    }

    pub async fn update(&self, id: u64, input: &PatientUpdate) -> ApiResult<PatientDto> {
        if let Some(name) = &input.name {
            required("name", name)?;
        }
        check_nrc(input.nrc_number.as_deref())?;
        check_address(input.address.as_deref())?;
        let patient = self.repo.update(id, input).await?;
        Ok(to_patient_dto(patient, Self::today()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fakes::{patient, FakePatients};

    fn service(fake: Arc<FakePatients>) -> PatientService {
        PatientService::new(fake)
    }

    fn new_patient(name: &str) -> NewPatient {
        NewPatient {
            name: name.to_string(),
            date_of_birth: None,
            gender: None,
            department: None,
            nrc_number: None,
            address: None,
            phone: None,
            blood_type: None,
            doctor_id: None,
        }
    }

    #[tokio::test]
    async fn blank_search_lists_everything_without_searching() {
        let fake = Arc::new(FakePatients {
            patients: vec![patient(1, "Aung Kyaw"), patient(2, "Su Su")],
            ..Default::default()
        });
        let all = service(fake.clone()).search("   ").await.expect("list");
        assert_eq!(all.len(), 2);
        assert!(fake.searches.lock().expect("lock").is_empty());

        let found = service(fake.clone()).search(" Su ").await.expect("search");
        assert_eq!(found.len(), 1);
        assert_eq!(fake.searches.lock().expect("lock").as_slice(), ["Su"]);
    }

    #[test]
    fn dto_projects_age_label_and_address() {
        let mut p = patient(1, "Aung Kyaw");
        p.address = Some(r#"{"region":"Yangon","district":"West","township":"Bahan"}"#.into());
        let today = NaiveDate::from_ymd_opt(2026, 6, 14).expect("date");
        let dto = to_patient_dto(p, today);
        assert_eq!(dto.age, Some(35));
        assert_eq!(dto.status_label, "Outpatient");
        assert_eq!(dto.doctor_name.as_deref(), Some("Dr. Thida Win"));
        assert_eq!(dto.address, "Bahan, West, Yangon");
    }

    #[tokio::test]
    async fn create_rejects_malformed_nrc_locally() {
        let svc = service(Arc::new(FakePatients::default()));
        let mut input = new_patient("Mya Mya");
        input.nrc_number = Some("12/LaMaNa(N)12".into());
        let err = svc.create(&input).await.expect_err("bad nrc");
        assert!(err.field_error("nrc_number").is_some());

        input.nrc_number = Some(" 12/LaMaNa(N)123456\n".into());
        let err = svc.create(&input).await.expect_err("padded nrc");
        assert!(err.field_error("nrc_number").is_some());

        input.nrc_number = Some("12/LaMaNa(N)123456".into());
        let created = svc.create(&input).await.expect("created");
        assert_eq!(created.nrc_number.as_deref(), Some("12/LaMaNa(N)123456"));
        assert_eq!(created.address, "-");
    }

    #[tokio::test]
    async fn create_requires_name_and_structured_address() {
        let svc = service(Arc::new(FakePatients::default()));
        let err = svc.create(&new_patient(" ")).await.expect_err("blank");
        assert!(err.field_error("name").is_some());

        let mut input = new_patient("Mya Mya");
        input.address = Some("Somewhere".into());
        let err = svc.create(&input).await.expect_err("legacy text");
        assert!(err.field_error("address").is_some());
    }
}
