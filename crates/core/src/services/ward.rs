use crate::domain::WardCatalog;
use crate::error::ApiResult;
use crate::repositories::WardRepository;
use crate::services::SelectOption;
use std::sync::Arc;

/// One option per ward, keyed by ward code.
pub fn ward_options(catalog: &WardCatalog) -> Vec<SelectOption> {
    catalog
        .iter()
        .map(|(code, ward)| SelectOption::new(code.clone(), ward.name.clone()))
        .collect()
}

/// Rooms of `ward`; empty for an unknown ward.
pub fn room_options(catalog: &WardCatalog, ward: &str) -> Vec<SelectOption> {
    catalog
        .get(ward)
        .map(|w| {
            w.rooms
                .iter()
                .map(|room| SelectOption::new(room.clone(), room.clone()))
                .collect()
        })
        .unwrap_or_default()
}

pub struct WardService {
    repo: Arc<dyn WardRepository>,
}

impl WardService {
    pub fn new(repo: Arc<dyn WardRepository>) -> Self {
        Self { repo }
    }

    pub async fn catalog(&self) -> ApiResult<WardCatalog> {
        self.repo.fetch_catalog().await
    }

    pub async fn options(&self) -> ApiResult<Vec<SelectOption>> {
        Ok(ward_options(&self.catalog().await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Ward;

    fn catalog() -> WardCatalog {
        let mut catalog = WardCatalog::new();
        catalog.insert(
            "ICU".to_string(),
            Ward {
                name: "Intensive Care".to_string(),
                rooms: vec!["ICU-1".to_string(), "ICU-2".to_string()],
            },
        );
        catalog
    }

    #[test]
    fn ward_options_map_code_to_name() {
        assert_eq!(
            ward_options(&catalog()),
            vec![SelectOption::new("ICU", "Intensive Care")]
        );
    }

    #[test]
    fn room_options_for_known_and_unknown_wards() {
        let rooms = room_options(&catalog(), "ICU");
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[1], SelectOption::new("ICU-2", "ICU-2"));
        assert!(room_options(&catalog(), "ER").is_empty());
    }

    #[tokio::test]
    async fn options_come_from_repository_catalog() {
        use crate::services::fakes::FakeWards;
        let svc = WardService::new(Arc::new(FakeWards { catalog: catalog() }));
        assert_eq!(svc.options().await.expect("options")[0].value, "ICU");
    }
}
