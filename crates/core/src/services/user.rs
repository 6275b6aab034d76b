use crate::domain::{NewUser, User, UserRole, UserUpdate};
use crate::error::{ApiError, ApiResult};
use crate::repositories::UserRepository;
use crate::services::required;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UserDto {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub role_label: &'static str,
    pub verified: bool,
    pub deleted: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            verified: user.email_verified_at.is_some(),
            deleted: user.is_deleted(),
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            role_label: user.role.label(),
            created_at: user.created_at,
        }
    }
}

fn check_password(password: &str, confirmation: Option<&str>) -> ApiResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::invalid_input(
            "password",
            format!("The password must be at least {MIN_PASSWORD_LEN} characters."),
        ));
    }
    if confirmation.is_some_and(|c| c != password) {
        return Err(ApiError::invalid_input(
            "password_confirmation",
            "The password confirmation does not match.",
        ));
    }
    Ok(())
}

pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Active accounts, or soft-deleted ones when `deleted` is set.
    pub async fn list(&self, deleted: bool) -> ApiResult<Vec<UserDto>> {
        let users = self.repo.fetch_all(deleted).await?;
        Ok(users.into_iter().map(UserDto::from).collect())
    }

    pub async fn get(&self, id: u64) -> ApiResult<UserDto> {
        Ok(self.repo.get_by_id(id).await?.into())
    }

    pub async fn create(&self, input: &NewUser) -> ApiResult<UserDto> {
        required("name", &input.name)?;
        required("email", &input.email)?;
        check_password(&input.password, Some(&input.password_confirmation))?;
        Ok(self.repo.create(input).await?.into())
    }

    pub async fn update(&self, id: u64, input: &UserUpdate) -> ApiResult<UserDto> {
        if let Some(password) = &input.password {
            check_password(password, None)?;
        }
        Ok(self.repo.update(id, input).await?.into())
    }

    pub async fn delete(&self, id: u64) -> ApiResult<()> {
        self.repo.delete(id).await
    }

    pub async fn restore(&self, id: u64) -> ApiResult<UserDto> {
        Ok(self.repo.restore(id).await?.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fakes::{user, FakeUsers};
    use chrono::TimeZone;

    fn service() -> UserService {
        let mut gone = user(5, UserRole::Nurse);
        gone.deleted_at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).single();
        UserService::new(Arc::new(FakeUsers {
            users: vec![user(1, UserRole::RootUser), user(2, UserRole::Doctor)],
            deleted: vec![gone],
        }))
    }

    fn new_user(password: &str, confirmation: &str) -> NewUser {
        NewUser {
            name: "Dr. New".into(),
            email: "new@hms.test".into(),
            password: password.into(),
            password_confirmation: confirmation.into(),
            role: UserRole::Doctor,
        }
    }

    #[tokio::test]
    async fn lists_active_and_deleted_separately() {
        let svc = service();
        let active = svc.list(false).await.expect("active");
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].role_label, "Root User");
        let deleted = svc.list(true).await.expect("deleted");
        assert!(deleted[0].deleted);
        assert!(!svc.restore(5).await.expect("restored").deleted);
    }

    #[tokio::test]
    async fn create_checks_password_confirmation_locally() {
        let svc = service();
        let err = svc
            .create(&new_user("password1", "password2"))
            .await
            .expect_err("mismatch");
        assert!(err.field_error("password_confirmation").is_some());

        let err = svc.create(&new_user("short", "short")).await.expect_err("short");
        assert!(err.field_error("password").is_some());

        let created = svc
            .create(&new_user("password1", "password1"))
            .await
            .expect("created");
        assert_eq!(created.email, "new@hms.test");
    }

    #[tokio::test]
    async fn root_deletion_error_propagates() {
        let err = service().delete(1).await.expect_err("root");
        assert!(err.is_forbidden_error());
        assert!(err.message.contains("Root users cannot be deleted"));
        service().delete(2).await.expect("deleted");
    }
}
