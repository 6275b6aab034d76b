//! User account repository over `/users`.
//!
//! Accounts are soft-deleted; `?deleted=true` lists the deleted ones and
//! `POST /users/{id}/restore` brings one back.

use crate::domain::{NewUser, User, UserRole, UserUpdate};
use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::repositories::helpers::{ErrorMessages, Envelope};
use crate::repositories::UserRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;

const LIST_ERRORS: ErrorMessages =
    ErrorMessages::new().forbidden("You do not have permission to view users.");

const GET_ERRORS: ErrorMessages = ErrorMessages::new()
    .forbidden("You do not have permission to view this user.")
    .not_found("User not found.");

const CREATE_ERRORS: ErrorMessages = ErrorMessages::new()
    .forbidden("Only root users can register new users.")
    .validation("Please correct the highlighted fields.");

const UPDATE_ERRORS: ErrorMessages = ErrorMessages::new()
    .forbidden("You do not have permission to update this user.")
    .not_found("User not found.")
    .validation("Please correct the highlighted fields.");

const DELETE_ERRORS: ErrorMessages = ErrorMessages::new()
    .forbidden("Cannot delete this user. Root users cannot be deleted.")
    .not_found("User not found.");

const RESTORE_ERRORS: ErrorMessages = ErrorMessages::new()
    .forbidden("Only root users can restore users.")
    .not_found("User not found or not deleted.");

#[derive(Debug, Deserialize)]
pub(crate) struct UserWire {
    id: u64,
    name: String,
    email: String,
    role: UserRole,
    #[serde(default)]
    email_verified_at: Option<DateTime<Utc>>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    deleted_at: Option<DateTime<Utc>>,
}

impl From<UserWire> for User {
    fn from(wire: UserWire) -> Self {
        User {
            id: wire.id,
            name: wire.name,
            email: wire.email,
            role: wire.role,
            email_verified_at: wire.email_verified_at,
            created_at: wire.created_at,
            updated_at: wire.updated_at,
            deleted_at: wire.deleted_at,
        }
    }
}

pub struct HttpUserRepository {
    client: Arc<ApiClient>,
}

impl HttpUserRepository {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UserRepository for HttpUserRepository {
    async fn fetch_all(&self, deleted: bool) -> ApiResult<Vec<User>> {
        let query = if deleted {
            vec![("deleted", "true".to_string())]
        } else {
            Vec::new()
        };
        let wires: Envelope<Vec<UserWire>> = self
            .client
            .get_with_query("users", &query)
            .await
            .map_err(|e| LIST_ERRORS.apply(e))?;
        Ok(wires.into_inner().into_iter().map(User::from).collect())
    }

    async fn get_by_id(&self, id: u64) -> ApiResult<User> {
        let wire: Envelope<UserWire> = self
            .client
            .get(&format!("users/{id}"))
            .await
            .map_err(|e| GET_ERRORS.apply(e))?;
        Ok(wire.into_inner().into())
    }

    async fn create(&self, input: &NewUser) -> ApiResult<User> {
        let wire: Envelope<UserWire> = self
            .client
            .post("users", input)
            .await
            .map_err(|e| CREATE_ERRORS.apply(e))?;
        Ok(wire.into_inner().into())
    }

    async fn update(&self, id: u64, input: &UserUpdate) -> ApiResult<User> {
        let wire: Envelope<UserWire> = self
            .client
            .patch(&format!("users/{id}"), input)
            .await
            .map_err(|e| UPDATE_ERRORS.apply(e))?;
        Ok(wire.into_inner().into())
    }

    async fn delete(&self, id: u64) -> ApiResult<()> {
        self.client
            .delete(&format!("users/{id}"))
            .await
            .map_err(|e| DELETE_ERRORS.apply(e))
    }

    async fn restore(&self, id: u64) -> ApiResult<User> {
        let wire: Envelope<UserWire> = self
            .client
            .post_empty(&format!("users/{id}/restore"))
            .await
            .map_err(|e| RESTORE_ERRORS.apply(e))?;
        Ok(wire.into_inner().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{client_for, spawn_backend};
    use crate::token::MemoryTokenStore;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::{delete, get};
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;

    fn repository(base: &str) -> HttpUserRepository {
        HttpUserRepository::new(Arc::new(client_for(
            base,
            Arc::new(MemoryTokenStore::new()),
        )))
    }

    #[tokio::test]
    async fn deleted_flag_lists_soft_deleted_users() {
        let router = Router::new().route(
            "/users",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                let deleted_at = if q.get("deleted").map(String::as_str) == Some("true") {
                    json!("2026-01-01T00:00:00.000000Z")
                } else {
                    json!(null)
                };
                Json(json!({ "data": [{
                    "id": 2, "name": "Nurse Hla", "email": "hla@hms.test",
                    "role": "nurse", "deleted_at": deleted_at
                }]}))
            }),
        );
        let base = spawn_backend(router).await;
        let repo = repository(&base);
        assert!(!repo.fetch_all(false).await.expect("active")[0].is_deleted());
        assert!(repo.fetch_all(true).await.expect("deleted")[0].is_deleted());
    }

    #[tokio::test]
    async fn forbidden_delete_explains_root_protection() {
        let router = Router::new().route(
            "/users/:id",
            delete(|| async { (StatusCode::FORBIDDEN, Json(json!({ "message": "Forbidden" }))) }),
        );
        let base = spawn_backend(router).await;
        let err = repository(&base).delete(1).await.expect_err("403");
        assert!(err.is_forbidden_error());
        assert_eq!(
            err.message,
            "Cannot delete this user. Root users cannot be deleted."
        );
    }

    #[tokio::test]
    async fn validation_errors_keep_field_messages() {
        let router = Router::new().route(
            "/users",
            axum::routing::post(|| async {
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({
                        "message": "The email has already been taken.",
                        "errors": { "email": ["The email has already been taken."] }
                    })),
                )
            }),
        );
        let base = spawn_backend(router).await;
        let input = NewUser {
            name: "Dr. New".into(),
            email: "taken@hms.test".into(),
            password: "secret123".into(),
            password_confirmation: "secret123".into(),
            role: UserRole::Doctor,
        };
        let err = repository(&base).create(&input).await.expect_err("422");
        assert_eq!(err.message, "Please correct the highlighted fields.");
        assert_eq!(
            err.field_error("email"),
            Some("The email has already been taken.")
        );
    }
}
