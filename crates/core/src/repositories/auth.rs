//! Token authentication over `/login`, `/logout` and `/user`.
//!
//! The repository only talks to the backend. Persisting the issued token is the auth
//! service's job.

use crate::domain::{Credentials, Session, User};
use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::repositories::helpers::{malformed, ErrorMessages, Envelope};
use crate::repositories::user::UserWire;
use crate::repositories::AuthRepository;
use async_trait::async_trait;
use serde::de::IgnoredAny;
use serde::Deserialize;
use std::sync::Arc;

const LOGIN_ERRORS: ErrorMessages = ErrorMessages::new()
    .auth("Invalid email or password.")
    .validation("Please enter a valid email and password.");

const SESSION_ERRORS: ErrorMessages =
    ErrorMessages::new().auth("Your session has expired. Please log in again.");

#[derive(Debug, Deserialize)]
struct LoginWire {
    #[serde(default, alias = "access_token")]
    token: Option<String>,
    user: UserWire,
}

pub struct HttpAuthRepository {
    client: Arc<ApiClient>,
}

impl HttpAuthRepository {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthRepository for HttpAuthRepository {
    async fn login(&self, credentials: &Credentials) -> ApiResult<Session> {
        let wire: Envelope<LoginWire> = self
            .client
            .post("login", credentials)
            .await
            .map_err(|e| LOGIN_ERRORS.apply(e))?;
        let wire = wire.into_inner();
        let token = wire
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| malformed("login response carried no token"))?;
        Ok(Session {
            token,
            user: wire.user.into(),
        })
    }

    async fn logout(&self) -> ApiResult<()> {
        let _: IgnoredAny = self.client.post_empty("logout").await?;
        Ok(())
    }

    async fn current_user(&self) -> ApiResult<User> {
        let wire: Envelope<UserWire> = self
            .client
            .get("user")
            .await
            .map_err(|e| SESSION_ERRORS.apply(e))?;
        Ok(wire.into_inner().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;
    use crate::test_support::{client_for, spawn_backend};
    use crate::token::MemoryTokenStore;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    fn repository(base: &str) -> HttpAuthRepository {
        HttpAuthRepository::new(Arc::new(client_for(
            base,
            Arc::new(MemoryTokenStore::new()),
        )))
    }

    fn credentials(password: &str) -> Credentials {
        Credentials {
            email: "root@hms.test".into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn login_accepts_access_token_alias() {
        let router = Router::new().route(
            "/login",
            post(|Json(body): Json<Value>| async move {
                if body["password"] == "secret" {
                    (
                        StatusCode::OK,
                        Json(json!({
                            "access_token": "abc",
                            "user": { "id": 1, "name": "Root", "email": "root@hms.test", "role": "root_user" }
                        })),
                    )
                } else {
                    (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Unauthenticated." })))
                }
            }),
        );
        let base = spawn_backend(router).await;
        let repo = repository(&base);

        let session = repo.login(&credentials("secret")).await.expect("login");
        assert_eq!(session.token, "abc");
        assert_eq!(session.user.role, UserRole::RootUser);

        let err = repo.login(&credentials("wrong")).await.expect_err("401");
        assert!(err.is_auth_error());
        assert_eq!(err.message, "Invalid email or password.");
    }

    #[tokio::test]
    async fn login_without_token_is_malformed() {
        let router = Router::new().route(
            "/login",
            post(|| async {
                Json(json!({ "user": { "id": 1, "name": "R", "email": "r@hms.test", "role": "nurse" } }))
            }),
        );
        let base = spawn_backend(router).await;
        let err = repository(&base)
            .login(&credentials("secret"))
            .await
            .expect_err("no token");
        assert_eq!(err.status, 502);
    }
}
