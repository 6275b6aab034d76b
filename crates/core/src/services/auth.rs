use crate::domain::Credentials;
use crate::error::ApiResult;
use crate::repositories::AuthRepository;
use crate::services::required;
use crate::services::user::UserDto;
use crate::token::TokenStore;
use std::sync::Arc;

/// Login state. The token store is shared with the HTTP client, so a stored token is sent
/// on every later request.
pub struct AuthService {
    repo: Arc<dyn AuthRepository>,
    tokens: Arc<dyn TokenStore>,
}

impl AuthService {
    pub fn new(repo: Arc<dyn AuthRepository>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { repo, tokens }
    }

    pub async fn login(&self, credentials: &Credentials) -> ApiResult<UserDto> {
        required("email", &credentials.email)?;
        required("password", &credentials.password)?;
        let session = self.repo.login(credentials).await?;
        self.tokens.set(&session.token);
        tracing::info!(user_id = session.user.id, "logged in");
        Ok(session.user.into())
    }

    /// The local token is cleared whatever the backend answers. An already-expired session
    /// counts as logged out.
    pub async fn logout(&self) -> ApiResult<()> {
        let result = self.repo.logout().await;
        self.tokens.clear();
        tracing::info!("logged out");
        match result {
            Err(err) if !err.is_auth_error() => {
                tracing::warn!("logout request failed: {err}");
                Err(err)
            }
            _ => Ok(()),
        }
    }

    pub async fn current_user(&self) -> ApiResult<UserDto> {
        Ok(self.repo.current_user().await?.into())
    }

    pub fn is_authenticated(&self) -> bool {
        self.tokens.get().is_some()
    }
}
