use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account role. Only root users may register or remove other accounts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    RootUser,
    Doctor,
    Nurse,
    Admission,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::RootUser => "root_user",
            UserRole::Doctor => "doctor",
            UserRole::Nurse => "nurse",
            UserRole::Admission => "admission",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UserRole::RootUser => "Root User",
            UserRole::Doctor => "Doctor",
            UserRole::Nurse => "Nurse",
            UserRole::Admission => "Admission",
        }
    }
}

/// A login account.
///
/// Accounts are never hard-deleted: `deleted_at` marks a soft-deleted account that can be
/// restored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_root(&self) -> bool {
        self.role == UserRole::RootUser
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Registration request body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    pub role: UserRole,
}

/// Partial profile update; absent fields are left untouched by the backend.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Login request body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// An authenticated session returned by login.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: User,
}
