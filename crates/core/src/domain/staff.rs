use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Doctor,
    Nurse,
}

impl StaffRole {
    pub fn as_str(self) -> &'static str {
        match self {
            StaffRole::Doctor => "doctor",
            StaffRole::Nurse => "nurse",
        }
    }
}

/// A doctor or nurse as a first-class list entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Staff {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: StaffRole,
}

impl Staff {
    pub fn to_ref(&self) -> StaffRef {
        StaffRef {
            id: self.id,
            name: self.name.clone(),
            email: Some(self.email.clone()),
        }
    }
}

/// Staff member embedded in another record (attending doctor, treating nurse).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffRef {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
