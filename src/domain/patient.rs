use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::domain::Resource;
use crate::domain::types::PatientId;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    pub id: PatientId,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: PatientStatus,
    /// Department the patient is currently assigned to.
    pub department: Option<String>,
}

impl Resource for Patient {
    type Id = PatientId;

    const COLLECTION: &'static str = "patients";

    fn id(&self) -> PatientId {
        self.id
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum PatientStatus {
    Active,
    Discharged,
}

impl PatientStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            PatientStatus::Active => "active",
            PatientStatus::Discharged => "discharged",
        }
    }
}

impl Display for PatientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
