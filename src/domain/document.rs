use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::Resource;
use crate::domain::types::{DocumentId, PatientId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub title: String,
    pub kind: DocumentKind,
    /// Patient the document belongs to, if any.
    pub patient_id: Option<PatientId>,
    pub uploaded_at: NaiveDateTime,
}

impl Resource for Document {
    type Id = DocumentId;

    const COLLECTION: &'static str = "documents";

    fn id(&self) -> DocumentId {
        self.id
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    Report,
    Prescription,
    LabResult,
    Other,
}

impl DocumentKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Report => "report",
            DocumentKind::Prescription => "prescription",
            DocumentKind::LabResult => "lab-result",
            DocumentKind::Other => "other",
        }
    }
}

impl Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
