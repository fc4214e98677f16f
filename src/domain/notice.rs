use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::Resource;
use crate::domain::types::{NoticeBody, NoticeId, NoticeTitle, TypeConstraintError};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Notice {
    pub id: NoticeId,
    pub title: String,
    pub body: String,
    pub priority: NoticePriority,
    /// Whether the current user already acknowledged the notice.
    #[serde(default)]
    pub is_read: bool,
    pub created_at: NaiveDateTime,
}

impl Resource for Notice {
    type Id = NoticeId;

    const COLLECTION: &'static str = "notices";

    fn id(&self) -> NoticeId {
        self.id
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum NoticePriority {
    Low,
    #[default]
    Normal,
    HighPriority,
}

impl NoticePriority {
    /// Value used for the notice board category filter.
    pub const fn as_str(self) -> &'static str {
        match self {
            NoticePriority::Low => "low",
            NoticePriority::Normal => "normal",
            NoticePriority::HighPriority => "high-priority",
        }
    }
}

impl Display for NoticePriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NoticePriority {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "low" => Ok(NoticePriority::Low),
            "normal" => Ok(NoticePriority::Normal),
            "high-priority" => Ok(NoticePriority::HighPriority),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

/// Payload posted when publishing a new notice.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewNotice {
    pub title: NoticeTitle,
    pub body: NoticeBody,
    pub priority: NoticePriority,
}

impl NewNotice {
    #[must_use]
    pub fn new(title: NoticeTitle, body: NoticeBody, priority: NoticePriority) -> Self {
        Self {
            title,
            body,
            priority,
        }
    }
}
