use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One day's bulletin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub title: String,
    /// Verbatim `name` of the day marker, used as the external key.
    pub date: String,
    /// `None` when the creation note could not be read.
    pub created_at: Option<NaiveDateTime>,
    #[serde(rename = "absent")]
    pub absences: Vec<Absence>,
    pub infos: Vec<String>,
    pub substitutions: Vec<Substitution>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Absence {
    pub class: String,
    pub periods: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    pub class: String,
    pub teacher: String,
    pub period: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub substitute: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub room: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub info: String,
}

// ── Tests ──
