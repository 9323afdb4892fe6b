use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single catalog record: one product tied to one district.
///
/// The `state` and `district` fields are free-text as entered in the
/// source data; they are not normalized and do not necessarily match the
/// spellings used by boundary datasets. Everything past `id` and the
/// product name deserializes defensively so one sparse record cannot
/// fail a whole list.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Product {
    pub id: i64,

    #[serde(rename = "product")]
    pub name: String,

    #[serde(default)]
    pub state: String,

    #[serde(default)]
    pub district: String,

    /// Combined "district, state" display string served by the backend.
    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub lgd_code: Option<i64>,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub sector: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub gi_status: String,

    #[serde(default)]
    pub photo: Option<String>,

    #[serde(default)]
    pub ministry_department: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// "district, state" for display, preferring the server-provided field.
    pub fn display_location(&self) -> String {
        match &self.location {
            Some(loc) if !loc.is_empty() => loc.clone(),
            _ => format!("{}, {}", self.district, self.state),
        }
    }

    /// Whether the record carries a geographical-indication tag.
    /// The source data stores this as free text; blank and "No" both
    /// mean untagged.
    pub fn has_gi_tag(&self) -> bool {
        let status = self.gi_status.trim();
        !status.is_empty() && !status.eq_ignore_ascii_case("no")
    }
}
