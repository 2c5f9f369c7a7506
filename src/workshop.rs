//! Workshop plan data as read from a `PLAN.yml` file

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PlannerError, Result};

/// Root of a plan file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkshopsRoot {
    #[serde(default)]
    pub workshops: Vec<WorkshopData>,
}

/// One workshop of a dojo date. Times are kept as the pre-formatted strings
/// found in the plan file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkshopData {
    pub title: String,
    #[serde(rename = "begintime")]
    pub begin_time: String,
    #[serde(rename = "endtime")]
    pub end_time: String,
    #[serde(rename = "targetAudience")]
    pub target_audience: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, rename = "shortCode", skip_serializing_if = "Option::is_none")]
    pub short_code: Option<String>,
}

impl WorkshopsRoot {
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml_ng::Error> {
        serde_yaml_ng::from_str(yaml)
    }

    /// Workshops as the records stored in an event document
    pub fn to_records(&self) -> Result<Vec<Value>> {
        self.workshops
            .iter()
            .map(|ws| serde_json::to_value(ws).map_err(PlannerError::from))
            .collect()
    }
}
