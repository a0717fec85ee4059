//! HTTP DTOs for mission endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ClientId, MissionStatus, UserId};
use crate::domain::mission::{Mission, NewMission};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMissionRequest {
    pub client_id: ClientId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub nature: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub place: String,
    #[serde(default)]
    pub frequency: String,
    #[serde(default)]
    pub assignee_id: Option<UserId>,
}

impl From<CreateMissionRequest> for NewMission {
    fn from(req: CreateMissionRequest) -> Self {
        Self {
            client_id: req.client_id,
            title: req.title,
            description: req.description,
            nature: req.nature,
            start_date: req.start_date,
            place: req.place,
            frequency: req.frequency,
            assignee_id: req.assignee_id,
        }
    }
}

/// `null` or absent unassigns.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignMissionRequest {
    #[serde(default)]
    pub assignee_id: Option<UserId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MissionResponse {
    pub id: String,
    pub client_id: String,
    pub title: String,
    pub description: String,
    pub nature: String,
    pub start_date: NaiveDate,
    pub place: String,
    pub frequency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    pub status: MissionStatus,
    pub created_at: String,
    pub version: i64,
}

impl From<&Mission> for MissionResponse {
    fn from(m: &Mission) -> Self {
        Self {
            id: m.id().to_string(),
            client_id: m.client_id().to_string(),
            title: m.title().to_string(),
            description: m.description().to_string(),
            nature: m.nature().to_string(),
            start_date: m.start_date(),
            place: m.place().to_string(),
            frequency: m.frequency().to_string(),
            assignee_id: m.assignee_id().map(ToString::to_string),
            status: m.status(),
            created_at: m.created_at().as_datetime().to_rfc3339(),
            version: m.version(),
        }
    }
}
