use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MaintenanceStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    pub id: Uuid,
    pub vehicle_id: Option<Uuid>,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub scheduled_date: NaiveDate,
    pub completed_date: Option<NaiveDate>,
    pub cost: f64,
    pub status: MaintenanceStatus,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMaintenanceRecord {
    #[serde(default)]
    pub vehicle_id: Option<Uuid>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    pub scheduled_date: NaiveDate,
    #[serde(default)]
    pub completed_date: Option<NaiveDate>,
    #[serde(default)]
    pub cost: f64,
    #[serde(default = "default_maintenance_status")]
    pub status: MaintenanceStatus,
    #[serde(default)]
    pub notes: String,
}

fn default_maintenance_status() -> MaintenanceStatus {
    MaintenanceStatus::Scheduled
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenancePatch {
    #[serde(default, deserialize_with = "super::nullable")]
    pub vehicle_id: Option<Option<Uuid>>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub description: Option<String>,
    pub scheduled_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub completed_date: Option<Option<NaiveDate>>,
    pub cost: Option<f64>,
    pub status: Option<MaintenanceStatus>,
    pub notes: Option<String>,
}

impl MaintenancePatch {
    pub fn apply(self, record: &mut MaintenanceRecord) {
        if let Some(vehicle_id) = self.vehicle_id {
            record.vehicle_id = vehicle_id;
        }
        if let Some(kind) = self.kind {
            record.kind = kind;
        }
        if let Some(description) = self.description {
            record.description = description;
        }
        if let Some(scheduled_date) = self.scheduled_date {
            record.scheduled_date = scheduled_date;
        }
        if let Some(completed_date) = self.completed_date {
            record.completed_date = completed_date;
        }
        if let Some(cost) = self.cost {
            record.cost = cost;
        }
        if let Some(status) = self.status {
            record.status = status;
        }
        if let Some(notes) = self.notes {
            record.notes = notes;
        }
    }
}
