use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Active,
    OnHold,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ProjectStatus,
    /// Member vehicle ids in the order they joined. Never holds duplicates.
    #[serde(default)]
    pub assigned_vehicles: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Project {
    pub fn has_vehicle(&self, vehicle_id: Uuid) -> bool {
        self.assigned_vehicles.contains(&vehicle_id)
    }

    pub(crate) fn remove_vehicle(&mut self, vehicle_id: Uuid) {
        self.assigned_vehicles.retain(|id| *id != vehicle_id);
    }

    /// Moves the vehicle to the end of the membership list.
    pub(crate) fn push_vehicle(&mut self, vehicle_id: Uuid) {
        self.remove_vehicle(vehicle_id);
        self.assigned_vehicles.push(vehicle_id);
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "default_project_status")]
    pub status: ProjectStatus,
}

fn default_project_status() -> ProjectStatus {
    ProjectStatus::Active
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<ProjectStatus>,
}

impl ProjectPatch {
    pub fn apply(self, project: &mut Project) {
        if let Some(name) = self.name {
            project.name = name;
        }
        if let Some(description) = self.description {
            project.description = description;
        }
        if let Some(location) = self.location {
            project.location = location;
        }
        if let Some(start_date) = self.start_date {
            project.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            project.end_date = end_date;
        }
        if let Some(status) = self.status {
            project.status = status;
        }
    }
}
