use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum VehicleStatus {
    Active,
    Maintenance,
    Inactive,
    Sold,
    Lost,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Uuid,
    pub plate_number: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub vin: String,
    pub fuel_type: String,
    pub mileage: u64,
    pub status: VehicleStatus,
    pub assigned_driver: Option<Uuid>,
    pub assigned_project: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sold_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sold_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lost_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lost_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn is_retired(&self) -> bool {
        matches!(self.status, VehicleStatus::Sold | VehicleStatus::Lost)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVehicle {
    pub plate_number: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub vin: String,
    pub fuel_type: String,
    #[serde(default)]
    pub mileage: u64,
    #[serde(default = "default_vehicle_status")]
    pub status: VehicleStatus,
}

fn default_vehicle_status() -> VehicleStatus {
    VehicleStatus::Active
}

/// Partial update for a vehicle. Driver and project pointers are not part of
/// the patch; they move only through the relational operations.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehiclePatch {
    pub plate_number: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub color: Option<String>,
    pub vin: Option<String>,
    pub fuel_type: Option<String>,
    pub mileage: Option<u64>,
    pub status: Option<VehicleStatus>,
}

impl VehiclePatch {
    pub fn apply(self, vehicle: &mut Vehicle) {
        if let Some(plate_number) = self.plate_number {
            vehicle.plate_number = plate_number;
        }
        if let Some(make) = self.make {
            vehicle.make = make;
        }
        if let Some(model) = self.model {
            vehicle.model = model;
        }
        if let Some(year) = self.year {
            vehicle.year = year;
        }
        if let Some(color) = self.color {
            vehicle.color = color;
        }
        if let Some(vin) = self.vin {
            vehicle.vin = vin;
        }
        if let Some(fuel_type) = self.fuel_type {
            vehicle.fuel_type = fuel_type;
        }
        if let Some(mileage) = self.mileage {
            vehicle.mileage = mileage;
        }
        if let Some(status) = self.status {
            vehicle.status = status;
        }
    }
}
