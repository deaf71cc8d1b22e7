use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FuelRecord {
    pub id: Uuid,
    pub vehicle_id: Option<Uuid>,
    pub date: NaiveDate,
    pub fuel_type: String,
    pub quantity: f64,
    pub price_per_unit: f64,
    pub total_cost: f64,
    pub odometer: u64,
    pub station: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFuelRecord {
    #[serde(default)]
    pub vehicle_id: Option<Uuid>,
    pub date: NaiveDate,
    pub fuel_type: String,
    pub quantity: f64,
    pub price_per_unit: f64,
    /// Derived from quantity and unit price when left out.
    #[serde(default)]
    pub total_cost: Option<f64>,
    #[serde(default)]
    pub odometer: u64,
    #[serde(default)]
    pub station: String,
}

impl NewFuelRecord {
    pub fn resolved_total_cost(&self) -> f64 {
        self.total_cost
            .unwrap_or_else(|| round_cents(self.quantity * self.price_per_unit))
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelPatch {
    #[serde(default, deserialize_with = "super::nullable")]
    pub vehicle_id: Option<Option<Uuid>>,
    pub date: Option<NaiveDate>,
    pub fuel_type: Option<String>,
    pub quantity: Option<f64>,
    pub price_per_unit: Option<f64>,
    pub total_cost: Option<f64>,
    pub odometer: Option<u64>,
    pub station: Option<String>,
}

impl FuelPatch {
    pub fn apply(self, record: &mut FuelRecord) {
        if let Some(vehicle_id) = self.vehicle_id {
            record.vehicle_id = vehicle_id;
        }
        if let Some(date) = self.date {
            record.date = date;
        }
        if let Some(fuel_type) = self.fuel_type {
            record.fuel_type = fuel_type;
        }
        if let Some(quantity) = self.quantity {
            record.quantity = quantity;
        }
        if let Some(price_per_unit) = self.price_per_unit {
            record.price_per_unit = price_per_unit;
        }
        if let Some(total_cost) = self.total_cost {
            record.total_cost = total_cost;
        }
        if let Some(odometer) = self.odometer {
            record.odometer = odometer;
        }
        if let Some(station) = self.station {
            record.station = station;
        }
    }
}
