use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DriverStatus {
    Available,
    OnDuty,
    OnLeave,
    Inactive,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: Uuid,
    pub name: String,
    pub license_number: String,
    pub license_expiry: NaiveDate,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub status: DriverStatus,
    pub assigned_vehicle: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDriver {
    pub name: String,
    pub license_number: String,
    pub license_expiry: NaiveDate,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default = "default_driver_status")]
    pub status: DriverStatus,
}

fn default_driver_status() -> DriverStatus {
    DriverStatus::Available
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverPatch {
    pub name: Option<String>,
    pub license_number: Option<String>,
    pub license_expiry: Option<NaiveDate>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub status: Option<DriverStatus>,
}

impl DriverPatch {
    pub fn apply(self, driver: &mut Driver) {
        if let Some(name) = self.name {
            driver.name = name;
        }
        if let Some(license_number) = self.license_number {
            driver.license_number = license_number;
        }
        if let Some(license_expiry) = self.license_expiry {
            driver.license_expiry = license_expiry;
        }
        if let Some(phone) = self.phone {
            driver.phone = phone;
        }
        if let Some(email) = self.email {
            driver.email = email;
        }
        if let Some(address) = self.address {
            driver.address = address;
        }
        if let Some(status) = self.status {
            driver.status = status;
        }
    }
}
