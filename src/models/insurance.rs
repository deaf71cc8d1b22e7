use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyStatus {
    Active,
    Expired,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsurancePolicy {
    pub id: Uuid,
    pub vehicle_id: Option<Uuid>,
    pub provider: String,
    pub policy_number: String,
    /// Coverage kind, e.g. "Comprehensive" or "Third Party".
    #[serde(rename = "type")]
    pub coverage: String,
    pub premium: f64,
    pub start_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub status: PolicyStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInsurancePolicy {
    #[serde(default)]
    pub vehicle_id: Option<Uuid>,
    pub provider: String,
    pub policy_number: String,
    #[serde(rename = "type")]
    pub coverage: String,
    #[serde(default)]
    pub premium: f64,
    pub start_date: NaiveDate,
    pub expiry_date: NaiveDate,
    #[serde(default = "default_policy_status")]
    pub status: PolicyStatus,
}

fn default_policy_status() -> PolicyStatus {
    PolicyStatus::Active
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsurancePatch {
    #[serde(default, deserialize_with = "super::nullable")]
    pub vehicle_id: Option<Option<Uuid>>,
    pub provider: Option<String>,
    pub policy_number: Option<String>,
    #[serde(rename = "type")]
    pub coverage: Option<String>,
    pub premium: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub status: Option<PolicyStatus>,
}

impl InsurancePatch {
    pub fn apply(self, policy: &mut InsurancePolicy) {
        if let Some(vehicle_id) = self.vehicle_id {
            policy.vehicle_id = vehicle_id;
        }
        if let Some(provider) = self.provider {
            policy.provider = provider;
        }
        if let Some(policy_number) = self.policy_number {
            policy.policy_number = policy_number;
        }
        if let Some(coverage) = self.coverage {
            policy.coverage = coverage;
        }
        if let Some(premium) = self.premium {
            policy.premium = premium;
        }
        if let Some(start_date) = self.start_date {
            policy.start_date = start_date;
        }
        if let Some(expiry_date) = self.expiry_date {
            policy.expiry_date = expiry_date;
        }
        if let Some(status) = self.status {
            policy.status = status;
        }
    }
}
