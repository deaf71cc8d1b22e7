//! The fleet data store: one owned aggregate holding every collection.
//!
//! All mutations are synchronous `&mut self` methods, so one call is one
//! transaction. Operations that reference an unknown id leave the state
//! untouched and report it through their return value.

mod crud;
mod queries;
mod relations;
mod seed;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::auth::{Credentials, User};
use crate::models::driver::Driver;
use crate::models::fuel::FuelRecord;
use crate::models::gps::TrackingEntry;
use crate::models::insurance::InsurancePolicy;
use crate::models::maintenance::MaintenanceRecord;
use crate::models::project::Project;
use crate::models::vehicle::Vehicle;

pub use queries::{DEFAULT_WINDOW_DAYS, FleetSummary, FuelSummary};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FleetState {
    pub is_authenticated: bool,
    pub user: Option<User>,
    pub dark_mode: bool,
    pub vehicles: Vec<Vehicle>,
    pub drivers: Vec<Driver>,
    pub projects: Vec<Project>,
    pub maintenance: Vec<MaintenanceRecord>,
    pub insurance: Vec<InsurancePolicy>,
    pub fuel_records: Vec<FuelRecord>,
    pub gps_data: Vec<TrackingEntry>,
}

impl Default for FleetState {
    fn default() -> Self {
        Self::empty()
    }
}

impl FleetState {
    pub fn empty() -> Self {
        Self {
            is_authenticated: false,
            user: None,
            dark_mode: true,
            vehicles: Vec::new(),
            drivers: Vec::new(),
            projects: Vec::new(),
            maintenance: Vec::new(),
            insurance: Vec::new(),
            fuel_records: Vec::new(),
            gps_data: Vec::new(),
        }
    }

    pub fn login(&mut self, credentials: &Credentials) -> bool {
        if !credentials.is_admin() {
            info!(username = %credentials.username, "login rejected");
            return false;
        }

        self.is_authenticated = true;
        self.user = Some(User::administrator());
        info!(username = %credentials.username, "login accepted");
        true
    }

    pub fn logout(&mut self) {
        self.is_authenticated = false;
        self.user = None;
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.dark_mode
    }
}

/// Anything stored in one of the collections.
pub(crate) trait Entity {
    fn id(&self) -> uuid::Uuid;
}

macro_rules! impl_entity {
    ($($ty:ty),* $(,)?) => {
        $(impl Entity for $ty {
            fn id(&self) -> uuid::Uuid {
                self.id
            }
        })*
    };
}

impl_entity!(
    Vehicle,
    Driver,
    Project,
    MaintenanceRecord,
    InsurancePolicy,
    FuelRecord,
    TrackingEntry,
);


#[cfg(test)]
mod tests {
    use super::FleetState;
    use crate::models::auth::Credentials;

    fn credentials(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn login_accepts_only_the_admin_pair() {
        let mut state = FleetState::empty();

        assert!(!state.login(&credentials("admin", "wrong")));
        assert!(!state.is_authenticated);
        assert!(state.user.is_none());

        assert!(state.login(&credentials("admin", "admin")));
        assert!(state.is_authenticated);
        let user = state.user.clone().unwrap();
        assert_eq!(user.username, "admin");
        assert_eq!(user.role, "Administrator");

        state.logout();
        assert!(!state.is_authenticated);
        assert!(state.user.is_none());
    }

    #[test]
    fn dark_mode_starts_on_and_toggles() {
        let mut state = FleetState::empty();
        assert!(state.dark_mode);
        assert!(!state.toggle_dark_mode());
        assert!(state.toggle_dark_mode());
    }

    #[test]
    fn persisted_shape_uses_camel_case_keys() {
        let state = FleetState::empty();
        let json = serde_json::to_value(&state).unwrap();

        for key in [
            "isAuthenticated",
            "user",
            "darkMode",
            "vehicles",
            "drivers",
            "projects",
            "maintenance",
            "insurance",
            "fuelRecords",
            "gpsData",
        ] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
    }
}
