use chrono::{Days, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::FleetState;
use crate::models::driver::{Driver, DriverStatus};
use crate::models::fuel::FuelRecord;
use crate::models::gps::TrackingEntry;
use crate::models::insurance::InsurancePolicy;
use crate::models::maintenance::{MaintenanceRecord, MaintenanceStatus};
use crate::models::project::{Project, ProjectStatus};
use crate::models::vehicle::{Vehicle, VehicleStatus};

pub const DEFAULT_WINDOW_DAYS: u32 = 30;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FleetSummary {
    pub total_vehicles: usize,
    pub active_vehicles: usize,
    pub vehicles_in_maintenance: usize,
    pub sold_or_lost_vehicles: usize,
    pub total_drivers: usize,
    pub available_drivers: usize,
    pub active_projects: usize,
    pub tracked_vehicles: usize,
    pub expiring_insurance: usize,
    pub upcoming_maintenance: usize,
    pub total_fuel_cost: f64,
    pub total_maintenance_cost: f64,
    pub total_sold_value: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FuelSummary {
    pub records: usize,
    pub total_cost: f64,
    pub total_quantity: f64,
    pub average_price_per_unit: f64,
}

/// `[today, today + window_days]`, both ends included.
fn within_window(date: NaiveDate, today: NaiveDate, window_days: u32) -> bool {
    let horizon = today
        .checked_add_days(Days::new(u64::from(window_days)))
        .unwrap_or(NaiveDate::MAX);
    date >= today && date <= horizon
}

impl FleetState {
    fn vehicles_with_status(&self, status: VehicleStatus) -> Vec<&Vehicle> {
        self.vehicles.iter().filter(|v| v.status == status).collect()
    }

    pub fn active_vehicles(&self) -> Vec<&Vehicle> {
        self.vehicles_with_status(VehicleStatus::Active)
    }

    pub fn sold_vehicles(&self) -> Vec<&Vehicle> {
        self.vehicles_with_status(VehicleStatus::Sold)
    }

    pub fn lost_vehicles(&self) -> Vec<&Vehicle> {
        self.vehicles_with_status(VehicleStatus::Lost)
    }

    pub fn vehicles_in_maintenance(&self) -> Vec<&Vehicle> {
        self.vehicles_with_status(VehicleStatus::Maintenance)
    }

    pub fn available_drivers(&self) -> Vec<&Driver> {
        self.drivers
            .iter()
            .filter(|d| d.status == DriverStatus::Available)
            .collect()
    }

    pub fn active_projects(&self) -> Vec<&Project> {
        self.projects
            .iter()
            .filter(|p| p.status == ProjectStatus::Active)
            .collect()
    }

    /// Vehicles whose own pointer names the project. This can differ from the
    /// project's membership list after a sale or loss.
    pub fn project_vehicles(&self, project_id: Uuid) -> Vec<&Vehicle> {
        self.vehicles
            .iter()
            .filter(|v| v.assigned_project == Some(project_id))
            .collect()
    }

    pub fn maintenance_for_vehicle(&self, vehicle_id: Uuid) -> Vec<&MaintenanceRecord> {
        self.maintenance
            .iter()
            .filter(|m| m.vehicle_id == Some(vehicle_id))
            .collect()
    }

    pub fn insurance_for_vehicle(&self, vehicle_id: Uuid) -> Vec<&InsurancePolicy> {
        self.insurance
            .iter()
            .filter(|i| i.vehicle_id == Some(vehicle_id))
            .collect()
    }

    pub fn fuel_records_for_vehicle(&self, vehicle_id: Uuid) -> Vec<&FuelRecord> {
        self.fuel_records
            .iter()
            .filter(|f| f.vehicle_id == Some(vehicle_id))
            .collect()
    }

    pub fn tracking_for_vehicle(&self, vehicle_id: Uuid) -> Option<&TrackingEntry> {
        self.gps_data.iter().find(|g| g.vehicle_id == vehicle_id)
    }

    /// Vehicles with an active track. Tracks orphaned by a vehicle delete are
    /// skipped.
    pub fn tracked_vehicle_ids(&self) -> Vec<Uuid> {
        self.gps_data
            .iter()
            .filter(|g| g.tracking && self.vehicle(g.vehicle_id).is_some())
            .map(|g| g.vehicle_id)
            .collect()
    }

    pub fn expiring_insurance(&self, window_days: u32) -> Vec<&InsurancePolicy> {
        self.expiring_insurance_on(Utc::now().date_naive(), window_days)
    }

    pub fn expiring_insurance_on(&self, today: NaiveDate, window_days: u32) -> Vec<&InsurancePolicy> {
        self.insurance
            .iter()
            .filter(|i| within_window(i.expiry_date, today, window_days))
            .collect()
    }

    pub fn upcoming_maintenance(&self, window_days: u32) -> Vec<&MaintenanceRecord> {
        self.upcoming_maintenance_on(Utc::now().date_naive(), window_days)
    }

    pub fn upcoming_maintenance_on(
        &self,
        today: NaiveDate,
        window_days: u32,
    ) -> Vec<&MaintenanceRecord> {
        self.maintenance
            .iter()
            .filter(|m| m.status != MaintenanceStatus::Completed)
            .filter(|m| within_window(m.scheduled_date, today, window_days))
            .collect()
    }

    pub fn fuel_summary(&self) -> FuelSummary {
        let records = self.fuel_records.len();
        let total_cost: f64 = self.fuel_records.iter().map(|f| f.total_cost).sum();
        let total_quantity: f64 = self.fuel_records.iter().map(|f| f.quantity).sum();
        let average_price_per_unit = if records == 0 {
            0.0
        } else {
            self.fuel_records.iter().map(|f| f.price_per_unit).sum::<f64>() / records as f64
        };

        FuelSummary {
            records,
            total_cost,
            total_quantity,
            average_price_per_unit,
        }
    }

    pub fn fleet_summary_on(&self, today: NaiveDate) -> FleetSummary {
        FleetSummary {
            total_vehicles: self.vehicles.len(),
            active_vehicles: self.active_vehicles().len(),
            vehicles_in_maintenance: self.vehicles_in_maintenance().len(),
            sold_or_lost_vehicles: self.vehicles.iter().filter(|v| v.is_retired()).count(),
            total_drivers: self.drivers.len(),
            available_drivers: self.available_drivers().len(),
            active_projects: self.active_projects().len(),
            tracked_vehicles: self.tracked_vehicle_ids().len(),
            expiring_insurance: self.expiring_insurance_on(today, DEFAULT_WINDOW_DAYS).len(),
            upcoming_maintenance: self.upcoming_maintenance_on(today, DEFAULT_WINDOW_DAYS).len(),
            total_fuel_cost: self.fuel_records.iter().map(|f| f.total_cost).sum(),
            total_maintenance_cost: self.maintenance.iter().map(|m| m.cost).sum(),
            total_sold_value: self.sold_vehicles().iter().filter_map(|v| v.sold_price).sum(),
        }
    }

    pub fn fleet_summary(&self) -> FleetSummary {
        self.fleet_summary_on(Utc::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::geo::LocationSampler;
    use crate::models::driver::{DriverPatch, DriverStatus};
    use crate::models::fuel::NewFuelRecord;
    use crate::models::insurance::{NewInsurancePolicy, PolicyStatus};
    use crate::models::maintenance::{MaintenanceStatus, NewMaintenanceRecord};
    use crate::store::FleetState;
    use crate::store::fixtures::{date, new_driver, new_project, new_vehicle};

    fn policy(expiry_date: NaiveDate) -> NewInsurancePolicy {
        NewInsurancePolicy {
            vehicle_id: None,
            provider: "ICICI Lombard".to_string(),
            policy_number: "POL-2024-001234".to_string(),
            coverage: "Comprehensive".to_string(),
            premium: 15_000.0,
            start_date: date(2024, 1, 1),
            expiry_date,
            status: PolicyStatus::Active,
        }
    }

    fn maintenance(scheduled_date: NaiveDate, status: MaintenanceStatus) -> NewMaintenanceRecord {
        NewMaintenanceRecord {
            vehicle_id: None,
            kind: "Tire Replacement".to_string(),
            description: "Replace all four tires".to_string(),
            scheduled_date,
            completed_date: None,
            cost: 25_000.0,
            status,
            notes: String::new(),
        }
    }

    #[test]
    fn expiring_insurance_window_is_inclusive_and_skips_past_policies() {
        let mut state = FleetState::empty();
        let today = date(2024, 12, 1);
        let expired = state.add_insurance(policy(date(2024, 11, 30)));
        let today_policy = state.add_insurance(policy(today));
        let edge = state.add_insurance(policy(date(2024, 12, 31)));
        let beyond = state.add_insurance(policy(date(2025, 1, 1)));

        let ids: Vec<_> = state
            .expiring_insurance_on(today, 30)
            .into_iter()
            .map(|p| p.id)
            .collect();

        assert_eq!(ids, vec![today_policy.id, edge.id]);
        assert!(!ids.contains(&expired.id));
        assert!(!ids.contains(&beyond.id));
    }

    #[test]
    fn upcoming_maintenance_excludes_completed_records() {
        let mut state = FleetState::empty();
        let today = date(2024, 12, 1);
        let due = state.add_maintenance(maintenance(date(2024, 12, 20), MaintenanceStatus::Scheduled));
        state.add_maintenance(maintenance(date(2024, 12, 10), MaintenanceStatus::Completed));
        state.add_maintenance(maintenance(date(2025, 2, 1), MaintenanceStatus::Scheduled));
        state.add_maintenance(maintenance(date(2024, 11, 15), MaintenanceStatus::InProgress));

        let upcoming = state.upcoming_maintenance_on(today, 30);
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].id, due.id);
    }

    #[test]
    fn status_filters() {
        let mut state = FleetState::empty();
        let active = state.add_vehicle(new_vehicle("KA-01-AB-1234"));
        let sold = state.add_vehicle(new_vehicle("DL-04-GH-3456"));
        state.mark_vehicle_sold(sold.id, date(2024, 6, 15), 850_000.0);

        let free = state.add_driver(new_driver("Rajesh Kumar"));
        let away = state.add_driver(new_driver("Suresh Sharma"));
        state.update_driver(
            away.id,
            DriverPatch {
                status: Some(DriverStatus::OnLeave),
                ..Default::default()
            },
        );

        state.add_project(new_project("Metro"));

        assert_eq!(state.active_vehicles().len(), 1);
        assert_eq!(state.active_vehicles()[0].id, active.id);
        assert_eq!(state.sold_vehicles().len(), 1);
        assert!(state.lost_vehicles().is_empty());
        assert_eq!(state.available_drivers().len(), 1);
        assert_eq!(state.available_drivers()[0].id, free.id);
        assert_eq!(state.active_projects().len(), 1);
    }

    #[test]
    fn fuel_summary_averages_unit_price() {
        let mut state = FleetState::empty();
        assert_eq!(state.fuel_summary().average_price_per_unit, 0.0);

        for (quantity, price) in [(40.0, 102.5), (50.0, 89.5)] {
            state.add_fuel_record(NewFuelRecord {
                vehicle_id: None,
                date: date(2024, 11, 20),
                fuel_type: "Diesel".to_string(),
                quantity,
                price_per_unit: price,
                total_cost: None,
                odometer: 0,
                station: String::new(),
            });
        }

        let summary = state.fuel_summary();
        assert_eq!(summary.records, 2);
        assert_eq!(summary.total_quantity, 90.0);
        assert_eq!(summary.total_cost, 8575.0);
        assert_eq!(summary.average_price_per_unit, 96.0);
    }

    #[test]
    fn summary_counts_tracked_and_retired_vehicles() {
        let mut state = FleetState::empty();
        let mut sampler = LocationSampler::from_seed(3);
        let project = state.add_project(new_project("Metro"));
        let tracked = state.add_vehicle(new_vehicle("KA-01-AB-1234"));
        let lost = state.add_vehicle(new_vehicle("TN-03-EF-9012"));

        state.assign_vehicle_to_project(tracked.id, project.id, &mut sampler);
        state.mark_vehicle_lost(lost.id, date(2024, 1, 1), "theft".to_string());

        let summary = state.fleet_summary_on(date(2024, 12, 1));
        assert_eq!(summary.total_vehicles, 2);
        assert_eq!(summary.active_vehicles, 1);
        assert_eq!(summary.tracked_vehicles, 1);
        assert_eq!(summary.sold_or_lost_vehicles, 1);
        assert_eq!(summary.total_sold_value, 0.0);
        assert_eq!(state.tracked_vehicle_ids(), vec![tracked.id]);
        assert_eq!(state.project_vehicles(project.id).len(), 1);
    }

    #[test]
    fn per_vehicle_lookups_follow_foreign_keys() {
        let mut state = FleetState::empty();
        let vehicle = state.add_vehicle(new_vehicle("KA-01-AB-1234"));
        let mut with_vehicle = policy(date(2025, 1, 1));
        with_vehicle.vehicle_id = Some(vehicle.id);
        state.add_insurance(with_vehicle);
        state.add_insurance(policy(date(2025, 3, 15)));

        assert_eq!(state.insurance_for_vehicle(vehicle.id).len(), 1);
        assert!(state.maintenance_for_vehicle(vehicle.id).is_empty());
        assert!(state.fuel_records_for_vehicle(vehicle.id).is_empty());
        assert!(state.tracking_for_vehicle(vehicle.id).is_none());
    }
}
