//! Demo fleet loaded into a store that has never been persisted.

use chrono::NaiveDate;

use super::FleetState;
use crate::models::driver::{DriverStatus, NewDriver};
use crate::models::fuel::NewFuelRecord;
use crate::models::insurance::{NewInsurancePolicy, PolicyStatus};
use crate::models::maintenance::{MaintenanceStatus, NewMaintenanceRecord};
use crate::models::project::{NewProject, ProjectStatus};
use crate::models::vehicle::{NewVehicle, VehicleStatus};

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

#[allow(clippy::too_many_arguments)]
fn vehicle(
    plate_number: &str,
    make: &str,
    model: &str,
    year: i32,
    color: &str,
    vin: &str,
    status: VehicleStatus,
    fuel_type: &str,
    mileage: u64,
) -> NewVehicle {
    NewVehicle {
        plate_number: plate_number.to_string(),
        make: make.to_string(),
        model: model.to_string(),
        year,
        color: color.to_string(),
        vin: vin.to_string(),
        fuel_type: fuel_type.to_string(),
        mileage,
        status,
    }
}

fn driver(
    name: &str,
    license_number: &str,
    license_expiry: NaiveDate,
    phone: &str,
    email: &str,
    address: &str,
    status: DriverStatus,
) -> NewDriver {
    NewDriver {
        name: name.to_string(),
        license_number: license_number.to_string(),
        license_expiry,
        phone: phone.to_string(),
        email: email.to_string(),
        address: address.to_string(),
        status,
    }
}

fn project(
    name: &str,
    description: &str,
    location: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: ProjectStatus,
) -> NewProject {
    NewProject {
        name: name.to_string(),
        description: description.to_string(),
        location: location.to_string(),
        start_date,
        end_date,
        status,
    }
}

impl FleetState {
    pub fn seeded() -> Self {
        let mut state = Self::empty();

        state.add_vehicle(vehicle(
            "KA-01-AB-1234",
            "Toyota",
            "Camry",
            2022,
            "Silver",
            "1HGBH41JXMN109186",
            VehicleStatus::Active,
            "Petrol",
            45_000,
        ));
        state.add_vehicle(vehicle(
            "MH-02-CD-5678",
            "Honda",
            "City",
            2021,
            "White",
            "2HGBH41JXMN109187",
            VehicleStatus::Active,
            "Diesel",
            62_000,
        ));
        state.add_vehicle(vehicle(
            "TN-03-EF-9012",
            "Ford",
            "EcoSport",
            2020,
            "Blue",
            "3HGBH41JXMN109188",
            VehicleStatus::Maintenance,
            "Petrol",
            78_000,
        ));
        let sold = state.add_vehicle(vehicle(
            "DL-04-GH-3456",
            "Mahindra",
            "XUV500",
            2019,
            "Black",
            "4HGBH41JXMN109189",
            VehicleStatus::Active,
            "Diesel",
            95_000,
        ));
        state.mark_vehicle_sold(sold.id, ymd(2024, 6, 15), 850_000.0);

        state.add_driver(driver(
            "Rajesh Kumar",
            "DL-0420110012345",
            ymd(2026, 3, 15),
            "+91 9876543210",
            "rajesh.kumar@email.com",
            "123 Main Street, Delhi",
            DriverStatus::Available,
        ));
        state.add_driver(driver(
            "Suresh Sharma",
            "MH-0520120023456",
            ymd(2025, 8, 20),
            "+91 9876543211",
            "suresh.sharma@email.com",
            "456 Park Road, Mumbai",
            DriverStatus::Available,
        ));
        state.add_driver(driver(
            "Amit Patel",
            "GJ-0620130034567",
            ymd(2024, 12, 10),
            "+91 9876543212",
            "amit.patel@email.com",
            "789 Lake View, Ahmedabad",
            DriverStatus::OnDuty,
        ));

        state.add_project(project(
            "Highway Construction - NH48",
            "Construction project for National Highway 48 expansion",
            "Gujarat - Rajasthan Border",
            ymd(2024, 1, 15),
            ymd(2025, 6, 30),
            ProjectStatus::Active,
        ));
        state.add_project(project(
            "Metro Rail Project - Phase 2",
            "Underground metro construction in city center",
            "Bangalore Central",
            ymd(2024, 3, 1),
            ymd(2026, 12, 31),
            ProjectStatus::Active,
        ));
        state.add_project(project(
            "Bridge Repair - Yamuna",
            "Maintenance and repair of Yamuna bridge",
            "Delhi NCR",
            ymd(2024, 6, 1),
            ymd(2024, 12, 31),
            ProjectStatus::Completed,
        ));

        state.add_maintenance(NewMaintenanceRecord {
            vehicle_id: None,
            kind: "Oil Change".to_string(),
            description: "Regular oil change and filter replacement".to_string(),
            scheduled_date: ymd(2024, 11, 15),
            completed_date: Some(ymd(2024, 11, 15)),
            cost: 3_500.0,
            status: MaintenanceStatus::Completed,
            notes: "Used synthetic oil".to_string(),
        });
        state.add_maintenance(NewMaintenanceRecord {
            vehicle_id: None,
            kind: "Tire Replacement".to_string(),
            description: "Replace all four tires".to_string(),
            scheduled_date: ymd(2024, 12, 20),
            completed_date: None,
            cost: 25_000.0,
            status: MaintenanceStatus::Scheduled,
            notes: "Bridgestone tires ordered".to_string(),
        });

        state.add_insurance(NewInsurancePolicy {
            vehicle_id: None,
            provider: "ICICI Lombard".to_string(),
            policy_number: "POL-2024-001234".to_string(),
            coverage: "Comprehensive".to_string(),
            premium: 15_000.0,
            start_date: ymd(2024, 1, 1),
            expiry_date: ymd(2025, 1, 1),
            status: PolicyStatus::Active,
        });
        state.add_insurance(NewInsurancePolicy {
            vehicle_id: None,
            provider: "HDFC Ergo".to_string(),
            policy_number: "POL-2024-005678".to_string(),
            coverage: "Third Party".to_string(),
            premium: 8_000.0,
            start_date: ymd(2024, 3, 15),
            expiry_date: ymd(2025, 3, 15),
            status: PolicyStatus::Active,
        });

        state.add_fuel_record(NewFuelRecord {
            vehicle_id: None,
            date: ymd(2024, 11, 20),
            fuel_type: "Petrol".to_string(),
            quantity: 40.0,
            price_per_unit: 102.5,
            total_cost: Some(4_100.0),
            odometer: 45_000,
            station: "Indian Oil - MG Road".to_string(),
        });
        state.add_fuel_record(NewFuelRecord {
            vehicle_id: None,
            date: ymd(2024, 11, 18),
            fuel_type: "Diesel".to_string(),
            quantity: 50.0,
            price_per_unit: 89.5,
            total_cost: Some(4_475.0),
            odometer: 62_000,
            station: "HP Petrol Pump - Highway".to_string(),
        });

        state
    }
}

#[cfg(test)]
mod tests {
    use crate::store::FleetState;

    #[test]
    fn seeded_fleet_matches_demo_data() {
        let state = FleetState::seeded();

        assert_eq!(state.vehicles.len(), 4);
        assert_eq!(state.drivers.len(), 3);
        assert_eq!(state.projects.len(), 3);
        assert_eq!(state.maintenance.len(), 2);
        assert_eq!(state.insurance.len(), 2);
        assert_eq!(state.fuel_records.len(), 2);
        assert!(state.gps_data.is_empty());
        assert_eq!(state.sold_vehicles().len(), 1);
        assert_eq!(state.active_projects().len(), 2);
        assert!(!state.is_authenticated);
    }
}
