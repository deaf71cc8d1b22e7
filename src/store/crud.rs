use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use super::{Entity, FleetState};
use crate::models::driver::{Driver, DriverPatch, NewDriver};
use crate::models::fuel::{FuelPatch, FuelRecord, NewFuelRecord};
use crate::models::insurance::{InsurancePatch, InsurancePolicy, NewInsurancePolicy};
use crate::models::maintenance::{MaintenancePatch, MaintenanceRecord, NewMaintenanceRecord};
use crate::models::project::{NewProject, Project, ProjectPatch};
use crate::models::vehicle::{NewVehicle, Vehicle, VehiclePatch};

pub(crate) fn find<T: Entity>(items: &[T], id: Uuid) -> Option<&T> {
    items.iter().find(|item| item.id() == id)
}

pub(crate) fn find_mut<T: Entity>(items: &mut [T], id: Uuid) -> Option<&mut T> {
    items.iter_mut().find(|item| item.id() == id)
}

fn remove<T: Entity>(items: &mut Vec<T>, id: Uuid) -> Option<T> {
    let index = items.iter().position(|item| item.id() == id)?;
    Some(items.remove(index))
}

impl FleetState {
    pub fn vehicle(&self, id: Uuid) -> Option<&Vehicle> {
        find(&self.vehicles, id)
    }

    pub fn add_vehicle(&mut self, payload: NewVehicle) -> Vehicle {
        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            plate_number: payload.plate_number,
            make: payload.make,
            model: payload.model,
            year: payload.year,
            color: payload.color,
            vin: payload.vin,
            fuel_type: payload.fuel_type,
            mileage: payload.mileage,
            status: payload.status,
            assigned_driver: None,
            assigned_project: None,
            sold_date: None,
            sold_price: None,
            lost_date: None,
            lost_notes: None,
            created_at: Utc::now(),
        };

        debug!(vehicle_id = %vehicle.id, plate = %vehicle.plate_number, "vehicle added");
        self.vehicles.push(vehicle.clone());
        vehicle
    }

    pub fn update_vehicle(&mut self, id: Uuid, patch: VehiclePatch) -> Option<Vehicle> {
        let vehicle = find_mut(&mut self.vehicles, id)?;
        patch.apply(vehicle);
        Some(vehicle.clone())
    }

    /// Removes the vehicle only. Records, drivers and projects that still
    /// reference it are left as they are.
    pub fn delete_vehicle(&mut self, id: Uuid) -> bool {
        let removed = remove(&mut self.vehicles, id).is_some();
        if removed {
            info!(vehicle_id = %id, "vehicle deleted");
        }
        removed
    }

    pub fn driver(&self, id: Uuid) -> Option<&Driver> {
        find(&self.drivers, id)
    }

    pub fn add_driver(&mut self, payload: NewDriver) -> Driver {
        let driver = Driver {
            id: Uuid::new_v4(),
            name: payload.name,
            license_number: payload.license_number,
            license_expiry: payload.license_expiry,
            phone: payload.phone,
            email: payload.email,
            address: payload.address,
            status: payload.status,
            assigned_vehicle: None,
            created_at: Utc::now(),
        };

        debug!(driver_id = %driver.id, "driver added");
        self.drivers.push(driver.clone());
        driver
    }

    pub fn update_driver(&mut self, id: Uuid, patch: DriverPatch) -> Option<Driver> {
        let driver = find_mut(&mut self.drivers, id)?;
        patch.apply(driver);
        Some(driver.clone())
    }

    pub fn delete_driver(&mut self, id: Uuid) -> bool {
        let removed = remove(&mut self.drivers, id).is_some();
        if removed {
            info!(driver_id = %id, "driver deleted");
        }
        removed
    }

    pub fn project(&self, id: Uuid) -> Option<&Project> {
        find(&self.projects, id)
    }

    pub fn add_project(&mut self, payload: NewProject) -> Project {
        let project = Project {
            id: Uuid::new_v4(),
            name: payload.name,
            description: payload.description,
            location: payload.location,
            start_date: payload.start_date,
            end_date: payload.end_date,
            status: payload.status,
            assigned_vehicles: Vec::new(),
            created_at: Utc::now(),
        };

        debug!(project_id = %project.id, "project added");
        self.projects.push(project.clone());
        project
    }

    pub fn update_project(&mut self, id: Uuid, patch: ProjectPatch) -> Option<Project> {
        let project = find_mut(&mut self.projects, id)?;
        patch.apply(project);
        Some(project.clone())
    }

    /// Removes the project, detaches its member vehicles and drops every
    /// tracking entry that was opened for it.
    pub fn delete_project(&mut self, id: Uuid) -> bool {
        let Some(project) = remove(&mut self.projects, id) else {
            return false;
        };

        for vehicle in self
            .vehicles
            .iter_mut()
            .filter(|vehicle| project.has_vehicle(vehicle.id))
        {
            vehicle.assigned_project = None;
        }

        let tracked_before = self.gps_data.len();
        self.gps_data.retain(|entry| entry.project_id != id);

        info!(
            project_id = %id,
            released_vehicles = project.assigned_vehicles.len(),
            removed_tracking_entries = tracked_before - self.gps_data.len(),
            "project deleted"
        );
        true
    }

    pub fn maintenance_record(&self, id: Uuid) -> Option<&MaintenanceRecord> {
        find(&self.maintenance, id)
    }

    pub fn add_maintenance(&mut self, payload: NewMaintenanceRecord) -> MaintenanceRecord {
        let record = MaintenanceRecord {
            id: Uuid::new_v4(),
            vehicle_id: payload.vehicle_id,
            kind: payload.kind,
            description: payload.description,
            scheduled_date: payload.scheduled_date,
            completed_date: payload.completed_date,
            cost: payload.cost,
            status: payload.status,
            notes: payload.notes,
            created_at: Utc::now(),
        };

        self.maintenance.push(record.clone());
        record
    }

    pub fn update_maintenance(
        &mut self,
        id: Uuid,
        patch: MaintenancePatch,
    ) -> Option<MaintenanceRecord> {
        let record = find_mut(&mut self.maintenance, id)?;
        patch.apply(record);
        Some(record.clone())
    }

    pub fn delete_maintenance(&mut self, id: Uuid) -> bool {
        remove(&mut self.maintenance, id).is_some()
    }

    pub fn insurance_policy(&self, id: Uuid) -> Option<&InsurancePolicy> {
        find(&self.insurance, id)
    }

    pub fn add_insurance(&mut self, payload: NewInsurancePolicy) -> InsurancePolicy {
        let policy = InsurancePolicy {
            id: Uuid::new_v4(),
            vehicle_id: payload.vehicle_id,
            provider: payload.provider,
            policy_number: payload.policy_number,
            coverage: payload.coverage,
            premium: payload.premium,
            start_date: payload.start_date,
            expiry_date: payload.expiry_date,
            status: payload.status,
            created_at: Utc::now(),
        };

        self.insurance.push(policy.clone());
        policy
    }

    pub fn update_insurance(&mut self, id: Uuid, patch: InsurancePatch) -> Option<InsurancePolicy> {
        let policy = find_mut(&mut self.insurance, id)?;
        patch.apply(policy);
        Some(policy.clone())
    }

    pub fn delete_insurance(&mut self, id: Uuid) -> bool {
        remove(&mut self.insurance, id).is_some()
    }

    pub fn fuel_record(&self, id: Uuid) -> Option<&FuelRecord> {
        find(&self.fuel_records, id)
    }

    pub fn add_fuel_record(&mut self, payload: NewFuelRecord) -> FuelRecord {
        let total_cost = payload.resolved_total_cost();
        let record = FuelRecord {
            id: Uuid::new_v4(),
            vehicle_id: payload.vehicle_id,
            date: payload.date,
            fuel_type: payload.fuel_type,
            quantity: payload.quantity,
            price_per_unit: payload.price_per_unit,
            total_cost,
            odometer: payload.odometer,
            station: payload.station,
            created_at: Utc::now(),
        };

        self.fuel_records.push(record.clone());
        record
    }

    pub fn update_fuel_record(&mut self, id: Uuid, patch: FuelPatch) -> Option<FuelRecord> {
        let record = find_mut(&mut self.fuel_records, id)?;
        patch.apply(record);
        Some(record.clone())
    }

    pub fn delete_fuel_record(&mut self, id: Uuid) -> bool {
        remove(&mut self.fuel_records, id).is_some()
    }
}
