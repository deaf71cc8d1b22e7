use chrono::{NaiveDate, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use super::FleetState;
use super::crud::find_mut;
use crate::geo::LocationSampler;
use crate::models::driver::DriverStatus;
use crate::models::gps::{LocationEvent, TrackingEntry};
use crate::models::vehicle::VehicleStatus;

impl FleetState {
    /// Pairs a driver with a vehicle, displacing whichever driver held the
    /// vehicle and whichever vehicle held the driver.
    pub fn assign_driver_to_vehicle(&mut self, driver_id: Uuid, vehicle_id: Uuid) -> bool {
        if self.driver(driver_id).is_none() || self.vehicle(vehicle_id).is_none() {
            debug!(%driver_id, %vehicle_id, "driver assignment skipped: unknown id");
            return false;
        }

        for driver in &mut self.drivers {
            if driver.id == driver_id {
                driver.assigned_vehicle = Some(vehicle_id);
                driver.status = DriverStatus::OnDuty;
            } else if driver.assigned_vehicle == Some(vehicle_id) {
                driver.assigned_vehicle = None;
                driver.status = DriverStatus::Available;
            }
        }

        for vehicle in &mut self.vehicles {
            if vehicle.id == vehicle_id {
                vehicle.assigned_driver = Some(driver_id);
            } else if vehicle.assigned_driver == Some(driver_id) {
                vehicle.assigned_driver = None;
            }
        }

        info!(%driver_id, %vehicle_id, "driver assigned to vehicle");
        true
    }

    pub fn unassign_driver(&mut self, driver_id: Uuid) -> bool {
        let Some(driver) = find_mut(&mut self.drivers, driver_id) else {
            return false;
        };
        driver.assigned_vehicle = None;
        driver.status = DriverStatus::Available;

        for vehicle in &mut self.vehicles {
            if vehicle.assigned_driver == Some(driver_id) {
                vehicle.assigned_driver = None;
            }
        }

        info!(%driver_id, "driver unassigned");
        true
    }

    /// Moves a vehicle onto a project and opens a fresh tracking entry for it.
    /// Any earlier entry for the vehicle is discarded, active or not.
    pub fn assign_vehicle_to_project(
        &mut self,
        vehicle_id: Uuid,
        project_id: Uuid,
        sampler: &mut LocationSampler,
    ) -> Option<TrackingEntry> {
        self.project(project_id)?;
        let vehicle = find_mut(&mut self.vehicles, vehicle_id)?;
        let previous_project = vehicle.assigned_project.replace(project_id);

        for project in &mut self.projects {
            if project.id == project_id {
                project.push_vehicle(vehicle_id);
            } else if Some(project.id) == previous_project {
                project.remove_vehicle(vehicle_id);
            }
        }

        let now = Utc::now();
        let entry = TrackingEntry {
            id: Uuid::new_v4(),
            vehicle_id,
            project_id,
            tracking: true,
            start_time: now,
            end_time: None,
            locations: vec![sampler.sample()],
            created_at: now,
        };

        self.gps_data.retain(|existing| existing.vehicle_id != vehicle_id);
        self.gps_data.push(entry.clone());

        info!(
            %vehicle_id,
            %project_id,
            previous_project = ?previous_project,
            "vehicle assigned to project; tracking started"
        );
        Some(entry)
    }

    /// Detaches a vehicle from its project and stops (but keeps) its track.
    /// A track left behind by a deleted vehicle is still stopped.
    pub fn unassign_vehicle_from_project(&mut self, vehicle_id: Uuid) -> bool {
        let vehicle_known = self.vehicle(vehicle_id).is_some();
        let project_id = find_mut(&mut self.vehicles, vehicle_id)
            .and_then(|vehicle| vehicle.assigned_project.take());

        if let Some(project_id) = project_id {
            if let Some(project) = find_mut(&mut self.projects, project_id) {
                project.remove_vehicle(vehicle_id);
            }
        }

        let now = Utc::now();
        let mut stopped = 0;
        for entry in self
            .gps_data
            .iter_mut()
            .filter(|entry| entry.vehicle_id == vehicle_id)
        {
            entry.tracking = false;
            entry.end_time = Some(now);
            stopped += 1;
        }

        if !vehicle_known && stopped == 0 {
            return false;
        }

        info!(%vehicle_id, project_id = ?project_id, "vehicle unassigned from project; tracking stopped");
        true
    }

    /// Only the vehicle's own pointers are cleared. A driver or project that
    /// still points at the vehicle keeps doing so.
    pub fn mark_vehicle_sold(&mut self, id: Uuid, sold_date: NaiveDate, sold_price: f64) -> bool {
        let Some(vehicle) = find_mut(&mut self.vehicles, id) else {
            return false;
        };

        vehicle.status = VehicleStatus::Sold;
        vehicle.sold_date = Some(sold_date);
        vehicle.sold_price = Some(sold_price);
        vehicle.assigned_driver = None;
        vehicle.assigned_project = None;

        info!(vehicle_id = %id, %sold_date, sold_price, "vehicle marked sold");
        true
    }

    /// Same reciprocal-pointer caveat as [`FleetState::mark_vehicle_sold`].
    pub fn mark_vehicle_lost(&mut self, id: Uuid, lost_date: NaiveDate, notes: String) -> bool {
        let Some(vehicle) = find_mut(&mut self.vehicles, id) else {
            return false;
        };

        vehicle.status = VehicleStatus::Lost;
        vehicle.lost_date = Some(lost_date);
        vehicle.lost_notes = Some(notes);
        vehicle.assigned_driver = None;
        vehicle.assigned_project = None;

        info!(vehicle_id = %id, %lost_date, "vehicle marked lost");
        true
    }

    /// Returns a sold or lost vehicle to service. Assignments are not restored.
    pub fn restore_vehicle(&mut self, id: Uuid) -> bool {
        let Some(vehicle) = find_mut(&mut self.vehicles, id) else {
            return false;
        };

        vehicle.status = VehicleStatus::Active;
        vehicle.sold_date = None;
        vehicle.sold_price = None;
        vehicle.lost_date = None;
        vehicle.lost_notes = None;

        info!(vehicle_id = %id, "vehicle restored");
        true
    }

    pub fn update_gps_location(
        &mut self,
        vehicle_id: Uuid,
        sampler: &mut LocationSampler,
    ) -> Option<LocationEvent> {
        self.vehicle(vehicle_id)?;
        let entry = self
            .gps_data
            .iter_mut()
            .find(|entry| entry.vehicle_id == vehicle_id && entry.tracking)?;

        let location = sampler.sample();
        entry.locations.push(location.clone());

        Some(LocationEvent {
            vehicle_id,
            project_id: entry.project_id,
            location,
        })
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use crate::geo::LocationSampler;
    use crate::models::driver::DriverStatus;
    use crate::models::vehicle::VehicleStatus;
    use crate::store::FleetState;
    use crate::store::fixtures::{date, new_driver, new_project, new_vehicle};

    fn sampler() -> LocationSampler {
        LocationSampler::from_seed(99)
    }

    #[test]
    fn assign_driver_links_both_sides() {
        let mut state = FleetState::empty();
        let vehicle = state.add_vehicle(new_vehicle("KA-01-AB-1234"));
        let driver = state.add_driver(new_driver("Rajesh Kumar"));

        assert!(state.assign_driver_to_vehicle(driver.id, vehicle.id));

        let driver = state.driver(driver.id).unwrap();
        let vehicle = state.vehicle(vehicle.id).unwrap();
        assert_eq!(vehicle.assigned_driver, Some(driver.id));
        assert_eq!(driver.assigned_vehicle, Some(vehicle.id));
        assert_eq!(driver.status, DriverStatus::OnDuty);
    }

    #[test]
    fn assign_driver_displaces_previous_driver_of_vehicle() {
        let mut state = FleetState::empty();
        let vehicle = state.add_vehicle(new_vehicle("KA-01-AB-1234"));
        let first = state.add_driver(new_driver("Rajesh Kumar"));
        let second = state.add_driver(new_driver("Suresh Sharma"));

        state.assign_driver_to_vehicle(first.id, vehicle.id);
        state.assign_driver_to_vehicle(second.id, vehicle.id);

        let first = state.driver(first.id).unwrap();
        assert!(first.assigned_vehicle.is_none());
        assert_eq!(first.status, DriverStatus::Available);
        assert_eq!(
            state.vehicle(vehicle.id).unwrap().assigned_driver,
            Some(second.id)
        );
        let holders = state
            .drivers
            .iter()
            .filter(|d| d.assigned_vehicle == Some(vehicle.id))
            .count();
        assert_eq!(holders, 1);
    }

    #[test]
    fn assign_driver_releases_previous_vehicle_of_driver() {
        let mut state = FleetState::empty();
        let old_vehicle = state.add_vehicle(new_vehicle("KA-01-AB-1234"));
        let replacement = state.add_vehicle(new_vehicle("MH-02-CD-5678"));
        let driver = state.add_driver(new_driver("Rajesh Kumar"));

        state.assign_driver_to_vehicle(driver.id, old_vehicle.id);
        state.assign_driver_to_vehicle(driver.id, replacement.id);

        assert!(state.vehicle(old_vehicle.id).unwrap().assigned_driver.is_none());
        assert_eq!(
            state.vehicle(replacement.id).unwrap().assigned_driver,
            Some(driver.id)
        );
        let holders = state
            .vehicles
            .iter()
            .filter(|v| v.assigned_driver == Some(driver.id))
            .count();
        assert_eq!(holders, 1);
    }

    #[test]
    fn assign_driver_twice_matches_assigning_once() {
        let mut state = FleetState::empty();
        let vehicle = state.add_vehicle(new_vehicle("KA-01-AB-1234"));
        let driver = state.add_driver(new_driver("Rajesh Kumar"));

        state.assign_driver_to_vehicle(driver.id, vehicle.id);
        let once = state.clone();
        state.assign_driver_to_vehicle(driver.id, vehicle.id);

        assert_eq!(state, once);
    }

    #[test]
    fn assign_driver_with_unknown_id_is_a_noop() {
        let mut state = FleetState::empty();
        let vehicle = state.add_vehicle(new_vehicle("KA-01-AB-1234"));
        let driver = state.add_driver(new_driver("Rajesh Kumar"));
        state.assign_driver_to_vehicle(driver.id, vehicle.id);
        let before = state.clone();

        assert!(!state.assign_driver_to_vehicle(Uuid::new_v4(), vehicle.id));
        assert!(!state.assign_driver_to_vehicle(driver.id, Uuid::new_v4()));
        assert_eq!(state, before);
    }

    #[test]
    fn assign_then_unassign_driver() {
        let mut state = FleetState::empty();
        let v1 = state.add_vehicle(new_vehicle("KA-01-AB-1234"));
        let d1 = state.add_driver(new_driver("Rajesh Kumar"));

        state.assign_driver_to_vehicle(d1.id, v1.id);
        assert_eq!(state.driver(d1.id).unwrap().status, DriverStatus::OnDuty);

        assert!(state.unassign_driver(d1.id));
        let d1 = state.driver(d1.id).unwrap();
        assert_eq!(d1.status, DriverStatus::Available);
        assert!(d1.assigned_vehicle.is_none());
        assert!(state.vehicle(v1.id).unwrap().assigned_driver.is_none());
    }

    #[test]
    fn unassign_unknown_driver_is_a_noop() {
        let mut state = FleetState::empty();
        state.add_driver(new_driver("Rajesh Kumar"));
        let before = state.clone();

        assert!(!state.unassign_driver(Uuid::new_v4()));
        assert_eq!(state, before);
    }

    #[test]
    fn assign_vehicle_to_project_starts_tracking() {
        let mut state = FleetState::empty();
        let mut sampler = sampler();
        let project = state.add_project(new_project("Metro"));
        let vehicle = state.add_vehicle(new_vehicle("KA-01-AB-1234"));

        let entry = state
            .assign_vehicle_to_project(vehicle.id, project.id, &mut sampler)
            .unwrap();

        assert!(state.project(project.id).unwrap().has_vehicle(vehicle.id));
        assert_eq!(
            state.vehicle(vehicle.id).unwrap().assigned_project,
            Some(project.id)
        );
        assert!(entry.tracking);
        assert_eq!(entry.locations.len(), 1);
        assert_eq!(entry.project_id, project.id);
        assert_eq!(state.tracking_for_vehicle(vehicle.id), Some(&entry));
    }

    #[test]
    fn reassigning_vehicle_moves_membership_and_replaces_entry() {
        let mut state = FleetState::empty();
        let mut sampler = sampler();
        let first = state.add_project(new_project("Highway"));
        let second = state.add_project(new_project("Metro"));
        let vehicle = state.add_vehicle(new_vehicle("KA-01-AB-1234"));

        let old_entry = state
            .assign_vehicle_to_project(vehicle.id, first.id, &mut sampler)
            .unwrap();
        state.update_gps_location(vehicle.id, &mut sampler);
        let new_entry = state
            .assign_vehicle_to_project(vehicle.id, second.id, &mut sampler)
            .unwrap();

        assert!(!state.project(first.id).unwrap().has_vehicle(vehicle.id));
        assert!(state.project(second.id).unwrap().has_vehicle(vehicle.id));
        assert_ne!(old_entry.id, new_entry.id);
        assert_eq!(state.gps_data.len(), 1);
        assert_eq!(state.gps_data[0].locations.len(), 1);
        assert_eq!(state.gps_data[0].project_id, second.id);
    }

    #[test]
    fn reassigning_to_same_project_keeps_membership_unique() {
        let mut state = FleetState::empty();
        let mut sampler = sampler();
        let project = state.add_project(new_project("Metro"));
        let vehicle = state.add_vehicle(new_vehicle("KA-01-AB-1234"));

        state.assign_vehicle_to_project(vehicle.id, project.id, &mut sampler);
        state.assign_vehicle_to_project(vehicle.id, project.id, &mut sampler);

        assert_eq!(
            state.project(project.id).unwrap().assigned_vehicles,
            vec![vehicle.id]
        );
    }

    #[test]
    fn assigning_to_unknown_project_is_a_noop() {
        let mut state = FleetState::empty();
        let mut sampler = sampler();
        let vehicle = state.add_vehicle(new_vehicle("KA-01-AB-1234"));
        let before = state.clone();

        assert!(state
            .assign_vehicle_to_project(vehicle.id, Uuid::new_v4(), &mut sampler)
            .is_none());
        assert_eq!(state, before);
    }

    #[test]
    fn unassign_vehicle_keeps_history_and_stops_tracking() {
        let mut state = FleetState::empty();
        let mut sampler = sampler();
        let project = state.add_project(new_project("Metro"));
        let vehicle = state.add_vehicle(new_vehicle("KA-01-AB-1234"));

        state.assign_vehicle_to_project(vehicle.id, project.id, &mut sampler);
        state.update_gps_location(vehicle.id, &mut sampler);
        let history = state.tracking_for_vehicle(vehicle.id).unwrap().locations.clone();

        assert!(state.unassign_vehicle_from_project(vehicle.id));

        assert!(state.vehicle(vehicle.id).unwrap().assigned_project.is_none());
        assert!(state.projects.iter().all(|p| !p.has_vehicle(vehicle.id)));
        let entry = state.tracking_for_vehicle(vehicle.id).unwrap();
        assert!(!entry.tracking);
        assert!(entry.end_time.is_some());
        assert_eq!(entry.locations, history);
    }

    #[test]
    fn gps_update_appends_only_while_tracking() {
        let mut state = FleetState::empty();
        let mut sampler = sampler();
        let project = state.add_project(new_project("Metro"));
        let vehicle = state.add_vehicle(new_vehicle("KA-01-AB-1234"));

        assert!(state.update_gps_location(vehicle.id, &mut sampler).is_none());

        state.assign_vehicle_to_project(vehicle.id, project.id, &mut sampler);
        let event = state.update_gps_location(vehicle.id, &mut sampler).unwrap();
        assert_eq!(event.project_id, project.id);
        assert_eq!(state.tracking_for_vehicle(vehicle.id).unwrap().locations.len(), 2);

        state.unassign_vehicle_from_project(vehicle.id);
        assert!(state.update_gps_location(vehicle.id, &mut sampler).is_none());
        assert_eq!(state.tracking_for_vehicle(vehicle.id).unwrap().locations.len(), 2);
    }

    #[test]
    fn deleted_vehicle_track_stops_growing_and_can_be_stopped() {
        let mut state = FleetState::empty();
        let mut sampler = sampler();
        let project = state.add_project(new_project("Metro"));
        let vehicle = state.add_vehicle(new_vehicle("KA-01-AB-1234"));

        state.assign_vehicle_to_project(vehicle.id, project.id, &mut sampler);
        assert!(state.delete_vehicle(vehicle.id));

        assert!(state.tracked_vehicle_ids().is_empty());
        assert!(state.update_gps_location(vehicle.id, &mut sampler).is_none());

        assert!(state.unassign_vehicle_from_project(vehicle.id));
        let entry = state.tracking_for_vehicle(vehicle.id).unwrap();
        assert!(!entry.tracking);
        assert!(entry.end_time.is_some());
        assert_eq!(entry.locations.len(), 1);
        assert!(state.project(project.id).unwrap().has_vehicle(vehicle.id));
    }

    #[test]
    fn unassign_unknown_vehicle_without_track_is_a_noop() {
        let mut state = FleetState::empty();
        let before = state.clone();

        assert!(!state.unassign_vehicle_from_project(Uuid::new_v4()));
        assert_eq!(state, before);
    }

    #[test]
    fn lost_vehicle_keeps_stale_project_membership() {
        let mut state = FleetState::empty();
        let mut sampler = sampler();
        let p1 = state.add_project(new_project("Highway"));
        let v2 = state.add_vehicle(new_vehicle("MH-02-CD-5678"));

        state.assign_vehicle_to_project(v2.id, p1.id, &mut sampler);
        assert!(state.mark_vehicle_lost(v2.id, date(2024, 1, 1), "theft".to_string()));

        let v2_after = state.vehicle(v2.id).unwrap();
        assert_eq!(v2_after.status, VehicleStatus::Lost);
        assert!(v2_after.assigned_project.is_none());
        assert_eq!(v2_after.lost_notes.as_deref(), Some("theft"));
        assert!(state.project(p1.id).unwrap().has_vehicle(v2.id));
    }

    #[test]
    fn sold_vehicle_keeps_stale_driver_pointer() {
        let mut state = FleetState::empty();
        let vehicle = state.add_vehicle(new_vehicle("DL-04-GH-3456"));
        let driver = state.add_driver(new_driver("Amit Patel"));

        state.assign_driver_to_vehicle(driver.id, vehicle.id);
        assert!(state.mark_vehicle_sold(vehicle.id, date(2024, 6, 15), 850_000.0));

        let vehicle_after = state.vehicle(vehicle.id).unwrap();
        assert_eq!(vehicle_after.status, VehicleStatus::Sold);
        assert_eq!(vehicle_after.sold_price, Some(850_000.0));
        assert!(vehicle_after.assigned_driver.is_none());
        assert_eq!(
            state.driver(driver.id).unwrap().assigned_vehicle,
            Some(vehicle.id)
        );
    }

    #[test]
    fn restore_clears_sale_and_loss_details() {
        let mut state = FleetState::empty();
        let vehicle = state.add_vehicle(new_vehicle("DL-04-GH-3456"));

        state.mark_vehicle_sold(vehicle.id, date(2024, 6, 15), 850_000.0);
        assert!(state.restore_vehicle(vehicle.id));

        let restored = state.vehicle(vehicle.id).unwrap();
        assert_eq!(restored.status, VehicleStatus::Active);
        assert!(restored.sold_date.is_none());
        assert!(restored.sold_price.is_none());
        assert!(restored.lost_date.is_none());
        assert!(restored.lost_notes.is_none());
        assert!(!state.restore_vehicle(Uuid::new_v4()));
    }
}
