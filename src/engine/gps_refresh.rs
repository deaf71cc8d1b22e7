use std::sync::Arc;
use std::time::Instant;

use tokio::sync::watch;
use tokio::time::{Duration, MissedTickBehavior, interval};
use tracing::{debug, error, info};

use crate::error::AppError;
use crate::models::gps::LocationEvent;
use crate::state::AppState;

/// Appends one sample to every actively tracked vehicle in a single store
/// operation and publishes the new samples.
pub async fn refresh_tracked_vehicles(state: &AppState) -> Result<Vec<LocationEvent>, AppError> {
    let events = state
        .mutate("refresh_gps", |fleet, sampler| {
            fleet
                .tracked_vehicle_ids()
                .into_iter()
                .filter_map(|vehicle_id| fleet.update_gps_location(vehicle_id, sampler))
                .collect::<Vec<_>>()
        })
        .await?;

    for event in &events {
        state.publish_location(event.clone());
    }

    Ok(events)
}

/// Periodic GPS refresh. Stops when `shutdown` flips to `true` or its sender
/// is dropped.
pub async fn run_gps_refresh(
    state: Arc<AppState>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    info!(period_secs = period.as_secs_f64(), "gps refresh started");

    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; tracking entries already carry a
    // fresh sample from assignment.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let start = Instant::now();
                match refresh_tracked_vehicles(&state).await {
                    Ok(events) => debug!(
                        samples = events.len(),
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "gps refresh tick"
                    ),
                    Err(err) => error!(error = %err, "gps refresh failed"),
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    info!("gps refresh stopped");
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::watch;
    use tokio::time::Duration;

    use super::{refresh_tracked_vehicles, run_gps_refresh};
    use crate::state::AppState;
    use crate::store::fixtures::{new_project, new_vehicle};

    #[tokio::test]
    async fn refresh_touches_only_tracked_vehicles() {
        let state = AppState::in_memory(5);
        let mut events_rx = state.gps_events_tx.subscribe();

        let (tracked, idle) = state
            .mutate("setup", |fleet, sampler| {
                let project = fleet.add_project(new_project("Metro"));
                let tracked = fleet.add_vehicle(new_vehicle("KA-01-AB-1234"));
                let idle = fleet.add_vehicle(new_vehicle("MH-02-CD-5678"));
                fleet.assign_vehicle_to_project(tracked.id, project.id, sampler);
                (tracked.id, idle.id)
            })
            .await
            .unwrap();

        let events = refresh_tracked_vehicles(&state).await.unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].vehicle_id, tracked);
        assert_eq!(events_rx.recv().await.unwrap().vehicle_id, tracked);
        let (tracked_samples, idle_entry) = state
            .read(|fleet| {
                (
                    fleet.tracking_for_vehicle(tracked).map(|e| e.locations.len()),
                    fleet.tracking_for_vehicle(idle).is_some(),
                )
            })
            .await;
        assert_eq!(tracked_samples, Some(2));
        assert!(!idle_entry);
    }

    #[tokio::test]
    async fn refresh_skips_track_of_deleted_vehicle() {
        let state = AppState::in_memory(5);
        let vehicle_id = state
            .mutate("setup", |fleet, sampler| {
                let project = fleet.add_project(new_project("Metro"));
                let vehicle = fleet.add_vehicle(new_vehicle("KA-01-AB-1234"));
                fleet.assign_vehicle_to_project(vehicle.id, project.id, sampler);
                fleet.delete_vehicle(vehicle.id);
                vehicle.id
            })
            .await
            .unwrap();

        for _ in 0..5 {
            let events = refresh_tracked_vehicles(&state).await.unwrap();
            assert!(events.is_empty());
        }

        let samples = state
            .read(|fleet| fleet.tracking_for_vehicle(vehicle_id).map(|e| e.locations.len()))
            .await;
        assert_eq!(samples, Some(1));
        assert_eq!(state.metrics.tracked_vehicles.get(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn periodic_refresh_runs_until_shutdown() {
        let state = Arc::new(AppState::in_memory(5));
        let vehicle_id = state
            .mutate("setup", |fleet, sampler| {
                let project = fleet.add_project(new_project("Metro"));
                let vehicle = fleet.add_vehicle(new_vehicle("KA-01-AB-1234"));
                fleet.assign_vehicle_to_project(vehicle.id, project.id, sampler);
                vehicle.id
            })
            .await
            .unwrap();

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(run_gps_refresh(
            state.clone(),
            Duration::from_secs(30),
            shutdown_rx,
        ));

        tokio::time::sleep(Duration::from_secs(95)).await;
        shutdown_tx.send(true).unwrap();
        task.await.unwrap();

        let samples = state
            .read(|fleet| fleet.tracking_for_vehicle(vehicle_id).map(|e| e.locations.len()))
            .await;
        assert_eq!(samples, Some(4));
    }
}
