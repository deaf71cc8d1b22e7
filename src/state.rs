use std::sync::Arc;

use tokio::sync::{Mutex, broadcast};
use tracing::{error, info};

use crate::error::AppError;
use crate::geo::LocationSampler;
use crate::models::gps::LocationEvent;
use crate::observability::metrics::Metrics;
use crate::persistence::{BlobStore, MemoryBlobStore, STORAGE_KEY};
use crate::store::FleetState;

struct Inner {
    fleet: FleetState,
    sampler: LocationSampler,
}

/// Owns the fleet aggregate. Every operation runs under one lock and the
/// resulting state is written to the blob store before the lock is released.
pub struct AppState {
    inner: Mutex<Inner>,
    blob: Arc<dyn BlobStore>,
    pub gps_events_tx: broadcast::Sender<LocationEvent>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(
        fleet: FleetState,
        sampler: LocationSampler,
        blob: Arc<dyn BlobStore>,
        event_buffer_size: usize,
    ) -> Self {
        let (gps_events_tx, _unused_rx) = broadcast::channel(event_buffer_size);
        let metrics = Metrics::new();
        metrics.tracked_vehicles.set(tracked_count(&fleet));

        Self {
            inner: Mutex::new(Inner { fleet, sampler }),
            blob,
            gps_events_tx,
            metrics,
        }
    }

    /// Hydrates from the persisted snapshot, falling back to an empty (or
    /// demo) fleet when nothing has been written yet.
    pub fn load(
        blob: Arc<dyn BlobStore>,
        sampler: LocationSampler,
        seed_demo_data: bool,
        event_buffer_size: usize,
    ) -> Result<Self, AppError> {
        let fleet = match blob.load(STORAGE_KEY)? {
            Some(raw) => {
                let fleet: FleetState = serde_json::from_str(&raw).map_err(|err| {
                    AppError::Persistence(format!("stored fleet snapshot is unreadable: {err}"))
                })?;
                info!(
                    vehicles = fleet.vehicles.len(),
                    drivers = fleet.drivers.len(),
                    projects = fleet.projects.len(),
                    "fleet restored from storage"
                );
                fleet
            }
            None if seed_demo_data => {
                info!("no stored fleet; starting from demo data");
                FleetState::seeded()
            }
            None => {
                info!("no stored fleet; starting empty");
                FleetState::empty()
            }
        };

        Ok(Self::new(fleet, sampler, blob, event_buffer_size))
    }

    /// Empty fleet over an in-memory blob store with a seeded sampler.
    pub fn in_memory(seed: u64) -> Self {
        Self::new(
            FleetState::empty(),
            LocationSampler::from_seed(seed),
            Arc::new(MemoryBlobStore::new()),
            1024,
        )
    }

    pub async fn read<T>(&self, query: impl FnOnce(&FleetState) -> T) -> T {
        let inner = self.inner.lock().await;
        query(&inner.fleet)
    }

    pub async fn snapshot(&self) -> FleetState {
        self.read(FleetState::clone).await
    }

    /// Runs one store operation and persists the result.
    pub async fn mutate<T>(
        &self,
        operation: &'static str,
        apply: impl FnOnce(&mut FleetState, &mut LocationSampler) -> T,
    ) -> Result<T, AppError> {
        let mut inner = self.inner.lock().await;
        let Inner { fleet, sampler } = &mut *inner;
        let outcome = apply(&mut *fleet, &mut *sampler);

        self.metrics
            .store_mutations_total
            .with_label_values(&[operation])
            .inc();
        self.metrics.tracked_vehicles.set(tracked_count(fleet));

        if let Err(err) = self.persist(fleet) {
            self.metrics.persist_failures_total.inc();
            error!(operation, error = %err, "failed to persist fleet");
            return Err(err);
        }

        Ok(outcome)
    }

    pub fn publish_location(&self, event: LocationEvent) {
        self.metrics.gps_samples_total.inc();
        // No subscribers is the common case.
        let _ = self.gps_events_tx.send(event);
    }

    fn persist(&self, fleet: &FleetState) -> Result<(), AppError> {
        let raw = serde_json::to_string(fleet)
            .map_err(|err| AppError::Persistence(format!("failed to serialize fleet: {err}")))?;
        self.blob.save(STORAGE_KEY, &raw)
    }
}

fn tracked_count(fleet: &FleetState) -> i64 {
    fleet.tracked_vehicle_ids().len() as i64
}
