use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub store_mutations_total: IntCounterVec,
    pub gps_samples_total: IntCounter,
    pub tracked_vehicles: IntGauge,
    pub persist_failures_total: IntCounter,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let store_mutations_total = IntCounterVec::new(
            Opts::new("store_mutations_total", "Store operations applied, by operation"),
            &["operation"],
        )
        .expect("valid store_mutations_total metric");

        let gps_samples_total =
            IntCounter::new("gps_samples_total", "Simulated GPS samples appended")
                .expect("valid gps_samples_total metric");

        let tracked_vehicles = IntGauge::new(
            "tracked_vehicles",
            "Vehicles whose tracking entry is currently active",
        )
        .expect("valid tracked_vehicles metric");

        let persist_failures_total = IntCounter::new(
            "persist_failures_total",
            "Snapshots that could not be written to storage",
        )
        .expect("valid persist_failures_total metric");

        registry
            .register(Box::new(store_mutations_total.clone()))
            .expect("register store_mutations_total");
        registry
            .register(Box::new(gps_samples_total.clone()))
            .expect("register gps_samples_total");
        registry
            .register(Box::new(tracked_vehicles.clone()))
            .expect("register tracked_vehicles");
        registry
            .register(Box::new(persist_failures_total.clone()))
            .expect("register persist_failures_total");

        Self {
            registry,
            store_mutations_total,
            gps_samples_total,
            tracked_vehicles,
            persist_failures_total,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}
