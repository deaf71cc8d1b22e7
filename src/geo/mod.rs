use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::models::gps::LocationSample;

const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Centre of the simulated operating area.
pub const SIMULATION_CENTER: GeoPoint = GeoPoint {
    lat: 20.5937,
    lng: 78.9629,
};
/// Maximum offset from the centre, in degrees, on each axis.
pub const SIMULATION_SPREAD_DEG: f64 = 5.0;
pub const MIN_SPEED_KMH: u32 = 20;
pub const MAX_SPEED_KMH: u32 = 100;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let sin_lat = (delta_lat / 2.0).sin();
    let sin_lng = (delta_lng / 2.0).sin();

    let haversine = sin_lat * sin_lat + lat1.cos() * lat2.cos() * sin_lng * sin_lng;
    let central_angle = 2.0 * haversine.sqrt().asin();

    EARTH_RADIUS_KM * central_angle
}

/// Produces simulated GPS fixes. Seeded samplers are fully deterministic.
#[derive(Debug, Clone)]
pub struct LocationSampler {
    rng: StdRng,
}

impl LocationSampler {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn sample(&mut self) -> LocationSample {
        let lat_offset = self.rng.gen_range(-SIMULATION_SPREAD_DEG..SIMULATION_SPREAD_DEG);
        let lng_offset = self.rng.gen_range(-SIMULATION_SPREAD_DEG..SIMULATION_SPREAD_DEG);

        LocationSample {
            lat: SIMULATION_CENTER.lat + lat_offset,
            lng: SIMULATION_CENTER.lng + lng_offset,
            timestamp: Utc::now(),
            speed: self.rng.gen_range(MIN_SPEED_KMH..MAX_SPEED_KMH),
        }
    }
}
