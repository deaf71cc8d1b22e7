use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geo::{GeoPoint, haversine_km};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationSample {
    pub lat: f64,
    pub lng: f64,
    pub timestamp: DateTime<Utc>,
    /// km/h
    pub speed: u32,
}

impl LocationSample {
    pub fn point(&self) -> GeoPoint {
        GeoPoint {
            lat: self.lat,
            lng: self.lng,
        }
    }
}

/// GPS history for one vehicle while it works on a project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackingEntry {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub project_id: Uuid,
    pub tracking: bool,
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    pub locations: Vec<LocationSample>,
    pub created_at: DateTime<Utc>,
}

impl TrackingEntry {
    pub fn latest_location(&self) -> Option<&LocationSample> {
        self.locations.last()
    }

    /// Straight-line distance covered across consecutive samples.
    pub fn distance_km(&self) -> f64 {
        self.locations
            .windows(2)
            .map(|pair| haversine_km(&pair[0].point(), &pair[1].point()))
            .sum()
    }
}

/// Tracking entry as served to clients, with the derived figures attached.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingReport {
    #[serde(flatten)]
    pub entry: TrackingEntry,
    pub distance_km: f64,
    pub latest_location: Option<LocationSample>,
}

impl From<&TrackingEntry> for TrackingReport {
    fn from(entry: &TrackingEntry) -> Self {
        Self {
            distance_km: entry.distance_km(),
            latest_location: entry.latest_location().cloned(),
            entry: entry.clone(),
        }
    }
}

/// Published whenever a tracked vehicle receives a new sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationEvent {
    pub vehicle_id: Uuid,
    pub project_id: Uuid,
    pub location: LocationSample,
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use super::{LocationSample, TrackingEntry, TrackingReport};

    fn sample(lat: f64, lng: f64) -> LocationSample {
        LocationSample {
            lat,
            lng,
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap(),
            speed: 60,
        }
    }

    fn entry(locations: Vec<LocationSample>) -> TrackingEntry {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        TrackingEntry {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            project_id: Uuid::new_v4(),
            tracking: true,
            start_time: start,
            end_time: None,
            locations,
            created_at: start,
        }
    }

    #[test]
    fn single_sample_covers_no_distance() {
        assert_eq!(entry(vec![sample(20.5937, 78.9629)]).distance_km(), 0.0);
    }

    #[test]
    fn distance_sums_consecutive_legs() {
        let delhi = sample(28.6139, 77.2090);
        let mumbai = sample(19.0760, 72.8777);

        let one_way = entry(vec![delhi.clone(), mumbai.clone()]).distance_km();
        assert!((one_way - 1150.0).abs() < 20.0, "got {one_way}");

        let round_trip = entry(vec![delhi, mumbai, sample(28.6139, 77.2090)]).distance_km();
        assert!((round_trip - 2.0 * one_way).abs() < 1e-6);
    }

    #[test]
    fn report_flattens_entry_and_adds_derived_fields() {
        let track = entry(vec![sample(28.6139, 77.2090), sample(19.0760, 72.8777)]);
        let json = serde_json::to_value(TrackingReport::from(&track)).unwrap();

        assert_eq!(json["tracking"], true);
        assert_eq!(json["locations"].as_array().unwrap().len(), 2);
        assert!(json["distanceKm"].as_f64().unwrap() > 1000.0);
        assert_eq!(json["latestLocation"]["lat"], 19.0760);
    }
}
