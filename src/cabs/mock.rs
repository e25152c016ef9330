//! Synthetic cab generator used when the roster has no real entries.
//!
//! Scatters five cabs along the two fixed streets relative to the map
//! center so the prototype still reads as live without data.

use rand::Rng;

use super::{arrow_angle, Direction, Status, VehicleRecord};
use crate::geo::GeoPoint;

/// Rizal St sits slightly north of center, Malvar slightly west.
const RIZAL_LAT_OFFSET: f64 = 0.0004;
const MALVAR_LNG_OFFSET: f64 = -0.0004;
/// Cabs jitter uniformly within this much of center along their street.
const STREET_JITTER: f64 = 0.003;

/// Fixed (status, label, seats) triples for the five synthetic cabs.
const MOCK_CONFIGS: [(Status, &str, &str); 5] = [
    (Status::Green, "May bakante", "3–4 seats available"),
    (Status::Green, "May bakante", "2–3 seats available"),
    (Status::Yellow, "1–2 seats left", "2 seats left"),
    (Status::Yellow, "1–2 seats left", "1 seat left"),
    (Status::Red, "Puno", "Standing na lang"),
];

/// Fixed driver/plate pairs, reused round-robin.
const MOCK_DETAILS: [(&str, &str); 5] = [
    ("Juan Dela Cruz", "ABC 1234"),
    ("Maria Santos", "XYZ 5678"),
    ("Pedro Reyes", "KLM 9101"),
    ("Ana Lopez", "DEF 2345"),
    ("Rico Cruz", "GHI 6789"),
];

/// Produce exactly five records alternating route 1/2 by index parity.
/// Route-1 cabs sit on the Rizal latitude with jittered longitude; route-2
/// cabs on the Malvar longitude with jittered latitude.
pub fn generate_mock_cabs(center: GeoPoint, rng: &mut impl Rng) -> Vec<VehicleRecord> {
    let rizal_lat = center.lat + RIZAL_LAT_OFFSET;
    let malvar_lng = center.lng + MALVAR_LNG_OFFSET;

    MOCK_CONFIGS
        .iter()
        .enumerate()
        .map(|(index, (status, _label, seats))| {
            let (driver_name, plate_number) = MOCK_DETAILS[index % MOCK_DETAILS.len()];
            let is_route_1 = index % 2 == 0;
            let route_number = if is_route_1 { 1 } else { 2 };
            let route_name = if is_route_1 { "Rizal St route" } else { "Malvar route" };

            let (lat, lng) = if is_route_1 {
                (rizal_lat, center.lng + rng.gen_range(-STREET_JITTER..STREET_JITTER))
            } else {
                (center.lat + rng.gen_range(-STREET_JITTER..STREET_JITTER), malvar_lng)
            };

            VehicleRecord {
                id: format!("MC-{}", index + 1),
                lat,
                lng,
                route_number,
                route_name: route_name.to_string(),
                driver_name: driver_name.to_string(),
                plate_number: plate_number.to_string(),
                direction: Direction::Towards,
                status: *status,
                seats: seats.to_string(),
                arrow_angle: arrow_angle(route_number, Direction::Towards),
            }
        })
        .collect()
}
