//! Static roster of real multicab sightings.
//!
//! Exact coordinates collected by hand near Puerto Princesa. Add entries
//! here as real data comes in; an empty roster falls back to the mock
//! generator.

use bevy::prelude::*;

use super::{Direction, VehicleInput};
use crate::geo::GeoPoint;

/// Roster resource consumed by the render pipeline. Built once at startup
/// with invalid-coordinate entries dropped.
#[derive(Resource, Default)]
pub struct CabRoster(pub Vec<VehicleInput>);

struct RosterEntry {
    id: &'static str,
    lat: f64,
    lng: f64,
    route_number: u8,
    direction: Direction,
}

const REAL_MULTICABS: [RosterEntry; 7] = [
    RosterEntry {
        id: "MC-1",
        lat: 9.740285077719754,
        lng: 118.73768247492072,
        route_number: 1,
        direction: Direction::Towards,
    },
    RosterEntry {
        id: "MC-2",
        lat: 9.741504708213384,
        lng: 118.74420242752834,
        route_number: 1,
        direction: Direction::Away,
    },
    RosterEntry {
        id: "MC-3",
        lat: 9.742567376933073,
        lng: 118.73084673847242,
        route_number: 2,
        direction: Direction::Towards,
    },
    RosterEntry {
        id: "MC-4",
        lat: 9.744656351439975,
        lng: 118.74039903063725,
        route_number: 2,
        direction: Direction::Away,
    },
    RosterEntry {
        id: "MC-5",
        lat: 9.74233300463957,
        lng: 118.7364941280831,
        route_number: 2,
        direction: Direction::Towards,
    },
    RosterEntry {
        id: "MC-6",
        lat: 9.740116982049187,
        lng: 118.74087643913037,
        route_number: 1,
        direction: Direction::Away,
    },
    RosterEntry {
        id: "MC-7",
        lat: 9.740683549197378,
        lng: 118.73032741591591,
        route_number: 1,
        direction: Direction::Towards,
    },
];

fn route_name(route_number: u8) -> &'static str {
    if route_number == 1 {
        "Rizal St route"
    } else {
        "Malvar route"
    }
}

/// Build roster inputs, skipping entries with invalid coordinates.
pub fn load_roster() -> Vec<VehicleInput> {
    REAL_MULTICABS
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            if let Err(err) = GeoPoint::checked(entry.lat, entry.lng) {
                warn!("skipping roster entry {}: {}", entry.id, err);
                return None;
            }
            let driver_name = if index == 0 {
                "Juan Dela Cruz".to_string()
            } else {
                format!("Driver {}", index + 1)
            };
            let plate_number = if index == 0 {
                "ABC 1234".to_string()
            } else {
                format!("CAB {:04}", index + 1)
            };
            Some(VehicleInput {
                id: entry.id.to_string(),
                lat: entry.lat,
                lng: entry.lng,
                route_number: entry.route_number,
                route_name: route_name(entry.route_number).to_string(),
                driver_name,
                plate_number,
                direction: Some(entry.direction),
                status: None,
                seats: None,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_loads_all_entries_with_valid_coordinates() {
        let roster = load_roster();
        assert_eq!(roster.len(), 7);
        assert!(roster.iter().all(|e| GeoPoint::checked(e.lat, e.lng).is_ok()));
    }

    #[test]
    fn roster_entries_carry_route_names_and_plates() {
        let roster = load_roster();
        assert_eq!(roster[0].driver_name, "Juan Dela Cruz");
        assert_eq!(roster[0].plate_number, "ABC 1234");
        assert_eq!(roster[1].plate_number, "CAB 0002");
        assert_eq!(roster[2].route_name, "Malvar route");
        assert_eq!(roster[6].route_name, "Rizal St route");
    }
}
