//! Vehicle record derivation.
//!
//! Turns raw roster entries into fully resolved display records: missing
//! status gets a random tier, seats text comes from a fixed lookup, and the
//! direction arrow angle is derived from route + heading. Falls back to the
//! synthetic generator in [`mock`] when the roster is empty.

use rand::Rng;

use crate::geo::GeoPoint;

pub mod mock;
pub mod roster;

/// Seat-availability tier shown on the marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Green,
    Yellow,
    Red,
}

impl Status {
    const ALL: [Status; 3] = [Status::Green, Status::Yellow, Status::Red];

    /// Fixed seats lookup used when an entry has no explicit seats text.
    pub fn seats_text(self) -> &'static str {
        match self {
            Status::Green => "3+ seats vacant",
            Status::Yellow => "1–2 seats vacant",
            Status::Red => "No seats available / standing only",
        }
    }

    /// Short status wording for the popup pill. Differs from
    /// [`Status::seats_text`] only for red, which drops the
    /// "standing only" suffix.
    pub fn display_text(self) -> &'static str {
        match self {
            Status::Green => "3+ seats vacant",
            Status::Yellow => "1–2 seats vacant",
            Status::Red => "No seats available",
        }
    }
}

/// Heading relative to the town reference point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Towards,
    Away,
}

impl Direction {
    pub fn phrase(self) -> &'static str {
        match self {
            Direction::Away => "Heading back to town",
            Direction::Towards => "Leaving town",
        }
    }
}

/// A raw roster entry. Coordinates are passed through uninterpreted; only
/// startup roster validation rejects garbage.
#[derive(Clone, Debug)]
pub struct VehicleInput {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub route_number: u8,
    pub route_name: String,
    pub driver_name: String,
    pub plate_number: String,
    pub direction: Option<Direction>,
    pub status: Option<Status>,
    pub seats: Option<String>,
}

/// A fully resolved record, recomputed wholesale on every render pass.
#[derive(Clone, Debug)]
pub struct VehicleRecord {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub route_number: u8,
    pub route_name: String,
    pub driver_name: String,
    pub plate_number: String,
    pub direction: Direction,
    pub status: Status,
    pub seats: String,
    pub arrow_angle: i32,
}

/// Arrow rotation in degrees. Route 1 (Rizal) runs east-west, route 2
/// (Malvar) north-south; 0° = east, -90° = north.
pub fn arrow_angle(route_number: u8, direction: Direction) -> i32 {
    if route_number == 1 {
        match direction {
            Direction::Away => 180,
            Direction::Towards => 0,
        }
    } else {
        match direction {
            Direction::Away => 90,
            Direction::Towards => -90,
        }
    }
}

/// Resolve roster entries into display records.
///
/// Non-empty input maps one record per entry, preserving id and coordinates.
/// Empty input falls back to [`mock::generate_mock_cabs`] scattered around
/// `center`. The RNG is injected so both paths are reproducible in tests.
pub fn derive_records(
    inputs: &[VehicleInput],
    center: GeoPoint,
    rng: &mut impl Rng,
) -> Vec<VehicleRecord> {
    if inputs.is_empty() {
        return mock::generate_mock_cabs(center, rng);
    }

    inputs
        .iter()
        .map(|input| {
            let status = input
                .status
                .unwrap_or_else(|| Status::ALL[rng.gen_range(0..Status::ALL.len())]);
            let direction = input.direction.unwrap_or_default();
            let seats = input
                .seats
                .clone()
                .unwrap_or_else(|| status.seats_text().to_string());

            VehicleRecord {
                id: input.id.clone(),
                lat: input.lat,
                lng: input.lng,
                route_number: input.route_number,
                route_name: input.route_name.clone(),
                driver_name: input.driver_name.clone(),
                plate_number: input.plate_number.clone(),
                direction,
                status,
                seats,
                arrow_angle: arrow_angle(input.route_number, direction),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn input(id: &str, route: u8, direction: Option<Direction>) -> VehicleInput {
        VehicleInput {
            id: id.to_string(),
            lat: 9.7402,
            lng: 118.7376,
            route_number: route,
            route_name: if route == 1 {
                "Rizal St route".to_string()
            } else {
                "Malvar route".to_string()
            },
            driver_name: "Juan Dela Cruz".to_string(),
            plate_number: "ABC 1234".to_string(),
            direction,
            status: None,
            seats: None,
        }
    }

    #[test]
    fn derivation_preserves_id_and_coordinates() {
        let inputs: Vec<_> = (0..4).map(|i| input(&format!("MC-{i}"), 1, None)).collect();
        let mut rng = StdRng::seed_from_u64(7);
        let records = derive_records(&inputs, crate::geo::DEFAULT_CENTER, &mut rng);

        assert_eq!(records.len(), inputs.len());
        for (rec, inp) in records.iter().zip(&inputs) {
            assert_eq!(rec.id, inp.id);
            assert_eq!(rec.lat, inp.lat);
            assert_eq!(rec.lng, inp.lng);
        }
    }

    #[test]
    fn arrow_angle_covers_all_route_direction_pairs() {
        assert_eq!(arrow_angle(1, Direction::Towards), 0);
        assert_eq!(arrow_angle(1, Direction::Away), 180);
        assert_eq!(arrow_angle(2, Direction::Towards), -90);
        assert_eq!(arrow_angle(2, Direction::Away), 90);
    }

    #[test]
    fn explicit_status_uses_fixed_seats_lookup() {
        for (status, expected) in [
            (Status::Green, "3+ seats vacant"),
            (Status::Yellow, "1–2 seats vacant"),
            (Status::Red, "No seats available / standing only"),
        ] {
            let mut entry = input("MC-1", 1, None);
            entry.status = Some(status);
            let mut rng = StdRng::seed_from_u64(1);
            let records = derive_records(&[entry], crate::geo::DEFAULT_CENTER, &mut rng);
            assert_eq!(records[0].status, status);
            assert_eq!(records[0].seats, expected);
        }
    }

    #[test]
    fn display_text_matches_seats_text_except_for_red() {
        assert_eq!(Status::Green.display_text(), Status::Green.seats_text());
        assert_eq!(Status::Yellow.display_text(), Status::Yellow.seats_text());
        assert_eq!(Status::Red.display_text(), "No seats available");
        assert_eq!(Status::Red.seats_text(), "No seats available / standing only");
    }

    #[test]
    fn explicit_seats_override_the_lookup() {
        let mut entry = input("MC-1", 1, None);
        entry.status = Some(Status::Yellow);
        entry.seats = Some("1 seat left".to_string());
        let mut rng = StdRng::seed_from_u64(1);
        let records = derive_records(&[entry], crate::geo::DEFAULT_CENTER, &mut rng);
        assert_eq!(records[0].seats, "1 seat left");
    }

    #[test]
    fn missing_direction_defaults_towards() {
        let mut rng = StdRng::seed_from_u64(3);
        let records = derive_records(&[input("MC-1", 2, None)], crate::geo::DEFAULT_CENTER, &mut rng);
        assert_eq!(records[0].direction, Direction::Towards);
        assert_eq!(records[0].arrow_angle, -90);
    }

    #[test]
    fn random_status_is_one_of_the_three_tiers_and_seeded() {
        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        let inputs: Vec<_> = (0..10).map(|i| input(&format!("MC-{i}"), 1, None)).collect();
        let a = derive_records(&inputs, crate::geo::DEFAULT_CENTER, &mut rng_a);
        let b = derive_records(&inputs, crate::geo::DEFAULT_CENTER, &mut rng_b);
        for (ra, rb) in a.iter().zip(&b) {
            assert!(Status::ALL.contains(&ra.status));
            assert_eq!(ra.status, rb.status);
            assert_eq!(ra.seats, ra.status.seats_text());
        }
    }

    #[test]
    fn end_to_end_single_away_cab() {
        let entry = VehicleInput {
            id: "MC-1".to_string(),
            lat: 9.7,
            lng: 118.7,
            route_number: 1,
            route_name: "Rizal St route".to_string(),
            driver_name: "Juan".to_string(),
            plate_number: "ABC 1234".to_string(),
            direction: Some(Direction::Away),
            status: None,
            seats: None,
        };
        let mut rng = StdRng::seed_from_u64(99);
        let records = derive_records(&[entry], crate::geo::DEFAULT_CENTER, &mut rng);

        assert_eq!(records.len(), 1);
        let rec = &records[0];
        assert!(Status::ALL.contains(&rec.status));
        assert_eq!(rec.arrow_angle, 180);
        assert_eq!(rec.seats, rec.status.seats_text());
        assert_eq!(rec.direction.phrase(), "Heading back to town");
    }
}
