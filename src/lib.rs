//! Cabwatch - multicab route demo
//!
//! A Bevy map demo that centers on the user's position and overlays a
//! mocked set of multicab markers with status, route, and direction
//! metadata.

pub mod app_state;
pub mod cabs;
pub mod geo;
pub mod location;
pub mod map;
pub mod ui;
