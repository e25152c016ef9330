//! Application mode and shared state.
//!
//! Holds the Live/Demo state machine, the last-known map center, the seeded
//! RNG feeding record derivation, and the startup configuration (UI variant
//! flags plus the simulated GPS source).

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::geo::{GeoPoint, DEFAULT_CENTER};

pub struct AppStatePlugin;

impl Plugin for AppStatePlugin {
    fn build(&self, app: &mut App) {
        let config = AppConfig::from_env();
        let seed = config.rng_seed;
        app.init_state::<MapMode>()
            .insert_resource(config)
            .insert_resource(MapCenter(DEFAULT_CENTER))
            .insert_resource(CabRng(StdRng::seed_from_u64(seed)));
    }
}

/// Whether vehicle markers are live or suppressed by the night-view demo.
#[derive(States, Default, Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum MapMode {
    /// Markers rendered for the last known center.
    #[default]
    Live,
    /// All cab markers cleared, fixed "no cabs" messaging shown.
    Demo,
}

/// Last center the render pipeline ran for. Demo exit re-renders from here.
#[derive(Resource, Clone, Copy)]
pub struct MapCenter(pub GeoPoint);

/// Seeded random source for status assignment and mock jitter, kept as a
/// resource so runs are reproducible.
#[derive(Resource)]
pub struct CabRng(pub StdRng);

/// Startup configuration, read from the environment.
///
/// The three variant flags reconcile the two diverging upstream UIs: the
/// full variant (default) carries the active-cabs bar, the hidden 5-tap
/// demo trigger, and time-of-day empty messaging; `CABWATCH_MINIMAL_UI=1`
/// selects the companion variant that omits all three.
#[derive(Resource, Clone, Debug)]
pub struct AppConfig {
    pub rng_seed: u64,
    /// Simulated device fix; `None` means the position request times out.
    pub simulated_fix: Option<GeoPoint>,
    /// Artificial delay before the simulated fix resolves, seconds.
    pub fix_delay_secs: f32,
    pub active_cabs_bar: bool,
    pub hidden_demo_trigger: bool,
    pub time_of_day_empty_message: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rng_seed: 99999,
            simulated_fix: Some(DEFAULT_CENTER),
            fix_delay_secs: 1.5,
            active_cabs_bar: true,
            hidden_demo_trigger: true,
            time_of_day_empty_message: true,
        }
    }
}

impl AppConfig {
    /// Environment overrides: `CABWATCH_SEED`, `CABWATCH_LAT`/`CABWATCH_LNG`
    /// (simulated fix), `CABWATCH_NO_GPS=1` (force the timeout path), and
    /// `CABWATCH_MINIMAL_UI=1`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(seed) = env_parse::<u64>("CABWATCH_SEED") {
            config.rng_seed = seed;
        }
        if env_flag("CABWATCH_NO_GPS") {
            config.simulated_fix = None;
        } else if let (Some(lat), Some(lng)) =
            (env_parse::<f64>("CABWATCH_LAT"), env_parse::<f64>("CABWATCH_LNG"))
        {
            match GeoPoint::checked(lat, lng) {
                Ok(point) => config.simulated_fix = Some(point),
                Err(err) => warn!("ignoring CABWATCH_LAT/LNG: {}", err),
            }
        }
        if env_flag("CABWATCH_MINIMAL_UI") {
            config.active_cabs_bar = false;
            config.hidden_demo_trigger = false;
            config.time_of_day_empty_message = false;
        }

        config
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

fn env_flag(key: &str) -> bool {
    std::env::var(key).map(|v| v == "1" || v == "true").unwrap_or(false)
}
