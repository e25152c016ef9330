//! One-shot device position acquisition.
//!
//! Models the browser geolocation flow: a single request that either
//! resolves with a fix (here, a simulated device fix after a short delay)
//! or runs into an 8 s timeout and falls back to a fixed city center.
//! No retries, no polling.

use bevy::prelude::*;

use crate::app_state::AppConfig;
use crate::geo::{GeoPoint, FALLBACK_CENTER};

/// How long to wait for a device fix before falling back.
const LOCATION_TIMEOUT_SECS: f32 = 8.0;
/// Delay before nudging the user to allow GPS.
const NUDGE_DELAY_SECS: f32 = 1.2;

pub struct LocationPlugin;

impl Plugin for LocationPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<LocationFix>()
            .add_systems(Startup, start_location_request)
            .add_systems(Update, (poll_location, gps_nudge));
    }
}

/// The resolved position. `fallback` is true when the device fix was
/// unavailable and the fixed center was substituted.
#[derive(Event, Clone, Copy, Debug)]
pub struct LocationFix {
    pub point: GeoPoint,
    pub fallback: bool,
}

/// Pending one-shot request state.
#[derive(Resource)]
pub struct LocationRequest {
    timeout: Timer,
    fix_delay: Timer,
    nudge: Timer,
    pub resolved: bool,
}

fn start_location_request(mut commands: Commands, config: Res<AppConfig>) {
    commands.insert_resource(LocationRequest {
        timeout: Timer::from_seconds(LOCATION_TIMEOUT_SECS, TimerMode::Once),
        fix_delay: Timer::from_seconds(config.fix_delay_secs, TimerMode::Once),
        nudge: Timer::from_seconds(NUDGE_DELAY_SECS, TimerMode::Once),
        resolved: false,
    });
}

/// Resolve the pending request: simulated fix first, timeout fallback last.
fn poll_location(
    time: Res<Time>,
    config: Res<AppConfig>,
    request: Option<ResMut<LocationRequest>>,
    mut fixes: EventWriter<LocationFix>,
) {
    let Some(mut request) = request else { return };
    if request.resolved {
        return;
    }

    request.timeout.tick(time.delta());
    request.fix_delay.tick(time.delta());

    if let Some(point) = config.simulated_fix {
        if request.fix_delay.finished() {
            request.resolved = true;
            info!("location fix acquired: {:.4}, {:.4}", point.lat, point.lng);
            fixes.send(LocationFix { point, fallback: false });
            return;
        }
    }

    if request.timeout.finished() {
        request.resolved = true;
        warn!("location request timed out, using fallback center");
        fixes.send(LocationFix {
            point: FALLBACK_CENTER,
            fallback: true,
        });
    }
}

/// Ask the user to allow GPS shortly after startup, unless a fix already
/// arrived.
fn gps_nudge(
    time: Res<Time>,
    request: Option<ResMut<LocationRequest>>,
    mut toasts: EventWriter<crate::ui::toast::ShowToast>,
) {
    let Some(mut request) = request else { return };
    if request.resolved || request.nudge.finished() {
        return;
    }
    if request.nudge.tick(time.delta()).just_finished() {
        toasts.send(crate::ui::toast::ShowToast::new(
            "Please allow GPS so we can show multicabs near you.",
        ));
    }
}
