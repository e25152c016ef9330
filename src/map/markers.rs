//! Marker presentation pipeline.
//!
//! A `RenderCabs` event triggers one full pass: derive records for the
//! given center, despawn every previous cab marker, and spawn the new set
//! (status-colored body, route badge, direction arrow). The user-position
//! marker is created once and repositioned on later fixes. `RenderOutcome`
//! records what the last pass produced and drives the summary UI.

use bevy::prelude::*;

use crate::app_state::{CabRng, MapCenter, MapMode};
use crate::cabs::roster::CabRoster;
use crate::cabs::{derive_records, Direction, Status, VehicleRecord};
use crate::geo::{GeoPoint, MapProjection};
use crate::location::LocationFix;

/// Marker body edge in world meters.
const MARKER_SIZE: f32 = 26.0;
const USER_MARKER_SIZE: f32 = 16.0;

const USER_BLUE: Color = Color::srgb(0.22, 0.74, 0.97);
const BADGE_BG: Color = Color::srgb(0.06, 0.09, 0.16);
const ARROW_GREEN: Color = Color::srgb(0.13, 0.77, 0.37);
const ARROW_RED: Color = Color::srgb(0.94, 0.27, 0.27);

pub struct MarkersPlugin;

impl Plugin for MarkersPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<RenderCabs>()
            .init_resource::<RenderOutcome>()
            .add_systems(
                Update,
                (handle_location_fix, render_cabs.run_if(in_state(MapMode::Live))).chain(),
            )
            .add_systems(OnEnter(MapMode::Demo), clear_cab_markers)
            .add_systems(OnExit(MapMode::Demo), rerender_on_demo_exit);
    }
}

/// Request one full marker render pass around `center`.
#[derive(Event, Clone, Copy, Debug)]
pub struct RenderCabs {
    pub center: GeoPoint,
}

/// What the last render pass produced.
#[derive(Resource, Clone, Copy, Debug)]
pub struct RenderOutcome {
    pub rendered: usize,
    pub empty: bool,
    /// Completed passes; zero means nothing has been rendered yet.
    pub passes: u64,
}

impl Default for RenderOutcome {
    fn default() -> Self {
        Self {
            rendered: 0,
            empty: true,
            passes: 0,
        }
    }
}

impl RenderOutcome {
    pub fn for_count(rendered: usize) -> Self {
        Self {
            rendered,
            empty: rendered == 0,
            passes: 0,
        }
    }
}

/// A rendered cab marker, carrying its record for the popup.
#[derive(Component)]
pub struct CabMarker(pub VehicleRecord);

/// The single user-position marker.
#[derive(Component)]
pub struct UserMarker;

/// Marker fill per status tier (red also covers anything unrecognized).
pub fn status_color(status: Status) -> Color {
    match status {
        Status::Green => Color::srgb_u8(0x22, 0xc5, 0x5e),
        Status::Yellow => Color::srgb_u8(0xfa, 0xcc, 0x15),
        Status::Red => Color::srgb_u8(0xef, 0x44, 0x44),
    }
}

/// Place or move the user marker and kick off a render pass for the fix.
fn handle_location_fix(
    mut commands: Commands,
    mut fixes: EventReader<LocationFix>,
    mut projection: ResMut<MapProjection>,
    mut user_marker: Query<&mut Transform, With<UserMarker>>,
    mut render: EventWriter<RenderCabs>,
) {
    for fix in fixes.read() {
        // The request resolves once, so the origin pin happens at most once.
        projection.origin = fix.point;
        let world = projection.to_world(fix.point);

        if let Ok(mut transform) = user_marker.get_single_mut() {
            transform.translation = world.extend(5.0);
        } else {
            commands.spawn((
                Sprite::from_color(USER_BLUE, Vec2::splat(USER_MARKER_SIZE)),
                Transform::from_translation(world.extend(5.0)),
                UserMarker,
            ));
        }

        render.send(RenderCabs { center: fix.point });
    }
}

/// The full render pass. Clears the previous marker set before spawning the
/// new one so repeated passes never accumulate.
fn render_cabs(
    mut commands: Commands,
    mut requests: EventReader<RenderCabs>,
    existing: Query<Entity, With<CabMarker>>,
    roster: Res<CabRoster>,
    mut rng: ResMut<CabRng>,
    mut center: ResMut<MapCenter>,
    projection: Res<MapProjection>,
    mut outcome: ResMut<RenderOutcome>,
) {
    // Coalesce: the last request this frame supersedes earlier ones.
    let Some(request) = requests.read().last().copied() else {
        return;
    };

    center.0 = request.center;
    let records = derive_records(&roster.0, request.center, &mut rng.0);

    for entity in &existing {
        commands.entity(entity).despawn_recursive();
    }

    for record in &records {
        spawn_cab_marker(&mut commands, record, &projection);
    }

    *outcome = RenderOutcome {
        passes: outcome.passes + 1,
        ..RenderOutcome::for_count(records.len())
    };
    info!("rendered {} cab markers", records.len());
}

fn spawn_cab_marker(commands: &mut Commands, record: &VehicleRecord, projection: &MapProjection) {
    let world = projection.to_world(GeoPoint::new(record.lat, record.lng));
    let arrow_char = if record.direction == Direction::Away { "←" } else { "→" };
    let arrow_color = if record.direction == Direction::Away {
        ARROW_RED
    } else {
        ARROW_GREEN
    };

    commands
        .spawn((
            Sprite::from_color(status_color(record.status), Vec2::splat(MARKER_SIZE)),
            Transform::from_translation(world.extend(2.0)),
            CabMarker(record.clone()),
        ))
        .with_children(|marker| {
            // Route-number badge, top-right corner.
            marker.spawn((
                Sprite::from_color(BADGE_BG, Vec2::splat(12.0)),
                Transform::from_xyz(MARKER_SIZE * 0.5, MARKER_SIZE * 0.5, 1.0),
            ));
            marker.spawn((
                Text2d::new(record.route_number.to_string()),
                TextFont {
                    font_size: 10.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.91, 0.92)),
                Transform::from_xyz(MARKER_SIZE * 0.5, MARKER_SIZE * 0.5, 2.0),
            ));
            // Direction arrow below the body.
            marker.spawn((
                Text2d::new(arrow_char),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(arrow_color),
                Transform::from_xyz(0.0, -MARKER_SIZE * 0.85, 1.0),
            ));
        });
}

/// Demo entry suppresses every cab marker and reports an empty pass.
fn clear_cab_markers(
    mut commands: Commands,
    existing: Query<Entity, With<CabMarker>>,
    mut outcome: ResMut<RenderOutcome>,
) {
    for entity in &existing {
        commands.entity(entity).despawn_recursive();
    }
    *outcome = RenderOutcome {
        passes: outcome.passes + 1,
        ..RenderOutcome::for_count(0)
    };
}

/// Demo exit re-runs the pipeline for the last known center. `OnExit(Demo)`
/// never fires for the initial `Live` state, so no pass happens before the
/// first location resolves.
fn rerender_on_demo_exit(center: Res<MapCenter>, mut render: EventWriter<RenderCabs>) {
    render.send(RenderCabs { center: center.0 });
}

#[cfg(test)]
mod tests {
    use bevy::state::app::StatesPlugin;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::cabs::VehicleInput;
    use crate::geo::DEFAULT_CENTER;

    fn roster_entry(id: &str) -> VehicleInput {
        VehicleInput {
            id: id.to_string(),
            lat: DEFAULT_CENTER.lat,
            lng: DEFAULT_CENTER.lng,
            route_number: 1,
            route_name: "Rizal St route".to_string(),
            driver_name: "Juan".to_string(),
            plate_number: "ABC 1234".to_string(),
            direction: None,
            status: None,
            seats: None,
        }
    }

    fn test_app(roster: Vec<VehicleInput>) -> App {
        let mut app = App::new();
        app.add_plugins(StatesPlugin)
            .init_state::<MapMode>()
            .add_event::<RenderCabs>()
            .add_event::<LocationFix>()
            .insert_resource(CabRoster(roster))
            .insert_resource(CabRng(StdRng::seed_from_u64(1)))
            .insert_resource(MapCenter(DEFAULT_CENTER))
            .insert_resource(MapProjection::default())
            .init_resource::<RenderOutcome>()
            .add_systems(
                Update,
                (handle_location_fix, render_cabs.run_if(in_state(MapMode::Live))).chain(),
            )
            .add_systems(OnEnter(MapMode::Demo), clear_cab_markers)
            .add_systems(OnExit(MapMode::Demo), rerender_on_demo_exit);
        app
    }

    fn marker_count(app: &mut App) -> usize {
        let world = app.world_mut();
        let mut query = world.query::<&CabMarker>();
        query.iter(world).count()
    }

    fn request_render(app: &mut App, center: GeoPoint) {
        app.world_mut().send_event(RenderCabs { center });
        app.update();
    }

    #[test]
    fn render_spawns_one_marker_per_roster_entry() {
        let mut app = test_app(vec![roster_entry("MC-1"), roster_entry("MC-2")]);
        request_render(&mut app, DEFAULT_CENTER);

        assert_eq!(marker_count(&mut app), 2);
        let outcome = *app.world().resource::<RenderOutcome>();
        assert_eq!(outcome.rendered, 2);
        assert!(!outcome.empty);
    }

    #[test]
    fn empty_roster_falls_back_to_five_mock_markers() {
        let mut app = test_app(Vec::new());
        request_render(&mut app, DEFAULT_CENTER);
        assert_eq!(marker_count(&mut app), 5);
    }

    #[test]
    fn repeated_passes_do_not_accumulate_markers() {
        let mut app = test_app(vec![roster_entry("MC-1"), roster_entry("MC-2")]);
        request_render(&mut app, DEFAULT_CENTER);
        assert_eq!(marker_count(&mut app), 2);

        app.world_mut().resource_mut::<CabRoster>().0 = vec![
            roster_entry("MC-1"),
            roster_entry("MC-2"),
            roster_entry("MC-3"),
        ];
        request_render(&mut app, DEFAULT_CENTER);
        // Exactly the second set's markers remain.
        assert_eq!(marker_count(&mut app), 3);
    }

    #[test]
    fn render_updates_last_known_center() {
        let mut app = test_app(vec![roster_entry("MC-1")]);
        let other = GeoPoint::new(10.3157, 123.8854);
        request_render(&mut app, other);
        assert_eq!(app.world().resource::<MapCenter>().0, other);
    }

    #[test]
    fn user_marker_is_created_once_and_repositioned() {
        let mut app = test_app(vec![roster_entry("MC-1")]);
        app.world_mut().send_event(LocationFix {
            point: DEFAULT_CENTER,
            fallback: false,
        });
        app.update();
        app.world_mut().send_event(LocationFix {
            point: GeoPoint::new(10.3157, 123.8854),
            fallback: true,
        });
        app.update();

        let world = app.world_mut();
        let mut query = world.query::<&UserMarker>();
        assert_eq!(query.iter(world).count(), 1);
    }

    #[test]
    fn demo_round_trip_restores_markers_for_last_center() {
        let mut app = test_app(vec![roster_entry("MC-1"), roster_entry("MC-2")]);
        request_render(&mut app, DEFAULT_CENTER);
        assert_eq!(marker_count(&mut app), 2);

        app.world_mut()
            .resource_mut::<NextState<MapMode>>()
            .set(MapMode::Demo);
        app.update();
        assert_eq!(marker_count(&mut app), 0);
        assert!(app.world().resource::<RenderOutcome>().empty);

        app.world_mut()
            .resource_mut::<NextState<MapMode>>()
            .set(MapMode::Live);
        app.update(); // state transition emits the render request
        app.update(); // render pass consumes it
        assert_eq!(marker_count(&mut app), 2);
        assert_eq!(app.world().resource::<MapCenter>().0, DEFAULT_CENTER);
        assert!(!app.world().resource::<RenderOutcome>().empty);
    }

    #[test]
    fn startup_live_state_does_not_render_before_any_fix() {
        let mut app = test_app(vec![roster_entry("MC-1")]);
        app.update();
        app.update();
        assert_eq!(marker_count(&mut app), 0);
    }

    #[test]
    fn outcome_for_zero_is_empty() {
        assert!(RenderOutcome::for_count(0).empty);
        assert!(!RenderOutcome::for_count(3).empty);
    }
}
