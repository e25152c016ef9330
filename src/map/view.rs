//! Camera view control: a fixed-zoom 2D camera that re-centers on the
//! user-position marker whenever it moves.

use bevy::prelude::*;

use super::markers::UserMarker;

/// World meters per screen pixel, roughly street-level zoom.
const VIEW_SCALE: f32 = 1.2;

const MAP_CLEAR: Color = Color::srgb(0.04, 0.06, 0.09);

pub struct ViewPlugin;

impl Plugin for ViewPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(MAP_CLEAR))
            .add_systems(Startup, setup_camera)
            .add_systems(Update, follow_user_marker);
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        OrthographicProjection {
            scale: VIEW_SCALE,
            ..OrthographicProjection::default_2d()
        },
    ));
}

/// Center and zoom the view on the user position (initial placement and any
/// later reposition).
fn follow_user_marker(
    user: Query<&Transform, (With<UserMarker>, Changed<Transform>, Without<Camera2d>)>,
    mut camera: Query<&mut Transform, With<Camera2d>>,
) {
    let Ok(user_transform) = user.get_single() else {
        return;
    };
    for mut camera_transform in &mut camera {
        camera_transform.translation.x = user_transform.translation.x;
        camera_transform.translation.y = user_transform.translation.y;
    }
}
