//! Street-axis backdrop.
//!
//! Stands in for the out-of-scope tile layer: a faint block grid plus the
//! two fixed streets the cabs ply, drawn as gizmo lines around the current
//! map center.

use bevy::prelude::*;

use crate::app_state::MapCenter;
use crate::geo::{GeoPoint, MapProjection};

/// How far the drawn streets extend from center, meters.
const STREET_HALF_EXTENT: f32 = 900.0;
/// Grid step, meters.
const GRID_STEP: f32 = 120.0;
const GRID_HALF_EXTENT: f32 = 1200.0;

const GRID_COLOR: Color = Color::srgba(0.25, 0.32, 0.42, 0.18);
const STREET_COLOR: Color = Color::srgba(0.55, 0.62, 0.72, 0.55);

pub struct BackdropPlugin;

impl Plugin for BackdropPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, draw_backdrop);
    }
}

fn draw_backdrop(mut gizmos: Gizmos, center: Res<MapCenter>, projection: Res<MapProjection>) {
    let origin = projection.to_world(center.0);

    // Block grid around the center.
    let steps = (GRID_HALF_EXTENT / GRID_STEP) as i32;
    for i in -steps..=steps {
        let offset = i as f32 * GRID_STEP;
        gizmos.line_2d(
            origin + Vec2::new(-GRID_HALF_EXTENT, offset),
            origin + Vec2::new(GRID_HALF_EXTENT, offset),
            GRID_COLOR,
        );
        gizmos.line_2d(
            origin + Vec2::new(offset, -GRID_HALF_EXTENT),
            origin + Vec2::new(offset, GRID_HALF_EXTENT),
            GRID_COLOR,
        );
    }

    // Rizal St: horizontal, slightly north of center.
    let rizal_y = projection
        .to_world(GeoPoint::new(center.0.lat + 0.0004, center.0.lng))
        .y;
    gizmos.line_2d(
        Vec2::new(origin.x - STREET_HALF_EXTENT, rizal_y),
        Vec2::new(origin.x + STREET_HALF_EXTENT, rizal_y),
        STREET_COLOR,
    );

    // Malvar: vertical, slightly west of center.
    let malvar_x = projection
        .to_world(GeoPoint::new(center.0.lat, center.0.lng - 0.0004))
        .x;
    gizmos.line_2d(
        Vec2::new(malvar_x, origin.y - STREET_HALF_EXTENT),
        Vec2::new(malvar_x, origin.y + STREET_HALF_EXTENT),
        STREET_COLOR,
    );
}
