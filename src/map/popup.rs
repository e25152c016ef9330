//! Marker selection popup.
//!
//! Clicking near a cab marker opens a card with the cab's details; clicking
//! empty map space closes it.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::markers::CabMarker;
use crate::cabs::VehicleRecord;

/// Click-to-marker hit radius in world meters.
const SELECT_RADIUS: f32 = 30.0;

const CARD_BG: Color = Color::srgba(0.07, 0.1, 0.17, 0.97);
const CARD_BORDER: Color = Color::srgb(0.33, 0.41, 0.53);
const TITLE_COLOR: Color = Color::srgb(0.95, 0.96, 0.98);
const META_COLOR: Color = Color::srgb(0.72, 0.77, 0.84);

pub struct PopupPlugin;

impl Plugin for PopupPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SelectedCab>()
            .add_systems(Update, (select_marker, sync_popup).chain());
    }
}

/// Currently selected cab, if any.
#[derive(Resource, Default)]
pub struct SelectedCab(pub Option<VehicleRecord>);

#[derive(Component)]
struct PopupCard;

/// Popup body lines: title first, status pill last.
pub fn popup_lines(record: &VehicleRecord) -> Vec<String> {
    vec![
        format!("Multicab {}", record.id),
        format!("Driver: {}", record.driver_name),
        format!("Plate no.: {}", record.plate_number),
        format!("Route {}: {}", record.route_number, record.route_name),
        format!("Direction: {}", record.direction.phrase()),
        record.seats.clone(),
        format!("● {}", record.status.display_text()),
    ]
}

fn select_marker(
    buttons: Res<ButtonInput<MouseButton>>,
    window: Query<&Window, With<PrimaryWindow>>,
    camera: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
    markers: Query<(&Transform, &CabMarker)>,
    mut selected: ResMut<SelectedCab>,
) {
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok(window) = window.get_single() else { return };
    let Some(cursor) = window.cursor_position() else { return };
    let Ok((camera, camera_transform)) = camera.get_single() else { return };
    let Ok(world) = camera.viewport_to_world_2d(camera_transform, cursor) else {
        return;
    };

    let hit = markers
        .iter()
        .map(|(transform, marker)| {
            (transform.translation.truncate().distance(world), marker)
        })
        .filter(|(distance, _)| *distance <= SELECT_RADIUS)
        .min_by(|a, b| a.0.total_cmp(&b.0));

    selected.0 = hit.map(|(_, marker)| marker.0.clone());
}

/// Rebuild the popup card whenever the selection changes.
fn sync_popup(
    mut commands: Commands,
    selected: Res<SelectedCab>,
    cards: Query<Entity, With<PopupCard>>,
) {
    if !selected.is_changed() {
        return;
    }

    for entity in &cards {
        commands.entity(entity).despawn_recursive();
    }

    let Some(record) = selected.0.as_ref() else {
        return;
    };
    let lines = popup_lines(record);
    let pill_color = super::markers::status_color(record.status);

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(12.0),
                bottom: Val::Px(70.0),
                width: Val::Px(230.0),
                padding: UiRect::all(Val::Px(12.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BackgroundColor(CARD_BG),
            BorderColor(CARD_BORDER),
            PopupCard,
        ))
        .with_children(|card| {
            for (index, line) in lines.iter().enumerate() {
                let is_title = index == 0;
                let is_pill = index == lines.len() - 1;
                card.spawn((
                    Text::new(line.clone()),
                    TextFont {
                        font_size: if is_title { 14.0 } else { 12.0 },
                        ..default()
                    },
                    TextColor(if is_title {
                        TITLE_COLOR
                    } else if is_pill {
                        pill_color
                    } else {
                        META_COLOR
                    }),
                ));
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cabs::{Direction, Status};

    fn record() -> VehicleRecord {
        VehicleRecord {
            id: "MC-1".to_string(),
            lat: 9.74,
            lng: 118.73,
            route_number: 1,
            route_name: "Rizal St route".to_string(),
            driver_name: "Juan Dela Cruz".to_string(),
            plate_number: "ABC 1234".to_string(),
            direction: Direction::Away,
            status: Status::Yellow,
            seats: "1–2 seats vacant".to_string(),
            arrow_angle: 180,
        }
    }

    #[test]
    fn popup_lists_every_detail_in_order() {
        let lines = popup_lines(&record());
        assert_eq!(
            lines,
            vec![
                "Multicab MC-1".to_string(),
                "Driver: Juan Dela Cruz".to_string(),
                "Plate no.: ABC 1234".to_string(),
                "Route 1: Rizal St route".to_string(),
                "Direction: Heading back to town".to_string(),
                "1–2 seats vacant".to_string(),
                "● 1–2 seats vacant".to_string(),
            ]
        );
    }

    #[test]
    fn red_cab_pill_drops_the_standing_only_suffix() {
        let mut rec = record();
        rec.status = Status::Red;
        rec.seats = Status::Red.seats_text().to_string();
        let lines = popup_lines(&rec);
        // Seats line keeps the long default; the pill uses the short wording.
        assert_eq!(lines[5], "No seats available / standing only");
        assert_eq!(lines[6], "● No seats available");
    }

    #[test]
    fn towards_cab_reads_as_leaving_town() {
        let mut rec = record();
        rec.direction = Direction::Towards;
        let lines = popup_lines(&rec);
        assert_eq!(lines[4], "Direction: Leaving town");
    }
}
