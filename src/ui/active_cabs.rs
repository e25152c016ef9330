//! Active-cabs summary bar and the "no cabs" empty chip.
//!
//! Both are driven by `RenderOutcome`. The bar is part of the full UI
//! variant only; the chip always exists but the time-of-day wording is a
//! variant flag.

use bevy::prelude::*;
use chrono::{Local, Timelike};

use crate::app_state::{AppConfig, MapMode};
use crate::map::markers::RenderOutcome;

const BAR_BG: Color = Color::srgba(0.05, 0.08, 0.14, 0.94);
const CHIP_BG: Color = Color::srgba(0.23, 0.15, 0.06, 0.95);
const TEXT_COLOR: Color = Color::srgb(0.9, 0.92, 0.95);
const EMPTY_TEXT: Color = Color::srgb(0.63, 0.69, 0.77);
const CHIP_TEXT: Color = Color::srgb(0.98, 0.83, 0.55);

pub struct ActiveCabsPlugin;

impl Plugin for ActiveCabsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_active_cabs)
            .add_systems(Update, (update_summary, update_empty_chip));
    }
}

#[derive(Component)]
struct ActiveCabsText;

#[derive(Component)]
struct EmptyChip;

#[derive(Component)]
struct EmptyChipText;

/// Summary line for the bar: "No active cabs" or "N cab(s) available".
pub fn summary_text(rendered: usize) -> String {
    match rendered {
        0 => "No active cabs".to_string(),
        1 => "🚐 1 cab available".to_string(),
        n => format!("🚐 {n} cabs available"),
    }
}

/// Empty-state wording. The night window (hour ≥ 20 or < 5) only applies in
/// the time-of-day variant; otherwise the daytime message is always used.
pub fn empty_chip_message(hour: u32, time_based: bool) -> &'static str {
    if time_based && (hour >= 20 || hour < 5) {
        "No multicabs at this hour."
    } else {
        "No active multicabs on Rizal / Malvar right now."
    }
}

fn setup_active_cabs(mut commands: Commands, config: Res<AppConfig>) {
    if config.active_cabs_bar {
        commands
            .spawn((
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    left: Val::Px(12.0),
                    padding: UiRect::axes(Val::Px(12.0), Val::Px(8.0)),
                    ..default()
                },
                BackgroundColor(BAR_BG),
            ))
            .with_children(|bar| {
                bar.spawn((
                    Text::new(summary_text(0)),
                    TextFont {
                        font_size: 13.0,
                        ..default()
                    },
                    TextColor(EMPTY_TEXT),
                    ActiveCabsText,
                ));
            });
    }

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(120.0),
                left: Val::Percent(50.0),
                margin: UiRect::left(Val::Px(-150.0)),
                width: Val::Px(300.0),
                padding: UiRect::axes(Val::Px(12.0), Val::Px(8.0)),
                justify_content: JustifyContent::Center,
                ..default()
            },
            BackgroundColor(CHIP_BG),
            Visibility::Hidden,
            EmptyChip,
        ))
        .with_children(|chip| {
            chip.spawn((
                Text::new(""),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(CHIP_TEXT),
                EmptyChipText,
            ));
        });
}

fn update_summary(
    outcome: Res<RenderOutcome>,
    mut summary: Query<(&mut Text, &mut TextColor), With<ActiveCabsText>>,
) {
    if !outcome.is_changed() {
        return;
    }
    for (mut text, mut color) in &mut summary {
        **text = summary_text(outcome.rendered);
        color.0 = if outcome.rendered == 0 { EMPTY_TEXT } else { TEXT_COLOR };
    }
}

/// Show the chip after any pass that rendered nothing. Demo mode pins the
/// night wording regardless of the clock.
fn update_empty_chip(
    config: Res<AppConfig>,
    mode: Res<State<MapMode>>,
    outcome: Res<RenderOutcome>,
    mut chip: Query<&mut Visibility, With<EmptyChip>>,
    mut chip_text: Query<&mut Text, With<EmptyChipText>>,
) {
    if !outcome.is_changed() && !mode.is_changed() {
        return;
    }

    let demo = *mode.get() == MapMode::Demo;
    let visible = demo || (outcome.passes > 0 && outcome.empty);

    for mut visibility in &mut chip {
        *visibility = if visible { Visibility::Visible } else { Visibility::Hidden };
    }
    if visible {
        let message = if demo {
            "No multicabs at this hour."
        } else {
            empty_chip_message(Local::now().hour(), config.time_of_day_empty_message)
        };
        for mut text in &mut chip_text {
            **text = message.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_and_pluralizes() {
        assert_eq!(summary_text(0), "No active cabs");
        assert_eq!(summary_text(1), "🚐 1 cab available");
        assert_eq!(summary_text(4), "🚐 4 cabs available");
    }

    #[test]
    fn night_window_selects_the_night_message() {
        assert_eq!(empty_chip_message(20, true), "No multicabs at this hour.");
        assert_eq!(empty_chip_message(23, true), "No multicabs at this hour.");
        assert_eq!(empty_chip_message(4, true), "No multicabs at this hour.");
        assert_eq!(
            empty_chip_message(5, true),
            "No active multicabs on Rizal / Malvar right now."
        );
        assert_eq!(
            empty_chip_message(19, true),
            "No active multicabs on Rizal / Malvar right now."
        );
    }

    #[test]
    fn minimal_ui_always_uses_daytime_message() {
        assert_eq!(
            empty_chip_message(23, false),
            "No active multicabs on Rizal / Malvar right now."
        );
    }
}
