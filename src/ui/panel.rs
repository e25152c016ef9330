//! Top panel: location banner and chip, how-it-works sheet, demo-mode
//! button, hidden 5-tap demo trigger, and the collapse toggle.

use bevy::prelude::*;
use bevy::ui::FocusPolicy;

use crate::app_state::{AppConfig, MapMode};
use crate::geo::format_coords;
use crate::location::LocationFix;
use crate::ui::toast::ShowToast;

/// Taps on the panel title within this window count toward the hidden
/// demo toggle; the counter resets when it expires.
const TAP_WINDOW_SECS: f32 = 0.8;
const TAPS_TO_TOGGLE: u32 = 5;

const PANEL_BG: Color = Color::srgba(0.05, 0.08, 0.14, 0.94);
const CHIP_BG: Color = Color::srgba(0.1, 0.14, 0.22, 0.95);
const BUTTON_IDLE: Color = Color::srgba(0.12, 0.17, 0.26, 0.95);
const BUTTON_HOVER: Color = Color::srgba(0.17, 0.23, 0.34, 0.95);
const DEMO_ACTIVE: Color = Color::srgba(0.45, 0.16, 0.16, 0.95);
const TEXT_COLOR: Color = Color::srgb(0.9, 0.92, 0.95);
const MUTED_TEXT: Color = Color::srgb(0.63, 0.69, 0.77);
const SHEET_BACKDROP: Color = Color::srgba(0.0, 0.0, 0.0, 0.55);

pub struct PanelPlugin;

impl Plugin for PanelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TapCounter>()
            .add_systems(Startup, setup_panel)
            .add_systems(
                Update,
                (
                    update_location_banner,
                    handle_how_button,
                    handle_sheet_close,
                    handle_demo_button,
                    handle_title_taps,
                    tick_tap_counter,
                    update_demo_button,
                    handle_panel_toggle,
                    style_buttons,
                ),
            );
    }
}

/// Rolling tap counter for the hidden demo trigger.
#[derive(Resource)]
pub struct TapCounter {
    count: u32,
    window: Timer,
}

impl Default for TapCounter {
    fn default() -> Self {
        Self {
            count: 0,
            window: Timer::from_seconds(TAP_WINDOW_SECS, TimerMode::Once),
        }
    }
}

impl TapCounter {
    /// Register one tap, restarting the reset window. Returns true when the
    /// tap sequence completed (and resets).
    pub fn tap(&mut self) -> bool {
        self.count += 1;
        self.window.reset();
        if self.count >= TAPS_TO_TOGGLE {
            self.count = 0;
            true
        } else {
            false
        }
    }

    /// Expire the window: taps spaced too far apart start over.
    pub fn tick(&mut self, delta: std::time::Duration) {
        if self.count > 0 && self.window.tick(delta).just_finished() {
            self.count = 0;
        }
    }

    #[cfg(test)]
    fn count(&self) -> u32 {
        self.count
    }
}

#[derive(Component)]
struct BannerText;

#[derive(Component)]
struct LocationChipText;

#[derive(Component)]
struct PanelTitleButton;

#[derive(Component)]
struct PanelBody;

#[derive(Component)]
struct HowButton;

#[derive(Component)]
struct DemoButton;

#[derive(Component)]
struct DemoButtonText;

#[derive(Component)]
struct PanelToggleButton;

#[derive(Component)]
struct ToggleIcon;

#[derive(Component)]
struct ToggleLabel;

#[derive(Component)]
struct SheetBackdrop;

#[derive(Component)]
struct SheetCloseButton;

fn setup_panel(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                left: Val::Px(10.0),
                right: Val::Px(10.0),
                padding: UiRect::all(Val::Px(12.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(8.0),
                ..default()
            },
            BackgroundColor(PANEL_BG),
        ))
        .with_children(|panel| {
            // Header row: title (tap target) + collapse toggle.
            panel
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    justify_content: JustifyContent::SpaceBetween,
                    align_items: AlignItems::Center,
                    ..default()
                })
                .with_children(|header| {
                    header
                        .spawn((
                            Button,
                            Node::default(),
                            BackgroundColor(Color::NONE),
                            PanelTitleButton,
                        ))
                        .with_children(|title| {
                            title.spawn((
                                Text::new("Multicabs near you"),
                                TextFont {
                                    font_size: 16.0,
                                    ..default()
                                },
                                TextColor(TEXT_COLOR),
                            ));
                        });

                    header
                        .spawn((
                            Button,
                            Node {
                                padding: UiRect::axes(Val::Px(8.0), Val::Px(4.0)),
                                column_gap: Val::Px(4.0),
                                ..default()
                            },
                            BackgroundColor(BUTTON_IDLE),
                            PanelToggleButton,
                        ))
                        .with_children(|toggle| {
                            toggle.spawn((
                                Text::new("▾"),
                                TextFont {
                                    font_size: 12.0,
                                    ..default()
                                },
                                TextColor(MUTED_TEXT),
                                ToggleIcon,
                            ));
                            toggle.spawn((
                                Text::new("Hide"),
                                TextFont {
                                    font_size: 12.0,
                                    ..default()
                                },
                                TextColor(MUTED_TEXT),
                                ToggleLabel,
                            ));
                        });
                });

            // Collapsible body: banner, location chip, action buttons.
            panel
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        row_gap: Val::Px(8.0),
                        ..default()
                    },
                    PanelBody,
                ))
                .with_children(|body| {
                    body.spawn((
                        Text::new("Waiting for your GPS position…"),
                        TextFont {
                            font_size: 13.0,
                            ..default()
                        },
                        TextColor(MUTED_TEXT),
                        BannerText,
                    ));

                    body.spawn((
                        Node {
                            padding: UiRect::axes(Val::Px(10.0), Val::Px(5.0)),
                            align_self: AlignSelf::FlexStart,
                            ..default()
                        },
                        BackgroundColor(CHIP_BG),
                    ))
                    .with_children(|chip| {
                        chip.spawn((
                            Text::new("Locating…"),
                            TextFont {
                                font_size: 12.0,
                                ..default()
                            },
                            TextColor(TEXT_COLOR),
                            LocationChipText,
                        ));
                    });

                    body.spawn(Node {
                        flex_direction: FlexDirection::Row,
                        column_gap: Val::Px(8.0),
                        ..default()
                    })
                    .with_children(|row| {
                        spawn_action_button(row, "How it works", HowButton);
                        row.spawn((
                            Button,
                            Node {
                                padding: UiRect::axes(Val::Px(10.0), Val::Px(6.0)),
                                ..default()
                            },
                            BackgroundColor(BUTTON_IDLE),
                            DemoButton,
                        ))
                        .with_children(|button| {
                            button.spawn((
                                Text::new("Demo: night view"),
                                TextFont {
                                    font_size: 13.0,
                                    ..default()
                                },
                                TextColor(TEXT_COLOR),
                                DemoButtonText,
                            ));
                        });
                    });
                });
        });

    // How-it-works sheet, hidden until requested.
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                right: Val::Px(0.0),
                top: Val::Px(0.0),
                bottom: Val::Px(0.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::FlexEnd,
                ..default()
            },
            Button,
            BackgroundColor(SHEET_BACKDROP),
            Visibility::Hidden,
            SheetBackdrop,
        ))
        .with_children(|backdrop| {
            backdrop
                .spawn((
                    Node {
                        width: Val::Percent(92.0),
                        margin: UiRect::bottom(Val::Px(16.0)),
                        padding: UiRect::all(Val::Px(16.0)),
                        flex_direction: FlexDirection::Column,
                        row_gap: Val::Px(6.0),
                        ..default()
                    },
                    BackgroundColor(PANEL_BG),
                    FocusPolicy::Block,
                ))
                .with_children(|card| {
                    card.spawn((
                        Text::new("How it works"),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(TEXT_COLOR),
                    ));
                    for line in [
                        "We center the map on your GPS position.",
                        "Each marker is a multicab on Rizal St (route 1) or Malvar (route 2).",
                        "Green: 3+ seats vacant. Yellow: 1–2 seats. Red: standing only.",
                        "The arrow shows whether the cab is leaving town or heading back.",
                        "Tap a marker for the driver, plate, and seat details.",
                    ] {
                        card.spawn((
                            Text::new(line),
                            TextFont {
                                font_size: 12.0,
                                ..default()
                            },
                            TextColor(MUTED_TEXT),
                        ));
                    }
                    card.spawn((
                        Button,
                        Node {
                            margin: UiRect::top(Val::Px(8.0)),
                            padding: UiRect::axes(Val::Px(10.0), Val::Px(6.0)),
                            align_self: AlignSelf::FlexEnd,
                            ..default()
                        },
                        BackgroundColor(BUTTON_IDLE),
                        SheetCloseButton,
                    ))
                    .with_children(|button| {
                        button.spawn((
                            Text::new("Close"),
                            TextFont {
                                font_size: 13.0,
                                ..default()
                            },
                            TextColor(TEXT_COLOR),
                        ));
                    });
                });
        });
}

fn spawn_action_button(parent: &mut ChildBuilder, label: &str, marker: impl Component) {
    parent
        .spawn((
            Button,
            Node {
                padding: UiRect::axes(Val::Px(10.0), Val::Px(6.0)),
                ..default()
            },
            BackgroundColor(BUTTON_IDLE),
            marker,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(label),
                TextFont {
                    font_size: 13.0,
                    ..default()
                },
                TextColor(TEXT_COLOR),
            ));
        });
}

/// Reflect the resolved location in the banner, chip, and (on fallback) a
/// toast.
fn update_location_banner(
    mut fixes: EventReader<LocationFix>,
    mut banner: Query<&mut Text, (With<BannerText>, Without<LocationChipText>)>,
    mut chip: Query<&mut Text, (With<LocationChipText>, Without<BannerText>)>,
    mut toasts: EventWriter<ShowToast>,
) {
    for fix in fixes.read() {
        for mut text in &mut banner {
            **text = if fix.fallback {
                "Note: Di ma-access ang exact GPS mo. Showing sample multicabs near a default location.".to_string()
            } else {
                "Nice! We are using your location to show multicabs around you.".to_string()
            };
        }
        for mut text in &mut chip {
            **text = format_coords(fix.point);
        }
        if fix.fallback {
            toasts.send(ShowToast::with_duration(
                "Di ma-access ang GPS. Gumamit kami ng sample location.",
                4.5,
            ));
        }
    }
}

fn handle_how_button(
    interactions: Query<&Interaction, (Changed<Interaction>, With<HowButton>)>,
    mut sheet: Query<&mut Visibility, With<SheetBackdrop>>,
) {
    for interaction in &interactions {
        if *interaction == Interaction::Pressed {
            for mut visibility in &mut sheet {
                *visibility = Visibility::Visible;
            }
        }
    }
}

/// Close on the close button or a backdrop press outside the card.
fn handle_sheet_close(
    close: Query<&Interaction, (Changed<Interaction>, With<SheetCloseButton>)>,
    backdrop_press: Query<&Interaction, (Changed<Interaction>, With<SheetBackdrop>)>,
    mut sheet: Query<&mut Visibility, With<SheetBackdrop>>,
) {
    let close_requested = close.iter().any(|i| *i == Interaction::Pressed)
        || backdrop_press.iter().any(|i| *i == Interaction::Pressed);
    if close_requested {
        for mut visibility in &mut sheet {
            *visibility = Visibility::Hidden;
        }
    }
}

/// Flip Live/Demo and surface the matching toast. Shared by the demo button
/// and the hidden tap trigger; toggling is idempotent per activation.
fn toggle_demo(
    current: MapMode,
    next: &mut NextState<MapMode>,
    toasts: &mut EventWriter<ShowToast>,
) {
    match current {
        MapMode::Live => {
            next.set(MapMode::Demo);
            toasts.send(ShowToast::with_duration(
                "Demo: night view (no cabs). Click the button again to exit.",
                4.0,
            ));
        }
        MapMode::Demo => {
            next.set(MapMode::Live);
            toasts.send(ShowToast::with_duration("Demo off. Showing multicabs again.", 2.5));
        }
    }
}

fn handle_demo_button(
    interactions: Query<&Interaction, (Changed<Interaction>, With<DemoButton>)>,
    mode: Res<State<MapMode>>,
    mut next: ResMut<NextState<MapMode>>,
    mut toasts: EventWriter<ShowToast>,
) {
    for interaction in &interactions {
        if *interaction == Interaction::Pressed {
            toggle_demo(*mode.get(), &mut next, &mut toasts);
        }
    }
}

/// Hidden shortcut: 5 quick taps on the panel title toggle demo mode.
fn handle_title_taps(
    config: Res<AppConfig>,
    interactions: Query<&Interaction, (Changed<Interaction>, With<PanelTitleButton>)>,
    mut taps: ResMut<TapCounter>,
    mode: Res<State<MapMode>>,
    mut next: ResMut<NextState<MapMode>>,
    mut toasts: EventWriter<ShowToast>,
) {
    if !config.hidden_demo_trigger {
        return;
    }
    for interaction in &interactions {
        if *interaction == Interaction::Pressed && taps.tap() {
            toggle_demo(*mode.get(), &mut next, &mut toasts);
        }
    }
}

fn tick_tap_counter(time: Res<Time>, mut taps: ResMut<TapCounter>) {
    taps.tick(time.delta());
}

/// Restyle the demo button when the mode changes.
fn update_demo_button(
    mode: Res<State<MapMode>>,
    mut label: Query<&mut Text, With<DemoButtonText>>,
    mut button: Query<&mut BackgroundColor, With<DemoButton>>,
) {
    if !mode.is_changed() {
        return;
    }
    let demo = *mode.get() == MapMode::Demo;
    for mut text in &mut label {
        **text = if demo { "Exit demo" } else { "Demo: night view" }.to_string();
    }
    for mut bg in &mut button {
        bg.0 = if demo { DEMO_ACTIVE } else { BUTTON_IDLE };
    }
}

/// Collapse/expand the panel body.
fn handle_panel_toggle(
    interactions: Query<&Interaction, (Changed<Interaction>, With<PanelToggleButton>)>,
    mut body: Query<&mut Node, With<PanelBody>>,
    mut icon: Query<&mut Text, (With<ToggleIcon>, Without<ToggleLabel>)>,
    mut label: Query<&mut Text, (With<ToggleLabel>, Without<ToggleIcon>)>,
) {
    for interaction in &interactions {
        if *interaction != Interaction::Pressed {
            continue;
        }
        for mut node in &mut body {
            let collapsed = node.display == Display::None;
            node.display = if collapsed { Display::Flex } else { Display::None };
            let now_collapsed = !collapsed;
            for mut text in &mut icon {
                **text = if now_collapsed { "▴" } else { "▾" }.to_string();
            }
            for mut text in &mut label {
                **text = if now_collapsed { "Show" } else { "Hide" }.to_string();
            }
        }
    }
}

/// Hover feedback for the untinted action buttons.
fn style_buttons(
    mode: Res<State<MapMode>>,
    mut buttons: Query<
        (&Interaction, &mut BackgroundColor, Option<&DemoButton>),
        (Changed<Interaction>, With<Button>, Without<PanelTitleButton>, Without<SheetBackdrop>),
    >,
) {
    for (interaction, mut bg, demo_button) in &mut buttons {
        let idle = if demo_button.is_some() && *mode.get() == MapMode::Demo {
            DEMO_ACTIVE
        } else {
            BUTTON_IDLE
        };
        bg.0 = match interaction {
            Interaction::Hovered | Interaction::Pressed => BUTTON_HOVER,
            Interaction::None => idle,
        };
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn five_quick_taps_complete_the_sequence() {
        let mut taps = TapCounter::default();
        for _ in 0..4 {
            assert!(!taps.tap());
        }
        assert!(taps.tap());
        // Counter reset after firing.
        assert_eq!(taps.count(), 0);
    }

    #[test]
    fn slow_taps_reset_the_counter() {
        let mut taps = TapCounter::default();
        taps.tap();
        taps.tap();
        taps.tick(Duration::from_secs_f32(TAP_WINDOW_SECS + 0.1));
        assert_eq!(taps.count(), 0);
        // A fresh sequence still needs all five taps.
        for _ in 0..4 {
            assert!(!taps.tap());
        }
        assert!(taps.tap());
    }

    #[test]
    fn each_tap_rearms_the_reset_window() {
        let mut taps = TapCounter::default();
        taps.tap();
        taps.tick(Duration::from_secs_f32(0.5));
        taps.tap();
        // 0.5s after the second tap the window is still open.
        taps.tick(Duration::from_secs_f32(0.5));
        assert_eq!(taps.count(), 2);
    }
}
