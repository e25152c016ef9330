//! Startup splash overlay, auto-hidden a few seconds in.

use bevy::prelude::*;

const SPLASH_SECS: f32 = 3.5;

const SPLASH_BG: Color = Color::srgb(0.03, 0.05, 0.09);
const TITLE_COLOR: Color = Color::srgb(0.95, 0.96, 0.98);
const SUBTITLE_COLOR: Color = Color::srgb(0.6, 0.67, 0.76);

pub struct SplashPlugin;

impl Plugin for SplashPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_splash)
            .add_systems(Update, hide_splash);
    }
}

#[derive(Component)]
struct SplashRoot {
    timer: Timer,
}

fn setup_splash(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                right: Val::Px(0.0),
                top: Val::Px(0.0),
                bottom: Val::Px(0.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(8.0),
                ..default()
            },
            BackgroundColor(SPLASH_BG),
            GlobalZIndex(10),
            SplashRoot {
                timer: Timer::from_seconds(SPLASH_SECS, TimerMode::Once),
            },
        ))
        .with_children(|splash| {
            splash.spawn((
                Text::new("Cabwatch"),
                TextFont {
                    font_size: 28.0,
                    ..default()
                },
                TextColor(TITLE_COLOR),
            ));
            splash.spawn((
                Text::new("Multicabs near you"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(SUBTITLE_COLOR),
            ));
        });
}

fn hide_splash(
    time: Res<Time>,
    mut commands: Commands,
    mut splash: Query<(Entity, &mut SplashRoot)>,
) {
    for (entity, mut root) in &mut splash {
        if root.timer.tick(time.delta()).just_finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}
