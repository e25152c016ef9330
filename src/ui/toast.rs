//! Bottom toast notifications.
//!
//! One toast node; each `ShowToast` replaces the text and re-arms the
//! dismiss timer. A duration of zero makes the toast sticky.

use bevy::prelude::*;

/// Default auto-dismiss window.
const DEFAULT_DURATION_SECS: f32 = 3.8;

const TOAST_BG: Color = Color::srgba(0.06, 0.09, 0.16, 0.96);
const TOAST_TEXT: Color = Color::srgb(0.89, 0.91, 0.94);

pub struct ToastPlugin;

impl Plugin for ToastPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ShowToast>()
            .init_resource::<ToastState>()
            .add_systems(Startup, setup_toast)
            .add_systems(Update, (show_toasts, dismiss_toast));
    }
}

/// Request to surface a message to the user.
#[derive(Event, Clone, Debug)]
pub struct ShowToast {
    pub message: String,
    /// Seconds until auto-dismiss; 0 keeps the toast up.
    pub duration_secs: f32,
}

impl ShowToast {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            duration_secs: DEFAULT_DURATION_SECS,
        }
    }

    pub fn with_duration(message: impl Into<String>, duration_secs: f32) -> Self {
        Self {
            message: message.into(),
            duration_secs,
        }
    }
}

/// Dismiss timer for the visible toast; `None` while hidden or sticky.
#[derive(Resource, Default)]
pub struct ToastState {
    timer: Option<Timer>,
}

impl ToastState {
    /// Re-arm for a new message: any previous timer is dropped and restarted.
    pub fn arm(&mut self, duration_secs: f32) {
        self.timer = if duration_secs > 0.0 {
            Some(Timer::from_seconds(duration_secs, TimerMode::Once))
        } else {
            None
        };
    }

    pub fn expired(&mut self, delta: std::time::Duration) -> bool {
        match self.timer.as_mut() {
            Some(timer) => {
                if timer.tick(delta).just_finished() {
                    self.timer = None;
                    true
                } else {
                    false
                }
            }
            None => false,
        }
    }
}

#[derive(Component)]
struct ToastRoot;

#[derive(Component)]
struct ToastMessage;

fn setup_toast(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(24.0),
                left: Val::Percent(50.0),
                margin: UiRect::left(Val::Px(-160.0)),
                width: Val::Px(320.0),
                padding: UiRect::axes(Val::Px(14.0), Val::Px(10.0)),
                justify_content: JustifyContent::Center,
                ..default()
            },
            BackgroundColor(TOAST_BG),
            Visibility::Hidden,
            ToastRoot,
        ))
        .with_children(|toast| {
            toast.spawn((
                Text::new(""),
                TextFont {
                    font_size: 13.0,
                    ..default()
                },
                TextColor(TOAST_TEXT),
                ToastMessage,
            ));
        });
}

fn show_toasts(
    mut requests: EventReader<ShowToast>,
    mut state: ResMut<ToastState>,
    mut root: Query<&mut Visibility, With<ToastRoot>>,
    mut message: Query<&mut Text, With<ToastMessage>>,
) {
    // Later requests in the same frame win, like re-triggered toasts do.
    let Some(request) = requests.read().last() else {
        return;
    };

    for mut text in &mut message {
        **text = request.message.clone();
    }
    for mut visibility in &mut root {
        *visibility = Visibility::Visible;
    }
    state.arm(request.duration_secs);
}

fn dismiss_toast(
    time: Res<Time>,
    mut state: ResMut<ToastState>,
    mut root: Query<&mut Visibility, With<ToastRoot>>,
) {
    if state.expired(time.delta()) {
        for mut visibility in &mut root {
            *visibility = Visibility::Hidden;
        }
    }
}
