//! Overlay UI: toast, top panel, active-cabs summary, and splash.

use bevy::prelude::*;

pub mod active_cabs;
pub mod panel;
pub mod splash;
pub mod toast;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(toast::ToastPlugin)
            .add_plugins(panel::PanelPlugin)
            .add_plugins(active_cabs::ActiveCabsPlugin)
            .add_plugins(splash::SplashPlugin);
    }
}
