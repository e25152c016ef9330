use bevy::prelude::*;

use cabwatch::cabs::roster::CabRoster;
use cabwatch::geo::MapProjection;
use cabwatch::{app_state, cabs, location, map, ui};

fn main() {
    // Force Vulkan backend on Windows (DX12 causes crashes on some systems)
    #[cfg(target_os = "windows")]
    std::env::set_var("WGPU_BACKEND", "vulkan");
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Cabwatch".into(),
                resolution: (480., 800.).into(),
                ..default()
            }),
            ..default()
        }))
        // Mode state and configuration
        .add_plugins(app_state::AppStatePlugin)
        .insert_resource(CabRoster(cabs::roster::load_roster()))
        .init_resource::<MapProjection>()
        // Position acquisition
        .add_plugins(location::LocationPlugin)
        // Map surface and markers
        .add_plugins(map::MapPlugin)
        // Overlay UI
        .add_plugins(ui::UiPlugin)
        .run();
}
