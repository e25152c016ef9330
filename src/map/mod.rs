//! Map surface: marker layer, camera view, street backdrop, and the
//! marker-selection popup.

use bevy::prelude::*;

pub mod backdrop;
pub mod markers;
pub mod popup;
pub mod view;

pub struct MapPlugin;

impl Plugin for MapPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(markers::MarkersPlugin)
            .add_plugins(view::ViewPlugin)
            .add_plugins(backdrop::BackdropPlugin)
            .add_plugins(popup::PopupPlugin);
    }
}
