//! Bevy application setup

use bevy::prelude::*;
use bevy::winit::{UpdateMode, WinitSettings};

use planetview_core::{DeviceClass, ViewerConfig, ViewerSession};

use crate::input::{ActiveInput, InputPlugin};
use crate::models::ModelsPlugin;
use crate::platform;
use crate::scene::ScenePlugin;

/// Resolved viewer configuration
#[derive(Debug, Clone, Resource, Deref)]
pub struct Settings(pub ViewerConfig);

/// Per-page viewer session: load phase, drag state and accumulated rotation
#[derive(Debug, Clone, Resource, Deref, DerefMut)]
pub struct Session(pub ViewerSession);

/// Run the Bevy application
pub fn run(config: ViewerConfig) {
    // Classified once; never re-evaluated for the lifetime of the page
    let device = platform::user_agent()
        .map(|ua| DeviceClass::from_user_agent(&ua))
        .unwrap_or_default();
    let session = ViewerSession::new(device, config.scale, config.rotation);
    tracing::info!("Device class {:?}, using {:?} input", device, session.input_family());

    let [r, g, b] = config.clear_color;

    App::new()
        .insert_resource(ClearColor(Color::linear_rgb(r, g, b)))
        // Redraw every frame, paced only by the display
        .insert_resource(WinitSettings {
            focused_mode: UpdateMode::Continuous,
            unfocused_mode: UpdateMode::Continuous,
        })
        .add_plugins(DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Planetview".to_string(),
                    canvas: Some(config.canvas.clone()),
                    fit_canvas_to_parent: true,
                    // Drags must not select text or scroll the page
                    prevent_default_event_handling: true,
                    ..default()
                }),
                ..default()
            })
            .set(AssetPlugin {
                // Model paths are relative to the page
                file_path: "".to_string(),
                // Don't look for .meta files - static hosting doesn't have them
                meta_check: bevy::asset::AssetMetaCheck::Never,
                ..default()
            })
        )
        .insert_resource(ActiveInput(session.input_family()))
        .insert_resource(Session(session))
        .insert_resource(Settings(config))
        .add_plugins(ScenePlugin)
        .add_plugins(ModelsPlugin)
        .add_plugins(InputPlugin)
        .run();
}
