//! GLTF model loading, scaling and animation playback

use std::ops::DerefMut;

use bevy::asset::LoadState;
use bevy::gltf::Gltf;
use bevy::mesh::morph::MorphWeights;
use bevy::mesh::skinning::SkinnedMesh;
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

use planetview_core::{AnimationStart, ModelFeatures, ModelHandle, ViewerError};

use crate::app::{Session, Settings};
use crate::platform;

pub struct ModelsPlugin;

impl Plugin for ModelsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ModelAsset>()
            .add_systems(Startup, start_model_load)
            .add_systems(Update, (
                poll_model_load,
                ApplyDeferred,
                start_animations,
                report_model_features,
                resize_model,
            ).chain())
            .add_systems(PostUpdate, trace_model_transform);
    }
}

/// Marker for the root entity of the displayed model
#[derive(Component)]
pub struct LoadedModel;

/// Clips of the loaded model, ready to attach to its animation player
pub struct ModelAnimations {
    pub graph: Handle<AnimationGraph>,
    /// Graph node and start offset (seconds) per clip
    pub clips: Vec<(AnimationNodeIndex, f32)>,
}

/// Tracks the single model load issued at startup
#[derive(Resource, Default)]
pub struct ModelAsset {
    pub path: String,
    pub loading: Option<Handle<Gltf>>,
    pub entity: Option<Entity>,
    pub animations: Option<ModelAnimations>,
    features_reported: bool,
}

/// `ModelHandle` over the model's transform
pub struct TransformHandle<T>(pub T);

impl<T: DerefMut<Target = Transform>> ModelHandle for TransformHandle<T> {
    fn set_scale(&mut self, factor: f32) {
        self.0.scale = Vec3::splat(factor);
    }

    fn set_orientation(&mut self, angle_x: f32, angle_y: f32) {
        self.0.rotation = Quat::from_euler(EulerRot::XYZ, angle_x, angle_y, 0.0);
    }
}

fn start_model_load(
    mut model: ResMut<ModelAsset>,
    asset_server: Res<AssetServer>,
    settings: Res<Settings>,
) {
    tracing::info!("Starting to load model: {}", settings.model_path);
    let handle: Handle<Gltf> = asset_server.load(settings.model_path.clone());
    model.path = settings.model_path.clone();
    model.loading = Some(handle);
}

/// Check the load state and spawn the scene once the GLTF is available
fn poll_model_load(
    mut commands: Commands,
    mut model: ResMut<ModelAsset>,
    mut session: ResMut<Session>,
    settings: Res<Settings>,
    asset_server: Res<AssetServer>,
    gltf_assets: Res<Assets<Gltf>>,
    clips: Res<Assets<AnimationClip>>,
    mut graphs: ResMut<Assets<AnimationGraph>>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let Some(handle) = model.loading.clone() else {
        return;
    };

    match asset_server.get_load_state(handle.id()) {
        Some(LoadState::Loaded) => {
            model.loading = None;

            let (gltf, scene) = match select_scene(gltf_assets.get(&handle)) {
                Ok(found) => found,
                Err(reason) => {
                    session.model_failed(&ViewerError::AssetLoad {
                        path: model.path.clone(),
                        reason: reason.to_string(),
                    });
                    return;
                }
            };

            let (width, height) = windows
                .single()
                .map(|window| platform::container_size(&settings.container_id, window))
                .unwrap_or((0.0, 0.0));

            let mut transform = Transform::IDENTITY;
            session.model_loaded(width, height, &mut TransformHandle(&mut transform));

            tracing::info!("Model loaded: {}", model.path);
            let entity = commands.spawn((SceneRoot(scene), transform, LoadedModel)).id();
            model.entity = Some(entity);
            model.animations = build_animations(gltf, &clips, &mut graphs, &settings);
        }
        Some(LoadState::Failed(err)) => {
            model.loading = None;
            session.model_failed(&ViewerError::AssetLoad {
                path: model.path.clone(),
                reason: err.to_string(),
            });
        }
        _ => {
            // Still loading
        }
    }
}

/// The loaded GLTF and the scene to show: its default scene, else the first
fn select_scene(gltf: Option<&Gltf>) -> Result<(&Gltf, Handle<Scene>), &'static str> {
    let gltf = gltf.ok_or("asset reported loaded but is not in the asset store")?;
    let scene = gltf
        .default_scene
        .clone()
        .or_else(|| gltf.scenes.first().cloned())
        .ok_or("file contains no scenes")?;
    Ok((gltf, scene))
}

/// Build an animation graph with every clip of the model
fn build_animations(
    gltf: &Gltf,
    clips: &Assets<AnimationClip>,
    graphs: &mut Assets<AnimationGraph>,
    settings: &Settings,
) -> Option<ModelAnimations> {
    if gltf.animations.is_empty() {
        return None;
    }

    let start = settings.animation_start().unwrap_or_else(|e| {
        tracing::warn!("{}; starting clips from the beginning", e);
        AnimationStart::Beginning
    });

    let (graph, indices) = AnimationGraph::from_clips(gltf.animations.iter().cloned());
    let offsets = gltf
        .animations
        .iter()
        .zip(indices)
        .map(|(clip, index)| {
            let duration = clips.get(clip).map(|c| c.duration()).unwrap_or(0.0);
            (index, start.offset_for(duration))
        })
        .collect();

    Some(ModelAnimations {
        graph: graphs.add(graph),
        clips: offsets,
    })
}

/// Attach the graph and start every clip, looping, once the scene's player exists
fn start_animations(
    mut commands: Commands,
    model: Res<ModelAsset>,
    mut players: Query<(Entity, &mut AnimationPlayer), Added<AnimationPlayer>>,
) {
    let Some(animations) = &model.animations else {
        return;
    };

    for (entity, mut player) in &mut players {
        for (i, (index, offset)) in animations.clips.iter().enumerate() {
            player.play(*index).repeat().seek_to(*offset);
            tracing::info!("Playing animation clip {} from {:.3}s", i, offset);
        }
        commands
            .entity(entity)
            .insert(AnimationGraphHandle(animations.graph.clone()));
    }
}

/// Log whether the model has a skeleton, morph targets and animations
fn report_model_features(
    mut model: ResMut<ModelAsset>,
    children: Query<&Children>,
    skinned: Query<(), With<SkinnedMesh>>,
    morphs: Query<(), With<MorphWeights>>,
) {
    if model.features_reported {
        return;
    }
    let Some(root) = model.entity else {
        return;
    };
    // Scene instance not spawned yet
    if children.get(root).is_err() {
        return;
    }

    let mut features = ModelFeatures {
        animation_count: model.animations.as_ref().map_or(0, |a| a.clips.len()),
        ..default()
    };
    for entity in children.iter_descendants(root) {
        features.has_skeleton |= skinned.contains(entity);
        features.has_morph_targets |= morphs.contains(entity);
    }

    features.log();
    model.features_reported = true;
}

/// Rescale the model for every window resize, using the container's new size
fn resize_model(
    mut resized: MessageReader<WindowResized>,
    mut session: ResMut<Session>,
    settings: Res<Settings>,
    windows: Query<&Window>,
    mut model_query: Query<&mut Transform, With<LoadedModel>>,
) {
    for event in resized.read() {
        let Ok(window) = windows.get(event.window) else {
            continue;
        };
        let (width, height) = platform::container_size(&settings.container_id, window);
        let mut handle = model_query.single_mut().ok().map(TransformHandle);
        session.resize(width, height, &mut handle);
    }
}

fn trace_model_transform(session: Res<Session>, model_query: Query<&Transform, With<LoadedModel>>) {
    let Ok(transform) = model_query.single() else {
        tracing::trace!("No model in scene, phase: {:?}", session.phase());
        return;
    };
    tracing::trace!(
        "Model position: {:?}, rotation: {:?}, scale: {:?}, dragging: {}",
        transform.translation,
        transform.rotation.to_euler(EulerRot::XYZ),
        transform.scale,
        session.is_dragging()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_handle() {
        let mut transform = Transform::from_xyz(0.0, 0.0, 0.0);
        let mut handle = TransformHandle(&mut transform);
        handle.set_scale(0.3);
        handle.set_orientation(0.2, 1.0);

        assert_eq!(transform.scale, Vec3::splat(0.3));
        let (x, y, z) = transform.rotation.to_euler(EulerRot::XYZ);
        assert!((x - 0.2).abs() < 1e-5);
        assert!((y - 1.0).abs() < 1e-5);
        assert!(z.abs() < 1e-5);
    }

    #[test]
    fn test_missing_gltf_is_a_load_failure() {
        let err = select_scene(None).unwrap_err();
        assert!(err.contains("not in the asset store"));

        let mut session = planetview_core::ViewerSession::new(
            planetview_core::DeviceClass::Desktop,
            planetview_core::ScalePolicy::default(),
            planetview_core::RotationLimits::default(),
        );
        session.model_failed(&ViewerError::AssetLoad {
            path: "Images/planet2.gltf".to_string(),
            reason: err.to_string(),
        });
        assert!(matches!(
            session.phase(),
            planetview_core::LoadPhase::Failed(msg) if msg.contains("not in the asset store")
        ));
    }

    #[test]
    fn test_missing_model_is_untouched() {
        let mut handle: Option<TransformHandle<&mut Transform>> = None;
        handle.set_scale(2.0);
        handle.set_orientation(0.1, 0.1);
        assert!(handle.is_none());
    }
}
