//! Pointer input adapters
//!
//! Mouse and touch input are translated into `PointerEvent`s by two adapters.
//! Only the adapter matching the session's input family runs; the choice is
//! made once at startup.

use bevy::input::mouse::MouseButtonInput;
use bevy::input::touch::Touches;
use bevy::input::ButtonState;
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowEvent};

use planetview_core::{InputFamily, PointerEvent, PointerPosition};

use crate::app::Session;
use crate::models::{LoadedModel, TransformHandle};

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<PointerInput>()
            .init_resource::<MouseTracker>()
            .init_resource::<TouchTracker>()
            .add_systems(Update, (
                mouse_adapter.run_if(resource_equals(ActiveInput(InputFamily::Mouse))),
                touch_adapter.run_if(resource_equals(ActiveInput(InputFamily::Touch))),
                apply_pointer_input,
            ).chain());
    }
}

/// Input family selected at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Resource)]
pub struct ActiveInput(pub InputFamily);

/// Translated pointer event, in dispatch order
#[derive(Debug, Clone, Copy, Message)]
pub struct PointerInput(pub PointerEvent);

/// Last cursor position seen on the window event stream
#[derive(Resource, Default)]
pub struct MouseTracker {
    cursor: Option<Vec2>,
}

/// The touch that started the current drag; later fingers are ignored
#[derive(Resource, Default)]
pub struct TouchTracker {
    id: Option<u64>,
    last: Vec2,
}

fn position(p: Vec2) -> PointerPosition {
    PointerPosition::new(p.x, p.y)
}

/// Any mouse button starts a drag. Buttons and cursor moves are read from
/// the window event stream so events landing in one frame keep their order.
fn mouse_adapter(
    mut window_events: MessageReader<WindowEvent>,
    mut tracker: ResMut<MouseTracker>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut out: MessageWriter<PointerInput>,
) {
    for event in window_events.read() {
        match event {
            WindowEvent::CursorMoved(moved) => {
                tracker.cursor = Some(moved.position);
                out.write(PointerInput(PointerEvent::Move(position(moved.position))));
            }
            WindowEvent::MouseButtonInput(MouseButtonInput { state: ButtonState::Pressed, .. }) => {
                let cursor = tracker
                    .cursor
                    .or_else(|| windows.single().ok().and_then(|w| w.cursor_position()));
                if let Some(cursor) = cursor {
                    out.write(PointerInput(PointerEvent::Press(position(cursor))));
                }
            }
            WindowEvent::MouseButtonInput(MouseButtonInput { state: ButtonState::Released, .. }) => {
                out.write(PointerInput(PointerEvent::Release));
            }
            WindowEvent::CursorLeft(_) => {
                tracker.cursor = None;
            }
            _ => {}
        }
    }
}

/// Follow the first finger down until it lifts. Press uses the point where
/// the finger landed, so movement in the landing frame still rotates.
fn touch_adapter(
    touches: Res<Touches>,
    mut tracker: ResMut<TouchTracker>,
    mut out: MessageWriter<PointerInput>,
) {
    if tracker.id.is_none() {
        if let Some(touch) = touches.iter_just_pressed().next() {
            tracker.id = Some(touch.id());
            tracker.last = touch.start_position();
            out.write(PointerInput(PointerEvent::Press(position(touch.start_position()))));
        }
    }

    let Some(id) = tracker.id else {
        return;
    };

    let current = touches
        .get_pressed(id)
        .or_else(|| touches.get_released(id))
        .map(|touch| touch.position());
    if let Some(current) = current {
        if current != tracker.last {
            tracker.last = current;
            out.write(PointerInput(PointerEvent::Move(position(current))));
        }
    }

    if touches.just_released(id) || touches.just_canceled(id) {
        tracker.id = None;
        out.write(PointerInput(PointerEvent::Release));
    }
}

/// Feed translated events to the session, rotating the model while dragging
fn apply_pointer_input(
    mut events: MessageReader<PointerInput>,
    mut session: ResMut<Session>,
    mut model_query: Query<&mut Transform, With<LoadedModel>>,
) {
    let mut handle = model_query.single_mut().ok().map(TransformHandle);
    for PointerInput(event) in events.read() {
        session.handle_pointer(*event, &mut handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::input::touch::{TouchInput, TouchPhase};
    use bevy::window::CursorMoved;
    use planetview_core::{DeviceClass, RotationLimits, ScalePolicy, ViewerSession};

    #[derive(Resource, Default)]
    struct Recorded(Vec<PointerEvent>);

    fn record(mut events: MessageReader<PointerInput>, mut recorded: ResMut<Recorded>) {
        recorded.0.extend(events.read().map(|PointerInput(event)| *event));
    }

    /// Headless app with a loaded model and the given input family active
    fn test_app(family: InputFamily) -> App {
        let mut session = ViewerSession::new(
            DeviceClass::Desktop,
            ScalePolicy::default(),
            RotationLimits::default(),
        );
        let mut transform = Transform::IDENTITY;
        session.model_loaded(500.0, 500.0, &mut TransformHandle(&mut transform));

        let mut app = App::new();
        app.add_plugins((MinimalPlugins, bevy::input::InputPlugin, InputPlugin))
            .add_message::<WindowEvent>()
            .add_message::<CursorMoved>()
            .insert_resource(ActiveInput(family))
            .insert_resource(Session(session))
            .init_resource::<Recorded>()
            .add_systems(Last, record);
        app.world_mut().spawn((transform, LoadedModel));
        app
    }

    fn touch(app: &mut App, id: u64, phase: TouchPhase, x: f32, y: f32) {
        app.world_mut().write_message(TouchInput {
            phase,
            position: Vec2::new(x, y),
            window: Entity::PLACEHOLDER,
            force: None,
            id,
        });
    }

    fn cursor(x: f32, y: f32) -> CursorMoved {
        CursorMoved {
            window: Entity::PLACEHOLDER,
            position: Vec2::new(x, y),
            delta: None,
        }
    }

    fn button(state: ButtonState) -> MouseButtonInput {
        MouseButtonInput {
            button: MouseButton::Left,
            state,
            window: Entity::PLACEHOLDER,
        }
    }

    fn window_event(app: &mut App, event: WindowEvent) {
        app.world_mut().write_message(event);
    }

    fn recorded(app: &App) -> &[PointerEvent] {
        &app.world().resource::<Recorded>().0
    }

    fn at(x: f32, y: f32) -> PointerPosition {
        PointerPosition::new(x, y)
    }

    #[test]
    fn test_second_finger_is_ignored() {
        let mut app = test_app(InputFamily::Touch);

        touch(&mut app, 1, TouchPhase::Started, 100.0, 100.0);
        app.update();

        touch(&mut app, 2, TouchPhase::Started, 300.0, 300.0);
        touch(&mut app, 2, TouchPhase::Moved, 350.0, 300.0);
        app.update();

        touch(&mut app, 1, TouchPhase::Moved, 140.0, 100.0);
        touch(&mut app, 2, TouchPhase::Moved, 400.0, 500.0);
        app.update();

        touch(&mut app, 2, TouchPhase::Ended, 400.0, 500.0);
        app.update();
        touch(&mut app, 1, TouchPhase::Ended, 140.0, 100.0);
        app.update();

        assert_eq!(
            recorded(&app),
            &[
                PointerEvent::Press(at(100.0, 100.0)),
                PointerEvent::Move(at(140.0, 100.0)),
                PointerEvent::Release,
            ]
        );

        let rotation = app.world().resource::<Session>().rotation();
        assert!((rotation.angle_y - 0.2).abs() < 1e-5);
        assert_eq!(rotation.angle_x, 0.0);
        assert!(!app.world().resource::<Session>().is_dragging());
    }

    #[test]
    fn test_landing_frame_movement_rotates() {
        let mut app = test_app(InputFamily::Touch);

        touch(&mut app, 7, TouchPhase::Started, 100.0, 100.0);
        touch(&mut app, 7, TouchPhase::Moved, 130.0, 100.0);
        app.update();

        assert_eq!(
            recorded(&app),
            &[
                PointerEvent::Press(at(100.0, 100.0)),
                PointerEvent::Move(at(130.0, 100.0)),
            ]
        );
        let rotation = app.world().resource::<Session>().rotation();
        assert!((rotation.angle_y - 0.15).abs() < 1e-5);
    }

    #[test]
    fn test_mouse_ignored_while_touch_active() {
        let mut app = test_app(InputFamily::Touch);

        window_event(&mut app, WindowEvent::CursorMoved(cursor(10.0, 10.0)));
        window_event(&mut app, WindowEvent::MouseButtonInput(button(ButtonState::Pressed)));
        window_event(&mut app, WindowEvent::CursorMoved(cursor(90.0, 40.0)));
        app.world_mut().write_message(cursor(90.0, 40.0));
        app.world_mut().write_message(button(ButtonState::Pressed));
        app.update();

        assert!(recorded(&app).is_empty());
        assert_eq!(app.world().resource::<Session>().rotation().angle_y, 0.0);
        assert!(!app.world().resource::<Session>().is_dragging());
    }

    #[test]
    fn test_mouse_events_keep_dispatch_order() {
        let mut app = test_app(InputFamily::Mouse);

        // Press, drag and release inside one frame, then a stray move
        window_event(&mut app, WindowEvent::CursorMoved(cursor(10.0, 10.0)));
        window_event(&mut app, WindowEvent::MouseButtonInput(button(ButtonState::Pressed)));
        window_event(&mut app, WindowEvent::CursorMoved(cursor(30.0, 10.0)));
        window_event(&mut app, WindowEvent::MouseButtonInput(button(ButtonState::Released)));
        window_event(&mut app, WindowEvent::CursorMoved(cursor(90.0, 10.0)));
        app.update();

        assert_eq!(
            recorded(&app),
            &[
                PointerEvent::Move(at(10.0, 10.0)),
                PointerEvent::Press(at(10.0, 10.0)),
                PointerEvent::Move(at(30.0, 10.0)),
                PointerEvent::Release,
                PointerEvent::Move(at(90.0, 10.0)),
            ]
        );

        let rotation = app.world().resource::<Session>().rotation();
        assert!((rotation.angle_y - 0.1).abs() < 1e-5);

        let mut models = app.world_mut().query_filtered::<&Transform, With<LoadedModel>>();
        let transform = models.single(app.world()).unwrap();
        let (_, y, _) = transform.rotation.to_euler(EulerRot::XYZ);
        assert!((y - 0.1).abs() < 1e-5);
    }
}
