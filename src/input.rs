use crate::math::Vec2;
use crate::scene::SceneError;
use crate::state::{AppState, Interaction};
use log::debug;

/// Radius change per wheel notch while an occluder is selected
pub const WHEEL_RESIZE_STEP: f64 = 6.0;
/// Radius change for the grow/shrink keys
pub const KEY_RESIZE_STEP: f64 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Escape,
    Up,
    Down,
    Delete,
    Backspace,
    Char(char),
}

/// Discrete input, in world coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Quit,
    PointerMove(Vec2),
    PointerDown(PointerButton, Vec2),
    PointerUp(PointerButton),
    /// Positive deltas scroll up
    Wheel(f64),
    KeyDown(Key),
}

/// Whether the frame loop should keep running after an event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Applies one input event to the application state
pub fn handle_event(state: &mut AppState, event: InputEvent) -> Control {
    match event {
        InputEvent::Quit => return Control::Quit,
        InputEvent::PointerMove(pos) => match state.interaction.dragging() {
            Some(index) => absorb(state.scene.move_occluder(index, pos)),
            None => state.scene.light = pos,
        },
        InputEvent::PointerDown(PointerButton::Primary, pos) => match state.scene.hit_test(pos) {
            Some(index) => {
                debug!("picked occluder {index}");
                state.interaction = Interaction::Dragging(index);
            }
            None => {
                state.scene.light = pos;
                state.interaction = Interaction::Idle;
            }
        },
        InputEvent::PointerDown(PointerButton::Secondary, _) => state.config.toggle_rays(),
        InputEvent::PointerDown(PointerButton::Middle, _) => {}
        InputEvent::PointerUp(PointerButton::Primary) => {
            if let Interaction::Dragging(index) = state.interaction {
                state.interaction = Interaction::Selected(index);
            }
        }
        InputEvent::PointerUp(_) => {}
        InputEvent::Wheel(delta) => match state.selected() {
            Some(index) => absorb(state.scene.resize(index, WHEEL_RESIZE_STEP * delta)),
            None if delta > 0.0 => state.config.increase_samples(),
            None if delta < 0.0 => state.config.decrease_samples(),
            None => {}
        },
        InputEvent::KeyDown(key) => return handle_key(state, key),
    }
    Control::Continue
}

fn handle_key(state: &mut AppState, key: Key) -> Control {
    match key {
        Key::Escape | Key::Char('q') => return Control::Quit,
        Key::Char('r') => state.config.toggle_rays(),
        Key::Up => state.config.increase_samples(),
        Key::Down => state.config.decrease_samples(),
        Key::Char('c') => {
            if let Some(index) = state.selected() {
                absorb(state.scene.recolor_cycle(index));
            }
        }
        Key::Char('+') | Key::Char('=') => {
            if let Some(index) = state.selected() {
                absorb(state.scene.resize(index, KEY_RESIZE_STEP));
            }
        }
        Key::Char('-') => {
            if let Some(index) = state.selected() {
                absorb(state.scene.resize(index, -KEY_RESIZE_STEP));
            }
        }
        Key::Char('a') => match state.scene.add_occluder(state.scene.light) {
            Ok(index) => {
                debug!("added occluder {index} at {:?}", state.scene.light);
                // An active drag carries over to the new occluder
                state.interaction = match state.interaction {
                    Interaction::Dragging(_) => Interaction::Dragging(index),
                    _ => Interaction::Selected(index),
                };
            }
            Err(err) => absorb(Err(err)),
        },
        Key::Delete | Key::Backspace => {
            if let Some(index) = state.selected() {
                match state.scene.remove_occluder(index) {
                    Ok(_) => {
                        debug!("removed occluder {index}");
                        state.forget_removed(index);
                    }
                    Err(err) => absorb(Err(err)),
                }
            }
        }
        Key::Char(_) => {}
    }
    Control::Continue
}

/// Scene errors have no visible effect beyond the missing change
fn absorb(result: Result<(), SceneError>) {
    if let Err(err) = result {
        debug!("ignored: {err}");
    }
}
