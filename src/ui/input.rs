// SPDX-License-Identifier: MPL-2.0
//! Key and wheel bindings.
//!
//! Raw iced events are translated into [`InputAction`]s by pure functions.
//! Modifiers are passed in explicitly, nothing is read from ambient state.

use crate::config::Config;
use crate::domain::ui::ZoomStep;
use crate::ui::state::ZoomRequest;
use iced::keyboard::{self, key::Named, Key, Modifiers};
use iced::mouse::ScrollDelta;
use iced::Vector;

/// What an input gesture asks the viewer to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    /// Move through the current folder by this many steps.
    Browse(i32),
    /// Move between the main and comparison folders.
    BrowseFolder(i32),
    /// Zoom the focused pane; `broadcast` propagates the result to siblings.
    Zoom {
        request: ZoomRequest,
        broadcast: bool,
    },
    /// Scroll the focused pane by a screen-space delta.
    Scroll(Vector),
    ToggleZoomMode,
    RotateCounterclockwise,
    ToggleBackground,
}

/// Step sizes the bindings resolve to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputBindings {
    pub zoom_step: ZoomStep,
    pub fast_zoom_step: ZoomStep,
    pub fast_browse_step: i32,
    pub pan_step: f32,
}

impl InputBindings {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            zoom_step: ZoomStep::new(config.zoom_step()),
            fast_zoom_step: ZoomStep::new(config.fast_zoom_step()),
            fast_browse_step: config.fast_browse_step(),
            pan_step: config.pan_step(),
        }
    }

    fn browse(&self, forward: bool, modifiers: Modifiers) -> InputAction {
        let stride = if modifiers.shift() {
            self.fast_browse_step
        } else {
            1
        };
        InputAction::Browse(if forward { stride } else { -stride })
    }

    fn zoom(&self, zoom_in: bool, fast: bool, broadcast: bool) -> InputAction {
        let step = if fast {
            self.fast_zoom_step
        } else {
            self.zoom_step
        };
        let request = if zoom_in {
            ZoomRequest::In(step)
        } else {
            ZoomRequest::Out(step)
        };
        InputAction::Zoom { request, broadcast }
    }
}

impl Default for InputBindings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Wheel notches in `delta`; horizontal scrolling counts when there is no
/// vertical component (some platforms turn Shift+wheel into it).
fn scroll_steps(delta: ScrollDelta) -> f32 {
    let (x, y) = match delta {
        ScrollDelta::Lines { x, y } => (x, y),
        ScrollDelta::Pixels { x, y } => (x / 120.0, y / 120.0),
    };
    if y.abs() > f32::EPSILON {
        y
    } else {
        x
    }
}

/// Wheel: browse, Shift browses fast, Ctrl zooms every linked pane and
/// Ctrl+Shift zooms only the pane under the cursor.
#[must_use]
pub fn map_wheel(
    modifiers: Modifiers,
    delta: ScrollDelta,
    bindings: &InputBindings,
) -> Option<InputAction> {
    let steps = scroll_steps(delta);
    if steps.abs() < f32::EPSILON {
        return None;
    }
    let forward = steps > 0.0;

    let action = if modifiers.command() {
        bindings.zoom(forward, false, !modifiers.shift())
    } else {
        // Wheel up shows the previous image.
        bindings.browse(!forward, modifiers)
    };
    Some(action)
}

#[must_use]
pub fn map_key(
    key: &Key,
    modifiers: Modifiers,
    bindings: &InputBindings,
) -> Option<InputAction> {
    let pan = bindings.pan_step;
    match key {
        Key::Named(Named::F9) => Some(InputAction::ToggleBackground),
        Key::Named(Named::Space) => Some(bindings.browse(true, modifiers)),
        Key::Named(Named::Backspace) => Some(bindings.browse(false, modifiers)),
        Key::Named(Named::ArrowRight) if modifiers.command() => {
            Some(InputAction::Scroll(Vector::new(pan, 0.0)))
        }
        Key::Named(Named::ArrowLeft) if modifiers.command() => {
            Some(InputAction::Scroll(Vector::new(-pan, 0.0)))
        }
        Key::Named(Named::ArrowUp) if modifiers.command() => {
            Some(InputAction::Scroll(Vector::new(0.0, -pan)))
        }
        Key::Named(Named::ArrowDown) if modifiers.command() => {
            Some(InputAction::Scroll(Vector::new(0.0, pan)))
        }
        Key::Named(Named::ArrowRight) => Some(bindings.browse(true, modifiers)),
        Key::Named(Named::ArrowLeft) => Some(bindings.browse(false, modifiers)),
        Key::Named(Named::ArrowUp) => Some(bindings.zoom(true, modifiers.shift(), true)),
        Key::Named(Named::ArrowDown) => Some(bindings.zoom(false, modifiers.shift(), true)),
        Key::Character(c) => map_character(c.as_str(), modifiers),
        _ => None,
    }
}

fn map_character(c: &str, modifiers: Modifiers) -> Option<InputAction> {
    if modifiers.alt() {
        return None;
    }
    if c.eq_ignore_ascii_case("r") {
        return Some(if modifiers.command() {
            InputAction::ToggleZoomMode
        } else if modifiers.shift() {
            InputAction::RotateCounterclockwise
        } else {
            InputAction::Zoom {
                request: ZoomRequest::reset(),
                broadcast: true,
            }
        });
    }
    if modifiers.command() {
        return None;
    }
    if c.eq_ignore_ascii_case("c") {
        Some(InputAction::BrowseFolder(1))
    } else if c.eq_ignore_ascii_case("v") {
        Some(InputAction::BrowseFolder(-1))
    } else {
        None
    }
}

/// Key events that the viewer reacts to.
#[must_use]
pub fn map_keyboard_event(
    event: &keyboard::Event,
    bindings: &InputBindings,
) -> Option<InputAction> {
    match event {
        keyboard::Event::KeyPressed { key, modifiers, .. } => map_key(key, *modifiers, bindings),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ui::ZoomFactor;

    fn lines(y: f32) -> ScrollDelta {
        ScrollDelta::Lines { x: 0.0, y }
    }

    fn bindings() -> InputBindings {
        InputBindings::default()
    }

    #[test]
    fn plain_wheel_browses_one_image() {
        let b = bindings();
        assert_eq!(
            map_wheel(Modifiers::empty(), lines(1.0), &b),
            Some(InputAction::Browse(-1))
        );
        assert_eq!(
            map_wheel(Modifiers::empty(), lines(-1.0), &b),
            Some(InputAction::Browse(1))
        );
    }

    #[test]
    fn shift_wheel_browses_fast() {
        let b = bindings();
        assert_eq!(
            map_wheel(Modifiers::SHIFT, lines(-1.0), &b),
            Some(InputAction::Browse(10))
        );
        let horizontal = ScrollDelta::Pixels { x: 120.0, y: 0.0 };
        assert_eq!(
            map_wheel(Modifiers::SHIFT, horizontal, &b),
            Some(InputAction::Browse(-10))
        );
    }

    #[test]
    fn command_wheel_zooms_with_broadcast() {
        let b = bindings();
        let action = map_wheel(Modifiers::COMMAND, lines(1.0), &b);
        assert_eq!(
            action,
            Some(InputAction::Zoom {
                request: ZoomRequest::In(b.zoom_step),
                broadcast: true,
            })
        );
    }

    #[test]
    fn command_shift_wheel_zooms_single_pane() {
        let b = bindings();
        let action = map_wheel(Modifiers::COMMAND | Modifiers::SHIFT, lines(-1.0), &b);
        assert_eq!(
            action,
            Some(InputAction::Zoom {
                request: ZoomRequest::Out(b.zoom_step),
                broadcast: false,
            })
        );
    }

    #[test]
    fn zero_delta_is_ignored() {
        assert!(map_wheel(Modifiers::empty(), lines(0.0), &bindings()).is_none());
    }

    #[test]
    fn arrows_browse_and_zoom() {
        let b = bindings();
        let right = Key::Named(Named::ArrowRight);
        assert_eq!(
            map_key(&right, Modifiers::empty(), &b),
            Some(InputAction::Browse(1))
        );
        assert_eq!(
            map_key(&right, Modifiers::SHIFT, &b),
            Some(InputAction::Browse(10))
        );
        assert_eq!(
            map_key(&Key::Named(Named::Backspace), Modifiers::empty(), &b),
            Some(InputAction::Browse(-1))
        );

        let up = Key::Named(Named::ArrowUp);
        match map_key(&up, Modifiers::SHIFT, &b) {
            Some(InputAction::Zoom {
                request: ZoomRequest::In(step),
                ..
            }) => assert_eq!(step, b.fast_zoom_step),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn command_arrows_scroll() {
        let b = bindings();
        assert_eq!(
            map_key(&Key::Named(Named::ArrowDown), Modifiers::COMMAND, &b),
            Some(InputAction::Scroll(Vector::new(0.0, b.pan_step)))
        );
    }

    #[test]
    fn letter_bindings() {
        let b = bindings();
        let r = Key::Character("r".into());
        assert_eq!(
            map_key(&r, Modifiers::empty(), &b),
            Some(InputAction::Zoom {
                request: ZoomRequest::Set(ZoomFactor::ONE),
                broadcast: true,
            })
        );
        assert_eq!(
            map_key(&r, Modifiers::COMMAND, &b),
            Some(InputAction::ToggleZoomMode)
        );
        assert_eq!(
            map_key(&Key::Character("R".into()), Modifiers::SHIFT, &b),
            Some(InputAction::RotateCounterclockwise)
        );
        assert_eq!(
            map_key(&Key::Character("c".into()), Modifiers::empty(), &b),
            Some(InputAction::BrowseFolder(1))
        );
        assert_eq!(
            map_key(&Key::Character("v".into()), Modifiers::empty(), &b),
            Some(InputAction::BrowseFolder(-1))
        );
        assert_eq!(
            map_key(&Key::Named(Named::F9), Modifiers::empty(), &b),
            Some(InputAction::ToggleBackground)
        );
        assert!(map_key(&Key::Character("x".into()), Modifiers::empty(), &b).is_none());
    }
}
