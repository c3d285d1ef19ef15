// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Pointer and wheel events reach the panes through their canvases; this
//! subscription only forwards what the panes cannot see: uncaptured key
//! presses, modifier changes and dropped files.

use super::Message;
use iced::{event, keyboard, window, Event, Subscription};

pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, _window_id| match event {
        Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
        Event::Keyboard(keyboard::Event::ModifiersChanged(modifiers)) => {
            Some(Message::ModifiersChanged(modifiers))
        }
        Event::Keyboard(key_event @ keyboard::Event::KeyPressed { .. }) => match status {
            // Text inputs capture the keys typed into them.
            event::Status::Ignored => Some(Message::Keyboard(key_event)),
            event::Status::Captured => None,
        },
        _ => None,
    })
}
