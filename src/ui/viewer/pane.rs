// SPDX-License-Identifier: MPL-2.0
//! Canvas program for one pane: background, image and selection overlay.
//!
//! The canvas draws whatever its [`ViewportTransform`] says and reports raw
//! pointer input in pane-local coordinates. It keeps no zoom or pan state of
//! its own.

use super::{PaneEvent, PaneMessage};
use crate::config::BackgroundTheme;
use crate::domain::ui::PaneId;
use crate::ui::state::ViewportTransform;
use iced::widget::canvas::{self, Frame, Path, Stroke};
use iced::widget::image::FilterMethod;
use iced::widget::Action;
use iced::{mouse, Color, Event, Point, Radians, Rectangle, Renderer, Size, Theme};

const WHITE_BACKGROUND: Color = Color::WHITE;
const GRAY_BACKGROUND: Color = Color::from_rgb(0.85, 0.85, 0.85);
const SELECTION_COLOR: Color = Color::from_rgb(0.9, 0.1, 0.1);
const SELECTION_WIDTH: f32 = 1.5;

#[must_use]
pub fn background_color(theme: BackgroundTheme) -> Color {
    match theme {
        BackgroundTheme::White => WHITE_BACKGROUND,
        BackgroundTheme::Gray => GRAY_BACKGROUND,
    }
}

/// Canvas program used to draw and interact with one pane.
pub struct PaneCanvas<'a> {
    pub pane: PaneId,
    pub view: &'a ViewportTransform,
    /// Selection corners in original-image coordinates.
    pub selection: Option<(Point, Point)>,
    pub background: BackgroundTheme,
}

/// Widget-tree state kept by iced between frames.
#[derive(Debug, Default)]
pub struct PaneCanvasState {
    size: Option<Size>,
    hovered: bool,
}

impl PaneCanvas<'_> {
    fn publish(&self, event: PaneEvent) -> Action<PaneMessage> {
        Action::publish(PaneMessage {
            pane: self.pane,
            event,
        })
    }
}

impl canvas::Program<PaneMessage> for PaneCanvas<'_> {
    type State = PaneCanvasState;

    fn update(
        &self,
        state: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Action<PaneMessage>> {
        // Any event may be the first one after a layout change.
        let size = bounds.size();
        if state.size != Some(size) {
            state.size = Some(size);
            return Some(self.publish(PaneEvent::Resized(size)));
        }

        let Event::Mouse(mouse_event) = event else {
            return None;
        };
        let position = cursor.position_in(bounds);

        match mouse_event {
            mouse::Event::CursorMoved { .. } => match position {
                Some(position) => {
                    state.hovered = true;
                    Some(self.publish(PaneEvent::Moved(position)))
                }
                None if state.hovered => {
                    state.hovered = false;
                    Some(self.publish(PaneEvent::Left))
                }
                None => None,
            },
            mouse::Event::CursorLeft if state.hovered => {
                state.hovered = false;
                Some(self.publish(PaneEvent::Left))
            }
            mouse::Event::ButtonPressed(mouse::Button::Left) => {
                position.map(|p| self.publish(PaneEvent::Pressed(p)).and_capture())
            }
            mouse::Event::ButtonReleased(mouse::Button::Left) => {
                Some(self.publish(PaneEvent::Released))
            }
            mouse::Event::WheelScrolled { delta } => position.map(|p| {
                self.publish(PaneEvent::Wheel {
                    delta: *delta,
                    position: p,
                })
                .and_capture()
            }),
            _ => None,
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            background_color(self.background),
        );

        if let (Some(image), Some(target)) = (self.view.display_image(), self.view.image_bounds())
        {
            // A precise buffer is already at screen resolution.
            let filter = if self.view.counts_zoom() {
                FilterMethod::Linear
            } else {
                FilterMethod::Nearest
            };
            frame.draw_image(
                target,
                canvas::Image::new(image.handle.clone())
                    .filter_method(filter)
                    .rotation(Radians(self.view.rotation().radians())),
            );
        }

        if let Some((a, b)) = self.selection {
            let rect = self.view.screen_rect(a, b);
            frame.stroke(
                &Path::rectangle(rect.position(), rect.size()),
                Stroke::default()
                    .with_width(SELECTION_WIDTH)
                    .with_color(SELECTION_COLOR),
            );
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if cursor.is_over(bounds) && self.view.image().is_some() {
            mouse::Interaction::Crosshair
        } else {
            mouse::Interaction::default()
        }
    }
}

const _: () = {
    assert!(SELECTION_WIDTH > 0.0);
};
