// SPDX-License-Identifier: MPL-2.0
//! Side panel listing image info, cursor readout and selection bounds.

use crate::session::Session;
use iced::widget::{text, Column};
use iced::{Color, Element, Length};

const PANEL_WIDTH: f32 = 220.0;
const SPACING: f32 = 10.0;
const TEXT_SIZE: f32 = 13.0;
const WARNING_COLOR: Color = Color::from_rgb(0.8, 0.1, 0.1);

/// Snapshot of every string the panel shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfoLines {
    pub counter: String,
    pub zoom: String,
    pub image: Option<String>,
    pub cursor: Option<String>,
    pub color: Option<String>,
    pub selection: Option<String>,
    /// Selection reaches outside the image.
    pub selection_outside: bool,
    pub comparison: Option<String>,
    pub fingerprint: Option<String>,
}

impl InfoLines {
    #[must_use]
    pub fn from_session(session: &Session) -> Self {
        let probe = session.cursor_probe();
        let selection = session.selection_label();
        Self {
            counter: session.counter_label(),
            zoom: session.zoom_label(),
            image: session.info_label(),
            cursor: probe.map(|p| p.position_label()),
            color: probe.map(|p| p.color_label()),
            selection_outside: selection.is_some() && !session.selection_in_bounds(),
            selection,
            comparison: session.comparison_label(),
            fingerprint: session.fingerprint_label().map(String::from),
        }
    }

    /// Blocks in display order.
    #[must_use]
    pub fn blocks(&self) -> Vec<&str> {
        let mut blocks = vec![self.counter.as_str(), self.zoom.as_str()];
        blocks.extend(
            [
                &self.comparison,
                &self.image,
                &self.cursor,
                &self.color,
                &self.selection,
                &self.fingerprint,
            ]
            .into_iter()
            .filter_map(|block| block.as_deref()),
        );
        blocks
    }
}

pub fn view<'a, Message: 'a>(lines: &InfoLines) -> Element<'a, Message> {
    let mut column = Column::new().spacing(SPACING).width(Length::Fixed(PANEL_WIDTH));
    for block in lines.blocks() {
        column = column.push(text(block.to_string()).size(TEXT_SIZE));
    }
    if lines.selection_outside {
        column = column.push(
            text("Selection is outside the image")
                .size(TEXT_SIZE)
                .color(WARNING_COLOR),
        );
    }
    column.into()
}
