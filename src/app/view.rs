// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! Three control rows sit above the pane grid; the info panel runs down the
//! right-hand side.

use super::{App, Message};
use crate::session::ViewMode;
use crate::ui::state::ZoomMode;
use crate::ui::viewer::{info_panel, PaneCanvas};
use iced::widget::{button, canvas, pick_list, text, text_input, toggler, Column, Row};
use iced::{Alignment, Color, Element, Length};
use std::fmt;
use std::path::PathBuf;

const SPACING: f32 = 6.0;
const PADDING: f32 = 8.0;
const CONTROL_TEXT: f32 = 13.0;
const INPUT_WIDTH: f32 = 140.0;
const STATUS_COLOR: Color = Color::from_rgb(0.7, 0.35, 0.0);

/// Entry of the recent-history picker, shown by file name.
#[derive(Debug, Clone, PartialEq)]
struct RecentPath(PathBuf);

impl fmt::Display for RecentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.file_name() {
            Some(name) => write!(f, "{}", name.to_string_lossy()),
            None => write!(f, "{}", self.0.display()),
        }
    }
}

/// Renders the whole window.
pub(super) fn view(app: &App) -> Element<'_, Message> {
    let info = info_panel::view(&info_panel::InfoLines::from_session(&app.session));

    let body = Row::new()
        .spacing(SPACING)
        .height(Length::Fill)
        .push(view_panes(app))
        .push(info);

    let mut layout = Column::new()
        .spacing(SPACING)
        .padding(PADDING)
        .push(open_row(app))
        .push(browse_row(app))
        .push(display_row(app));
    if let Some(status) = &app.status {
        layout = layout.push(text(status.clone()).size(CONTROL_TEXT).color(STATUS_COLOR));
    }
    layout.push(body).into()
}

fn small_button(label: &str, message: Message) -> Element<'_, Message> {
    button(text(label).size(CONTROL_TEXT))
        .on_press(message)
        .into()
}

fn open_row(app: &App) -> Element<'_, Message> {
    let path_input = text_input("Image or folder path", &app.inputs.path)
        .on_input(Message::PathInputChanged)
        .on_submit(Message::OpenPath)
        .size(CONTROL_TEXT)
        .width(Length::Fill);

    let recent: Vec<RecentPath> = app
        .app_state
        .recent_paths
        .iter()
        .cloned()
        .map(RecentPath)
        .collect();
    let recent_picker = pick_list(recent, None::<RecentPath>, |entry| {
        Message::OpenRecent(entry.0)
    })
    .placeholder("Recent")
    .text_size(CONTROL_TEXT);

    let mut row = Row::new()
        .spacing(SPACING)
        .align_y(Alignment::Center)
        .push(path_input)
        .push(small_button("Open", Message::OpenPath))
        .push(small_button("Add folder", Message::AddComparisonFolder));
    if app.session.browse().folder_count() > 1 {
        row = row.push(small_button("Stop comparing", Message::ClearComparisons));
    }
    row.push(recent_picker).into()
}

fn browse_row(app: &App) -> Element<'_, Message> {
    let goto = text_input("Index", &app.inputs.goto)
        .on_input(Message::GotoInputChanged)
        .on_submit(Message::GotoSubmitted)
        .size(CONTROL_TEXT)
        .width(Length::Fixed(INPUT_WIDTH / 2.0));
    let include = text_input("Include names", &app.inputs.include)
        .on_input(Message::IncludeInputChanged)
        .on_submit(Message::ApplyInclude)
        .size(CONTROL_TEXT)
        .width(Length::Fixed(INPUT_WIDTH));
    let exclude = text_input("Exclude names", &app.inputs.exclude)
        .on_input(Message::ExcludeInputChanged)
        .on_submit(Message::ApplyExclude)
        .size(CONTROL_TEXT)
        .width(Length::Fixed(INPUT_WIDTH));

    Row::new()
        .spacing(SPACING)
        .align_y(Alignment::Center)
        .push(goto)
        .push(small_button("Go", Message::GotoSubmitted))
        .push(include)
        .push(small_button("Include", Message::ApplyInclude))
        .push(exclude)
        .push(small_button("Exclude", Message::ApplyExclude))
        .push(small_button("Refresh", Message::Refresh))
        .into()
}

fn display_row(app: &App) -> Element<'_, Message> {
    let session = &app.session;
    let mode_label = match session
        .coordinator()
        .pane(app.focused_pane)
        .map(|pane| pane.mode())
    {
        Some(ZoomMode::Precise) => "Precise zoom",
        _ => "Fast zoom",
    };

    let mut row = Row::new().spacing(SPACING).align_y(Alignment::Center);
    if session.browse().folder_count() <= 1 {
        let current = match session.view_mode() {
            ViewMode::Interval { columns } => columns,
            _ => 1,
        };
        for columns in 1..=crate::config::MAX_PANES {
            let label = if columns == current {
                format!("[{columns}]")
            } else {
                columns.to_string()
            };
            let target = (columns > 1).then_some(columns);
            row = row.push(
                button(text(label).size(CONTROL_TEXT)).on_press(Message::SetInterval(target)),
            );
        }
    }

    let width_input = text_input("Target width", &app.inputs.target_width)
        .on_input(Message::TargetWidthInputChanged)
        .on_submit(Message::SetTargetWidth)
        .size(CONTROL_TEXT)
        .width(Length::Fixed(INPUT_WIDTH / 1.5));

    row.push(width_input)
        .push(small_button("Set width", Message::SetTargetWidth))
        .push(small_button("Capture width", Message::CaptureTargetWidth))
        .push(small_button(mode_label, Message::ToggleZoomMode))
        .push(small_button("Rotate", Message::Rotate))
        .push(small_button("Background", Message::ToggleBackground))
        .push(small_button("Clear selection", Message::ClearSelection))
        .push(text("Fingerprint").size(CONTROL_TEXT))
        .push(toggler(app.show_fingerprint).on_toggle(Message::ToggleFingerprint))
        .into()
}

/// Panes in rows of `layout.columns()`.
fn view_panes(app: &App) -> Element<'_, Message> {
    let coordinator = app.session.coordinator();
    let columns = coordinator.layout().columns().max(1);
    let selection = app.session.selection().corners();
    let background = app.session.background();

    let mut grid = Column::new()
        .spacing(SPACING)
        .width(Length::Fill)
        .height(Length::Fill);
    let mut row = Row::new().spacing(SPACING).height(Length::Fill);
    let mut in_row = 0;

    for (id, view) in coordinator.pane_ids().zip(coordinator.panes()) {
        let pane: Element<'_, Message> = Element::from(
            canvas(PaneCanvas {
                pane: id,
                view,
                selection,
                background,
            })
            .width(Length::Fill)
            .height(Length::Fill),
        )
        .map(Message::Pane);
        row = row.push(pane);
        in_row += 1;
        if in_row == columns {
            grid = grid.push(row);
            row = Row::new().spacing(SPACING).height(Length::Fill);
            in_row = 0;
        }
    }
    if in_row > 0 {
        grid = grid.push(row);
    }
    grid.into()
}
