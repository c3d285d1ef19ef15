// SPDX-License-Identifier: MPL-2.0
//! Message handling for the application.
//!
//! Navigation follows a request / load / commit cycle: the session computes
//! a [`NavigationRequest`], decoding runs on the blocking pool, and the
//! result comes back as [`Message::ImagesLoaded`] to be committed.

use super::{persistence, App, Message};
use crate::application::port::ImageLoader;
use crate::domain::ui::PaneId;
use crate::error::Error;
use crate::session::NavigationRequest;
use crate::ui::input::{map_keyboard_event, InputAction};
use crate::ui::viewer::{PaneEvent, PaneMessage};
use iced::Task;
use std::path::PathBuf;
use std::sync::Arc;

/// Routes a top-level message.
pub(super) fn handle(app: &mut App, message: Message) -> Task<Message> {
    match message {
        Message::Pane(pane_message) => handle_pane_message(app, pane_message),
        Message::Keyboard(event) => {
            let Some(action) = map_keyboard_event(&event, app.session.bindings()) else {
                return Task::none();
            };
            apply_action(app, action)
        }
        Message::ModifiersChanged(modifiers) => {
            app.modifiers = modifiers;
            Task::none()
        }
        Message::ImagesLoaded(Ok(loaded)) => {
            if app.session.commit(loaded) {
                app.inputs.goto.clear();
            }
            Task::none()
        }
        Message::ImagesLoaded(Err(error)) => {
            app.status = Some(app.session.navigation_failed(&error));
            Task::none()
        }
        Message::FileDropped(path) => {
            app.inputs.path = path.display().to_string();
            app.open(path)
        }

        Message::PathInputChanged(text) => {
            app.inputs.path = text;
            Task::none()
        }
        Message::OpenPath => match typed_path(&app.inputs.path) {
            Some(path) => app.open(path),
            None => Task::none(),
        },
        Message::OpenRecent(path) => {
            app.inputs.path = path.display().to_string();
            app.open(path)
        }
        Message::AddComparisonFolder => {
            let Some(path) = typed_path(&app.inputs.path) else {
                return Task::none();
            };
            match app.session.add_comparison_folder(&path) {
                Ok(report) => {
                    app.status = report.warning();
                    app.reload_current()
                }
                Err(error) => {
                    app.status = Some(error.to_string());
                    Task::none()
                }
            }
        }
        Message::ClearComparisons => {
            app.session.clear_comparisons();
            app.status = None;
            app.reload_current()
        }

        Message::GotoInputChanged(text) => {
            app.inputs.goto = text;
            Task::none()
        }
        Message::GotoSubmitted => match app.session.request_goto(&app.inputs.goto) {
            Some(request) => app.navigate(request),
            None => {
                log::debug!("ignoring goto input {:?}", app.inputs.goto);
                Task::none()
            }
        },

        Message::IncludeInputChanged(text) => {
            app.inputs.include = text;
            Task::none()
        }
        Message::ExcludeInputChanged(text) => {
            app.inputs.exclude = text;
            Task::none()
        }
        Message::ApplyInclude => {
            let names = split_names(&app.inputs.include);
            let result = app.session.set_include_names(names);
            app.after_filter(result)
        }
        Message::ApplyExclude => {
            let names = split_names(&app.inputs.exclude);
            let result = app.session.set_exclude_names(names);
            app.after_filter(result)
        }
        Message::Refresh => match app.session.request_refresh() {
            Ok(request) => app.navigate(request),
            Err(error) => {
                app.status = Some(error.to_string());
                Task::none()
            }
        },

        Message::SetInterval(columns) => {
            if app.session.set_interval_columns(columns) {
                app.reload_current()
            } else {
                app.status = Some("Interval mode needs a single folder".to_string());
                Task::none()
            }
        }

        Message::TargetWidthInputChanged(text) => {
            app.inputs.target_width = text;
            Task::none()
        }
        Message::SetTargetWidth => {
            let text = app.inputs.target_width.trim();
            let width = if text.is_empty() {
                Some(0.0)
            } else {
                text.parse::<f32>().ok()
            };
            match width {
                Some(width) => {
                    app.session.set_target_width(width);
                    app.reload_current()
                }
                None => {
                    app.status = Some(format!("Not a width: {text}"));
                    Task::none()
                }
            }
        }
        Message::CaptureTargetWidth => {
            if let Some(target) = app.session.capture_target_width() {
                app.inputs.target_width = format!("{:.0}", target.screen_width());
            }
            Task::none()
        }

        Message::ToggleZoomMode => apply_action(app, InputAction::ToggleZoomMode),
        Message::Rotate => apply_action(app, InputAction::RotateCounterclockwise),
        Message::ToggleBackground => apply_action(app, InputAction::ToggleBackground),
        Message::ToggleFingerprint(show) => {
            app.show_fingerprint = show;
            app.session.set_show_fingerprint(show);
            Task::none()
        }
        Message::ClearSelection => {
            app.session.clear_selection();
            Task::none()
        }
    }
}

fn handle_pane_message(app: &mut App, message: PaneMessage) -> Task<Message> {
    let PaneMessage { pane, event } = message;
    match event {
        PaneEvent::Pressed(position) => {
            app.focused_pane = pane;
            app.session.pointer_pressed(pane, position, app.modifiers);
        }
        PaneEvent::Moved(position) => {
            app.focused_pane = pane;
            app.session.pointer_moved(pane, position);
        }
        PaneEvent::Released => app.session.pointer_released(),
        PaneEvent::Left => app.session.pointer_left(pane),
        PaneEvent::Wheel { delta, position } => {
            app.focused_pane = pane;
            if let Some(request) =
                app.session
                    .handle_wheel(pane, app.modifiers, delta, Some(position))
            {
                return app.navigate(request);
            }
        }
        PaneEvent::Resized(size) => {
            app.session.resize_pane(pane, size);
        }
    }
    Task::none()
}

fn apply_action(app: &mut App, action: InputAction) -> Task<Message> {
    let pane = focused(app);
    let request = app.session.apply_action(pane, action);
    if action == InputAction::ToggleBackground {
        persistence::persist_background(&mut app.config, app.session.background());
    }
    match request {
        Some(request) => app.navigate(request),
        None => Task::none(),
    }
}

/// The pane last touched by the pointer, if it still exists.
fn focused(app: &App) -> PaneId {
    if app.focused_pane.index() < app.session.pane_count() {
        app.focused_pane
    } else {
        PaneId::FIRST
    }
}

fn typed_path(text: &str) -> Option<PathBuf> {
    let text = text.trim();
    (!text.is_empty()).then(|| PathBuf::from(text))
}

/// Comma-separated names; blank input clears the filter.
fn split_names(text: &str) -> Option<Vec<String>> {
    let names: Vec<String> = text
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect();
    (!names.is_empty()).then_some(names)
}

/// Decodes the request off the UI thread; cached requests commit at once.
fn load(request: NavigationRequest, loader: Arc<dyn ImageLoader>) -> Task<Message> {
    if request.is_ready() {
        return Task::done(Message::ImagesLoaded(request.resolve(loader.as_ref())));
    }
    Task::perform(
        async move {
            match tokio::task::spawn_blocking(move || request.resolve(loader.as_ref())).await {
                Ok(result) => result,
                Err(join) => Err(Error::Io(join.to_string())),
            }
        },
        Message::ImagesLoaded,
    )
}

impl App {
    /// Lists the folder of `path` and loads its first images.
    pub(super) fn open(&mut self, path: PathBuf) -> Task<Message> {
        match self.session.request_open(&path) {
            Ok(request) => {
                self.status = None;
                persistence::record_recent(&mut self.app_state, &path);
                self.navigate(request)
            }
            Err(error) => {
                log::warn!("cannot open {}: {error}", path.display());
                self.status = Some(error.to_string());
                Task::none()
            }
        }
    }

    fn navigate(&self, request: NavigationRequest) -> Task<Message> {
        load(request, self.session.loader())
    }

    fn reload_current(&mut self) -> Task<Message> {
        let request = self.session.request_current();
        self.navigate(request)
    }

    fn after_filter(&mut self, result: crate::error::Result<()>) -> Task<Message> {
        match result {
            Ok(()) => {
                self.status = None;
                self.reload_current()
            }
            Err(error) => {
                self.status = Some(error.to_string());
                Task::none()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_names_trims_and_drops_blanks() {
        assert_eq!(
            split_names(" cat, ,dog "),
            Some(vec!["cat".to_string(), "dog".to_string()])
        );
        assert_eq!(split_names("  ,  "), None);
        assert_eq!(split_names(""), None);
    }

    #[test]
    fn typed_path_ignores_blank_input() {
        assert!(typed_path("   ").is_none());
        assert_eq!(typed_path(" /pics "), Some(PathBuf::from("/pics")));
    }
}
