// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the panes, the info
//! panel and persisted preferences.
//!
//! The `App` owns a [`Session`] and translates messages into session calls,
//! image-loading tasks and persistence. Decisions about what each pane shows
//! live in the session; this module only schedules work and keeps the text
//! fields of the control bar.

mod message;
pub mod paths;
pub mod persisted_state;
mod persistence;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::config::{self, Config};
use crate::domain::ui::PaneId;
use crate::session::Session;
use iced::keyboard::Modifiers;
use iced::{window, Element, Size, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;

pub const WINDOW_DEFAULT_WIDTH: f32 = 1024.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 720.0;
pub const MIN_WINDOW_WIDTH: f32 = 480.0;
pub const MIN_WINDOW_HEIGHT: f32 = 360.0;

/// Text typed into the control bar, applied on submit.
#[derive(Debug, Clone, Default)]
pub(crate) struct Inputs {
    pub path: String,
    pub goto: String,
    pub include: String,
    pub exclude: String,
    pub target_width: String,
}

/// Root iced application state.
pub struct App {
    session: Session,
    config: Config,
    app_state: persisted_state::AppState,
    inputs: Inputs,
    modifiers: Modifiers,
    /// Pane last touched by the pointer; keyboard actions target it.
    focused_pane: PaneId,
    show_fingerprint: bool,
    /// Last warning or error shown under the control bar.
    status: Option<String>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("session", &self.session)
            .field("inputs", &self.inputs)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

fn window_settings() -> window::Settings {
    window::Settings {
        size: Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        min_size: Some(Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    paths::init_cli_overrides(flags.data_dir.clone(), flags.config_dir.clone());

    // iced calls boot exactly once; the RefCell lets the closure stay `Fn`.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Loads preferences and history, then opens the CLI path (or the most
    /// recent one) in the background.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        let (app_state, state_warning) = persisted_state::AppState::load();

        let mut app = App {
            session: Session::with_filesystem(&config),
            config,
            app_state,
            inputs: Inputs::default(),
            modifiers: Modifiers::default(),
            focused_pane: PaneId::FIRST,
            show_fingerprint: false,
            status: config_warning.or(state_warning),
        };

        let start = flags
            .file_path
            .map(PathBuf::from)
            .or_else(|| app.app_state.last_opened().map(PathBuf::from));

        let task = match start {
            Some(path) => {
                app.inputs.path = path.display().to_string();
                app.open(path)
            }
            None => Task::none(),
        };
        (app, task)
    }

    fn title(&self) -> String {
        let app_name = "Handy Lens";
        match self.session.current_path().and_then(|p| p.file_name()) {
            Some(name) => format!("{} - {app_name}", name.to_string_lossy()),
            None => app_name.to_string(),
        }
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }

    fn subscription(&self) -> Subscription<Message> {
        subscription::create_event_subscription()
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        update::handle(self, message)
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(self)
    }
}
