mod layout;
mod messages;
mod observer;
mod state;
mod update;
mod view;

pub use state::App;

use crate::config::AppConfig;
use iced::{Size, Theme, window};
use tutorial_core::Lesson;

/// Launch the viewer on `lessons`, optionally opening a specific tutorial.
pub fn run_app(
    config: AppConfig,
    lessons: Vec<Lesson>,
    initial_tutorial: Option<u32>,
) -> iced::Result {
    let window_settings = window::Settings {
        size: Size::new(config.window_width, config.window_height),
        exit_on_close_request: false,
        ..window::Settings::default()
    };

    iced::application("Tutorial Viewer", App::update, App::view)
        .window(window_settings)
        .subscription(App::subscription)
        .theme(|app: &App| Theme::from(crate::theme::Theme::from(app.config.theme)))
        .run_with(move || App::bootstrap(config, lessons, initial_tutorial))
}
