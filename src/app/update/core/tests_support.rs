use super::super::super::messages::Message;
use super::super::super::state::App;
use crate::config::AppConfig;
use iced::widget::scrollable::RelativeOffset;
use tutorial_core::{Lesson, parse_lesson};

const GETTING_STARTED: &str = r#"
tutorial = 1

[[outline]]
id = "install"
short = "Install"

[[outline]]
id = "first-run"
short = "First run"

[[outline]]
id = "next-steps"
short = "Next steps"

[[sections]]
id = "install"
heading = "Install the CLI"

[[sections.blocks]]
type = "paragraph"
text = "Install the command line tool globally, then confirm the version it reports matches the one in the release notes before continuing."

[[sections.blocks]]
type = "track_code"
show_indicator = true
show_inline_switcher = true
variants = [
  { track = "nextjs", code = "npx create-next-app@latest demo\ncd demo\nnpm run dev", filename = "terminal" },
  { track = "fastapi", code = "python -m venv .venv\npip install fastapi uvicorn\nuvicorn main:app --reload", filename = "terminal" },
]

[[sections]]
id = "first-run"
heading = "Your first session"

[[sections.blocks]]
type = "paragraph"
text = "Open a session in the project root. Ask for a summary of the repository layout and compare it with what you already know about the code."

[[sections.blocks]]
type = "accordion"
title = "What happens on start"

[[sections.blocks.blocks]]
type = "paragraph"
text = "The tool reads project instructions and indexes the files it is allowed to see."

[[sections.blocks]]
type = "callout"
kind = "tip"
text = "Keep the first session short and read every proposed change before accepting it."

[[sections]]
id = "next-steps"
heading = "Next steps"

[[sections.blocks]]
type = "bullets"
items = [
  "Write a project instructions file.",
  "Try a small refactor on a throwaway branch.",
  "Review the diff before committing anything.",
]

[[sections.blocks]]
type = "track_only"
tracks = ["fastapi"]
text = "Python readers: keep the virtual environment activated in every terminal."
"#;

const DEFINE_PLAN_ITERATE: &str = r#"
tutorial = 4

[[outline]]
id = "define"
short = "Define"

[[outline]]
id = "plan"
short = "Plan"

[[sections]]
id = "define"
heading = "Define the outcome"

[[sections.blocks]]
type = "paragraph"
text = "State what done looks like before asking for any code."

[[sections]]
id = "plan"
heading = "Plan the change"

[[sections.blocks]]
type = "tabs"

[[sections.blocks.tabs]]
label = "Small change"

[[sections.blocks.tabs.blocks]]
type = "paragraph"
text = "One file, one commit."

[[sections.blocks.tabs]]
label = "Large change"

[[sections.blocks.tabs.blocks]]
type = "paragraph"
text = "Split the plan into reviewable steps and commit after each one."
"#;

pub(in crate::app) fn test_lessons() -> Vec<Lesson> {
    vec![
        parse_lesson(GETTING_STARTED).expect("tutorial 1 fixture"),
        parse_lesson(DEFINE_PLAN_ITERATE).expect("tutorial 4 fixture"),
    ]
}

pub(in crate::app) fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.persist_track = false;
    config.show_sidebar = false;
    config.window_width = 1000.0;
    config.window_height = 800.0;
    config.font_size = 16;
    config.cache_dir = std::env::temp_dir()
        .join(format!("tutorial-viewer-app-test-{}", std::process::id()))
        .to_string_lossy()
        .into_owned();
    config
}

pub(in crate::app) fn build_test_app(initial: Option<u32>) -> App {
    let (app, _task) = App::bootstrap(test_config(), test_lessons(), initial);
    app
}

/// A scroll report for an 800x600 viewport over 3000px of content.
pub(in crate::app) fn scroll_message(offset_y: f32) -> Message {
    Message::Scrolled {
        offset: RelativeOffset { x: 0.0, y: offset_y },
        viewport_width: 800.0,
        viewport_height: 600.0,
        content_height: 3000.0,
    }
}
