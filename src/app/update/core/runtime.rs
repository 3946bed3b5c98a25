use super::super::super::messages::{Message, SectionMeasurement};
use super::super::super::state::{App, LESSON_FRAME_ID, LESSON_SCROLL_ID, section_container_id};
use super::super::Effect;
use crate::config::save_override;
use iced::Event;
use iced::Task;
use iced::event;
use iced::keyboard;
use iced::widget::container;
use iced::window;
use tracing::{info, warn};

impl App {
    pub(super) fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::SaveConfig => {
                self.save_config_override();
                Task::none()
            }
            Effect::ScrollTo(offset) => {
                self.viewport.last_offset = offset;
                iced::widget::scrollable::snap_to(LESSON_SCROLL_ID.clone(), offset)
            }
            Effect::CopyToClipboard(code) => iced::clipboard::write(code),
            Effect::MeasureSections { ids, scroll_px } => {
                container::visible_bounds(LESSON_FRAME_ID.clone()).then(move |frame| {
                    Task::batch(ids.iter().map(|id| {
                        let id = id.clone();
                        container::visible_bounds(section_container_id(&id)).map(move |bounds| {
                            Message::SectionMeasured(SectionMeasurement {
                                id: id.clone(),
                                frame,
                                bounds,
                                scroll_px,
                            })
                        })
                    }))
                })
            }
            Effect::Quit => {
                self.save_config_override();
                info!("Quitting");
                iced::exit()
            }
        }
    }

    fn save_config_override(&self) {
        if let Err(err) = save_override(&self.config.cache_path(), &self.config) {
            warn!("Failed to save config override: {err:#}");
        }
    }
}

pub(super) fn runtime_event_to_message(
    event: Event,
    status: event::Status,
    _window_id: window::Id,
) -> Option<Message> {
    if status == event::Status::Captured {
        return None;
    }
    match event {
        Event::Window(iced::window::Event::Resized(size)) => Some(Message::WindowResized {
            width: size.width,
            height: size.height,
        }),
        Event::Window(iced::window::Event::CloseRequested) => Some(Message::Quit),
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            Some(Message::KeyPressed { key, modifiers })
        }
        _ => None,
    }
}
