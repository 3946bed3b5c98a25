use super::layout::{TrackCodeHeader, track_code_header};
use super::messages::Message;
use super::state::{
    App, BLOCK_SPACING_PX, BULLET_INDENT_PX, BULLET_SPACING_PX, CALLOUT_PADDING_PX,
    CODE_FONT_SCALE, CODE_HEADER_PX, CODE_LINE_HEIGHT, CODE_PADDING_PX, CONTROL_ROW_PX,
    HEADING_SCALE, LESSON_FRAME_ID, LESSON_SCROLL_ID, LINE_HEIGHT, NESTED_INDENT_PX,
    PAGE_PADDING_PX, PageSession, SECTION_SPACING_PX, SELECTOR_FULL_PX, SIDEBAR_WIDTH_PX,
    TITLE_SCALE, section_container_id,
};
use crate::config::ThemeMode;
use crate::theme::{callout_color, level_color, tint, track_color};
use iced::alignment::Vertical;
use iced::widget::text::{LineHeight, Wrapping};
use iced::widget::{
    Column, Row, button, column, container, horizontal_space, row, scrollable, text,
};
use iced::{Background, Border, Color, Element, Font, Length, Padding, Theme};
use tutorial_core::{
    Block, CalloutKind, CodeSample, Lesson, TUTORIAL_COUNT, TabPanel, Track, TrackContent,
    TutorialLevel, resolve, tutorials_in_level,
};

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let top_bar = self.top_bar();

        let Some((lesson, page)) = self.current_lesson().zip(self.page.as_ref()) else {
            return column![
                top_bar,
                container(text("No lessons available.").size(self.font_size()))
                    .padding(PAGE_PADDING_PX)
            ]
            .into();
        };

        let lesson_scroll = scrollable(self.lesson_body(lesson, page))
            .on_scroll(|viewport| Message::Scrolled {
                offset: viewport.relative_offset(),
                viewport_width: viewport.bounds().width,
                viewport_height: viewport.bounds().height,
                content_height: viewport.content_bounds().height,
            })
            .id(LESSON_SCROLL_ID.clone())
            .width(Length::Fill)
            .height(Length::Fill);
        let lesson_view = container(lesson_scroll)
            .id(LESSON_FRAME_ID.clone())
            .width(Length::Fill)
            .height(Length::Fill);

        let main = column![self.section_nav(page), lesson_view]
            .spacing(8)
            .width(Length::Fill)
            .height(Length::Fill);

        let mut body: Row<'_, Message> = Row::new().height(Length::Fill);
        if self.config.show_sidebar {
            body = body.push(self.sidebar());
        }
        body = body.push(main);

        column![top_bar, body].spacing(8).height(Length::Fill).into()
    }

    fn font_size(&self) -> f32 {
        self.config.font_size as f32
    }

    fn top_bar(&self) -> Element<'_, Message> {
        let sidebar_toggle = button(if self.config.show_sidebar {
            "Hide Tutorials"
        } else {
            "Tutorials"
        })
        .on_press(Message::ToggleSidebar);
        let theme_label = if matches!(self.config.theme, ThemeMode::Night) {
            "Day Mode"
        } else {
            "Night Mode"
        };
        let title = self
            .current_lesson()
            .map(|lesson| format!("Tutorial {} \u{b7} {}", lesson.tutorial_id, lesson.title))
            .unwrap_or_default();

        row![
            sidebar_toggle,
            text(title).size(self.font_size()),
            horizontal_space(),
            self.track_indicator(self.store.current()),
            self.compact_selector(),
            button(theme_label).on_press(Message::ToggleTheme),
        ]
        .spacing(10)
        .padding([8.0, 12.0])
        .align_y(Vertical::Center)
        .into()
    }

    fn section_nav<'a>(&'a self, page: &'a PageSession) -> Element<'a, Message> {
        let entries = page.tracker.outline().iter().map(|section| {
            let style = if page.tracker.is_active(&section.id) {
                button::primary
            } else {
                button::text
            };
            button(text(section.short_label.as_str()).size(self.font_size() * 0.85))
                .style(style)
                .on_press(Message::JumpToSection(section.id.clone()))
                .into()
        });
        container(Row::with_children(entries).spacing(4).align_y(Vertical::Center))
            .padding([0.0, PAGE_PADDING_PX])
            .into()
    }

    fn sidebar(&self) -> Element<'_, Message> {
        let current = self.current_tutorial_id();
        let mut list: Column<'_, Message> = Column::new().spacing(6).padding(12);

        for level in TutorialLevel::ALL {
            let expanded = self.sidebar.is_expanded(level);
            let marker = if expanded { "\u{25be}" } else { "\u{25b8}" };
            list = list.push(
                button(
                    text(format!("{marker} {} \u{b7} {}", level.label(), level.tag()))
                        .color(level_color(level)),
                )
                .style(button::text)
                .width(Length::Fill)
                .on_press(Message::ToggleLevel(level)),
            );
            if !expanded {
                continue;
            }
            for tutorial in tutorials_in_level(level) {
                let available = self.lesson_index(tutorial.id).is_some();
                let label = if available {
                    format!("{}. {}", tutorial.id, tutorial.title)
                } else {
                    format!("\u{1f512} {}. {}", tutorial.id, tutorial.title)
                };
                let entry = column![
                    text(label).size(self.font_size() * 0.9),
                    text(tutorial.duration).size(self.font_size() * 0.75),
                ]
                .spacing(2);
                let style = if current == Some(tutorial.id) {
                    button::primary
                } else {
                    button::text
                };
                let mut item = button(entry).style(style).width(Length::Fill);
                if available {
                    item = item.on_press(Message::SelectTutorial(tutorial.id));
                }
                list = list.push(item);
            }
        }

        list = list.push(
            text(format!(
                "{} of {} tutorials available",
                self.lessons.len(),
                TUTORIAL_COUNT
            ))
            .size(self.font_size() * 0.8),
        );

        container(scrollable(list).height(Length::Fill))
            .width(Length::Fixed(SIDEBAR_WIDTH_PX))
            .height(Length::Fill)
            .into()
    }

    fn lesson_body<'a>(&'a self, lesson: &'a Lesson, page: &'a PageSession) -> Element<'a, Message> {
        let font = self.font_size();
        let track = self.store.current();

        let mut header: Column<'a, Message> = column![
            text(lesson.title.as_str())
                .size(font * TITLE_SCALE)
                .line_height(LineHeight::Relative(LINE_HEIGHT))
        ]
        .spacing(BLOCK_SPACING_PX);
        if !lesson.subtitle.is_empty() {
            header = header.push(self.paragraph(&lesson.subtitle));
        }

        let mut body: Column<'a, Message> = Column::new()
            .push(header)
            .spacing(SECTION_SPACING_PX)
            .padding(PAGE_PADDING_PX)
            .width(Length::Fill);

        for section in &lesson.sections {
            let mut column: Column<'a, Message> = column![
                text(section.heading.as_str())
                    .size(font * HEADING_SCALE)
                    .line_height(LineHeight::Relative(LINE_HEIGHT))
            ]
            .spacing(BLOCK_SPACING_PX);
            if let Some(blocks) = self.blocks(&section.blocks, page, track) {
                column = column.push(blocks);
            }
            body = body.push(
                container(column)
                    .id(section_container_id(&section.id))
                    .width(Length::Fill),
            );
        }

        body.push(self.lesson_footer()).into()
    }

    fn lesson_footer(&self) -> Element<'_, Message> {
        let neighbor = |step: isize| {
            self.neighbor_tutorial(step)
                .and_then(|id| self.lesson_index(id))
                .map(|idx| &self.lessons[idx])
        };
        let mut footer: Row<'_, Message> = Row::new()
            .height(Length::Fixed(CONTROL_ROW_PX))
            .align_y(Vertical::Center);
        if let Some(previous) = neighbor(-1) {
            footer = footer.push(
                button(text(format!("\u{2190} {}", previous.title)))
                    .style(button::secondary)
                    .on_press(Message::PreviousTutorial),
            );
        }
        footer = footer.push(horizontal_space());
        if let Some(next) = neighbor(1) {
            footer = footer.push(
                button(text(format!("{} \u{2192}", next.title)))
                    .style(button::secondary)
                    .on_press(Message::NextTutorial),
            );
        }
        footer.into()
    }

    /// Rendered blocks, or `None` if none of them render for `track`.
    fn blocks<'a>(
        &'a self,
        blocks: &'a [Block],
        page: &'a PageSession,
        track: Track,
    ) -> Option<Element<'a, Message>> {
        let children: Vec<Element<'a, Message>> = blocks
            .iter()
            .filter_map(|block| self.block(block, page, track))
            .collect();
        if children.is_empty() {
            return None;
        }
        Some(
            Column::with_children(children)
                .spacing(BLOCK_SPACING_PX)
                .width(Length::Fill)
                .into(),
        )
    }

    fn block<'a>(
        &'a self,
        block: &'a Block,
        page: &'a PageSession,
        track: Track,
    ) -> Option<Element<'a, Message>> {
        match block {
            Block::Paragraph(body) => Some(self.paragraph(body)),
            Block::Bullets(items) => {
                if items.is_empty() {
                    return None;
                }
                let rows = items.iter().map(|item| {
                    row![
                        text("\u{2022}")
                            .size(self.font_size())
                            .width(Length::Fixed(BULLET_INDENT_PX)),
                        self.paragraph(item),
                    ]
                    .into()
                });
                Some(Column::with_children(rows).spacing(BULLET_SPACING_PX).into())
            }
            Block::Callout { kind, title, text: body } => {
                Some(self.callout(*kind, title.as_deref(), body))
            }
            Block::Code(sample) => Some(self.code(sample)),
            Block::TrackCode {
                content,
                fallback,
                show_indicator,
                show_inline_switcher,
            } => {
                let sample = resolve(content, track, fallback.as_ref())?;
                Some(self.track_code(
                    content,
                    sample,
                    track,
                    *show_indicator,
                    *show_inline_switcher,
                ))
            }
            Block::TrackOnly { gate, text: body } => {
                gate.visible_for(track).then(|| self.paragraph(body))
            }
            Block::TrackSelector { compact, label } => Some(if *compact {
                self.compact_selector()
            } else {
                self.full_selector(label.as_deref())
            }),
            Block::Accordion {
                widget,
                title,
                blocks,
                ..
            } => {
                let open = page.open_accordions.contains(widget);
                let marker = if open { "\u{25be}" } else { "\u{25b8}" };
                let header = button(
                    row![text(marker), text(title.as_str()).size(self.font_size())]
                        .spacing(8)
                        .align_y(Vertical::Center),
                )
                .style(button::secondary)
                .width(Length::Fill)
                .height(Length::Fixed(CONTROL_ROW_PX))
                .on_press(Message::ToggleAccordion(*widget));

                let mut column: Column<'a, Message> = column![header].spacing(BLOCK_SPACING_PX);
                if open {
                    if let Some(body) = self.blocks(blocks, page, track) {
                        column = column.push(container(body).padding(Padding {
                            top: 0.0,
                            right: 0.0,
                            bottom: 0.0,
                            left: NESTED_INDENT_PX,
                        }));
                    }
                }
                Some(column.into())
            }
            Block::Tabs { widget, tabs } => self.tabs(*widget, tabs, page, track),
        }
    }

    fn paragraph<'a>(&self, body: &'a str) -> Element<'a, Message> {
        text(body)
            .size(self.font_size())
            .line_height(LineHeight::Relative(LINE_HEIGHT))
            .width(Length::Fill)
            .wrapping(Wrapping::WordOrGlyph)
            .into()
    }

    fn callout<'a>(&self, kind: CalloutKind, title: Option<&'a str>, body: &'a str) -> Element<'a, Message> {
        let accent = callout_color(kind);
        let mut column: Column<'a, Message> = Column::new();
        if let Some(title) = title {
            column = column.push(
                text(title)
                    .size(self.font_size())
                    .line_height(LineHeight::Relative(LINE_HEIGHT))
                    .color(accent),
            );
        }
        column = column.push(self.paragraph(body));
        container(column)
            .padding(CALLOUT_PADDING_PX)
            .width(Length::Fill)
            .style(move |_theme: &Theme| container::Style {
                background: Some(Background::Color(tint(accent, 0.12))),
                border: Border {
                    color: accent,
                    width: 1.0,
                    radius: 6.0.into(),
                },
                ..container::Style::default()
            })
            .into()
    }

    fn code<'a>(&self, sample: &'a CodeSample) -> Element<'a, Message> {
        let label = sample
            .filename
            .as_deref()
            .or(sample.lang.as_deref())
            .unwrap_or("bash");
        let copied = self
            .copied
            .as_ref()
            .is_some_and(|notice| notice.code == sample.code);
        let header = row![
            text(label)
                .font(Font::MONOSPACE)
                .size(self.font_size() * 0.75),
            horizontal_space(),
            button(text(if copied { "\u{2713} Copied" } else { "Copy" }).size(self.font_size() * 0.7))
                .style(button::secondary)
                .padding([2.0, 8.0])
                .on_press(Message::CopyCode(sample.code.clone())),
        ]
        .height(Length::Fixed(CODE_HEADER_PX))
        .align_y(Vertical::Center);

        let column: Column<'a, Message> = column![header].push(
            text(sample.code.as_str())
                .font(Font::MONOSPACE)
                .size(self.font_size() * CODE_FONT_SCALE)
                .line_height(LineHeight::Relative(CODE_LINE_HEIGHT))
                .wrapping(Wrapping::None),
        );
        container(column)
            .padding(CODE_PADDING_PX)
            .width(Length::Fill)
            .style(|_theme: &Theme| container::Style {
                background: Some(Background::Color(Color::from_rgb8(0x16, 0x1b, 0x22))),
                text_color: Some(Color::from_rgb8(0xe6, 0xed, 0xf3)),
                border: Border {
                    color: Color::from_rgb8(0x30, 0x36, 0x3d),
                    width: 1.0,
                    radius: 6.0.into(),
                },
                ..container::Style::default()
            })
            .into()
    }

    fn track_code<'a>(
        &'a self,
        content: &'a TrackContent<CodeSample>,
        sample: &'a CodeSample,
        track: Track,
        show_indicator: bool,
        show_inline_switcher: bool,
    ) -> Element<'a, Message> {
        let Some(kind) = track_code_header(content.len(), show_indicator, show_inline_switcher)
        else {
            return self.code(sample);
        };

        let mut header: Row<'a, Message> = Row::new()
            .spacing(6)
            .height(Length::Fixed(CONTROL_ROW_PX))
            .align_y(Vertical::Center);
        if kind == TrackCodeHeader::Indicator {
            header = header.push(self.track_indicator(track));
        } else {
            for available in content.available_tracks() {
                let meta = available.metadata();
                let style = if available == track {
                    button::primary
                } else {
                    button::secondary
                };
                header = header.push(
                    button(text(meta.name).size(self.font_size() * 0.8))
                        .style(style)
                        .on_press(Message::SelectTrack(available)),
                );
            }
        }
        column![header, self.code(sample)].into()
    }

    fn track_indicator(&self, track: Track) -> Element<'_, Message> {
        let meta = track.metadata();
        let accent = track_color(track);
        container(
            text(format!("{} {}", meta.icon, meta.name))
                .size(self.font_size() * 0.8)
                .color(accent),
        )
        .padding([2.0, 8.0])
        .style(move |_theme: &Theme| container::Style {
            background: Some(Background::Color(tint(accent, 0.15))),
            border: Border {
                color: accent,
                width: 1.0,
                radius: 10.0.into(),
            },
            ..container::Style::default()
        })
        .into()
    }

    fn compact_selector(&self) -> Element<'_, Message> {
        let current = self.store.current();
        let buttons = Track::ALL.into_iter().map(|track| {
            let meta = track.metadata();
            let style = if track == current {
                button::primary
            } else {
                button::secondary
            };
            button(text(format!("{} {}", meta.icon, meta.name)).size(self.font_size() * 0.85))
                .style(style)
                .on_press(Message::SelectTrack(track))
                .into()
        });
        Row::with_children(buttons)
            .spacing(4)
            .height(Length::Fixed(CONTROL_ROW_PX))
            .align_y(Vertical::Center)
            .into()
    }

    fn full_selector<'a>(&'a self, label: Option<&'a str>) -> Element<'a, Message> {
        let current = self.store.current();
        let buttons = Track::ALL.into_iter().map(|track| {
            let meta = track.metadata();
            let style = if track == current {
                button::primary
            } else {
                button::secondary
            };
            button(
                column![
                    text(format!("{} {}", meta.icon, meta.label)).size(self.font_size()),
                    text(meta.language).size(self.font_size() * 0.8),
                ]
                .spacing(2),
            )
            .style(style)
            .width(Length::Fill)
            .height(Length::Fill)
            .on_press(Message::SelectTrack(track))
            .into()
        });

        let mut column: Column<'a, Message> = Column::new();
        if let Some(label) = label {
            column = column.push(
                text(label)
                    .size(self.font_size())
                    .line_height(LineHeight::Relative(LINE_HEIGHT)),
            );
        }
        column
            .push(
                Row::with_children(buttons)
                    .spacing(8)
                    .height(Length::Fixed(SELECTOR_FULL_PX)),
            )
            .into()
    }

    fn tabs<'a>(
        &'a self,
        widget: usize,
        tabs: &'a [TabPanel],
        page: &'a PageSession,
        track: Track,
    ) -> Option<Element<'a, Message>> {
        if tabs.is_empty() {
            return None;
        }
        let selected = page.selected_tab(widget).min(tabs.len() - 1);
        let bar = tabs.iter().enumerate().map(|(idx, tab)| {
            let style = if idx == selected {
                button::primary
            } else {
                button::text
            };
            button(text(tab.label.as_str()).size(self.font_size() * 0.9))
                .style(style)
                .on_press(Message::SelectTab { widget, tab: idx })
                .into()
        });
        let mut column: Column<'a, Message> = column![
            Row::with_children(bar)
                .spacing(4)
                .height(Length::Fixed(CONTROL_ROW_PX))
                .align_y(Vertical::Center)
        ]
        .spacing(BLOCK_SPACING_PX);
        if let Some(body) = self.blocks(&tabs[selected].blocks, page, track) {
            column = column.push(body);
        }
        Some(column.into())
    }
}
