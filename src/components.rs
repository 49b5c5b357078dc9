use iced::widget::{
    button, column, container, pick_list, row, scrollable, text, text_input, Column, Space,
};
use iced::{Border, Color, Element, Length, Padding, Shadow};

use flixster::session::View;
use flixster::sort::SortKey;
use flixster::view_model::ViewModel;

use crate::ui::{
    icon, Message, ACCENT_RED, ICON_CHECK_CIRCLE_FILL, ICON_FILM, ICON_HEART_FILL, ICON_SEARCH,
    SURFACE_DARK_GRAY, TEXT_GRAY, TEXT_WHITE,
};
use crate::Flixster;

const SIDEBAR_WIDTH: f32 = 220.0;

pub fn hidden_vertical_scrollbar_style(
    _theme: &iced::Theme,
    _status: scrollable::Status,
) -> scrollable::Style {
    let transparent_rail = scrollable::Rail {
        background: None,
        border: Border::default(),
        scroller: scrollable::Scroller {
            background: iced::Background::Color(Color::TRANSPARENT),
            border: Border::default(),
        },
    };
    scrollable::Style {
        container: container::Style::default(),
        vertical_rail: transparent_rail.clone(),
        horizontal_rail: transparent_rail,
        gap: None,
        auto_scroll: scrollable::AutoScroll {
            background: iced::Background::Color(Color::TRANSPARENT),
            border: Border::default(),
            shadow: Shadow::default(),
            icon: Color::TRANSPARENT,
        },
    }
}

fn pill_button_style(
    background: Color,
) -> impl Fn(&iced::Theme, button::Status) -> button::Style {
    move |_theme, status| {
        let alpha = match status {
            button::Status::Hovered => 0.85,
            button::Status::Disabled => 0.4,
            _ => 1.0,
        };
        button::Style {
            background: Some(iced::Background::Color(Color { a: alpha, ..background })),
            text_color: TEXT_WHITE,
            border: Border {
                color: Color::TRANSPARENT,
                width: 0.0,
                radius: 4.0.into(),
            },
            ..Default::default()
        }
    }
}

impl Flixster {
    pub fn view_sidebar(&self, active: View) -> Element<'_, Message> {
        let logo = text("Flixster")
            .size(28)
            .color(ACCENT_RED)
            .font(iced::Font {
                weight: iced::font::Weight::Bold,
                ..Default::default()
            });

        let nav_items = [
            (View::NowPlaying, ICON_FILM),
            (View::Favorites, ICON_HEART_FILL),
            (View::Watched, ICON_CHECK_CIRCLE_FILL),
        ];

        let nav_buttons: Vec<Element<Message>> = nav_items
            .into_iter()
            .map(|(view, icon_char)| self.view_nav_button(view, icon_char, view == active))
            .collect();

        let content = column![
            logo,
            Space::new().height(32),
            Column::with_children(nav_buttons).spacing(8)
        ]
        .padding(24)
        .width(Length::Fixed(SIDEBAR_WIDTH));

        container(content)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(SURFACE_DARK_GRAY)),
                ..Default::default()
            })
            .into()
    }

    fn view_nav_button(&self, view: View, icon_char: char, is_active: bool) -> Element<'_, Message> {
        let text_color = if is_active { TEXT_WHITE } else { TEXT_GRAY };
        let label = row![
            icon(icon_char).size(16).color(text_color),
            text(view.to_string()).size(15).color(text_color)
        ]
        .spacing(12)
        .align_y(iced::Alignment::Center);

        button(label)
            .width(Length::Fill)
            .padding(Padding::new(10.0).left(12.0))
            .style(move |_theme, status| {
                let background = match (is_active, status) {
                    (true, _) => Some(iced::Background::Color(Color::from_rgba(
                        1.0, 1.0, 1.0, 0.08,
                    ))),
                    (false, button::Status::Hovered) => Some(iced::Background::Color(
                        Color::from_rgba(1.0, 1.0, 1.0, 0.04),
                    )),
                    _ => None,
                };
                button::Style {
                    background,
                    text_color,
                    border: Border {
                        color: if is_active { ACCENT_RED } else { Color::TRANSPARENT },
                        width: if is_active { 1.0 } else { 0.0 },
                        radius: 6.0.into(),
                    },
                    ..Default::default()
                }
            })
            .on_press(Message::Navigate(view))
            .into()
    }

    pub fn view_header(&self, model: &ViewModel) -> Element<'_, Message> {
        let search_input = text_input("Search movies...", self.session.search_input())
            .on_input(Message::SearchQueryChanged)
            .on_submit(Message::SearchSubmit)
            .padding(10)
            .size(14)
            .width(Length::Fixed(320.0));

        let search_button = button(
            row![icon(ICON_SEARCH).size(14), text("Search").size(14)]
                .spacing(8)
                .align_y(iced::Alignment::Center),
        )
        .padding(Padding::new(10.0).left(16.0).right(16.0))
        .style(pill_button_style(ACCENT_RED))
        .on_press(Message::SearchSubmit);

        let clear_button = button(text("Clear").size(14))
            .padding(Padding::new(10.0).left(16.0).right(16.0))
            .style(pill_button_style(Color::from_rgb(0.25, 0.25, 0.25)))
            .on_press(Message::ClearSearch);

        let sort_picker = pick_list(SortKey::ALL.to_vec(), Some(model.sort), Message::SetSort)
            .text_size(13)
            .padding(Padding::new(10.0).left(12.0).right(12.0))
            .style(|_, _| pick_list::Style {
                text_color: TEXT_WHITE,
                placeholder_color: TEXT_GRAY,
                handle_color: TEXT_WHITE,
                background: iced::Background::Color(Color::from_rgba(1.0, 1.0, 1.0, 0.1)),
                border: Border {
                    color: Color::from_rgba(1.0, 1.0, 1.0, 0.2),
                    width: 1.0,
                    radius: 4.0.into(),
                },
            });

        let title = text(self.view_title(model))
            .size(24)
            .color(TEXT_WHITE)
            .font(iced::Font {
                weight: iced::font::Weight::Bold,
                ..Default::default()
            });

        row![
            title,
            Space::new().width(Length::Fill),
            search_input,
            search_button,
            clear_button,
            sort_picker
        ]
        .spacing(12)
        .padding(Padding::new(24.0).left(32.0).right(32.0))
        .align_y(iced::Alignment::Center)
        .into()
    }

    fn view_title(&self, model: &ViewModel) -> String {
        match model.view {
            View::Search if self.session.search_results().query.is_empty() => {
                View::Search.to_string()
            }
            View::Search => format!("Results for \"{}\"", self.session.search_results().query),
            view => view.to_string(),
        }
    }

    pub fn view_main_column(&self, model: &ViewModel) -> Element<'_, Message> {
        let mut body: Vec<Element<Message>> = Vec::new();

        if let Some(error) = &model.error {
            body.push(view_error_banner(error.clone()));
        }

        body.push(self.view_card_grid(&model.cards));

        if let Some(message) = &model.empty_message {
            body.push(
                text(message.clone())
                    .size(16)
                    .color(TEXT_GRAY)
                    .into(),
            );
        }

        if model.loading {
            body.push(text("Loading...").size(14).color(TEXT_GRAY).into());
        }

        if model.show_load_more {
            body.push(view_load_more_button());
        }

        let scroll_body = scrollable(
            Column::with_children(body)
                .spacing(24)
                .padding(Padding::new(0.0).left(32.0).right(32.0).bottom(48.0))
                .align_x(iced::Alignment::Center)
                .width(Length::Fill),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .style(hidden_vertical_scrollbar_style);

        column![self.view_header(model), scroll_body]
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

fn view_error_banner<'a>(error: String) -> Element<'a, Message> {
    container(text(error).size(15).color(TEXT_WHITE))
        .width(Length::Fill)
        .padding(12)
        .style(|_theme| container::Style {
            background: Some(iced::Background::Color(Color::from_rgba(
                0.898, 0.035, 0.078, 0.35,
            ))),
            border: Border {
                color: ACCENT_RED,
                width: 1.0,
                radius: 4.0.into(),
            },
            ..Default::default()
        })
        .into()
}

fn view_load_more_button<'a>() -> Element<'a, Message> {
    button(text("Load More").size(16).color(TEXT_WHITE))
        .padding(Padding::new(12.0).left(32.0).right(32.0))
        .style(pill_button_style(ACCENT_RED))
        .on_press(Message::LoadMore)
        .into()
}
