use iced::widget::{button, column, container, row, scrollable, text, Column, Space};
use iced::{Border, Color, Element, Length, Padding, Shadow};

use flixster::view_model::DetailModel;

use crate::components::hidden_vertical_scrollbar_style;
use crate::ui::{
    icon, Message, ACCENT_RED, ICON_CHECK_CIRCLE_FILL, ICON_EYE, ICON_FILM, ICON_HEART,
    ICON_HEART_FILL, ICON_PLAY_FILL, ICON_X_LG, SURFACE_DARK_GRAY, TEXT_GRAY, TEXT_WHITE,
    WATCHED_GREEN,
};
use crate::Flixster;

const POPUP_WIDTH: f32 = 820.0;
const BACKDROP_HEIGHT: f32 = 400.0;

fn popup_container_style(_theme: &iced::Theme) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(SURFACE_DARK_GRAY)),
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: 16.0.into(),
        },
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.5),
            offset: iced::Vector::new(0.0, 25.0),
            blur_radius: 50.0,
        },
        ..Default::default()
    }
}

fn labeled<'a>(label: &'a str, value: String) -> Element<'a, Message> {
    row![
        text(label).size(14).color(TEXT_GRAY).font(iced::Font {
            weight: iced::font::Weight::Bold,
            ..Default::default()
        }),
        text(value).size(14).color(TEXT_WHITE)
    ]
    .spacing(8)
    .into()
}

impl Flixster {
    pub fn view_detail_popup_overlay(&self, detail: Option<DetailModel>) -> Element<'_, Message> {
        let content: Element<Message> = match detail {
            Some(detail) => self.view_detail_popup_content(detail),
            None => view_detail_loading(),
        };

        let popup_with_close = iced::widget::stack![content, view_close_button()]
            .width(Length::Fixed(POPUP_WIDTH));

        let popup = container(popup_with_close)
            .max_width(POPUP_WIDTH)
            .clip(true)
            .style(popup_container_style);

        let popup_mouse_area = iced::widget::mouse_area(popup);

        let overlay_bg = iced::widget::mouse_area(
            container(Space::new().width(Length::Fill).height(Length::Fill))
                .width(Length::Fill)
                .height(Length::Fill)
                .style(|_theme| container::Style {
                    background: Some(iced::Background::Color(Color::from_rgba(
                        0.0, 0.0, 0.0, 0.7,
                    ))),
                    ..Default::default()
                }),
        )
        .on_press(Message::CloseDetail);

        let centered = container(popup_mouse_area)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(Padding::new(40.0))
            .center_x(Length::Fill)
            .center_y(Length::Fill);

        iced::widget::stack![overlay_bg, centered]
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn view_detail_popup_content(&self, detail: DetailModel) -> Element<'_, Message> {
        let backdrop = self.view_detail_backdrop(detail.backdrop_url.as_deref());

        let title = text(detail.title.clone())
            .size(30)
            .color(TEXT_WHITE)
            .font(iced::Font {
                weight: iced::font::Weight::Bold,
                ..Default::default()
            });

        let mut facts: Vec<Element<Message>> = Vec::new();
        if !detail.release_date.is_empty() {
            facts.push(labeled("Release Date:", detail.release_date.clone()));
        }
        if let Some(runtime) = detail.runtime_label.clone() {
            facts.push(labeled("Runtime:", runtime));
        }
        if let Some(genres) = detail.genres_label.clone() {
            facts.push(labeled("Genres:", genres));
        }
        if detail.loading {
            facts.push(text("Loading details...").size(13).color(TEXT_GRAY).into());
        }
        if let Some(error) = detail.error.clone() {
            facts.push(text(error).size(13).color(ACCENT_RED).into());
        }

        let overview = text(detail.overview.clone()).size(15).color(TEXT_WHITE);

        let body = column![
            title,
            self.view_detail_actions(&detail),
            Column::with_children(facts).spacing(6),
            overview
        ]
        .spacing(16)
        .padding(Padding::new(32.0).top(24.0));

        scrollable(column![backdrop, body].width(Length::Fill))
            .height(Length::Fill)
            .style(hidden_vertical_scrollbar_style)
            .into()
    }

    fn view_detail_backdrop(&self, url: Option<&str>) -> Element<'_, Message> {
        let handle = url.and_then(|url| self.image_cache.get(url).cloned());
        match handle {
            Some(h) => iced::widget::image(h)
                .width(Length::Fill)
                .height(Length::Fixed(BACKDROP_HEIGHT))
                .content_fit(iced::ContentFit::Cover)
                .into(),
            None => container(icon(ICON_FILM).size(56).color(TEXT_GRAY))
                .width(Length::Fill)
                .height(Length::Fixed(BACKDROP_HEIGHT))
                .center_x(Length::Fill)
                .center_y(Length::Fixed(BACKDROP_HEIGHT))
                .style(|_| container::Style {
                    background: Some(iced::Background::Color(Color::from_rgb(
                        0.12, 0.12, 0.12,
                    ))),
                    ..Default::default()
                })
                .into(),
        }
    }

    fn view_detail_actions(&self, detail: &DetailModel) -> Element<'_, Message> {
        let mut actions: Vec<Element<Message>> = Vec::new();

        if let Some(key) = detail.trailer_key.clone() {
            actions.push(
                button(
                    row![
                        icon(ICON_PLAY_FILL).size(18).color(Color::BLACK),
                        text("Play Trailer").size(16).color(Color::BLACK)
                    ]
                    .spacing(8)
                    .align_y(iced::Alignment::Center),
                )
                .padding(Padding::new(10.0).left(20.0).right(24.0))
                .style(|_theme, status| {
                    let alpha = match status {
                        button::Status::Hovered => 0.8,
                        _ => 1.0,
                    };
                    button::Style {
                        background: Some(iced::Background::Color(Color::from_rgba(
                            1.0, 1.0, 1.0, alpha,
                        ))),
                        text_color: Color::BLACK,
                        border: Border::default().rounded(4),
                        ..Default::default()
                    }
                })
                .on_press(Message::PlayTrailer(key))
                .into(),
            );
        } else if !detail.loading && detail.error.is_none() {
            actions.push(text("No trailer available").size(14).color(TEXT_GRAY).into());
        }

        let (favorite_icon, favorite_color) = if detail.favorited {
            (ICON_HEART_FILL, ACCENT_RED)
        } else {
            (ICON_HEART, TEXT_WHITE)
        };
        let (watched_icon, watched_color) = if detail.watched {
            (ICON_CHECK_CIRCLE_FILL, WATCHED_GREEN)
        } else {
            (ICON_EYE, TEXT_WHITE)
        };

        actions.push(circle_button(
            favorite_icon,
            favorite_color,
            Message::ToggleFavorite(detail.id),
        ));
        actions.push(circle_button(
            watched_icon,
            watched_color,
            Message::ToggleWatched(detail.id),
        ));

        iced::widget::Row::with_children(actions)
            .spacing(12)
            .align_y(iced::Alignment::Center)
            .into()
    }
}

fn circle_button<'a>(icon_char: char, color: Color, message: Message) -> Element<'a, Message> {
    button(
        container(icon(icon_char).size(18).color(color))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill),
    )
    .width(Length::Fixed(42.0))
    .height(Length::Fixed(42.0))
    .padding(0)
    .style(|_theme, status| {
        let border_alpha = match status {
            button::Status::Hovered => 1.0,
            _ => 0.5,
        };
        button::Style {
            background: Some(iced::Background::Color(Color::from_rgba(
                0.16, 0.16, 0.16, 0.6,
            ))),
            text_color: TEXT_WHITE,
            border: Border {
                color: Color::from_rgba(1.0, 1.0, 1.0, border_alpha),
                width: 2.0,
                radius: 21.0.into(),
            },
            ..Default::default()
        }
    })
    .on_press(message)
    .into()
}

fn view_close_button<'a>() -> Element<'a, Message> {
    let close = button(
        container(icon(ICON_X_LG).size(18).color(TEXT_WHITE))
            .center_x(Length::Fill)
            .center_y(Length::Fill),
    )
    .width(Length::Fixed(36.0))
    .height(Length::Fixed(36.0))
    .padding(0)
    .style(|_theme, _status| button::Style {
        background: Some(iced::Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.7))),
        text_color: TEXT_WHITE,
        border: Border::default().rounded(18),
        ..Default::default()
    })
    .on_press(Message::CloseDetail);

    container(close)
        .width(Length::Fill)
        .align_x(iced::alignment::Horizontal::Right)
        .padding(16)
        .into()
}

fn view_detail_loading<'a>() -> Element<'a, Message> {
    container(text("Loading...").size(18).color(TEXT_GRAY))
        .width(Length::Fill)
        .height(Length::Fixed(BACKDROP_HEIGHT))
        .center_x(Length::Fill)
        .center_y(Length::Fixed(BACKDROP_HEIGHT))
        .into()
}
