use iced::widget::{button, column, container, row, text, Column, Row, Space};
use iced::{Border, Color, Element, Length, Shadow};

use flixster::view_model::{format_rating, CardModel};

use crate::ui::{
    icon, Message, ACCENT_RED, ICON_CHECK_CIRCLE_FILL, ICON_EYE, ICON_FILM, ICON_HEART,
    ICON_HEART_FILL, ICON_STAR_FILL, SURFACE_DARK_GRAY, TEXT_GRAY, TEXT_WHITE, WATCHED_GREEN,
};
use crate::Flixster;

const CARD_WIDTH: f32 = 200.0;
const POSTER_HEIGHT: f32 = 300.0;
const CARDS_PER_ROW: usize = 5;

fn toggle_button_style(
    active_color: Color,
    is_active: bool,
) -> impl Fn(&iced::Theme, button::Status) -> button::Style {
    move |_theme, status| {
        let bg_alpha = match status {
            button::Status::Hovered => 0.2,
            _ => 0.1,
        };
        button::Style {
            background: Some(iced::Background::Color(Color::from_rgba(
                1.0, 1.0, 1.0, bg_alpha,
            ))),
            text_color: if is_active { active_color } else { TEXT_WHITE },
            border: Border {
                color: Color::TRANSPARENT,
                width: 0.0,
                radius: 16.0.into(),
            },
            ..Default::default()
        }
    }
}

impl Flixster {
    pub fn view_card_grid(&self, cards: &[CardModel]) -> Element<'_, Message> {
        let rows: Vec<Element<Message>> = cards
            .chunks(CARDS_PER_ROW)
            .map(|chunk| {
                let row_cards: Vec<Element<Message>> =
                    chunk.iter().map(|card| self.view_movie_card(card)).collect();
                Row::with_children(row_cards)
                    .spacing(20)
                    .align_y(iced::Alignment::Start)
                    .into()
            })
            .collect();

        Column::with_children(rows)
            .spacing(28)
            .padding(iced::Padding::new(8.0).top(0.0))
            .into()
    }

    fn view_movie_card(&self, card: &CardModel) -> Element<'_, Message> {
        let poster = iced::widget::mouse_area(self.view_poster(card))
            .on_press(Message::OpenDetail(card.id))
            .interaction(iced::mouse::Interaction::Pointer);

        let title = text(card.title.clone())
            .size(15)
            .color(TEXT_WHITE)
            .font(iced::Font {
                weight: iced::font::Weight::Bold,
                ..Default::default()
            })
            .width(Length::Fill);

        let rating = row![
            icon(ICON_STAR_FILL).size(12).color(Color::from_rgb(0.96, 0.77, 0.09)),
            text(format_rating(card.vote_average)).size(13).color(TEXT_GRAY)
        ]
        .spacing(6)
        .align_y(iced::Alignment::Center);

        let favorite_icon = if card.favorited {
            ICON_HEART_FILL
        } else {
            ICON_HEART
        };
        let watched_icon = if card.watched {
            ICON_CHECK_CIRCLE_FILL
        } else {
            ICON_EYE
        };

        let favorite_button = button(icon(favorite_icon).size(16))
            .padding([6, 10])
            .style(toggle_button_style(ACCENT_RED, card.favorited))
            .on_press(Message::ToggleFavorite(card.id));

        let watched_button = button(icon(watched_icon).size(16))
            .padding([6, 10])
            .style(toggle_button_style(WATCHED_GREEN, card.watched))
            .on_press(Message::ToggleWatched(card.id));

        let actions = row![
            rating,
            Space::new().width(Length::Fill),
            favorite_button,
            watched_button
        ]
        .spacing(6)
        .align_y(iced::Alignment::Center);

        container(column![poster, title, actions].spacing(10))
            .width(Length::Fixed(CARD_WIDTH))
            .padding(10)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(SURFACE_DARK_GRAY)),
                border: Border {
                    radius: 8.0.into(),
                    ..Default::default()
                },
                shadow: Shadow {
                    color: Color::from_rgba(0.0, 0.0, 0.0, 0.3),
                    offset: iced::Vector::new(0.0, 4.0),
                    blur_radius: 8.0,
                },
                ..Default::default()
            })
            .into()
    }

    fn view_poster(&self, card: &CardModel) -> Element<'_, Message> {
        let width = CARD_WIDTH - 20.0;
        let handle = card
            .poster_url
            .as_deref()
            .and_then(|url| self.image_cache.get(url).cloned());

        match handle {
            Some(h) => container(
                iced::widget::image(h)
                    .width(Length::Fixed(width))
                    .height(Length::Fixed(POSTER_HEIGHT))
                    .content_fit(iced::ContentFit::Cover),
            )
            .style(|_| container::Style {
                border: Border {
                    radius: 6.0.into(),
                    ..Default::default()
                },
                ..Default::default()
            })
            .into(),
            None => container(icon(ICON_FILM).size(40).color(TEXT_GRAY))
                .width(Length::Fixed(width))
                .height(Length::Fixed(POSTER_HEIGHT))
                .center_x(Length::Fixed(width))
                .center_y(Length::Fixed(POSTER_HEIGHT))
                .style(|_| container::Style {
                    background: Some(iced::Background::Color(Color::from_rgb(
                        0.12, 0.12, 0.12,
                    ))),
                    border: Border {
                        radius: 6.0.into(),
                        ..Default::default()
                    },
                    ..Default::default()
                })
                .into(),
        }
    }
}
