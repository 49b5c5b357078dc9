mod cards;
mod components;
mod detail_popup;
mod handlers;
mod setup;
mod ui;

use std::sync::Arc;

use iced::widget::{container, row};
use iced::{Element, Font, Length, Size, Task, Theme};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use flixster::session::Session;
use flixster::settings::AppSettings;
use flixster::tmdb::{MovieApi, TmdbClient};

use setup::SetupPage;
use ui::{ImageCache, Message, BACKGROUND_BLACK};

pub struct Flixster {
    pub setup_page: Option<SetupPage>,
    pub session: Session,
    pub api: Option<Arc<dyn MovieApi>>,
    pub image_cache: ImageCache,
}

impl Default for Flixster {
    fn default() -> Self {
        Self {
            setup_page: None,
            session: Session::default(),
            api: None,
            image_cache: ImageCache::new(),
        }
    }
}

impl Flixster {
    fn new() -> (Self, Task<Message>) {
        match AppSettings::load() {
            Some(settings) => {
                let mut app = Self::default();
                let task = app.initialize_with_settings(settings);
                (app, task)
            }
            None => {
                info!("no TMDB API key configured, showing setup");
                (
                    Self {
                        setup_page: Some(SetupPage::from_environment()),
                        ..Default::default()
                    },
                    Task::none(),
                )
            }
        }
    }

    fn initialize_with_settings(&mut self, settings: AppSettings) -> Task<Message> {
        let client = TmdbClient::from_settings(&settings);
        self.api = Some(Arc::new(client));
        self.setup_page = None;

        let (session, effect) = Session::start();
        self.session = session;
        handlers::perform(self, effect)
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        if let Message::Setup(setup_msg) = message {
            if let Some(ref mut setup) = self.setup_page {
                if let Some(settings) = setup.update(setup_msg) {
                    return self.initialize_with_settings(settings);
                }
            }
            return Task::none();
        }
        handlers::handle_message(self, message)
    }

    fn view(&self) -> Element<'_, Message> {
        if let Some(ref setup) = self.setup_page {
            return setup.view().map(Message::Setup);
        }

        let model = self.session.view_model();

        let main_content = container(
            row![self.view_sidebar(model.view), self.view_main_column(&model)]
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_theme| container::Style {
            background: Some(iced::Background::Color(BACKGROUND_BLACK)),
            ..Default::default()
        });

        if model.detail_open {
            let popup_overlay = self.view_detail_popup_overlay(model.detail);
            return iced::widget::stack![main_content, popup_overlay]
                .width(Length::Fill)
                .height(Length::Fill)
                .into();
        }

        main_content.into()
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> iced::Result {
    let dotenv = dotenvy::dotenv();
    init_tracing();
    match dotenv {
        Ok(path) => info!("Loaded environment from {:?}", path),
        Err(e) => warn!("No .env file loaded ({}), relying on environment", e),
    }

    iced::application(Flixster::new, Flixster::update, Flixster::view)
        .title("Flixster")
        .theme(Flixster::theme)
        .window_size(Size::new(1280.0, 800.0))
        .font(iced_fonts::BOOTSTRAP_FONT_BYTES)
        .default_font(Font::DEFAULT)
        .run()
}
