use std::path::PathBuf;

use iced::widget::{button, column, container, text, text_input, Column};
use iced::{Border, Color, Element, Length, Padding};
use tracing::{info, warn};

use flixster::settings::{AppSettings, API_KEY_ENV, LANGUAGE_ENV};

use crate::ui::{ACCENT_RED, BACKGROUND_BLACK, SURFACE_DARK_GRAY, TEXT_GRAY, TEXT_WHITE};

const FORM_WIDTH: f32 = 440.0;

#[derive(Debug, Clone)]
pub enum SetupMessage {
    ApiKeyChanged(String),
    LanguageChanged(String),
    Submit,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SetupError {
    #[error("An API key is required to reach TMDB")]
    MissingKey,
    #[error("\"{0}\" is not a language tag like en or pt-BR")]
    BadLanguage(String),
}

/// First-run form, shown only while no usable API key is configured.
/// Starts from whatever the config file and environment already provide.
pub struct SetupPage {
    api_key: String,
    language: String,
    overrides: Vec<&'static str>,
    config_path: Option<PathBuf>,
    error: Option<SetupError>,
}

impl SetupPage {
    pub fn new(
        partial: AppSettings,
        overrides: Vec<&'static str>,
        config_path: Option<PathBuf>,
    ) -> Self {
        Self {
            api_key: partial.api_key,
            language: partial.language,
            overrides,
            config_path,
            error: None,
        }
    }

    pub fn from_environment() -> Self {
        Self::new(
            AppSettings::load_partial(),
            AppSettings::env_overrides(),
            AppSettings::config_path(),
        )
    }

    fn validate(&self) -> Result<AppSettings, SetupError> {
        let api_key = self.api_key.trim();
        if api_key.is_empty() {
            return Err(SetupError::MissingKey);
        }
        let language = self.language.trim();
        if !AppSettings::is_valid_language(language) {
            return Err(SetupError::BadLanguage(language.to_string()));
        }
        Ok(AppSettings {
            api_key: api_key.to_string(),
            language: language.to_string(),
        })
    }

    /// Returns settings to start with once the form validates. A failed
    /// save still starts the session; the key then lasts for this run.
    pub fn update(&mut self, message: SetupMessage) -> Option<AppSettings> {
        match message {
            SetupMessage::ApiKeyChanged(key) => {
                self.api_key = key;
                if self.error == Some(SetupError::MissingKey) {
                    self.error = None;
                }
                None
            }
            SetupMessage::LanguageChanged(lang) => {
                self.language = lang;
                if matches!(self.error, Some(SetupError::BadLanguage(_))) {
                    self.error = None;
                }
                None
            }
            SetupMessage::Submit => match self.validate() {
                Ok(settings) => {
                    match settings.save() {
                        Ok(()) => info!("setup complete"),
                        Err(e) => warn!(error = %e, "settings not saved, using them for this run"),
                    }
                    Some(settings)
                }
                Err(e) => {
                    self.error = Some(e);
                    None
                }
            },
        }
    }

    fn storage_note(&self) -> String {
        match &self.config_path {
            Some(path) => format!("Saved to {}", path.display()),
            None => String::from("No home directory found; settings last for this run only"),
        }
    }

    pub fn view(&self) -> Element<'_, SetupMessage> {
        let key_error = match &self.error {
            Some(e @ SetupError::MissingKey) => Some(e.to_string()),
            _ => None,
        };
        let language_error = match &self.error {
            Some(e @ SetupError::BadLanguage(_)) => Some(e.to_string()),
            _ => None,
        };

        let key_field = field(
            "TMDB API key",
            format!("Setting {} in the environment or .env skips this page", API_KEY_ENV),
            text_input("v3 API key", &self.api_key)
                .on_input(SetupMessage::ApiKeyChanged)
                .on_submit(SetupMessage::Submit)
                .secure(true)
                .padding(12)
                .size(14)
                .into(),
            key_error,
        );

        let language_hint = if self.overrides.contains(&LANGUAGE_ENV) {
            format!("{} is set and takes precedence over this field", LANGUAGE_ENV)
        } else {
            String::from("Blank uses en-US")
        };
        let language_field = field(
            "Language",
            language_hint,
            text_input("en-US", &self.language)
                .on_input(SetupMessage::LanguageChanged)
                .on_submit(SetupMessage::Submit)
                .padding(12)
                .size(14)
                .into(),
            language_error,
        );

        let start = button(text("Start Browsing").size(15).color(TEXT_WHITE))
            .width(Length::Fill)
            .padding(12)
            .style(|_theme, status| button::Style {
                background: Some(iced::Background::Color(match status {
                    button::Status::Hovered => Color::from_rgb(0.7, 0.02, 0.06),
                    _ => ACCENT_RED,
                })),
                text_color: TEXT_WHITE,
                border: Border::default().rounded(6),
                ..Default::default()
            })
            .on_press(SetupMessage::Submit);

        let card = container(
            column![
                text("Flixster").size(36).color(ACCENT_RED),
                text("Connect to The Movie Database").size(16).color(TEXT_WHITE),
                key_field,
                language_field,
                start,
                text(self.storage_note()).size(12).color(TEXT_GRAY),
            ]
            .spacing(20),
        )
        .width(Length::Fixed(FORM_WIDTH))
        .padding(Padding::new(32.0))
        .style(|_theme| container::Style {
            background: Some(iced::Background::Color(SURFACE_DARK_GRAY)),
            border: Border::default().rounded(12),
            ..Default::default()
        });

        container(card)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(BACKGROUND_BLACK)),
                ..Default::default()
            })
            .into()
    }
}

fn field<'a>(
    label: &'a str,
    hint: String,
    input: Element<'a, SetupMessage>,
    error: Option<String>,
) -> Element<'a, SetupMessage> {
    let mut parts: Vec<Element<'a, SetupMessage>> = vec![
        text(label).size(14).color(TEXT_WHITE).into(),
        input,
        text(hint).size(12).color(TEXT_GRAY).into(),
    ];
    if let Some(error) = error {
        parts.push(text(error).size(12).color(ACCENT_RED).into());
    }
    Column::with_children(parts).spacing(6).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(api_key: &str, language: &str) -> SetupPage {
        SetupPage::new(
            AppSettings {
                api_key: api_key.to_string(),
                language: language.to_string(),
            },
            Vec::new(),
            None,
        )
    }

    #[test]
    fn blank_key_is_rejected() {
        let mut page = page("", "");
        page.update(SetupMessage::ApiKeyChanged(String::from("   ")));
        assert!(page.update(SetupMessage::Submit).is_none());
        assert_eq!(page.error, Some(SetupError::MissingKey));
    }

    #[test]
    fn malformed_language_is_rejected_until_edited() {
        let mut page = page("key", "english");
        assert!(page.update(SetupMessage::Submit).is_none());
        assert_eq!(
            page.error,
            Some(SetupError::BadLanguage(String::from("english")))
        );

        page.update(SetupMessage::ApiKeyChanged(String::from("other")));
        assert!(page.error.is_some());
        page.update(SetupMessage::LanguageChanged(String::from("en-GB")));
        assert!(page.error.is_none());
    }

    #[test]
    fn prefills_from_partial_settings() {
        let page = page("", "de-DE");
        assert_eq!(page.language, "de-DE");
        assert_eq!(page.validate(), Err(SetupError::MissingKey));
    }

    #[test]
    fn validation_trims_fields() {
        let settings = page(" abc ", " fr ").validate().unwrap();
        assert_eq!(settings.api_key, "abc");
        assert_eq!(settings.language, "fr");
    }

    #[test]
    fn storage_note_without_home() {
        assert_eq!(
            page("", "").storage_note(),
            "No home directory found; settings last for this run only"
        );
    }
}
