//! # CFee GUI Application
//!
//! Desktop front-end for the fee calculator, built with Iced.
//!
//! Layout follows the calculator's three cards: buy inputs with the buy
//! fee total, sell inputs with the break-even sell, and a summary with the
//! incinerator rebate, the totals and the reset button.
//!
//! The session clock only needs to tick while a reset timer is live, so
//! the tick subscription is dropped as soon as the session goes idle.

mod ui;

use std::collections::HashMap;
use std::path::Path;
use std::time::{Duration, Instant};

use iced::widget::{column, row, scrollable};
use iced::{Element, Length, Subscription};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cfee_core::input::Field;
use cfee_core::reset::ResetTransition;
use cfee_core::session::Session;
use cfee_core::settings::Settings;

/// Environment variable naming an optional settings file
const CONFIG_ENV: &str = "CFEE_CONFIG";

/// How often the session clock is advanced while a timer is pending
const TICK_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    iced::application(App::new, App::update, App::view)
        .title("CFee - Meme Coin Fee Calculator")
        .subscription(App::subscription)
        .window_size((980.0, 760.0))
        .run()
}

#[derive(Debug, Clone)]
pub enum Message {
    /// Raw text typed into an input
    FieldChanged(Field, String),
    /// Reset button pressed
    ResetPressed,
    /// Pointer left the reset button
    ResetLeft,
    /// Clock tick while a reset timer is pending
    Tick,
}

pub struct App {
    pub session: Session,
    /// Text shown in each input. Kept separately from the parsed value so
    /// partial entries like "0." survive while typing.
    pub drafts: HashMap<Field, String>,
    pub status: String,
    started: Instant,
}

impl App {
    fn new() -> Self {
        let (settings, status) = load_settings();
        let mut app = App {
            session: Session::new(settings),
            drafts: HashMap::new(),
            status,
            started: Instant::now(),
        };
        app.sync_drafts();
        app
    }

    fn update(&mut self, message: Message) {
        // Expire timers first so a late click after the window counts as a
        // fresh request
        self.session.advance(self.started.elapsed());

        match message {
            Message::FieldChanged(field, raw) => {
                self.session.set_raw(field, &raw);
                self.drafts.insert(field, raw);
                self.status = match self.session.input().validate() {
                    Ok(()) => String::new(),
                    Err(e) => e.to_string(),
                };
            }
            Message::ResetPressed => {
                match self.session.request_reset() {
                    ResetTransition::Armed => {
                        self.drafts.insert(Field::BuyAmount, draft_text(0.0));
                    }
                    ResetTransition::Confirmed { message } => {
                        info!(%message, "reset confirmed from GUI");
                        self.sync_drafts();
                        self.status = String::new();
                    }
                }
            }
            Message::ResetLeft => {
                self.session.cancel_pending();
            }
            Message::Tick => {}
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let cards = row![
            ui::buy_panel::view(self),
            ui::sell_panel::view(self),
        ]
        .spacing(16);

        let content = column![
            ui::header::view(),
            cards,
            ui::summary_panel::view(self),
            ui::status_bar::view(&self.status),
        ]
        .spacing(16)
        .padding(20)
        .width(Length::Fill);

        scrollable(content).into()
    }

    fn subscription(&self) -> Subscription<Message> {
        if self.session.has_pending_timers() {
            iced::time::every(TICK_INTERVAL).map(|_| Message::Tick)
        } else {
            Subscription::none()
        }
    }

    /// Raw text for a field's input
    pub fn draft(&self, field: Field) -> &str {
        self.drafts.get(&field).map(String::as_str).unwrap_or("")
    }

    fn sync_drafts(&mut self) {
        let input = *self.session.input();
        self.drafts = Field::ALL
            .iter()
            .map(|field| (*field, draft_text(input.get(*field))))
            .collect();
    }
}

fn draft_text(value: f64) -> String {
    format!("{}", value)
}

fn load_settings() -> (Settings, String) {
    let Ok(path) = std::env::var(CONFIG_ENV) else {
        return (Settings::default(), String::new());
    };

    match Settings::load(Path::new(&path)) {
        Ok(settings) => {
            info!(%path, "loaded settings");
            (settings, String::new())
        }
        Err(e) => {
            warn!(%path, error = %e, "falling back to default settings");
            (Settings::default(), format!("Settings not loaded: {}", e))
        }
    }
}
