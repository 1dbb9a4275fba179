use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use tracing::info;

use crate::error::Result;
use crate::router::{Router, RouterAction};
use crate::settings::Settings;

/// How long to wait for a key before checking for finished fetches.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub fn run(settings: &Settings) -> Result<()> {
    let api = super::client(settings)?;
    info!(api = %settings.api_base, locale = %settings.locale, "starting dashboard");
    let mut router = Router::new(api, settings.locale)?;

    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        ratatui::restore();
        hook(info);
    }));

    let mut terminal = ratatui::init();
    let result: Result<()> = loop {
        router.pump();
        if let Err(e) = terminal.draw(|frame| router.draw(frame, &settings.api_base)) {
            break Err(e.into());
        }

        match event::poll(POLL_INTERVAL) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(e) => break Err(e.into()),
        }
        match event::read() {
            Err(e) => break Err(e.into()),
            Ok(Event::Key(key)) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
                {
                    break Ok(());
                }
                if let RouterAction::Quit = router.handle_key(key) {
                    break Ok(());
                }
            }
            _ => {}
        }
    };

    drop(terminal);
    ratatui::restore();
    info!("dashboard closed");
    result
}
