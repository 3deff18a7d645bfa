mod config;
mod controller;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::Mutex;

use config::AppConfig;
use controller::AppController;
use model::AppModel;
use view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== Reels-RS Starting ===");

    // A broken config never stops the app; it is reported and replaced
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => {
            tracing::warn!(error = %e, "Falling back to default config");
            (AppConfig::default(), Some(e.to_string()))
        }
    };
    tracing::info!(seed = config.seed, autoplay = config.autoplay, "Config loaded");

    let tick_interval = config.tick_interval();
    let mut app_model = AppModel::new(config);
    let (width, height) = terminal::size()?;
    let now = Instant::now();
    app_model.resize(width, height, now);
    if let Some(message) = config_error {
        app_model.set_error(message, now);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let model = Arc::new(Mutex::new(app_model));
    let controller = AppController::new(model.clone());

    let res = run_app(&mut terminal, model, controller, tick_interval).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("Reels-RS shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    controller: AppController,
    tick_interval: std::time::Duration,
) -> Result<()> {
    loop {
        controller.tick(Instant::now()).await;

        {
            let model_guard = model.lock().await;
            let now = Instant::now();
            terminal.draw(|f| AppView::render(f, &model_guard, now))?;
        }

        if event::poll(tick_interval)? {
            let now = Instant::now();
            match event::read()? {
                Event::Key(key) => controller.handle_key_event(key, now).await?,
                Event::Mouse(mouse) => controller.handle_mouse_event(mouse, now).await,
                Event::Resize(width, height) => controller.resize(width, height, now).await,
                Event::FocusLost => controller.handle_focus_lost(now).await,
                _ => {}
            }
        }

        if controller.should_quit().await {
            break;
        }
    }

    Ok(())
}
