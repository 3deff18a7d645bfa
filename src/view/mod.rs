//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared helpers (formatting, scrollable lists, shifted drawing)
//! - `layout`: Sliding screen strip and status line
//! - `home`: Home screen sections
//! - `feed`: Genre pager, vertical feeds and video cards
//! - `detail`: Artist profile and album detail
//! - `progress`: Seek bars and the now-playing bar
//! - `overlays`: Players, sheets, toast, error and help popups

mod utils;
mod layout;
mod home;
mod feed;
mod detail;
mod progress;
mod overlays;

use std::time::Instant;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{AppModel, NOW_PLAYING_HEIGHT, STATUS_HEIGHT};

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, model: &AppModel, now: Instant) {
        let now_playing = model.router().now_playing();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(if now_playing.is_some() { NOW_PLAYING_HEIGHT } else { 0 }),
                Constraint::Length(STATUS_HEIGHT),
            ])
            .split(frame.area());

        layout::render_screens(frame.buffer_mut(), chunks[0], model, now);

        if let Some(video) = now_playing {
            progress::render_now_playing(frame.buffer_mut(), chunks[1], video);
        }

        layout::render_status_bar(frame.buffer_mut(), chunks[2], model);

        // Overlays belong to the screen in front and cover only the content area
        if let Some(stack) = model.current_overlays() {
            overlays::render_overlay_stack(frame, chunks[0], stack, now);
        }

        if model.ui_state.error_message.is_some() {
            overlays::render_error_notification(frame, &model.ui_state);
        }

        if model.ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        let mut text = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn home_renders_sections() {
        let now = Instant::now();
        let mut model = AppModel::new(AppConfig::default());
        model.resize(100, 40, now);
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();

        terminal.draw(|f| AppView::render(f, &model, now)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Latest Music"));
        assert!(text.contains("HOME"));
    }

    #[test]
    fn genre_feed_renders_chips_and_options_sheet() {
        let now = Instant::now();
        let mut model = AppModel::new(AppConfig::default());
        model.resize(100, 40, now);
        let genre = model.catalog().genres[0].clone();
        model.select_genre(&genre, now);
        model.feed_action(crate::model::FeedAction::MoreOptions, now);

        // past the slide transition
        let later = now + std::time::Duration::from_secs(1);
        model.tick(later);
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| AppView::render(f, &model, later)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains(&genre.name));
        assert!(text.contains("Album information"));
        assert!(text.contains("FEED"));
    }
}
