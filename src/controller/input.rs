//! Key event handling

use std::time::Instant;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{FeedAction, OverlayAction, OverlayKind, Screen};
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent, now: Instant) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let mut model = self.model.lock().await;

        // Error message blocks all other interactions
        if model.has_error() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                model.clear_error();
            }
            return Ok(());
        }

        if model.is_help_popup_open() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('h')) {
                model.toggle_help_popup();
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit(true);
                return Ok(());
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                model.set_should_quit(true);
                return Ok(());
            }
            KeyCode::Char('?') | KeyCode::Char('h') => {
                model.toggle_help_popup();
                return Ok(());
            }
            _ => {}
        }

        let overlay = model.top_overlay();
        let screen = model.current_screen();
        drop(model);

        match overlay {
            Some(kind) => self.handle_overlay_key(kind, key, now).await,
            None => self.handle_screen_key(screen, key, now).await,
        }
        Ok(())
    }

    async fn handle_overlay_key(&self, kind: OverlayKind, key: KeyEvent, now: Instant) {
        let is_player = matches!(kind, OverlayKind::MusicPlayer | OverlayKind::VideoPlayer);
        match key.code {
            KeyCode::Esc | KeyCode::Backspace => self.navigate_back(now).await,
            KeyCode::Char(' ') if is_player => self.toggle_playback(now).await,
            KeyCode::Left if is_player => self.seek(false, now).await,
            KeyCode::Right if is_player => self.seek(true, now).await,
            code => {
                let action = match code {
                    KeyCode::Up | KeyCode::Char('k') => OverlayAction::CursorUp,
                    KeyCode::Down | KeyCode::Char('j') => OverlayAction::CursorDown,
                    KeyCode::Enter => OverlayAction::Choose,
                    KeyCode::Char('e') => OverlayAction::ExpandLyrics,
                    KeyCode::Char('a') => OverlayAction::OpenAlbum,
                    KeyCode::Char('r') => OverlayAction::OpenArtist,
                    _ => return,
                };
                self.model.lock().await.overlay_action(action, now);
            }
        }
    }

    async fn handle_screen_key(&self, screen: Screen, key: KeyEvent, now: Instant) {
        // Keys shared by every screen
        match key.code {
            KeyCode::Esc | KeyCode::Backspace => return self.navigate_back(now).await,
            KeyCode::Enter => return self.activate_selection(now).await,
            KeyCode::Char('n') => return self.open_now_playing_album(now).await,
            _ => {}
        }

        if screen != Screen::Feed {
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => self.move_selection(true, false, now).await,
                KeyCode::Down | KeyCode::Char('j') => self.move_selection(true, true, now).await,
                KeyCode::Left => self.move_selection(false, false, now).await,
                KeyCode::Right => self.move_selection(false, true, now).await,
                _ => {}
            }
            return;
        }

        let on_recommendations = {
            let model = self.model.lock().await;
            model
                .feed()
                .and_then(|f| f.focused_feed())
                .is_some_and(|f| f.on_recommendations())
        };

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(true, false, now).await,
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(true, true, now).await,
            KeyCode::Left if on_recommendations => self.move_selection(false, false, now).await,
            KeyCode::Right if on_recommendations => self.move_selection(false, true, now).await,
            KeyCode::Left => self.seek(false, now).await,
            KeyCode::Right => self.seek(true, now).await,
            KeyCode::Tab | KeyCode::Char(']') => self.step_genre(true, now).await,
            KeyCode::BackTab | KeyCode::Char('[') => self.step_genre(false, now).await,
            KeyCode::Char(' ') => self.toggle_playback(now).await,
            KeyCode::Char('l') => self.toggle_like(now).await,
            code => {
                let action = match code {
                    KeyCode::Char('c') => FeedAction::Comments,
                    KeyCode::Char('s') => FeedAction::Share,
                    KeyCode::Char('o') => FeedAction::MoreOptions,
                    KeyCode::Char('m') => FeedAction::MusicPlayer,
                    KeyCode::Char('a') => FeedAction::Artist,
                    _ => return,
                };
                self.model.lock().await.feed_action(action, now);
            }
        }
    }
}
