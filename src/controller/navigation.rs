//! Navigation-related controller methods (screens, selections, back)

use std::time::Instant;

use crate::model::{FeedAction, Screen};
use super::AppController;

impl AppController {
    /// Escape / Backspace: topmost overlay first, then the router
    pub async fn navigate_back(&self, now: Instant) {
        let mut model = self.model.lock().await;
        let from = model.current_screen();
        if model.dismiss_or_back(now) {
            tracing::debug!(?from, to = ?model.current_screen(), "Navigated back");
        }
    }

    /// Enter on whatever the current screen has selected
    pub async fn activate_selection(&self, now: Instant) {
        let mut model = self.model.lock().await;
        let from = model.current_screen();
        model.activate_selection(now);
        let to = model.current_screen();
        if from != to {
            tracing::info!(?from, ?to, "Screen changed");
        }
    }

    pub async fn open_now_playing_album(&self, now: Instant) {
        let mut model = self.model.lock().await;
        if !model.open_now_playing_album(now) {
            tracing::debug!("Nothing playing, album not opened");
        }
    }

    /// Arrow keys outside overlays. `vertical` moves between sections (or
    /// feed items), otherwise between items of the selected row.
    pub async fn move_selection(&self, vertical: bool, forward: bool, now: Instant) {
        let mut model = self.model.lock().await;
        match model.current_screen() {
            Screen::Home => {
                if vertical {
                    model.home_mut().move_section(forward);
                } else {
                    model.move_home_item(forward);
                }
            }
            Screen::Feed => {
                let action = match (vertical, forward) {
                    (true, true) => FeedAction::Next,
                    (true, false) => FeedAction::Prev,
                    (false, true) => FeedAction::NextRecommendation,
                    (false, false) => FeedAction::PrevRecommendation,
                };
                model.feed_action(action, now);
            }
            Screen::Artist => {
                if let Some(profile) = model.artist_profile_mut() {
                    if vertical {
                        profile.move_section(forward);
                    } else {
                        profile.move_item(forward);
                    }
                }
            }
            Screen::Album => {
                if let Some(detail) = model.album_detail_mut() {
                    detail.move_cursor(forward);
                }
            }
        }
    }

    /// Keyboard paging of the genre pager, same path as a chip tap
    pub async fn step_genre(&self, forward: bool, now: Instant) {
        let action = if forward {
            FeedAction::NextGenre
        } else {
            FeedAction::PrevGenre
        };
        self.model.lock().await.feed_action(action, now);
    }
}
