//! Playback control methods for the feed and the player overlays

use std::time::Instant;

use crate::model::{FeedAction, OverlayAction, OverlayKind};

use super::{AppController, SEEK_STEP};

impl AppController {
    /// Space: the open player overlay wins over the feed underneath
    pub async fn toggle_playback(&self, now: Instant) {
        let mut model = self.model.lock().await;
        match model.top_overlay() {
            Some(OverlayKind::MusicPlayer | OverlayKind::VideoPlayer) => {
                model.overlay_action(OverlayAction::TogglePlay, now);
            }
            Some(_) => {}
            None => model.feed_action(FeedAction::TogglePlay, now),
        }
    }

    /// Left / Right: a keyboard seek is a whole drag of the seek bar, so
    /// time updates are suppressed only for its duration
    pub async fn seek(&self, forward: bool, now: Instant) {
        let delta = if forward { SEEK_STEP } else { -SEEK_STEP };
        let mut model = self.model.lock().await;

        if model.top_overlay().is_some() {
            model.overlay_action(OverlayAction::BeginSeek, now);
            model.overlay_action(OverlayAction::SeekBy(delta), now);
            model.overlay_action(OverlayAction::EndSeek, now);
        } else {
            model.feed_action(FeedAction::BeginSeek, now);
            model.feed_action(FeedAction::SeekBy(delta), now);
            model.feed_action(FeedAction::EndSeek, now);
        }
        tracing::debug!(delta, "Seek");
    }

    pub async fn toggle_like(&self, now: Instant) {
        let mut model = self.model.lock().await;
        model.feed_action(FeedAction::ToggleLike, now);
        let liked = model
            .feed()
            .and_then(|f| f.focused_feed())
            .and_then(|f| f.focused_item())
            .map(|item| (item.video.id.to_string(), item.is_liked()));
        if let Some((video, liked)) = liked {
            tracing::info!(video, liked, "Like toggled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::model::AppModel;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[tokio::test]
    async fn seek_moves_focused_progress() {
        let now = Instant::now();
        let mut model = AppModel::new(AppConfig::default());
        model.resize(80, 24, now);
        let genre = model.catalog().genres[0].clone();
        model.select_genre(&genre, now);
        model.tick(now);

        let controller = AppController::new(Arc::new(Mutex::new(model)));
        controller.seek(true, now).await;
        controller.seek(true, now).await;

        let model = controller.model.lock().await;
        let bar = model
            .feed()
            .and_then(|f| f.focused_feed())
            .and_then(|f| f.focused_item())
            .map(|item| *item.media().seek_bar())
            .unwrap();
        assert!((bar.progress() - 2.0 * SEEK_STEP).abs() < 1e-9);
        assert!(!bar.is_seeking());
    }

    #[tokio::test]
    async fn like_toggles_twice() {
        let now = Instant::now();
        let mut model = AppModel::new(AppConfig::default());
        model.resize(80, 24, now);
        let genre = model.catalog().genres[0].clone();
        model.select_genre(&genre, now);
        let controller = AppController::new(Arc::new(Mutex::new(model)));

        let liked = |model: &AppModel| {
            model
                .feed()
                .and_then(|f| f.focused_feed())
                .and_then(|f| f.focused_item())
                .map(|item| (item.is_liked(), item.like_count()))
                .unwrap()
        };
        let before = liked(&*controller.model.lock().await);
        controller.toggle_like(now).await;
        let after = liked(&*controller.model.lock().await);
        assert_eq!(after, (!before.0, before.1 + 1));
        controller.toggle_like(now).await;
        assert_eq!(liked(&*controller.model.lock().await), before);
    }
}
