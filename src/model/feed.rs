//! Vertical snap feed with a single playback focus
//!
//! Every entry is one viewport tall. The focused entry is the one nearest to
//! the scroll offset, which by construction is the only entry at least half
//! visible. The trailing recommendations entry never takes focus.

use std::time::{Duration, Instant};

use super::animation::ScrollAnimation;
use super::playback::{MediaPlayback, PlayRequest};
use super::swipe::nearest_page;
use super::types::VideoItem;

/// View-local state of one video in a feed
#[derive(Clone, Debug)]
pub struct FeedItem {
    pub video: VideoItem,
    liked: bool,
    like_count: u32,
    media: MediaPlayback,
}

impl FeedItem {
    fn new(video: VideoItem, now: Instant) -> Self {
        let duration = video.song_details.duration_ms();
        Self {
            like_count: video.likes,
            liked: false,
            media: MediaPlayback::new(duration, now),
            video,
        }
    }

    pub fn is_liked(&self) -> bool {
        self.liked
    }

    pub fn like_count(&self) -> u32 {
        self.like_count
    }

    pub fn media(&self) -> &MediaPlayback {
        &self.media
    }

    pub fn toggle_like(&mut self) {
        if self.liked {
            self.like_count = self.like_count.saturating_sub(1);
        } else {
            self.like_count += 1;
        }
        self.liked = !self.liked;
    }
}

/// "Scroll Down" hint; disappears on a deadline or once the feed moves
#[derive(Clone, Copy, Debug)]
struct ScrollHint {
    visible: bool,
    deadline: Instant,
}

pub struct FeedScroller {
    items: Vec<FeedItem>,
    recommendations: Vec<VideoItem>,
    offset: f64,
    viewport_height: u16,
    animation: Option<ScrollAnimation>,
    animation_duration: Duration,
    hint: Option<ScrollHint>,
    /// Entry whose media was last told to play
    playing: Option<usize>,
    selected_recommendation: usize,
}

impl FeedScroller {
    pub fn new(
        videos: Vec<VideoItem>,
        recommendations: Vec<VideoItem>,
        animation_duration: Duration,
        now: Instant,
    ) -> Self {
        Self {
            items: videos.into_iter().map(|v| FeedItem::new(v, now)).collect(),
            recommendations,
            offset: 0.0,
            viewport_height: 1,
            animation: None,
            animation_duration,
            hint: None,
            playing: None,
            selected_recommendation: 0,
        }
    }

    pub fn with_scroll_hint(mut self, duration: Duration, now: Instant) -> Self {
        self.hint = Some(ScrollHint {
            visible: true,
            deadline: now + duration,
        });
        self
    }

    pub fn items(&self) -> &[FeedItem] {
        &self.items
    }

    pub fn recommendations(&self) -> &[VideoItem] {
        &self.recommendations
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn viewport_height(&self) -> u16 {
        self.viewport_height
    }

    /// Videos plus the recommendations panel
    pub fn entry_count(&self) -> usize {
        self.items.len() + 1
    }

    fn max_offset(&self) -> f64 {
        (self.entry_count() - 1) as f64 * self.viewport_height as f64
    }

    pub fn resize(&mut self, height: u16, now: Instant) {
        let height = height.max(1);
        if height == self.viewport_height {
            return;
        }
        let entry = self.current_entry();
        self.viewport_height = height;
        self.animation = None;
        self.offset = entry as f64 * height as f64;
        self.update_hint(now);
    }

    /// Fraction of entry `index` inside the viewport, in [0, 1]
    pub fn visible_fraction(&self, index: usize) -> f64 {
        let h = self.viewport_height as f64;
        let top = index as f64 * h;
        let overlap = (top + h).min(self.offset + h) - top.max(self.offset);
        (overlap / h).clamp(0.0, 1.0)
    }

    pub fn current_entry(&self) -> usize {
        nearest_page(self.offset, self.viewport_height as f64, self.entry_count())
    }

    pub fn on_recommendations(&self) -> bool {
        self.current_entry() == self.items.len()
    }

    /// The single item eligible to play: at least half visible, never the
    /// recommendations panel
    pub fn focused_index(&self) -> Option<usize> {
        let entry = self.current_entry();
        (entry < self.items.len() && self.visible_fraction(entry) >= 0.5).then_some(entry)
    }

    pub fn focused_item(&self) -> Option<&FeedItem> {
        self.focused_index().and_then(|i| self.items.get(i))
    }

    fn focused_item_mut(&mut self) -> Option<&mut FeedItem> {
        self.focused_index().and_then(|i| self.items.get_mut(i))
    }

    /// Free scroll by `rows`, as a native vertical scroll would
    pub fn scroll_by(&mut self, rows: f64, now: Instant) {
        self.animation = None;
        self.offset = (self.offset + rows).clamp(0.0, self.max_offset());
        self.update_hint(now);
    }

    /// Animated scroll to the start of entry `index`
    pub fn scroll_to_entry(&mut self, index: usize, now: Instant) {
        let index = index.min(self.entry_count() - 1);
        let target = index as f64 * self.viewport_height as f64;
        self.animation = Some(ScrollAnimation::new(
            self.offset,
            target,
            now,
            self.animation_duration,
        ));
    }

    /// Snap to the nearest entry after a free scroll
    pub fn snap(&mut self, now: Instant) {
        self.scroll_to_entry(self.current_entry(), now);
    }

    fn target_entry(&self) -> usize {
        match &self.animation {
            Some(anim) => nearest_page(anim.target(), self.viewport_height as f64, self.entry_count()),
            None => self.current_entry(),
        }
    }

    pub fn next(&mut self, now: Instant) {
        let target = self.target_entry() + 1;
        self.scroll_to_entry(target, now);
    }

    pub fn prev(&mut self, now: Instant) {
        let target = self.target_entry().saturating_sub(1);
        self.scroll_to_entry(target, now);
    }

    pub fn hint_visible(&self) -> bool {
        self.hint.is_some_and(|h| h.visible)
    }

    fn update_hint(&mut self, now: Instant) {
        let past_first = self.current_entry() > 0;
        if let Some(hint) = self.hint.as_mut() {
            if hint.visible && (past_first || now >= hint.deadline) {
                hint.visible = false;
                tracing::debug!("Scroll hint hidden");
            }
        }
    }

    /// Pauses whatever lost focus and asks the newly focused item to play.
    /// An inactive feed (not the visible page) plays nothing.
    pub fn apply_focus(&mut self, active: bool, autoplay: bool, now: Instant) {
        let target = if active { self.focused_index() } else { None };
        if target == self.playing {
            return;
        }
        if let Some(item) = self.playing.and_then(|i| self.items.get_mut(i)) {
            item.media.pause(now);
        }
        if let Some(item) = target.and_then(|i| self.items.get_mut(i)) {
            if let Err(error) = item.media.play(PlayRequest::Autoplay, autoplay, now) {
                tracing::warn!(video = %item.video.id, %error, "Playback did not start");
            }
        }
        self.playing = target;
    }

    pub fn tick(&mut self, now: Instant) {
        if let Some(anim) = self.animation {
            self.offset = anim.value_at(now).clamp(0.0, self.max_offset());
            if anim.is_finished(now) {
                self.animation = None;
            }
        }
        self.update_hint(now);
        for item in &mut self.items {
            item.media.tick(now);
        }
    }

    pub fn toggle_play(&mut self, now: Instant) {
        if let Some(item) = self.focused_item_mut() {
            item.media.toggle(now);
        }
    }

    pub fn toggle_like(&mut self) {
        if let Some(item) = self.focused_item_mut() {
            item.toggle_like();
        }
    }

    pub fn begin_seek(&mut self) {
        if let Some(item) = self.focused_item_mut() {
            item.media.begin_seek();
        }
    }

    /// Moves the focused item's slider by `delta` percent
    pub fn seek_by(&mut self, delta: f64, now: Instant) {
        if let Some(item) = self.focused_item_mut() {
            let progress = item.media.seek_bar().progress() + delta;
            item.media.seek(progress, now);
        }
    }

    pub fn seek_to(&mut self, progress: f64, now: Instant) {
        if let Some(item) = self.focused_item_mut() {
            item.media.seek(progress, now);
        }
    }

    pub fn end_seek(&mut self) {
        if let Some(item) = self.focused_item_mut() {
            item.media.end_seek();
        }
    }

    pub fn selected_recommendation(&self) -> usize {
        self.selected_recommendation
    }

    pub fn move_recommendation(&mut self, forward: bool) {
        let count = self.recommendations.len();
        if count == 0 {
            return;
        }
        self.selected_recommendation = if forward {
            (self.selected_recommendation + 1) % count
        } else {
            (self.selected_recommendation + count - 1) % count
        };
    }

    pub fn recommendation(&self, index: usize) -> Option<&VideoItem> {
        self.recommendations.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::content::ContentProvider;
    use crate::model::playback::PlaybackStatus;

    fn feed(now: Instant) -> FeedScroller {
        let provider = ContentProvider::new(5);
        let mut feed = FeedScroller::new(
            provider.generate_videos("Rock", 3),
            provider.generate_videos("Jazz", 4),
            Duration::from_millis(300),
            now,
        );
        feed.resize(20, now);
        feed
    }

    #[test]
    fn single_focus_follows_offset() {
        let now = Instant::now();
        let mut feed = feed(now);
        assert_eq!(feed.entry_count(), 4);
        assert_eq!(feed.focused_index(), Some(0));

        feed.scroll_by(9.0, now);
        assert_eq!(feed.focused_index(), Some(0));
        feed.scroll_by(1.0, now);
        assert_eq!(feed.visible_fraction(0), 0.5);
        assert_eq!(feed.visible_fraction(1), 0.5);
        // exact half rounds to the later entry
        assert_eq!(feed.focused_index(), Some(1));

        feed.scroll_by(100.0, now);
        assert_eq!(feed.offset(), 60.0);
        assert!(feed.on_recommendations());
        assert_eq!(feed.focused_index(), None);
    }

    #[test]
    fn focus_change_pauses_previous_item() {
        let start = Instant::now();
        let mut feed = feed(start);

        feed.apply_focus(true, true, start);
        assert!(feed.items()[0].media().is_playing());

        feed.next(start);
        feed.tick(start + Duration::from_millis(300));
        feed.apply_focus(true, true, start + Duration::from_millis(300));
        assert!(!feed.items()[0].media().is_playing());
        assert!(feed.items()[1].media().is_playing());

        feed.apply_focus(false, true, start + Duration::from_millis(400));
        assert!(feed.items().iter().all(|item| !item.media().is_playing()));
    }

    #[test]
    fn blocked_autoplay_shows_tap_to_play() {
        let now = Instant::now();
        let mut feed = feed(now);

        feed.apply_focus(true, false, now);
        assert_eq!(feed.items()[0].media().status(), PlaybackStatus::Blocked);

        feed.toggle_play(now);
        assert!(feed.items()[0].media().is_playing());
    }

    #[test]
    fn snap_settles_on_nearest_entry() {
        let start = Instant::now();
        let mut feed = feed(start);
        feed.scroll_by(27.0, start);
        feed.snap(start);
        feed.tick(start + Duration::from_millis(300));
        assert_eq!(feed.offset(), 20.0);

        feed.prev(start + Duration::from_millis(300));
        feed.prev(start + Duration::from_millis(310));
        feed.tick(start + Duration::from_secs(2));
        assert_eq!(feed.offset(), 0.0);
    }

    #[test]
    fn like_toggle_is_view_local() {
        let now = Instant::now();
        let mut feed = feed(now);
        let likes = feed.items()[0].video.likes;

        feed.toggle_like();
        assert!(feed.items()[0].is_liked());
        assert_eq!(feed.items()[0].like_count(), likes + 1);
        feed.toggle_like();
        assert_eq!(feed.items()[0].like_count(), likes);
        assert_eq!(feed.items()[0].video.likes, likes);
    }

    #[test]
    fn scroll_hint_hides_on_deadline_or_scroll() {
        let start = Instant::now();
        let mut feed = feed(start).with_scroll_hint(Duration::from_millis(5000), start);
        assert!(feed.hint_visible());
        feed.tick(start + Duration::from_millis(4999));
        assert!(feed.hint_visible());
        feed.tick(start + Duration::from_millis(5000));
        assert!(!feed.hint_visible());

        let mut feed = feed_with_hint(start);
        feed.scroll_by(15.0, start);
        assert!(!feed.hint_visible());
    }

    fn feed_with_hint(now: Instant) -> FeedScroller {
        feed(now).with_scroll_hint(Duration::from_millis(5000), now)
    }

    #[test]
    fn seeking_holds_the_slider() {
        let start = Instant::now();
        let mut feed = feed(start);
        feed.apply_focus(true, true, start);

        feed.begin_seek();
        feed.seek_to(50.0, start);
        feed.tick(start + Duration::from_millis(2000));
        assert_eq!(feed.items()[0].media().seek_bar().progress(), 50.0);
        feed.end_seek();
    }

    #[test]
    fn recommendation_cursor_wraps() {
        let now = Instant::now();
        let mut feed = feed(now);
        feed.move_recommendation(false);
        assert_eq!(feed.selected_recommendation(), 3);
        feed.move_recommendation(true);
        assert_eq!(feed.selected_recommendation(), 0);
        assert!(feed.recommendation(0).is_some());
    }
}
