//! Horizontal pager of genre feeds
//!
//! Page `i` sits at column offset `i * width`. The pager moves either
//! programmatically (chip selection, snapping) through a smooth scroll, or
//! directly under a horizontally locked drag. A debounced settle detector
//! keeps the active-genre chip in sync with wherever the pager came to rest.

use std::time::Instant;

use crate::config::Timings;

use super::animation::ScrollAnimation;
use super::content::{Catalog, RECOMMENDATION_COUNT};
use super::feed::FeedScroller;
use super::swipe::{SwipeEnd, SwipeState, SwipeUpdate, nearest_page};

pub struct GenrePage {
    pub genre_id: String,
    pub genre_name: String,
    pub feed: FeedScroller,
}

pub struct GenreFeed {
    pages: Vec<GenrePage>,
    offset: f64,
    viewport_width: u16,
    swipe: SwipeState,
    animation: Option<ScrollAnimation>,
    settle_deadline: Option<Instant>,
    active_genre: String,
    timings: Timings,
}

impl GenreFeed {
    /// Pages start with `first_genre_id`, then every other genre in catalog order
    pub fn new(catalog: &Catalog, first_genre_id: &str, timings: Timings, now: Instant) -> Self {
        let pages: Vec<GenrePage> = catalog
            .ordered_genres(first_genre_id)
            .into_iter()
            .enumerate()
            .map(|(index, genre)| {
                let videos = genre
                    .videos
                    .iter()
                    .cloned()
                    .map(|mut video| {
                        video.genre_name = Some(genre.name.clone());
                        video
                    })
                    .collect();
                let recommendations = catalog.recommendations_for(&genre.id, RECOMMENDATION_COUNT);
                let mut feed = FeedScroller::new(videos, recommendations, timings.page_scroll, now);
                if index == 0 {
                    feed = feed.with_scroll_hint(timings.scroll_hint, now);
                }
                GenrePage {
                    genre_id: genre.id.clone(),
                    genre_name: genre.name.clone(),
                    feed,
                }
            })
            .collect();

        let active_genre = pages
            .first()
            .map(|p| p.genre_id.clone())
            .unwrap_or_else(|| first_genre_id.to_string());

        tracing::debug!(first = %first_genre_id, pages = pages.len(), "Genre feed mounted");

        Self {
            pages,
            offset: 0.0,
            viewport_width: 1,
            swipe: SwipeState::new(timings.swipe_dead_zone),
            animation: None,
            settle_deadline: None,
            active_genre,
            timings,
        }
    }

    pub fn pages(&self) -> &[GenrePage] {
        &self.pages
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn viewport_width(&self) -> u16 {
        self.viewport_width
    }

    /// Genre shown as active in the chip header
    pub fn active_genre(&self) -> &str {
        &self.active_genre
    }

    /// Column span of each chip in the header, as `(start, width)`.
    /// Chips render as ` name ` separated by a single blank column.
    pub fn chip_spans(&self) -> Vec<(u16, u16)> {
        let mut column = 0u16;
        self.pages
            .iter()
            .map(|page| {
                let width = page.genre_name.chars().count() as u16 + 2;
                let span = (column, width);
                column = column.saturating_add(width + 1);
                span
            })
            .collect()
    }

    pub fn chip_at(&self, column: u16) -> Option<&str> {
        self.chip_spans()
            .into_iter()
            .zip(&self.pages)
            .find(|((start, width), _)| column >= *start && column < start + width)
            .map(|(_, page)| page.genre_id.as_str())
    }

    pub fn swipe(&self) -> &SwipeState {
        &self.swipe
    }

    /// Page nearest to the current offset
    pub fn current_page(&self) -> usize {
        nearest_page(self.offset, self.viewport_width as f64, self.pages.len())
    }

    pub fn current_feed(&self) -> Option<&FeedScroller> {
        self.pages.get(self.current_page()).map(|p| &p.feed)
    }

    pub fn current_feed_mut(&mut self) -> Option<&mut FeedScroller> {
        let index = self.current_page();
        self.pages.get_mut(index).map(|p| &mut p.feed)
    }

    fn max_offset(&self) -> f64 {
        self.pages.len().saturating_sub(1) as f64 * self.viewport_width as f64
    }

    pub fn resize(&mut self, width: u16, height: u16, now: Instant) {
        let width = width.max(1);
        if width != self.viewport_width {
            let page = self.current_page();
            self.viewport_width = width;
            self.animation = None;
            self.offset = page as f64 * width as f64;
        }
        for page in &mut self.pages {
            page.feed.resize(height, now);
        }
    }

    /// Scroll listener. Arms the settle deadline on the first scroll after a
    /// settle; ignored while a drag is being tracked.
    fn on_scroll(&mut self, now: Instant) {
        if self.swipe.is_tracking() {
            return;
        }
        if self.settle_deadline.is_none() {
            self.settle_deadline = Some(now + self.timings.settle_debounce);
        }
    }

    fn set_offset(&mut self, offset: f64, now: Instant) {
        let offset = offset.clamp(0.0, self.max_offset());
        if offset != self.offset {
            self.offset = offset;
            self.on_scroll(now);
        }
    }

    fn scroll_to_page(&mut self, index: usize, now: Instant) {
        let target = index as f64 * self.viewport_width as f64;
        self.animation = Some(ScrollAnimation::new(
            self.offset,
            target,
            now,
            self.timings.page_scroll,
        ));
    }

    /// Chip tap: smooth scroll to that genre's page. Intra-feed paging only,
    /// the router is not involved.
    pub fn select_chip(&mut self, genre_id: &str, now: Instant) -> bool {
        match self.pages.iter().position(|p| p.genre_id == genre_id) {
            Some(index) => {
                tracing::debug!(genre = %genre_id, page = index, "Genre chip selected");
                self.scroll_to_page(index, now);
                true
            }
            None => false,
        }
    }

    /// Keyboard paging relative to the page being scrolled to
    pub fn step_page(&mut self, forward: bool, now: Instant) {
        let current = match &self.animation {
            Some(anim) => nearest_page(anim.target(), self.viewport_width as f64, self.pages.len()),
            None => self.current_page(),
        };
        let target = if forward {
            (current + 1).min(self.pages.len().saturating_sub(1))
        } else {
            current.saturating_sub(1)
        };
        self.scroll_to_page(target, now);
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        // a drag takes over from any running smooth scroll
        self.animation = None;
        self.swipe.pointer_down(x, y, self.offset);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64, now: Instant) {
        match self.swipe.pointer_move(x, y) {
            SwipeUpdate::ScrollTo(offset) => self.set_offset(offset, now),
            SwipeUpdate::Vertical { dy } => {
                if let Some(feed) = self.current_feed_mut() {
                    feed.scroll_by(-dy, now);
                }
            }
            SwipeUpdate::Ignored | SwipeUpdate::Pending => {}
        }
    }

    /// Ends the gesture. Returns `SwipeEnd::Tap` when the pointer never left
    /// the dead zone so the caller can treat it as a click.
    pub fn pointer_up(&mut self, now: Instant) -> SwipeEnd {
        let end = self.swipe.pointer_up();
        self.finish_gesture(end, now);
        end
    }

    pub fn pointer_leave(&mut self, now: Instant) {
        let end = self.swipe.pointer_leave();
        self.finish_gesture(end, now);
    }

    fn finish_gesture(&mut self, end: SwipeEnd, now: Instant) {
        match end {
            SwipeEnd::Snap => {
                let page = self.current_page();
                tracing::debug!(offset = self.offset, page, "Horizontal drag released");
                self.scroll_to_page(page, now);
            }
            SwipeEnd::Released => {
                if let Some(feed) = self.current_feed_mut() {
                    feed.snap(now);
                }
                self.snap_to_nearest_page(now);
            }
            // a tap can still interrupt a smooth scroll halfway
            SwipeEnd::Tap | SwipeEnd::None => self.snap_to_nearest_page(now),
        }
        // the gesture swallowed any settle that was pending
        self.on_scroll(now);
    }

    fn is_on_page_boundary(&self) -> bool {
        self.offset == self.current_page() as f64 * self.viewport_width as f64
    }

    /// Pages are mandatory snap points; a pager left between two pages
    /// scrolls to the nearer one
    fn snap_to_nearest_page(&mut self, now: Instant) {
        if self.animation.is_none() && !self.swipe.is_tracking() && !self.is_on_page_boundary() {
            let page = self.current_page();
            tracing::debug!(offset = self.offset, page, "Pager resting between pages, snapping");
            self.scroll_to_page(page, now);
        }
    }

    /// Momentum-style horizontal scroll not driven by a tracked drag
    pub fn scroll_horizontally(&mut self, columns: f64, now: Instant) {
        self.animation = None;
        self.set_offset(self.offset + columns, now);
    }

    /// Advances the smooth scroll, fires the settle detector and keeps
    /// playback on the focused item of the visible page only
    pub fn tick(&mut self, active: bool, autoplay: bool, now: Instant) {
        if let Some(anim) = self.animation {
            self.set_offset(anim.value_at(now), now);
            if anim.is_finished(now) {
                self.animation = None;
            }
        }

        if let Some(deadline) = self.settle_deadline {
            if self.swipe.is_tracking() {
                self.settle_deadline = None;
            } else if now >= deadline {
                self.settle_deadline = None;
                self.settle(now);
            }
        }

        let current = self.current_page();
        for (index, page) in self.pages.iter_mut().enumerate() {
            page.feed.tick(now);
            page.feed.apply_focus(active && index == current, autoplay, now);
        }
    }

    fn settle(&mut self, now: Instant) {
        let index = self.current_page();
        if let Some(page) = self.pages.get(index) {
            if page.genre_id != self.active_genre {
                tracing::debug!(genre = %page.genre_id, page = index, "Active genre settled");
                self.active_genre = page.genre_id.clone();
            }
        }
        self.snap_to_nearest_page(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::content::ContentProvider;
    use std::time::Duration;

    fn pager(now: Instant) -> GenreFeed {
        let catalog = Catalog::generate(ContentProvider::new(3));
        let mut feed = GenreFeed::new(&catalog, "rock", Timings::default(), now);
        feed.resize(80, 24, now);
        feed
    }

    fn run(feed: &mut GenreFeed, from: Instant, millis: u64) -> Instant {
        let mut now = from;
        for _ in 0..(millis / 50) {
            now += Duration::from_millis(50);
            feed.tick(true, true, now);
        }
        now
    }

    #[test]
    fn pages_start_with_selected_genre() {
        let feed = pager(Instant::now());
        let ids: Vec<&str> = feed.pages().iter().map(|p| p.genre_id.as_str()).collect();
        assert_eq!(ids[0], "rock");
        assert_eq!(ids.len(), 8);
        assert_eq!(feed.active_genre(), "rock");
        assert!(feed.pages()[0].feed.hint_visible());
        assert!(!feed.pages()[1].feed.hint_visible());
    }

    #[test]
    fn chip_hit_testing_follows_labels() {
        let feed = pager(Instant::now());
        let spans = feed.chip_spans();
        let first_width = feed.pages()[0].genre_name.chars().count() as u16 + 2;
        assert_eq!(spans[0], (0, first_width));
        assert_eq!(spans[1].0, first_width + 1);

        assert_eq!(feed.chip_at(0), Some("rock"));
        assert_eq!(feed.chip_at(first_width), None);
        assert_eq!(feed.chip_at(spans[1].0), Some(feed.pages()[1].genre_id.as_str()));
    }

    #[test]
    fn chip_selection_settles_active_genre() {
        let start = Instant::now();
        let mut feed = pager(start);

        assert!(feed.select_chip("jazz", start));
        let jazz_page = feed.pages().iter().position(|p| p.genre_id == "jazz").unwrap();

        let now = run(&mut feed, start, 300);
        assert_eq!(feed.offset(), jazz_page as f64 * 80.0);
        // settle has not necessarily caught the last scroll event yet
        run(&mut feed, now, 200);
        assert_eq!(feed.active_genre(), "jazz");
        assert_eq!(feed.current_page(), jazz_page);
    }

    #[test]
    fn horizontal_drag_snaps_to_nearest_page() {
        let start = Instant::now();
        let mut feed = pager(start);

        feed.pointer_down(60.0, 10.0);
        feed.pointer_move(48.0, 12.0, start);
        feed.pointer_move(15.0, 12.0, start);
        assert_eq!(feed.offset(), 45.0);
        // no settle while the drag is tracked
        feed.tick(true, true, start + Duration::from_millis(500));
        assert_eq!(feed.active_genre(), "rock");

        assert_eq!(feed.pointer_up(start), SwipeEnd::Snap);
        run(&mut feed, start, 600);
        assert_eq!(feed.offset(), 80.0);
        assert_eq!(feed.active_genre(), feed.pages()[1].genre_id);
    }

    #[test]
    fn short_drag_snaps_back() {
        let start = Instant::now();
        let mut feed = pager(start);

        feed.pointer_down(60.0, 10.0);
        feed.pointer_move(30.0, 10.0, start);
        feed.pointer_leave(start);
        run(&mut feed, start, 600);
        assert_eq!(feed.offset(), 0.0);
        assert_eq!(feed.active_genre(), "rock");
    }

    #[test]
    fn vertical_drag_scrolls_the_page_feed() {
        let start = Instant::now();
        let mut feed = pager(start);

        feed.pointer_down(40.0, 20.0);
        feed.pointer_move(41.0, 4.0, start);
        assert_eq!(feed.offset(), 0.0);
        assert_eq!(feed.current_feed().map(|f| f.offset()), Some(16.0));

        assert_eq!(feed.pointer_up(start), SwipeEnd::Released);
        run(&mut feed, start, 400);
        assert_eq!(feed.current_feed().map(|f| f.offset()), Some(24.0));
    }

    #[test]
    fn only_visible_page_plays() {
        let start = Instant::now();
        let mut feed = pager(start);
        feed.tick(true, true, start);

        let playing: Vec<usize> = feed
            .pages()
            .iter()
            .enumerate()
            .filter(|(_, p)| p.feed.items().iter().any(|i| i.media().is_playing()))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(playing, vec![0]);

        feed.tick(false, true, start);
        assert!(feed
            .pages()
            .iter()
            .all(|p| p.feed.items().iter().all(|i| !i.media().is_playing())));
    }

    fn assert_resting_on_page(feed: &GenreFeed) {
        assert_eq!(feed.offset() % 80.0, 0.0);
        assert_eq!(feed.active_genre(), feed.pages()[feed.current_page()].genre_id);
    }

    #[test]
    fn wheel_scroll_snaps_after_settle() {
        let start = Instant::now();
        let mut feed = pager(start);

        feed.scroll_horizontally(8.0, start);
        let now = run(&mut feed, start, 2000);
        assert_eq!(feed.offset(), 0.0);
        assert_resting_on_page(&feed);

        feed.scroll_horizontally(50.0, now);
        run(&mut feed, now, 2000);
        assert_eq!(feed.offset(), 80.0);
        assert_resting_on_page(&feed);
    }

    #[test]
    fn tap_during_chip_scroll_still_lands_on_a_page() {
        let start = Instant::now();
        let mut feed = pager(start);

        feed.select_chip("jazz", start);
        let now = run(&mut feed, start, 50);
        assert_ne!(feed.offset() % 80.0, 0.0);

        feed.pointer_down(30.0, 10.0);
        let up = now + Duration::from_millis(10);
        assert_eq!(feed.pointer_up(up), SwipeEnd::Tap);
        run(&mut feed, up, 1000);
        assert_resting_on_page(&feed);
    }

    #[test]
    fn vertical_gesture_during_chip_scroll_still_lands_on_a_page() {
        let start = Instant::now();
        let mut feed = pager(start);

        feed.select_chip("jazz", start);
        let now = run(&mut feed, start, 50);

        feed.pointer_down(40.0, 20.0);
        feed.pointer_move(41.0, 4.0, now);
        assert_eq!(feed.pointer_up(now), SwipeEnd::Released);
        run(&mut feed, now, 1000);
        assert_resting_on_page(&feed);
    }

    #[test]
    fn step_page_clamps() {
        let start = Instant::now();
        let mut feed = pager(start);
        feed.step_page(false, start);
        run(&mut feed, start, 400);
        assert_eq!(feed.current_page(), 0);

        feed.step_page(true, start);
        feed.step_page(true, start);
        run(&mut feed, start, 400);
        assert_eq!(feed.current_page(), 2);
    }
}
