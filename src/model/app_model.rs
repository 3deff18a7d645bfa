//! Main application model with state management

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::{AppConfig, Timings};

use super::animation::ScrollAnimation;
use super::content::{Catalog, ContentProvider};
use super::navigation::{FeedSelection, Router, Screen, ScreenPosition, ScreenPositions};
use super::overlay::{OverlayEffect, OverlayKind, OverlayStack, SHARE_TOAST};
use super::screens::{AlbumDetail, ArtistProfile, FeedKind, FeedScreen, HomeScreen, ScreenAction};
use super::swipe::SwipeEnd;
use super::types::{Album, Artist, Genre, VideoItem};

/// Rows taken by the status line at the bottom
pub const STATUS_HEIGHT: u16 = 1;
/// Rows taken by the now-playing bar once a song is playing
pub const NOW_PLAYING_HEIGHT: u16 = 3;

const ERROR_DISPLAY: Duration = Duration::from_secs(5);

/// Sliding transition between two screen layouts
#[derive(Clone, Copy, Debug)]
pub struct ScreenTransition {
    from: ScreenPositions,
    to: ScreenPositions,
    progress: ScrollAnimation,
}

#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub viewport: (u16, u16),
    pub transition: Option<ScreenTransition>,
    pub show_help_popup: bool,
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
    pub should_quit: bool,
}

/// Actions on the focused item of the visible feed
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FeedAction {
    Next,
    Prev,
    TogglePlay,
    ToggleLike,
    Comments,
    Share,
    MoreOptions,
    MusicPlayer,
    Artist,
    BeginSeek,
    SeekBy(f64),
    EndSeek,
    NextGenre,
    PrevGenre,
    NextRecommendation,
    PrevRecommendation,
    OpenRecommendation,
}

/// Actions on the topmost overlay of the current screen
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OverlayAction {
    Dismiss,
    CursorUp,
    CursorDown,
    Choose,
    ExpandLyrics,
    TogglePlay,
    BeginSeek,
    SeekBy(f64),
    EndSeek,
    OpenAlbum,
    OpenArtist,
}

/// Main application model containing all state
pub struct AppModel {
    catalog: Arc<Catalog>,
    config: AppConfig,
    timings: Timings,
    router: Router,
    home: HomeScreen,
    feed: Option<FeedScreen>,
    artist: Option<ArtistProfile>,
    album: Option<AlbumDetail>,
    pub ui_state: UiState,
}

impl AppModel {
    pub fn new(config: AppConfig) -> Self {
        let catalog = Arc::new(Catalog::generate(ContentProvider::new(config.seed)));
        let timings = config.timings();
        Self {
            router: Router::new(catalog.clone()),
            catalog,
            config,
            timings,
            home: HomeScreen::default(),
            feed: None,
            artist: None,
            album: None,
            ui_state: UiState::default(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn home(&self) -> &HomeScreen {
        &self.home
    }

    pub fn home_mut(&mut self) -> &mut HomeScreen {
        &mut self.home
    }

    pub fn move_home_item(&mut self, forward: bool) {
        self.home.move_item(forward, &self.catalog);
    }

    pub fn feed(&self) -> Option<&FeedScreen> {
        self.feed.as_ref()
    }

    pub fn artist_profile(&self) -> Option<&ArtistProfile> {
        self.artist.as_ref()
    }

    pub fn artist_profile_mut(&mut self) -> Option<&mut ArtistProfile> {
        self.artist.as_mut()
    }

    pub fn album_detail(&self) -> Option<&AlbumDetail> {
        self.album.as_ref()
    }

    pub fn album_detail_mut(&mut self) -> Option<&mut AlbumDetail> {
        self.album.as_mut()
    }

    pub fn current_screen(&self) -> Screen {
        self.router.current_screen()
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    fn navigate(&mut self, now: Instant, change: impl FnOnce(&mut Router)) {
        let before = self.router.screen_positions();
        change(&mut self.router);
        self.sync_screens(now);
        let after = self.router.screen_positions();
        if before != after {
            self.ui_state.transition = Some(ScreenTransition {
                from: before,
                to: after,
                progress: ScrollAnimation::new(0.0, 1.0, now, self.timings.slide_transition),
            });
        }
    }

    /// Mounts whatever the router needs that is not mounted yet. Mounted
    /// screens that still match are kept, so going back restores them.
    fn sync_screens(&mut self, now: Instant) {
        let selection = match (self.router.genre(), self.router.artist_feed()) {
            (Some(genre_id), _) => Some(FeedSelection::Genre(genre_id.to_string())),
            (None, Some(artist)) => Some(FeedSelection::ArtistFeed(artist.clone())),
            (None, None) => None,
        };
        if let Some(selection) = selection {
            if self.feed.as_ref().is_none_or(|feed| feed.key != selection) {
                self.mount_feed(selection, now);
            }
        }

        if let Some(artist) = self.router.artist() {
            if self.artist.as_ref().is_none_or(|p| p.artist() != artist) {
                self.artist = Some(ArtistProfile::mount(artist.clone(), self.catalog.provider(), self.timings));
            }
        }

        if let (Some(artist), Some(album)) = (self.router.artist(), self.router.album()) {
            if self
                .album
                .as_ref()
                .is_none_or(|d| d.album.id != album.id || &d.artist != artist)
            {
                self.album = Some(AlbumDetail::mount(artist.clone(), album.clone(), self.timings));
            }
        }
    }

    fn mount_feed(&mut self, selection: FeedSelection, now: Instant) {
        let mut screen = FeedScreen::mount(selection, &self.catalog, self.timings, now);
        let (width, height) = self.content_size();
        screen.resize(width, height, now);
        self.feed = Some(screen);
    }

    pub fn select_genre(&mut self, genre: &Genre, now: Instant) {
        // a fresh selection always starts a fresh pager
        self.feed = None;
        self.navigate(now, |router| router.select_genre(genre));
    }

    pub fn select_artist(&mut self, artist: Artist, now: Instant) {
        self.artist = None;
        self.navigate(now, |router| router.select_artist(artist));
    }

    pub fn select_artist_feed(&mut self, artist: Artist, now: Instant) {
        self.feed = None;
        self.navigate(now, |router| router.select_artist_feed(artist));
    }

    pub fn select_album(&mut self, album: Album, now: Instant) {
        self.album = None;
        self.navigate(now, |router| router.select_album(album));
    }

    pub fn go_back(&mut self, now: Instant) -> bool {
        let mut moved = false;
        self.navigate(now, |router| moved = router.go_back());
        moved
    }

    pub fn play_song(&mut self, video: VideoItem, now: Instant) {
        self.router.play_song(video);
        self.resize(self.ui_state.viewport.0, self.ui_state.viewport.1, now);
    }

    pub fn open_now_playing_album(&mut self, now: Instant) -> bool {
        let mut opened = false;
        self.navigate(now, |router| opened = router.open_now_playing_album());
        opened
    }

    pub fn dispatch(&mut self, action: ScreenAction, now: Instant) {
        match action {
            ScreenAction::SelectGenre(genre) => self.select_genre(&genre, now),
            ScreenAction::SelectArtist(artist) => self.select_artist(artist, now),
            ScreenAction::SelectArtistFeed(artist) => self.select_artist_feed(artist, now),
            ScreenAction::SelectAlbum(album) => self.select_album(album, now),
            ScreenAction::PlaySong(video) => self.play_song(video, now),
            ScreenAction::OpenMusicPlayer(video) => {
                if let Some(overlays) = self.current_overlays_mut() {
                    overlays.open_music_player(video, now);
                }
            }
            ScreenAction::OpenVideoPlayer(video) => {
                if let Some(overlays) = self.current_overlays_mut() {
                    overlays.open_video_player(video, now);
                }
            }
        }
    }

    /// Enter on the current screen's selection
    pub fn activate_selection(&mut self, now: Instant) {
        let action = match self.current_screen() {
            Screen::Home => self.home.activate(&self.catalog),
            Screen::Artist => self.artist.as_ref().and_then(ArtistProfile::activate),
            Screen::Album => self
                .album
                .as_ref()
                .and_then(|detail| detail.activate(self.catalog.provider())),
            Screen::Feed => {
                self.feed_action(FeedAction::OpenRecommendation, now);
                None
            }
        };
        if let Some(action) = action {
            self.dispatch(action, now);
        }
    }

    // ========================================================================
    // Overlays
    // ========================================================================

    pub fn current_overlays(&self) -> Option<&OverlayStack> {
        match self.current_screen() {
            Screen::Home => None,
            Screen::Feed => self.feed.as_ref().map(|s| &s.overlays),
            Screen::Artist => self.artist.as_ref().map(|s| &s.overlays),
            Screen::Album => self.album.as_ref().map(|s| &s.overlays),
        }
    }

    pub fn current_overlays_mut(&mut self) -> Option<&mut OverlayStack> {
        match self.current_screen() {
            Screen::Home => None,
            Screen::Feed => self.feed.as_mut().map(|s| &mut s.overlays),
            Screen::Artist => self.artist.as_mut().map(|s| &mut s.overlays),
            Screen::Album => self.album.as_mut().map(|s| &mut s.overlays),
        }
    }

    pub fn top_overlay(&self) -> Option<OverlayKind> {
        self.current_overlays().and_then(OverlayStack::top)
    }

    /// Escape: closes the topmost overlay, otherwise navigates back
    pub fn dismiss_or_back(&mut self, now: Instant) -> bool {
        if self.top_overlay().is_some() {
            self.overlay_action(OverlayAction::Dismiss, now);
            true
        } else {
            self.go_back(now)
        }
    }

    pub fn overlay_action(&mut self, action: OverlayAction, now: Instant) {
        let Some(overlays) = self.current_overlays_mut() else {
            return;
        };
        match action {
            OverlayAction::Dismiss => {
                overlays.dismiss_top();
            }
            OverlayAction::CursorUp | OverlayAction::CursorDown => {
                let forward = action == OverlayAction::CursorDown;
                match overlays.top() {
                    Some(OverlayKind::MoreOptions) => overlays.move_option_cursor(forward),
                    Some(OverlayKind::Comments) => overlays.scroll_comments(forward),
                    _ => {}
                }
            }
            OverlayAction::Choose => {
                overlays.choose_selected_option(now);
            }
            OverlayAction::ExpandLyrics => overlays.expand_lyrics(),
            OverlayAction::TogglePlay => {
                if let Some(player) = overlays.active_player_mut() {
                    player.media.toggle(now);
                }
            }
            OverlayAction::BeginSeek => {
                if let Some(player) = overlays.active_player_mut() {
                    player.media.begin_seek();
                }
            }
            OverlayAction::SeekBy(delta) => {
                if let Some(player) = overlays.active_player_mut() {
                    let progress = player.media.seek_bar().progress() + delta;
                    player.media.seek(progress, now);
                }
            }
            OverlayAction::EndSeek => {
                if let Some(player) = overlays.active_player_mut() {
                    player.media.end_seek();
                }
            }
            OverlayAction::OpenAlbum | OverlayAction::OpenArtist => {
                let Some(video) = overlays.top_video().cloned() else {
                    return;
                };
                if let Some(kind) = overlays.top() {
                    overlays.close(kind);
                }
                if action == OverlayAction::OpenAlbum {
                    self.select_album(Album::single(&video), now);
                } else {
                    self.select_artist(video.user, now);
                }
            }
        }
    }

    // ========================================================================
    // Feed
    // ========================================================================

    pub fn feed_action(&mut self, action: FeedAction, now: Instant) {
        let catalog = self.catalog.clone();
        let Some(screen) = self.feed.as_mut() else {
            return;
        };
        let focused = screen.focused_video().cloned();

        match action {
            FeedAction::Next | FeedAction::Prev => {
                if let Some(feed) = screen.focused_feed_mut() {
                    if action == FeedAction::Next {
                        feed.next(now);
                    } else {
                        feed.prev(now);
                    }
                }
            }
            FeedAction::TogglePlay => {
                if let Some(feed) = screen.focused_feed_mut() {
                    feed.toggle_play(now);
                }
            }
            FeedAction::ToggleLike => {
                if let Some(feed) = screen.focused_feed_mut() {
                    feed.toggle_like();
                }
            }
            FeedAction::BeginSeek => {
                if let Some(feed) = screen.focused_feed_mut() {
                    feed.begin_seek();
                }
            }
            FeedAction::SeekBy(delta) => {
                if let Some(feed) = screen.focused_feed_mut() {
                    feed.seek_by(delta, now);
                }
            }
            FeedAction::EndSeek => {
                if let Some(feed) = screen.focused_feed_mut() {
                    feed.end_seek();
                }
            }
            FeedAction::Comments => {
                if let Some(video) = focused {
                    screen.overlays.open_comments(video, catalog.provider());
                }
            }
            FeedAction::Share => {
                if focused.is_some() {
                    screen.overlays.show_toast(SHARE_TOAST, now);
                }
            }
            FeedAction::MoreOptions => {
                if let Some(video) = focused {
                    screen.overlays.open_more_options(video);
                }
            }
            FeedAction::MusicPlayer => {
                if let Some(video) = focused {
                    screen.overlays.open_music_player(video, now);
                }
            }
            FeedAction::Artist => {
                if let Some(video) = focused {
                    self.select_artist(video.user, now);
                }
            }
            FeedAction::NextGenre | FeedAction::PrevGenre => {
                if let FeedKind::Genre(pager) = &mut screen.kind {
                    pager.step_page(action == FeedAction::NextGenre, now);
                }
            }
            FeedAction::NextRecommendation | FeedAction::PrevRecommendation => {
                if let Some(feed) = screen.focused_feed_mut() {
                    if feed.on_recommendations() {
                        feed.move_recommendation(action == FeedAction::NextRecommendation);
                    }
                }
            }
            FeedAction::OpenRecommendation => {
                if let Some(ScreenAction::SelectGenre(genre)) = screen.activate_recommendation(&catalog) {
                    self.select_genre(&genre, now);
                }
            }
        }
    }

    /// Genre chip tap inside the pager
    pub fn select_chip(&mut self, genre_id: &str, now: Instant) -> bool {
        match self.feed.as_mut().map(|s| &mut s.kind) {
            Some(FeedKind::Genre(pager)) => pager.select_chip(genre_id, now),
            _ => false,
        }
    }

    pub fn pointer_down(&mut self, x: u16, y: u16) {
        if let Some(FeedKind::Genre(pager)) = self.active_feed_kind_mut() {
            pager.pointer_down(x as f64, y as f64);
        }
    }

    pub fn pointer_move(&mut self, x: u16, y: u16, now: Instant) {
        if let Some(FeedKind::Genre(pager)) = self.active_feed_kind_mut() {
            pager.pointer_move(x as f64, y as f64, now);
        }
    }

    pub fn pointer_up(&mut self, now: Instant) -> SwipeEnd {
        match self.active_feed_kind_mut() {
            Some(FeedKind::Genre(pager)) => pager.pointer_up(now),
            _ => SwipeEnd::None,
        }
    }

    pub fn pointer_leave(&mut self, now: Instant) {
        if let Some(FeedKind::Genre(pager)) = self.active_feed_kind_mut() {
            pager.pointer_leave(now);
        }
    }

    /// Mouse wheel: one snap per notch on the focused vertical feed
    pub fn wheel(&mut self, down: bool, now: Instant) {
        match self.current_screen() {
            Screen::Feed => {
                let action = if down { FeedAction::Next } else { FeedAction::Prev };
                self.feed_action(action, now);
            }
            Screen::Home => self.home.move_section(down),
            Screen::Artist => {
                if let Some(profile) = self.artist.as_mut() {
                    profile.move_section(down);
                }
            }
            Screen::Album => {
                if let Some(detail) = self.album.as_mut() {
                    detail.move_cursor(down);
                }
            }
        }
    }

    /// Horizontal wheel or trackpad scroll on the pager, outside any drag
    pub fn scroll_pager(&mut self, columns: f64, now: Instant) {
        if let Some(FeedKind::Genre(pager)) = self.active_feed_kind_mut() {
            pager.scroll_horizontally(columns, now);
        }
    }

    /// Click that never left the dead zone. The first row of a genre feed is
    /// the chip header; anywhere else toggles playback of the focused item.
    pub fn tap(&mut self, column: u16, row: u16, now: Instant) {
        if self.current_screen() != Screen::Feed || self.top_overlay().is_some() {
            return;
        }
        if row == 0 {
            let chip = match self.feed.as_ref().map(|s| &s.kind) {
                Some(FeedKind::Genre(pager)) => pager.chip_at(column).map(str::to_string),
                _ => None,
            };
            if let Some(genre_id) = chip {
                self.select_chip(&genre_id, now);
            }
            return;
        }
        self.feed_action(FeedAction::TogglePlay, now);
    }

    /// Pointer input only reaches the pager while the feed is centered and
    /// no overlay covers it
    fn active_feed_kind_mut(&mut self) -> Option<&mut FeedKind> {
        if self.current_screen() != Screen::Feed || self.top_overlay().is_some() {
            return None;
        }
        self.feed.as_mut().map(|s| &mut s.kind)
    }

    // ========================================================================
    // Layout & time
    // ========================================================================

    /// Area left to the screens above the now-playing bar and status line
    pub fn content_size(&self) -> (u16, u16) {
        let (width, height) = self.ui_state.viewport;
        let bars = STATUS_HEIGHT
            + if self.router.now_playing().is_some() {
                NOW_PLAYING_HEIGHT
            } else {
                0
            };
        (width.max(1), height.saturating_sub(bars).max(1))
    }

    pub fn resize(&mut self, width: u16, height: u16, now: Instant) {
        self.ui_state.viewport = (width, height);
        let (content_width, content_height) = self.content_size();
        if let Some(feed) = self.feed.as_mut() {
            feed.resize(content_width, content_height, now);
        }
    }

    /// Horizontal position of a screen as a fraction of the width
    pub fn screen_offset(&self, screen: Screen, now: Instant) -> f64 {
        let pick = |positions: &ScreenPositions| -> ScreenPosition {
            match screen {
                Screen::Home => positions.home,
                Screen::Feed => positions.feed,
                Screen::Artist => positions.artist,
                Screen::Album => positions.album,
            }
        };
        match &self.ui_state.transition {
            Some(transition) => {
                let from = pick(&transition.from).factor() as f64;
                let to = pick(&transition.to).factor() as f64;
                let t = transition.progress.value_at(now);
                from + (to - from) * t
            }
            None => pick(&self.router.screen_positions()).factor() as f64,
        }
    }

    pub fn tick(&mut self, now: Instant) {
        if self
            .ui_state
            .transition
            .is_some_and(|t| t.progress.is_finished(now))
        {
            self.ui_state.transition = None;
        }

        if self
            .ui_state
            .error_timestamp
            .is_some_and(|at| now.saturating_duration_since(at) > ERROR_DISPLAY)
        {
            self.clear_error();
        }

        let current = self.current_screen();
        let autoplay = self.config.autoplay;
        if let Some(feed) = self.feed.as_mut() {
            feed.tick(current == Screen::Feed, autoplay, now);
        }

        let mut effects = Vec::new();
        for (screen, overlays) in [
            (Screen::Feed, self.feed.as_mut().map(|s| &mut s.overlays)),
            (Screen::Artist, self.artist.as_mut().map(|s| &mut s.overlays)),
            (Screen::Album, self.album.as_mut().map(|s| &mut s.overlays)),
        ] {
            let Some(overlays) = overlays else {
                continue;
            };
            let fired = overlays.tick(now);
            if screen == current {
                effects.extend(fired);
            } else if !fired.is_empty() {
                tracing::debug!(?screen, "Dropping overlay effect of a hidden screen");
            }
        }

        for effect in effects {
            match effect {
                OverlayEffect::SelectAlbum(album) => self.select_album(album, now),
            }
        }
    }

    // ========================================================================
    // UI flags
    // ========================================================================

    pub fn should_quit(&self) -> bool {
        self.ui_state.should_quit
    }

    pub fn set_should_quit(&mut self, quit: bool) {
        self.ui_state.should_quit = quit;
    }

    pub fn toggle_help_popup(&mut self) {
        self.ui_state.show_help_popup = !self.ui_state.show_help_popup;
    }

    pub fn is_help_popup_open(&self) -> bool {
        self.ui_state.show_help_popup
    }

    pub fn set_error(&mut self, message: String, now: Instant) {
        self.ui_state.error_message = Some(message);
        self.ui_state.error_timestamp = Some(now);
    }

    pub fn clear_error(&mut self) {
        self.ui_state.error_message = None;
        self.ui_state.error_timestamp = None;
    }

    pub fn has_error(&self) -> bool {
        self.ui_state.error_message.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::overlay::MoreOption;

    fn model(now: Instant) -> AppModel {
        let mut model = AppModel::new(AppConfig::default());
        model.resize(80, 30, now);
        model
    }

    fn run(model: &mut AppModel, from: Instant, millis: u64) -> Instant {
        let mut now = from;
        for _ in 0..(millis / 50) {
            now += Duration::from_millis(50);
            model.tick(now);
        }
        now
    }

    fn active_genre(model: &AppModel) -> Option<String> {
        match &model.feed()?.kind {
            FeedKind::Genre(pager) => Some(pager.active_genre().to_string()),
            FeedKind::Artist { .. } => None,
        }
    }

    #[test]
    fn rock_then_jazz_chip_settles_on_jazz() {
        let start = Instant::now();
        let mut model = model(start);
        let rock = model.catalog().genre("rock").cloned().unwrap();

        model.select_genre(&rock, start);
        assert_eq!(model.current_screen(), Screen::Feed);
        assert_eq!(active_genre(&model).as_deref(), Some("rock"));

        assert!(model.select_chip("jazz", start));
        run(&mut model, start, 800);

        assert_eq!(active_genre(&model).as_deref(), Some("jazz"));
        assert_eq!(model.current_screen(), Screen::Feed);
        assert_eq!(model.router().genre(), Some("rock"));
    }

    #[test]
    fn album_information_opens_album_after_delay() {
        let start = Instant::now();
        let mut model = model(start);
        let pop = model.catalog().genre("pop").cloned().unwrap();
        model.select_genre(&pop, start);
        let video = model.feed().and_then(|f| f.focused_video()).cloned().unwrap();

        model.feed_action(FeedAction::MoreOptions, start);
        assert_eq!(model.top_overlay(), Some(OverlayKind::MoreOptions));

        let overlays = model.current_overlays_mut().unwrap();
        assert!(overlays.choose_option(MoreOption::AlbumInformation, start));
        assert_eq!(model.top_overlay(), None);
        assert_eq!(model.current_screen(), Screen::Feed);

        model.tick(start + Duration::from_millis(150));
        assert_eq!(model.current_screen(), Screen::Feed);
        model.tick(start + Duration::from_millis(200));
        assert_eq!(model.current_screen(), Screen::Album);

        let detail = model.album_detail().unwrap();
        assert_eq!(detail.album.featured, video);
        assert_eq!(detail.artist, video.user);
        assert_eq!(model.router().artist(), Some(&video.user));
    }

    #[test]
    fn back_from_album_keeps_artist_then_goes_home() {
        let start = Instant::now();
        let mut model = model(start);
        model.select_artist(Artist::new("Tyla"), start);
        let album = model.artist_profile().unwrap().data.albums[0].clone();

        model.select_album(album, start);
        assert_eq!(model.current_screen(), Screen::Album);
        assert!(model.dismiss_or_back(start));
        assert_eq!(model.current_screen(), Screen::Artist);
        assert_eq!(model.artist_profile().map(|p| p.artist().name.as_str()), Some("Tyla"));

        assert!(model.go_back(start));
        assert_eq!(model.current_screen(), Screen::Home);
        assert!(!model.go_back(start));
    }

    #[test]
    fn slide_transition_runs_and_finishes() {
        let start = Instant::now();
        let mut model = model(start);
        model.select_artist(Artist::new("Tyla"), start);

        assert_eq!(model.screen_offset(Screen::Artist, start), 1.0);
        let mid = model.screen_offset(Screen::Artist, start + Duration::from_millis(250));
        assert!(mid > 0.0 && mid < 1.0);

        run(&mut model, start, 600);
        assert!(model.ui_state.transition.is_none());
        assert_eq!(model.screen_offset(Screen::Artist, start), 0.0);
        assert_eq!(model.screen_offset(Screen::Home, start), -1.0);
    }

    #[test]
    fn feed_pauses_when_screen_leaves() {
        let start = Instant::now();
        let mut model = model(start);
        let rock = model.catalog().genre("rock").cloned().unwrap();
        model.select_genre(&rock, start);
        model.tick(start);

        let playing = |model: &AppModel| {
            model
                .feed()
                .and_then(|f| f.focused_feed())
                .is_some_and(|f| f.items().iter().any(|i| i.media().is_playing()))
        };
        assert!(playing(&model));

        model.feed_action(FeedAction::Artist, start);
        assert_eq!(model.current_screen(), Screen::Artist);
        model.tick(start + Duration::from_millis(50));
        assert!(!playing(&model));
    }

    #[test]
    fn now_playing_bar_shrinks_content_and_opens_single() {
        let start = Instant::now();
        let mut model = model(start);
        assert_eq!(model.content_size(), (80, 29));

        let song = model.catalog().chart[0].song.clone();
        model.play_song(song.clone(), start);
        assert_eq!(model.content_size(), (80, 26));

        assert!(model.open_now_playing_album(start));
        assert_eq!(model.album_detail().map(|d| d.album.id.clone()), Some(format!("{}-album", song.id)));
    }

    #[test]
    fn overlay_links_navigate_and_close() {
        let start = Instant::now();
        let mut model = model(start);
        let jazz = model.catalog().genre("jazz").cloned().unwrap();
        model.select_genre(&jazz, start);
        let video = model.feed().and_then(|f| f.focused_video()).cloned().unwrap();

        model.feed_action(FeedAction::MusicPlayer, start);
        assert_eq!(model.top_overlay(), Some(OverlayKind::MusicPlayer));
        model.overlay_action(OverlayAction::OpenArtist, start);

        assert_eq!(model.current_screen(), Screen::Artist);
        assert_eq!(model.router().artist(), Some(&video.user));
        assert!(model.feed().is_some_and(|f| f.overlays.top().is_none()));
    }

    #[test]
    fn share_shows_toast() {
        let start = Instant::now();
        let mut model = model(start);
        model.select_artist_feed(Artist::new("WOODZ"), start);
        model.feed_action(FeedAction::Share, start);
        let toast = model.current_overlays().and_then(|o| o.toast()).map(|t| t.message.clone());
        assert_eq!(toast.as_deref(), Some(SHARE_TOAST));
    }

    #[test]
    fn errors_clear_after_timeout() {
        let start = Instant::now();
        let mut model = model(start);
        model.set_error("invalid config".to_string(), start);
        model.tick(start + Duration::from_secs(3));
        assert!(model.has_error());
        model.tick(start + Duration::from_secs(6));
        assert!(!model.has_error());
    }
}
