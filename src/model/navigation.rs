//! Top-level navigation state
//!
//! The four mutually exclusive screens are one tagged union, so combinations
//! like "genre and artist feed at once" or "album without artist" cannot be
//! represented.

use std::sync::Arc;

use super::content::Catalog;
use super::types::{Album, Artist, Genre, VideoItem};

/// Artist used when an album's owner cannot be found in any known feed
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Which vertical feed the feed screen shows
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeedSelection {
    /// Dual-axis genre pager, starting at this genre id
    Genre(String),
    /// Single feed of one artist's videos
    ArtistFeed(Artist),
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum NavigationState {
    #[default]
    Home,
    Feed(FeedSelection),
    Artist {
        artist: Artist,
        /// Feed kept underneath after backing out of an album
        underlying: Option<FeedSelection>,
    },
    Album {
        artist: Artist,
        album: Album,
        /// Feed that was showing when the album opened; kept so the feed
        /// screen stays mounted underneath
        underlying: Option<FeedSelection>,
    },
}

/// Horizontal placement of a screen relative to the viewport
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenPosition {
    Left,
    Center,
    Right,
}

impl ScreenPosition {
    /// Column offset as a multiple of the viewport width
    pub fn factor(self) -> i32 {
        match self {
            ScreenPosition::Left => -1,
            ScreenPosition::Center => 0,
            ScreenPosition::Right => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenPositions {
    pub home: ScreenPosition,
    pub feed: ScreenPosition,
    pub artist: ScreenPosition,
    pub album: ScreenPosition,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Screen {
    Home,
    Feed,
    Artist,
    Album,
}

pub struct Router {
    state: NavigationState,
    now_playing: Option<VideoItem>,
    catalog: Arc<Catalog>,
}

impl Router {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            state: NavigationState::Home,
            now_playing: None,
            catalog,
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn now_playing(&self) -> Option<&VideoItem> {
        self.now_playing.as_ref()
    }

    pub fn select_genre(&mut self, genre: &Genre) {
        tracing::debug!(genre = %genre.id, "Navigation: select genre");
        self.state = NavigationState::Feed(FeedSelection::Genre(genre.id.clone()));
    }

    pub fn select_artist(&mut self, artist: Artist) {
        tracing::debug!(artist = %artist.name, "Navigation: select artist");
        self.state = NavigationState::Artist {
            artist,
            underlying: None,
        };
    }

    pub fn select_artist_feed(&mut self, artist: Artist) {
        tracing::debug!(artist = %artist.name, "Navigation: select artist feed");
        self.state = NavigationState::Feed(FeedSelection::ArtistFeed(artist));
    }

    /// Shows an album. The current artist is kept when one is set; otherwise
    /// the owner of the featured item is looked up in the catalog and in the
    /// current artist feed.
    pub fn select_album(&mut self, album: Album) {
        let previous = std::mem::take(&mut self.state);
        let (current_artist, underlying) = match previous {
            NavigationState::Home => (None, None),
            NavigationState::Feed(selection) => (None, Some(selection)),
            NavigationState::Artist { artist, underlying }
            | NavigationState::Album {
                artist, underlying, ..
            } => (Some(artist), underlying),
        };

        let artist = match current_artist {
            Some(artist) => artist,
            None => self.infer_artist(&album, underlying.as_ref()),
        };

        tracing::debug!(album = %album.id, artist = %artist.name, "Navigation: select album");
        self.state = NavigationState::Album {
            artist,
            album,
            underlying,
        };
    }

    fn infer_artist(&self, album: &Album, feed: Option<&FeedSelection>) -> Artist {
        let featured_id = &album.featured.id;
        if let Some(video) = self.catalog.find_video(featured_id) {
            return video.user.clone();
        }
        if let Some(FeedSelection::ArtistFeed(feed_artist)) = feed {
            let feed_videos = self.catalog.artist_feed_videos(&feed_artist.name);
            if let Some(video) = feed_videos.iter().find(|v| &v.id == featured_id) {
                return video.user.clone();
            }
        }

        tracing::debug!(album = %album.id, "Artist inference missed, using fallback");
        Artist::new(album.artist_name.as_deref().unwrap_or(UNKNOWN_ARTIST))
    }

    /// Returns false when already at home
    pub fn go_back(&mut self) -> bool {
        let previous = std::mem::take(&mut self.state);
        self.state = match previous {
            NavigationState::Album {
                artist, underlying, ..
            } => NavigationState::Artist { artist, underlying },
            // Artist profiles always return home, never to the feed that led there
            NavigationState::Artist { .. } => NavigationState::Home,
            NavigationState::Feed(_) => NavigationState::Home,
            NavigationState::Home => {
                return false;
            }
        };
        tracing::debug!(state = ?self.current_screen(), "Navigation: back");
        true
    }

    pub fn play_song(&mut self, video: VideoItem) {
        tracing::debug!(song = %video.song, "Now playing");
        self.now_playing = Some(video);
    }

    /// Opens the Single album of the now-playing song, if any
    pub fn open_now_playing_album(&mut self) -> bool {
        match self.now_playing.as_ref().map(Album::single) {
            Some(album) => {
                self.select_album(album);
                true
            }
            None => false,
        }
    }

    pub fn current_screen(&self) -> Screen {
        match self.state {
            NavigationState::Home => Screen::Home,
            NavigationState::Feed(_) => Screen::Feed,
            NavigationState::Artist { .. } => Screen::Artist,
            NavigationState::Album { .. } => Screen::Album,
        }
    }

    /// Genre id of the genre pager, if it is the selected feed
    pub fn genre(&self) -> Option<&str> {
        match &self.state {
            NavigationState::Feed(FeedSelection::Genre(id))
            | NavigationState::Artist {
                underlying: Some(FeedSelection::Genre(id)),
                ..
            }
            | NavigationState::Album {
                underlying: Some(FeedSelection::Genre(id)),
                ..
            } => Some(id.as_str()),
            _ => None,
        }
    }

    pub fn artist_feed(&self) -> Option<&Artist> {
        match &self.state {
            NavigationState::Feed(FeedSelection::ArtistFeed(artist))
            | NavigationState::Artist {
                underlying: Some(FeedSelection::ArtistFeed(artist)),
                ..
            }
            | NavigationState::Album {
                underlying: Some(FeedSelection::ArtistFeed(artist)),
                ..
            } => Some(artist),
            _ => None,
        }
    }

    pub fn artist(&self) -> Option<&Artist> {
        match &self.state {
            NavigationState::Artist { artist, .. } | NavigationState::Album { artist, .. } => {
                Some(artist)
            }
            _ => None,
        }
    }

    pub fn album(&self) -> Option<&Album> {
        match &self.state {
            NavigationState::Album { album, .. } => Some(album),
            _ => None,
        }
    }

    /// Where each screen sits in the sliding strip
    pub fn screen_positions(&self) -> ScreenPositions {
        use ScreenPosition::*;
        let has_feed = self.genre().is_some() || self.artist_feed().is_some();
        match self.current_screen() {
            Screen::Home => ScreenPositions {
                home: Center,
                feed: Right,
                artist: Right,
                album: Right,
            },
            Screen::Feed => ScreenPositions {
                home: Left,
                feed: Center,
                artist: Right,
                album: Right,
            },
            Screen::Artist => ScreenPositions {
                home: Left,
                feed: if has_feed { Left } else { Right },
                artist: Center,
                album: Right,
            },
            Screen::Album => ScreenPositions {
                home: Left,
                feed: if has_feed { Left } else { Right },
                artist: Left,
                album: Center,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::content::ContentProvider;

    fn router() -> Router {
        Router::new(Arc::new(Catalog::generate(ContentProvider::new(11))))
    }

    fn assert_invariants(router: &Router) {
        assert!(!(router.genre().is_some() && router.artist_feed().is_some()));
        if router.album().is_some() {
            assert!(router.artist().is_some());
        }
    }

    #[test]
    fn selections_replace_each_other() {
        let mut router = router();
        let rock = router.catalog.genre("rock").cloned().unwrap();

        router.select_genre(&rock);
        assert_eq!(router.genre(), Some("rock"));
        assert_invariants(&router);

        router.select_artist(Artist::new("Tyla"));
        assert_eq!(router.genre(), None);
        assert_eq!(router.artist().map(|a| a.name.as_str()), Some("Tyla"));
        assert_invariants(&router);

        router.select_artist_feed(Artist::new("Tyla"));
        assert_eq!(router.artist(), None);
        assert!(router.artist_feed().is_some());
        assert_invariants(&router);

        router.select_genre(&rock);
        assert_eq!(router.artist_feed(), None);
        assert_invariants(&router);
    }

    #[derive(Clone, Copy, Debug)]
    enum Step {
        Genre,
        Artist,
        ArtistFeed,
        KnownAlbum,
        StrayAlbum,
        Back,
    }

    const STEPS: [Step; 6] = [
        Step::Genre,
        Step::Artist,
        Step::ArtistFeed,
        Step::KnownAlbum,
        Step::StrayAlbum,
        Step::Back,
    ];

    fn apply(router: &mut Router, step: Step) {
        let catalog = router.catalog.clone();
        match step {
            Step::Genre => {
                router.select_genre(&catalog.genres[2]);
                assert!(router.genre().is_some());
                assert!(router.artist().is_none());
            }
            Step::Artist => {
                router.select_artist(Artist::new("Tyla"));
                assert!(router.genre().is_none() && router.artist_feed().is_none());
                assert!(router.album().is_none());
            }
            Step::ArtistFeed => {
                router.select_artist_feed(Artist::new("WOODZ"));
                assert!(router.genre().is_none() && router.artist().is_none());
            }
            Step::KnownAlbum => {
                router.select_album(Album::single(&catalog.genres[1].videos[0]));
                assert!(router.album().is_some());
            }
            Step::StrayAlbum => {
                let mut stray = catalog.genres[0].videos[0].clone();
                stray.id = crate::model::types::VideoId("nowhere-7".to_string());
                let mut album = Album::single(&stray);
                album.artist_name = None;
                router.select_album(album);
                assert!(router.album().is_some());
            }
            Step::Back => {
                let artist_before = router.artist().cloned();
                let had_album = router.album().is_some();
                router.go_back();
                assert!(router.album().is_none());
                if had_album {
                    assert_eq!(router.artist().cloned(), artist_before);
                } else {
                    assert!(router.artist().is_none());
                }
            }
        }
    }

    #[test]
    fn every_short_selection_sequence_keeps_invariants() {
        let catalog = Arc::new(Catalog::generate(ContentProvider::new(11)));
        let mut sequences: Vec<Vec<Step>> = vec![Vec::new()];
        for _ in 0..4 {
            sequences = sequences
                .iter()
                .flat_map(|seq| {
                    STEPS.iter().map(move |step| {
                        let mut next = seq.clone();
                        next.push(*step);
                        next
                    })
                })
                .collect();

            for seq in &sequences {
                let mut router = Router::new(catalog.clone());
                for step in seq {
                    apply(&mut router, *step);
                    assert_invariants(&router);
                }
            }
        }
    }

    #[test]
    fn album_infers_artist_from_catalog() {
        let mut router = router();
        let jazz = router.catalog.genre("jazz").cloned().unwrap();
        router.select_genre(&jazz);

        let video = jazz.videos[3].clone();
        router.select_album(Album::single(&video));

        assert_eq!(router.current_screen(), Screen::Album);
        assert_eq!(router.artist(), Some(&video.user));
        assert_eq!(router.genre(), Some("jazz"));
        assert_invariants(&router);
    }

    #[test]
    fn album_infers_artist_from_artist_feed() {
        let mut router = router();
        router.select_artist_feed(Artist::new("Davichi"));
        let feed = router.catalog.artist_feed_videos("Davichi");

        router.select_album(Album::single(&feed[2]));
        assert_eq!(router.artist().map(|a| a.name.as_str()), Some("Davichi"));
        assert_invariants(&router);
    }

    #[test]
    fn album_keeps_current_artist() {
        let mut router = router();
        router.select_artist(Artist::new("WOODZ"));
        let other = router.catalog.genres[0].videos[0].clone();

        router.select_album(Album::single(&other));
        assert_eq!(router.artist().map(|a| a.name.as_str()), Some("WOODZ"));
    }

    #[test]
    fn inference_miss_uses_fallback_artist() {
        let mut router = router();
        let mut stray = router.catalog.genres[0].videos[0].clone();
        stray.id = crate::model::types::VideoId("nowhere-1".to_string());
        let mut album = Album::single(&stray);
        album.artist_name = None;

        router.select_album(album);
        assert_eq!(router.artist().map(|a| a.name.as_str()), Some(UNKNOWN_ARTIST));
        assert_invariants(&router);
    }

    #[test]
    fn go_back_precedence() {
        let mut router = router();
        let rock = router.catalog.genre("rock").cloned().unwrap();
        router.select_genre(&rock);
        router.select_album(Album::single(&rock.videos[0]));

        assert!(router.go_back());
        assert_eq!(router.current_screen(), Screen::Artist);
        assert!(router.artist().is_some());
        assert_eq!(router.genre(), Some("rock"));
        assert_eq!(router.album(), None);

        assert!(router.go_back());
        assert_eq!(router.current_screen(), Screen::Home);
        assert_eq!(router.genre(), None);
        assert_eq!(router.artist_feed(), None);

        assert!(!router.go_back());
    }

    #[test]
    fn feed_back_goes_home() {
        let mut router = router();
        router.select_artist_feed(Artist::new("Tyla"));
        assert!(router.go_back());
        assert_eq!(router.state(), &NavigationState::Home);
    }

    #[test]
    fn now_playing_bar_opens_single() {
        let mut router = router();
        assert!(!router.open_now_playing_album());

        let video = router.catalog.chart[0].song.clone();
        router.play_song(video.clone());
        assert!(router.open_now_playing_album());
        assert_eq!(router.album().map(|a| a.id.clone()), Some(format!("{}-album", video.id)));
    }

    #[test]
    fn screen_positions_follow_state() {
        let mut router = router();
        assert_eq!(router.screen_positions().home, ScreenPosition::Center);

        router.select_artist(Artist::new("Tyla"));
        let positions = router.screen_positions();
        assert_eq!(positions.home, ScreenPosition::Left);
        assert_eq!(positions.artist, ScreenPosition::Center);
        assert_eq!(positions.album, ScreenPosition::Right);
    }
}
