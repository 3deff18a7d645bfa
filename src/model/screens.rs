//! Per-screen state: cursors, derived data and each screen's overlays

use std::time::Instant;

use crate::config::Timings;

use super::content::{ARTIST_FEED_LEN, Catalog, ContentProvider, RECOMMENDATION_COUNT};
use super::feed::FeedScroller;
use super::genre_feed::GenreFeed;
use super::navigation::FeedSelection;
use super::overlay::OverlayStack;
use super::types::{Album, Artist, Genre, Track, VideoId, VideoItem};

/// A request a screen hands back to the app model
#[derive(Clone, Debug, PartialEq)]
pub enum ScreenAction {
    SelectGenre(Genre),
    SelectArtist(Artist),
    SelectArtistFeed(Artist),
    SelectAlbum(Album),
    PlaySong(VideoItem),
    OpenMusicPlayer(VideoItem),
    OpenVideoPlayer(VideoItem),
}

fn step(cursor: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        0
    } else if forward {
        (cursor + 1).min(len - 1)
    } else {
        cursor.saturating_sub(1)
    }
}

// ============================================================================
// Home
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HomeSection {
    LatestMusic,
    Chart,
    ShortMusic,
    HotTrend,
    Genres,
    MoodPlay,
    DjPick,
    Magazine,
}

impl HomeSection {
    pub const ALL: [HomeSection; 8] = [
        HomeSection::LatestMusic,
        HomeSection::Chart,
        HomeSection::ShortMusic,
        HomeSection::HotTrend,
        HomeSection::Genres,
        HomeSection::MoodPlay,
        HomeSection::DjPick,
        HomeSection::Magazine,
    ];

    pub fn title(self) -> &'static str {
        match self {
            HomeSection::LatestMusic => "Latest Music",
            HomeSection::Chart => "Chart",
            HomeSection::ShortMusic => "Today's Short Music",
            HomeSection::HotTrend => "HOT TREND 50",
            HomeSection::Genres => "Genres",
            HomeSection::MoodPlay => "Mood Play",
            HomeSection::DjPick => "Power DJ Pick",
            HomeSection::Magazine => "Trendy Music News Magazine",
        }
    }

    pub fn len(self, catalog: &Catalog) -> usize {
        match self {
            HomeSection::LatestMusic => catalog.latest_albums.len(),
            HomeSection::Chart => catalog.chart.len(),
            HomeSection::ShortMusic => catalog.short_videos.len(),
            HomeSection::HotTrend => catalog.hot_trend.len(),
            HomeSection::Genres => catalog.genres.len(),
            HomeSection::MoodPlay => catalog.mood_playlists.len(),
            HomeSection::DjPick => catalog.dj_picks.len(),
            HomeSection::Magazine => catalog.magazine.len(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct HomeScreen {
    section: usize,
    cursors: [usize; HomeSection::ALL.len()],
}

impl HomeScreen {
    pub fn section(&self) -> HomeSection {
        HomeSection::ALL[self.section]
    }

    pub fn section_index(&self) -> usize {
        self.section
    }

    pub fn cursor(&self, section: HomeSection) -> usize {
        HomeSection::ALL
            .iter()
            .position(|s| *s == section)
            .map(|i| self.cursors[i])
            .unwrap_or(0)
    }

    pub fn move_section(&mut self, forward: bool) {
        self.section = step(self.section, HomeSection::ALL.len(), forward);
    }

    pub fn move_item(&mut self, forward: bool, catalog: &Catalog) {
        let len = self.section().len(catalog);
        let cursor = &mut self.cursors[self.section];
        *cursor = step(*cursor, len, forward);
    }

    /// Playlists and articles are display-only
    pub fn activate(&self, catalog: &Catalog) -> Option<ScreenAction> {
        let index = self.cursors[self.section];
        match self.section() {
            HomeSection::LatestMusic => catalog
                .latest_albums
                .get(index)
                .cloned()
                .map(ScreenAction::SelectAlbum),
            HomeSection::Chart => catalog
                .chart
                .get(index)
                .map(|entry| ScreenAction::PlaySong(entry.song.clone())),
            HomeSection::ShortMusic => {
                let video = catalog.short_videos.get(index)?;
                let genre = video
                    .genre_name
                    .as_deref()
                    .and_then(|name| catalog.genre_by_name(name))
                    .or_else(|| catalog.genres.first())?;
                Some(ScreenAction::SelectGenre(genre.clone()))
            }
            HomeSection::HotTrend => catalog
                .hot_trend
                .get(index)
                .cloned()
                .map(ScreenAction::PlaySong),
            HomeSection::Genres => catalog
                .genres
                .get(index)
                .cloned()
                .map(ScreenAction::SelectGenre),
            HomeSection::MoodPlay | HomeSection::DjPick | HomeSection::Magazine => None,
        }
    }
}

// ============================================================================
// Feed screen
// ============================================================================

pub enum FeedKind {
    Genre(GenreFeed),
    Artist { artist: Artist, feed: FeedScroller },
}

pub struct FeedScreen {
    pub key: FeedSelection,
    pub kind: FeedKind,
    pub overlays: OverlayStack,
}

impl FeedScreen {
    pub fn mount(selection: FeedSelection, catalog: &Catalog, timings: Timings, now: Instant) -> Self {
        let kind = match &selection {
            FeedSelection::Genre(genre_id) => FeedKind::Genre(GenreFeed::new(catalog, genre_id, timings, now)),
            FeedSelection::ArtistFeed(artist) => {
                let videos = catalog.artist_feed_videos(&artist.name);
                let recommendations = catalog
                    .provider()
                    .shuffled(&format!("artist-recommend:{}", artist.name), &catalog.all_videos().cloned().collect::<Vec<_>>())
                    .into_iter()
                    .take(RECOMMENDATION_COUNT)
                    .collect();
                let feed = FeedScroller::new(videos, recommendations, timings.page_scroll, now)
                    .with_scroll_hint(timings.scroll_hint, now);
                tracing::debug!(artist = %artist.name, "Artist feed mounted");
                FeedKind::Artist {
                    artist: artist.clone(),
                    feed,
                }
            }
        };
        Self {
            key: selection,
            kind,
            overlays: OverlayStack::new(timings.overlay_sequence_delay, timings.toast),
        }
    }

    /// The vertical feed under the pointer / keyboard
    pub fn focused_feed(&self) -> Option<&FeedScroller> {
        match &self.kind {
            FeedKind::Genre(pager) => pager.current_feed(),
            FeedKind::Artist { feed, .. } => Some(feed),
        }
    }

    pub fn focused_feed_mut(&mut self) -> Option<&mut FeedScroller> {
        match &mut self.kind {
            FeedKind::Genre(pager) => pager.current_feed_mut(),
            FeedKind::Artist { feed, .. } => Some(feed),
        }
    }

    pub fn focused_video(&self) -> Option<&VideoItem> {
        self.focused_feed()
            .and_then(|feed| feed.focused_item())
            .map(|item| &item.video)
    }

    pub fn resize(&mut self, width: u16, height: u16, now: Instant) {
        match &mut self.kind {
            FeedKind::Genre(pager) => pager.resize(width, height, now),
            FeedKind::Artist { feed, .. } => feed.resize(height, now),
        }
    }

    pub fn tick(&mut self, active: bool, autoplay: bool, now: Instant) {
        match &mut self.kind {
            FeedKind::Genre(pager) => pager.tick(active, autoplay, now),
            FeedKind::Artist { feed, .. } => {
                feed.tick(now);
                feed.apply_focus(active, autoplay, now);
            }
        }
    }

    /// Tap on the recommendations panel: forwards to genre selection
    pub fn activate_recommendation(&self, catalog: &Catalog) -> Option<ScreenAction> {
        let feed = self.focused_feed()?;
        if !feed.on_recommendations() {
            return None;
        }
        let video = feed.recommendation(feed.selected_recommendation())?;
        let genre = catalog.genre_by_name(video.genre_name.as_deref()?)?;
        Some(ScreenAction::SelectGenre(genre.clone()))
    }
}

// ============================================================================
// Artist profile
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PopularTrack {
    pub video: VideoItem,
    pub plays: u32,
}

/// Everything the profile shows, derived from the artist name
#[derive(Clone, Debug)]
pub struct ArtistData {
    pub artist: Artist,
    pub videos: Vec<VideoItem>,
    pub popular_tracks: Vec<PopularTrack>,
    pub albums: Vec<Album>,
    pub related: Vec<Artist>,
}

impl ArtistData {
    pub fn derive(artist: Artist, provider: &ContentProvider) -> Self {
        let name = artist.name.clone();
        let videos = provider.generate_artist_videos(&name, ARTIST_FEED_LEN);

        let plays = provider.generate_play_counts(&name, 5);
        let popular_tracks = videos
            .iter()
            .take(5)
            .zip(plays)
            .enumerate()
            .map(|(i, (video, plays))| PopularTrack {
                video: VideoItem {
                    id: VideoId(format!("{}-popular", video.id)),
                    description: format!("Popular track #{}", i + 1),
                    ..video.clone()
                },
                plays,
            })
            .collect();

        let album = |n: usize, title: &str, year: i32, featured: &VideoItem, tracks: Vec<Track>| Album {
            id: format!("{}-album-{}", name, n),
            title: title.to_string(),
            year,
            image_url: format!("https://picsum.photos/seed/{}album{}/400/400", name, n),
            artist_name: Some(name.clone()),
            featured: featured.clone(),
            tracks,
        };
        let tracks = |count: usize, label: &str, duration: &str| -> Vec<Track> {
            (0..count)
                .map(|i| Track {
                    id: format!("t{}", i),
                    title: format!("{} {}", label, i + 1),
                    duration: duration.to_string(),
                })
                .collect()
        };
        let albums = match (videos.first(), videos.get(1)) {
            (Some(first), Some(second)) => vec![
                album(1, "Summer Vibes", 2023, first, tracks(8, "Track", "3:00")),
                album(2, "Midnight Drive", 2021, second, tracks(10, "Song", "2:45")),
            ],
            _ => Vec::new(),
        };

        let clean: String = name.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
        let related = (0..5)
            .map(|i| Artist {
                name: format!("@{}_related{}", clean, i + 1),
                avatar_url: format!("https://picsum.photos/seed/{}related{}/96/96", clean, i),
            })
            .collect();

        Self {
            artist,
            videos,
            popular_tracks,
            albums,
            related,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtistSection {
    VideoFeed,
    PopularTracks,
    Albums,
    MusicVideos,
    RelatedArtists,
}

impl ArtistSection {
    pub const ALL: [ArtistSection; 5] = [
        ArtistSection::VideoFeed,
        ArtistSection::PopularTracks,
        ArtistSection::Albums,
        ArtistSection::MusicVideos,
        ArtistSection::RelatedArtists,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ArtistSection::VideoFeed => "Watch Video Feed",
            ArtistSection::PopularTracks => "Popular",
            ArtistSection::Albums => "Albums",
            ArtistSection::MusicVideos => "Music Videos",
            ArtistSection::RelatedArtists => "Fans also like",
        }
    }
}

pub struct ArtistProfile {
    pub data: ArtistData,
    pub overlays: OverlayStack,
    section: usize,
    cursors: [usize; ArtistSection::ALL.len()],
}

impl ArtistProfile {
    pub fn mount(artist: Artist, provider: &ContentProvider, timings: Timings) -> Self {
        tracing::debug!(artist = %artist.name, "Artist profile mounted");
        Self {
            data: ArtistData::derive(artist, provider),
            overlays: OverlayStack::new(timings.overlay_sequence_delay, timings.toast),
            section: 0,
            cursors: [0; ArtistSection::ALL.len()],
        }
    }

    pub fn artist(&self) -> &Artist {
        &self.data.artist
    }

    pub fn section(&self) -> ArtistSection {
        ArtistSection::ALL[self.section]
    }

    pub fn cursor(&self, section: ArtistSection) -> usize {
        ArtistSection::ALL
            .iter()
            .position(|s| *s == section)
            .map(|i| self.cursors[i])
            .unwrap_or(0)
    }

    fn section_len(&self, section: ArtistSection) -> usize {
        match section {
            ArtistSection::VideoFeed => 1,
            ArtistSection::PopularTracks => self.data.popular_tracks.len(),
            ArtistSection::Albums => self.data.albums.len(),
            ArtistSection::MusicVideos => self.data.videos.len(),
            ArtistSection::RelatedArtists => self.data.related.len(),
        }
    }

    pub fn move_section(&mut self, forward: bool) {
        self.section = step(self.section, ArtistSection::ALL.len(), forward);
    }

    pub fn move_item(&mut self, forward: bool) {
        let len = self.section_len(self.section());
        let cursor = &mut self.cursors[self.section];
        *cursor = step(*cursor, len, forward);
    }

    pub fn activate(&self) -> Option<ScreenAction> {
        let index = self.cursors[self.section];
        match self.section() {
            ArtistSection::VideoFeed => Some(ScreenAction::SelectArtistFeed(self.data.artist.clone())),
            ArtistSection::PopularTracks => self
                .data
                .popular_tracks
                .get(index)
                .map(|track| ScreenAction::OpenMusicPlayer(track.video.clone())),
            ArtistSection::Albums => self.data.albums.get(index).cloned().map(ScreenAction::SelectAlbum),
            ArtistSection::MusicVideos => self
                .data
                .videos
                .get(index)
                .cloned()
                .map(ScreenAction::OpenVideoPlayer),
            ArtistSection::RelatedArtists => self
                .data
                .related
                .get(index)
                .cloned()
                .map(ScreenAction::SelectArtist),
        }
    }
}

// ============================================================================
// Album detail
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlbumRow {
    Artist,
    FeaturedVideo,
    PlayFeatured,
    Track(usize),
}

pub struct AlbumDetail {
    pub artist: Artist,
    pub album: Album,
    pub overlays: OverlayStack,
    cursor: usize,
}

impl AlbumDetail {
    pub fn mount(artist: Artist, album: Album, timings: Timings) -> Self {
        tracing::debug!(album = %album.id, tracks = album.tracks.len(), "Album detail mounted");
        Self {
            artist,
            album,
            overlays: OverlayStack::new(timings.overlay_sequence_delay, timings.toast),
            cursor: 0,
        }
    }

    pub fn rows(&self) -> Vec<AlbumRow> {
        let mut rows = vec![AlbumRow::Artist, AlbumRow::FeaturedVideo, AlbumRow::PlayFeatured];
        rows.extend((0..self.album.tracks.len()).map(AlbumRow::Track));
        rows
    }

    pub fn selected_row(&self) -> AlbumRow {
        self.rows().get(self.cursor).copied().unwrap_or(AlbumRow::Artist)
    }

    pub fn move_cursor(&mut self, forward: bool) {
        self.cursor = step(self.cursor, self.rows().len(), forward);
    }

    /// Player item for track `index`, labelled "{track} - {artist}"
    pub fn track_video(&self, index: usize, provider: &ContentProvider) -> Option<VideoItem> {
        let track = self.album.tracks.get(index)?;
        let song = format!("{} - {}", track.title, self.artist.name);
        Some(VideoItem {
            id: VideoId(format!("{}-{}", self.album.id, track.id)),
            user: self.artist.clone(),
            description: format!("From the album: {}", self.album.title),
            image_url: self.album.image_url.clone(),
            video_url: self.album.featured.video_url.clone(),
            likes: self.album.featured.likes,
            comments: self.album.featured.comments,
            genre_name: Some("Album Track".to_string()),
            song_details: provider.generate_song_details(&song),
            song,
        })
    }

    pub fn activate(&self, provider: &ContentProvider) -> Option<ScreenAction> {
        match self.selected_row() {
            AlbumRow::Artist => Some(ScreenAction::SelectArtist(self.artist.clone())),
            AlbumRow::FeaturedVideo => Some(ScreenAction::SelectArtistFeed(self.album.featured.user.clone())),
            AlbumRow::PlayFeatured => Some(ScreenAction::OpenMusicPlayer(self.album.featured.clone())),
            AlbumRow::Track(index) => self
                .track_video(index, provider)
                .map(ScreenAction::OpenMusicPlayer),
        }
    }
}
