//! Model module - Application state and data types
//!
//! Everything here is synchronous and driven by explicit `Instant`s, so the
//! controller owns the clock and tests can step time by hand.
//!
//! - `types`: Domain records (videos, artists, albums, charts)
//! - `content`: Seeded mock content and the catalog built from it
//! - `playback`: Per-item media state and the seek bar
//! - `animation`: Eased scroll animations
//! - `swipe`: Axis-locking horizontal swipe state machine
//! - `feed`: Vertical snap-scrolling feed with single-focus playback
//! - `genre_feed`: Horizontal genre pager with settle detection
//! - `overlay`: Per-screen overlay stack and deferred transitions
//! - `navigation`: Router state machine and screen positions
//! - `screens`: Home, feed, artist and album screen state
//! - `app_model`: Main application model tying the screens together

mod types;
mod content;
mod playback;
mod animation;
mod swipe;
mod feed;
mod genre_feed;
mod overlay;
mod navigation;
mod screens;
mod app_model;

pub use types::{Album, Artist, ChartMovement, Comment, Genre, SongDetails, VideoItem};

pub use content::Catalog;

pub use playback::{MediaPlayback, PlaybackStatus};

pub use swipe::SwipeEnd;

pub use feed::FeedScroller;

pub use genre_feed::GenreFeed;

pub use overlay::{MoreOption, OverlayKind, OverlayStack};

pub use navigation::Screen;

pub use screens::{
    AlbumDetail, AlbumRow, ArtistProfile, ArtistSection, FeedKind, FeedScreen, HomeScreen,
    HomeSection,
};

pub use app_model::{AppModel, FeedAction, OverlayAction, UiState, NOW_PLAYING_HEIGHT, STATUS_HEIGHT};
