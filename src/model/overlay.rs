//! Overlay stack of one screen
//!
//! Each overlay kind is an optional slot holding the item that opened it.
//! The only chained transition, options sheet -> song info / album / toast,
//! is a close followed by a deferred open fired from `tick`.

use std::time::{Duration, Instant};

use super::content::ContentProvider;
use super::playback::{MediaPlayback, PLAYER_TRACK_MS, PlayRequest};
use super::types::{Album, Comment, VideoItem};

/// Most comments a sheet will load
pub const MAX_COMMENTS: u32 = 25;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    MusicPlayer,
    VideoPlayer,
    Comments,
    MoreOptions,
    SongInfo,
}

/// Entries of the options sheet, in display order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoreOption {
    AddToPlaylist,
    PlayMix,
    SimilarSongs,
    SongInformation,
    AlbumInformation,
    DoNotPlay,
    ExcludeFromProfile,
}

impl MoreOption {
    pub const ALL: [MoreOption; 7] = [
        MoreOption::AddToPlaylist,
        MoreOption::PlayMix,
        MoreOption::SimilarSongs,
        MoreOption::SongInformation,
        MoreOption::AlbumInformation,
        MoreOption::DoNotPlay,
        MoreOption::ExcludeFromProfile,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MoreOption::AddToPlaylist => "Put it on my playlist",
            MoreOption::PlayMix => "Play the mix-up with this song",
            MoreOption::SimilarSongs => "View similar songs",
            MoreOption::SongInformation => "Song information",
            MoreOption::AlbumInformation => "Album information",
            MoreOption::DoNotPlay => "Do not play this video",
            MoreOption::ExcludeFromProfile => "Exclude videos from my preference profile",
        }
    }

    fn toast(self) -> Option<&'static str> {
        match self {
            MoreOption::AddToPlaylist => Some("Added to your playlist"),
            MoreOption::PlayMix => Some("Creating a mix..."),
            MoreOption::SimilarSongs => Some("Finding similar songs..."),
            MoreOption::DoNotPlay => Some("This video will be shown less"),
            MoreOption::ExcludeFromProfile => Some("Video excluded from your profile"),
            MoreOption::SongInformation | MoreOption::AlbumInformation => None,
        }
    }
}

pub const SHARE_TOAST: &str = "Link copied to clipboard!";

#[derive(Clone, Debug)]
pub struct PlayerOverlay {
    pub video: VideoItem,
    pub media: MediaPlayback,
}

#[derive(Clone, Debug)]
pub struct CommentsOverlay {
    pub video: VideoItem,
    pub comments: Vec<Comment>,
    pub scroll: usize,
}

#[derive(Clone, Debug)]
pub struct MoreOptionsOverlay {
    pub video: VideoItem,
    pub cursor: usize,
}

impl MoreOptionsOverlay {
    pub fn selected(&self) -> MoreOption {
        MoreOption::ALL[self.cursor.min(MoreOption::ALL.len() - 1)]
    }
}

#[derive(Clone, Debug)]
pub struct SongInfoOverlay {
    pub video: VideoItem,
    pub lyrics_expanded: bool,
}

impl SongInfoOverlay {
    pub fn visible_lyrics(&self) -> &str {
        if self.lyrics_expanded {
            &self.video.song_details.lyrics
        } else {
            self.video.song_details.short_lyrics()
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub message: String,
    expires: Instant,
}

#[derive(Clone, Debug, PartialEq)]
enum DeferredAction {
    ShowSongInfo(VideoItem),
    OpenAlbum(Album),
    Toast(&'static str),
}

#[derive(Clone, Debug, PartialEq)]
struct Deferred {
    due: Instant,
    action: DeferredAction,
}

/// Something the owning screen must forward to the router
#[derive(Clone, Debug, PartialEq)]
pub enum OverlayEffect {
    SelectAlbum(Album),
}

pub struct OverlayStack {
    music_player: Option<PlayerOverlay>,
    video_player: Option<PlayerOverlay>,
    comments: Option<CommentsOverlay>,
    more_options: Option<MoreOptionsOverlay>,
    song_info: Option<SongInfoOverlay>,
    toast: Option<Toast>,
    pending: Option<Deferred>,
    sequence_delay: Duration,
    toast_duration: Duration,
}

impl OverlayStack {
    pub fn new(sequence_delay: Duration, toast_duration: Duration) -> Self {
        Self {
            music_player: None,
            video_player: None,
            comments: None,
            more_options: None,
            song_info: None,
            toast: None,
            pending: None,
            sequence_delay,
            toast_duration,
        }
    }

    pub fn music_player(&self) -> Option<&PlayerOverlay> {
        self.music_player.as_ref()
    }

    pub fn video_player(&self) -> Option<&PlayerOverlay> {
        self.video_player.as_ref()
    }

    pub fn comments(&self) -> Option<&CommentsOverlay> {
        self.comments.as_ref()
    }

    pub fn more_options(&self) -> Option<&MoreOptionsOverlay> {
        self.more_options.as_ref()
    }

    pub fn song_info(&self) -> Option<&SongInfoOverlay> {
        self.song_info.as_ref()
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Topmost open overlay; toasts never take input
    pub fn top(&self) -> Option<OverlayKind> {
        if self.song_info.is_some() {
            Some(OverlayKind::SongInfo)
        } else if self.more_options.is_some() {
            Some(OverlayKind::MoreOptions)
        } else if self.comments.is_some() {
            Some(OverlayKind::Comments)
        } else if self.video_player.is_some() {
            Some(OverlayKind::VideoPlayer)
        } else if self.music_player.is_some() {
            Some(OverlayKind::MusicPlayer)
        } else {
            None
        }
    }

    pub fn is_open(&self, kind: OverlayKind) -> bool {
        match kind {
            OverlayKind::MusicPlayer => self.music_player.is_some(),
            OverlayKind::VideoPlayer => self.video_player.is_some(),
            OverlayKind::Comments => self.comments.is_some(),
            OverlayKind::MoreOptions => self.more_options.is_some(),
            OverlayKind::SongInfo => self.song_info.is_some(),
        }
    }

    /// Opening is a tap, so the player never counts as autoplay
    pub fn open_music_player(&mut self, video: VideoItem, now: Instant) {
        tracing::debug!(video = %video.id, "Overlay open: music player");
        let mut media = MediaPlayback::new(PLAYER_TRACK_MS, now);
        if let Err(error) = media.play(PlayRequest::UserGesture, true, now) {
            tracing::warn!(%error, "Music player did not start");
        }
        self.music_player = Some(PlayerOverlay { video, media });
    }

    pub fn open_video_player(&mut self, video: VideoItem, now: Instant) {
        tracing::debug!(video = %video.id, "Overlay open: video player");
        let mut media = MediaPlayback::new(video.song_details.duration_ms(), now);
        if let Err(error) = media.play(PlayRequest::UserGesture, true, now) {
            tracing::warn!(%error, "Video player did not start");
        }
        self.video_player = Some(PlayerOverlay { video, media });
    }

    pub fn open_comments(&mut self, video: VideoItem, provider: &ContentProvider) {
        let count = video.comments.min(MAX_COMMENTS) as usize;
        tracing::debug!(video = %video.id, count, "Overlay open: comments");
        self.comments = Some(CommentsOverlay {
            comments: provider.generate_comments(count),
            video,
            scroll: 0,
        });
    }

    pub fn open_more_options(&mut self, video: VideoItem) {
        tracing::debug!(video = %video.id, "Overlay open: more options");
        self.more_options = Some(MoreOptionsOverlay { video, cursor: 0 });
    }

    pub fn open_song_info(&mut self, video: VideoItem) {
        tracing::debug!(video = %video.id, "Overlay open: song info");
        self.song_info = Some(SongInfoOverlay {
            video,
            lyrics_expanded: false,
        });
    }

    pub fn show_toast(&mut self, message: impl Into<String>, now: Instant) {
        let message = message.into();
        tracing::debug!(%message, "Toast");
        self.toast = Some(Toast {
            message,
            expires: now + self.toast_duration,
        });
    }

    pub fn close(&mut self, kind: OverlayKind) {
        if !self.is_open(kind) {
            return;
        }
        tracing::debug!(?kind, "Overlay close");
        match kind {
            OverlayKind::MusicPlayer => self.music_player = None,
            OverlayKind::VideoPlayer => self.video_player = None,
            OverlayKind::Comments => self.comments = None,
            OverlayKind::MoreOptions => self.more_options = None,
            OverlayKind::SongInfo => self.song_info = None,
        }
    }

    /// Backdrop / Escape: closes the topmost overlay
    pub fn dismiss_top(&mut self) -> Option<OverlayKind> {
        let top = self.top()?;
        self.close(top);
        Some(top)
    }

    /// Drops every overlay and any pending transition
    pub fn clear(&mut self) {
        self.music_player = None;
        self.video_player = None;
        self.comments = None;
        self.more_options = None;
        self.song_info = None;
        self.toast = None;
        self.pending = None;
    }

    pub fn move_option_cursor(&mut self, forward: bool) {
        if let Some(sheet) = self.more_options.as_mut() {
            let count = MoreOption::ALL.len();
            sheet.cursor = if forward {
                (sheet.cursor + 1) % count
            } else {
                (sheet.cursor + count - 1) % count
            };
        }
    }

    /// Closes the options sheet now and schedules what was chosen
    pub fn choose_option(&mut self, option: MoreOption, now: Instant) -> bool {
        let Some(sheet) = self.more_options.take() else {
            return false;
        };
        let action = match option {
            MoreOption::SongInformation => DeferredAction::ShowSongInfo(sheet.video),
            MoreOption::AlbumInformation => DeferredAction::OpenAlbum(Album::single(&sheet.video)),
            other => match other.toast() {
                Some(message) => DeferredAction::Toast(message),
                None => return true,
            },
        };
        tracing::debug!(?option, "Options sheet closed, next step deferred");
        self.pending = Some(Deferred {
            due: now + self.sequence_delay,
            action,
        });
        true
    }

    pub fn choose_selected_option(&mut self, now: Instant) -> bool {
        match self.more_options.as_ref().map(MoreOptionsOverlay::selected) {
            Some(option) => self.choose_option(option, now),
            None => false,
        }
    }

    pub fn expand_lyrics(&mut self) {
        if let Some(info) = self.song_info.as_mut() {
            info.lyrics_expanded = true;
        }
    }

    pub fn scroll_comments(&mut self, forward: bool) {
        if let Some(sheet) = self.comments.as_mut() {
            let last = sheet.comments.len().saturating_sub(1);
            sheet.scroll = if forward {
                (sheet.scroll + 1).min(last)
            } else {
                sheet.scroll.saturating_sub(1)
            };
        }
    }

    /// Player the keyboard controls: the video player when both are open
    pub fn active_player_mut(&mut self) -> Option<&mut PlayerOverlay> {
        match self.top() {
            Some(OverlayKind::VideoPlayer) => self.video_player.as_mut(),
            Some(OverlayKind::MusicPlayer) => self.music_player.as_mut(),
            _ => None,
        }
    }

    /// Item whose album/artist the topmost overlay links to
    pub fn top_video(&self) -> Option<&VideoItem> {
        match self.top()? {
            OverlayKind::SongInfo => self.song_info.as_ref().map(|o| &o.video),
            OverlayKind::MoreOptions => self.more_options.as_ref().map(|o| &o.video),
            OverlayKind::Comments => self.comments.as_ref().map(|o| &o.video),
            OverlayKind::VideoPlayer => self.video_player.as_ref().map(|o| &o.video),
            OverlayKind::MusicPlayer => self.music_player.as_ref().map(|o| &o.video),
        }
    }

    /// Fires the deferred transition and expires the toast
    pub fn tick(&mut self, now: Instant) -> Vec<OverlayEffect> {
        let mut effects = Vec::new();

        if self.toast.as_ref().is_some_and(|t| now >= t.expires) {
            self.toast = None;
        }

        if self.pending.as_ref().is_some_and(|p| now >= p.due) {
            if let Some(deferred) = self.pending.take() {
                tracing::debug!(action = ?deferred.action, "Deferred overlay transition fired");
                match deferred.action {
                    DeferredAction::ShowSongInfo(video) => self.open_song_info(video),
                    DeferredAction::OpenAlbum(album) => effects.push(OverlayEffect::SelectAlbum(album)),
                    DeferredAction::Toast(message) => self.show_toast(message, now),
                }
            }
        }

        for player in [self.music_player.as_mut(), self.video_player.as_mut()]
            .into_iter()
            .flatten()
        {
            player.media.tick(now);
        }

        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack() -> OverlayStack {
        OverlayStack::new(Duration::from_millis(200), Duration::from_millis(3000))
    }

    fn video() -> VideoItem {
        ContentProvider::new(9).generate_videos("Pop", 1).remove(0)
    }

    #[test]
    fn album_information_is_close_then_open() {
        let start = Instant::now();
        let mut overlays = stack();
        let video = video();

        overlays.open_more_options(video.clone());
        assert_eq!(overlays.top(), Some(OverlayKind::MoreOptions));

        assert!(overlays.choose_option(MoreOption::AlbumInformation, start));
        assert_eq!(overlays.top(), None);
        assert!(overlays.has_pending());

        assert!(overlays.tick(start + Duration::from_millis(199)).is_empty());
        let effects = overlays.tick(start + Duration::from_millis(200));
        assert_eq!(effects.len(), 1);
        let OverlayEffect::SelectAlbum(album) = &effects[0];
        assert_eq!(album.featured, video);
        assert_eq!(album.id, format!("{}-album", video.id));
        assert!(!overlays.has_pending());
    }

    #[test]
    fn song_information_opens_after_delay() {
        let start = Instant::now();
        let mut overlays = stack();
        overlays.open_more_options(video());
        overlays.move_option_cursor(true);
        overlays.move_option_cursor(true);
        overlays.move_option_cursor(true);
        assert!(overlays.choose_selected_option(start));

        overlays.tick(start + Duration::from_millis(100));
        assert!(overlays.song_info().is_none());
        overlays.tick(start + Duration::from_millis(250));
        assert_eq!(overlays.top(), Some(OverlayKind::SongInfo));

        let info = overlays.song_info().unwrap();
        assert!(!info.lyrics_expanded);
        assert_eq!(info.visible_lyrics(), info.video.song_details.short_lyrics());
        overlays.expand_lyrics();
        assert!(overlays.song_info().unwrap().visible_lyrics().contains("(Chorus)"));
    }

    #[test]
    fn toast_actions_are_deferred_and_expire() {
        let start = Instant::now();
        let mut overlays = stack();
        overlays.open_more_options(video());
        overlays.choose_option(MoreOption::PlayMix, start);
        assert!(overlays.toast().is_none());

        overlays.tick(start + Duration::from_millis(200));
        assert_eq!(overlays.toast().map(|t| t.message.as_str()), Some("Creating a mix..."));

        overlays.tick(start + Duration::from_millis(3199));
        assert!(overlays.toast().is_some());
        overlays.tick(start + Duration::from_millis(3200));
        assert!(overlays.toast().is_none());
    }

    #[test]
    fn stacking_and_dismissal_order() {
        let now = Instant::now();
        let mut overlays = stack();
        let video = video();

        overlays.open_music_player(video.clone(), now);
        overlays.open_comments(video.clone(), &ContentProvider::new(1));
        overlays.open_song_info(video);
        assert_eq!(overlays.dismiss_top(), Some(OverlayKind::SongInfo));
        assert_eq!(overlays.dismiss_top(), Some(OverlayKind::Comments));
        assert_eq!(overlays.dismiss_top(), Some(OverlayKind::MusicPlayer));
        assert_eq!(overlays.dismiss_top(), None);
    }

    #[test]
    fn comments_are_capped() {
        let mut overlays = stack();
        let mut video = video();
        video.comments = 400;
        overlays.open_comments(video.clone(), &ContentProvider::new(1));
        assert_eq!(overlays.comments().unwrap().comments.len(), 25);

        video.comments = 3;
        overlays.open_comments(video, &ContentProvider::new(1));
        assert_eq!(overlays.comments().unwrap().comments.len(), 3);
    }

    #[test]
    fn music_player_loops_a_simulated_track() {
        let start = Instant::now();
        let mut overlays = stack();
        overlays.open_music_player(video(), start);

        let player = overlays.music_player().unwrap();
        assert!(player.media.is_playing());
        assert_eq!(player.media.duration_ms(), PLAYER_TRACK_MS);
        assert_eq!(
            player.media.current_position_ms(start + Duration::from_millis(196_000)),
            1_000
        );
    }

    #[test]
    fn clear_drops_pending_transition() {
        let start = Instant::now();
        let mut overlays = stack();
        overlays.open_more_options(video());
        overlays.choose_option(MoreOption::AlbumInformation, start);
        overlays.clear();
        assert!(overlays.tick(start + Duration::from_secs(1)).is_empty());
    }
}
