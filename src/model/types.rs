//! Core record types shared by the content provider, the router and the screens

use std::fmt;

use chrono::{Datelike, NaiveDate};

/// Year given to a Single whose release date cannot be read
const UNDATED_SINGLE_YEAR: i32 = 2025;

/// Stable identity of a generated video item
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VideoId(pub String);

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The user that owns a video (always an artist in this catalog)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artist {
    pub name: String,
    pub avatar_url: String,
}

impl Artist {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let seed: String = name.chars().filter(|c| !c.is_whitespace()).collect();
        Self {
            avatar_url: format!("https://picsum.photos/seed/{}/48/48", seed),
            name,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SongCredits {
    pub composer: String,
    pub lyricist: String,
    pub producer: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SongDetails {
    pub lyrics: String,
    pub credits: SongCredits,
    pub release_date: String,
    pub duration: String,
}

impl SongDetails {
    /// First lyric paragraph, shown while the lyric sheet is collapsed
    pub fn short_lyrics(&self) -> &str {
        self.lyrics.split("\n\n").next().unwrap_or_default()
    }

    /// Duration string ("m:ss") in milliseconds, 0 when unparsable
    pub fn duration_ms(&self) -> u32 {
        let mut parts = self.duration.splitn(2, ':');
        let minutes = parts.next().and_then(|m| m.trim().parse::<u32>().ok());
        let seconds = parts.next().and_then(|s| s.trim().parse::<u32>().ok());
        match (minutes, seconds) {
            (Some(m), Some(s)) => (m * 60 + s) * 1000,
            _ => 0,
        }
    }

    /// Year of the "Month D, YYYY" release date
    pub fn release_year(&self) -> Option<i32> {
        NaiveDate::parse_from_str(self.release_date.trim(), "%B %d, %Y")
            .ok()
            .map(|date| date.year())
    }
}

/// A short-form video in a feed. Immutable once generated; like state and
/// playback progress live with the screen that shows it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoItem {
    pub id: VideoId,
    pub user: Artist,
    pub description: String,
    pub song: String,
    pub image_url: String,
    pub video_url: String,
    pub likes: u32,
    pub comments: u32,
    pub genre_name: Option<String>,
    pub song_details: SongDetails,
}

impl VideoItem {
    /// Song label without the trailing " - Artist"
    pub fn song_title(&self) -> &str {
        self.song.split(" - ").next().unwrap_or(&self.song)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Genre {
    pub id: String,
    pub name: String,
    pub description: String,
    pub theme: String,
    pub videos: Vec<VideoItem>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub duration: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Album {
    pub id: String,
    pub title: String,
    pub year: i32,
    pub image_url: String,
    pub artist_name: Option<String>,
    pub featured: VideoItem,
    pub tracks: Vec<Track>,
}

impl Album {
    /// Wraps a standalone item as a one-track "Single".
    ///
    /// The album id is derived from the item id only, so wrapping the same
    /// item twice yields the same album identity, and every other field comes
    /// from the item too.
    pub fn single(video: &VideoItem) -> Self {
        Self {
            id: format!("{}-album", video.id),
            title: "Single".to_string(),
            year: video.song_details.release_year().unwrap_or(UNDATED_SINGLE_YEAR),
            image_url: video.image_url.clone(),
            artist_name: Some(video.user.name.clone()),
            featured: video.clone(),
            tracks: vec![Track {
                id: format!("{}-track", video.id),
                title: video.song_title().to_string(),
                duration: "3:15".to_string(),
            }],
        }
    }

    pub fn total_minutes(&self) -> u32 {
        (self.tracks.len() as f64 * 3.5).floor() as u32
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comment {
    pub id: String,
    pub user: Artist,
    pub text: String,
    pub timestamp: String,
}

/// Rank movement of a chart entry since the previous chart
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartMovement {
    Up(u32),
    Down(u32),
    Same,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartItem {
    pub rank: u32,
    pub movement: ChartMovement,
    pub song: VideoItem,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Playlist {
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: String,
    pub curator: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MagazineArticle {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub image_url: String,
    pub category: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_video() -> VideoItem {
        VideoItem {
            id: VideoId("rock-8-3".to_string()),
            user: Artist::new("ROY KIM"),
            description: "Vibing".to_string(),
            song: "Cool Rock Song #3 - ROY KIM".to_string(),
            image_url: "img".to_string(),
            video_url: "vid".to_string(),
            likes: 10,
            comments: 2,
            genre_name: Some("Rock".to_string()),
            song_details: SongDetails {
                lyrics: "first\nverse\n\nchorus".to_string(),
                credits: SongCredits {
                    composer: "a".to_string(),
                    lyricist: "b".to_string(),
                    producer: "c".to_string(),
                },
                release_date: "May 1, 2024".to_string(),
                duration: "3:42".to_string(),
            },
        }
    }

    #[test]
    fn single_album_identity_is_derived_from_the_item() {
        let video = sample_video();
        let first = Album::single(&video);
        let second = Album::single(&video);

        assert_eq!(first.id, "rock-8-3-album");
        assert_eq!(first.id, second.id);
        assert_eq!(first.featured, video);
        assert_eq!(first.tracks[0].title, "Cool Rock Song #3");
        assert_eq!(first.artist_name.as_deref(), Some("ROY KIM"));
        assert_eq!(first, second);
        assert_eq!(first.year, 2024);
    }

    #[test]
    fn single_year_falls_back_when_undated() {
        let mut video = sample_video();
        video.song_details.release_date = "sometime".to_string();
        assert_eq!(video.song_details.release_year(), None);
        assert_eq!(Album::single(&video).year, UNDATED_SINGLE_YEAR);

        video.song_details.release_date = "December 25, 2023".to_string();
        assert_eq!(Album::single(&video).year, 2023);
    }

    #[test]
    fn song_details_helpers() {
        let video = sample_video();
        assert_eq!(video.song_details.short_lyrics(), "first\nverse");
        assert_eq!(video.song_details.duration_ms(), 222_000);
        assert_eq!(Artist::new("ROY KIM").avatar_url, "https://picsum.photos/seed/ROYKIM/48/48");
    }
}
