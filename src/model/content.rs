//! Content provider and the static catalog built from it
//!
//! Every generator is seeded from the configured seed plus its arguments, so the
//! same call always yields the same records. That keeps ids stable across
//! screens, which the router relies on when it infers an album's artist.

use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::types::{
    Album, Artist, ChartItem, ChartMovement, Comment, Genre, MagazineArticle, Playlist,
    SongCredits, SongDetails, Track, VideoId, VideoItem,
};

const SAMPLE_VIDEOS: [&str; 10] = [
    "https://storage.googleapis.com/gtv-videos-bucket/sample/ForBiggerFun.mp4",
    "https://storage.googleapis.com/gtv-videos-bucket/sample/ForBiggerEscapes.mp4",
    "https://storage.googleapis.com/gtv-videos-bucket/sample/ForBiggerBlazes.mp4",
    "https://storage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4",
    "https://storage.googleapis.com/gtv-videos-bucket/sample/ElephantsDream.mp4",
    "https://storage.googleapis.com/gtv-videos-bucket/sample/ForBiggerJoyrides.mp4",
    "https://storage.googleapis.com/gtv-videos-bucket/sample/ForBiggerMeltdowns.mp4",
    "https://storage.googleapis.com/gtv-videos-bucket/sample/Sintel.mp4",
    "https://storage.googleapis.com/gtv-videos-bucket/sample/SubaruOutbackOnStreetAndDirt.mp4",
    "https://storage.googleapis.com/gtv-videos-bucket/sample/TearsOfSteel.mp4",
];

pub const ARTIST_NAMES: [&str; 8] = [
    "NMIXX",
    "HUNTR/X",
    "Davichi",
    "WOODZ",
    "Tyla",
    "ROY KIM",
    "Cigarettes After Sex",
    "Taylor Swift",
];

const LYRICS: &str = "(Verse 1)
Yeah, the city lights callin' my name
Got the whole world watchin', playin' the game
Every step I take, I'm breakin' the chain
Nothin' left to lose, everything to gain

(Chorus)
Oh, we're runnin' wild in the midnight hour
Feelin' the power, standin' tall like a tower
This is our moment, can't you feel the fire?
Takin' it higher, fuelin' the desire

(Verse 2)
Sunrise paintin' the sky gold and red
Forget all the worries, leave 'em for dead
Got the rhythm in my heart, the beat in my head
Livin' for right now, not what's ahead";

const COMMENT_TEXTS: [&str; 7] = [
    "This is a banger! 🔥",
    "OMG I love this song!",
    "What a vibe ✨",
    "Seriously underrated.",
    "Playing this on repeat.",
    "Who is this artist?? They are amazing!",
    "This song made my day.",
];

const ARTIST_FEED_GENRES: [&str; 3] = ["Pop", "Rock", "Hip Hop"];

/// Latest date a generated release can carry
const RELEASE_ANCHOR: (i32, u32, u32) = (2025, 6, 1);

/// Deterministic generator of videos, comments and song details
#[derive(Clone, Debug)]
pub struct ContentProvider {
    seed: u64,
}

impl ContentProvider {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    fn rng_for(&self, scope: &str) -> StdRng {
        // FNV-1a over the scope, mixed with the configured seed
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325 ^ self.seed;
        for byte in scope.bytes() {
            hash ^= byte as u64;
            hash = hash.wrapping_mul(0x0100_0000_01b3);
        }
        StdRng::seed_from_u64(hash)
    }

    pub fn generate_videos(&self, category: &str, count: usize) -> Vec<VideoItem> {
        let mut rng = self.rng_for(&format!("videos:{}:{}", category, count));
        let tag = category.to_lowercase().replacen(' ', "", 1);
        let slug = slug(category);

        (0..count)
            .map(|i| {
                let artist_name = ARTIST_NAMES[i % ARTIST_NAMES.len()];
                let song = format!("Cool {} Song #{} - {}", category, i + 1, artist_name);
                let video_index = (i + rng.gen_range(0..5)) % SAMPLE_VIDEOS.len();
                VideoItem {
                    id: VideoId(format!("{}-{}-{}", slug, count, i + 1)),
                    user: Artist::new(artist_name),
                    description: format!("Vibing to this {} track! #music #{}", category, tag),
                    image_url: format!("https://picsum.photos/seed/{}{}/400/800", category, i),
                    video_url: SAMPLE_VIDEOS[video_index].to_string(),
                    likes: rng.gen_range(100..1100),
                    comments: rng.gen_range(0..500),
                    genre_name: Some(category.to_string()),
                    song_details: self.generate_song_details(&song),
                    song,
                }
            })
            .collect()
    }

    pub fn generate_artist_videos(&self, artist_name: &str, count: usize) -> Vec<VideoItem> {
        let mut rng = self.rng_for(&format!("artist:{}:{}", artist_name, count));
        let clean_name = artist_name.replace('@', "");
        let slug = slug(&clean_name);

        (0..count)
            .map(|i| {
                let song_name = format!("Artist Song #{}", i + 1);
                let genre = ARTIST_FEED_GENRES[rng.gen_range(0..ARTIST_FEED_GENRES.len())];
                VideoItem {
                    id: VideoId(format!("{}-artist-{}-{}", slug, count, i + 1)),
                    user: Artist {
                        name: artist_name.to_string(),
                        avatar_url: format!("https://picsum.photos/seed/{}/48/48", clean_name),
                    },
                    description: format!("Check out my new track! #{} #music", clean_name),
                    song: format!("{} - {}", song_name, artist_name),
                    image_url: format!("https://picsum.photos/seed/{}{}/400/800", clean_name, i),
                    video_url: SAMPLE_VIDEOS[i % SAMPLE_VIDEOS.len()].to_string(),
                    likes: rng.gen_range(1000..6000),
                    comments: rng.gen_range(0..1000),
                    genre_name: Some(genre.to_string()),
                    song_details: self.generate_song_details(&song_name),
                }
            })
            .collect()
    }

    pub fn generate_comments(&self, count: usize) -> Vec<Comment> {
        let mut rng = self.rng_for(&format!("comments:{}", count));
        (0..count)
            .map(|i| Comment {
                id: format!("comment-{}", i),
                user: Artist {
                    name: format!("@user{}", rng.gen_range(100..1000)),
                    avatar_url: format!("https://picsum.photos/seed/commenter{}/48/48", i),
                },
                text: COMMENT_TEXTS[rng.gen_range(0..COMMENT_TEXTS.len())].to_string(),
                timestamp: format!("{}m ago", rng.gen_range(1..60)),
            })
            .collect()
    }

    pub fn generate_song_details(&self, title: &str) -> SongDetails {
        let mut rng = self.rng_for(&format!("song:{}", title));
        let pick = |rng: &mut StdRng| ARTIST_NAMES[rng.gen_range(0..ARTIST_NAMES.len())].to_string();

        let (y, m, d) = RELEASE_ANCHOR;
        let release_date = NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|anchor| anchor.checked_sub_days(Days::new(rng.gen_range(0..116))))
            .map(|date| date.format("%B %-d, %Y").to_string())
            .unwrap_or_default();

        SongDetails {
            lyrics: LYRICS.to_string(),
            credits: SongCredits {
                composer: pick(&mut rng),
                lyricist: pick(&mut rng),
                producer: pick(&mut rng),
            },
            release_date,
            duration: format!("3:{}", rng.gen_range(10..60)),
        }
    }

    /// Play counts for an artist's popular tracks, in the millions
    pub fn generate_play_counts(&self, artist_name: &str, count: usize) -> Vec<u32> {
        let mut rng = self.rng_for(&format!("plays:{}:{}", artist_name, count));
        (0..count).map(|_| rng.gen_range(1_000_000..6_000_000)).collect()
    }

    /// Shuffles with a generator scoped to `scope`
    pub fn shuffled<T: Clone>(&self, scope: &str, items: &[T]) -> Vec<T> {
        let mut rng = self.rng_for(scope);
        let mut items = items.to_vec();
        items.shuffle(&mut rng);
        items
    }
}

fn slug(value: &str) -> String {
    value
        .chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() {
                Some(c.to_ascii_lowercase())
            } else if c.is_whitespace() {
                Some('_')
            } else {
                None
            }
        })
        .collect()
}

/// Fixed catalog available at startup: genres plus the home screen shelves
#[derive(Clone, Debug)]
pub struct Catalog {
    provider: ContentProvider,
    pub genres: Vec<Genre>,
    pub latest_albums: Vec<Album>,
    pub chart: Vec<ChartItem>,
    pub short_videos: Vec<VideoItem>,
    pub hot_trend: Vec<VideoItem>,
    pub mood_playlists: Vec<Playlist>,
    pub dj_picks: Vec<Playlist>,
    pub magazine: Vec<MagazineArticle>,
}

impl Catalog {
    pub fn generate(provider: ContentProvider) -> Self {
        let genre = |id: &str, name: &str, description: &str, theme: &str, videos: Vec<VideoItem>| Genre {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            theme: theme.to_string(),
            videos,
        };

        let mut for_you = provider.generate_videos("Pop", 4);
        for_you.extend(provider.generate_videos("Electronic", 3));

        let genres = vec![
            genre("foryou", "For You", "A mix of trending and recommended tracks.", "purple-pink", for_you),
            genre("rnb", "R&B", "Smooth rhythms and soulful melodies.", "blue-indigo", provider.generate_videos("R&B", 8)),
            genre("rock", "Rock", "Guitar riffs and powerful anthems.", "red-yellow", provider.generate_videos("Rock", 8)),
            genre("hiphop", "Hip Hop", "Beats, rhymes, and lyrical flows.", "green-blue", provider.generate_videos("Hip Hop", 8)),
            genre("electronic", "Electronic", "Synthetic sounds and dance-floor fillers.", "teal-cyan", provider.generate_videos("Electronic", 8)),
            genre("pop", "Pop", "Catchy hooks and chart-topping hits.", "pink-rose", provider.generate_videos("Pop", 8)),
            genre("jazz", "Jazz", "Improvisation and timeless cool.", "amber-orange", provider.generate_videos("Jazz", 8)),
            genre("classical", "Classical", "Orchestral masterpieces and epic scores.", "gray", provider.generate_videos("Classical", 8)),
        ];

        let all_videos: Vec<VideoItem> = genres.iter().flat_map(|g| g.videos.iter().cloned()).collect();

        let latest_albums = all_videos
            .iter()
            .take(10)
            .enumerate()
            .map(|(i, video)| Album {
                id: format!("album-{}", i),
                title: video.song_title().to_string(),
                year: 2024,
                image_url: format!("https://picsum.photos/seed/album{}/400/400", i),
                artist_name: Some(video.user.name.clone()),
                featured: video.clone(),
                tracks: vec![Track {
                    id: "t1".to_string(),
                    title: video.song_title().to_string(),
                    duration: "3:00".to_string(),
                }],
            })
            .collect();

        let chart_titles = [
            ("Blue Valentine - NMIXX", ChartMovement::Same),
            ("Golden - HUNTR/X", ChartMovement::Down(1)),
            ("Time Capsule - Davichi", ChartMovement::Up(3)),
            ("Drowning - WOODZ", ChartMovement::Down(1)),
        ];
        let chart = chart_titles
            .iter()
            .zip(all_videos.iter())
            .enumerate()
            .map(|(i, ((title, movement), video))| ChartItem {
                rank: i as u32 + 1,
                movement: *movement,
                song: VideoItem {
                    song: title.to_string(),
                    ..video.clone()
                },
            })
            .collect();

        let short_videos = provider.shuffled("home:short", &all_videos).into_iter().take(8).collect();
        let hot_trend = provider.shuffled("home:hot", &all_videos).into_iter().take(8).collect();

        let playlist = |id: &str, title: &str, subtitle: Option<&str>, curator: Option<&str>| Playlist {
            id: id.to_string(),
            title: title.to_string(),
            subtitle: subtitle.map(str::to_string),
            image_url: format!("https://picsum.photos/seed/{}/400/400", id),
            curator: curator.map(str::to_string),
        };
        let mood_playlists = vec![
            playlist("drive", "Easy Listening Pop for a Fun Drive", Some("#drive"), None),
            playlist("summer", "Korean Songs for a Summer Night Drive", Some("#summer #drive"), None),
            playlist("feelgood", "Feel-Good Drive Playlist", Some("#drive"), None),
        ];
        let dj_picks = vec![
            playlist("djpick1", "Cozy Pop Mix for a Winter Day", None, Some("POP_BOX")),
            playlist("djpick2", "Getting Through the Long Night", None, Some("Dreamus")),
            playlist("djpick3", "Sentimental Jazz from a New York Bar", None, Some("Universal Music")),
        ];

        let article = |id: &str, title: &str, subtitle: &str| MagazineArticle {
            id: id.to_string(),
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            image_url: format!("https://picsum.photos/seed/{}/800/400", id),
            category: "MAGAZINE".to_string(),
        };
        let magazine = vec![
            article("mag1", "A Guide for Music Lovers Who Love Key!", "Edition M"),
            article("mag2", "Names We Miss in November: Yoo Jae-ha, Kim Hyun-sik", "Edition M"),
            article("mag3", "Artist of the Month: Meet NCT 127", "Data Lab"),
        ];

        tracing::debug!(
            genres = genres.len(),
            videos = all_videos.len(),
            "Catalog generated"
        );

        Self {
            provider,
            genres,
            latest_albums,
            chart,
            short_videos,
            hot_trend,
            mood_playlists,
            dj_picks,
            magazine,
        }
    }

    pub fn provider(&self) -> &ContentProvider {
        &self.provider
    }

    pub fn all_videos(&self) -> impl Iterator<Item = &VideoItem> {
        self.genres.iter().flat_map(|g| g.videos.iter())
    }

    pub fn genre(&self, id: &str) -> Option<&Genre> {
        self.genres.iter().find(|g| g.id == id)
    }

    pub fn genre_by_name(&self, name: &str) -> Option<&Genre> {
        self.genres.iter().find(|g| g.name == name)
    }

    pub fn find_video(&self, id: &VideoId) -> Option<&VideoItem> {
        self.all_videos().find(|v| &v.id == id)
    }

    /// Selected genre first, then every other genre in catalog order
    pub fn ordered_genres(&self, first_id: &str) -> Vec<&Genre> {
        let first = self.genre(first_id);
        first
            .into_iter()
            .chain(self.genres.iter().filter(|g| g.id != first_id))
            .collect()
    }

    /// Items from other genres for the trailing recommendations panel
    pub fn recommendations_for(&self, genre_id: &str, count: usize) -> Vec<VideoItem> {
        let own_ids: Vec<&VideoId> = self
            .genre(genre_id)
            .map(|g| g.videos.iter().map(|v| &v.id).collect())
            .unwrap_or_default();
        let candidates: Vec<VideoItem> = self
            .genres
            .iter()
            .filter(|g| g.id != genre_id)
            .flat_map(|g| g.videos.iter())
            .filter(|v| !own_ids.contains(&&v.id))
            .cloned()
            .collect();
        self.provider
            .shuffled(&format!("recommend:{}", genre_id), &candidates)
            .into_iter()
            .take(count)
            .collect()
    }

    /// Artist feed items: same shape as the artist profile's video shelf
    pub fn artist_feed_videos(&self, artist_name: &str) -> Vec<VideoItem> {
        self.provider.generate_artist_videos(artist_name, ARTIST_FEED_LEN)
    }
}

pub const ARTIST_FEED_LEN: usize = 8;
pub const RECOMMENDATION_COUNT: usize = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generators_are_deterministic() {
        let provider = ContentProvider::new(7);
        assert_eq!(provider.generate_videos("Rock", 8), provider.generate_videos("Rock", 8));
        assert_eq!(
            provider.generate_artist_videos("Tyla", 8),
            provider.generate_artist_videos("Tyla", 8)
        );
        assert_eq!(provider.generate_comments(5), provider.generate_comments(5));
    }

    #[test]
    fn generated_videos_follow_the_vocabulary() {
        let provider = ContentProvider::new(1);
        let videos = provider.generate_videos("Hip Hop", 9);

        assert_eq!(videos.len(), 9);
        assert_eq!(videos[0].user.name, "NMIXX");
        assert_eq!(videos[8].user.name, "NMIXX");
        assert_eq!(videos[2].song, "Cool Hip Hop Song #3 - Davichi");
        assert_eq!(videos[0].description, "Vibing to this Hip Hop track! #music #hiphop");
        assert!(videos.iter().all(|v| (100..1100).contains(&v.likes)));
        assert!(videos.iter().all(|v| v.comments < 500));
        assert!(videos.iter().all(|v| v.genre_name.as_deref() == Some("Hip Hop")));
    }

    #[test]
    fn song_details_shape() {
        let details = ContentProvider::new(3).generate_song_details("Artist Song #1");
        let seconds: u32 = details.duration.trim_start_matches("3:").parse().unwrap();
        assert!((10..60).contains(&seconds));
        assert!(ARTIST_NAMES.contains(&details.credits.producer.as_str()));
        assert!(details.release_date.ends_with("2025") || details.release_date.ends_with("2024"));
        assert!(details.short_lyrics().starts_with("(Verse 1)"));
    }

    #[test]
    fn catalog_ids_are_unique() {
        let catalog = Catalog::generate(ContentProvider::new(42));
        let mut ids: Vec<&VideoId> = catalog.all_videos().map(|v| &v.id).collect();
        let total = ids.len();
        ids.sort_by(|a, b| a.0.cmp(&b.0));
        ids.dedup();

        assert_eq!(total, 7 + 7 * 8);
        assert_eq!(ids.len(), total);
        assert_eq!(catalog.latest_albums.len(), 10);
        assert_eq!(catalog.chart[1].song.song, "Golden - HUNTR/X");
    }

    #[test]
    fn ordered_genres_put_selection_first() {
        let catalog = Catalog::generate(ContentProvider::new(42));
        let names: Vec<&str> = catalog.ordered_genres("rock").iter().map(|g| g.name.as_str()).collect();
        assert_eq!(
            names,
            ["Rock", "For You", "R&B", "Hip Hop", "Electronic", "Pop", "Jazz", "Classical"]
        );
    }

    #[test]
    fn recommendations_skip_the_current_genre() {
        let catalog = Catalog::generate(ContentProvider::new(42));
        let recs = catalog.recommendations_for("jazz", RECOMMENDATION_COUNT);
        assert_eq!(recs.len(), RECOMMENDATION_COUNT);
        assert!(recs.iter().all(|v| v.genre_name.as_deref() != Some("Jazz")));
    }
}
