//! Simulated media playback: position timing, autoplay policy and the seek bar

use std::time::Instant;

use thiserror::Error;

/// Duration used by the full music player (3:15)
pub const PLAYER_TRACK_MS: u32 = 195_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("autoplay blocked")]
    AutoplayBlocked,
    #[error("media has no duration")]
    NoMedia,
}

/// Where a play request came from. Only autoplay can be refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayRequest {
    Autoplay,
    UserGesture,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackStatus {
    Playing,
    Paused,
    /// A play request was refused; shown as "tap to play"
    Blocked,
}

/// Slider position plus the seeking flag. While the user drags the slider
/// the media's time updates must not overwrite the slider.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SeekBar {
    progress: f64,
    seeking: bool,
}

impl SeekBar {
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_seeking(&self) -> bool {
        self.seeking
    }

    pub fn begin_seek(&mut self) {
        self.seeking = true;
    }

    pub fn end_seek(&mut self) {
        self.seeking = false;
    }

    /// Slider moved by the user, percent in [0, 100]
    pub fn set(&mut self, progress: f64) {
        self.progress = progress.clamp(0.0, 100.0);
    }

    /// Time update from the media; ignored while seeking
    pub fn time_update(&mut self, progress: f64) {
        if !self.seeking {
            self.progress = progress.clamp(0.0, 100.0);
        }
    }
}

/// Timing state for one simulated media element
#[derive(Clone, Debug)]
pub struct MediaPlayback {
    position_ms: u32,
    last_update: Instant,
    status: PlaybackStatus,
    duration_ms: u32,
    seek_bar: SeekBar,
}

impl MediaPlayback {
    pub fn new(duration_ms: u32, now: Instant) -> Self {
        Self {
            position_ms: 0,
            last_update: now,
            status: PlaybackStatus::Paused,
            duration_ms,
            seek_bar: SeekBar::default(),
        }
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn seek_bar(&self) -> &SeekBar {
        &self.seek_bar
    }

    /// Media elements loop, so the position wraps at the end
    pub fn current_position_ms(&self, now: Instant) -> u32 {
        if self.duration_ms == 0 {
            return 0;
        }
        if self.is_playing() {
            let elapsed = now.saturating_duration_since(self.last_update).as_millis() as u64;
            ((self.position_ms as u64 + elapsed) % self.duration_ms as u64) as u32
        } else {
            self.position_ms.min(self.duration_ms - 1)
        }
    }

    pub fn play(
        &mut self,
        request: PlayRequest,
        autoplay_allowed: bool,
        now: Instant,
    ) -> Result<(), PlaybackError> {
        if self.duration_ms == 0 {
            self.status = PlaybackStatus::Blocked;
            return Err(PlaybackError::NoMedia);
        }
        if request == PlayRequest::Autoplay && !autoplay_allowed {
            self.position_ms = self.current_position_ms(now);
            self.status = PlaybackStatus::Blocked;
            return Err(PlaybackError::AutoplayBlocked);
        }
        if !self.is_playing() {
            self.last_update = now;
        }
        self.status = PlaybackStatus::Playing;
        Ok(())
    }

    pub fn pause(&mut self, now: Instant) {
        match self.status {
            PlaybackStatus::Playing => {
                self.position_ms = self.current_position_ms(now);
                self.last_update = now;
                self.status = PlaybackStatus::Paused;
            }
            PlaybackStatus::Blocked => self.status = PlaybackStatus::Paused,
            PlaybackStatus::Paused => {}
        }
    }

    /// Tap on the media surface
    pub fn toggle(&mut self, now: Instant) {
        if self.is_playing() {
            self.pause(now);
        } else {
            // a user gesture is never refused
            let _ = self.play(PlayRequest::UserGesture, true, now);
        }
    }

    pub fn begin_seek(&mut self) {
        self.seek_bar.begin_seek();
    }

    /// Moves both the slider and the media position
    pub fn seek(&mut self, progress: f64, now: Instant) {
        self.seek_bar.set(progress);
        if self.duration_ms > 0 {
            let target = (self.seek_bar.progress() / 100.0 * self.duration_ms as f64) as u32;
            self.position_ms = target.min(self.duration_ms - 1);
            self.last_update = now;
        }
    }

    pub fn end_seek(&mut self) {
        self.seek_bar.end_seek();
    }

    /// Media time update; feeds the slider unless the user is seeking
    pub fn tick(&mut self, now: Instant) {
        if self.duration_ms == 0 {
            return;
        }
        let position = self.current_position_ms(now);
        self.seek_bar
            .time_update(position as f64 / self.duration_ms as f64 * 100.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn autoplay_refusal_degrades_to_blocked() {
        let now = Instant::now();
        let mut media = MediaPlayback::new(10_000, now);

        let result = media.play(PlayRequest::Autoplay, false, now);
        assert_eq!(result, Err(PlaybackError::AutoplayBlocked));
        assert_eq!(media.status(), PlaybackStatus::Blocked);

        media.toggle(now);
        assert_eq!(media.status(), PlaybackStatus::Playing);
    }

    #[test]
    fn position_advances_and_loops() {
        let start = Instant::now();
        let mut media = MediaPlayback::new(10_000, start);
        media.play(PlayRequest::Autoplay, true, start).unwrap();

        assert_eq!(media.current_position_ms(start + Duration::from_millis(4_000)), 4_000);
        assert_eq!(media.current_position_ms(start + Duration::from_millis(12_500)), 2_500);

        media.pause(start + Duration::from_millis(4_000));
        assert_eq!(media.current_position_ms(start + Duration::from_secs(60)), 4_000);
    }

    #[test]
    fn seeking_suspends_time_updates() {
        let start = Instant::now();
        let mut media = MediaPlayback::new(10_000, start);
        media.play(PlayRequest::UserGesture, true, start).unwrap();

        media.begin_seek();
        media.seek(80.0, start);
        media.tick(start + Duration::from_millis(500));
        assert_eq!(media.seek_bar().progress(), 80.0);

        media.end_seek();
        media.tick(start + Duration::from_millis(1_000));
        assert!((media.seek_bar().progress() - 90.0).abs() < 0.01);
    }

    #[test]
    fn media_without_duration_never_plays() {
        let now = Instant::now();
        let mut media = MediaPlayback::new(0, now);
        assert_eq!(
            media.play(PlayRequest::UserGesture, true, now),
            Err(PlaybackError::NoMedia)
        );
        assert!(!media.is_playing());
    }
}
