//! Progress bar rendering (now-playing bar, seek bars)

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Gauge, Widget},
};

use crate::model::{MediaPlayback, PlaybackStatus, VideoItem};
use super::utils::{format_duration, truncate_string};

pub fn status_symbol(status: PlaybackStatus) -> &'static str {
    match status {
        PlaybackStatus::Playing => "▶",
        PlaybackStatus::Paused => "⏸",
        PlaybackStatus::Blocked => "⏵ tap to play",
    }
}

/// Single-row seek bar; the ratio follows the slider, not the clock, so a
/// drag in progress is never overwritten
pub fn render_seek_bar(buf: &mut Buffer, area: Rect, media: &MediaPlayback, now: Instant) {
    let bar = media.seek_bar();
    let label = format!(
        "{} / {}",
        format_duration(media.current_position_ms(now)),
        format_duration(media.duration_ms())
    );
    let color = if bar.is_seeking() { Color::Yellow } else { Color::Green };

    Gauge::default()
        .gauge_style(Style::default().fg(color))
        .ratio((bar.progress() / 100.0).clamp(0.0, 1.0))
        .label(label)
        .render(area, buf);
}

/// Bottom bar shown once a song from the home screen is playing
pub fn render_now_playing(buf: &mut Buffer, area: Rect, video: &VideoItem) {
    let title = format!(
        " ♫ {} ",
        truncate_string(video.song_title(), area.width.saturating_sub(20) as usize)
    );
    let info = format!(" {} | n: open album ", video.user.name);

    Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_bottom(Line::from(info).right_aligned()),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(0.0)
        .label(video.song_details.duration.clone())
        .render(area, buf);
}
