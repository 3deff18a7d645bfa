//! Layout rendering (sliding screen strip, status line)

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::model::{AppModel, FeedKind, Screen};
use super::detail::{render_album_detail, render_artist_profile};
use super::feed::render_feed_screen;
use super::home::render_home;
use super::utils::render_shifted;

const SCREENS: [Screen; 4] = [Screen::Home, Screen::Feed, Screen::Artist, Screen::Album];

/// Every screen sits at a multiple of the width; during a transition two of
/// them share the area
pub fn render_screens(buf: &mut Buffer, area: Rect, model: &AppModel, now: Instant) {
    for screen in SCREENS {
        let dx = (model.screen_offset(screen, now) * area.width as f64).round() as i32;
        if dx.unsigned_abs() >= area.width as u32 {
            continue;
        }
        render_shifted(buf, area, dx, 0, |local, scratch| match screen {
            Screen::Home => render_home(scratch, local, model.home(), model.catalog()),
            Screen::Feed => {
                if let Some(feed) = model.feed() {
                    render_feed_screen(scratch, local, feed, now);
                }
            }
            Screen::Artist => {
                if let Some(profile) = model.artist_profile() {
                    render_artist_profile(scratch, local, profile);
                }
            }
            Screen::Album => {
                if let Some(detail) = model.album_detail() {
                    render_album_detail(scratch, local, detail);
                }
            }
        });
    }
}

fn breadcrumb(model: &AppModel) -> String {
    let router = model.router();
    let mut parts = vec!["Home".to_string()];
    if let Some(feed) = model.feed() {
        if router.genre().is_some() || router.artist_feed().is_some() {
            parts.push(match &feed.kind {
                FeedKind::Genre(pager) => pager
                    .pages()
                    .iter()
                    .find(|p| p.genre_id == pager.active_genre())
                    .map(|p| p.genre_name.clone())
                    .unwrap_or_else(|| "Feed".to_string()),
                FeedKind::Artist { artist, .. } => format!("{} feed", artist.name),
            });
        }
    }
    if let Some(artist) = router.artist() {
        parts.push(artist.name.clone());
    }
    if let Some(album) = router.album() {
        parts.push(album.title.clone());
    }
    parts.join(" › ")
}

pub fn render_status_bar(buf: &mut Buffer, area: Rect, model: &AppModel) {
    let screen = match model.current_screen() {
        Screen::Home => "HOME",
        Screen::Feed => "FEED",
        Screen::Artist => "ARTIST",
        Screen::Album => "ALBUM",
    };
    Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {} ", screen),
            Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(breadcrumb(model), Style::default().fg(Color::Gray)),
        Span::styled("   ? help · q quit", Style::default().fg(Color::DarkGray)),
    ]))
    .render(area, buf);
}
