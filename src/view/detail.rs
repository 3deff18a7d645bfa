//! Artist profile and album detail rendering

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, ListItem, Padding, Paragraph, Widget},
};

use crate::model::{AlbumDetail, AlbumRow, ArtistProfile, ArtistSection};
use super::utils::{calculate_num_width, format_count, render_scrollable_list, truncate_string};

fn item_style(selected: bool, focused: bool) -> Style {
    if selected && focused {
        Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
    } else if selected {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    }
}

fn header(buf: &mut Buffer, area: Rect, title: &str, subtitle: String) {
    Paragraph::new(vec![
        Line::from(vec![
            Span::styled(" ← Esc  ", Style::default().fg(Color::DarkGray)),
            Span::styled(title.to_string(), Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(Span::styled(subtitle, Style::default().fg(Color::Gray))),
    ])
    .block(Block::default().borders(Borders::BOTTOM))
    .render(area, buf);
}

pub fn render_artist_profile(buf: &mut Buffer, area: Rect, profile: &ArtistProfile) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let data = &profile.data;
    header(
        buf,
        chunks[0],
        &data.artist.name,
        format!(" {} videos · {} albums", data.videos.len(), data.albums.len()),
    );

    let width = chunks[1].width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = ArtistSection::ALL
        .iter()
        .map(|section| {
            let focused = profile.section() == *section;
            let cursor = profile.cursor(*section);
            let title_style = if focused {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let rows: Vec<String> = match section {
                ArtistSection::VideoFeed => vec![format!("▶ Watch {}'s video feed", data.artist.name)],
                ArtistSection::PopularTracks => {
                    let num_width = calculate_num_width(data.popular_tracks.len());
                    data.popular_tracks
                        .iter()
                        .enumerate()
                        .map(|(i, track)| {
                            format!(
                                "{:>num_width$}  {}  {} plays",
                                i + 1,
                                track.video.song_title(),
                                format_count(track.plays),
                            )
                        })
                        .collect()
                }
                ArtistSection::Albums => data
                    .albums
                    .iter()
                    .map(|album| format!("{} ({}) · {} tracks", album.title, album.year, album.tracks.len()))
                    .collect(),
                ArtistSection::MusicVideos => data
                    .videos
                    .iter()
                    .map(|video| format!("{} · ♥ {}", video.song_title(), format_count(video.likes)))
                    .collect(),
                ArtistSection::RelatedArtists => data.related.iter().map(|artist| artist.name.clone()).collect(),
            };

            let mut lines = vec![Line::from(Span::styled(section.title(), title_style))];
            lines.extend(rows.into_iter().enumerate().map(|(i, row)| {
                Line::from(Span::styled(
                    format!("  {}", truncate_string(&row, width)),
                    item_style(i == cursor, focused),
                ))
            }));
            lines.push(Line::default());
            ListItem::new(Text::from(lines))
        })
        .collect();

    let selected = ArtistSection::ALL
        .iter()
        .position(|s| *s == profile.section())
        .unwrap_or(0);
    render_scrollable_list(buf, chunks[1], items, selected, Block::default().padding(Padding::horizontal(1)));
}

pub fn render_album_detail(buf: &mut Buffer, area: Rect, detail: &AlbumDetail) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let album = &detail.album;
    header(
        buf,
        chunks[0],
        &album.title,
        format!(
            " {} · {} · {} tracks · {} min",
            detail.artist.name,
            album.year,
            album.tracks.len(),
            album.total_minutes()
        ),
    );

    let selected_row = detail.selected_row();
    let rows = detail.rows();
    let num_width = calculate_num_width(album.tracks.len());
    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| {
            let text = match row {
                AlbumRow::Artist => format!("@ {}", detail.artist.name),
                AlbumRow::FeaturedVideo => format!("▶ {} (video feed)", album.featured.song_title()),
                AlbumRow::PlayFeatured => "♫ Play".to_string(),
                AlbumRow::Track(i) => {
                    let track = &album.tracks[*i];
                    format!("{:>num_width$}  {}  {}", i + 1, track.title, track.duration)
                }
            };
            ListItem::new(format!(" {}", text)).style(item_style(*row == selected_row, true))
        })
        .collect();

    let selected = rows.iter().position(|row| *row == selected_row).unwrap_or(0);
    render_scrollable_list(buf, chunks[1], items, selected, Block::default().padding(Padding::horizontal(1)));
}
