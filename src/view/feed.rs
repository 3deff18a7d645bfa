//! Feed screen rendering: genre chips, the horizontal pager and the
//! vertical snap feeds inside it

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Padding, Paragraph, Widget, Wrap},
};

use crate::model::{FeedKind, FeedScreen, FeedScroller, GenreFeed, PlaybackStatus};
use super::progress::{render_seek_bar, status_symbol};
use super::utils::{format_count, render_scrollable_list, render_shifted, truncate_string};

pub fn render_feed_screen(buf: &mut Buffer, area: Rect, screen: &FeedScreen, now: Instant) {
    match &screen.kind {
        FeedKind::Genre(pager) => {
            render_pager(buf, area, pager, now);
            render_chips(buf, Rect { height: 1, ..area }, pager);
        }
        FeedKind::Artist { artist, feed } => {
            render_vertical_feed(buf, area, feed, now);
            Paragraph::new(Line::from(vec![
                Span::styled(" ← Esc ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("{} · video feed", artist.name),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
            ]))
            .style(Style::default().bg(Color::Black))
            .render(Rect { height: 1, ..area }, buf);
        }
    }
}

fn render_pager(buf: &mut Buffer, area: Rect, pager: &GenreFeed, now: Instant) {
    let width = pager.viewport_width() as f64;
    for (index, page) in pager.pages().iter().enumerate() {
        let dx = (index as f64 * width - pager.offset()).round() as i32;
        render_shifted(buf, area, dx, 0, |local, scratch| {
            render_vertical_feed(scratch, local, &page.feed, now);
        });
    }
}

/// Chip header laid out exactly as `GenreFeed::chip_spans` so clicks land
/// on what is drawn
fn render_chips(buf: &mut Buffer, area: Rect, pager: &GenreFeed) {
    let mut spans = Vec::new();
    for page in pager.pages() {
        let style = if page.genre_id == pager.active_genre() {
            Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} ", page.genre_name), style));
        spans.push(Span::raw(" "));
    }
    Paragraph::new(Line::from(spans))
        .style(Style::default().bg(Color::Black))
        .render(area, buf);
}

fn render_vertical_feed(buf: &mut Buffer, area: Rect, feed: &FeedScroller, now: Instant) {
    let height = feed.viewport_height() as f64;
    for entry in 0..feed.entry_count() {
        let dy = (entry as f64 * height - feed.offset()).round() as i32;
        render_shifted(buf, area, 0, dy, |local, scratch| match feed.items().get(entry) {
            Some(_) => render_card(scratch, local, feed, entry, now),
            None => render_recommendations(scratch, local, feed),
        });
    }

    if feed.hint_visible() {
        let hint = Rect {
            y: area.y + area.height.saturating_sub(2),
            height: 1,
            ..area
        };
        Paragraph::new("↓ Scroll Down")
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .centered()
            .render(hint, buf);
    }
}

fn render_card(buf: &mut Buffer, area: Rect, feed: &FeedScroller, index: usize, now: Instant) {
    let Some(item) = feed.items().get(index) else {
        return;
    };
    let video = &item.video;
    let focused = feed.focused_index() == Some(index);
    let border = if focused { Color::Green } else { Color::DarkGray };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!(" {} ", status_symbol(item.media().status())))
        .title_bottom(Line::from(format!(" {}/{} ", index + 1, feed.items().len())).right_aligned())
        .padding(Padding::new(1, 1, 1, 0));
    let inner = block.inner(area);
    block.render(area, buf);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(16)])
        .split(rows[0]);

    let mut lines = vec![
        Line::from(Span::styled(
            format!("@{}", video.user.name),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(video.description.clone()),
        Line::default(),
        Line::from(Span::styled(
            format!("♫ {}", video.song),
            Style::default().fg(Color::Magenta),
        )),
    ];
    if let Some(genre) = &video.genre_name {
        lines.push(Line::from(Span::styled(genre.clone(), Style::default().fg(Color::DarkGray))));
    }
    if item.media().status() == PlaybackStatus::Blocked {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Autoplay blocked - press Space to play",
            Style::default().fg(Color::Yellow),
        )));
    }
    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .render(columns[0], buf);

    let like_style = if item.is_liked() {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let actions = vec![
        Line::from(Span::styled(format!("♥ {} l", format_count(item.like_count())), like_style)),
        Line::from(format!("✉ {} c", format_count(video.comments))),
        Line::from("↗ share  s"),
        Line::from("⋯ more   o"),
        Line::from("♫ player m"),
        Line::from(format!("@ {}", truncate_string(&video.user.name, 8))),
    ];
    Paragraph::new(actions).render(columns[1], buf);

    render_seek_bar(buf, rows[1], item.media(), now);
}

fn render_recommendations(buf: &mut Buffer, area: Rect, feed: &FeedScroller) {
    let selected = feed.selected_recommendation();
    let items: Vec<ListItem> = feed
        .recommendations()
        .iter()
        .enumerate()
        .map(|(i, video)| {
            let style = if i == selected {
                Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let genre = video.genre_name.as_deref().unwrap_or("-");
            ListItem::new(format!(" {} · {} ({})", video.song_title(), video.user.name, genre)).style(style)
        })
        .collect();

    render_scrollable_list(
        buf,
        area,
        items,
        selected,
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Recommended for you (←→ choose, Enter open) ")
            .padding(Padding::new(1, 1, 2, 0)),
    );
}
