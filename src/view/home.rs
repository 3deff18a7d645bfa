//! Home screen: one carousel row per section

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, ListItem, Padding, Paragraph, Widget},
};

use crate::model::{Catalog, ChartMovement, HomeScreen, HomeSection};
use super::utils::{render_scrollable_list, truncate_string};

const LABEL_WIDTH: usize = 24;

fn labels(section: HomeSection, catalog: &Catalog) -> Vec<String> {
    match section {
        HomeSection::LatestMusic => catalog
            .latest_albums
            .iter()
            .map(|album| match &album.artist_name {
                Some(artist) => format!("{} · {}", album.title, artist),
                None => album.title.clone(),
            })
            .collect(),
        HomeSection::Chart => catalog
            .chart
            .iter()
            .map(|entry| {
                let arrow = match entry.movement {
                    ChartMovement::Up(steps) => format!("▲{}", steps),
                    ChartMovement::Down(steps) => format!("▼{}", steps),
                    ChartMovement::Same => "-".to_string(),
                };
                format!("{} {} {}", entry.rank, arrow, entry.song.song_title())
            })
            .collect(),
        HomeSection::ShortMusic => catalog
            .short_videos
            .iter()
            .map(|video| video.song_title().to_string())
            .collect(),
        HomeSection::HotTrend => catalog
            .hot_trend
            .iter()
            .enumerate()
            .map(|(i, video)| format!("{}. {}", i + 1, video.song_title()))
            .collect(),
        HomeSection::Genres => catalog.genres.iter().map(|genre| genre.name.clone()).collect(),
        HomeSection::MoodPlay => catalog.mood_playlists.iter().map(|p| p.title.clone()).collect(),
        HomeSection::DjPick => catalog
            .dj_picks
            .iter()
            .map(|p| match &p.curator {
                Some(curator) => format!("{} ({})", p.title, curator),
                None => p.title.clone(),
            })
            .collect(),
        HomeSection::Magazine => catalog
            .magazine
            .iter()
            .map(|article| format!("[{}] {}", article.category, article.title))
            .collect(),
    }
}

/// Carousel line scrolled so the cursor stays in view
fn carousel<'a>(labels: &[String], cursor: usize, selected: bool, width: u16) -> Line<'a> {
    let fits = (width as usize / (LABEL_WIDTH + 2)).max(1);
    let first = cursor.saturating_sub(fits - 1);
    let spans: Vec<Span> = labels
        .iter()
        .enumerate()
        .skip(first)
        .take(fits)
        .map(|(i, label)| {
            let text = format!(" {:<width$} ", truncate_string(label, LABEL_WIDTH), width = LABEL_WIDTH);
            let style = if i == cursor && selected {
                Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
            } else if i == cursor {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Span::styled(text, style)
        })
        .collect();
    Line::from(spans)
}

pub fn render_home(buf: &mut Buffer, area: Rect, home: &HomeScreen, catalog: &Catalog) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    Paragraph::new(Line::from(vec![
        Span::styled("Reels", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::styled("  ↑↓ section  ←→ item  Enter open  ? help", Style::default().fg(Color::DarkGray)),
    ]))
    .block(Block::default().borders(Borders::BOTTOM).padding(Padding::horizontal(1)))
    .render(chunks[0], buf);

    let inner_width = chunks[1].width.saturating_sub(2);
    let items: Vec<ListItem> = HomeSection::ALL
        .iter()
        .enumerate()
        .map(|(i, section)| {
            let selected = i == home.section_index();
            let title_style = if selected {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let labels = labels(*section, catalog);
            let text = Text::from(vec![
                Line::from(Span::styled(section.title(), title_style)),
                carousel(&labels, home.cursor(*section), selected, inner_width),
                Line::default(),
            ]);
            ListItem::new(text)
        })
        .collect();

    render_scrollable_list(
        buf,
        chunks[1],
        items,
        home.section_index(),
        Block::default().padding(Padding::horizontal(1)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::model::AppModel;

    #[test]
    fn chart_labels_show_rank_movement() {
        let model = AppModel::new(AppConfig::default());
        let labels = labels(HomeSection::Chart, model.catalog());

        assert_eq!(labels.len(), 4);
        assert!(labels[0].starts_with("1 - "));
        assert!(labels[1].starts_with("2 ▼1 "));
        assert!(labels[2].starts_with("3 ▲3 "));
    }
}
