//! Overlay rendering (players, sheets, toast, error notification, help popup)

use std::time::Instant;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::model::{MoreOption, OverlayStack, UiState};
use super::progress::{render_seek_bar, status_symbol};
use super::utils::{bottom_sheet, centered_rect, format_count};

/// Draws the stack bottom-up so the topmost overlay ends up on top
pub fn render_overlay_stack(frame: &mut Frame, area: Rect, stack: &OverlayStack, now: Instant) {
    for (player, title) in [
        (stack.music_player(), " Music Player "),
        (stack.video_player(), " Video Player "),
    ] {
        let Some(player) = player else {
            continue;
        };
        let popup = centered_rect(area, area.width.saturating_sub(8).min(70), 12);
        frame.render_widget(Clear, popup);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(title)
            .title_bottom(Line::from(" Space play · ←→ seek · a album · r artist · Esc close ").right_aligned())
            .style(Style::default().bg(Color::Black));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);
        let video = &player.video;
        let lines = vec![
            Line::from(Span::styled(
                format!("{} {}", status_symbol(player.media.status()), video.song_title()),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(video.user.name.clone(), Style::default().fg(Color::Cyan))),
            Line::default(),
            Line::from(video.description.clone()),
            Line::from(format!("♥ {}  ✉ {}", format_count(video.likes), format_count(video.comments))),
        ];
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), rows[0]);
        render_seek_bar(frame.buffer_mut(), rows[1], &player.media, now);
    }

    if let Some(comments) = stack.comments() {
        let sheet = bottom_sheet(area, 60);
        frame.render_widget(Clear, sheet);
        let items: Vec<ListItem> = comments
            .comments
            .iter()
            .map(|comment| {
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(
                            comment.user.name.clone(),
                            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(format!("  {}", comment.timestamp), Style::default().fg(Color::DarkGray)),
                    ]),
                    Line::from(comment.text.clone()),
                ])
            })
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} comments ", comments.comments.len()))
                    .title_bottom(Line::from(" ↑↓ scroll · Esc close ").right_aligned())
                    .style(Style::default().bg(Color::Black)),
            )
            .highlight_style(Style::default().add_modifier(Modifier::BOLD));
        let mut state = ListState::default();
        state.select(Some(comments.scroll));
        frame.render_stateful_widget(list, sheet, &mut state);
    }

    if let Some(options) = stack.more_options() {
        let height = (MoreOption::ALL.len() as u16 + 2).min(area.height);
        let sheet = Rect {
            y: area.y + area.height - height,
            height,
            ..area
        };
        frame.render_widget(Clear, sheet);
        let items: Vec<ListItem> = MoreOption::ALL
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let style = if i == options.cursor {
                    Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(format!(" {}", option.label())).style(style)
            })
            .collect();
        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", options.video.song_title()))
                .title_bottom(Line::from(" ↑↓ Enter · Esc cancel ").right_aligned())
                .style(Style::default().bg(Color::Black)),
        );
        let mut state = ListState::default();
        state.select(Some(options.cursor));
        frame.render_stateful_widget(list, sheet, &mut state);
    }

    if let Some(info) = stack.song_info() {
        let sheet = bottom_sheet(area, 70);
        frame.render_widget(Clear, sheet);
        let details = &info.video.song_details;
        let mut lines = vec![
            Line::from(Span::styled(
                info.video.song_title().to_string(),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Line::from(format!(
                "{} · {} · {} · {}",
                info.video.user.name,
                details.release_date,
                details.duration,
                info.video.genre_name.as_deref().unwrap_or("-")
            )),
            Line::default(),
        ];
        lines.extend(info.visible_lyrics().lines().map(|l| Line::from(l.to_string())));
        if !info.lyrics_expanded {
            lines.push(Line::from(Span::styled("… e: more", Style::default().fg(Color::DarkGray))));
        }
        lines.push(Line::default());
        lines.push(Line::from(format!("Composer  {}", details.credits.composer)));
        lines.push(Line::from(format!("Lyricist  {}", details.credits.lyricist)));
        lines.push(Line::from(format!("Producer  {}", details.credits.producer)));

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Song information ")
                .title_bottom(Line::from(" Esc close ").right_aligned())
                .style(Style::default().bg(Color::Black)),
        );
        frame.render_widget(paragraph, sheet);
    }

    if let Some(toast) = stack.toast() {
        let width = (toast.message.chars().count() as u16 + 4).min(area.width);
        let rect = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + area.height.saturating_sub(4),
            width,
            height: 3.min(area.height),
        };
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(toast.message.clone())
                .centered()
                .style(Style::default().fg(Color::Black).bg(Color::White))
                .block(Block::default().borders(Borders::ALL).style(Style::default().bg(Color::White))),
            rect,
        );
    }
}

pub fn render_error_notification(frame: &mut Frame, ui_state: &UiState) {
    if let Some(ref error_msg) = ui_state.error_message {
        let area = frame.area();

        let popup_width = 52.min(area.width.saturating_sub(4));
        let inner_width = popup_width.saturating_sub(4).max(1) as usize;

        let error_line_count = ((error_msg.chars().count() as f32) / (inner_width as f32)).ceil() as u16;

        // Height: top border (1) + error lines + bottom border (1)
        let popup_height = (2 + error_line_count.max(1)).min(area.height.saturating_sub(4));
        let popup_area = centered_rect(area, popup_width, popup_height);

        frame.render_widget(Clear, popup_area);

        let error_widget = Paragraph::new(error_msg.to_string())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" Error (Esc to dismiss) ")
                    .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                    .style(Style::default().bg(Color::Black)),
            );

        frame.render_widget(error_widget, popup_area);
    }
}

pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();

    let keybindings = vec![
        ("", "── Navigation ──"),
        ("↑ / ↓", "Move section / next video"),
        ("← / →", "Move item / seek"),
        ("Enter", "Open"),
        ("Backspace / Esc", "Close overlay / go back"),
        ("N", "Open album of the playing song"),
        ("", ""),
        ("", "── Feed ──"),
        ("Tab / ]", "Next genre"),
        ("Shift+Tab / [", "Previous genre"),
        ("Drag", "Swipe genres / scroll videos"),
        ("Space", "Play / Pause"),
        ("L", "Like"),
        ("C", "Comments"),
        ("S", "Share"),
        ("O", "More options"),
        ("M", "Music player"),
        ("A", "Artist profile"),
        ("", ""),
        ("", "── Overlays ──"),
        ("E", "Expand lyrics"),
        ("A / R", "Album / artist of the song"),
        ("", ""),
        ("", "── General ──"),
        ("? / H", "Toggle this help"),
        ("Q", "Quit"),
    ];

    let popup_height = (keybindings.len() as u16 + 2).min(area.height.saturating_sub(4));
    let popup_area = centered_rect(area, 62, popup_height);

    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                // Section header or empty line
                Line::from(Span::styled(
                    format!("{:^38}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>18}", key),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help (? or Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help_text, popup_area);
}
