//! Utility functions for rendering UI components

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, List, ListItem, ListState, StatefulWidget},
};

pub fn render_scrollable_list(
    buf: &mut Buffer,
    area: Rect,
    items: Vec<ListItem>,
    selected_index: usize,
    block: Block,
) {
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default()); // Highlight handled by item styles

    let mut list_state = ListState::default();
    list_state.select(Some(selected_index));

    StatefulWidget::render(list, area, buf, &mut list_state);
}

pub fn format_duration(ms: u32) -> String {
    let total_seconds = ms / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{}:{:02}", minutes, seconds)
}

/// Compact counter: 999, 1.2K, 3.4M
pub fn format_count(count: u32) -> String {
    match count {
        0..=999 => count.to_string(),
        1_000..=999_999 => format!("{:.1}K", count as f64 / 1_000.0),
        _ => format!("{:.1}M", count as f64 / 1_000_000.0),
    }
}

/// Calculate width needed for index column (log10(n) + padding)
pub fn calculate_num_width(item_count: usize) -> usize {
    if item_count == 0 {
        2
    } else {
        let digits = (item_count as f64).log10().floor() as usize + 1;
        digits + 1
    }
}

pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() > max_width {
        let truncated: String = s.chars().take(max_width.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}

/// Rectangle of the given size centered in `area`, clipped to it
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Bottom sheet taking `percent` of the area's height
pub fn bottom_sheet(area: Rect, percent: u16) -> Rect {
    let height = (area.height as u32 * percent.min(100) as u32 / 100) as u16;
    let height = height.max(3).min(area.height);
    Rect {
        x: area.x,
        y: area.y + area.height - height,
        width: area.width,
        height,
    }
}

/// Draws into a scratch buffer the size of `area`, then copies it into
/// `buf` moved by `(dx, dy)` cells. Cells pushed outside `area` are dropped,
/// which is how pages and screens slide in and out of view.
pub fn render_shifted(
    buf: &mut Buffer,
    area: Rect,
    dx: i32,
    dy: i32,
    draw: impl FnOnce(Rect, &mut Buffer),
) {
    if dx.unsigned_abs() >= area.width as u32 || dy.unsigned_abs() >= area.height as u32 {
        return;
    }
    let local = Rect::new(0, 0, area.width, area.height);
    let mut scratch = Buffer::empty(local);
    draw(local, &mut scratch);

    for y in 0..area.height {
        let target_y = y as i32 + dy;
        if target_y < 0 || target_y >= area.height as i32 {
            continue;
        }
        for x in 0..area.width {
            let target_x = x as i32 + dx;
            if target_x < 0 || target_x >= area.width as i32 {
                continue;
            }
            buf[(area.x + target_x as u16, area.y + target_y as u16)] = scratch[(x, y)].clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::{Paragraph, Widget};

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_240), "1.2K");
        assert_eq!(format_count(3_400_000), "3.4M");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(195_000), "3:15");
        assert_eq!(format_duration(5_000), "0:05");
    }

    #[test]
    fn shifted_render_clips_to_area() {
        let area = Rect::new(0, 0, 6, 1);
        let mut buf = Buffer::empty(area);
        render_shifted(&mut buf, area, 3, 0, |local, scratch| {
            Paragraph::new("abcdef").render(local, scratch);
        });
        assert_eq!(buf, Buffer::with_lines(["   abc"]));

        let mut buf = Buffer::empty(area);
        render_shifted(&mut buf, area, -2, 0, |local, scratch| {
            Paragraph::new("abcdef").render(local, scratch);
        });
        assert_eq!(buf, Buffer::with_lines(["cdef  "]));
    }

    #[test]
    fn fully_offscreen_draws_nothing() {
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        render_shifted(&mut buf, area, 4, 0, |local, scratch| {
            Paragraph::new("xxxx").render(local, scratch);
        });
        assert_eq!(buf, Buffer::empty(area));
    }

    #[test]
    fn test_bottom_sheet_and_center() {
        let area = Rect::new(0, 0, 80, 20);
        assert_eq!(bottom_sheet(area, 50), Rect::new(0, 10, 80, 10));
        assert_eq!(centered_rect(area, 40, 10), Rect::new(20, 5, 40, 10));
    }
}
