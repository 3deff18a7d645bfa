//! Mouse and focus event handling
//!
//! Left-button press, drag and release feed the pager's swipe state machine.
//! Losing terminal focus mid-drag ends the gesture the way a pointer leaving
//! the surface would.

use std::time::Instant;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::model::SwipeEnd;
use super::AppController;

/// Columns moved by one horizontal wheel notch
const WHEEL_COLUMNS: f64 = 8.0;

impl AppController {
    pub async fn handle_mouse_event(&self, mouse: MouseEvent, now: Instant) {
        let mut model = self.model.lock().await;
        if model.has_error() || model.is_help_popup_open() {
            return;
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                model.pointer_down(mouse.column, mouse.row);
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                model.pointer_move(mouse.column, mouse.row, now);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if model.pointer_up(now) == SwipeEnd::Tap {
                    model.tap(mouse.column, mouse.row, now);
                }
            }
            MouseEventKind::ScrollDown => model.wheel(true, now),
            MouseEventKind::ScrollUp => model.wheel(false, now),
            MouseEventKind::ScrollRight => model.scroll_pager(WHEEL_COLUMNS, now),
            MouseEventKind::ScrollLeft => model.scroll_pager(-WHEEL_COLUMNS, now),
            _ => {}
        }
    }

    pub async fn handle_focus_lost(&self, now: Instant) {
        tracing::debug!("Terminal focus lost, ending any gesture");
        self.model.lock().await.pointer_leave(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::model::{AppModel, FeedKind};
    use crossterm::event::KeyModifiers;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Mutex;

    fn event(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    async fn genre_controller(now: Instant) -> AppController {
        let mut model = AppModel::new(AppConfig::default());
        model.resize(100, 40, now);
        let genre = model.catalog().genres[0].clone();
        model.select_genre(&genre, now);
        AppController::new(Arc::new(Mutex::new(model)))
    }

    #[tokio::test]
    async fn focus_lost_mid_drag_snaps_back() {
        let start = Instant::now();
        let controller = genre_controller(start).await;

        controller.handle_mouse_event(event(MouseEventKind::Down(MouseButton::Left), 50, 10), start).await;
        controller.handle_mouse_event(event(MouseEventKind::Drag(MouseButton::Left), 30, 10), start).await;
        controller.handle_focus_lost(start).await;

        let mut now = start;
        for _ in 0..16 {
            now += Duration::from_millis(50);
            controller.tick(now).await;
        }

        let model = controller.model.lock().await;
        let FeedKind::Genre(pager) = &model.feed().unwrap().kind else {
            panic!("expected genre pager");
        };
        assert_eq!(pager.offset(), 0.0);
        assert!(!pager.swipe().is_tracking());
    }

    #[tokio::test]
    async fn vertical_wheel_moves_one_item() {
        let start = Instant::now();
        let controller = genre_controller(start).await;

        controller.handle_mouse_event(event(MouseEventKind::ScrollDown, 10, 10), start).await;
        controller.tick(start + Duration::from_millis(400)).await;

        let model = controller.model.lock().await;
        let feed = model.feed().and_then(|f| f.focused_feed()).unwrap();
        assert_eq!(feed.current_entry(), 1);
    }
}
