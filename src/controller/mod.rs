//! Controller module - Input handling and model coordination
//!
//! The controller owns no state of its own. Every handler locks the shared
//! model, applies one user intent at the given instant and releases it.
//!
//! - `input`: Key event handling
//! - `pointer`: Mouse drag, wheel and focus events
//! - `navigation`: Screen navigation methods
//! - `playback`: Feed and player playback controls

mod input;
mod pointer;
mod navigation;
mod playback;

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

use crate::model::AppModel;

/// Percent of the track moved by one seek key press
pub const SEEK_STEP: f64 = 5.0;

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
}

impl AppController {
    pub fn new(model: Arc<Mutex<AppModel>>) -> Self {
        Self { model }
    }

    /// Advances every time-driven state machine (animations, settle
    /// detection, deferred overlays, playback clocks)
    pub async fn tick(&self, now: Instant) {
        self.model.lock().await.tick(now);
    }

    pub async fn resize(&self, width: u16, height: u16, now: Instant) {
        tracing::debug!(width, height, "Terminal resized");
        self.model.lock().await.resize(width, height, now);
    }

    pub async fn should_quit(&self) -> bool {
        self.model.lock().await.should_quit()
    }
}
