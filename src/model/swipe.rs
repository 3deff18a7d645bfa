//! Pointer-drag axis locking for the horizontal genre pager
//!
//! One gesture goes Idle -> Determining -> Dragging | Released -> Idle. Once
//! the axis is decided it holds for the rest of the gesture.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SwipePhase {
    #[default]
    Idle,
    Determining,
    /// Horizontal lock: the pager follows the pointer
    Dragging,
    /// Vertical: the gesture belongs to the page's own scroller
    Released,
}

/// What the pager should do after a pointer move
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SwipeUpdate {
    /// No gesture in progress
    Ignored,
    /// Still inside the dead zone
    Pending,
    /// Set the horizontal offset to this value
    ScrollTo(f64),
    /// Vertical movement since the previous sample, for the page's scroller
    Vertical { dy: f64 },
}

/// How a gesture ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeEnd {
    /// Not tracking anything
    None,
    /// Pointer went up without leaving the dead zone
    Tap,
    /// Horizontal drag finished; snap to the nearest page
    Snap,
    /// Vertical gesture finished; nothing for the pager to do
    Released,
}

/// Decides the axis from the motion since pointer-down. `None` while the
/// motion has not exceeded the dead zone on either axis.
pub fn decide_axis(dx: f64, dy: f64, dead_zone: f64) -> Option<Axis> {
    let (ax, ay) = (dx.abs(), dy.abs());
    if ax <= dead_zone && ay <= dead_zone {
        return None;
    }
    if ax > ay {
        Some(Axis::Horizontal)
    } else {
        Some(Axis::Vertical)
    }
}

/// Page whose offset is nearest to `offset`, rounding half up, clamped to
/// the valid range
pub fn nearest_page(offset: f64, width: f64, count: usize) -> usize {
    if count == 0 || width <= 0.0 || !offset.is_finite() {
        return 0;
    }
    let index = (offset / width + 0.5).floor();
    index.clamp(0.0, (count - 1) as f64) as usize
}

#[derive(Clone, Debug, Default)]
pub struct SwipeState {
    phase: SwipePhase,
    origin: (f64, f64),
    last: (f64, f64),
    start_offset: f64,
    dead_zone: f64,
}

impl SwipeState {
    pub fn new(dead_zone: f64) -> Self {
        Self {
            dead_zone,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> SwipePhase {
        self.phase
    }

    /// A drag is in progress that the settle detector must not interpret
    pub fn is_tracking(&self) -> bool {
        matches!(self.phase, SwipePhase::Determining | SwipePhase::Dragging)
    }

    pub fn pointer_down(&mut self, x: f64, y: f64, current_offset: f64) {
        self.phase = SwipePhase::Determining;
        self.origin = (x, y);
        self.last = (x, y);
        self.start_offset = current_offset;
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> SwipeUpdate {
        let dy_step = y - self.last.1;
        self.last = (x, y);
        let dx = x - self.origin.0;
        let dy = y - self.origin.1;

        match self.phase {
            SwipePhase::Idle => SwipeUpdate::Ignored,
            SwipePhase::Determining => match decide_axis(dx, dy, self.dead_zone) {
                None => SwipeUpdate::Pending,
                Some(Axis::Horizontal) => {
                    tracing::debug!(dx, dy, "Swipe locked horizontal");
                    self.phase = SwipePhase::Dragging;
                    SwipeUpdate::ScrollTo(self.start_offset - dx)
                }
                Some(Axis::Vertical) => {
                    tracing::debug!(dx, dy, "Swipe released to vertical scroll");
                    self.phase = SwipePhase::Released;
                    // hand over everything accumulated inside the dead zone
                    SwipeUpdate::Vertical { dy }
                }
            },
            SwipePhase::Dragging => SwipeUpdate::ScrollTo(self.start_offset - dx),
            SwipePhase::Released => SwipeUpdate::Vertical { dy: dy_step },
        }
    }

    pub fn pointer_up(&mut self) -> SwipeEnd {
        let end = match self.phase {
            SwipePhase::Idle => SwipeEnd::None,
            SwipePhase::Determining => SwipeEnd::Tap,
            SwipePhase::Dragging => SwipeEnd::Snap,
            SwipePhase::Released => SwipeEnd::Released,
        };
        self.phase = SwipePhase::Idle;
        end
    }

    /// Pointer left the surface: a horizontal drag still snaps, anything
    /// else is dropped without a tap
    pub fn pointer_leave(&mut self) -> SwipeEnd {
        match self.pointer_up() {
            SwipeEnd::Tap => SwipeEnd::None,
            end => end,
        }
    }
}
