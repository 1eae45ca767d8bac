use std::time::{Duration, Instant};

use tracing::debug;

use crate::viewer::common::geometry::{Point, Rect};

/// Default minimum interval between two processed drag events.
pub const DEFAULT_DRAG_INTERVAL: Duration = Duration::from_millis(100);

/// Default minimum movement, per axis, for a release to commit a rectangle.
pub const DEFAULT_MIN_EXTENT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    /// No gesture in progress and no region applied
    Idle,
    /// Button held, draft rectangle following the pointer
    Selecting,
    /// A committed rectangle is applied
    Active,
}

/// What the caller should do after a drag event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Redraw overlays with the new draft rectangle; buffers need no reload
    PreviewRedraw(Rect),
    /// Event dropped by the debounce or outside a gesture
    Ignored,
}

/// How an active selection is applied to the displayed buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CropPolicy {
    /// Slice the buffer to the rectangle before fitting it to the tile
    #[default]
    Crop,
    /// Only outline the rectangle
    DrawOnly,
}

/// Gesture state machine: `press` -> `drag`* -> `release`, plus explicit
/// `set_zoom`/`unset_zoom` toggles on the last committed rectangle.
#[derive(Debug, Clone)]
pub struct RegionSelector {
    state: SelectionState,
    pos0: Option<Point>,
    pos1: Option<Point>,
    committed: Option<Rect>,
    last_event: Option<Instant>,
    drag_interval: Duration,
    min_extent: usize,
}

impl Default for RegionSelector {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_INTERVAL, DEFAULT_MIN_EXTENT)
    }
}

impl RegionSelector {
    pub fn new(drag_interval: Duration, min_extent: usize) -> Self {
        Self {
            state: SelectionState::Idle,
            pos0: None,
            pos1: None,
            committed: None,
            last_event: None,
            drag_interval,
            min_extent,
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Starts a gesture at `point`. Ignored while a region is active.
    pub fn press(&mut self, point: Point, now: Instant) -> bool {
        if self.state == SelectionState::Active {
            debug!("Press ignored: selection active");
            return false;
        }

        self.state = SelectionState::Selecting;
        self.pos0 = Some(point);
        self.pos1 = Some(point);
        self.last_event = Some(now);
        true
    }

    /// Moves the draft corner, at most once per drag interval.
    pub fn drag(&mut self, point: Point, now: Instant) -> DragOutcome {
        if self.state != SelectionState::Selecting {
            return DragOutcome::Ignored;
        }

        if let Some(last) = self.last_event {
            if now.saturating_duration_since(last) < self.drag_interval {
                return DragOutcome::Ignored;
            }
        }
        self.last_event = Some(now);
        self.pos1 = Some(point);

        match self.draft() {
            Some(rect) => DragOutcome::PreviewRedraw(rect),
            None => DragOutcome::Ignored,
        }
    }

    /// Ends the gesture. Commits and returns the normalized rectangle unless the
    /// pointer moved less than the minimum extent on either axis.
    pub fn release(&mut self, point: Point) -> Option<Rect> {
        if self.state != SelectionState::Selecting {
            return None;
        }

        let pos0 = self.pos0?;
        self.pos0 = None;
        self.pos1 = None;

        if point.x.abs_diff(pos0.x) < self.min_extent || point.y.abs_diff(pos0.y) < self.min_extent {
            debug!(
                "Selection discarded: ({}, {}) -> ({}, {}) below {} px",
                pos0.x, pos0.y, point.x, point.y, self.min_extent
            );
            self.state = SelectionState::Idle;
            return None;
        }

        let rect = Rect::from_corners(pos0, point);
        debug!(?rect, "Selection committed");
        self.committed = Some(rect);
        self.state = SelectionState::Active;
        Some(rect)
    }

    /// Re-applies the last committed rectangle.
    pub fn set_zoom(&mut self) {
        if self.committed.is_some() && self.state == SelectionState::Idle {
            self.state = SelectionState::Active;
        }
    }

    /// Stops applying the committed rectangle, keeping it for a later `set_zoom`.
    pub fn unset_zoom(&mut self) {
        if self.state == SelectionState::Active {
            self.state = SelectionState::Idle;
        }
    }

    /// Forgets the gesture and any committed rectangle.
    pub fn clear(&mut self) {
        self.state = SelectionState::Idle;
        self.pos0 = None;
        self.pos1 = None;
        self.committed = None;
        self.last_event = None;
    }

    /// Rectangle between the press point and the latest processed drag.
    pub fn draft(&self) -> Option<Rect> {
        if self.state != SelectionState::Selecting {
            return None;
        }
        Some(Rect::from_corners(self.pos0?, self.pos1?))
    }

    /// Last committed rectangle, applied or not.
    pub fn committed(&self) -> Option<Rect> {
        self.committed
    }

    /// The rectangle currently applied, if any.
    pub fn crop_region(&self) -> Option<Rect> {
        match self.state {
            SelectionState::Active => self.committed,
            _ => None,
        }
    }
}
