//! Responsive row-count fitting.
//!
//! When a table does not have a fixed page size, its page size follows the space
//! the host gives it: every observed container height is turned into the number of
//! rows that fit below the header.
//!
//! ```text
//! usable = height - header_height
//! rows   = max(min_rows, usable / row_height)
//! ```
//!
//! Resize notifications tend to arrive in bursts. [`FrameScheduler`] coalesces them:
//! each observation bumps a tag and schedules a [`FitFrameMsg`] one frame later, and
//! only the frame carrying the newest tag is honoured, so a burst results in a single
//! recomputation.
//!
//! ```rust
//! use bubbletea_datatable::fitter::RowFitter;
//!
//! let fitter = RowFitter::new().with_header_height(48).with_row_height(48);
//! assert_eq!(fitter.rows_for(600), Some(11));
//! assert_eq!(fitter.rows_for(150), Some(5)); // floor of MIN_ROWS
//! assert_eq!(fitter.rows_for(0), None); // not laid out yet
//! ```

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

/// Smallest page size the fitter will ever produce.
pub const MIN_ROWS: usize = 5;

/// Delay used to coalesce resize bursts into one recomputation.
pub const FRAME: Duration = Duration::from_millis(16);

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Computes how many rows fit a container of a given height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowFitter {
    /// Lower bound of the computed row count.
    pub min_rows: usize,
    /// Height taken by the header, in the same unit as the container height.
    pub header_height: usize,
    /// Height of a single body row.
    pub row_height: usize,
}

impl Default for RowFitter {
    /// A terminal layout: a one-line header plus its rule, one line per row.
    fn default() -> Self {
        Self {
            min_rows: MIN_ROWS,
            header_height: 2,
            row_height: 1,
        }
    }
}

impl RowFitter {
    /// Creates a fitter with the terminal defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum row count (builder pattern).
    pub fn with_min_rows(mut self, min_rows: usize) -> Self {
        self.min_rows = min_rows;
        self
    }

    /// Sets the header height (builder pattern).
    pub fn with_header_height(mut self, height: usize) -> Self {
        self.header_height = height;
        self
    }

    /// Sets the row height (builder pattern). Values below 1 are clamped to 1.
    pub fn with_row_height(mut self, height: usize) -> Self {
        self.row_height = height.max(1);
        self
    }

    /// Rows that fit a container of `height`, or `None` when the container has not
    /// been laid out yet (height 0).
    pub fn rows_for(&self, height: usize) -> Option<usize> {
        if height == 0 {
            return None;
        }
        let usable = height.saturating_sub(self.header_height);
        let rows = usable / self.row_height.max(1);
        Some(rows.max(self.min_rows).max(1))
    }

    /// Like [`rows_for`](Self::rows_for) but only yields a value when it differs
    /// from `current`, so writing it back cannot start a resize loop.
    pub fn observe(&self, height: usize, current: usize) -> Option<usize> {
        let rows = self.rows_for(height)?;
        if rows == current {
            log::trace!("fitter: height {height} keeps page size {current}");
            return None;
        }
        log::debug!("fitter: height {height} changes page size {current} -> {rows}");
        Some(rows)
    }
}

/// Frame message delivering a coalesced container height to its table.
#[derive(Debug, Clone, Copy)]
pub struct FitFrameMsg {
    /// Scheduler that produced this frame.
    pub id: i64,
    /// Observation generation; stale generations are ignored.
    pub tag: u64,
}

/// Coalesces bursts of height observations into one per frame.
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    id: i64,
    tag: u64,
    pending: Option<usize>,
    frame: Duration,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler {
    /// Creates a scheduler with a unique id.
    pub fn new() -> Self {
        Self {
            id: next_id(),
            tag: 0,
            pending: None,
            frame: FRAME,
        }
    }

    /// The id stamped on this scheduler's frame messages.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Records `height` as the latest observation and returns the frame command
    /// that will deliver it.
    pub fn schedule(&mut self, height: usize) -> Cmd {
        self.pending = Some(height);
        self.tag += 1;
        let id = self.id;
        let tag = self.tag;
        bubbletea_tick(self.frame, move |_| Box::new(FitFrameMsg { id, tag }) as Msg)
    }

    /// The frame message the most recent [`schedule`](Self::schedule) will send.
    pub fn frame_msg(&self) -> FitFrameMsg {
        FitFrameMsg {
            id: self.id,
            tag: self.tag,
        }
    }

    /// Takes the pending height if `msg` is the newest frame for this scheduler.
    pub fn take(&mut self, msg: &FitFrameMsg) -> Option<usize> {
        if msg.id != self.id || msg.tag != self.tag {
            return None;
        }
        self.pending.take()
    }
}
