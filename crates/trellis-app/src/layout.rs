//! Pane geometry.
//!
//! The state machine needs the transcript's inner size to wrap lines, and the
//! renderer needs the same rectangles to draw into. Both read them from
//! [`PaneLayout`] so the two never disagree.

/// Minimum width of the room list, in columns.
pub const ROOM_LIST_MIN_WIDTH: u16 = 12;

/// Composer height including its border.
pub const COMPOSER_HEIGHT: u16 = 3;

/// Status bar height.
pub const STATUS_HEIGHT: u16 = 1;

const ROOM_LIST_FRACTION: u16 = 5;

/// A screen rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pane {
    /// Left column.
    pub x: u16,
    /// Top row.
    pub y: u16,
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl Pane {
    /// Area inside a one-cell border.
    pub fn inner(self) -> Self {
        Self {
            x: self.x.saturating_add(1),
            y: self.y.saturating_add(1),
            width: self.width.saturating_sub(2),
            height: self.height.saturating_sub(2),
        }
    }
}

/// The fixed three-pane frame plus the status bar.
///
/// ```text
/// +-------+------------------+
/// | rooms | transcript       |
/// |       |                  |
/// |       +------------------+
/// |       | composer         |
/// +-------+------------------+
///  status
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaneLayout {
    /// Room list, full body height.
    pub rooms: Pane,
    /// Transcript, right of the room list.
    pub transcript: Pane,
    /// Composer, below the transcript.
    pub composer: Pane,
    /// Status bar, bottom row.
    pub status: Pane,
}

impl PaneLayout {
    /// Compute the layout for a terminal of `cols` x `rows`.
    ///
    /// Degenerate sizes produce zero-sized panes rather than panicking.
    pub fn compute(cols: u16, rows: u16) -> Self {
        let body_height = rows.saturating_sub(STATUS_HEIGHT);
        let rooms_width = (cols / ROOM_LIST_FRACTION).max(ROOM_LIST_MIN_WIDTH).min(cols);
        let right_width = cols - rooms_width;
        let composer_height = COMPOSER_HEIGHT.min(body_height);
        let transcript_height = body_height - composer_height;

        Self {
            rooms: Pane { x: 0, y: 0, width: rooms_width, height: body_height },
            transcript: Pane { x: rooms_width, y: 0, width: right_width, height: transcript_height },
            composer: Pane {
                x: rooms_width,
                y: transcript_height,
                width: right_width,
                height: composer_height,
            },
            status: Pane { x: 0, y: body_height, width: cols, height: rows - body_height },
        }
    }
}
