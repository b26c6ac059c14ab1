// Layout module
// Output records of a layout pass: placements per day, diagnostics and the current-time marker

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::models::appointment::{AppointmentError, AppointmentId, AppointmentStatus};
use crate::models::period::PeriodState;

/// Vertical geometry of one appointment, in minutes since the window start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotGeometry {
    pub top_offset: u32,
    pub height: u32,
}

/// Lane assigned by the overlap resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnAssignment {
    pub column_index: usize,
    pub column_count: usize,
}

impl ColumnAssignment {
    pub const SOLO: ColumnAssignment = ColumnAssignment {
        column_index: 0,
        column_count: 1,
    };

    /// Horizontal start of the lane as a fraction of the day column width
    pub fn left_fraction(&self) -> f32 {
        self.column_index as f32 / self.column_count.max(1) as f32
    }

    /// Lane width as a fraction of the day column width
    pub fn width_fraction(&self) -> f32 {
        1.0 / self.column_count.max(1) as f32
    }
}

/// Final geometry for one appointment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    pub appointment_id: AppointmentId,
    pub status: AppointmentStatus,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub top_offset: u32,
    pub height: u32,
    pub column_index: usize,
    pub column_count: usize,
}

/// Placement converted to pixels for a renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub top: f32,
    pub height: f32,
    pub left_fraction: f32,
    pub width_fraction: f32,
}

impl Placement {
    pub fn columns(&self) -> ColumnAssignment {
        ColumnAssignment {
            column_index: self.column_index,
            column_count: self.column_count,
        }
    }

    /// Scale minute offsets by the renderer's pixels-per-hour constant
    pub fn scaled(&self, pixels_per_hour: f32) -> PixelRect {
        let per_minute = pixels_per_hour / 60.0;
        let columns = self.columns();
        PixelRect {
            top: self.top_offset as f32 * per_minute,
            height: self.height as f32 * per_minute,
            left_fraction: columns.left_fraction(),
            width_fraction: columns.width_fraction(),
        }
    }

    /// Whether a vertical offset (minutes since window start) falls inside this placement
    pub fn covers_offset(&self, offset: f32) -> bool {
        let top = self.top_offset as f32;
        top <= offset && offset < top + self.height as f32
    }

    /// Whether a horizontal fraction of the day column falls inside this placement's lane
    pub fn covers_fraction(&self, fraction: f32) -> bool {
        let columns = self.columns();
        let left = columns.left_fraction();
        left <= fraction && fraction < left + columns.width_fraction()
    }
}

/// Why an appointment was left out of the layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub appointment_id: AppointmentId,
    pub reason: AppointmentError,
}

/// All placements of one visible day, ordered by start time then id
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayLayout {
    pub date: NaiveDate,
    pub is_today: bool,
    pub placements: Vec<Placement>,
}

/// "Now" line across today's column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurrentTimeMarker {
    pub visible: bool,
    /// Index of today among the visible days
    pub day_index: Option<usize>,
    /// Minutes since the window start
    pub top_offset: Option<u32>,
}

impl CurrentTimeMarker {
    pub const HIDDEN: CurrentTimeMarker = CurrentTimeMarker {
        visible: false,
        day_index: None,
        top_offset: None,
    };
}

/// Result of one layout pass over a period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodLayout {
    pub state: PeriodState,
    pub days: Vec<DayLayout>,
    pub marker: CurrentTimeMarker,
    pub diagnostics: Vec<Diagnostic>,
}

impl PeriodLayout {
    pub fn placement_count(&self) -> usize {
        self.days.iter().map(|day| day.placements.len()).sum()
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayLayout> {
        self.days.iter().find(|day| day.date == date)
    }
}
