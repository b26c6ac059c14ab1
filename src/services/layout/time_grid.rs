//! Time grid mapping.
//!
//! Converts an appointment's clock times into a vertical offset and height inside the visible
//! daily window. Everything is expressed in minutes since the window start; renderers multiply by
//! their own pixels-per-hour scale.

use chrono::{NaiveTime, Timelike};
use thiserror::Error;

use crate::models::appointment::{
    format_clock_time, minutes_since_midnight, AppointmentError, TimedAppointment,
};
use crate::models::layout::SlotGeometry;
use crate::models::settings::TimelineBounds;

/// Default floor so very short appointments stay visible and clickable
pub const DEFAULT_MINIMUM_VISUAL_MINUTES: u32 = 15;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("end {end} is not after start {start}")]
    MalformedInterval { start: NaiveTime, end: NaiveTime },
    #[error("{start}-{end} lies entirely outside the visible window")]
    OutsideVisibleWindow { start: NaiveTime, end: NaiveTime },
}

impl From<MappingError> for AppointmentError {
    fn from(err: MappingError) -> Self {
        match err {
            MappingError::MalformedInterval { .. } => AppointmentError::MalformedInterval {
                detail: err.to_string(),
            },
            MappingError::OutsideVisibleWindow { start, end } => {
                AppointmentError::OutsideVisibleWindow {
                    start: format_clock_time(start),
                    end: format_clock_time(end),
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeGridMapper {
    bounds: TimelineBounds,
    minimum_visual_minutes: u32,
}

impl TimeGridMapper {
    pub fn new(bounds: TimelineBounds) -> Self {
        Self::with_minimum_height(bounds, DEFAULT_MINIMUM_VISUAL_MINUTES)
    }

    pub fn with_minimum_height(bounds: TimelineBounds, minimum_visual_minutes: u32) -> Self {
        // A floor taller than the window could never satisfy top + height <= window.
        let minimum_visual_minutes = minimum_visual_minutes.clamp(1, bounds.window_minutes().max(1));
        Self {
            bounds,
            minimum_visual_minutes,
        }
    }

    pub fn bounds(&self) -> TimelineBounds {
        self.bounds
    }

    pub fn minimum_visual_minutes(&self) -> u32 {
        self.minimum_visual_minutes
    }

    /// Map a start/end pair to clipped geometry.
    pub fn map(&self, start: NaiveTime, end: NaiveTime) -> Result<SlotGeometry, MappingError> {
        let start_minutes = minutes_since_midnight(start);
        let end_minutes = minutes_since_midnight(end);

        if end_minutes <= start_minutes {
            return Err(MappingError::MalformedInterval { start, end });
        }

        let window_start = self.bounds.start_minutes();
        let window_end = self.bounds.end_minutes();
        if end_minutes <= window_start || start_minutes >= window_end {
            return Err(MappingError::OutsideVisibleWindow { start, end });
        }

        let window = self.bounds.window_minutes();
        let top_offset = start_minutes.saturating_sub(window_start);
        let raw_end = (end_minutes - window_start).min(window);
        let height = (raw_end - top_offset).max(self.minimum_visual_minutes);

        // The floor can push a late block past the bottom edge; pull it up instead.
        let top_offset = top_offset.min(window - height);

        Ok(SlotGeometry { top_offset, height })
    }

    pub fn map_appointment(&self, appointment: &TimedAppointment) -> Result<SlotGeometry, MappingError> {
        self.map(appointment.start, appointment.end)
    }

    /// Offset of a wall-clock time inside the window, or `None` when the hour is not visible.
    pub fn offset_for_time(&self, time: NaiveTime) -> Option<u32> {
        if !self.bounds.contains_hour(time.hour()) {
            return None;
        }
        Some(minutes_since_midnight(time) - self.bounds.start_minutes())
    }

    /// Wall-clock time at an offset, snapped down to the slot interval
    pub fn time_at_offset(&self, offset: f32, slot_interval_minutes: u32) -> Option<NaiveTime> {
        if !offset.is_finite() || offset < 0.0 || offset >= self.bounds.window_minutes() as f32 {
            return None;
        }

        let slot = slot_interval_minutes.max(1);
        let minutes = (offset as u32 / slot) * slot + self.bounds.start_minutes();
        NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
    }
}
