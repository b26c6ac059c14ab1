//! Click targeting.
//!
//! The engine only reports which geometry region a pointer landed on. What happens next
//! (opening an editor, starting a new booking) belongs to the host's [`ActivationHandler`].

use chrono::{NaiveDate, NaiveTime};

use crate::models::appointment::AppointmentId;
use crate::models::layout::DayLayout;
use crate::services::layout::LayoutEngine;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    Appointment(AppointmentId),
    EmptySlot { date: NaiveDate, time: NaiveTime },
}

/// Host callbacks for activated regions
#[cfg_attr(test, mockall::automock)]
pub trait ActivationHandler {
    fn on_appointment_activated(&mut self, appointment_id: &AppointmentId);

    fn on_empty_slot_activated(&mut self, date: NaiveDate, time: NaiveTime);
}

/// Find what lies under a point of a day column.
///
/// `offset_minutes` is measured from the top of the visible window; `x_fraction` is the horizontal
/// position inside the day column in `[0, 1)`. Points outside the column return `None`.
pub fn hit_test(
    engine: &LayoutEngine,
    day: &DayLayout,
    offset_minutes: f32,
    x_fraction: f32,
) -> Option<HitTarget> {
    if !(0.0..1.0).contains(&x_fraction) {
        return None;
    }

    // Later placements are painted on top
    if let Some(placement) = day
        .placements
        .iter()
        .rev()
        .find(|p| p.covers_offset(offset_minutes) && p.covers_fraction(x_fraction))
    {
        return Some(HitTarget::Appointment(placement.appointment_id.clone()));
    }

    engine
        .mapper()
        .time_at_offset(offset_minutes, engine.slot_interval_minutes())
        .map(|time| HitTarget::EmptySlot {
            date: day.date,
            time,
        })
}

/// Forward a hit to the host handler
pub fn dispatch_activation(target: &HitTarget, handler: &mut dyn ActivationHandler) {
    match target {
        HitTarget::Appointment(id) => {
            log::debug!("Appointment {} activated", id);
            handler.on_appointment_activated(id);
        }
        HitTarget::EmptySlot { date, time } => {
            log::debug!("Empty slot {} {} activated", date, time);
            handler.on_empty_slot_activated(*date, *time);
        }
    }
}
