//! Layout pass over a whole period.
//!
//! Selects the visible days, buckets appointments, then for each day validates intervals, maps
//! them onto the time grid and packs overlapping ones into lanes. Rejected appointments become
//! diagnostics; every placement that is emitted is complete.

use anyhow::{anyhow, Result};
use chrono::{NaiveDate, NaiveDateTime};

use crate::models::appointment::{Appointment, AppointmentError, TimedAppointment};
use crate::models::layout::{
    DayLayout, Diagnostic, PeriodLayout, Placement, SlotGeometry,
};
use crate::models::period::{DateRange, PeriodState};
use crate::models::settings::{EngineSettings, TimelineBounds};
use crate::services::clock::Clock;
use crate::services::layout::overlap::OverlapResolver;
use crate::services::layout::time_grid::TimeGridMapper;
use crate::services::selection::PeriodSelector;

#[derive(Debug, Clone, Copy)]
pub struct LayoutEngine {
    mapper: TimeGridMapper,
    resolver: OverlapResolver,
    selector: PeriodSelector,
    slot_interval_minutes: u32,
}

impl LayoutEngine {
    pub fn new(bounds: TimelineBounds) -> Self {
        Self {
            mapper: TimeGridMapper::new(bounds),
            resolver: OverlapResolver::new(),
            selector: PeriodSelector::default(),
            slot_interval_minutes: 15,
        }
    }

    pub fn from_settings(settings: &EngineSettings) -> Result<Self> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;
        let bounds = settings
            .bounds()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        Ok(Self {
            mapper: TimeGridMapper::with_minimum_height(bounds, settings.minimum_visual_minutes),
            resolver: OverlapResolver::new(),
            selector: PeriodSelector::new(settings.week_start()),
            slot_interval_minutes: settings.slot_interval_minutes,
        })
    }

    pub fn with_selector(mut self, selector: PeriodSelector) -> Self {
        self.selector = selector;
        self
    }

    pub fn mapper(&self) -> &TimeGridMapper {
        &self.mapper
    }

    pub fn selector(&self) -> &PeriodSelector {
        &self.selector
    }

    pub fn slot_interval_minutes(&self) -> u32 {
        self.slot_interval_minutes
    }

    pub fn visible_days(&self, state: &PeriodState) -> Vec<NaiveDate> {
        self.selector.visible_days(state)
    }

    pub fn fetch_range(&self, state: &PeriodState) -> DateRange {
        self.selector.fetch_range(state)
    }

    /// Lay out a period against an explicit "now"
    pub fn layout(
        &self,
        appointments: &[Appointment],
        state: &PeriodState,
        now: NaiveDateTime,
    ) -> PeriodLayout {
        let days = self.selector.visible_days(state);
        let buckets = self.selector.bucket_by_day(appointments, &days);
        let mut diagnostics = buckets.diagnostics.clone();

        let mut day_layouts = Vec::with_capacity(days.len());
        for date in &days {
            let (placements, day_diagnostics) =
                self.layout_day(*date, buckets.appointments_on(*date));
            diagnostics.extend(day_diagnostics);
            day_layouts.push(DayLayout {
                date: *date,
                is_today: *date == now.date(),
                placements,
            });
        }

        let marker = self.selector.current_time_marker(&days, &self.mapper, now);

        let layout = PeriodLayout {
            state: *state,
            days: day_layouts,
            marker,
            diagnostics,
        };

        log::debug!(
            "Laid out {} placements over {} {} day(s) from {}; {} excluded, {} outside period",
            layout.placement_count(),
            layout.days.len(),
            state.granularity,
            state.anchor_date,
            layout.diagnostics.len(),
            buckets.outside_period
        );

        layout
    }

    /// Lay out a period using the clock for "now"
    pub fn layout_with_clock<C: Clock + ?Sized>(
        &self,
        appointments: &[Appointment],
        state: &PeriodState,
        clock: &C,
    ) -> PeriodLayout {
        self.layout(appointments, state, clock.now())
    }

    /// Placements for one day's bucket plus the appointments that had to be excluded
    pub fn layout_day(
        &self,
        date: NaiveDate,
        appointments: &[&Appointment],
    ) -> (Vec<Placement>, Vec<Diagnostic>) {
        let mut accepted: Vec<(TimedAppointment, SlotGeometry)> = Vec::with_capacity(appointments.len());
        let mut diagnostics = Vec::new();

        for appointment in appointments {
            match self.validate_for_day(date, appointment) {
                Ok(entry) => accepted.push(entry),
                Err(reason) => {
                    log::warn!(
                        "Excluding appointment {} on {} from layout: {}",
                        appointment.id,
                        date,
                        reason
                    );
                    diagnostics.push(Diagnostic {
                        appointment_id: appointment.id.clone(),
                        reason,
                    });
                }
            }
        }

        let timed: Vec<TimedAppointment> = accepted.iter().map(|(timed, _)| timed.clone()).collect();
        let columns = self.resolver.resolve_indexed(&timed);

        let mut placements: Vec<Placement> = accepted
            .into_iter()
            .zip(columns)
            .map(|((timed, geometry), column)| Placement {
                appointment_id: timed.id,
                status: timed.status,
                start: timed.start,
                end: timed.end,
                top_offset: geometry.top_offset,
                height: geometry.height,
                column_index: column.column_index,
                column_count: column.column_count,
            })
            .collect();

        placements.sort_by(|a, b| {
            a.start
                .cmp(&b.start)
                .then_with(|| a.appointment_id.cmp(&b.appointment_id))
        });

        (placements, diagnostics)
    }

    fn validate_for_day(
        &self,
        date: NaiveDate,
        appointment: &Appointment,
    ) -> Result<(TimedAppointment, SlotGeometry), AppointmentError> {
        let (start, end) = appointment.parse_interval()?;
        let geometry = self.mapper.map(start, end)?;

        Ok((
            TimedAppointment {
                id: appointment.id.clone(),
                date,
                start,
                end,
                status: appointment.status,
            },
            geometry,
        ))
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(TimelineBounds::default())
    }
}
