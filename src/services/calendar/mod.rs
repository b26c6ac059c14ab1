//! Calendar view controller.
//!
//! Owns the navigator and ties it to an appointment source and the layout engine: every render
//! fetches with the visible range as a hint, then runs a full layout pass. Recomputing is cheap and
//! idempotent, so hosts simply call [`CalendarView::render`] after any change.

use anyhow::{Context, Result};

use crate::models::layout::PeriodLayout;
use crate::models::period::{DateRange, NavAction, PeriodState};
use crate::models::settings::EngineSettings;
use crate::services::clock::{Clock, SystemClock};
use crate::services::layout::LayoutEngine;
use crate::services::navigation::{NavigationError, PeriodNavigator};
use crate::services::source::AppointmentSource;

pub struct CalendarView<S: AppointmentSource, C: Clock = SystemClock> {
    engine: LayoutEngine,
    navigator: PeriodNavigator<C>,
    source: S,
}

impl<S: AppointmentSource> CalendarView<S, SystemClock> {
    pub fn from_settings(settings: &EngineSettings, source: S) -> Result<Self> {
        let engine = LayoutEngine::from_settings(settings)?;
        let navigator = PeriodNavigator::from_settings(settings)?;
        Ok(Self::new(engine, navigator, source))
    }
}

impl<S: AppointmentSource, C: Clock> CalendarView<S, C> {
    pub fn new(engine: LayoutEngine, navigator: PeriodNavigator<C>, source: S) -> Self {
        Self {
            engine,
            navigator,
            source,
        }
    }

    pub fn engine(&self) -> &LayoutEngine {
        &self.engine
    }

    pub fn state(&self) -> &PeriodState {
        self.navigator.state()
    }

    pub fn navigator_mut(&mut self) -> &mut PeriodNavigator<C> {
        &mut self.navigator
    }

    /// Range of days currently visible
    pub fn visible_range(&self) -> DateRange {
        self.engine.fetch_range(self.navigator.state())
    }

    pub fn navigate(&mut self, action: NavAction) -> Result<&PeriodState, NavigationError> {
        self.navigator.apply(action)
    }

    /// Move `steps` periods (negative moves back), stopping at the first rejected step.
    ///
    /// Returns the signed number of steps actually taken; the view stays on the last allowed
    /// period.
    pub fn step_by(&mut self, steps: i32) -> i32 {
        let action = if steps < 0 {
            NavAction::Previous
        } else {
            NavAction::Next
        };

        let mut taken = 0;
        for _ in 0..steps.unsigned_abs() {
            if self.navigator.apply(action).is_err() {
                break;
            }
            taken += 1;
        }

        if steps < 0 {
            -taken
        } else {
            taken
        }
    }

    /// Fetch the visible range and lay it out
    pub fn render(&self) -> Result<PeriodLayout> {
        let state = *self.navigator.state();
        let hint = self.engine.fetch_range(&state);
        let appointments = self
            .source
            .fetch_appointments(hint)
            .with_context(|| format!("failed to fetch appointments for {} to {}", hint.start, hint.end))?;

        Ok(self
            .engine
            .layout_with_clock(&appointments, &state, self.navigator.clock()))
    }
}
