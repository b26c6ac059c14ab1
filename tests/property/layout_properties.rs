// Property-based tests for the layout pass and period navigation
// Random days of appointments and random anchors, checked against the layout invariants

use calendar_layout::{
    Appointment, Granularity, LayoutEngine, PeriodSelector, PeriodState, TimelineBounds,
};
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

fn clock(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// (start, end) in minutes, five-minute aligned and ending no later than 23:55
fn interval() -> impl Strategy<Value = (u32, u32)> {
    (0u32..287).prop_flat_map(|start_slot| {
        ((start_slot + 1)..=287).prop_map(move |end_slot| (start_slot * 5, end_slot * 5))
    })
}

fn day_of(intervals: &[(u32, u32)]) -> Vec<Appointment> {
    intervals
        .iter()
        .enumerate()
        .map(|(i, (start, end))| {
            Appointment::new(format!("appt-{i:03}"), "2026-03-02", clock(*start), clock(*end))
        })
        .collect()
}

fn granularity() -> impl Strategy<Value = Granularity> {
    prop_oneof![
        Just(Granularity::Day),
        Just(Granularity::Week),
        Just(Granularity::Month),
    ]
}

fn any_date() -> impl Strategy<Value = NaiveDate> {
    // 1990-01-01 plus up to ~110 years
    (0i64..40_000).prop_map(|offset| NaiveDate::from_ymd_opt(1990, 1, 1).unwrap() + Duration::days(offset))
}

proptest! {
    /// Property: appointments that intersect never share a lane
    #[test]
    fn prop_intersecting_appointments_get_distinct_lanes(
        intervals in prop::collection::vec(interval(), 1..25),
    ) {
        let engine = LayoutEngine::new(TimelineBounds::new(0, 24).unwrap());
        let appointments = day_of(&intervals);
        let refs: Vec<&Appointment> = appointments.iter().collect();
        let (placements, diagnostics) = engine.layout_day(monday(), &refs);

        prop_assert!(diagnostics.is_empty());
        prop_assert_eq!(placements.len(), appointments.len());

        for (i, a) in placements.iter().enumerate() {
            prop_assert!(a.column_index < a.column_count);
            for b in placements.iter().skip(i + 1) {
                if a.start < b.end && b.start < a.end {
                    prop_assert_ne!(a.column_index, b.column_index);
                    prop_assert_eq!(a.column_count, b.column_count);
                }
            }
        }
    }

    /// Property: an appointment that touches nothing spans the full width
    #[test]
    fn prop_isolated_appointment_is_solo(
        intervals in prop::collection::vec(interval(), 1..15),
    ) {
        let engine = LayoutEngine::new(TimelineBounds::new(0, 24).unwrap());
        let appointments = day_of(&intervals);
        let refs: Vec<&Appointment> = appointments.iter().collect();
        let (placements, _) = engine.layout_day(monday(), &refs);

        for a in &placements {
            let isolated = placements
                .iter()
                .filter(|b| b.appointment_id != a.appointment_id)
                .all(|b| b.end <= a.start || a.end <= b.start);
            if isolated {
                prop_assert_eq!((a.column_index, a.column_count), (0, 1));
            }
        }
    }

    /// Property: every placement stays inside the visible window and meets the height floor
    #[test]
    fn prop_geometry_stays_in_window(
        intervals in prop::collection::vec(interval(), 1..25),
        start_hour in 0u32..12,
        span in 1u32..12,
    ) {
        let bounds = TimelineBounds::new(start_hour, start_hour + span).unwrap();
        let window = bounds.window_minutes();
        let engine = LayoutEngine::new(bounds);
        let appointments = day_of(&intervals);
        let refs: Vec<&Appointment> = appointments.iter().collect();
        let (placements, diagnostics) = engine.layout_day(monday(), &refs);

        prop_assert_eq!(placements.len() + diagnostics.len(), appointments.len());
        for placement in &placements {
            prop_assert!(placement.top_offset + placement.height <= window);
            prop_assert!(placement.height >= 15u32.min(window));
        }
    }

    /// Property: next then previous returns to the starting anchor
    #[test]
    fn prop_next_previous_round_trip(
        anchor in any_date(),
        granularity in granularity(),
    ) {
        let state = PeriodState::new(anchor, granularity);
        prop_assert_eq!(state.next().previous().anchor_date, anchor);
        prop_assert_eq!(state.previous().next().anchor_date, anchor);
    }

    /// Property: visible days are contiguous, contain the anchor and fill whole weeks outside day view
    #[test]
    fn prop_visible_days_cover_anchor(
        anchor in any_date(),
        granularity in granularity(),
    ) {
        let days = PeriodSelector::default().visible_days(&PeriodState::new(anchor, granularity));

        prop_assert!(days.contains(&anchor));
        for pair in days.windows(2) {
            prop_assert_eq!(pair[1] - pair[0], Duration::days(1));
        }
        if granularity != Granularity::Day {
            prop_assert_eq!(days.len() % 7, 0);
        }
    }

    /// Property: bucketing accounts for every appointment exactly once
    #[test]
    fn prop_bucketing_is_complete(
        offsets in prop::collection::vec(-40i64..40, 0..60),
        anchor in any_date(),
    ) {
        let appointments: Vec<Appointment> = offsets
            .iter()
            .enumerate()
            .map(|(i, offset)| {
                let date = (anchor + Duration::days(*offset)).format("%Y-%m-%d").to_string();
                Appointment::new(format!("appt-{i}"), date, "09:00", "10:00")
            })
            .collect();

        let selector = PeriodSelector::default();
        let days = selector.visible_days(&PeriodState::new(anchor, Granularity::Month));
        let buckets = selector.bucket_by_day(&appointments, &days);

        prop_assert!(buckets.diagnostics.is_empty());
        prop_assert_eq!(buckets.total() + buckets.outside_period, appointments.len());
    }
}
