// Report service
// Plain-text rendering of a layout pass, used by the command line host

use std::fmt::Write;

use chrono::Datelike;

use crate::models::layout::PeriodLayout;
use crate::services::labels::{format_time_range, period_title, CalendarLabels};

/// Render a layout as a text report.
///
/// Empty days are listed only for day and week views so month reports stay compact.
pub fn render_text(
    layout: &PeriodLayout,
    labels: &dyn CalendarLabels,
    pixels_per_hour: f32,
) -> String {
    let mut out = String::new();
    let days: Vec<_> = layout.days.iter().map(|day| day.date).collect();
    let compact = days.len() > 7;

    let _ = writeln!(out, "{}", period_title(&layout.state, &days, labels));

    for (idx, day) in layout.days.iter().enumerate() {
        if compact && day.placements.is_empty() {
            continue;
        }

        let today = if day.is_today { " (today)" } else { "" };
        let _ = writeln!(
            out,
            "\n{} {} {}{}",
            labels.weekday_name(day.date.weekday()),
            day.date.day(),
            labels.month_name(day.date.month()),
            today
        );

        if day.placements.is_empty() {
            let _ = writeln!(out, "  (no appointments)");
        }

        for placement in &day.placements {
            let rect = placement.scaled(pixels_per_hour);
            let _ = writeln!(
                out,
                "  {}  lane {}/{}  {} [{}]  top {:.0}px height {:.0}px",
                format_time_range(placement.start, placement.end),
                placement.column_index + 1,
                placement.column_count,
                placement.appointment_id,
                placement.status.label(),
                rect.top,
                rect.height
            );
        }

        if layout.marker.visible && layout.marker.day_index == Some(idx) {
            if let Some(offset) = layout.marker.top_offset {
                let _ = writeln!(
                    out,
                    "  -- now -- {:.0}px",
                    offset as f32 * pixels_per_hour / 60.0
                );
            }
        }
    }

    if !layout.diagnostics.is_empty() {
        let _ = writeln!(out, "\nExcluded:");
        for diagnostic in &layout.diagnostics {
            let _ = writeln!(out, "  {}: {}", diagnostic.appointment_id, diagnostic.reason);
        }
    }

    out
}
