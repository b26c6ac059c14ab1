// Calendar Layout Library
// Appointment layout and period navigation for day, week and month calendar views

pub mod models;
pub mod services;
pub mod utils;

pub use models::appointment::{Appointment, AppointmentId, AppointmentStatus};
pub use models::layout::{CurrentTimeMarker, DayLayout, Diagnostic, PeriodLayout, Placement};
pub use models::period::{DateRange, Granularity, NavAction, PeriodState};
pub use models::settings::{EngineSettings, TimelineBounds};
pub use services::layout::{LayoutEngine, OverlapResolver, TimeGridMapper};
pub use services::navigation::{NavigationError, NavigationLimits, PeriodNavigator};
pub use services::selection::PeriodSelector;
