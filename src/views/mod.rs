//! Modelos de vista
//!
//! Estado plano que cualquier renderer puede pintar: calendario, trips del
//! día, asignación de conductores y banners.

pub mod assignment;
pub mod banner;
pub mod calendar;
pub mod console;
pub mod schedule;

pub use assignment::{AssignmentOutcome, DriverChoice, DriverOption, TripManagementView};
pub use banner::{Banner, Banners};
pub use calendar::{CalendarCell, MonthCursor};
pub use schedule::{ScheduleScope, ScheduleStatus, ScheduleView, TripCard};
