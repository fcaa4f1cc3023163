//! Calendario mensual
//!
//! Cursor de mes, rejilla fija de 42 celdas (6 semanas empezando en domingo)
//! y agrupación de trips por día.

use std::collections::BTreeSet;

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::models::trip::Trip;
use crate::utils::format::format_month;

pub const GRID_CELLS: usize = 42;
pub const WEEKDAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Mes mostrado; internamente siempre el día 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthCursor {
    first: NaiveDate,
}

impl MonthCursor {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn next(&self) -> Self {
        self.first
            .checked_add_months(Months::new(1))
            .map(|first| Self { first })
            .unwrap_or(*self)
    }

    pub fn prev(&self) -> Self {
        self.first
            .checked_sub_months(Months::new(1))
            .map(|first| Self { first })
            .unwrap_or(*self)
    }

    /// Mismo año y mismo mes
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    pub fn label(&self) -> String {
        format_month(self.year(), self.month())
    }

    /// Domingo en o antes del día 1
    pub fn grid_start(&self) -> NaiveDate {
        let offset = u64::from(self.first.weekday().num_days_from_sunday());
        self.first.checked_sub_days(Days::new(offset)).unwrap_or(self.first)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub in_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub has_trips: bool,
}

/// Fechas con trips dentro del mes mostrado (año y mes exactos)
pub fn trip_days(trips: &[Trip], month: MonthCursor) -> BTreeSet<NaiveDate> {
    trips
        .iter()
        .map(|t| t.trip_date)
        .filter(|d| month.contains(*d))
        .collect()
}

/// Trips de un día concreto, en el orden recibido
pub fn trips_on(trips: &[Trip], date: NaiveDate) -> Vec<&Trip> {
    trips.iter().filter(|t| t.is_on(date)).collect()
}

pub fn month_grid(
    month: MonthCursor,
    trips: &[Trip],
    selected: NaiveDate,
    today: NaiveDate,
) -> Vec<CalendarCell> {
    let marked = trip_days(trips, month);

    month
        .grid_start()
        .iter_days()
        .take(GRID_CELLS)
        .map(|date| {
            let in_month = month.contains(date);
            CalendarCell {
                date,
                in_month,
                is_today: date == today,
                is_selected: date == selected,
                has_trips: in_month && marked.contains(&date),
            }
        })
        .collect()
}
