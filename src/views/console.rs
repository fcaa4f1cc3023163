//! Renderizado en texto plano para el binario

use std::fmt::Write;

use chrono::Datelike;

use crate::utils::format::{format_date, status_label};
use crate::views::assignment::TripManagementView;
use crate::views::calendar::{CalendarCell, MonthCursor, WEEKDAY_HEADERS};
use crate::views::schedule::{DriverLine, ScheduleView, TripCard};

/// Rejilla del mes: `[15]` seleccionado, `*` con trips, `<>` hoy, `.` fuera de mes
pub fn render_calendar(month: MonthCursor, cells: &[CalendarCell]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:^35}", month.label());
    for header in WEEKDAY_HEADERS {
        let _ = write!(out, "{:^5}", header);
    }
    out.push('\n');

    for week in cells.chunks(7) {
        for cell in week {
            let _ = write!(out, "{:^5}", cell_text(cell));
        }
        out.push('\n');
    }
    out
}

fn cell_text(cell: &CalendarCell) -> String {
    if !cell.in_month {
        return ".".to_string();
    }
    let mut text = cell.date.day().to_string();
    if cell.has_trips {
        text.push('*');
    }
    if cell.is_selected {
        text = format!("[{}]", text);
    } else if cell.is_today {
        text = format!("<{}>", text);
    }
    text
}

pub fn render_card(card: &TripCard) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} [{}]", card.trip_code, card.status);
    let _ = writeln!(out, "  Client:  {}", card.client_name);
    if let Some(phone) = &card.client_phone {
        let _ = writeln!(out, "  Phone:   {}", phone);
    }
    let _ = writeln!(out, "  Route:   {}", card.route);
    let _ = writeln!(out, "  Cargo:   {}", card.cargo);
    let _ = writeln!(out, "  Truck:   {}", card.truck);
    let _ = writeln!(out, "  When:    {}", card.timing);
    let _ = writeln!(out, "  Cost:    {}", card.estimated_cost);
    match &card.driver {
        Some(DriverLine::Assigned { name, phone }) => {
            let _ = match phone {
                Some(phone) => writeln!(out, "  Driver:  {} ({})", name, phone),
                None => writeln!(out, "  Driver:  {}", name),
            };
        }
        Some(DriverLine::NotAssigned) => {
            let _ = writeln!(out, "  Driver:  Not assigned");
        }
        None => {}
    }
    if let Some(instructions) = &card.instructions {
        let _ = writeln!(out, "  Notes:   {}", instructions);
    }
    out
}

/// Panel lateral con los trips del día seleccionado
pub fn render_day_panel(view: &ScheduleView) -> String {
    if let Some(message) = view.error_message() {
        return format!("{}\n", message);
    }

    let mut out = format!("Trips on {}\n", format_date(view.selected_date()));
    let cards = view.day_cards();
    if cards.is_empty() {
        out.push_str("  No trips scheduled for this day.\n");
        return out;
    }
    for card in &cards {
        out.push_str(&render_card(card));
    }
    out
}

/// Filas de la gestión de trips con el conductor asignado y las opciones
pub fn render_management(view: &TripManagementView) -> String {
    if let Some(error) = view.load_error() {
        return format!("{}\n", error);
    }

    let mut out = String::new();
    if let Some(message) = view.success_message() {
        let _ = writeln!(out, "✔ {}", message);
    }
    if let Some(message) = view.error_message() {
        let _ = writeln!(out, "✘ {}", message);
    }

    let trips = view.trips();
    if trips.is_empty() {
        out.push_str("No trips found.\n");
        return out;
    }

    for trip in &trips {
        let driver = trip
            .driver
            .as_ref()
            .map(|d| d.full_name())
            .unwrap_or_else(|| "Not assigned".to_string());
        let _ = writeln!(
            out,
            "{:<10} {:<12} {:<28} {:<20} {}",
            trip.trip_code,
            status_label(trip.status),
            trip.route_label(),
            driver,
            view.busy_hint(trip.id).unwrap_or(""),
        );

        if view.is_expanded(trip.id) {
            let options: Vec<String> = view
                .driver_options(trip.id)
                .into_iter()
                .map(|o| if o.selected { format!("({})", o.label) } else { o.label })
                .collect();
            let _ = writeln!(out, "           options: {}", options.join(" | "));
        }
    }
    out
}
