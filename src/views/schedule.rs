//! Vista de programación de trips
//!
//! Calendario mensual + lista de trips del día seleccionado, según el rol:
//! el admin ve todos los trips, el driver solo los suyos y el resto de roles
//! no tiene calendario.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::models::driver::DriverId;
use crate::models::trip::{Trip, TripId};
use crate::models::user::{User, UserRole};
use crate::services::TripGateway;
use crate::utils::errors::AppResult;
use crate::utils::format::{
    cargo_label, format_date, format_optional_currency, format_time, status_label,
    trip_status_color,
};
use crate::views::calendar::{month_grid, trip_days, trips_on, CalendarCell, MonthCursor};

pub const UNAVAILABLE_MESSAGE: &str = "Schedules are unavailable for this role.";
const LOAD_FALLBACK: &str = "Failed to load trip schedules.";

/// Qué trips cargar para el usuario actual
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleScope {
    AllTrips,
    Driver(DriverId),
}

impl ScheduleScope {
    pub fn for_user(user: Option<&User>) -> Option<Self> {
        let user = user?;
        match user.role {
            UserRole::Admin => Some(ScheduleScope::AllTrips),
            UserRole::Driver => Some(ScheduleScope::Driver(user.schedule_driver_id())),
            UserRole::Client => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleStatus {
    Idle,
    Loading,
    Ready,
    Unavailable(String),
    Failed(String),
}

/// Ticket de una carga; solo se aplica si sigue siendo el último emitido
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

pub struct ScheduleView {
    gateway: Arc<dyn TripGateway>,
    viewer: Option<User>,
    trips: Vec<Trip>,
    selected_date: NaiveDate,
    current_month: MonthCursor,
    today: NaiveDate,
    status: ScheduleStatus,
    generation: u64,
}

impl ScheduleView {
    pub fn new(gateway: Arc<dyn TripGateway>, today: NaiveDate) -> Self {
        Self {
            gateway,
            viewer: None,
            trips: Vec::new(),
            selected_date: today,
            current_month: MonthCursor::of(today),
            today,
            status: ScheduleStatus::Idle,
            generation: 0,
        }
    }

    pub fn viewer(&self) -> Option<&User> {
        self.viewer.as_ref()
    }

    pub fn status(&self) -> &ScheduleStatus {
        &self.status
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn current_month(&self) -> MonthCursor {
        self.current_month
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            ScheduleStatus::Failed(message) | ScheduleStatus::Unavailable(message) => {
                Some(message.as_str())
            }
            _ => None,
        }
    }

    /// Cambia de usuario sin recargar; cualquier carga en curso queda obsoleta
    pub fn set_viewer(&mut self, user: Option<User>) {
        self.viewer = user;
        self.generation += 1;
    }

    pub async fn on_user_changed(&mut self, user: Option<User>) {
        self.set_viewer(user);
        self.reload().await;
    }

    /// Aplica el último cambio de usuario pendiente en `changes`, si lo hay
    pub async fn sync_with(&mut self, changes: &mut watch::Receiver<Option<User>>) -> bool {
        if !changes.has_changed().unwrap_or(false) {
            return false;
        }
        let user = changes.borrow_and_update().clone();
        self.on_user_changed(user).await;
        true
    }

    pub async fn reload(&mut self) {
        let Some((ticket, scope)) = self.begin_load() else {
            return;
        };
        let result = fetch(self.gateway.as_ref(), scope).await;
        self.finish_load(ticket, result);
    }

    /// Emite un ticket nuevo. `None` si el rol no tiene calendario.
    pub fn begin_load(&mut self) -> Option<(LoadTicket, ScheduleScope)> {
        self.generation += 1;
        match ScheduleScope::for_user(self.viewer.as_ref()) {
            Some(scope) => {
                self.status = ScheduleStatus::Loading;
                Some((LoadTicket(self.generation), scope))
            }
            None => {
                self.trips.clear();
                self.status = ScheduleStatus::Unavailable(UNAVAILABLE_MESSAGE.to_string());
                None
            }
        }
    }

    /// Aplica el resultado de una carga. Devuelve `false` si el ticket es viejo.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: AppResult<Vec<Trip>>) -> bool {
        if ticket.0 != self.generation {
            info!("⏭️ Respuesta de calendario obsoleta descartada");
            return false;
        }

        match result {
            Ok(trips) => {
                info!("📅 {} trips cargados en el calendario", trips.len());
                self.trips = trips;
                self.status = ScheduleStatus::Ready;
            }
            Err(e) => {
                warn!("❌ Error cargando el calendario: {}", e);
                self.trips.clear();
                self.status = ScheduleStatus::Failed(e.user_message(LOAD_FALLBACK));
            }
        }
        true
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
    }

    pub fn next_month(&mut self) {
        self.current_month = self.current_month.next();
    }

    pub fn prev_month(&mut self) {
        self.current_month = self.current_month.prev();
    }

    pub fn days_with_trips(&self) -> BTreeSet<NaiveDate> {
        trip_days(&self.trips, self.current_month)
    }

    pub fn calendar(&self) -> Vec<CalendarCell> {
        month_grid(self.current_month, &self.trips, self.selected_date, self.today)
    }

    pub fn selected_trips(&self) -> Vec<&Trip> {
        trips_on(&self.trips, self.selected_date)
    }

    /// Tarjetas del panel lateral para el día seleccionado
    pub fn day_cards(&self) -> Vec<TripCard> {
        let role = self.viewer.as_ref().map(|u| u.role).unwrap_or(UserRole::Client);
        self.selected_trips()
            .into_iter()
            .map(|trip| TripCard::for_viewer(trip, role))
            .collect()
    }
}

async fn fetch(gateway: &dyn TripGateway, scope: ScheduleScope) -> AppResult<Vec<Trip>> {
    match scope {
        ScheduleScope::AllTrips => gateway.all_trips().await,
        ScheduleScope::Driver(driver_id) => gateway.driver_trips(driver_id).await,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverLine {
    Assigned { name: String, phone: Option<String> },
    NotAssigned,
}

/// Datos de un trip listos para pintar en el panel del día
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripCard {
    pub trip_id: TripId,
    pub trip_code: String,
    pub status: &'static str,
    pub status_color: &'static str,
    pub client_name: String,
    pub client_phone: Option<String>,
    pub route: String,
    pub cargo: String,
    pub truck: String,
    pub timing: String,
    pub estimated_cost: String,
    /// Solo para admins
    pub driver: Option<DriverLine>,
    pub instructions: Option<String>,
}

impl TripCard {
    pub fn for_viewer(trip: &Trip, role: UserRole) -> Self {
        let driver = (role == UserRole::Admin).then(|| match &trip.driver {
            Some(driver) => DriverLine::Assigned {
                name: driver.full_name(),
                phone: driver.phone.clone(),
            },
            None => DriverLine::NotAssigned,
        });

        Self {
            trip_id: trip.id,
            trip_code: trip.trip_code.clone(),
            status: status_label(trip.status),
            status_color: trip_status_color(trip.status),
            client_name: trip.client_name.clone(),
            client_phone: trip.client_phone.clone(),
            route: trip.route_label(),
            cargo: cargo_summary(trip),
            truck: trip.truck.label(),
            timing: timing_summary(trip),
            estimated_cost: format_optional_currency(trip.estimated_cost),
            driver,
            instructions: trip
                .special_instructions
                .as_ref()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

fn cargo_summary(trip: &Trip) -> String {
    let mut parts = vec![cargo_label(trip.cargo_type).to_string()];
    if let Some(weight) = trip.cargo_weight {
        parts.push(format!("{} kg", weight.normalize()));
    }
    if let Some(description) = trip.cargo_description.as_deref().filter(|d| !d.trim().is_empty()) {
        parts.push(description.trim().to_string());
    }
    parts.join(" · ")
}

fn timing_summary(trip: &Trip) -> String {
    let mut timing = format_date(trip.trip_date);
    if let Some(departure) = &trip.departure_time {
        timing.push_str(&format!(" · Departs {}", format_time(departure)));
    }
    if let Some(arrival) = &trip.estimated_arrival_time {
        timing.push_str(&format!(" · ETA {}", format_time(arrival)));
    }
    timing
}
