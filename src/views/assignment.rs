//! Gestión de trips y asignación de conductores
//!
//! El admin asigna, cambia o quita el conductor de cada trip. Cada fila tiene
//! su propio estado "en curso" (un conjunto de ids, no un único id) y el trip
//! solo cambia cuando el backend confirma: no hay mutación optimista.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures::future::try_join;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::models::driver::{active_drivers, Driver, DriverId};
use crate::models::trip::{Trip, TripId};
use crate::models::user::User;
use crate::services::{DriverGateway, TripGateway};
use crate::views::banner::{Banner, Banners};

pub const UNASSIGN_VALUE: &str = "unassign";
const ASSIGN_FALLBACK: &str = "Failed to assign driver. Please try again.";
const UNASSIGN_FALLBACK: &str = "Failed to unassign driver. Please try again.";
const LOAD_FALLBACK: &str = "Failed to load trips.";

/// Valor elegido en el selector de conductor de una fila
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriverChoice {
    /// Placeholder: nunca genera una llamada
    None,
    Unassign,
    Assign(DriverId),
}

impl DriverChoice {
    /// Interpreta el valor crudo de un `<select>`; lo desconocido es `None`
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            UNASSIGN_VALUE => DriverChoice::Unassign,
            value => value
                .parse::<DriverId>()
                .map(DriverChoice::Assign)
                .unwrap_or(DriverChoice::None),
        }
    }

    pub fn value(&self) -> String {
        match self {
            DriverChoice::None => String::new(),
            DriverChoice::Unassign => UNASSIGN_VALUE.to_string(),
            DriverChoice::Assign(id) => id.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverOption {
    pub choice: DriverChoice,
    pub label: String,
    pub selected: bool,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AssignmentOutcome {
    /// No se hizo ninguna llamada
    Ignored,
    Updated(Trip),
    Rejected(String),
}

#[derive(Default)]
struct ManagementState {
    viewer: Option<User>,
    trips: Vec<Trip>,
    drivers: Vec<Driver>,
    in_flight: HashSet<TripId>,
    expanded: HashSet<TripId>,
    load_error: Option<String>,
}

impl ManagementState {
    fn trip(&self, id: TripId) -> Option<&Trip> {
        self.trips.iter().find(|t| t.id == id)
    }

    fn driver_name(&self, id: DriverId) -> Option<String> {
        self.drivers.iter().find(|d| d.id == id).map(Driver::full_name)
    }
}

pub struct TripManagementView {
    trips_api: Arc<dyn TripGateway>,
    drivers_api: Arc<dyn DriverGateway>,
    state: Mutex<ManagementState>,
    banners: Banners,
}

impl TripManagementView {
    pub fn new(
        trips_api: Arc<dyn TripGateway>,
        drivers_api: Arc<dyn DriverGateway>,
        viewer: Option<User>,
        banner_dismiss_after: Duration,
    ) -> Self {
        Self {
            trips_api,
            drivers_api,
            state: Mutex::new(ManagementState {
                viewer,
                ..ManagementState::default()
            }),
            banners: Banners::new(banner_dismiss_after),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ManagementState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn can_assign(&self) -> bool {
        self.lock().viewer.as_ref().map_or(false, User::is_admin)
    }

    pub fn viewer(&self) -> Option<User> {
        self.lock().viewer.clone()
    }

    /// Cambia el usuario de la vista. Si deja de ser admin se vacían las filas.
    pub fn set_viewer(&self, viewer: Option<User>) {
        let is_admin = viewer.as_ref().map_or(false, User::is_admin);
        {
            let mut state = self.lock();
            state.viewer = viewer;
            if !is_admin {
                state.trips.clear();
                state.drivers.clear();
                state.expanded.clear();
                state.load_error = None;
            }
        }
        if !is_admin {
            self.banners.dismiss();
        }
    }

    /// Aplica el último cambio de usuario pendiente en `changes`, si lo hay
    pub fn sync_with(&self, changes: &mut watch::Receiver<Option<User>>) -> bool {
        if !changes.has_changed().unwrap_or(false) {
            return false;
        }
        let user = changes.borrow_and_update().clone();
        self.set_viewer(user);
        true
    }

    /// Carga trips y conductores en paralelo; si falla cualquiera no se muestra nada
    pub async fn load(&self) {
        let result = try_join(self.trips_api.all_trips(), self.drivers_api.all_drivers()).await;

        let mut state = self.lock();
        match result {
            Ok((trips, drivers)) => {
                info!("🚚 {} trips y {} conductores cargados", trips.len(), drivers.len());
                state.trips = trips;
                state.drivers = active_drivers(drivers);
                state.load_error = None;
            }
            Err(e) => {
                warn!("❌ Error cargando trips: {}", e);
                state.trips.clear();
                state.drivers.clear();
                state.load_error = Some(e.user_message(LOAD_FALLBACK));
            }
        }
    }

    pub fn trips(&self) -> Vec<Trip> {
        self.lock().trips.clone()
    }

    pub fn trip(&self, id: TripId) -> Option<Trip> {
        self.lock().trip(id).cloned()
    }

    pub fn drivers(&self) -> Vec<Driver> {
        self.lock().drivers.clone()
    }

    pub fn load_error(&self) -> Option<String> {
        self.lock().load_error.clone()
    }

    pub fn banner(&self) -> Option<Banner> {
        self.banners.current()
    }

    pub fn success_message(&self) -> Option<String> {
        self.banners.success_message()
    }

    pub fn error_message(&self) -> Option<String> {
        self.banners.error_message()
    }

    pub fn dismiss_banner(&self) {
        self.banners.dismiss();
    }

    pub fn is_busy(&self, trip_id: TripId) -> bool {
        self.lock().in_flight.contains(&trip_id)
    }

    /// Texto de progreso de la fila mientras hay una llamada en curso
    pub fn busy_hint(&self, trip_id: TripId) -> Option<&'static str> {
        let state = self.lock();
        if !state.in_flight.contains(&trip_id) {
            return None;
        }
        match state.trip(trip_id) {
            Some(trip) if trip.has_driver() => Some("Changing driver..."),
            _ => Some("Assigning driver..."),
        }
    }

    /// Opciones del selector de una fila
    pub fn driver_options(&self, trip_id: TripId) -> Vec<DriverOption> {
        let state = self.lock();
        let Some(trip) = state.trip(trip_id) else {
            return Vec::new();
        };
        let current = trip.driver.as_ref().map(|d| d.id);
        let busy = state.in_flight.contains(&trip_id);

        let mut options = Vec::with_capacity(state.drivers.len() + 1);
        match &trip.driver {
            Some(_) => options.push(DriverOption {
                choice: DriverChoice::Unassign,
                label: "Unassign driver".to_string(),
                selected: false,
                disabled: busy,
            }),
            None => options.push(DriverOption {
                choice: DriverChoice::None,
                label: "Select a driver".to_string(),
                selected: true,
                disabled: true,
            }),
        }

        for driver in &state.drivers {
            options.push(DriverOption {
                choice: DriverChoice::Assign(driver.id),
                label: driver.full_name(),
                selected: current == Some(driver.id),
                disabled: busy,
            });
        }

        // conductor asignado que ya no está activo: se muestra para no perder la selección
        if let Some(assigned) = &trip.driver {
            if !state.drivers.iter().any(|d| d.id == assigned.id) {
                options.push(DriverOption {
                    choice: DriverChoice::Assign(assigned.id),
                    label: format!("{} (inactive)", assigned.full_name()),
                    selected: true,
                    disabled: true,
                });
            }
        }

        options
    }

    pub fn toggle_expanded(&self, trip_id: TripId) -> bool {
        let mut state = self.lock();
        if state.expanded.remove(&trip_id) {
            false
        } else {
            state.expanded.insert(trip_id);
            true
        }
    }

    pub fn is_expanded(&self, trip_id: TripId) -> bool {
        self.lock().expanded.contains(&trip_id)
    }

    /// Aplica la elección del selector de un trip
    pub async fn select_driver(&self, trip_id: TripId, choice: DriverChoice) -> AssignmentOutcome {
        if choice == DriverChoice::None {
            return AssignmentOutcome::Ignored;
        }

        if !self.can_assign() {
            let message = "Only administrators can assign drivers.".to_string();
            self.banners.error(message.clone());
            return AssignmentOutcome::Rejected(message);
        }

        {
            let mut state = self.lock();
            let Some(current) = state
                .trip(trip_id)
                .map(|trip| trip.driver.as_ref().map(|d| d.id))
            else {
                drop(state);
                let message = format!("Trip #{} is not loaded.", trip_id);
                self.banners.error(message.clone());
                return AssignmentOutcome::Rejected(message);
            };

            let no_op = match choice {
                DriverChoice::Unassign => current.is_none(),
                DriverChoice::Assign(driver_id) => current == Some(driver_id),
                DriverChoice::None => true,
            };
            if no_op || state.in_flight.contains(&trip_id) {
                return AssignmentOutcome::Ignored;
            }
            state.in_flight.insert(trip_id);
        }
        self.banners.dismiss();

        let result = match choice {
            DriverChoice::Assign(driver_id) => self.trips_api.assign_driver(trip_id, driver_id).await,
            _ => self.trips_api.unassign_driver(trip_id).await,
        };

        let mut state = self.lock();
        state.in_flight.remove(&trip_id);

        match result {
            Ok(updated) => {
                if let Some(slot) = state.trips.iter_mut().find(|t| t.id == trip_id) {
                    *slot = updated.clone();
                }
                let message = match choice {
                    DriverChoice::Assign(driver_id) => {
                        let name = updated
                            .driver
                            .as_ref()
                            .map(|d| d.full_name())
                            .or_else(|| state.driver_name(driver_id))
                            .unwrap_or_else(|| format!("#{}", driver_id));
                        format!("Driver {} assigned to trip {}", name, updated.trip_code)
                    }
                    _ => format!("Driver removed from trip {}", updated.trip_code),
                };
                drop(state);

                info!("✅ {}", message);
                self.banners.success(message);
                AssignmentOutcome::Updated(updated)
            }
            Err(e) => {
                drop(state);
                let fallback = match choice {
                    DriverChoice::Assign(_) => ASSIGN_FALLBACK,
                    _ => UNASSIGN_FALLBACK,
                };
                let message = e.user_message(fallback);
                warn!("❌ Asignación del trip {} fallida: {}", trip_id, e);
                self.banners.error(message.clone());
                AssignmentOutcome::Rejected(message)
            }
        }
    }

    /// Igual que `select_driver` pero a partir del valor crudo del selector
    pub async fn select_driver_value(&self, trip_id: TripId, raw: &str) -> AssignmentOutcome {
        self.select_driver(trip_id, DriverChoice::parse(raw)).await
    }
}
