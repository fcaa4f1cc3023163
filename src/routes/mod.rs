//! Rutas del cliente
//!
//! Pantallas de la aplicación, permisos por rol y el `Navigator` que usa el
//! cliente HTTP para redirigir a `/login` cuando la sesión expira.

use std::sync::Mutex;

use tracing::info;

use crate::models::user::{User, UserRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    Schedule,
    Trips,
    Trucks,
    Drivers,
    Users,
    Profile,
    Booking,
    Tasks,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::Schedule => "/schedule",
            Route::Trips => "/trips",
            Route::Trucks => "/trucks",
            Route::Drivers => "/drivers",
            Route::Users => "/admin/users",
            Route::Profile => "/profile",
            Route::Booking => "/booking",
            Route::Tasks => "/tasks",
        }
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }

    /// Permisos por rol
    pub fn allows(&self, role: UserRole) -> bool {
        match self {
            Route::Login | Route::Register => true,
            Route::Trucks | Route::Users => role == UserRole::Admin,
            Route::Booking => matches!(role, UserRole::Admin | UserRole::Client),
            Route::Schedule => matches!(role, UserRole::Admin | UserRole::Driver),
            Route::Dashboard | Route::Trips | Route::Drivers | Route::Profile | Route::Tasks => true,
        }
    }
}

/// Resuelve a dónde debe ir realmente una navegación a `route`
pub fn guard(route: Route, user: Option<&User>) -> Route {
    if route.is_public() {
        return route;
    }
    match user {
        None => Route::Login,
        Some(user) if route.allows(user.role) => route,
        Some(_) => Route::Dashboard,
    }
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator de consola: solo deja constancia en el log
#[derive(Debug, Default)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate(&self, route: Route) {
        info!("🧭 Navegando a {}", route.path());
    }
}

/// Guarda el historial de navegación (tests y renderers headless)
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    history: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn history(&self) -> Vec<Route> {
        self.history
            .lock()
            .map(|h| h.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn last(&self) -> Option<Route> {
        self.history().last().copied()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        match self.history.lock() {
            Ok(mut history) => history.push(route),
            Err(poisoned) => poisoned.into_inner().push(route),
        }
    }
}
