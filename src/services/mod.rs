//! Services module
//!
//! Fachadas tipadas del backend REST: un método por endpoint, sin capturar
//! errores (los convierte en estado cada vista).

pub mod auth_api;
pub mod booking_api;
pub mod driver_api;
pub mod profile_api;
pub mod task_api;
pub mod trip_api;
pub mod truck_api;
pub mod user_admin_api;

pub use auth_api::AuthApi;
pub use booking_api::BookingApi;
pub use driver_api::{DriverApi, DriverGateway};
pub use profile_api::ProfileApi;
pub use task_api::TaskApi;
pub use trip_api::{TripApi, TripGateway};
pub use truck_api::TruckApi;
pub use user_admin_api::UserAdminApi;

use crate::client::ApiClient;
use crate::utils::errors::{forbidden_error, AppResult};

/// Comprobación local de rol antes de operaciones de admin
pub(crate) fn require_admin(client: &ApiClient, operation: &str) -> AppResult<()> {
    match client.session().current_user() {
        Some(user) if user.is_admin() => Ok(()),
        _ => Err(forbidden_error(operation)),
    }
}
