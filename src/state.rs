//! Shared application state
//!
//! Raíz de composición: a partir de un único `EnvironmentConfig` construye
//! la sesión, el cliente HTTP y todas las fachadas, y fabrica las vistas.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::client::ApiClient;
use crate::config::environment::EnvironmentConfig;
use crate::routes::{Navigator, TracingNavigator};
use crate::services::{
    AuthApi, BookingApi, DriverApi, ProfileApi, TaskApi, TripApi, TruckApi, UserAdminApi,
};
use crate::session::{AuthStore, CredentialStore, FileCredentialStore, SessionHandle};
use crate::utils::errors::AppResult;
use crate::views::{ScheduleView, TripManagementView};

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub session: SessionHandle,
    pub client: ApiClient,
    pub auth: AuthStore,
    pub trips: TripApi,
    pub drivers: DriverApi,
    pub trucks: TruckApi,
    pub tasks: TaskApi,
    pub profile: ProfileApi,
    pub users: UserAdminApi,
    pub booking: BookingApi,
}

impl AppState {
    /// Estado con credenciales en `CREDENTIALS_PATH` y navegación por log
    pub fn new(config: EnvironmentConfig) -> AppResult<Self> {
        let store = Arc::new(FileCredentialStore::new(config.credentials_path.clone()));
        Self::with_parts(config, store, Arc::new(TracingNavigator))
    }

    pub fn with_parts(
        config: EnvironmentConfig,
        store: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> AppResult<Self> {
        let session = SessionHandle::new(store);
        let client = ApiClient::new(&config, session.clone(), navigator)?;
        info!("🌐 Backend en {} ({})", client.base_url(), config.environment);

        Ok(Self {
            auth: AuthStore::new(session.clone(), AuthApi::new(client.clone())),
            trips: TripApi::new(client.clone()),
            drivers: DriverApi::new(client.clone()),
            trucks: TruckApi::new(client.clone()),
            tasks: TaskApi::new(client.clone()),
            profile: ProfileApi::new(client.clone()),
            users: UserAdminApi::new(client.clone()),
            booking: BookingApi::new(client.clone()),
            config,
            session,
            client,
        })
    }

    /// Calendario para el usuario actual, ya cargado
    pub async fn schedule_view(&self, today: NaiveDate) -> ScheduleView {
        let mut view = ScheduleView::new(Arc::new(self.trips.clone()), today);
        view.on_user_changed(self.session.current_user()).await;
        view
    }

    /// Gestión de trips para el usuario actual (sin cargar); se mantiene al día
    /// con `sync_with` sobre un receptor de `SessionHandle::subscribe`
    pub fn management_view(&self) -> TripManagementView {
        TripManagementView::new(
            Arc::new(self.trips.clone()),
            Arc::new(self.drivers.clone()),
            self.session.current_user(),
            self.config.banner_dismiss_after(),
        )
    }
}
