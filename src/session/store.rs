//! Store de sesión
//!
//! Ciclo de vida explícito de la sesión: `init` (restaurar token y refrescar
//! usuario), `login`, `register`, `logout`.

use tokio::sync::watch;
use tracing::{info, warn};

use crate::models::user::{LoginRequest, RegisterRequest, User};
use crate::services::AuthApi;
use crate::session::handle::SessionHandle;
use crate::utils::errors::{ApiError, AppResult};

#[derive(Clone)]
pub struct AuthStore {
    session: SessionHandle,
    auth: AuthApi,
}

impl AuthStore {
    pub fn new(session: SessionHandle, auth: AuthApi) -> Self {
        Self { session, auth }
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn current_user(&self) -> Option<User> {
        self.session.current_user()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.session.subscribe()
    }

    /// Restaura la sesión guardada y refresca el usuario con `GET /user`.
    /// Un 401 deja la sesión vacía; otros errores conservan el usuario guardado.
    /// Unas credenciales ilegibles se descartan y se arranca sin sesión.
    pub async fn init(&self) -> AppResult<Option<User>> {
        match self.session.restore() {
            Ok(Some(_)) => {}
            Ok(None) => {
                info!("🔓 Sin sesión guardada");
                return Ok(None);
            }
            Err(e) => {
                warn!("⚠️ Credenciales guardadas ilegibles, se descartan: {}", e);
                self.session.expire();
                return Ok(None);
            }
        }

        match self.auth.me().await {
            Ok(user) => {
                self.session.update_user(user.clone())?;
                info!("✅ Sesión restaurada para {}", user.email);
                Ok(Some(user))
            }
            Err(ApiError::Unauthorized(_)) => Ok(None),
            Err(e) => {
                warn!("⚠️ No se pudo refrescar el usuario, se usa el guardado: {}", e);
                Ok(self.session.current_user())
            }
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> AppResult<User> {
        let payload = self
            .auth
            .login(&LoginRequest {
                email: email.trim().to_string(),
                password: password.to_string(),
            })
            .await?;
        self.session.establish(payload.token, payload.user.clone())?;
        Ok(payload.user)
    }

    pub async fn register(&self, request: &RegisterRequest) -> AppResult<User> {
        let payload = self.auth.register(request).await?;
        self.session.establish(payload.token, payload.user.clone())?;
        Ok(payload.user)
    }

    pub async fn refresh_user(&self) -> AppResult<User> {
        let user = self.auth.me().await?;
        self.session.update_user(user.clone())?;
        Ok(user)
    }

    /// Cierra la sesión; el estado local se borra aunque falle la llamada
    pub async fn logout(&self) {
        if self.session.is_authenticated() {
            if let Err(e) = self.auth.logout().await {
                warn!("⚠️ Error en logout remoto: {}", e);
            }
        }
        self.session.expire();
        info!("👋 Sesión cerrada");
    }
}
