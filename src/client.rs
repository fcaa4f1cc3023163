//! Cliente HTTP del backend
//!
//! Configura la URL base y el timeout, adjunta el token bearer de la sesión
//! y desenvuelve el sobre `{success, data, message, errors}`. Ante un 401
//! expira la sesión y redirige a `/login`.

use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::environment::EnvironmentConfig;
use crate::models::api_response::ApiResponse;
use crate::routes::{Navigator, Route};
use crate::session::handle::SessionHandle;
use crate::utils::errors::{ApiError, AppResult};

/// Cliente HTTP compartido por todas las fachadas
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: SessionHandle,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(
        config: &EnvironmentConfig,
        session: SessionHandle,
        navigator: Arc<dyn Navigator>,
    ) -> AppResult<Self> {
        let http = Client::builder().timeout(config.request_timeout()).build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
            navigator,
        })
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL absoluta para `path` (`/trips/3`)
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Request con cabeceras comunes y bearer si hay sesión
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, self.url(path))
            .header("Accept", "application/json");

        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get_data<T: DeserializeOwned>(&self, path: &str, resource: &str) -> AppResult<T> {
        self.execute::<T>(self.request(Method::GET, path))
            .await?
            .into_data(resource)
    }

    pub async fn post_data<B, T>(&self, path: &str, body: &B, resource: &str) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute::<T>(self.request(Method::POST, path).json(body))
            .await?
            .into_data(resource)
    }

    pub async fn put_data<B, T>(&self, path: &str, body: &B, resource: &str) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute::<T>(self.request(Method::PUT, path).json(body))
            .await?
            .into_data(resource)
    }

    /// POST sin body; devuelve `data` (p. ej. el trip tras desasignar)
    pub async fn post_empty_data<T: DeserializeOwned>(&self, path: &str, resource: &str) -> AppResult<T> {
        self.execute::<T>(self.request(Method::POST, path))
            .await?
            .into_data(resource)
    }

    /// POST cuyo `data` no interesa; devuelve el `message` del backend
    pub async fn post_message(&self, path: &str) -> AppResult<Option<String>> {
        let response = self
            .execute::<serde_json::Value>(self.request(Method::POST, path))
            .await?;
        Ok(response.message)
    }

    pub async fn delete(&self, path: &str) -> AppResult<Option<String>> {
        let response = self
            .execute::<serde_json::Value>(self.request(Method::DELETE, path))
            .await?;
        Ok(response.message)
    }

    /// Envía la request y clasifica la respuesta
    pub async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder) -> AppResult<ApiResponse<T>> {
        let response = builder.send().await?;
        let status = response.status();
        let url = response.url().path().to_string();
        let body = response.text().await?;
        debug!("📡 {} {}", status.as_u16(), url);

        if status == StatusCode::UNAUTHORIZED {
            self.handle_unauthorized();
            return Err(ApiError::from_status(status, &body));
        }

        if !status.is_success() {
            warn!("❌ {} respondió {}", url, status);
            return Err(ApiError::from_status(status, &body));
        }

        if body.trim().is_empty() {
            return Ok(ApiResponse {
                success: true,
                data: None,
                message: None,
                errors: None,
            });
        }

        let envelope: ApiResponse<T> = serde_json::from_str(&body)?;
        envelope.ensure_success(status.as_u16())
    }

    fn handle_unauthorized(&self) {
        warn!("🔒 Sesión expirada o token inválido, redirigiendo a login");
        self.session.expire();
        self.navigator.navigate(Route::Login);
    }
}
