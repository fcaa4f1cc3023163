//! Fachada del panel de administración de usuarios (`/admin/users`)
//!
//! Solo para admins: se comprueba el rol de la sesión antes de llamar al
//! backend, que vuelve a comprobarlo.

use tracing::info;
use validator::Validate;

use crate::client::ApiClient;
use crate::models::user::{CreateUserRequest, UpdateUserRequest, User, UserId};
use crate::services::require_admin;
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct UserAdminApi {
    client: ApiClient,
}

impl UserAdminApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn ensure_admin(&self) -> AppResult<()> {
        require_admin(&self.client, "manage users")
    }

    pub async fn list(&self) -> AppResult<Vec<User>> {
        self.ensure_admin()?;
        self.client.get_data("/admin/users", "users").await
    }

    pub async fn get(&self, id: UserId) -> AppResult<User> {
        self.ensure_admin()?;
        self.client
            .get_data(&format!("/admin/users/{}", id), "user")
            .await
    }

    pub async fn create(&self, request: &CreateUserRequest) -> AppResult<User> {
        self.ensure_admin()?;
        request.validate()?;
        let user: User = self.client.post_data("/admin/users", request, "user").await?;
        info!("👤 Usuario {} creado con rol {}", user.email, user.role.as_str());
        Ok(user)
    }

    pub async fn update(&self, id: UserId, request: &UpdateUserRequest) -> AppResult<User> {
        self.ensure_admin()?;
        request.validate()?;
        self.client
            .put_data(&format!("/admin/users/{}", id), request, "user")
            .await
    }

    pub async fn delete(&self, id: UserId) -> AppResult<Option<String>> {
        self.ensure_admin()?;
        self.client.delete(&format!("/admin/users/{}", id)).await
    }
}
