//! Fachada del perfil propio

use validator::Validate;

use crate::client::ApiClient;
use crate::models::user::{ChangePasswordRequest, UpdateProfileRequest, User};
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct ProfileApi {
    client: ApiClient,
}

impl ProfileApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get(&self) -> AppResult<User> {
        self.client.get_data("/profile", "profile").await
    }

    /// Actualiza el perfil y refresca el usuario de la sesión
    pub async fn update(&self, request: &UpdateProfileRequest) -> AppResult<User> {
        request.validate()?;
        let user: User = self.client.put_data("/profile", request, "profile").await?;
        self.client.session().update_user(user.clone())?;
        Ok(user)
    }

    pub async fn change_password(&self, request: &ChangePasswordRequest) -> AppResult<Option<String>> {
        request.validate()?;
        let response = self
            .client
            .execute::<serde_json::Value>(
                self.client
                    .request(reqwest::Method::PUT, "/profile/password")
                    .json(request),
            )
            .await?;
        Ok(response.message)
    }
}
