//! Fachada de autenticación (`/login`, `/register`, `/logout`, `/user`)

use validator::Validate;

use crate::client::ApiClient;
use crate::models::user::{AuthPayload, LoginRequest, RegisterRequest, User};
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, request: &LoginRequest) -> AppResult<AuthPayload> {
        request.validate()?;
        self.client.post_data("/login", request, "login").await
    }

    pub async fn register(&self, request: &RegisterRequest) -> AppResult<AuthPayload> {
        request.validate()?;
        self.client.post_data("/register", request, "register").await
    }

    pub async fn logout(&self) -> AppResult<Option<String>> {
        self.client.post_message("/logout").await
    }

    pub async fn me(&self) -> AppResult<User> {
        self.client.get_data("/user", "user").await
    }
}
