//! Fachada de Drivers

use async_trait::async_trait;

use crate::client::ApiClient;
use crate::models::driver::{Driver, DriverId};
use crate::models::trip::Trip;
use crate::utils::errors::AppResult;

#[async_trait]
pub trait DriverGateway: Send + Sync {
    async fn all_drivers(&self) -> AppResult<Vec<Driver>>;
}

#[derive(Clone)]
pub struct DriverApi {
    client: ApiClient,
}

impl DriverApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> AppResult<Vec<Driver>> {
        self.client.get_data("/drivers", "drivers").await
    }

    pub async fn get(&self, id: DriverId) -> AppResult<Driver> {
        self.client.get_data(&format!("/drivers/{}", id), "driver").await
    }

    pub async fn trips(&self, id: DriverId) -> AppResult<Vec<Trip>> {
        self.client
            .get_data(&format!("/drivers/{}/trips", id), "trips")
            .await
    }
}

#[async_trait]
impl DriverGateway for DriverApi {
    async fn all_drivers(&self) -> AppResult<Vec<Driver>> {
        self.list().await
    }
}
