//! Fachada de Trucks (CRUD de flota, solo admin salvo `available`)

use validator::Validate;

use crate::client::ApiClient;
use crate::models::truck::{CreateTruckRequest, Truck, TruckId, UpdateTruckRequest};
use crate::services::require_admin;
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct TruckApi {
    client: ApiClient,
}

impl TruckApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> AppResult<Vec<Truck>> {
        self.client.get_data("/trucks", "trucks").await
    }

    pub async fn get(&self, id: TruckId) -> AppResult<Truck> {
        self.client.get_data(&format!("/trucks/{}", id), "truck").await
    }

    pub async fn create(&self, request: &CreateTruckRequest) -> AppResult<Truck> {
        require_admin(&self.client, "manage trucks")?;
        request.validate()?;
        self.client.post_data("/trucks", request, "truck").await
    }

    pub async fn update(&self, id: TruckId, request: &UpdateTruckRequest) -> AppResult<Truck> {
        require_admin(&self.client, "manage trucks")?;
        request.validate()?;
        self.client
            .put_data(&format!("/trucks/{}", id), request, "truck")
            .await
    }

    pub async fn delete(&self, id: TruckId) -> AppResult<Option<String>> {
        require_admin(&self.client, "manage trucks")?;
        self.client.delete(&format!("/trucks/{}", id)).await
    }

    pub async fn available(&self) -> AppResult<Vec<Truck>> {
        self.client.get_data("/trucks/available", "trucks").await
    }
}
