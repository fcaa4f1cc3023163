//! Fachada de Trips
//!
//! Un método por endpoint de `/trips`. `TripGateway` es la parte que usan
//! las vistas de calendario y de asignación.

use async_trait::async_trait;
use tracing::info;
use validator::Validate;

use crate::client::ApiClient;
use crate::models::driver::DriverId;
use crate::models::trip::{AssignDriverRequest, CreateTripRequest, Trip, TripId, UpdateTripRequest};
use crate::utils::errors::AppResult;

/// Operaciones sobre trips que necesitan las vistas
#[async_trait]
pub trait TripGateway: Send + Sync {
    async fn all_trips(&self) -> AppResult<Vec<Trip>>;
    async fn driver_trips(&self, driver_id: DriverId) -> AppResult<Vec<Trip>>;
    async fn assign_driver(&self, trip_id: TripId, driver_id: DriverId) -> AppResult<Trip>;
    async fn unassign_driver(&self, trip_id: TripId) -> AppResult<Trip>;
}

#[derive(Clone)]
pub struct TripApi {
    client: ApiClient,
}

impl TripApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> AppResult<Vec<Trip>> {
        self.client.get_data("/trips", "trips").await
    }

    pub async fn get(&self, id: TripId) -> AppResult<Trip> {
        self.client.get_data(&format!("/trips/{}", id), "trip").await
    }

    pub async fn create(&self, request: &CreateTripRequest) -> AppResult<Trip> {
        request.validate()?;
        let trip: Trip = self.client.post_data("/trips", request, "trip").await?;
        info!("🚚 Trip {} creado para {}", trip.trip_code, trip.trip_date);
        Ok(trip)
    }

    pub async fn update(&self, id: TripId, request: &UpdateTripRequest) -> AppResult<Trip> {
        request.validate()?;
        self.client
            .put_data(&format!("/trips/{}", id), request, "trip")
            .await
    }

    pub async fn delete(&self, id: TripId) -> AppResult<Option<String>> {
        self.client.delete(&format!("/trips/{}", id)).await
    }

    pub async fn assign(&self, trip_id: TripId, driver_id: DriverId) -> AppResult<Trip> {
        self.client
            .put_data(
                &format!("/trips/{}/assign-driver", trip_id),
                &AssignDriverRequest { driver_id },
                "trip",
            )
            .await
    }

    pub async fn unassign(&self, trip_id: TripId) -> AppResult<Trip> {
        self.client
            .post_empty_data(&format!("/trips/{}/unassign-driver", trip_id), "trip")
            .await
    }

    pub async fn for_driver(&self, driver_id: DriverId) -> AppResult<Vec<Trip>> {
        self.client
            .get_data(&format!("/drivers/{}/trips", driver_id), "trips")
            .await
    }
}

#[async_trait]
impl TripGateway for TripApi {
    async fn all_trips(&self) -> AppResult<Vec<Trip>> {
        self.list().await
    }

    async fn driver_trips(&self, driver_id: DriverId) -> AppResult<Vec<Trip>> {
        self.for_driver(driver_id).await
    }

    async fn assign_driver(&self, trip_id: TripId, driver_id: DriverId) -> AppResult<Trip> {
        self.assign(trip_id, driver_id).await
    }

    async fn unassign_driver(&self, trip_id: TripId) -> AppResult<Trip> {
        self.unassign(trip_id).await
    }
}
