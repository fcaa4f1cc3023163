//! Fachada de reservas
//!
//! Un client reserva un trip eligiendo uno de los camiones disponibles.

use validator::Validate;

use crate::client::ApiClient;
use crate::models::trip::{CreateTripRequest, Trip};
use crate::models::truck::Truck;
use crate::utils::errors::{ApiError, AppResult};

#[derive(Clone)]
pub struct BookingApi {
    client: ApiClient,
}

impl BookingApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Camiones reservables (disponibles y activos)
    pub async fn available_trucks(&self) -> AppResult<Vec<Truck>> {
        let trucks: Vec<Truck> = self
            .client
            .get_data("/trucks/available", "trucks")
            .await?;
        Ok(trucks.into_iter().filter(Truck::is_bookable).collect())
    }

    /// Crea la reserva. Una reserva nunca lleva conductor: lo asigna el admin.
    pub async fn book(&self, request: &CreateTripRequest) -> AppResult<Trip> {
        request.validate()?;
        if request.driver_id.is_some() {
            return Err(ApiError::Forbidden(
                "Bookings cannot choose a driver".to_string(),
            ));
        }
        self.client.post_data("/trips", request, "trip").await
    }

    /// Reservas visibles para el usuario actual (el backend filtra por rol)
    pub async fn my_bookings(&self) -> AppResult<Vec<Trip>> {
        self.client.get_data("/trips", "trips").await
    }
}
