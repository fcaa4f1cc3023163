#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use trucking_portal::models::driver::{Driver, DriverId};
use trucking_portal::models::trip::{CargoType, Trip, TripId, TripStatus};
use trucking_portal::models::truck::TruckSummary;
use trucking_portal::models::user::{User, UserRole};
use trucking_portal::services::{DriverGateway, TripGateway};
use trucking_portal::utils::errors::{ApiError, AppResult};

pub fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
}

pub fn trip(id: TripId, trip_date: &str) -> Trip {
    Trip {
        id,
        trip_code: format!("TRP-{:04}", id),
        trip_date: date(trip_date),
        client_name: "Juan Dela Cruz".to_string(),
        client_email: Some("juan@example.com".to_string()),
        client_phone: Some("09171234567".to_string()),
        departure_location: "Manila".to_string(),
        destination: "Batangas".to_string(),
        departure_time: Some("08:30".to_string()),
        estimated_arrival_time: Some("12:00".to_string()),
        cargo_description: Some("Canned goods".to_string()),
        cargo_weight: Some(Decimal::new(1500, 0)),
        cargo_type: CargoType::General,
        truck_id: 1,
        truck: TruckSummary {
            id: 1,
            truck_number: "TRK-001".to_string(),
            model: Some("Isuzu Elf".to_string()),
            plate_number: Some("ABC 1234".to_string()),
        },
        driver_id: None,
        driver: None,
        status: TripStatus::Pending,
        estimated_cost: Some(Decimal::new(1250000, 2)),
        actual_cost: None,
        special_instructions: None,
    }
}

pub fn with_driver(mut trip: Trip, driver: &Driver) -> Trip {
    trip.driver_id = Some(driver.id);
    trip.driver = Some(driver.summary());
    trip.status = TripStatus::Assigned;
    trip
}

pub fn driver(id: DriverId, first_name: &str, last_name: &str) -> Driver {
    Driver {
        id,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: None,
        phone: Some("09181234567".to_string()),
        license_number: None,
        license_expiry: None,
        is_active: true,
    }
}

pub fn user(id: u64, role: UserRole) -> User {
    User {
        id,
        name: format!("{} {}", role.as_str(), id),
        email: format!("{}{}@example.com", role.as_str(), id),
        role,
        phone: None,
        address: None,
        driver_id: None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    AllTrips,
    DriverTrips(DriverId),
    Assign(TripId, DriverId),
    Unassign(TripId),
}

/// Backend de trips en memoria con puertas por trip para controlar cuándo responde
#[derive(Default)]
pub struct FakeTrips {
    trips: Mutex<Vec<Trip>>,
    drivers: Mutex<Vec<Driver>>,
    calls: Mutex<Vec<GatewayCall>>,
    gates: Mutex<HashMap<TripId, Arc<Notify>>>,
    fail_with: Mutex<Option<String>>,
    fail_list: AtomicBool,
}

impl FakeTrips {
    pub fn new(trips: Vec<Trip>, drivers: Vec<Driver>) -> Arc<Self> {
        let fake = Self::default();
        *fake.trips.lock().unwrap() = trips;
        *fake.drivers.lock().unwrap() = drivers;
        Arc::new(fake)
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Retiene la respuesta de assign/unassign de `trip_id` hasta `notify_one`
    pub fn gate(&self, trip_id: TripId) -> Arc<Notify> {
        self.gates
            .lock()
            .unwrap()
            .entry(trip_id)
            .or_insert_with(|| Arc::new(Notify::new()))
            .clone()
    }

    pub fn fail_mutations(&self, message: &str) {
        *self.fail_with.lock().unwrap() = Some(message.to_string());
    }

    pub fn fail_list(&self) {
        self.fail_list.store(true, Ordering::SeqCst);
    }

    fn record(&self, call: GatewayCall) {
        self.calls.lock().unwrap().push(call);
    }

    async fn wait_gate(&self, trip_id: TripId) {
        let gate = self.gates.lock().unwrap().get(&trip_id).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }

    fn mutation_error(&self) -> Option<ApiError> {
        self.fail_with.lock().unwrap().clone().map(|message| ApiError::Api {
            status: 500,
            message,
        })
    }

    fn update<F: FnOnce(&mut Trip)>(&self, trip_id: TripId, change: F) -> AppResult<Trip> {
        let mut trips = self.trips.lock().unwrap();
        let trip = trips
            .iter_mut()
            .find(|t| t.id == trip_id)
            .ok_or_else(|| ApiError::Api {
                status: 404,
                message: "Trip not found".to_string(),
            })?;
        change(trip);
        Ok(trip.clone())
    }
}

#[async_trait]
impl TripGateway for FakeTrips {
    async fn all_trips(&self) -> AppResult<Vec<Trip>> {
        self.record(GatewayCall::AllTrips);
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(ApiError::Api {
                status: 500,
                message: "Server Error".to_string(),
            });
        }
        Ok(self.trips.lock().unwrap().clone())
    }

    async fn driver_trips(&self, driver_id: DriverId) -> AppResult<Vec<Trip>> {
        self.record(GatewayCall::DriverTrips(driver_id));
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(ApiError::Api {
                status: 500,
                message: "Server Error".to_string(),
            });
        }
        Ok(self
            .trips
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.driver_id == Some(driver_id))
            .cloned()
            .collect())
    }

    async fn assign_driver(&self, trip_id: TripId, driver_id: DriverId) -> AppResult<Trip> {
        self.record(GatewayCall::Assign(trip_id, driver_id));
        self.wait_gate(trip_id).await;
        if let Some(error) = self.mutation_error() {
            return Err(error);
        }
        let summary = self
            .drivers
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == driver_id)
            .map(Driver::summary);
        self.update(trip_id, |trip| {
            trip.driver_id = Some(driver_id);
            trip.driver = summary;
            trip.status = TripStatus::Assigned;
        })
    }

    async fn unassign_driver(&self, trip_id: TripId) -> AppResult<Trip> {
        self.record(GatewayCall::Unassign(trip_id));
        self.wait_gate(trip_id).await;
        if let Some(error) = self.mutation_error() {
            return Err(error);
        }
        self.update(trip_id, |trip| {
            trip.driver_id = None;
            trip.driver = None;
            trip.status = TripStatus::Pending;
        })
    }
}

pub struct FakeDrivers {
    drivers: Vec<Driver>,
    fail: bool,
}

impl FakeDrivers {
    pub fn new(drivers: Vec<Driver>) -> Arc<Self> {
        Arc::new(Self { drivers, fail: false })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            drivers: Vec::new(),
            fail: true,
        })
    }
}

#[async_trait]
impl DriverGateway for FakeDrivers {
    async fn all_drivers(&self) -> AppResult<Vec<Driver>> {
        if self.fail {
            return Err(ApiError::Api {
                status: 500,
                message: "Could not load drivers".to_string(),
            });
        }
        Ok(self.drivers.clone())
    }
}

/// JSON de un trip tal como lo devuelve el backend
pub fn trip_json(id: TripId, trip_date: &str, driver: Option<(DriverId, &str, &str)>) -> serde_json::Value {
    let driver_json = driver.map(|(id, first, last)| {
        json!({ "id": id, "first_name": first, "last_name": last, "phone": "09181234567" })
    });
    json!({
        "id": id,
        "trip_code": format!("TRP-{:04}", id),
        "trip_date": format!("{}T00:00:00.000000Z", trip_date),
        "client_name": "Juan Dela Cruz",
        "client_phone": "09171234567",
        "departure_location": "Manila",
        "destination": "Batangas",
        "departure_time": "08:30:00",
        "cargo_weight": "1500.00",
        "cargo_type": "general",
        "truck_id": 1,
        "truck": { "id": 1, "truck_number": "TRK-001", "model": "Isuzu Elf", "plate_number": "ABC 1234" },
        "driver_id": driver.map(|(id, _, _)| id),
        "driver": driver_json,
        "status": if driver.is_some() { "assigned" } else { "pending" },
        "estimated_cost": "12500.00"
    })
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

#[derive(Debug, Clone)]
pub struct StubResponse {
    /// `None` responde a cualquier request
    pub route: Option<(&'static str, String)>,
    pub status: u16,
    pub body: String,
}

impl StubResponse {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            route: None,
            status,
            body: body.to_string(),
        }
    }

    /// Solo responde a `method path`; cualquier otra request recibe un 404
    pub fn on(method: &'static str, path: &str, status: u16, body: serde_json::Value) -> Self {
        Self {
            route: Some((method, path.to_string())),
            ..Self::json(status, body)
        }
    }

    fn matches(&self, request: &RecordedRequest) -> bool {
        match &self.route {
            Some((method, path)) => request.method == *method && request.path == *path,
            None => true,
        }
    }
}

#[derive(Clone, Default)]
struct StubState {
    responses: Arc<Mutex<Vec<StubResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Backend falso sobre axum: guarda cada request y contesta con la primera
/// respuesta pendiente que encaje
pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

impl StubServer {
    pub async fn start(responses: Vec<StubResponse>) -> Self {
        let state = StubState {
            responses: Arc::new(Mutex::new(responses)),
            ..StubState::default()
        };
        let requests = state.requests.clone();
        let app = Router::new().fallback(record).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{}/api", addr),
            requests,
            handle,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn record(
    State(state): State<StubState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request = RecordedRequest {
        method: method.to_string(),
        path: uri
            .path_and_query()
            .map(|p| p.as_str().to_string())
            .unwrap_or_else(|| uri.path().to_string()),
        headers: headers
            .iter()
            .filter_map(|(name, value)| Some((name.as_str().to_string(), value.to_str().ok()?.to_string())))
            .collect(),
        body: String::from_utf8_lossy(&body).into_owned(),
    };

    let response = {
        let mut pending = state.responses.lock().unwrap();
        pending
            .iter()
            .position(|r| r.matches(&request))
            .map(|index| pending.remove(index))
    };
    state.requests.lock().unwrap().push(request);

    match response {
        Some(stub) => (
            StatusCode::from_u16(stub.status).unwrap(),
            [(header::CONTENT_TYPE, "application/json")],
            stub.body,
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "message": "No stubbed response" })),
        )
            .into_response(),
    }
}
