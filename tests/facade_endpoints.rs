mod common;

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;

use common::{trip_json, user, StubResponse, StubServer};
use trucking_portal::config::environment::EnvironmentConfig;
use trucking_portal::models::task::{TaskRequest, TaskStatus};
use trucking_portal::models::trip::{CargoType, CreateTripRequest, TripStatus, UpdateTripRequest};
use trucking_portal::models::truck::{CreateTruckRequest, TruckStatus, UpdateTruckRequest};
use trucking_portal::models::user::{CreateUserRequest, UpdateUserRequest, UserRole};
use trucking_portal::routes::RecordingNavigator;
use trucking_portal::session::{MemoryCredentialStore, StoredCredentials};
use trucking_portal::state::AppState;
use trucking_portal::utils::errors::ApiError;

fn signed_in(server: &StubServer, role: UserRole) -> AppState {
    let config = EnvironmentConfig {
        api_base_url: server.base_url.clone(),
        request_timeout_secs: 5,
        ..EnvironmentConfig::default()
    };
    let store = Arc::new(MemoryCredentialStore::with(StoredCredentials {
        token: "7|secret-token".to_string(),
        user: Some(user(1, role)),
    }));
    let state = AppState::with_parts(config, store, Arc::new(RecordingNavigator::default())).unwrap();
    state.session.restore().unwrap();
    state
}

fn ok(data: serde_json::Value) -> serde_json::Value {
    json!({ "success": true, "data": data })
}

fn deleted(message: &str) -> serde_json::Value {
    json!({ "success": true, "message": message })
}

fn truck_json(id: u64, number: &str) -> serde_json::Value {
    json!({
        "id": id,
        "truck_number": number,
        "model": "Hino 300",
        "plate_number": "NBC 4521",
        "is_available": true,
        "status": "active"
    })
}

fn task_json(id: u64, title: &str, status: &str) -> serde_json::Value {
    json!({ "id": id, "title": title, "status": status, "due_date": "2025-09-01" })
}

fn user_json(id: u64, name: &str, role: &str) -> serde_json::Value {
    json!({ "id": id, "name": name, "email": format!("user{}@example.com", id), "role": role })
}

/// (método, path) de cada request, en orden
fn routes(server: &StubServer) -> Vec<(String, String)> {
    server
        .requests()
        .into_iter()
        .map(|r| (r.method, r.path))
        .collect()
}

fn route(method: &str, path: &str) -> (String, String) {
    (method.to_string(), path.to_string())
}

#[tokio::test]
async fn test_trip_crud_endpoints() {
    let server = StubServer::start(vec![
        StubResponse::on("GET", "/api/trips/5", 200, ok(trip_json(5, "2025-09-02", None))),
        StubResponse::on("POST", "/api/trips", 201, ok(trip_json(6, "2025-09-03", None))),
        StubResponse::on("PUT", "/api/trips/6", 200, ok(trip_json(6, "2025-09-04", None))),
        StubResponse::on("DELETE", "/api/trips/6", 200, deleted("Trip deleted successfully")),
    ])
    .await;
    let state = signed_in(&server, UserRole::Admin);

    let trip = state.trips.get(5).await.unwrap();
    assert_eq!(trip.id, 5);

    let created = state
        .trips
        .create(&CreateTripRequest {
            trip_date: NaiveDate::from_ymd_opt(2025, 9, 3).unwrap(),
            client_name: "Juan Dela Cruz".to_string(),
            client_email: Some("juan@example.com".to_string()),
            client_phone: Some("09171234567".to_string()),
            departure_location: "Manila".to_string(),
            destination: "Batangas".to_string(),
            departure_time: Some("08:30".to_string()),
            cargo_description: None,
            cargo_weight: None,
            cargo_type: CargoType::Fragile,
            truck_id: 1,
            driver_id: None,
            estimated_cost: None,
            special_instructions: None,
        })
        .await
        .unwrap();
    assert_eq!(created.id, 6);

    let updated = state
        .trips
        .update(
            6,
            &UpdateTripRequest {
                trip_date: NaiveDate::from_ymd_opt(2025, 9, 4),
                status: Some(TripStatus::Cancelled),
                ..UpdateTripRequest::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.trip_date.to_string(), "2025-09-04");

    let message = state.trips.delete(6).await.unwrap();
    assert_eq!(message.as_deref(), Some("Trip deleted successfully"));

    assert_eq!(
        routes(&server),
        vec![
            route("GET", "/api/trips/5"),
            route("POST", "/api/trips"),
            route("PUT", "/api/trips/6"),
            route("DELETE", "/api/trips/6"),
        ]
    );
    let requests = server.requests();
    let created_body = requests[1].json();
    assert_eq!(created_body["trip_date"], "2025-09-03");
    assert_eq!(created_body["cargo_type"], "fragile");
    assert_eq!(created_body["truck_id"], 1);
    assert_eq!(
        requests[2].json(),
        json!({ "trip_date": "2025-09-04", "status": "cancelled" })
    );
}

#[tokio::test]
async fn test_driver_endpoints() {
    let server = StubServer::start(vec![
        StubResponse::on(
            "GET",
            "/api/drivers/4",
            200,
            ok(json!({ "id": 4, "first_name": "Pedro", "last_name": "Santos", "is_active": true })),
        ),
        StubResponse::on(
            "GET",
            "/api/drivers/4/trips",
            200,
            ok(json!([trip_json(9, "2025-09-05", Some((4, "Pedro", "Santos")))])),
        ),
    ])
    .await;
    let state = signed_in(&server, UserRole::Admin);

    let driver = state.drivers.get(4).await.unwrap();
    assert_eq!(driver.full_name(), "Pedro Santos");

    let trips = state.drivers.trips(4).await.unwrap();
    assert_eq!(trips[0].driver_id, Some(4));

    assert_eq!(
        routes(&server),
        vec![route("GET", "/api/drivers/4"), route("GET", "/api/drivers/4/trips")]
    );
}

#[tokio::test]
async fn test_truck_crud_endpoints() {
    let server = StubServer::start(vec![
        StubResponse::on("GET", "/api/trucks", 200, ok(json!([truck_json(1, "TRK-001")]))),
        StubResponse::on("GET", "/api/trucks/1", 200, ok(truck_json(1, "TRK-001"))),
        StubResponse::on("POST", "/api/trucks", 201, ok(truck_json(10, "TRK-010"))),
        StubResponse::on("PUT", "/api/trucks/10", 200, ok(truck_json(10, "TRK-010"))),
        StubResponse::on("DELETE", "/api/trucks/10", 200, deleted("Truck deleted successfully")),
        StubResponse::on("GET", "/api/trucks/available", 200, ok(json!([truck_json(1, "TRK-001")]))),
    ])
    .await;
    let state = signed_in(&server, UserRole::Admin);

    assert_eq!(state.trucks.list().await.unwrap().len(), 1);
    assert_eq!(state.trucks.get(1).await.unwrap().truck_number, "TRK-001");

    let created = state
        .trucks
        .create(&CreateTruckRequest {
            truck_number: "TRK-010".to_string(),
            model: "Hino 300".to_string(),
            plate_number: "NBC 4521".to_string(),
            color: Some("White".to_string()),
            year: Some(2021),
            is_available: true,
            status: TruckStatus::Active,
        })
        .await
        .unwrap();
    assert_eq!(created.id, 10);

    state
        .trucks
        .update(
            10,
            &UpdateTruckRequest {
                status: Some(TruckStatus::Maintenance),
                is_available: Some(false),
                ..UpdateTruckRequest::default()
            },
        )
        .await
        .unwrap();
    state.trucks.delete(10).await.unwrap();
    assert_eq!(state.trucks.available().await.unwrap().len(), 1);

    assert_eq!(
        routes(&server),
        vec![
            route("GET", "/api/trucks"),
            route("GET", "/api/trucks/1"),
            route("POST", "/api/trucks"),
            route("PUT", "/api/trucks/10"),
            route("DELETE", "/api/trucks/10"),
            route("GET", "/api/trucks/available"),
        ]
    );
    let requests = server.requests();
    assert_eq!(
        requests[2].json(),
        json!({
            "truck_number": "TRK-010",
            "model": "Hino 300",
            "plate_number": "NBC 4521",
            "color": "White",
            "year": 2021,
            "is_available": true,
            "status": "active"
        })
    );
    assert_eq!(
        requests[3].json(),
        json!({ "is_available": false, "status": "maintenance" })
    );
}

#[tokio::test]
async fn test_truck_mutations_require_admin() {
    let server = StubServer::start(vec![]).await;
    let state = signed_in(&server, UserRole::Client);

    let error = state.trucks.delete(1).await.unwrap_err();

    assert!(matches!(error, ApiError::Forbidden(_)));
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_task_crud_endpoints() {
    let server = StubServer::start(vec![
        StubResponse::on("GET", "/api/tasks", 200, ok(json!([task_json(1, "Renew permit", "pending")]))),
        StubResponse::on("GET", "/api/tasks/1", 200, ok(task_json(1, "Renew permit", "pending"))),
        StubResponse::on("POST", "/api/tasks", 201, ok(task_json(2, "Change oil", "pending"))),
        StubResponse::on("PUT", "/api/tasks/2", 200, ok(task_json(2, "Change oil", "completed"))),
        StubResponse::on("DELETE", "/api/tasks/2", 200, deleted("Task deleted successfully")),
    ])
    .await;
    let state = signed_in(&server, UserRole::Admin);

    assert_eq!(state.tasks.list().await.unwrap()[0].title, "Renew permit");
    assert_eq!(state.tasks.get(1).await.unwrap().id, 1);

    let request = TaskRequest {
        title: "Change oil".to_string(),
        description: None,
        status: TaskStatus::Pending,
        due_date: NaiveDate::from_ymd_opt(2025, 9, 1),
    };
    assert_eq!(state.tasks.create(&request).await.unwrap().id, 2);

    let done = TaskRequest {
        status: TaskStatus::Completed,
        ..request.clone()
    };
    assert_eq!(state.tasks.update(2, &done).await.unwrap().status, TaskStatus::Completed);
    state.tasks.delete(2).await.unwrap();

    assert_eq!(
        routes(&server),
        vec![
            route("GET", "/api/tasks"),
            route("GET", "/api/tasks/1"),
            route("POST", "/api/tasks"),
            route("PUT", "/api/tasks/2"),
            route("DELETE", "/api/tasks/2"),
        ]
    );
    let requests = server.requests();
    assert_eq!(
        requests[2].json(),
        json!({ "title": "Change oil", "description": null, "status": "pending", "due_date": "2025-09-01" })
    );
    assert_eq!(requests[3].json()["status"], "completed");
}

#[tokio::test]
async fn test_admin_user_crud_endpoints() {
    let server = StubServer::start(vec![
        StubResponse::on("GET", "/api/admin/users", 200, ok(json!([user_json(2, "Maria Reyes", "driver")]))),
        StubResponse::on("GET", "/api/admin/users/2", 200, ok(user_json(2, "Maria Reyes", "driver"))),
        StubResponse::on("POST", "/api/admin/users", 201, ok(user_json(3, "Ana Cruz", "client"))),
        StubResponse::on("PUT", "/api/admin/users/3", 200, ok(user_json(3, "Ana Cruz", "driver"))),
        StubResponse::on("DELETE", "/api/admin/users/3", 200, deleted("User deleted successfully")),
    ])
    .await;
    let state = signed_in(&server, UserRole::Admin);

    assert_eq!(state.users.list().await.unwrap()[0].role, UserRole::Driver);
    assert_eq!(state.users.get(2).await.unwrap().name, "Maria Reyes");

    let created = state
        .users
        .create(&CreateUserRequest {
            name: "Ana Cruz".to_string(),
            email: "user3@example.com".to_string(),
            password: "password123".to_string(),
            role: UserRole::Client,
            phone: Some("09171234567".to_string()),
            address: None,
        })
        .await
        .unwrap();
    assert_eq!(created.id, 3);

    let promoted = state
        .users
        .update(
            3,
            &UpdateUserRequest {
                role: Some(UserRole::Driver),
                ..UpdateUserRequest::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(promoted.role, UserRole::Driver);

    let message = state.users.delete(3).await.unwrap();
    assert_eq!(message.as_deref(), Some("User deleted successfully"));

    assert_eq!(
        routes(&server),
        vec![
            route("GET", "/api/admin/users"),
            route("GET", "/api/admin/users/2"),
            route("POST", "/api/admin/users"),
            route("PUT", "/api/admin/users/3"),
            route("DELETE", "/api/admin/users/3"),
        ]
    );
    let requests = server.requests();
    let created_body = requests[2].json();
    assert_eq!(created_body["email"], "user3@example.com");
    assert_eq!(created_body["role"], "client");
    assert_eq!(created_body["password"], "password123");
    assert_eq!(requests[3].json(), json!({ "role": "driver" }));
    assert!(requests
        .iter()
        .all(|r| r.header("authorization") == Some("Bearer 7|secret-token")));
}

#[tokio::test]
async fn test_unmatched_route_is_not_found() {
    let server = StubServer::start(vec![StubResponse::on(
        "GET",
        "/api/trucks/available",
        200,
        ok(json!([])),
    )])
    .await;
    let state = signed_in(&server, UserRole::Admin);

    let error = state.trucks.list().await.unwrap_err();

    assert!(matches!(error, ApiError::Api { status: 404, .. }), "unexpected error: {:?}", error);
    assert_eq!(server.requests()[0].path, "/api/trucks");
}
