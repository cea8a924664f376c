use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: u64,
    pub name: String,
    pub model: String,
    pub year: i64,
    pub color: String,
    pub price: i64,
    pub latitude: f64,
    pub longitude: f64,
}

/// Body of `POST /vehicles` and `PUT /vehicles/{id}`.
#[derive(Clone, Debug, Deserialize)]
pub struct VehicleInput {
    pub name: String,
    pub model: String,
    pub year: i64,
    pub color: String,
    pub price: i64,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

impl VehicleInput {
    fn into_vehicle(self, id: u64) -> Vehicle {
        Vehicle {
            id,
            name: self.name,
            model: self.model,
            year: self.year,
            color: self.color,
            price: self.price,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// In-memory inventory. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct Store {
    next_id: u64,
    vehicles: BTreeMap<u64, Vehicle>,
}

impl Store {
    fn insert(&mut self, input: VehicleInput) -> Vehicle {
        self.next_id += 1;
        let vehicle = input.into_vehicle(self.next_id);
        self.vehicles.insert(vehicle.id, vehicle.clone());
        vehicle
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/vehicles", get(list_vehicles).post(create_vehicle))
        .route(
            "/vehicles/{id}",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_vehicles(State(db): State<Db>) -> Json<Vec<Vehicle>> {
    let store = db.read().await;
    Json(store.vehicles.values().cloned().collect())
}

async fn create_vehicle(
    State(db): State<Db>,
    Json(input): Json<VehicleInput>,
) -> (StatusCode, Json<Vehicle>) {
    let vehicle = db.write().await.insert(input);
    log::debug!("created vehicle {}", vehicle.id);
    (StatusCode::CREATED, Json(vehicle))
}

async fn get_vehicle(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Vehicle>, StatusCode> {
    let store = db.read().await;
    store.vehicles.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_vehicle(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<VehicleInput>,
) -> Result<Json<Vehicle>, StatusCode> {
    let mut store = db.write().await;
    let vehicle = store.vehicles.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    *vehicle = input.into_vehicle(id);
    log::debug!("updated vehicle {id}");
    Ok(Json(vehicle.clone()))
}

async fn delete_vehicle(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store
        .vehicles
        .remove(&id)
        .map(|_| {
            log::debug!("deleted vehicle {id}");
            StatusCode::NO_CONTENT
        })
        .ok_or(StatusCode::NOT_FOUND)
}
