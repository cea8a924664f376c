//! Full lifecycle test against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives every
//! `VehicleManager` operation over real HTTP through a ureq-backed
//! `Transport`.

use serde_json::{json, Map, Value};
use vehicle_core::{
    ApiError, HttpMethod, HttpRequest, HttpResponse, Transport, Vehicle, VehicleManager,
};

/// Executes requests with ureq.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation.
struct Ureq(ureq::Agent);

impl Ureq {
    fn new() -> Self {
        Self(
            ureq::Agent::config_builder()
                .http_status_as_error(false)
                .build()
                .new_agent(),
        )
    }
}

impl Transport for Ureq {
    fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        let agent = &self.0;
        let result = match (req.method, req.body) {
            (HttpMethod::Get, _) => agent.get(&req.path).call(),
            (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
            (HttpMethod::Post, Some(body)) => {
                agent.post(&req.path).content_type("application/json").send(body.as_bytes())
            }
            (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                agent.put(&req.path).content_type("application/json").send(body.as_bytes())
            }
            (HttpMethod::Put, None) => agent.put(&req.path).send_empty(),
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

#[test]
fn vehicle_lifecycle() {
    // Step 1: start mock server on a random port.
    let manager = VehicleManager::new(&start_server(), Ureq::new());

    // Step 2: list — should be empty.
    assert!(manager.get_vehicles().unwrap().is_empty(), "expected empty list");

    // Step 3: add three vehicles along the equator.
    let camry = manager
        .add_vehicle(&Vehicle::new("Toyota", "Camry", 2021, "red", 21000, 0.0, 0.0))
        .unwrap();
    let civic = manager
        .add_vehicle(&Vehicle::new("Honda", "Civic", 2019, "red", 18000, 0.0, 2.0))
        .unwrap();
    let focus = manager
        .add_vehicle(&Vehicle::new("Ford", "Focus", 2021, "blue", 16000, 0.0, 1.0))
        .unwrap();
    assert_ne!(camry.id(), 0);
    assert_eq!(camry.to_string(), "<Vehicle: Toyota Camry 2021 red 21000>");

    // Step 4: get one back.
    let fetched = manager.get_vehicle(civic.id()).unwrap();
    assert_eq!(fetched, civic);

    // Step 5: filter on raw fields.
    let mut params = Map::new();
    params.insert("color".to_string(), json!("red"));
    let red = manager.filter_vehicles(&params).unwrap();
    assert_eq!(red.len(), 2);
    params.insert("year".to_string(), Value::from(2021));
    let red_2021 = manager.filter_vehicles(&params).unwrap();
    assert_eq!(red_2021, vec![camry.clone()]);
    assert_eq!(manager.filter_vehicles(&Map::new()).unwrap().len(), 3);
    let mut by_longitude = Map::new();
    by_longitude.insert("longitude".to_string(), Value::from(1));
    assert_eq!(manager.filter_vehicles(&by_longitude).unwrap(), vec![focus.clone()]);

    // Step 6: distance and nearest neighbour.
    let distance = manager.get_distance(camry.id(), focus.id()).unwrap();
    assert!((distance - 111_195.0).abs() < 1.0, "got {distance}");
    let nearest = manager.get_nearest_vehicle(camry.id()).unwrap().unwrap();
    assert_eq!(nearest.vehicle, focus);

    // Step 7: update moves the civic next to the camry.
    let moved = Vehicle::new("Honda", "Civic", 2019, "black", 17500, 0.0, 0.5).with_id(civic.id());
    let updated = manager.update_vehicle(&moved).unwrap();
    assert_eq!(updated, moved);
    let nearest = manager.get_nearest_vehicle(camry.id()).unwrap().unwrap();
    assert_eq!(nearest.vehicle.id(), civic.id());

    // Step 8: delete, then lookups fail with the status line.
    manager.delete_vehicle(focus.id()).unwrap();
    let err = manager.get_vehicle(focus.id()).unwrap_err();
    assert_eq!(err.to_string(), "Could not fulfill GET request: HTTP code 404");
    let err = manager.delete_vehicle(focus.id()).unwrap_err();
    assert_eq!(err.to_string(), "Could not fulfill DELETE request: HTTP code 404");
    let err = manager.get_distance(camry.id(), focus.id()).unwrap_err();
    assert_eq!(err.status(), Some(404));

    // Step 9: a lone vehicle has no neighbour.
    manager.delete_vehicle(civic.id()).unwrap();
    assert_eq!(manager.get_nearest_vehicle(camry.id()).unwrap(), None);

    // Step 10: updating a deleted vehicle fails.
    let err = manager.update_vehicle(&moved).unwrap_err();
    assert_eq!(err.to_string(), "Could not fulfill PUT request: HTTP code 404");
}

#[test]
fn unreachable_server_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let manager = VehicleManager::new(&format!("http://{addr}"), Ureq::new());
    let err = manager.get_vehicles().unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
