//! Runs a parsed command and renders its result as text.

use serde_json::Map;
use vehicle_core::{ApiError, Transport, Vehicle, VehicleManager};

use crate::cli::Command;

pub fn run<T: Transport>(command: Command, manager: &VehicleManager<T>) -> Result<String, ApiError> {
    let output = match command {
        Command::List => format_list(&manager.get_vehicles()?),
        Command::Filter { conditions } => {
            let params: Map<_, _> = conditions.into_iter().collect();
            format_list(&manager.filter_vehicles(&params)?)
        }
        Command::Get { id } => manager.get_vehicle(id)?.to_string(),
        Command::Add { vehicle } => manager.add_vehicle(&vehicle.into_vehicle())?.to_string(),
        Command::Update { id, vehicle } => manager
            .update_vehicle(&vehicle.into_vehicle().with_id(id))?
            .to_string(),
        Command::Delete { id } => {
            manager.delete_vehicle(id)?;
            format!("Vehicle with id {id} was deleted successfully")
        }
        Command::Distance { id1, id2 } => format!("{:?}", manager.get_distance(id1, id2)?),
        Command::Nearest { id } => match manager.get_nearest_vehicle(id)? {
            Some(nearest) => nearest.vehicle.to_string(),
            None => "No other vehicles to compare against".to_string(),
        },
    };
    Ok(output)
}

fn format_list(vehicles: &[Vehicle]) -> String {
    let items: Vec<String> = vehicles.iter().map(Vehicle::to_string).collect();
    format!("[{}]", items.join(", "))
}
