//! Command-line arguments for the `vehicles` binary.

use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use vehicle_core::Vehicle;

pub const DEFAULT_URL: &str = "http://127.0.0.1:3000";

#[derive(Parser, Debug)]
#[command(name = "vehicles")]
#[command(about = "Vehicle inventory client")]
#[command(version)]
pub struct Cli {
    /// Base URL of the vehicle service
    #[arg(long, env = "VEHICLE_API_URL", default_value = DEFAULT_URL)]
    pub url: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// List every vehicle
    List,
    /// List vehicles whose fields equal every KEY=VALUE given
    Filter {
        /// VALUE is read as JSON when possible, so `year=2020` is a number
        #[arg(long = "where", value_name = "KEY=VALUE", value_parser = parse_condition)]
        conditions: Vec<(String, Value)>,
    },
    /// Show one vehicle
    Get { id: u64 },
    /// Create a vehicle
    Add {
        #[command(flatten)]
        vehicle: VehicleArgs,
    },
    /// Replace the fields of an existing vehicle
    Update {
        id: u64,
        #[command(flatten)]
        vehicle: VehicleArgs,
    },
    /// Delete a vehicle
    Delete { id: u64 },
    /// Distance in meters between two vehicles
    Distance { id1: u64, id2: u64 },
    /// Closest other vehicle
    Nearest { id: u64 },
}

#[derive(Args, Debug, PartialEq)]
pub struct VehicleArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub model: String,
    #[arg(long)]
    pub year: i64,
    #[arg(long)]
    pub color: String,
    #[arg(long)]
    pub price: i64,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub latitude: f64,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub longitude: f64,
}

impl VehicleArgs {
    pub fn into_vehicle(self) -> Vehicle {
        Vehicle::new(
            self.name,
            self.model,
            self.year,
            self.color,
            self.price,
            self.latitude,
            self.longitude,
        )
    }
}

fn parse_condition(s: &str) -> Result<(String, Value), String> {
    let (key, raw) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{s}`"))?;
    if key.is_empty() {
        return Err(format!("missing key in `{s}`"));
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}
