//! Great-circle distances and the nearest-vehicle scan.

use crate::types::Vehicle;

/// Mean Earth radius used by `haversine_distance`, in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Great-circle distance between two points using the haversine formula.
/// Output in meters. Coordinates are not range-checked.
pub fn haversine_distance(from: Coordinates, to: Coordinates) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (to.longitude - from.longitude).to_radians();

    let a = ((dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2))
        .clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_METERS * c
}

/// Closest vehicle to `target` among `candidates`, skipping any candidate
/// that shares the target's id. Ties keep the earlier candidate.
///
/// Returns `None` when no candidate remains after the exclusion.
pub fn nearest<'a>(target: &Vehicle, candidates: &'a [Vehicle]) -> Option<(&'a Vehicle, f64)> {
    let origin = target.coordinates();
    let mut best: Option<(&Vehicle, f64)> = None;
    for candidate in candidates.iter().filter(|c| c.id() != target.id()) {
        let distance = haversine_distance(origin, candidate.coordinates());
        match best {
            Some((_, closest)) if distance >= closest => {}
            _ => best = Some((candidate, distance)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(id: u64, latitude: f64, longitude: f64) -> Vehicle {
        Vehicle::new("Car", "Model", 2020, "grey", 1000, latitude, longitude).with_id(id)
    }

    #[test]
    fn distance_to_self_is_zero() {
        let p = Coordinates::new(48.8566, 2.3522);
        assert_eq!(haversine_distance(p, p), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let paris = Coordinates::new(48.8566, 2.3522);
        let berlin = Coordinates::new(52.52, 13.405);
        let there = haversine_distance(paris, berlin);
        let back = haversine_distance(berlin, paris);
        assert!((there - back).abs() < 1e-9, "{there} != {back}");
    }

    #[test]
    fn one_degree_of_longitude_on_the_equator() {
        let d = haversine_distance(Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 1.0));
        assert!((d - 111_195.0).abs() < 1.0, "got {d}");
    }

    #[test]
    fn antipodes_are_half_a_circumference_apart() {
        let d = haversine_distance(Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 180.0));
        let half = std::f64::consts::PI * EARTH_RADIUS_METERS;
        assert!((d - half).abs() < 1.0, "got {d}");
    }

    #[test]
    fn nearest_picks_the_closest_other_vehicle() {
        let target = at(1, 0.0, 0.0);
        let all = vec![target.clone(), at(2, 0.0, 3.0), at(3, 0.0, 1.0), at(4, 5.0, 5.0)];
        let (found, distance) = nearest(&target, &all).unwrap();
        assert_eq!(found.id(), 3);
        assert!((distance - 111_195.0).abs() < 1.0);
    }

    #[test]
    fn nearest_with_a_single_other_vehicle_returns_it_however_far() {
        let target = at(1, 0.0, 0.0);
        let all = vec![target.clone(), at(2, 0.0, 180.0)];
        assert_eq!(nearest(&target, &all).unwrap().0.id(), 2);
    }

    #[test]
    fn nearest_skips_vehicles_sharing_the_target_id() {
        let target = at(1, 0.0, 0.0);
        let all = vec![at(1, 0.0, 0.0), at(2, 1.0, 1.0)];
        assert_eq!(nearest(&target, &all).unwrap().0.id(), 2);
    }

    #[test]
    fn nearest_keeps_first_on_ties() {
        let target = at(1, 0.0, 0.0);
        let all = vec![at(2, 0.0, 1.0), at(3, 0.0, -1.0)];
        assert_eq!(nearest(&target, &all).unwrap().0.id(), 2);
    }

    #[test]
    fn nearest_without_candidates_is_none() {
        let target = at(1, 0.0, 0.0);
        assert!(nearest(&target, &[]).is_none());
        assert!(nearest(&target, &[target.clone()]).is_none());
    }
}
