//! Nearest reference city for a coordinate, used by the location selector.

pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct City {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl City {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }
}

pub const SRI_LANKA_CITIES: &[City] = &[
    City::new("Colombo", 6.9271, 79.8612),
    City::new("Kandy", 7.2906, 80.6337),
    City::new("Galle", 6.0535, 80.2210),
    City::new("Jaffna", 9.6615, 80.0255),
    City::new("Negombo", 7.2008, 79.8737),
    City::new("Gampaha", 7.0873, 79.9925),
    City::new("Kurunegala", 7.4863, 80.3623),
    City::new("Anuradhapura", 8.3114, 80.4037),
    City::new("Trincomalee", 8.5874, 81.2152),
    City::new("Batticaloa", 7.7310, 81.6747),
    City::new("Ratnapura", 6.6828, 80.3992),
    City::new("Badulla", 6.9934, 81.0550),
    City::new("Nuwara Eliya", 6.9497, 80.7891),
    City::new("Matara", 5.9549, 80.5550),
];

/// Great-circle distance in kilometres between two points given in degrees.
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Closest city to `(lat, lng)` and its distance in km.
///
/// Ties keep the earlier city in `cities`.
pub fn nearest_city(lat: f64, lng: f64, cities: &[City]) -> Option<(&City, f64)> {
    let mut nearest: Option<(&City, f64)> = None;
    for city in cities {
        let distance = haversine_km(lat, lng, city.lat, city.lng);
        match nearest {
            Some((_, best)) if distance >= best => {}
            _ => nearest = Some((city, distance)),
        }
    }
    nearest
}
