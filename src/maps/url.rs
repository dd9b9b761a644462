use crate::geo::Coordinate;

const MAPS_BASE: &str = "https://www.google.com/maps";

/// Search URL that opens `coord` in a browser.
pub fn search_url(coord: Coordinate) -> String {
    format!("{MAPS_BASE}/search/?api=1&query={},{}", coord.lat, coord.lon)
}

/// Embeddable URL for `coord`. Without a key the keyless embed is used, which
/// the service may refuse to frame.
pub fn embed_url(coord: Coordinate, api_key: Option<&str>) -> String {
    match api_key.filter(|key| !key.is_empty()) {
        Some(key) => format!(
            "{MAPS_BASE}/embed/v1/place?key={key}&q={},{}",
            coord.lat, coord.lon
        ),
        None => format!("{MAPS_BASE}?q={},{}&output=embed", coord.lat, coord.lon),
    }
}
