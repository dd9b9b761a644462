//! Great-circle distances over lat/lon arrays, nearest-node lookup for node
//! tables, and a launcher that opens coordinates in a map viewer.

pub mod error;
pub mod geo;
pub mod maps;
pub mod nodes;

pub use error::{GeoError, LaunchError};
pub use geo::{
    geodesic_distance_meters, geodesic_distance_meters_to_point, haversine_fraction,
    haversine_fraction_to_point, haversine_meters, pointwise_haversine, Coordinate, EARTH_RADIUS_M,
};
pub use maps::{LaunchOptions, MapLauncher};
pub use nodes::{nearest_node, nearest_node_id, nearest_node_match, NodeMatch, NodeTable, START};
