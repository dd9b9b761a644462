use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeoError {
    #[error("Input arrays must have the same shape, got {left:?} and {right:?}")]
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("Coordinate array must have 2 columns (lat, lon), got shape {0:?}")]
    NotCoordinateRows((usize, usize)),

    #[error("Column '{column}' has {len} rows, expected {expected}")]
    ColumnLength {
        column: &'static str,
        len: usize,
        expected: usize,
    },

    #[error("Node table is empty, no nearest node")]
    EmptyTable,

    #[error("Row {row} is out of range for a node table of {len} rows")]
    RowOutOfRange { row: usize, len: usize },

    #[error("Node table has no identifier: expected an index named 'id' or an 'id' column")]
    MissingIdentifier,
}

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Unsupported coordinate item: {type_name}")]
    UnsupportedItem { type_name: String },

    #[error("{option} must be one of {allowed:?}, got '{value}'")]
    InvalidOption {
        option: &'static str,
        value: String,
        allowed: &'static [&'static str],
    },

    #[error("Refusing to open more than {limit} map links ({requested} requested)")]
    CapacityExceeded { requested: usize, limit: usize },

    #[error("Geometry table is missing '{0}' column")]
    MissingColumn(String),

    #[error("Inline display requested but no display sink is available")]
    DisplayUnavailable,

    #[error("Failed to open {url}")]
    Open {
        url: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid launcher configuration: {0}")]
    Config(#[from] serde_json::Error),
}
