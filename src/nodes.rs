use ndarray::{Array2, ArrayView2};
use ordered_float::OrderedFloat;

use crate::error::GeoError;
use crate::geo::{self, Coordinate};

/// Default query point (latitude, longitude) for nearest-node lookups.
pub const START: Coordinate = Coordinate {
    lat: 51.564,
    lon: 0.00227,
};

/// Row labels of a node table, optionally named.
#[derive(Clone, Debug, PartialEq)]
pub struct RowIndex {
    pub name: Option<String>,
    pub labels: Vec<i64>,
}

impl RowIndex {
    /// Unnamed positional index 0..len.
    pub fn positional(len: usize) -> Self {
        Self {
            name: None,
            labels: (0..len as i64).collect(),
        }
    }
}

/// Read-only table of nodes with `lat`/`lon` columns, a row index and an
/// optional `id` column.
#[derive(Clone, Debug)]
pub struct NodeTable {
    coords: Array2<f64>,
    index: RowIndex,
    ids: Option<Vec<i64>>,
}

impl NodeTable {
    pub fn new(lat: Vec<f64>, lon: Vec<f64>) -> Result<Self, GeoError> {
        let n = lat.len();
        if lon.len() != n {
            return Err(GeoError::ColumnLength {
                column: "lon",
                len: lon.len(),
                expected: n,
            });
        }
        let coords = Array2::from_shape_fn((n, 2), |(row, col)| {
            if col == 0 {
                lat[row]
            } else {
                lon[row]
            }
        });
        Ok(Self {
            coords,
            index: RowIndex::positional(n),
            ids: None,
        })
    }

    /// Builds a table from (lat, lon) rows.
    pub fn from_rows(rows: &[(f64, f64)]) -> Self {
        let coords = Array2::from_shape_fn((rows.len(), 2), |(row, col)| {
            let (lat, lon) = rows[row];
            if col == 0 {
                lat
            } else {
                lon
            }
        });
        Self {
            index: RowIndex::positional(rows.len()),
            coords,
            ids: None,
        }
    }

    pub fn with_index(mut self, name: Option<&str>, labels: Vec<i64>) -> Result<Self, GeoError> {
        self.check_len("index", labels.len())?;
        self.index = RowIndex {
            name: name.map(str::to_owned),
            labels,
        };
        Ok(self)
    }

    pub fn with_id_column(mut self, ids: Vec<i64>) -> Result<Self, GeoError> {
        self.check_len("id", ids.len())?;
        self.ids = Some(ids);
        Ok(self)
    }

    fn check_len(&self, column: &'static str, len: usize) -> Result<(), GeoError> {
        if len != self.len() {
            return Err(GeoError::ColumnLength {
                column,
                len,
                expected: self.len(),
            });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.coords.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `[lat, lon]` columns as an N x 2 view.
    pub fn coords(&self) -> ArrayView2<'_, f64> {
        self.coords.view()
    }

    pub fn index(&self) -> &RowIndex {
        &self.index
    }

    /// Identifier of `row`: the index label when the index is named `id`,
    /// otherwise the `id` column.
    pub fn id_at(&self, row: usize) -> Result<i64, GeoError> {
        let ids = if self.index.name.as_deref() == Some("id") {
            &self.index.labels
        } else {
            self.ids.as_ref().ok_or(GeoError::MissingIdentifier)?
        };
        ids.get(row).copied().ok_or(GeoError::RowOutOfRange {
            row,
            len: self.len(),
        })
    }
}

/// Nearest node together with its position in the table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NodeMatch {
    pub id: i64,
    pub row: usize,
}

/// Row index of the node closest to `point` (defaults to [`START`]).
/// Ties resolve to the first row; NaN distances never win.
pub fn nearest_node(nodes: &NodeTable, point: Option<Coordinate>) -> Result<usize, GeoError> {
    let point = point.unwrap_or(START);
    let distances = geo::geodesic_distance_meters_to_point(nodes.coords(), point)?;
    let (row, meters) = distances
        .iter()
        .enumerate()
        .min_by_key(|(_, d)| OrderedFloat(**d))
        .ok_or(GeoError::EmptyTable)?;
    tracing::debug!(row, meters, lat = point.lat, lon = point.lon, "nearest node");
    Ok(row)
}

pub fn nearest_node_id(nodes: &NodeTable, point: Option<Coordinate>) -> Result<i64, GeoError> {
    nearest_node_match(nodes, point).map(|m| m.id)
}

pub fn nearest_node_match(
    nodes: &NodeTable,
    point: Option<Coordinate>,
) -> Result<NodeMatch, GeoError> {
    let row = nearest_node(nodes, point)?;
    let id = nodes.id_at(row)?;
    Ok(NodeMatch { id, row })
}
