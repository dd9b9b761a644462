use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::LaunchError;
use crate::geo::Coordinate;

/// A point geometry: `x` is longitude, `y` is latitude.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.y, self.x)
    }
}

/// One element of a coordinate collection.
#[derive(Clone, Debug, PartialEq)]
pub enum CoordItem {
    Pair(Coordinate),
    Point(Point),
    Unsupported { type_name: String },
}

impl CoordItem {
    /// Classifies an untyped value: `[lat, lon]` is a pair, `{"x", "y"}` or a
    /// GeoJSON `Point` is a point, anything else is unsupported.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Array(items) if items.len() == 2 => {
                match (items[0].as_f64(), items[1].as_f64()) {
                    (Some(lat), Some(lon)) => CoordItem::Pair(Coordinate::new(lat, lon)),
                    _ => Self::unsupported(value),
                }
            }
            Value::Object(fields) => {
                if let (Some(x), Some(y)) = (
                    fields.get("x").and_then(Value::as_f64),
                    fields.get("y").and_then(Value::as_f64),
                ) {
                    return CoordItem::Point(Point::new(x, y));
                }
                if fields.get("type").and_then(Value::as_str) == Some("Point") {
                    if let Some(Value::Array(xy)) = fields.get("coordinates") {
                        if let [x, y] = xy.as_slice() {
                            if let (Some(x), Some(y)) = (x.as_f64(), y.as_f64()) {
                                return CoordItem::Point(Point::new(x, y));
                            }
                        }
                    }
                }
                Self::unsupported(value)
            }
            _ => Self::unsupported(value),
        }
    }

    fn unsupported(value: &Value) -> Self {
        let type_name = match value {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        };
        CoordItem::Unsupported {
            type_name: type_name.to_owned(),
        }
    }

    pub fn coordinate(&self) -> Result<Coordinate, LaunchError> {
        match self {
            CoordItem::Pair(coord) => Ok(*coord),
            CoordItem::Point(point) => Ok(point.coordinate()),
            CoordItem::Unsupported { type_name } => Err(LaunchError::UnsupportedItem {
                type_name: type_name.clone(),
            }),
        }
    }
}

impl From<(f64, f64)> for CoordItem {
    fn from(pair: (f64, f64)) -> Self {
        CoordItem::Pair(pair.into())
    }
}

impl From<Point> for CoordItem {
    fn from(point: Point) -> Self {
        CoordItem::Point(point)
    }
}

/// Everything the launcher accepts, normalized.
#[derive(Clone, Debug, PartialEq)]
pub enum Coords {
    Single(Coordinate),
    Point(Point),
    Many(Vec<CoordItem>),
}

impl Coords {
    /// Resolves every item to a coordinate, failing on the first unsupported one.
    pub fn resolve(&self) -> Result<Vec<Coordinate>, LaunchError> {
        match self {
            Coords::Single(coord) => Ok(vec![*coord]),
            Coords::Point(point) => Ok(vec![point.coordinate()]),
            Coords::Many(items) => items.iter().map(CoordItem::coordinate).collect(),
        }
    }

    /// Normalizes a JSON value: a single pair or point stays single, an array
    /// of items becomes `Many`.
    pub fn from_json(value: &Value) -> Self {
        match CoordItem::from_json(value) {
            CoordItem::Pair(coord) => Coords::Single(coord),
            CoordItem::Point(point) => Coords::Point(point),
            CoordItem::Unsupported { .. } => match value {
                Value::Array(items) => {
                    Coords::Many(items.iter().map(CoordItem::from_json).collect())
                }
                _ => Coords::Many(vec![CoordItem::from_json(value)]),
            },
        }
    }
}

impl From<Coordinate> for Coords {
    fn from(coord: Coordinate) -> Self {
        Coords::Single(coord)
    }
}

impl From<(f64, f64)> for Coords {
    fn from(pair: (f64, f64)) -> Self {
        Coords::Single(pair.into())
    }
}

impl From<Point> for Coords {
    fn from(point: Point) -> Self {
        Coords::Point(point)
    }
}

impl<T: Into<CoordItem>> From<Vec<T>> for Coords {
    fn from(items: Vec<T>) -> Self {
        Coords::Many(items.into_iter().map(Into::into).collect())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Point(Point),
    LineString(Vec<Point>),
    Polygon(Vec<Vec<Point>>),
}

impl Geometry {
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::LineString(_) => "LineString",
            Geometry::Polygon(_) => "Polygon",
        }
    }
}

/// A table whose named columns hold geometries.
#[derive(Clone, Debug, Default)]
pub struct GeometryTable {
    columns: BTreeMap<String, Vec<Geometry>>,
}

impl GeometryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_column(mut self, name: &str, geometries: Vec<Geometry>) -> Self {
        self.columns.insert(name.to_owned(), geometries);
        self
    }

    pub fn column(&self, name: &str) -> Option<&[Geometry]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Point coordinates of `column`. Non-point geometries are rejected.
    pub fn points(&self, column: &str) -> Result<Vec<Coordinate>, LaunchError> {
        let geometries = self
            .column(column)
            .ok_or_else(|| LaunchError::MissingColumn(column.to_owned()))?;
        geometries
            .iter()
            .map(|geometry| match geometry {
                Geometry::Point(point) => Ok(point.coordinate()),
                other => Err(LaunchError::UnsupportedItem {
                    type_name: other.type_name().to_owned(),
                }),
            })
            .collect()
    }
}
