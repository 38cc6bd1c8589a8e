//! Grid points sampled around a query center to approximate regional coverage.

use haversine::{distance, Location as HaversineLocation, Units};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use weather_odds::LatLon;
///
/// let nairobi = LatLon(-1.2921, 36.8219);
/// assert_eq!(nairobi.0, -1.2921); // Latitude
/// assert_eq!(nairobi.1, 36.8219); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    pub fn latitude(&self) -> f64 {
        self.0
    }

    pub fn longitude(&self) -> f64 {
        self.1
    }

    /// Moves the point by the given offsets, clamping latitude to the poles and
    /// wrapping longitude across the antimeridian.
    pub fn offset(&self, d_lat: f64, d_lon: f64) -> LatLon {
        let lat = (self.0 + d_lat).clamp(-90.0, 90.0);
        let mut lon = self.1 + d_lon;
        if lon > 180.0 {
            lon -= 360.0;
        } else if lon < -180.0 {
            lon += 360.0;
        }
        LatLon(lat, lon)
    }

    fn to_haversine(self) -> HaversineLocation {
        HaversineLocation {
            latitude: self.0,
            longitude: self.1,
        }
    }
}

/// The role of a point inside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridPosition {
    Center,
    North,
    South,
    East,
    West,
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GridPosition::Center => "center",
            GridPosition::North => "north",
            GridPosition::South => "south",
            GridPosition::East => "east",
            GridPosition::West => "west",
        };
        f.write_str(name)
    }
}

/// One location the archive is queried for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    pub position: GridPosition,
    pub location: LatLon,
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:.4}, {:.4})",
            self.position, self.location.0, self.location.1
        )
    }
}

/// Which points to sample around the query center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridShape {
    /// Center plus north, south, east and west at one grid step.
    #[default]
    Regional,
    /// The center only.
    SinglePoint,
}

impl GridShape {
    pub fn point_count(&self) -> usize {
        match self {
            GridShape::Regional => 5,
            GridShape::SinglePoint => 1,
        }
    }
}

/// The set of grid points for one query, in pooling order.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    center: LatLon,
    step_degrees: f64,
    points: Vec<GridPoint>,
}

impl Grid {
    /// Builds the 5-point cross around `center`: center, north, south, east, west.
    pub fn around(center: LatLon, step_degrees: f64) -> Self {
        let offsets = [
            (GridPosition::Center, 0.0, 0.0),
            (GridPosition::North, step_degrees, 0.0),
            (GridPosition::South, -step_degrees, 0.0),
            (GridPosition::East, 0.0, step_degrees),
            (GridPosition::West, 0.0, -step_degrees),
        ];
        let points = offsets
            .into_iter()
            .map(|(position, d_lat, d_lon)| GridPoint {
                position,
                location: center.offset(d_lat, d_lon),
            })
            .collect();
        Self {
            center,
            step_degrees,
            points,
        }
    }

    /// A grid made of the center point alone.
    pub fn single(center: LatLon) -> Self {
        Self {
            center,
            step_degrees: 0.0,
            points: vec![GridPoint {
                position: GridPosition::Center,
                location: center,
            }],
        }
    }

    pub fn with_shape(shape: GridShape, center: LatLon, step_degrees: f64) -> Self {
        match shape {
            GridShape::Regional => Self::around(center, step_degrees),
            GridShape::SinglePoint => Self::single(center),
        }
    }

    pub fn points(&self) -> &[GridPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Human-readable description reported as `regional_coverage`.
    pub fn coverage_description(&self) -> String {
        if self.points.len() == 1 {
            return format!(
                "single point ({:.4}, {:.4})",
                self.center.0, self.center.1
            );
        }
        let north_south = distance(
            self.center.offset(-self.step_degrees, 0.0).to_haversine(),
            self.center.offset(self.step_degrees, 0.0).to_haversine(),
            Units::Kilometers,
        );
        let east_west = distance(
            self.center.offset(0.0, -self.step_degrees).to_haversine(),
            self.center.offset(0.0, self.step_degrees).to_haversine(),
            Units::Kilometers,
        );
        format!(
            "{}-point grid (center + N/S/E/W at ±{}°, ~{:.0} km N-S × ~{:.0} km E-W)",
            self.points.len(),
            self.step_degrees,
            north_south,
            east_west
        )
    }
}
