use serde::Serialize;

/// A parsed location URL: the decoded region name plus the in-region offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationReference {
    pub area_name: String,
    pub offset_x: u32,
    pub offset_y: u32,
    pub offset_z: u32,
    pub canonical_url: String,
}

/// Absolute grid coordinate of a region's corner, in whole grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AreaOrigin {
    pub x: i64,
    pub y: i64,
}

impl AreaOrigin {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl From<[i64; 2]> for AreaOrigin {
    fn from([x, y]: [i64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<AreaOrigin> for [i64; 2] {
    fn from(origin: AreaOrigin) -> Self {
        [origin.x, origin.y]
    }
}

/// `[x, y]` in grid units, each axis rounded to six decimals.
pub type GridPosition = [f64; 2];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationRecord {
    pub name: String,
    pub url: String,
    pub marker: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRecord {
    pub name: String,
    pub url: String,
    pub region: String,
    pub marker: String,
    pub grid_pos: GridPosition,
}
