use crate::types::{AreaOrigin, GridPosition};

/// Local offset units per grid cell along one axis.
pub const REGION_SIZE: f64 = 256.0;

const DECIMALS: f64 = 1_000_000.0;

/// `origin + offset / 256` on x and y. The z offset has no grid component.
pub fn compose(origin: AreaOrigin, offset: [u32; 3]) -> GridPosition {
    let [x, y, _z] = offset;
    [
        round6(origin.x as f64 + f64::from(x) / REGION_SIZE),
        round6(origin.y as f64 + f64::from(y) / REGION_SIZE),
    ]
}

/// Rounds to six decimal places, ties to even (`0.0390625` → `0.039062`).
pub fn round6(value: f64) -> f64 {
    (value * DECIMALS).round_ties_even() / DECIMALS
}
