//! Table A: minimum occupancy per dwelling by bedroom count.

use serde::Serialize;

use crate::error::DemandError;

/// One row of the occupancy table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OccupancyRow {
    pub bedrooms: u32,
    /// `true` for the last row, which covers `bedrooms` and above.
    pub or_more: bool,
    pub persons: f64,
}

impl OccupancyRow {
    pub fn bedrooms_label(&self) -> String {
        if self.or_more {
            format!("≥{}", self.bedrooms)
        } else {
            self.bedrooms.to_string()
        }
    }
}

/// Rows are indexed by `bedrooms - 1`; the last row is the catch-all.
pub const OCCUPANCY_TABLE: [OccupancyRow; 6] = [
    OccupancyRow { bedrooms: 1, or_more: false, persons: 1.5 },
    OccupancyRow { bedrooms: 2, or_more: false, persons: 3.0 },
    OccupancyRow { bedrooms: 3, or_more: false, persons: 4.0 },
    OccupancyRow { bedrooms: 4, or_more: false, persons: 5.0 },
    OccupancyRow { bedrooms: 5, or_more: false, persons: 6.0 },
    OccupancyRow { bedrooms: 6, or_more: true, persons: 7.0 },
];

/// Minimum occupancy (persons) for a dwelling with `bedrooms` bedrooms.
pub fn occupancy_for(bedrooms: u32) -> Result<f64, DemandError> {
    if bedrooms < 1 {
        return Err(DemandError::invalid("bedroom count must be at least 1"));
    }
    let idx = (bedrooms as usize).min(OCCUPANCY_TABLE.len()) - 1;
    Ok(OCCUPANCY_TABLE[idx].persons)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_or_more_bedrooms_share_catch_all() {
        for b in [6, 7, 10, 50, u32::MAX] {
            assert_eq!(occupancy_for(b).unwrap(), 7.0);
        }
    }

    #[test]
    fn occupancy_non_decreasing() {
        let values: Vec<f64> = (1..=6).map(|b| occupancy_for(b).unwrap()).collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]), "{values:?}");
        assert_eq!(values, vec![1.5, 3.0, 4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn zero_bedrooms_rejected() {
        assert!(matches!(occupancy_for(0), Err(DemandError::InvalidInput(_))));
    }

    #[test]
    fn rows_are_indexed_by_bedrooms() {
        for (i, row) in OCCUPANCY_TABLE.iter().enumerate() {
            assert_eq!(row.bedrooms as usize, i + 1);
        }
        assert_eq!(OCCUPANCY_TABLE[5].bedrooms_label(), "≥6");
        assert_eq!(OCCUPANCY_TABLE[0].bedrooms_label(), "1");
    }
}
