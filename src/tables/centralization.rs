//! Table B: centralization factor by number of dwellings sharing the system.
//!
//! Used as a step function over inclusive upper bounds. The last band is open.

use serde::Serialize;

use crate::error::DemandError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CentralizationBand {
    /// Inclusive upper bound; `None` for the open-ended last band.
    pub max_dwellings: Option<u32>,
    pub factor: f64,
}

pub const CENTRALIZATION_TABLE: [CentralizationBand; 7] = [
    CentralizationBand { max_dwellings: Some(3), factor: 1.00 },
    CentralizationBand { max_dwellings: Some(10), factor: 0.95 },
    CentralizationBand { max_dwellings: Some(20), factor: 0.90 },
    CentralizationBand { max_dwellings: Some(50), factor: 0.85 },
    CentralizationBand { max_dwellings: Some(75), factor: 0.80 },
    CentralizationBand { max_dwellings: Some(100), factor: 0.75 },
    CentralizationBand { max_dwellings: None, factor: 0.70 },
];

/// Display labels for the bands: `≤3`, `4-10`, ..., `≥101`.
pub fn band_labels() -> Vec<String> {
    let mut out = Vec::with_capacity(CENTRALIZATION_TABLE.len());
    let mut lower: Option<u32> = None;
    for band in &CENTRALIZATION_TABLE {
        let label = match (lower, band.max_dwellings) {
            (None, Some(max)) => format!("≤{max}"),
            (Some(lo), Some(max)) => format!("{lo}-{max}"),
            (Some(lo), None) => format!("≥{lo}"),
            (None, None) => "all".to_string(),
        };
        out.push(label);
        lower = band.max_dwellings.map(|m| m + 1);
    }
    out
}

/// Centralization factor for a building with `dwellings` dwellings.
pub fn centralization_factor_for(dwellings: u32) -> Result<f64, DemandError> {
    if dwellings < 1 {
        return Err(DemandError::invalid("dwelling count must be at least 1"));
    }
    let idx = CENTRALIZATION_TABLE
        .partition_point(|band| band.max_dwellings.is_some_and(|max| max < dwellings));
    Ok(CENTRALIZATION_TABLE[idx].factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive() {
        let cases = [
            (1, 1.00),
            (3, 1.00),
            (4, 0.95),
            (10, 0.95),
            (11, 0.90),
            (20, 0.90),
            (21, 0.85),
            (50, 0.85),
            (51, 0.80),
            (75, 0.80),
            (76, 0.75),
            (100, 0.75),
            (101, 0.70),
            (5000, 0.70),
        ];
        for (n, expected) in cases {
            assert_eq!(centralization_factor_for(n).unwrap(), expected, "n={n}");
        }
    }

    #[test]
    fn factor_non_increasing_across_boundaries() {
        for (lo, hi) in [(3, 4), (10, 11), (20, 21), (50, 51), (75, 76), (100, 101)] {
            let a = centralization_factor_for(lo).unwrap();
            let b = centralization_factor_for(hi).unwrap();
            assert!(b < a, "{lo}->{hi}: {a} -> {b}");
        }
        let all: Vec<f64> = (1..=150).map(|n| centralization_factor_for(n).unwrap()).collect();
        assert!(all.windows(2).all(|w| w[1] <= w[0]));
        assert!(all.iter().all(|f| *f > 0.0 && *f <= 1.0));
    }

    #[test]
    fn zero_dwellings_rejected() {
        assert!(matches!(centralization_factor_for(0), Err(DemandError::InvalidInput(_))));
    }

    #[test]
    fn labels_match_bands() {
        assert_eq!(
            band_labels(),
            vec!["≤3", "4-10", "11-20", "21-50", "51-75", "76-100", "≥101"]
        );
    }
}
