//! Table C: reference consumption for tertiary (non-residential) uses.
//!
//! Values are L/day per person at 60 °C. Rows follow the declaration order of
//! `TertiaryUse`, so a category's row is `TERTIARY_TABLE[category as usize]`.

use std::str::FromStr;

use serde::Serialize;

use crate::domain::TertiaryUse;
use crate::error::DemandError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TertiaryRow {
    pub category: TertiaryUse,
    pub l_per_person: f64,
}

pub const TERTIARY_TABLE: [TertiaryRow; 20] = [
    TertiaryRow { category: TertiaryUse::HospitalsAndClinics, l_per_person: 55.0 },
    TertiaryRow { category: TertiaryUse::OutpatientAndHealthCentres, l_per_person: 41.0 },
    TertiaryRow { category: TertiaryUse::HotelFiveStar, l_per_person: 69.0 },
    TertiaryRow { category: TertiaryUse::HotelFourStar, l_per_person: 55.0 },
    TertiaryRow { category: TertiaryUse::HotelThreeStar, l_per_person: 41.0 },
    TertiaryRow { category: TertiaryUse::HotelHostelTwoStar, l_per_person: 34.0 },
    TertiaryRow { category: TertiaryUse::Camping, l_per_person: 21.0 },
    TertiaryRow { category: TertiaryUse::HostelGuesthouseOneStar, l_per_person: 28.0 },
    TertiaryRow { category: TertiaryUse::Residence, l_per_person: 41.0 },
    TertiaryRow { category: TertiaryUse::Prison, l_per_person: 28.0 },
    TertiaryRow { category: TertiaryUse::Shelter, l_per_person: 24.0 },
    TertiaryRow { category: TertiaryUse::ChangingRoomsAndCollectiveShowers, l_per_person: 21.0 },
    TertiaryRow { category: TertiaryUse::SchoolWithoutShowers, l_per_person: 4.0 },
    TertiaryRow { category: TertiaryUse::SchoolWithShowers, l_per_person: 21.0 },
    TertiaryRow { category: TertiaryUse::Barracks, l_per_person: 28.0 },
    TertiaryRow { category: TertiaryUse::FactoriesAndWorkshops, l_per_person: 21.0 },
    TertiaryRow { category: TertiaryUse::Offices, l_per_person: 2.0 },
    TertiaryRow { category: TertiaryUse::Gyms, l_per_person: 21.0 },
    TertiaryRow { category: TertiaryUse::Restaurants, l_per_person: 8.0 },
    TertiaryRow { category: TertiaryUse::Cafeterias, l_per_person: 1.0 },
];

impl TertiaryUse {
    /// Reference consumption in L/day per person at 60 °C.
    pub fn reference_consumption(self) -> f64 {
        TERTIARY_TABLE[self as usize].l_per_person
    }
}

/// Resolve a category from its slug (`hospitals-and-clinics`) or its table
/// label (`Hospitals and clinics`), ignoring ASCII case and surrounding space.
///
/// Plural labels also match their singular form (`Office`, `gym`).
pub fn lookup_category(name: &str) -> Result<TertiaryUse, DemandError> {
    let needle = name.trim();
    TertiaryUse::ALL
        .iter()
        .copied()
        .find(|c| {
            c.slug().eq_ignore_ascii_case(needle)
                || c.label().eq_ignore_ascii_case(needle)
                || c.label().strip_suffix('s').is_some_and(|s| s.eq_ignore_ascii_case(needle))
        })
        .ok_or_else(|| DemandError::UnknownCategory(needle.to_string()))
}

/// Reference consumption for a category given by name.
pub fn reference_consumption_for(name: &str) -> Result<f64, DemandError> {
    lookup_category(name).map(TertiaryUse::reference_consumption)
}

impl FromStr for TertiaryUse {
    type Err = DemandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup_category(s)
    }
}
