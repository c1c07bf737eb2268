//! Shared domain types.
//!
//! These types are kept small and serializable so they can be:
//!
//! - built by the CLI or the batch reader
//! - passed to the calculator by value
//! - exported to JSON/CSV together with the result breakdown

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Reference residential consumption in L/day per person at 60 °C.
pub const RESIDENTIAL_REFERENCE_L_PER_PERSON: f64 = 28.0;

/// Service temperature the reference consumptions are quoted at (°C).
pub const REFERENCE_TEMPERATURE_C: f64 = 60.0;

/// Cold-water baseline used by the temperature correction (°C).
pub const COLD_WATER_TEMPERATURE_C: f64 = 15.0;

/// Advisory service temperature range (°C) accepted by the CLI.
pub const SERVICE_TEMPERATURE_MIN_C: u32 = 30;
pub const SERVICE_TEMPERATURE_MAX_C: u32 = 90;

/// Non-residential usage categories with a fixed reference consumption.
///
/// The set is closed: every variant has exactly one entry in the tertiary-use table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TertiaryUse {
    HospitalsAndClinics,
    OutpatientAndHealthCentres,
    HotelFiveStar,
    HotelFourStar,
    HotelThreeStar,
    HotelHostelTwoStar,
    Camping,
    HostelGuesthouseOneStar,
    Residence,
    Prison,
    Shelter,
    ChangingRoomsAndCollectiveShowers,
    SchoolWithoutShowers,
    SchoolWithShowers,
    Barracks,
    FactoriesAndWorkshops,
    Offices,
    Gyms,
    Restaurants,
    Cafeterias,
}

impl TertiaryUse {
    pub const ALL: [TertiaryUse; 20] = [
        TertiaryUse::HospitalsAndClinics,
        TertiaryUse::OutpatientAndHealthCentres,
        TertiaryUse::HotelFiveStar,
        TertiaryUse::HotelFourStar,
        TertiaryUse::HotelThreeStar,
        TertiaryUse::HotelHostelTwoStar,
        TertiaryUse::Camping,
        TertiaryUse::HostelGuesthouseOneStar,
        TertiaryUse::Residence,
        TertiaryUse::Prison,
        TertiaryUse::Shelter,
        TertiaryUse::ChangingRoomsAndCollectiveShowers,
        TertiaryUse::SchoolWithoutShowers,
        TertiaryUse::SchoolWithShowers,
        TertiaryUse::Barracks,
        TertiaryUse::FactoriesAndWorkshops,
        TertiaryUse::Offices,
        TertiaryUse::Gyms,
        TertiaryUse::Restaurants,
        TertiaryUse::Cafeterias,
    ];

    /// Human-readable label, as printed in the reference table.
    pub fn label(self) -> &'static str {
        match self {
            TertiaryUse::HospitalsAndClinics => "Hospitals and clinics",
            TertiaryUse::OutpatientAndHealthCentres => "Outpatient and health centres",
            TertiaryUse::HotelFiveStar => "Hotel *****",
            TertiaryUse::HotelFourStar => "Hotel ****",
            TertiaryUse::HotelThreeStar => "Hotel ***",
            TertiaryUse::HotelHostelTwoStar => "Hotel/hostel **",
            TertiaryUse::Camping => "Camping",
            TertiaryUse::HostelGuesthouseOneStar => "Hostel/guesthouse *",
            TertiaryUse::Residence => "Residence",
            TertiaryUse::Prison => "Prison",
            TertiaryUse::Shelter => "Shelter",
            TertiaryUse::ChangingRoomsAndCollectiveShowers => "Changing rooms/collective showers",
            TertiaryUse::SchoolWithoutShowers => "School without showers",
            TertiaryUse::SchoolWithShowers => "School with showers",
            TertiaryUse::Barracks => "Barracks",
            TertiaryUse::FactoriesAndWorkshops => "Factories and workshops",
            TertiaryUse::Offices => "Offices",
            TertiaryUse::Gyms => "Gyms",
            TertiaryUse::Restaurants => "Restaurants",
            TertiaryUse::Cafeterias => "Cafeterias",
        }
    }

    /// Command-line / CSV identifier (kebab-case variant name).
    pub fn slug(self) -> String {
        self.to_possible_value()
            .map(|v| v.get_name().to_string())
            .unwrap_or_default()
    }
}

/// Single-family house or multi-dwelling building sharing one DHW system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BuildingKind {
    Single,
    Collective,
}

/// Residential building, with the dwelling count carried only where it applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ResidentialBuilding {
    SingleDwelling,
    Collective { dwellings: u32 },
}

impl ResidentialBuilding {
    pub fn kind(self) -> BuildingKind {
        match self {
            ResidentialBuilding::SingleDwelling => BuildingKind::Single,
            ResidentialBuilding::Collective { .. } => BuildingKind::Collective,
        }
    }
}

/// What the building is used for, with the inputs each use needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "use", rename_all = "lowercase")]
pub enum BuildingUse {
    Residential {
        /// Bedrooms per dwelling.
        bedrooms: u32,
        building: ResidentialBuilding,
    },
    Tertiary {
        category: TertiaryUse,
        occupants: u32,
    },
}

/// One calculation request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandRequest {
    #[serde(flatten)]
    pub building_use: BuildingUse,
    pub service_temperature_c: f64,
}

impl DemandRequest {
    pub fn single_dwelling(bedrooms: u32, service_temperature_c: f64) -> Self {
        Self {
            building_use: BuildingUse::Residential {
                bedrooms,
                building: ResidentialBuilding::SingleDwelling,
            },
            service_temperature_c,
        }
    }

    pub fn collective(bedrooms: u32, dwellings: u32, service_temperature_c: f64) -> Self {
        Self {
            building_use: BuildingUse::Residential {
                bedrooms,
                building: ResidentialBuilding::Collective { dwellings },
            },
            service_temperature_c,
        }
    }

    pub fn tertiary(category: TertiaryUse, occupants: u32, service_temperature_c: f64) -> Self {
        Self {
            building_use: BuildingUse::Tertiary { category, occupants },
            service_temperature_c,
        }
    }
}

/// Intermediate quantities behind a demand figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandBreakdown {
    /// Occupancy per dwelling (residential) or occupant count (tertiary).
    pub persons: f64,
    /// Reference consumption in L/day per person at 60 °C.
    pub reference_l_per_person: f64,
    pub dwellings: Option<u32>,
    pub centralization_factor: Option<f64>,
    /// Demand before the temperature correction (L/day).
    pub base_demand_l_per_day: f64,
    /// Multiplier applied for the service temperature (1.0 at 60 °C).
    pub temperature_factor: f64,
    pub service_temperature_c: f64,
}

/// Daily DHW demand plus the values used to get there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandResult {
    pub demand_l_per_day: f64,
    pub breakdown: DemandBreakdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tertiary_slugs_are_unique_kebab_case() {
        let slugs: std::collections::HashSet<String> = TertiaryUse::ALL.iter().map(|c| c.slug()).collect();
        assert_eq!(slugs.len(), TertiaryUse::ALL.len());
        assert_eq!(TertiaryUse::HospitalsAndClinics.slug(), "hospitals-and-clinics");
        assert_eq!(TertiaryUse::HotelFiveStar.slug(), "hotel-five-star");
    }

    #[test]
    fn request_serializes_with_use_tag() {
        let req = DemandRequest::collective(4, 10, 60.0);
        let json = serde_json::to_value(req).unwrap();
        assert_eq!(json["use"], "residential");
        assert_eq!(json["bedrooms"], 4);
        assert_eq!(json["building"]["kind"], "collective");
        assert_eq!(json["building"]["dwellings"], 10);
        assert_eq!(json["service_temperature_c"], 60.0);

        let back: DemandRequest = serde_json::from_value(json).unwrap();
        assert_eq!(back, req);
    }
}
