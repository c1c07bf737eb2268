//! Daily DHW demand.
//!
//! `compute_demand` is a pure function of its request: inputs are validated up
//! front, then the table lookups and the closed-form formula run:
//!
//! - single dwelling: `28 × occupancy(bedrooms)`
//! - collective: `28 × occupancy(bedrooms) × dwellings × centralization(dwellings)`
//! - tertiary: `reference(category) × occupants`
//!
//! followed by the service temperature correction `45 / (T − 15)` when `T ≠ 60`.

use tracing::{debug, instrument, warn};

use crate::domain::{
    BuildingUse, COLD_WATER_TEMPERATURE_C, DemandBreakdown, DemandRequest, DemandResult, REFERENCE_TEMPERATURE_C,
    RESIDENTIAL_REFERENCE_L_PER_PERSON, ResidentialBuilding, SERVICE_TEMPERATURE_MAX_C, SERVICE_TEMPERATURE_MIN_C,
};
use crate::error::DemandError;
use crate::tables::{centralization_factor_for, occupancy_for};

/// Multiplier converting a demand quoted at 60 °C to the given service temperature.
///
/// Exactly `1.0` at the reference temperature. Temperatures at or below the
/// cold-water baseline have no meaningful correction and are rejected.
pub fn temperature_correction(service_temperature_c: f64) -> Result<f64, DemandError> {
    if !service_temperature_c.is_finite() {
        return Err(DemandError::invalid("service temperature must be a finite number"));
    }
    if service_temperature_c <= COLD_WATER_TEMPERATURE_C {
        return Err(DemandError::invalid(format!(
            "service temperature must be above {COLD_WATER_TEMPERATURE_C} °C (got {service_temperature_c} °C)"
        )));
    }
    if service_temperature_c == REFERENCE_TEMPERATURE_C {
        return Ok(1.0);
    }
    Ok((REFERENCE_TEMPERATURE_C - COLD_WATER_TEMPERATURE_C) / (service_temperature_c - COLD_WATER_TEMPERATURE_C))
}

/// Reject any request the formula cannot be evaluated for.
pub fn validate_request(request: &DemandRequest) -> Result<(), DemandError> {
    match request.building_use {
        BuildingUse::Residential { bedrooms, building } => {
            if bedrooms == 0 {
                return Err(DemandError::invalid("bedroom count must be at least 1"));
            }
            if let ResidentialBuilding::Collective { dwellings: 0 } = building {
                return Err(DemandError::invalid("dwelling count must be at least 1"));
            }
        }
        BuildingUse::Tertiary { occupants, .. } => {
            if occupants == 0 {
                return Err(DemandError::invalid("occupant count must be at least 1"));
            }
        }
    }
    temperature_correction(request.service_temperature_c).map(|_| ())
}

/// Compute the daily DHW demand (L/day) and its breakdown.
#[instrument(level = "debug", err)]
pub fn compute_demand(request: &DemandRequest) -> Result<DemandResult, DemandError> {
    validate_request(request)?;

    let t = request.service_temperature_c;
    if t < SERVICE_TEMPERATURE_MIN_C as f64 || t > SERVICE_TEMPERATURE_MAX_C as f64 {
        warn!(
            service_temperature_c = t,
            "service temperature outside the usual {SERVICE_TEMPERATURE_MIN_C}-{SERVICE_TEMPERATURE_MAX_C} °C range"
        );
    }

    let (persons, reference_l_per_person, dwellings, centralization_factor, base) = match request.building_use {
        BuildingUse::Residential { bedrooms, building } => {
            let persons = occupancy_for(bedrooms)?;
            let per_dwelling = RESIDENTIAL_REFERENCE_L_PER_PERSON * persons;
            match building {
                ResidentialBuilding::SingleDwelling => {
                    (persons, RESIDENTIAL_REFERENCE_L_PER_PERSON, None, None, per_dwelling)
                }
                ResidentialBuilding::Collective { dwellings } => {
                    // The factor discounts the aggregate, not the per-dwelling figure.
                    let factor = centralization_factor_for(dwellings)?;
                    let base = per_dwelling * dwellings as f64 * factor;
                    (persons, RESIDENTIAL_REFERENCE_L_PER_PERSON, Some(dwellings), Some(factor), base)
                }
            }
        }
        BuildingUse::Tertiary { category, occupants } => {
            let reference = category.reference_consumption();
            (occupants as f64, reference, None, None, reference * occupants as f64)
        }
    };

    let temperature_factor = temperature_correction(t)?;
    let demand = base * temperature_factor;
    debug!(persons, base, temperature_factor, demand, "demand computed");

    Ok(DemandResult {
        demand_l_per_day: demand,
        breakdown: DemandBreakdown {
            persons,
            reference_l_per_person,
            dwellings,
            centralization_factor,
            base_demand_l_per_day: base,
            temperature_factor,
            service_temperature_c: t,
        },
    })
}
