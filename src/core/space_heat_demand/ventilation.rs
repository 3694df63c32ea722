// This module provides the ventilation heat transfer coefficient of a zone.
// The calculations are based on ISO 13790, section 9.3.

use crate::core::material_properties::AIR;
use crate::core::units::SECONDS_PER_HOUR;

fn p_a_c_a() -> f64 {
    AIR.volumetric_heat_capacity_per_m3()
}

/// Convert an air change rate in ach to a flow rate in m^3/s
fn air_change_rate_to_flow_rate(air_change_rate: f64, zone_volume: f64) -> f64 {
    air_change_rate * zone_volume / SECONDS_PER_HOUR as f64
}

/// Air change rate that exchanges heat with the outside, in ach
///
/// Mechanical supply air passes a heat recovery unit, so only the fraction not
/// recovered counts as a loss. Infiltration is never recovered.
///
/// Arguments:
/// * `ach_vent` - mechanical ventilation rate, in ach
/// * `ach_infl` - infiltration rate, in ach
/// * `ventilation_efficiency` - heat recovery efficiency of the ventilation unit, 0 to 1
pub fn effective_air_change_rate(ach_vent: f64, ach_infl: f64, ventilation_efficiency: f64) -> f64 {
    ach_vent * (1.0 - ventilation_efficiency) + ach_infl
}

/// Calculate the ventilation heat transfer coefficient H_ve, in W / K
///
/// Arguments:
/// * `ach_vent` - mechanical ventilation rate, in ach
/// * `ach_infl` - infiltration rate, in ach
/// * `ventilation_efficiency` - heat recovery efficiency of the ventilation unit, 0 to 1
/// * `zone_volume` - volume of the zone, in m3
pub fn h_ve(ach_vent: f64, ach_infl: f64, ventilation_efficiency: f64, zone_volume: f64) -> f64 {
    let air_change_rate = effective_air_change_rate(ach_vent, ach_infl, ventilation_efficiency);
    p_a_c_a() * air_change_rate_to_flow_rate(air_change_rate, zone_volume)
}
