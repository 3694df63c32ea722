//! Runs zones over a sequence of timesteps, threading the thermal mass temperature
//! from one timestep into the next.

use crate::core::space_heat_demand::building_config::BuildingConfig;
use crate::core::space_heat_demand::zone::{
    evaluate_timestep, ConditioningMode, DemandState, ThermalState,
};
use crate::errors::ZoneCalculationError;
use crate::input::ProjectInput;
use crate::read_timestep_file::TimestepConditions;
use anyhow::Context;
use indexmap::IndexMap;
use itertools::{Itertools, MinMaxResult};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

/// A zone ready to be simulated
#[derive(Clone, Debug)]
pub struct ZoneModel {
    pub config: BuildingConfig,
    pub initial_theta_m: f64,
}

pub fn zone_models_from_input(input: &ProjectInput) -> anyhow::Result<IndexMap<String, ZoneModel>> {
    input
        .zones
        .iter()
        .map(|(name, zone)| {
            let parameters = zone
                .building_parameters(input.timestep_seconds)
                .with_context(|| format!("could not derive parameters for zone '{name}'"))?;
            let config = BuildingConfig::new(parameters)
                .with_context(|| format!("zone '{name}' is not a valid configuration"))?;
            Ok((
                name.clone(),
                ZoneModel {
                    config,
                    initial_theta_m: zone.initial_mass_temperature(),
                },
            ))
        })
        .collect()
}

#[derive(Clone, Debug)]
pub struct ZoneResults {
    pub states: Vec<ThermalState>,
    pub summary: ZoneSummary,
}

/// Totals and extremes over a zone's run
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ZoneSummary {
    pub heating_energy_kwh: f64,
    /// magnitude of the cooling energy, in kWh
    pub cooling_energy_kwh: f64,
    pub peak_heating_power: f64,
    /// magnitude of the largest cooling power, in W
    pub peak_cooling_power: f64,
    /// timesteps where the installed capacity could not hold the setpoint
    pub unmet_timesteps: usize,
    pub min_air_temperature: f64,
    pub max_air_temperature: f64,
}

impl ZoneSummary {
    pub fn from_states(states: &[ThermalState]) -> Self {
        let mut summary = states.iter().fold(Self::default(), |mut summary, state| {
            let energy = state.energy_demand_kwh();
            if state.has_heating_demand() {
                summary.heating_energy_kwh += energy;
                summary.peak_heating_power = summary.peak_heating_power.max(state.phi_hc_nd());
            } else if state.has_cooling_demand() {
                summary.cooling_energy_kwh -= energy;
                summary.peak_cooling_power = summary.peak_cooling_power.max(-state.phi_hc_nd());
            }
            if matches!(state.demand(), DemandState::CapacityLimited { .. }) {
                summary.unmet_timesteps += 1;
            }
            summary
        });

        (summary.min_air_temperature, summary.max_air_temperature) =
            match states.iter().map(ThermalState::theta_air).minmax() {
                MinMaxResult::NoElements => (f64::NAN, f64::NAN),
                MinMaxResult::OneElement(theta_air) => (theta_air, theta_air),
                MinMaxResult::MinMax(min, max) => (min, max),
            };

        summary
    }
}

/// Simulate a single zone over the given timesteps, starting from `initial_theta_m`.
pub fn simulate_zone(
    zone_name: &str,
    config: &BuildingConfig,
    initial_theta_m: f64,
    conditions: &[TimestepConditions],
) -> Result<ZoneResults, ZoneCalculationError> {
    let mut theta_m = initial_theta_m;
    let mut states = Vec::with_capacity(conditions.len());

    for (t_idx, timestep) in conditions.iter().enumerate() {
        let state = evaluate_timestep(config, &timestep.with_mass_temperature(theta_m))
            .map_err(|error| ZoneCalculationError::new(zone_name, t_idx, error))?;

        if let DemandState::CapacityLimited { mode } = state.demand() {
            let setpoint = match mode {
                ConditioningMode::Heating => config.heating_setpoint(),
                ConditioningMode::Cooling => config.cooling_setpoint(),
            };
            warn!(
                zone = zone_name,
                timestep = t_idx,
                theta_air = state.theta_air(),
                setpoint,
                "{mode} capacity insufficient to reach setpoint"
            );
        }

        theta_m = state.theta_m();
        states.push(state);
    }

    let summary = ZoneSummary::from_states(&states);
    info!(
        zone = zone_name,
        timesteps = states.len(),
        heating_kwh = summary.heating_energy_kwh,
        cooling_kwh = summary.cooling_energy_kwh,
        unmet = summary.unmet_timesteps,
        "zone simulated"
    );

    Ok(ZoneResults { states, summary })
}

/// Simulate every zone in parallel. Results keep the order of `zones`.
pub fn run_zones(
    zones: &IndexMap<String, ZoneModel>,
    conditions: &[TimestepConditions],
) -> Result<IndexMap<String, ZoneResults>, ZoneCalculationError> {
    zones
        .iter()
        .collect_vec()
        .into_par_iter()
        .map(|(name, zone)| {
            simulate_zone(name, &zone.config, zone.initial_theta_m, conditions)
                .map(|results| (name.clone(), results))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(IndexMap::from_iter)
}
