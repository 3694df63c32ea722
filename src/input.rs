use crate::core::space_heat_demand::building_config::{
    BuildingParameters, MassClass, LAMBDA_AT,
};
use crate::core::space_heat_demand::thermal_bridge::{
    heat_transfer_coefficient_for_thermal_bridging, ThermalBridging,
};
use crate::core::space_heat_demand::ventilation::h_ve;
use crate::core::units::SECONDS_PER_HOUR;
use anyhow::{anyhow, bail, Context};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_valid::Validate;
use std::io::{BufReader, Read};

pub fn ingest_for_processing(json: impl Read) -> Result<ProjectInput, anyhow::Error> {
    let input: ProjectInput = serde_json::from_reader(BufReader::new(json))
        .context("could not parse project input JSON")?;

    input
        .validate()
        .map_err(|errors| anyhow!("project input failed validation: {errors}"))?;
    for (zone_name, zone) in &input.zones {
        zone.validate()
            .map_err(|errors| anyhow!("zone '{zone_name}' failed validation: {errors}"))?;
    }
    if input.zones.is_empty() {
        bail!("project input must define at least one zone");
    }

    Ok(input)
}

fn default_timestep_seconds() -> f64 {
    SECONDS_PER_HOUR as f64
}

#[derive(Debug, Deserialize, Validate)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct ProjectInput {
    pub zones: IndexMap<String, ZoneInput>,
    #[serde(default = "default_timestep_seconds")]
    #[validate(exclusive_minimum = 0.)]
    pub timestep_seconds: f64,
}

#[derive(Debug, Deserialize, Validate)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(deny_unknown_fields)]
pub struct ZoneInput {
    #[validate]
    pub geometry: Geometry,
    #[validate]
    pub fabric: Fabric,
    #[validate]
    pub ventilation: Ventilation,
    pub setpoints: Setpoints,
    /// in W/m2, unlimited if absent
    #[validate(minimum = 0.)]
    pub max_heating_power_per_floor_area: Option<f64>,
    /// magnitude in W/m2, unlimited if absent
    #[validate(minimum = 0.)]
    pub max_cooling_power_per_floor_area: Option<f64>,
    /// thermal mass temperature at the start of the run, defaults to the heating setpoint
    pub initial_mass_temperature: Option<f64>,
}

#[derive(Debug, Deserialize, Validate)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(deny_unknown_fields)]
pub struct Geometry {
    #[validate(exclusive_minimum = 0.)]
    pub room_depth: f64,
    #[validate(exclusive_minimum = 0.)]
    pub room_width: f64,
    #[validate(exclusive_minimum = 0.)]
    pub room_height: f64,
    #[validate(minimum = 0.)]
    pub window_area: f64,
    /// external wall area including the window, in m2
    #[validate(minimum = 0.)]
    pub external_envelope_area: f64,
}

impl Geometry {
    pub fn floor_area(&self) -> f64 {
        self.room_depth * self.room_width
    }

    pub fn volume(&self) -> f64 {
        self.floor_area() * self.room_height
    }
}

#[derive(Debug, Deserialize, Validate)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(deny_unknown_fields)]
pub struct Fabric {
    #[validate(minimum = 0.)]
    pub u_walls: f64,
    #[validate(minimum = 0.)]
    pub u_windows: f64,
    #[serde(default)]
    pub mass_class: MassClass,
    /// overrides the capacitance of the mass class, in J/(m2.K)
    #[validate(exclusive_minimum = 0.)]
    pub thermal_capacitance_per_floor_area: Option<f64>,
    #[serde(default)]
    pub thermal_bridging: ThermalBridging,
}

#[derive(Debug, Deserialize, Validate)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(deny_unknown_fields)]
pub struct Ventilation {
    #[validate(minimum = 0.)]
    pub ach_vent: f64,
    #[validate(minimum = 0.)]
    pub ach_infl: f64,
    /// heat recovery efficiency of the mechanical ventilation
    #[validate(minimum = 0.)]
    #[validate(maximum = 1.)]
    pub ventilation_efficiency: f64,
}

#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(deny_unknown_fields)]
pub struct Setpoints {
    pub heating: f64,
    pub cooling: f64,
}

impl ZoneInput {
    /// Derive the network parameters for this zone
    pub fn building_parameters(&self, timestep_seconds: f64) -> anyhow::Result<BuildingParameters> {
        let Geometry {
            window_area,
            external_envelope_area,
            ..
        } = self.geometry;
        if window_area > external_envelope_area {
            bail!(
                "window area ({window_area} m2) is larger than the external envelope area ({external_envelope_area} m2)"
            );
        }

        let floor_area = self.geometry.floor_area();
        let mass_class = self.fabric.mass_class;
        let capacitance_per_floor_area = self
            .fabric
            .thermal_capacitance_per_floor_area
            .unwrap_or_else(|| mass_class.thermal_capacitance_per_floor_area());

        Ok(BuildingParameters {
            floor_area,
            window_area,
            window_u_value: self.fabric.u_windows,
            opaque_area: external_envelope_area - window_area,
            wall_u_value: self.fabric.u_walls,
            thermal_bridging: heat_transfer_coefficient_for_thermal_bridging(
                &self.fabric.thermal_bridging,
            ),
            ventilation_conductance: h_ve(
                self.ventilation.ach_vent,
                self.ventilation.ach_infl,
                self.ventilation.ventilation_efficiency,
                self.geometry.volume(),
            ),
            thermal_capacitance: capacitance_per_floor_area * floor_area,
            effective_mass_area: mass_class.effective_mass_area_factor() * floor_area,
            total_internal_area: LAMBDA_AT * floor_area,
            heating_setpoint: self.setpoints.heating,
            cooling_setpoint: self.setpoints.cooling,
            max_heating_power: self
                .max_heating_power_per_floor_area
                .map_or(f64::INFINITY, |power| power * floor_area),
            max_cooling_power: self
                .max_cooling_power_per_floor_area
                .map_or(f64::INFINITY, |power| power * floor_area),
            timestep_seconds,
        })
    }

    pub fn initial_mass_temperature(&self) -> f64 {
        self.initial_mass_temperature
            .unwrap_or(self.setpoints.heating)
    }
}
