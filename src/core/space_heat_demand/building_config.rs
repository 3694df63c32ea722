//! Building envelope parameters and the conductances and capacitance of the
//! ISO 13790 5R1C network derived from them.

use crate::core::space_heat_demand::internal_gains::H_MS;
use crate::core::units::SECONDS_PER_HOUR;
use crate::errors::ZoneError;
use serde::Deserialize;
use serde_valid::Validate;

/// Heat transfer coefficient between the air node and the surface node, in W / (m2.K)
/// (ISO 13790, section 7.2.2.2)
const H_IS: f64 = 3.45;

/// Ratio of internal surface area to floor area (ISO 13790, section 7.2.2.2)
pub const LAMBDA_AT: f64 = 4.5;

/// Thermal mass classes of ISO 13790, Table 12
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, strum::EnumIter)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub enum MassClass {
    VeryLight,
    Light,
    #[default]
    Medium,
    Heavy,
    VeryHeavy,
}

impl MassClass {
    /// Effective mass area per unit floor area
    pub fn effective_mass_area_factor(&self) -> f64 {
        match self {
            MassClass::VeryLight | MassClass::Light | MassClass::Medium => 2.5,
            MassClass::Heavy => 3.0,
            MassClass::VeryHeavy => 3.5,
        }
    }

    /// Internal heat capacity per unit floor area, in J / (m2.K)
    pub fn thermal_capacitance_per_floor_area(&self) -> f64 {
        match self {
            MassClass::VeryLight => 80_000.,
            MassClass::Light => 110_000.,
            MassClass::Medium => 165_000.,
            MassClass::Heavy => 260_000.,
            MassClass::VeryHeavy => 370_000.,
        }
    }
}

/// Raw parameters of a zone, before validation.
///
/// Temperatures may be in any unit as long as the setpoints and the timestep inputs
/// use the same one; the network only ever works with temperature differences.
#[derive(Clone, Debug, PartialEq, Validate)]
pub struct BuildingParameters {
    /// useful floor area, in m2
    #[validate(exclusive_minimum = 0.)]
    pub floor_area: f64,
    /// glazed area, in m2
    pub window_area: f64,
    /// U-value of the glazing, in W / (m2.K)
    pub window_u_value: f64,
    /// external opaque envelope area, in m2
    pub opaque_area: f64,
    /// U-value of the opaque envelope, in W / (m2.K)
    pub wall_u_value: f64,
    /// heat transfer coefficient of thermal bridges, in W / K
    #[validate(minimum = 0.)]
    pub thermal_bridging: f64,
    /// ventilation heat transfer coefficient H_ve, in W / K
    pub ventilation_conductance: f64,
    /// internal heat capacity C_m, in J / K
    pub thermal_capacitance: f64,
    /// effective mass area A_m, in m2
    pub effective_mass_area: f64,
    /// area of all surfaces facing the zone A_t, in m2
    pub total_internal_area: f64,
    pub heating_setpoint: f64,
    pub cooling_setpoint: f64,
    /// in W, may be infinite
    pub max_heating_power: f64,
    /// magnitude of the maximum cooling power, in W, may be infinite
    pub max_cooling_power: f64,
    /// length of the calculation timestep, in seconds
    #[validate(exclusive_minimum = 0.)]
    pub timestep_seconds: f64,
}

impl BuildingParameters {
    /// Parameters for a zone with the standard internal area ratio and the given mass class.
    ///
    /// Setpoints default to 20 and 26 (deg C) with unlimited capacity and an hourly timestep.
    pub fn with_mass_class(
        floor_area: f64,
        window_area: f64,
        window_u_value: f64,
        opaque_area: f64,
        wall_u_value: f64,
        ventilation_conductance: f64,
        mass_class: MassClass,
    ) -> Self {
        Self {
            floor_area,
            window_area,
            window_u_value,
            opaque_area,
            wall_u_value,
            thermal_bridging: 0.,
            ventilation_conductance,
            thermal_capacitance: mass_class.thermal_capacitance_per_floor_area() * floor_area,
            effective_mass_area: mass_class.effective_mass_area_factor() * floor_area,
            total_internal_area: LAMBDA_AT * floor_area,
            heating_setpoint: 20.,
            cooling_setpoint: 26.,
            max_heating_power: f64::INFINITY,
            max_cooling_power: f64::INFINITY,
            timestep_seconds: SECONDS_PER_HOUR as f64,
        }
    }
}

/// The five conductances of the network, in W / K, plus the series combinations
/// H_tr,1 to H_tr,3 of ISO 13790 Annex C.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NetworkConductances {
    pub h_tr_w: f64,
    pub h_tr_em: f64,
    pub h_tr_ms: f64,
    pub h_tr_is: f64,
    pub h_ve: f64,
    pub h_tr_1: f64,
    pub h_tr_2: f64,
    pub h_tr_3: f64,
}

impl NetworkConductances {
    fn from_parameters(parameters: &BuildingParameters) -> Self {
        let h_tr_w = parameters.window_u_value * parameters.window_area;
        let h_tr_em =
            parameters.wall_u_value * parameters.opaque_area + parameters.thermal_bridging;
        let h_tr_ms = H_MS * parameters.effective_mass_area;
        let h_tr_is = H_IS * parameters.total_internal_area;
        let h_ve = parameters.ventilation_conductance;

        // (C.6) to (C.8)
        let h_tr_1 = 1.0 / (1.0 / h_ve + 1.0 / h_tr_is);
        let h_tr_2 = h_tr_1 + h_tr_w;
        let h_tr_3 = 1.0 / (1.0 / h_tr_2 + 1.0 / h_tr_ms);

        Self {
            h_tr_w,
            h_tr_em,
            h_tr_ms,
            h_tr_is,
            h_ve,
            h_tr_1,
            h_tr_2,
            h_tr_3,
        }
    }
}

/// A validated zone configuration. Built once and never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct BuildingConfig {
    parameters: BuildingParameters,
    conductances: NetworkConductances,
}

impl BuildingConfig {
    pub fn new(parameters: BuildingParameters) -> Result<Self, ZoneError> {
        parameters
            .validate()
            .map_err(|errors| ZoneError::invalid_configuration(errors.to_string()))?;

        let conductances = NetworkConductances::from_parameters(&parameters);

        for (name, value) in [
            ("H_tr,w", conductances.h_tr_w),
            ("H_tr,em", conductances.h_tr_em),
            ("H_tr,ms", conductances.h_tr_ms),
            ("H_tr,is", conductances.h_tr_is),
            ("H_ve", conductances.h_ve),
            ("C_m", parameters.thermal_capacitance),
        ] {
            if !(value.is_finite() && value > 0.) {
                return Err(ZoneError::invalid_configuration(format!(
                    "{name} must be strictly positive and finite, got {value}"
                )));
            }
        }

        if !(parameters.heating_setpoint.is_finite() && parameters.cooling_setpoint.is_finite()) {
            return Err(ZoneError::invalid_configuration(
                "setpoints must be finite numbers",
            ));
        }
        if parameters.heating_setpoint > parameters.cooling_setpoint {
            return Err(ZoneError::invalid_configuration(format!(
                "heating setpoint ({}) is above cooling setpoint ({})",
                parameters.heating_setpoint, parameters.cooling_setpoint
            )));
        }

        // NaN fails both comparisons
        for (name, value) in [
            ("maximum heating power", parameters.max_heating_power),
            ("maximum cooling power", parameters.max_cooling_power),
        ] {
            if !(value >= 0.) {
                return Err(ZoneError::invalid_configuration(format!(
                    "{name} must be zero or positive, got {value}"
                )));
            }
        }

        Ok(Self {
            parameters,
            conductances,
        })
    }

    pub fn conductances(&self) -> &NetworkConductances {
        &self.conductances
    }

    pub fn floor_area(&self) -> f64 {
        self.parameters.floor_area
    }

    pub fn effective_mass_area(&self) -> f64 {
        self.parameters.effective_mass_area
    }

    pub fn total_internal_area(&self) -> f64 {
        self.parameters.total_internal_area
    }

    pub fn thermal_capacitance(&self) -> f64 {
        self.parameters.thermal_capacitance
    }

    pub fn heating_setpoint(&self) -> f64 {
        self.parameters.heating_setpoint
    }

    pub fn cooling_setpoint(&self) -> f64 {
        self.parameters.cooling_setpoint
    }

    pub fn max_heating_power(&self) -> f64 {
        self.parameters.max_heating_power
    }

    pub fn max_cooling_power(&self) -> f64 {
        self.parameters.max_cooling_power
    }

    pub fn timestep_seconds(&self) -> f64 {
        self.parameters.timestep_seconds
    }
}
