use indexmap::IndexMap;
use serde::Deserialize;

/// Thermal bridging of a zone envelope, given either as one overall heat transfer
/// coefficient (W / K) or as a collection of named linear and point bridges.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(untagged)]
pub enum ThermalBridging {
    Number(f64),
    Bridges(IndexMap<String, ThermalBridge>),
}

impl Default for ThermalBridging {
    fn default() -> Self {
        ThermalBridging::Number(0.)
    }
}

#[derive(Copy, Clone, Debug, Deserialize, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(tag = "type", deny_unknown_fields)]
pub enum ThermalBridge {
    #[serde(rename = "ThermalBridgeLinear")]
    Linear {
        linear_thermal_transmittance: f64,
        length: f64,
    },
    #[serde(rename = "ThermalBridgePoint")]
    Point {
        #[serde(rename = "heat_transfer_coeff")]
        heat_transfer_coefficient: f64,
    },
}

pub fn heat_transfer_coefficient_for_thermal_bridge(thermal_bridge: &ThermalBridge) -> f64 {
    match *thermal_bridge {
        ThermalBridge::Linear {
            linear_thermal_transmittance: t,
            length: l,
        } => t * l,
        ThermalBridge::Point {
            heat_transfer_coefficient: h,
        } => h,
    }
}

/// Overall heat transfer coefficient of the thermal bridging, in W / K.
///
/// ISO 13790 counts thermal bridges as part of the opaque transmission path, so this
/// value is added to H_tr,em.
pub fn heat_transfer_coefficient_for_thermal_bridging(thermal_bridging: &ThermalBridging) -> f64 {
    match thermal_bridging {
        ThermalBridging::Number(heat_coeff) => *heat_coeff,
        ThermalBridging::Bridges(bridges) => bridges
            .values()
            .map(heat_transfer_coefficient_for_thermal_bridge)
            .sum::<f64>(),
    }
}
