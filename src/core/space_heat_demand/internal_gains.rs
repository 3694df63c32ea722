//! Distribution of internal and solar heat gains over the nodes of the 5R1C network,
//! following ISO 13790 Annex C, equations C.1 to C.3.

use serde::Serialize;

/// Share of the internal gains released convectively to the air node.
const F_INT_C: f64 = 0.5;

/// Surface heat transfer coefficient between the mass and surface nodes, in W / (m2.K)
pub(crate) const H_MS: f64 = 9.1;

/// Heat flows injected at the air, surface and mass nodes, in W
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct GainSplit {
    /// gains to the air node
    pub phi_ia: f64,
    /// gains to the surface (mean radiant) node
    pub phi_st: f64,
    /// gains to the thermal mass node
    pub phi_m: f64,
}

impl GainSplit {
    pub fn total(&self) -> f64 {
        self.phi_ia + self.phi_st + self.phi_m
    }
}

/// Split internal and solar gains between the air, surface and mass nodes
///
/// The non-convective share of the internal gains and all solar gains are radiated
/// onto the internal surfaces, and are divided between the mass and surface nodes in
/// proportion to the effective mass area. The part of this radiation that would reach
/// the window surface is lost back through the glazing and is not injected.
///
/// No validation is done here; zero and negative gains pass straight through.
///
/// ## Arguments
/// * `phi_int` - internal heat gains, in W
/// * `phi_sol` - solar heat gains, in W
/// * `a_m` - effective mass area, in m2
/// * `a_t` - area of all surfaces facing the zone, in m2
/// * `h_tr_w` - heat transfer coefficient through windows, in W / K
pub fn split_gains(phi_int: f64, phi_sol: f64, a_m: f64, a_t: f64, h_tr_w: f64) -> GainSplit {
    let phi_radiant = (1.0 - F_INT_C) * phi_int + phi_sol;
    let mass_fraction = a_m / a_t;

    GainSplit {
        phi_ia: F_INT_C * phi_int,
        phi_st: (1.0 - mass_fraction - h_tr_w / (H_MS * a_t)) * phi_radiant,
        phi_m: mass_fraction * phi_radiant,
    }
}
