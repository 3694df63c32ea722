use crate::core::space_heat_demand::building_config::BuildingConfig;
use crate::core::space_heat_demand::internal_gains::{split_gains, GainSplit};
use crate::core::units::watts_over_timestep_to_kwh;
use crate::errors::ZoneError;
use serde::Serialize;
use tracing::{debug, trace};

/// Heating or cooling power per floor area applied in the probe solve, in W / m2
/// (ISO 13790, section C.4.2, step 2)
const PHI_HC_PROBE_PER_FLOOR_AREA: f64 = 10.;

/// Boundary conditions for one timestep
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct TimestepInputs {
    /// external air temperature
    pub theta_e: f64,
    /// internal heat gains, in W
    pub phi_int: f64,
    /// solar heat gains, in W
    pub phi_sol: f64,
    /// temperature of the thermal mass at the end of the previous timestep
    pub theta_m_prev: f64,
}

impl TimestepInputs {
    fn check_finite(&self) -> Result<(), ZoneError> {
        for (field, value) in [
            ("theta_e", self.theta_e),
            ("phi_int", self.phi_int),
            ("phi_sol", self.phi_sol),
            ("theta_m_prev", self.theta_m_prev),
        ] {
            if !value.is_finite() {
                return Err(ZoneError::NonFiniteInput { field, value });
            }
        }
        Ok(())
    }
}

/// Node temperatures and mass node heat flow for a given heating/cooling power
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct NetworkSolution {
    pub(crate) phi_hc: f64,
    pub(crate) phi_m_tot: f64,
    pub(crate) theta_m_t: f64,
    pub(crate) theta_m: f64,
    pub(crate) theta_s: f64,
    pub(crate) theta_air: f64,
}

impl NetworkSolution {
    fn check_finite(&self) -> Result<(), ZoneError> {
        for (quantity, value) in [
            ("phi_hc", self.phi_hc),
            ("phi_m_tot", self.phi_m_tot),
            ("theta_m", self.theta_m_t),
            ("theta_s", self.theta_s),
            ("theta_air", self.theta_air),
        ] {
            if !value.is_finite() {
                return Err(ZoneError::NonFiniteResult { quantity, value });
            }
        }
        Ok(())
    }
}

/// Solve the network for a fixed heating (positive) or cooling (negative) power
/// injected at the air node, according to ISO 13790 Annex C, equations C.4 to C.11.
///
/// The supply air is assumed to enter at the external air temperature; heat recovery
/// is already accounted for in H_ve.
pub(crate) fn solve_network(
    config: &BuildingConfig,
    gains: &GainSplit,
    theta_e: f64,
    theta_m_prev: f64,
    phi_hc: f64,
) -> NetworkSolution {
    let c = config.conductances();
    let theta_sup = theta_e;
    let phi_air = gains.phi_ia + phi_hc;

    // (C.5)
    let phi_m_tot = gains.phi_m
        + c.h_tr_em * theta_e
        + c.h_tr_3 * (gains.phi_st + c.h_tr_w * theta_e + c.h_tr_1 * (phi_air / c.h_ve + theta_sup))
            / c.h_tr_2;

    // (C.4) Crank-Nicolson step of the mass node
    let capacitance_per_step = config.thermal_capacitance() / config.timestep_seconds();
    let h_half = 0.5 * (c.h_tr_3 + c.h_tr_em);
    let theta_m_t = (theta_m_prev * (capacitance_per_step - h_half) + phi_m_tot)
        / (capacitance_per_step + h_half);

    // (C.9)
    let theta_m = (theta_m_t + theta_m_prev) / 2.0;

    // (C.10)
    let theta_s = (c.h_tr_ms * theta_m
        + gains.phi_st
        + c.h_tr_w * theta_e
        + c.h_tr_1 * (theta_sup + phi_air / c.h_ve))
        / (c.h_tr_ms + c.h_tr_w + c.h_tr_1);

    // (C.11)
    let theta_air = (c.h_tr_is * theta_s + c.h_ve * theta_sup + phi_air) / (c.h_tr_is + c.h_ve);

    trace!(phi_hc, phi_m_tot, theta_m_t, theta_s, theta_air, "solved 5R1C network");

    NetworkSolution {
        phi_hc,
        phi_m_tot,
        theta_m_t,
        theta_m,
        theta_s,
        theta_air,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ConditioningMode {
    Heating,
    Cooling,
}

/// How the heating/cooling demand for a timestep was resolved
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DemandState {
    /// Free-floating air temperature is within the setpoint band
    Floating,
    /// Setpoint held exactly, within installed capacity
    Conditioned { mode: ConditioningMode },
    /// Installed capacity is insufficient; the air temperature misses the setpoint
    CapacityLimited { mode: ConditioningMode },
}

impl DemandState {
    pub fn mode(&self) -> Option<ConditioningMode> {
        match self {
            DemandState::Floating => None,
            DemandState::Conditioned { mode } | DemandState::CapacityLimited { mode } => {
                Some(*mode)
            }
        }
    }

    pub fn label(&self) -> String {
        match self {
            DemandState::Floating => "floating".to_string(),
            DemandState::Conditioned { mode } => format!("{mode}"),
            DemandState::CapacityLimited { mode } => format!("{mode}_capacity_limited"),
        }
    }
}

/// Which setpoint, if any, the free-floating air temperature violates
pub(crate) fn conditioning_mode_for(
    config: &BuildingConfig,
    theta_air_free: f64,
) -> Option<ConditioningMode> {
    if theta_air_free < config.heating_setpoint() {
        Some(ConditioningMode::Heating)
    } else if theta_air_free > config.cooling_setpoint() {
        Some(ConditioningMode::Cooling)
    } else {
        None
    }
}

/// Change in air temperature per watt injected at the air node.
///
/// The air temperature is affine in the injected power, so the slope does not depend
/// on the boundary conditions and is taken with every temperature and gain at zero.
pub(crate) fn air_temperature_response(config: &BuildingConfig) -> f64 {
    let phi_hc_probe = PHI_HC_PROBE_PER_FLOOR_AREA * config.floor_area();
    let probe = solve_network(config, &GainSplit::default(), 0., 0., phi_hc_probe);

    probe.theta_air / phi_hc_probe
}

/// Heating (positive) or cooling (negative) power needed to bring the air
/// temperature exactly to the setpoint of `mode`, with unlimited capacity.
///
/// Equivalent to interpolating between the free-floating solve and a 10 W/m2 probe
/// solve (ISO 13790, C.4.2, step 2).
pub(crate) fn unrestricted_demand(
    config: &BuildingConfig,
    free: &NetworkSolution,
    mode: ConditioningMode,
) -> f64 {
    let theta_set = match mode {
        ConditioningMode::Heating => config.heating_setpoint(),
        ConditioningMode::Cooling => config.cooling_setpoint(),
    };

    (theta_set - free.theta_air) / air_temperature_response(config)
}

/// Clamp an unrestricted demand to the installed capacity for `mode`.
///
/// Returns the adopted power and whether the capacity limit was hit.
pub(crate) fn limit_to_capacity(
    config: &BuildingConfig,
    phi_hc_unrestricted: f64,
    mode: ConditioningMode,
) -> (f64, bool) {
    match mode {
        ConditioningMode::Heating if phi_hc_unrestricted > config.max_heating_power() => {
            (config.max_heating_power(), true)
        }
        ConditioningMode::Cooling if phi_hc_unrestricted < -config.max_cooling_power() => {
            (-config.max_cooling_power(), true)
        }
        _ => (phi_hc_unrestricted, false),
    }
}

/// Resolved state of the zone at the end of a timestep
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ThermalState {
    theta_m: f64,
    theta_m_avg: f64,
    theta_s: f64,
    theta_air: f64,
    phi_hc_nd: f64,
    phi_hc_nd_unrestricted: f64,
    phi_m_tot: f64,
    gains: GainSplit,
    demand: DemandState,
    timestep_seconds: f64,
}

impl ThermalState {
    fn from_solution(
        solution: &NetworkSolution,
        gains: GainSplit,
        phi_hc_nd_unrestricted: f64,
        demand: DemandState,
        timestep_seconds: f64,
    ) -> Self {
        Self {
            theta_m: solution.theta_m_t,
            theta_m_avg: solution.theta_m,
            theta_s: solution.theta_s,
            theta_air: solution.theta_air,
            phi_hc_nd: solution.phi_hc,
            phi_hc_nd_unrestricted,
            phi_m_tot: solution.phi_m_tot,
            gains,
            demand,
            timestep_seconds,
        }
    }

    /// Mass temperature at the end of the timestep; pass this as `theta_m_prev` of the next one
    pub fn theta_m(&self) -> f64 {
        self.theta_m
    }

    /// Mass temperature averaged over the timestep
    pub fn theta_m_avg(&self) -> f64 {
        self.theta_m_avg
    }

    /// Surface (mean radiant) temperature
    pub fn theta_s(&self) -> f64 {
        self.theta_s
    }

    pub fn theta_air(&self) -> f64 {
        self.theta_air
    }

    /// Operative temperature (C.12)
    pub fn theta_op(&self) -> f64 {
        0.3 * self.theta_air + 0.7 * self.theta_s
    }

    /// Heating (positive) or cooling (negative) power delivered, in W
    pub fn phi_hc_nd(&self) -> f64 {
        self.phi_hc_nd
    }

    /// Power that would hold the setpoint with unlimited capacity, in W
    pub fn phi_hc_nd_unrestricted(&self) -> f64 {
        self.phi_hc_nd_unrestricted
    }

    pub fn phi_m_tot(&self) -> f64 {
        self.phi_m_tot
    }

    pub fn phi_ia(&self) -> f64 {
        self.gains.phi_ia
    }

    pub fn phi_st(&self) -> f64 {
        self.gains.phi_st
    }

    pub fn phi_m(&self) -> f64 {
        self.gains.phi_m
    }

    pub fn gains(&self) -> &GainSplit {
        &self.gains
    }

    pub fn demand(&self) -> DemandState {
        self.demand
    }

    pub fn has_heating_demand(&self) -> bool {
        self.phi_hc_nd > 0.
    }

    pub fn has_cooling_demand(&self) -> bool {
        self.phi_hc_nd < 0.
    }

    /// Heating (positive) or cooling (negative) energy over the timestep, in kWh
    pub fn energy_demand_kwh(&self) -> f64 {
        watts_over_timestep_to_kwh(self.phi_hc_nd, self.timestep_seconds)
    }
}

/// Evaluate one timestep of the zone.
///
/// 1. Solve with no heating or cooling. If the air temperature is inside the
///    setpoint band this is the result.
/// 2. Otherwise find the power that holds the violated setpoint.
/// 3. Clamp that power to the installed capacity and solve again with the adopted power.
pub fn evaluate_timestep(
    config: &BuildingConfig,
    inputs: &TimestepInputs,
) -> Result<ThermalState, ZoneError> {
    inputs.check_finite()?;

    let gains = split_gains(
        inputs.phi_int,
        inputs.phi_sol,
        config.effective_mass_area(),
        config.total_internal_area(),
        config.conductances().h_tr_w,
    );
    trace!(
        phi_ia = gains.phi_ia,
        phi_st = gains.phi_st,
        phi_m = gains.phi_m,
        injected = gains.total(),
        "split heat gains"
    );

    let free = solve_network(config, &gains, inputs.theta_e, inputs.theta_m_prev, 0.);
    free.check_finite()?;

    let Some(mode) = conditioning_mode_for(config, free.theta_air) else {
        debug!(theta_air = free.theta_air, "free-floating within setpoint band");
        return Ok(ThermalState::from_solution(
            &free,
            gains,
            0.,
            DemandState::Floating,
            config.timestep_seconds(),
        ));
    };

    let phi_hc_unrestricted = unrestricted_demand(config, &free, mode);
    let (phi_hc_nd, capacity_limited) = limit_to_capacity(config, phi_hc_unrestricted, mode);
    let demand = if capacity_limited {
        DemandState::CapacityLimited { mode }
    } else {
        DemandState::Conditioned { mode }
    };
    debug!(
        theta_air_free = free.theta_air,
        phi_hc_unrestricted,
        phi_hc_nd,
        demand = %demand.label(),
        "resolved heating/cooling demand"
    );

    let actual = solve_network(
        config,
        &gains,
        inputs.theta_e,
        inputs.theta_m_prev,
        phi_hc_nd,
    );
    actual.check_finite()?;

    Ok(ThermalState::from_solution(
        &actual,
        gains,
        phi_hc_unrestricted,
        demand,
        config.timestep_seconds(),
    ))
}

impl BuildingConfig {
    /// See [`evaluate_timestep`]
    pub fn evaluate_timestep(&self, inputs: &TimestepInputs) -> Result<ThermalState, ZoneError> {
        evaluate_timestep(self, inputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::space_heat_demand::building_config::tests::{
        reference_building, reference_parameters,
    };
    use crate::core::space_heat_demand::building_config::BuildingParameters;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn inputs(theta_e: f64, phi_int: f64, phi_sol: f64, theta_m_prev: f64) -> TimestepInputs {
        TimestepInputs {
            theta_e,
            phi_int,
            phi_sol,
            theta_m_prev,
        }
    }

    fn limited_building(max_heating_power: f64, max_cooling_power: f64) -> BuildingConfig {
        BuildingConfig::new(BuildingParameters {
            max_heating_power,
            max_cooling_power,
            ..reference_parameters()
        })
        .unwrap()
    }

    #[rstest]
    fn should_reproduce_reference_timestep(reference_building: BuildingConfig) {
        let state = evaluate_timestep(&reference_building, &inputs(286., 10., 1., 293.)).unwrap();

        assert_relative_eq!(state.phi_ia(), 5.0);
        assert_relative_eq!(state.phi_m(), 3.3333333333333335, max_relative = 1e-12);
        assert_relative_eq!(state.phi_st(), 2.648246991104134, max_relative = 1e-12);
        assert_relative_eq!(state.phi_hc_nd(), 328.43098100379973, max_relative = 1e-9);
        assert!(state.has_heating_demand());
        assert!(!state.has_cooling_demand());
        assert_relative_eq!(state.phi_m_tot(), 11915.596628713023, max_relative = 1e-9);
        assert_relative_eq!(state.theta_m(), 293.0110564070094, max_relative = 1e-12);
        assert_relative_eq!(state.theta_m_avg(), 293.0055282035047, max_relative = 1e-12);
        assert_relative_eq!(state.theta_s(), 293.04297265975833, max_relative = 1e-12);
        assert_relative_eq!(state.theta_air(), 293.15, max_relative = 1e-12);
        assert_eq!(
            state.demand(),
            DemandState::Conditioned {
                mode: ConditioningMode::Heating
            }
        );
    }

    #[rstest]
    fn should_be_bit_identical_on_repeated_evaluation(reference_building: BuildingConfig) {
        let timestep = inputs(286., 10., 1., 293.);
        let first = evaluate_timestep(&reference_building, &timestep).unwrap();
        let second = evaluate_timestep(&reference_building, &timestep).unwrap();

        assert_eq!(first.phi_hc_nd().to_bits(), second.phi_hc_nd().to_bits());
        assert_eq!(first.theta_m().to_bits(), second.theta_m().to_bits());
        assert_eq!(first, second);
    }

    #[rstest]
    #[case(296.)]
    #[case(300.)]
    #[case(305.)]
    fn should_float_within_setpoint_band(reference_building: BuildingConfig, #[case] theta_e: f64) {
        let state = evaluate_timestep(&reference_building, &inputs(theta_e, 10., 1., 293.)).unwrap();

        assert!(state.theta_air() > reference_building.heating_setpoint());
        assert!(state.theta_air() < reference_building.cooling_setpoint());
        assert_eq!(state.phi_hc_nd(), 0.);
        assert_eq!(state.phi_hc_nd_unrestricted(), 0.);
        assert!(!state.has_heating_demand());
        assert_eq!(state.demand(), DemandState::Floating);
        assert_eq!(state.energy_demand_kwh(), 0.);
    }

    #[rstest]
    fn should_match_free_floating_solve_when_floating(reference_building: BuildingConfig) {
        let timestep = inputs(300., 10., 1., 293.);
        let state = evaluate_timestep(&reference_building, &timestep).unwrap();
        let gains = state.gains();
        let free = solve_network(&reference_building, gains, 300., 293., 0.);

        assert_relative_eq!(state.theta_air(), free.theta_air);
        assert_relative_eq!(state.theta_air(), 293.87579216886473, max_relative = 1e-12);
        assert_relative_eq!(state.phi_m_tot(), free.phi_m_tot);
        assert_relative_eq!(state.theta_m(), free.theta_m_t);
    }

    #[rstest]
    fn should_hold_heating_setpoint_within_capacity(reference_building: BuildingConfig) {
        let state = evaluate_timestep(&reference_building, &inputs(290., 10., 1., 293.)).unwrap();

        assert_relative_eq!(state.theta_air(), 293.15, max_relative = 1e-12);
        assert_relative_eq!(state.phi_hc_nd(), 165.5646157529551, max_relative = 1e-9);
        assert_eq!(state.phi_hc_nd(), state.phi_hc_nd_unrestricted());
    }

    #[rstest]
    fn should_clamp_heating_demand_to_capacity() {
        let config = limited_building(250., 250.);
        let state = evaluate_timestep(&config, &inputs(284., 10., 1., 293.)).unwrap();

        assert_eq!(state.phi_hc_nd(), 250.);
        assert!(state.phi_hc_nd_unrestricted() > 250.);
        assert!(state.theta_air() < config.heating_setpoint());
        assert_relative_eq!(state.theta_air(), 292.66975358036035, max_relative = 1e-12);
        assert_eq!(
            state.demand(),
            DemandState::CapacityLimited {
                mode: ConditioningMode::Heating
            }
        );
        assert!(state.has_heating_demand());
    }

    #[rstest]
    fn should_propagate_clamped_power_into_mass_node() {
        let config = limited_building(250., 250.);
        let timestep = inputs(284., 10., 1., 293.);
        let state = evaluate_timestep(&config, &timestep).unwrap();
        let clamped = solve_network(&config, state.gains(), 284., 293., 250.);
        let unrestricted = solve_network(
            &config,
            state.gains(),
            284.,
            293.,
            state.phi_hc_nd_unrestricted(),
        );

        assert_relative_eq!(state.phi_m_tot(), clamped.phi_m_tot);
        assert!(state.phi_m_tot() < unrestricted.phi_m_tot);
        assert_relative_eq!(state.theta_m(), clamped.theta_m_t);
    }

    #[rstest]
    #[case(500., -72.47914590176295, false)]
    #[case(1000., -198.90210912565215, false)]
    #[case(2000., -250., true)]
    #[case(5000., -250., true)]
    fn should_resolve_cooling_demand(
        #[case] phi_sol: f64,
        #[case] expected_phi_hc_nd: f64,
        #[case] capacity_limited: bool,
    ) {
        let config = limited_building(250., 250.);
        let state = evaluate_timestep(&config, &inputs(303., 200., phi_sol, 298.)).unwrap();

        assert_relative_eq!(state.phi_hc_nd(), expected_phi_hc_nd, max_relative = 1e-9);
        assert!(state.has_cooling_demand());
        assert!(!state.has_heating_demand());
        assert!(state.energy_demand_kwh() < 0.);
        if capacity_limited {
            assert!(state.theta_air() > config.cooling_setpoint());
            assert_eq!(
                state.demand(),
                DemandState::CapacityLimited {
                    mode: ConditioningMode::Cooling
                }
            );
        } else {
            assert_relative_eq!(state.theta_air(), 299.15, max_relative = 1e-12);
            assert_eq!(state.demand().mode(), Some(ConditioningMode::Cooling));
        }
    }

    #[rstest]
    fn should_float_when_no_capacity_is_installed() {
        let config = limited_building(0., 0.);
        let state = evaluate_timestep(&config, &inputs(284., 10., 1., 293.)).unwrap();

        assert_eq!(state.phi_hc_nd(), 0.);
        assert!(!state.has_heating_demand());
        assert!(state.theta_air() < config.heating_setpoint());
    }

    #[rstest]
    fn should_have_air_temperature_affine_in_injected_power(reference_building: BuildingConfig) {
        let gains = split_gains(10., 1., 87.5, 157.5, 4.4);
        let temps = [0., 100., 200.]
            .map(|phi_hc| solve_network(&reference_building, &gains, 286., 293., phi_hc).theta_air);

        assert_relative_eq!(temps[2] - temps[1], temps[1] - temps[0], max_relative = 1e-9);
        assert!(temps[1] > temps[0]);
    }

    #[rstest]
    fn should_match_air_temperature_response_of_loaded_network(reference_building: BuildingConfig) {
        let gains = split_gains(10., 1., 87.5, 157.5, 4.4);
        let free = solve_network(&reference_building, &gains, 286., 293., 0.);
        let heated = solve_network(&reference_building, &gains, 286., 293., 350.);

        assert_relative_eq!(
            air_temperature_response(&reference_building),
            (heated.theta_air - free.theta_air) / 350.,
            max_relative = 1e-9
        );
    }

    #[rstest]
    #[case(-1e10, 1e-4)]
    #[case(-1e14, 1e-1)]
    fn should_hold_setpoint_for_extreme_external_temperatures(
        reference_building: BuildingConfig,
        #[case] theta_e: f64,
        #[case] tolerance: f64,
    ) {
        let state = evaluate_timestep(&reference_building, &inputs(theta_e, 10., 1., 293.)).unwrap();

        assert_eq!(
            state.demand(),
            DemandState::Conditioned {
                mode: ConditioningMode::Heating
            }
        );
        assert_relative_eq!(state.theta_air(), 293.15, epsilon = tolerance);
        assert!(state.phi_hc_nd().is_finite());
        assert!(state.theta_m().is_finite());
    }

    #[rstest]
    #[case(-1e307)]
    #[case(1e307)]
    fn should_reject_external_temperature_that_overflows_the_solve(
        reference_building: BuildingConfig,
        #[case] theta_e: f64,
    ) {
        match evaluate_timestep(&reference_building, &inputs(theta_e, 10., 1., 293.)) {
            Err(ZoneError::NonFiniteResult { value, .. }) => assert!(!value.is_finite()),
            other => panic!("expected non-finite result error, got {other:?}"),
        }
    }

    #[rstest]
    fn should_find_exact_unrestricted_demand(reference_building: BuildingConfig) {
        let gains = split_gains(10., 1., 87.5, 157.5, 4.4);
        let free = solve_network(&reference_building, &gains, 286., 293., 0.);
        let phi_hc = unrestricted_demand(&reference_building, &free, ConditioningMode::Heating);
        let at_setpoint = solve_network(&reference_building, &gains, 286., 293., phi_hc);

        assert_relative_eq!(at_setpoint.theta_air, 293.15, max_relative = 1e-12);
    }

    #[rstest]
    #[case(100., ConditioningMode::Heating, 100., false)]
    #[case(300., ConditioningMode::Heating, 250., true)]
    #[case(-100., ConditioningMode::Cooling, -100., false)]
    #[case(-300., ConditioningMode::Cooling, -250., true)]
    fn should_limit_demand_to_capacity(
        #[case] unrestricted: f64,
        #[case] mode: ConditioningMode,
        #[case] expected: f64,
        #[case] expected_limited: bool,
    ) {
        let config = limited_building(250., 250.);
        assert_eq!(
            limit_to_capacity(&config, unrestricted, mode),
            (expected, expected_limited)
        );
    }

    #[rstest]
    #[case(inputs(f64::NAN, 10., 1., 293.), "theta_e")]
    #[case(inputs(286., f64::INFINITY, 1., 293.), "phi_int")]
    #[case(inputs(286., 10., f64::NEG_INFINITY, 293.), "phi_sol")]
    #[case(inputs(286., 10., 1., f64::NAN), "theta_m_prev")]
    fn should_reject_non_finite_inputs(
        reference_building: BuildingConfig,
        #[case] timestep: TimestepInputs,
        #[case] expected_field: &str,
    ) {
        match evaluate_timestep(&reference_building, &timestep) {
            Err(ZoneError::NonFiniteInput { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("expected non-finite input error, got {other:?}"),
        }
    }

    #[rstest]
    fn should_label_demand_states() {
        assert_eq!(DemandState::Floating.label(), "floating");
        assert_eq!(
            DemandState::Conditioned {
                mode: ConditioningMode::Heating
            }
            .label(),
            "heating"
        );
        assert_eq!(
            DemandState::CapacityLimited {
                mode: ConditioningMode::Cooling
            }
            .label(),
            "cooling_capacity_limited"
        );
    }

    #[rstest]
    fn should_report_energy_over_a_half_hour_timestep() {
        let config = BuildingConfig::new(BuildingParameters {
            timestep_seconds: 1800.,
            ..reference_parameters()
        })
        .unwrap();
        let state = evaluate_timestep(&config, &inputs(284., 10., 1., 293.)).unwrap();

        assert_relative_eq!(
            state.energy_demand_kwh(),
            state.phi_hc_nd() * 0.5 / 1000.,
            max_relative = 1e-12
        );
    }

    #[rstest]
    fn should_give_operative_temperature_between_air_and_surface(reference_building: BuildingConfig) {
        let state = evaluate_timestep(&reference_building, &inputs(286., 10., 1., 293.)).unwrap();

        assert_relative_eq!(
            state.theta_op(),
            0.3 * state.theta_air() + 0.7 * state.theta_s()
        );
        assert!(state.theta_op() < state.theta_air());
        assert!(state.theta_op() > state.theta_s());
    }
}
