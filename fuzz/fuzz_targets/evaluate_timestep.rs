#![no_main]

use libfuzzer_sys::fuzz_target;
use rc_zone::core::space_heat_demand::building_config::{
    BuildingConfig, BuildingParameters, MassClass,
};
use rc_zone::core::space_heat_demand::zone::TimestepInputs;

fuzz_target!(|inputs: TimestepInputs| {
    let Ok(config) = BuildingConfig::new(BuildingParameters::with_mass_class(
        35.,
        4.,
        1.1,
        11.,
        0.2,
        38.5,
        MassClass::Medium,
    )) else {
        return;
    };
    let _ = config.evaluate_timestep(&inputs);
});
