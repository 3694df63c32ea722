pub const JOULES_PER_KILOWATT_HOUR: u32 = 3_600_000;
pub const SECONDS_PER_HOUR: u32 = 3_600;

/// Convert a constant power held over a timestep into energy, in kWh
///
/// ## Arguments
/// * `power` - power, in W
/// * `timestep_seconds` - length of the timestep, in seconds
pub(crate) fn watts_over_timestep_to_kwh(power: f64, timestep_seconds: f64) -> f64 {
    power * timestep_seconds / JOULES_PER_KILOWATT_HOUR as f64
}
