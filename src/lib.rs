pub mod core;
pub mod errors;
pub mod input;
pub mod output;
pub mod read_timestep_file;
pub mod simulation;
#[cfg(test)]
mod tests;

use crate::errors::{OutputError, RcSimError};
use crate::input::ingest_for_processing;
use crate::output::Output;
use crate::read_timestep_file::timestep_data_to_vec;
use crate::simulation::{run_zones, zone_models_from_input, ZoneResults};
use anyhow::Context;
use csv::WriterBuilder;
use indexmap::IndexMap;
use itertools::Itertools;
use std::io::Read;
use tracing::{debug, info};

pub type RunResults = IndexMap<String, ZoneResults>;

/// Run every zone of a project over the timesteps in `timesteps` and write one
/// results file per zone plus a summary to `output`.
pub fn run_project(
    input: impl Read,
    timesteps: impl Read,
    output: impl Output,
) -> Result<RunResults, RcSimError> {
    let input = ingest_for_processing(input)?;
    let conditions = timestep_data_to_vec(timesteps).context("could not read timestep file")?;
    let zones = zone_models_from_input(&input)?;

    info!(
        zones = zones.len(),
        timesteps = conditions.len(),
        timestep_seconds = input.timestep_seconds,
        "running project"
    );
    let results = run_zones(&zones, &conditions)?;

    if !output.is_noop() {
        write_outputs(&output, &results)
            .map_err(|err| RcSimError::FailureInOutput(OutputError::new(err)))?;
    }

    Ok(results)
}

const ZONE_RESULT_COLUMNS: [(&str, &str); 9] = [
    ("Timestep", "[count]"),
    ("Internal air temp", "[temperature]"),
    ("Surface temp", "[temperature]"),
    ("Thermal mass temp", "[temperature]"),
    ("Operative temp", "[temperature]"),
    ("Heating/cooling demand", "[W]"),
    ("Unrestricted heating/cooling demand", "[W]"),
    ("Mass node heat flow", "[W]"),
    ("Demand state", "[state]"),
];

const SUMMARY_COLUMNS: [(&str, &str); 8] = [
    ("Zone", "[name]"),
    ("Space heat demand", "[kWh]"),
    ("Space cool demand", "[kWh]"),
    ("Peak heating power", "[W]"),
    ("Peak cooling power", "[W]"),
    ("Unmet timesteps", "[count]"),
    ("Min internal air temp", "[temperature]"),
    ("Max internal air temp", "[temperature]"),
];

fn write_outputs(output: &impl Output, results: &RunResults) -> anyhow::Result<()> {
    for (zone_name, zone_results) in results {
        write_zone_results_file(output, zone_name, zone_results)?;
    }
    write_summary_file(output, results)
}

fn write_headings(
    writer: &mut csv::Writer<impl std::io::Write>,
    columns: &[(&str, &str)],
) -> anyhow::Result<()> {
    writer.write_record(columns.iter().map(|(heading, _)| heading))?;
    writer.write_record(columns.iter().map(|(_, unit)| unit))?;
    Ok(())
}

fn write_zone_results_file(
    output: &impl Output,
    zone_name: &str,
    zone_results: &ZoneResults,
) -> anyhow::Result<()> {
    let output_key = format!("results_{zone_name}");
    debug!("writing out to {output_key}");
    let writer = output.writer_for_location_key(&output_key)?;
    let mut writer = WriterBuilder::new().from_writer(writer);

    write_headings(&mut writer, &ZONE_RESULT_COLUMNS)?;

    for (t_idx, state) in zone_results.states.iter().enumerate() {
        let values = [
            state.theta_air(),
            state.theta_s(),
            state.theta_m(),
            state.theta_op(),
            state.phi_hc_nd(),
            state.phi_hc_nd_unrestricted(),
            state.phi_m_tot(),
        ];
        let row = std::iter::once(t_idx.to_string())
            .chain(values.iter().map(f64::to_string))
            .chain(std::iter::once(state.demand().label()))
            .collect_vec();
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

fn write_summary_file(output: &impl Output, results: &RunResults) -> anyhow::Result<()> {
    debug!("writing out to results_summary");
    let writer = output.writer_for_location_key("results_summary")?;
    let mut writer = WriterBuilder::new().from_writer(writer);

    write_headings(&mut writer, &SUMMARY_COLUMNS)?;

    for (zone_name, zone_results) in results {
        let summary = &zone_results.summary;
        writer.write_record([
            zone_name.clone(),
            summary.heating_energy_kwh.to_string(),
            summary.cooling_energy_kwh.to_string(),
            summary.peak_heating_power.to_string(),
            summary.peak_cooling_power.to_string(),
            summary.unmet_timesteps.to_string(),
            summary.min_air_temperature.to_string(),
            summary.max_air_temperature.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
