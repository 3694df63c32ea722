use crate::core::space_heat_demand::zone::TimestepInputs;
use anyhow::Context;
use csv::ReaderBuilder as CsvReaderBuilder;
use serde::Deserialize;
use std::io::Read;

/// One row of the boundary condition table
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TimestepConditions {
    /// external air temperature
    pub theta_e: f64,
    /// internal heat gains, in W
    pub phi_int: f64,
    /// solar heat gains, in W
    pub phi_sol: f64,
}

impl TimestepConditions {
    pub(crate) fn with_mass_temperature(&self, theta_m_prev: f64) -> TimestepInputs {
        TimestepInputs {
            theta_e: self.theta_e,
            phi_int: self.phi_int,
            phi_sol: self.phi_sol,
            theta_m_prev,
        }
    }
}

pub fn timestep_data_to_vec(file: impl Read) -> anyhow::Result<Vec<TimestepConditions>> {
    let mut reader = CsvReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let conditions = reader
        .deserialize()
        .enumerate()
        .map(|(i, row)| row.with_context(|| format!("could not read timestep row {i}")))
        .collect::<anyhow::Result<Vec<TimestepConditions>>>()?;

    if conditions.is_empty() {
        anyhow::bail!("timestep file contained no rows");
    }

    Ok(conditions)
}
