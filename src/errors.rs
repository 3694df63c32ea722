use thiserror::Error;

#[derive(Debug, Error)]
pub enum RcSimError {
    #[error("Request was considered invalid due to error: {0}")]
    InvalidRequest(#[from] anyhow::Error),
    #[error("Error identified during zone calculation: {0}")]
    FailureInCalculation(#[from] ZoneCalculationError),
    #[error("Error while writing results: {0}")]
    FailureInOutput(OutputError),
}

/// An error raised by the 5R1C network, either when a building configuration is
/// built or when a single timestep is evaluated.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ZoneError {
    #[error("Invalid zone configuration: {reason}")]
    InvalidConfiguration { reason: String },
    #[error("Timestep input {field} was not a finite number (got {value})")]
    NonFiniteInput { field: &'static str, value: f64 },
    #[error("Network solve gave a non-finite {quantity} (got {value})")]
    NonFiniteResult { quantity: &'static str, value: f64 },
}

impl ZoneError {
    pub(crate) fn invalid_configuration(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

/// A zone error together with the zone and timestep it happened in.
#[derive(Debug, Error)]
#[error("zone '{zone}', timestep {timestep}: {source}")]
pub struct ZoneCalculationError {
    zone: String,
    timestep: usize,
    #[source]
    source: ZoneError,
}

impl ZoneCalculationError {
    pub(crate) fn new(zone: &str, timestep: usize, source: ZoneError) -> Self {
        Self {
            zone: zone.to_string(),
            timestep,
            source,
        }
    }

    pub fn zone_error(&self) -> &ZoneError {
        &self.source
    }
}

#[derive(Debug, Error)]
#[error(transparent)]
pub struct OutputError {
    error: anyhow::Error,
}

impl OutputError {
    pub fn new(error: anyhow::Error) -> Self {
        Self { error }
    }
}
