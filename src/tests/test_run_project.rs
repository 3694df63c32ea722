use crate::errors::RcSimError;
use crate::output::{Output, SinkOutput};
use crate::run_project;
use approx::assert_relative_eq;
use indexmap::IndexMap;
use itertools::Itertools;
use pretty_assertions::assert_eq;
use rstest::*;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// Keeps everything written to it in memory, keyed by location
#[derive(Debug, Default)]
struct MemoryOutput {
    files: RefCell<IndexMap<String, Rc<RefCell<Vec<u8>>>>>,
}

impl MemoryOutput {
    fn contents(&self, location_key: &str) -> String {
        String::from_utf8(self.files.borrow()[location_key].borrow().clone()).unwrap()
    }

    fn location_keys(&self) -> Vec<String> {
        self.files.borrow().keys().cloned().collect()
    }
}

struct MemoryWriter(Rc<RefCell<Vec<u8>>>);

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Output for &MemoryOutput {
    fn writer_for_location_key(&self, location_key: &str) -> anyhow::Result<impl Write> {
        let buffer = Rc::new(RefCell::new(vec![]));
        self.files
            .borrow_mut()
            .insert(location_key.to_string(), buffer.clone());
        Ok(MemoryWriter(buffer))
    }
}

fn zone_json(max_heating_power_per_floor_area: f64) -> Value {
    json!({
        "geometry": {
            "room_depth": 7.0,
            "room_width": 5.0,
            "room_height": 3.0,
            "window_area": 4.0,
            "external_envelope_area": 15.0
        },
        "fabric": {"u_walls": 0.2, "u_windows": 1.1, "mass_class": "Medium"},
        "ventilation": {"ach_vent": 1.5, "ach_infl": 0.5, "ventilation_efficiency": 0.6},
        "setpoints": {"heating": 20.0, "cooling": 26.0},
        "max_heating_power_per_floor_area": max_heating_power_per_floor_area
    })
}

#[fixture]
fn project_json() -> String {
    json!({
        "Zones": {
            "office": zone_json(10.),
            "studio": zone_json(100.)
        },
        "TimestepSeconds": 3600
    })
    .to_string()
}

const TIMESTEPS: &str = "theta_e,phi_int,phi_sol
5.0,200,0
30.0,200,4000
-5.0,200,0
12.0,200,100
";

#[rstest]
fn should_run_project_and_summarise_each_zone(project_json: String) {
    let results = run_project(project_json.as_bytes(), TIMESTEPS.as_bytes(), SinkOutput).unwrap();

    assert_eq!(results.keys().collect_vec(), vec!["office", "studio"]);

    let office = &results["office"];
    assert_eq!(
        office
            .states
            .iter()
            .map(|state| state.demand().label())
            .collect_vec(),
        vec!["heating_capacity_limited", "floating", "heating", "floating"]
    );
    let summary = office.summary;
    assert_eq!(summary.unmet_timesteps, 1);
    assert_eq!(summary.peak_heating_power, 350.);
    assert_relative_eq!(summary.heating_energy_kwh, 0.453751573436067, max_relative = 1e-9);
    assert_eq!(summary.cooling_energy_kwh, 0.);
    assert_relative_eq!(summary.min_air_temperature, 19.59305304851678, max_relative = 1e-9);
    assert_relative_eq!(summary.max_air_temperature, 24.57753577867101, max_relative = 1e-9);

    let studio = &results["studio"];
    assert_eq!(studio.summary.unmet_timesteps, 0);
    assert_relative_eq!(studio.states[0].theta_air(), 20., max_relative = 1e-12);
}

#[rstest]
fn should_write_results_and_summary_files(project_json: String) {
    let output = MemoryOutput::default();

    run_project(project_json.as_bytes(), TIMESTEPS.as_bytes(), &output).unwrap();

    assert_eq!(
        output.location_keys(),
        vec!["results_office", "results_studio", "results_summary"]
    );

    let office = output.contents("results_office");
    let office_lines = office.lines().collect_vec();
    assert_eq!(office_lines.len(), 2 + 4);
    assert!(office_lines[0].starts_with("Timestep,Internal air temp,"));
    assert!(office_lines[1].starts_with("[count],[temperature],"));
    assert!(office_lines[2].starts_with("0,"));
    assert!(office_lines[2].ends_with(",heating_capacity_limited"));

    let summary = output.contents("results_summary");
    let summary_lines = summary.lines().collect_vec();
    assert_eq!(summary_lines.len(), 2 + 2);
    assert!(summary_lines[2].starts_with("office,"));
    assert!(summary_lines[3].starts_with("studio,"));
}

#[rstest]
fn should_reject_unparseable_input() {
    let result = run_project(
        "{\"Zones\": ".as_bytes(),
        TIMESTEPS.as_bytes(),
        SinkOutput,
    );

    assert!(matches!(result, Err(RcSimError::InvalidRequest(_))));
}

#[rstest]
fn should_reject_inconsistent_setpoints(project_json: String) {
    let mut project: Value = serde_json::from_str(&project_json).unwrap();
    project["Zones"]["studio"]["setpoints"]["heating"] = json!(27.0);

    let result = run_project(
        project.to_string().as_bytes(),
        TIMESTEPS.as_bytes(),
        SinkOutput,
    );

    assert!(matches!(result, Err(RcSimError::InvalidRequest(_))));
}

#[rstest]
fn should_fail_calculation_on_non_finite_timestep(project_json: String) {
    let timesteps = "theta_e,phi_int,phi_sol\n5.0,200,0\nNaN,200,0\n";

    let result = run_project(project_json.as_bytes(), timesteps.as_bytes(), SinkOutput);

    let Err(RcSimError::FailureInCalculation(error)) = result else {
        panic!("expected a calculation failure");
    };
    // both zones fail, either may be reported first
    assert!(error
        .to_string()
        .ends_with("timestep 1: Timestep input theta_e was not a finite number (got NaN)"));
}
