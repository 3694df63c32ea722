#![no_main]

use libfuzzer_sys::fuzz_target;
use rc_zone::output::Output;
use rc_zone::run_project;
use std::io;
use std::io::{BufReader, Cursor, Write};

const TIMESTEPS: &str = "theta_e,phi_int,phi_sol\n5.0,200,0\n30.0,200,4000\n-5.0,200,0\n";

fuzz_target!(|data: &[u8]| {
    let _run = run_project(
        BufReader::new(Cursor::new(data)),
        TIMESTEPS.as_bytes(),
        SinkOutput::default(),
    );
});

/// An output that goes to nowhere/ a "sink"/ /dev/null.
#[derive(Debug, Default)]
pub struct SinkOutput;

impl Output for SinkOutput {
    fn writer_for_location_key(&self, _location_key: &str) -> anyhow::Result<impl Write> {
        Ok(io::sink())
    }

    fn is_noop(&self) -> bool {
        // make the output pretend it's not a no-op so fuzzing exercises the result writers
        false
    }
}
