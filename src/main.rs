//! Driver binary: writes the default fixture set into `test_files/`.
//!
//! Takes no arguments; edit the constants in [gcode_corpus::fixture] to
//! resize the fixtures.

use env_logger::Env;
use log::info;

use gcode_corpus::compose::ParamSource;
use gcode_corpus::fixture::{self, FixtureError};

const OUTPUT_DIR: &str = "test_files";

fn main() -> Result<(), FixtureError> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut params = ParamSource::new();
    for report in fixture::write_default_fixtures(OUTPUT_DIR, &mut params)? {
        info!("generated {} ({} lines)", report.path.display(), report.lines);
    }
    Ok(())
}
