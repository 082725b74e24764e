//! The default fixture set and the driver-facing error type.

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::compose::{
    compose_cnc_job, compose_error_corpus, compose_print_job, CncJobConfig, ErrorCorpusConfig,
    ParamSource, PrintJobConfig,
};

/// Large print job, 20,000+ lines.
pub const LARGE_PRINT: PrintJobConfig = PrintJobConfig {
    layers: 100,
    moves_per_layer: 200,
};

/// Very large print job, 50,000+ lines.
pub const VERY_LARGE_PRINT: PrintJobConfig = PrintJobConfig {
    layers: 200,
    moves_per_layer: 250,
};

/// Mixed-operation CNC job.
pub const COMPLEX_CNC: CncJobConfig = CncJobConfig { operations: 500 };

/// Error corpus cycling the full malformed-line taxonomy.
pub const ERROR_HEAVY: ErrorCorpusConfig = ErrorCorpusConfig { lines: 5000 };

/// A fixture-generation failure, carrying the path it happened on.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to create fixture directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write fixture {path}")]
    WriteFixture {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One generated fixture file.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixtureReport {
    pub path: PathBuf,
    pub lines: usize,
}

/// Write the default four-file fixture set into `dir`, creating the
/// directory if absent.
///
/// Files are written strictly in sequence; an I/O failure aborts the run
/// and may leave the failing file partially written.
pub fn write_default_fixtures(
    dir: impl AsRef<Path>,
    params: &mut ParamSource,
) -> Result<Vec<FixtureReport>, FixtureError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|source| FixtureError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut reports = Vec::with_capacity(4);
    reports.push(write_fixture(dir.join("large_print.gcode"), |writer| {
        compose_print_job(&LARGE_PRINT, params, writer).map(|summary| summary.lines)
    })?);
    reports.push(write_fixture(dir.join("very_large_print.gcode"), |writer| {
        compose_print_job(&VERY_LARGE_PRINT, params, writer).map(|summary| summary.lines)
    })?);
    reports.push(write_fixture(dir.join("complex_cnc.gcode"), |writer| {
        compose_cnc_job(&COMPLEX_CNC, params, writer)
    })?);
    reports.push(write_fixture(dir.join("error_heavy.gcode"), |writer| {
        compose_error_corpus(&ERROR_HEAVY, writer)
    })?);
    Ok(reports)
}

fn write_fixture(
    path: PathBuf,
    compose: impl FnOnce(&mut BufWriter<File>) -> io::Result<usize>,
) -> Result<FixtureReport, FixtureError> {
    File::create(&path)
        .and_then(|file| compose(&mut BufWriter::new(file)))
        .map(|lines| FixtureReport {
            path: path.clone(),
            lines,
        })
        .map_err(|source| FixtureError::WriteFixture { path, source })
}
