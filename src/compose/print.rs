//! Print-job composer: PrusaSlicer-style documents with a jittered circular
//! toolpath.

use std::f64::consts::TAU;
use std::io::{self, Write};

use crate::command;
use crate::emit::command::HOME_FIELD;
use crate::emit::{Flag, LineSink, Token, Value};

use super::ParamSource;

/// Height difference between consecutive layers.
const LAYER_STEP: f64 = 0.2;
/// Toolpath circle center.
const CENTER_X: f64 = 100.0;
const CENTER_Y: f64 = 100.0;
/// Toolpath radius at layer zero; grows by [RADIUS_PER_LAYER] each layer.
const BASE_RADIUS: f64 = 30.0;
const RADIUS_PER_LAYER: f64 = 0.1;
/// Coordinate jitter applied to every toolpath point, in each direction.
const JITTER: f64 = 2.0;
/// Hotend working temperature in degrees Celsius.
const HOTEND_TEMP: i64 = 215;
/// Bed temperature in degrees Celsius.
const BED_TEMP: usize = 60;
/// A temperature command is interleaved every this many moves.
const TEMP_EVERY: usize = 50;
/// A fan-speed command is interleaved every this many moves.
const FAN_EVERY: usize = 75;

/// Size parameters for one print-job document.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrintJobConfig {
    /// Layers in the body. Zero yields startup/shutdown boilerplate only.
    pub layers: usize,
    /// Toolpath points per layer.
    pub moves_per_layer: usize,
}

/// What [compose_print_job] produced.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrintJobSummary {
    /// Total lines written, including comments and blank separators.
    pub lines: usize,
    /// Filament extruded over all toolpath segments, in millimeters.
    pub filament_used: f64,
}

/// One layer of the print body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerDescriptor {
    pub index: usize,
    pub height: f64,
}

impl LayerDescriptor {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            height: index as f64 * LAYER_STEP,
        }
    }
}

/// Write a complete simulated 3D-print document.
///
/// Extrusion runs in relative mode: every toolpath segment carries its own
/// independently drawn extrusion distance, and the running total is
/// reported in the summary.
pub fn compose_print_job(
    config: &PrintJobConfig,
    params: &mut ParamSource,
    writer: impl Write,
) -> io::Result<PrintJobSummary> {
    let mut sink = LineSink::new(writer);

    sink.comment("Generated test file for benchmarking")?;
    sink.comment(&format!(
        "Simulates a typical 3D print with {} layers",
        config.layers
    ))?;
    sink.comment("PrusaSlicer compatible")?;
    sink.comment("")?;

    sink.commented(
        command!(firmware_info { U: Value::Literal("3.9.0".into()) }),
        "tell printer latest fw version",
    )?;
    sink.commented(command!(relative_extrusion {}), "extruder relative mode")?;
    sink.commented(
        command!(set_hotend_temp { S: Value::Integer(HOTEND_TEMP as usize) }),
        "set extruder temp",
    )?;
    sink.commented(
        command!(set_bed_temp { S: Value::Integer(BED_TEMP) }),
        "set bed temp",
    )?;
    sink.commented(
        command!(wait_bed_temp { S: Value::Integer(BED_TEMP) }),
        "wait for bed temp",
    )?;
    sink.commented(
        command!(wait_hotend_temp { S: Value::Integer(HOTEND_TEMP as usize) }),
        "wait for extruder temp",
    )?;
    sink.line(&[
        Token::Field(HOME_FIELD),
        Token::Flag(Flag::new("W")),
        Token::Comment("home all without mesh bed level".into()),
    ])?;
    sink.commented(command!(mesh_bed_level {}), "mesh bed leveling")?;
    sink.commented(
        command!(linear_move { Y: Value::axis(-3.0), F: Value::Integer(1000) }),
        "go outside print area",
    )?;
    sink.commented(
        command!(set_position { E: Value::extrusion(0.0) }),
        "reset extrusion distance",
    )?;
    sink.commented(
        command!(linear_move {
            X: Value::axis(60.0),
            E: Value::extrusion(9.0),
            F: Value::Integer(1000),
        }),
        "intro line",
    )?;
    sink.commented(
        command!(linear_move {
            X: Value::axis(100.0),
            E: Value::extrusion(12.5),
            F: Value::Integer(1000),
        }),
        "intro line",
    )?;
    sink.commented(
        command!(set_position { E: Value::extrusion(0.0) }),
        "reset extrusion distance",
    )?;
    sink.blank()?;

    let mut filament_used = 0.0;
    for layer in (0..config.layers).map(LayerDescriptor::new) {
        sink.comment(&format!("LAYER:{}", layer.index))?;
        sink.commented(
            command!(linear_move {
                Z: Value::axis(layer.height),
                F: Value::Integer(720),
            }),
            "move to layer height",
        )?;

        let radius = BASE_RADIUS + layer.index as f64 * RADIUS_PER_LAYER;
        for step in 0..config.moves_per_layer {
            let angle = step as f64 / config.moves_per_layer as f64 * TAU;
            let x = CENTER_X + radius * angle.cos() + params.uniform(-JITTER, JITTER);
            let y = CENTER_Y + radius * angle.sin() + params.uniform(-JITTER, JITTER);
            let feed = params.integer(1200, 2400) as usize;
            let segment = params.uniform(0.02, 0.08);
            filament_used += segment;

            sink.command(command!(linear_move {
                X: Value::axis(x),
                Y: Value::axis(y),
                E: Value::extrusion(segment),
                F: Value::Integer(feed),
            }))?;

            if step % TEMP_EVERY == 0 {
                let temp = (HOTEND_TEMP + params.integer(-5, 5)) as usize;
                sink.command(command!(set_hotend_temp { S: Value::Integer(temp) }))?;
            }
            if step % FAN_EVERY == 0 {
                let speed = params.integer(0, 255) as usize;
                sink.command(command!(set_fan_speed { S: Value::Integer(speed) }))?;
            }
        }
    }

    sink.blank()?;
    sink.comment("End sequence")?;
    sink.commented(command!(dwell {}), "wait")?;
    sink.commented(command!(set_flow_rate { S: Value::Integer(100) }), "reset flow")?;
    sink.commented(command!(linear_advance { K: Value::Integer(0) }), "reset LA")?;
    sink.commented(
        command!(set_hotend_temp { S: Value::Integer(0) }),
        "turn off temperature",
    )?;
    sink.commented(
        command!(set_bed_temp { S: Value::Integer(0) }),
        "turn off heatbed",
    )?;
    sink.commented(command!(fan_off {}), "turn off fan")?;
    sink.commented(
        command!(linear_move { X: Value::Integer(0), Y: Value::Integer(200) }),
        "home X axis and push Y forward",
    )?;
    sink.commented(command!(disable_motors {}), "disable motors")?;
    sink.flush()?;

    Ok(PrintJobSummary {
        lines: sink.lines_written(),
        filament_used,
    })
}
