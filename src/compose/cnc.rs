//! CNC-job composer: mixed drilling, interpolation, and tool-change
//! operation sequences.

use std::io::{self, Write};

use crate::command;
use crate::emit::command::RETURN_TO_INITIAL_Z_FIELD;
use crate::emit::{LineSink, Token, Value};

use super::ParamSource;

/// Size parameter for one CNC document.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CncJobConfig {
    /// Operations in the body. Zero yields setup/teardown boilerplate only.
    pub operations: usize,
}

/// The operation a body iteration emits.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OperationKind {
    Drill,
    CircularInterpolation,
    ToolChange,
    LinearMove,
}

impl OperationKind {
    /// Operation kind for body iteration `index`.
    ///
    /// The cadences overlap; drilling wins over circular interpolation,
    /// which wins over tool changes. Index 0 is always a drill cycle.
    pub fn for_index(index: usize) -> Self {
        if index % 10 == 0 {
            Self::Drill
        } else if index % 7 == 0 {
            Self::CircularInterpolation
        } else if index % 5 == 0 {
            Self::ToolChange
        } else {
            Self::LinearMove
        }
    }
}

/// Write a complete simulated CNC document, returning the number of lines
/// written.
pub fn compose_cnc_job(
    config: &CncJobConfig,
    params: &mut ParamSource,
    writer: impl Write,
) -> io::Result<usize> {
    let mut sink = LineSink::new(writer);

    sink.comment("Complex CNC operations test file")?;
    sink.comment("")?;

    sink.commented(command!(absolute_positioning {}), "Absolute positioning")?;
    sink.commented(command!(feed_per_minute {}), "Feed rate per minute")?;
    sink.commented(command!(xy_plane {}), "XY plane selection")?;
    sink.commented(command!(spindle_on { S: Value::Integer(1000) }), "Start spindle")?;
    sink.commented(command!(rapid_move { Z: Value::Integer(5) }), "Safe height")?;
    sink.blank()?;

    for op in 0..config.operations {
        let x = params.uniform(0.0, 100.0);
        let y = params.uniform(0.0, 100.0);
        let z = params.uniform(-5.0, 0.0);

        match OperationKind::for_index(op) {
            OperationKind::Drill => {
                let mut tokens = vec![Token::Field(RETURN_TO_INITIAL_Z_FIELD)];
                tokens.extend(
                    command!(drill_cycle {
                        X: Value::axis(x),
                        Y: Value::axis(y),
                        Z: Value::axis(z),
                        R: Value::Integer(2),
                        F: Value::Integer(300),
                    })
                    .into_token_vec(),
                );
                sink.line(&tokens)?;
                sink.commented(command!(cancel_canned_cycle {}), "Cancel drill cycle")?;
            }
            OperationKind::CircularInterpolation => {
                let i = params.uniform(-5.0, 5.0);
                let j = params.uniform(-5.0, 5.0);
                sink.command(command!(clockwise_arc {
                    X: Value::axis(x),
                    Y: Value::axis(y),
                    I: Value::axis(i),
                    J: Value::axis(j),
                    F: Value::Integer(1000),
                }))?;
            }
            OperationKind::ToolChange => {
                let tool = params.integer(1, 10) as usize;
                let speed = params.integer(800, 1200) as usize;
                sink.command(command!(tool_change { T: Value::Integer(tool) }))?;
                sink.command(command!(spindle_on { S: Value::Integer(speed) }))?;
            }
            OperationKind::LinearMove => {
                let feed = params.integer(200, 1500) as usize;
                sink.command(command!(linear_move {
                    X: Value::axis(x),
                    Y: Value::axis(y),
                    Z: Value::axis(z),
                    F: Value::Integer(feed),
                }))?;
            }
        }
    }

    sink.blank()?;
    sink.commented(command!(spindle_off {}), "Stop spindle")?;
    sink.commented(command!(rapid_move { Z: Value::Integer(25) }), "Safe height")?;
    sink.commented(command!(program_end {}), "Program end")?;
    sink.flush()?;

    Ok(sink.lines_written())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn compose_to_string(operations: usize, seed: u64) -> (String, usize) {
        let mut params = ParamSource::seeded(seed);
        let mut buf = Vec::new();
        let lines =
            compose_cnc_job(&CncJobConfig { operations }, &mut params, &mut buf).unwrap();
        (String::from_utf8(buf).unwrap(), lines)
    }

    #[test]
    fn drill_beats_circular_beats_tool_change() {
        use OperationKind::*;
        // 0 and 70 hit every cadence; 35 hits both 7 and 5
        assert_eq!(OperationKind::for_index(0), Drill);
        assert_eq!(OperationKind::for_index(70), Drill);
        assert_eq!(OperationKind::for_index(35), CircularInterpolation);
        assert_eq!(OperationKind::for_index(10), Drill);
        assert_eq!(OperationKind::for_index(14), CircularInterpolation);
        assert_eq!(OperationKind::for_index(5), ToolChange);
        assert_eq!(OperationKind::for_index(15), ToolChange);
        assert_eq!(OperationKind::for_index(1), LinearMove);
        assert_eq!(OperationKind::for_index(13), LinearMove);
    }

    #[test]
    fn kind_selection_is_deterministic_over_the_body() {
        for index in 0..200 {
            let expected = if index % 10 == 0 {
                OperationKind::Drill
            } else if index % 7 == 0 {
                OperationKind::CircularInterpolation
            } else if index % 5 == 0 {
                OperationKind::ToolChange
            } else {
                OperationKind::LinearMove
            };
            assert_eq!(OperationKind::for_index(index), expected);
        }
    }

    #[test]
    fn body_opcodes_follow_the_selected_kinds() {
        let (document, _) = compose_to_string(8, 1);
        let body: Vec<&str> = document
            .lines()
            .skip_while(|line| !line.is_empty())
            .skip(1)
            .take_while(|line| !line.is_empty())
            .collect();
        // op 0 drill (two lines), ops 1-4 linear, op 5 tool change (two
        // lines), op 6 linear, op 7 circular
        let expected_prefixes = [
            "G98 G81 ", "G80 ", "G1 ", "G1 ", "G1 ", "G1 ", "M6 T", "M3 S", "G1 ", "G2 ",
        ];
        assert_eq!(body.len(), expected_prefixes.len());
        for (line, prefix) in body.iter().zip(expected_prefixes) {
            assert!(line.starts_with(prefix), "{line} should start with {prefix}");
        }
    }

    #[test]
    fn drill_lines_carry_fixed_retract_and_feed() {
        let (document, _) = compose_to_string(1, 2);
        let drill = document
            .lines()
            .find(|line| line.starts_with("G98 G81"))
            .unwrap();
        assert!(drill.ends_with("R2 F300"), "{drill}");
        assert!(document.contains("G80 ; Cancel drill cycle"));
    }

    #[test]
    fn zero_operations_yields_boilerplate_only() {
        let (document, lines) = compose_to_string(0, 3);
        assert!(document.starts_with("; Complex CNC operations test file\n"));
        assert!(document.ends_with("M30 ; Program end\n"));
        assert!(!document.contains("G98"));
        assert_eq!(lines, document.lines().count());
    }

    #[test]
    fn reported_line_count_matches_the_document() {
        let (document, lines) = compose_to_string(50, 4);
        assert_eq!(lines, document.lines().count());
    }
}
