//! Error-corpus composer: documents cycling through a fixed taxonomy of
//! malformed command lines.
//!
//! Every body line instantiates one [ErrorClass], chosen round-robin by the
//! line index. The document is a pure function of the requested line count,
//! so a given count always reproduces the identical corpus.

use std::io::{self, Write};

use crate::command;
use crate::emit::command::{LINEAR_MOVE_FIELD, RAPID_MOVE_FIELD, SET_HOTEND_TEMP_FIELD};
use crate::emit::{Field, Flag, LineSink, Token, Value};

/// Why a generated line is invalid.
///
/// Each class is a distinct failure mode a downstream parser must be able
/// to tell apart; [ErrorClass::WellFormedFiller] is the valid pseudo-class
/// keeping the corpus from being 100% errors.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorClass {
    /// `G1` — a move with every positional parameter omitted.
    MissingMoveParams,
    /// `G0` — the same defect on a rapid move.
    MissingRapidParams,
    /// `G999 X10` — numeric opcode outside any recognized G-command set.
    UnknownGCommand,
    /// `M999 S100` — the same defect in the administrative command space.
    UnknownMCommand,
    /// `G1 X Y10` — a coordinate letter with no following number.
    BareCoordinateLetter,
    /// `M104 S` — the same defect on an administrative parameter.
    BareSettingLetter,
    /// `G1 Xinvalid Y10` — a coordinate letter followed by a non-numeric token.
    NonNumericCoordinate,
    /// `M104 Sinvalid` — the same defect on an administrative value.
    NonNumericSetting,
    /// `INVALID_COMMAND` — no recognizable command word at all.
    UnrecognizedWord,
    /// `G1 X10 Q15` — a valid parameter letter that is not legal for the opcode.
    InapplicableParameter,
    /// `123INVALID` — digits before the opcode letter.
    MalformedOpcode,
    /// A syntactically and semantically valid command.
    WellFormedFiller,
}

impl ErrorClass {
    /// The round-robin order: line `i` gets `ALL[i % ALL.len()]`.
    pub const ALL: [Self; 12] = [
        Self::MissingMoveParams,
        Self::MissingRapidParams,
        Self::UnknownGCommand,
        Self::UnknownMCommand,
        Self::BareCoordinateLetter,
        Self::BareSettingLetter,
        Self::NonNumericCoordinate,
        Self::NonNumericSetting,
        Self::UnrecognizedWord,
        Self::InapplicableParameter,
        Self::MalformedOpcode,
        Self::WellFormedFiller,
    ];

    /// Class of body line `index`.
    pub fn for_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }
}

/// Size parameter for one error-corpus document.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorCorpusConfig {
    /// Classed body lines to emit, not counting the two header comments.
    pub lines: usize,
}

/// Write an error-corpus document, returning the number of lines written
/// (body plus header comments).
pub fn compose_error_corpus(config: &ErrorCorpusConfig, writer: impl Write) -> io::Result<usize> {
    let mut sink = LineSink::new(writer);

    sink.comment("Error-heavy test file for validation benchmarking")?;
    sink.comment("")?;

    for index in 0..config.lines {
        sink.line(&class_line(index))?;
    }
    sink.flush()?;

    Ok(sink.lines_written())
}

/// Tokens for body line `index`.
///
/// The malformed shapes are assembled from raw tokens: the command
/// constructors filter out illegal parameter letters and cannot produce
/// them.
fn class_line(index: usize) -> Vec<Token<'static>> {
    match ErrorClass::for_index(index) {
        ErrorClass::MissingMoveParams => vec![Token::Field(LINEAR_MOVE_FIELD)],
        ErrorClass::MissingRapidParams => vec![Token::Field(RAPID_MOVE_FIELD)],
        ErrorClass::UnknownGCommand => vec![
            Token::Field(Field::new("G", Value::Integer(999))),
            Token::Field(Field::new("X", Value::Integer(10))),
        ],
        ErrorClass::UnknownMCommand => vec![
            Token::Field(Field::new("M", Value::Integer(999))),
            Token::Field(Field::new("S", Value::Integer(100))),
        ],
        ErrorClass::BareCoordinateLetter => vec![
            Token::Field(LINEAR_MOVE_FIELD),
            Token::Flag(Flag::new("X")),
            Token::Field(Field::new("Y", Value::Integer(10))),
        ],
        ErrorClass::BareSettingLetter => vec![
            Token::Field(SET_HOTEND_TEMP_FIELD),
            Token::Flag(Flag::new("S")),
        ],
        ErrorClass::NonNumericCoordinate => vec![
            Token::Field(LINEAR_MOVE_FIELD),
            Token::Field(Field::new("X", Value::Literal("invalid".into()))),
            Token::Field(Field::new("Y", Value::Integer(10))),
        ],
        ErrorClass::NonNumericSetting => vec![
            Token::Field(SET_HOTEND_TEMP_FIELD),
            Token::Field(Field::new("S", Value::Literal("invalid".into()))),
        ],
        ErrorClass::UnrecognizedWord => vec![Token::Flag(Flag::new("INVALID_COMMAND"))],
        ErrorClass::InapplicableParameter => vec![
            Token::Field(LINEAR_MOVE_FIELD),
            Token::Field(Field::new("X", Value::Integer(10))),
            Token::Field(Field::new("Q", Value::Integer(15))),
        ],
        ErrorClass::MalformedOpcode => vec![Token::Flag(Flag::new("123INVALID"))],
        ErrorClass::WellFormedFiller => {
            // filler coordinates derive from the index, keeping the whole
            // document reproducible for a given line count
            let coordinate = index as f64 * 0.1;
            command!(linear_move {
                X: Value::axis(coordinate),
                Y: Value::axis(coordinate),
                F: Value::Integer(1500),
            })
            .into_token_vec()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    // Strict single-line grammar: one opcode word, then parameter words,
    // consuming the whole line.
    peg::parser! {
        grammar strict_gcode() for str {
            pub rule command() = opcode() (" " word())* ![_]
            rule opcode() = ['G' | 'M'] integer()
            rule word() = ['A'..='Z'] number()
            rule number() = "-"? integer() ("." integer())?
            rule integer() = ['0'..='9']+
        }
    }

    fn body_lines(count: usize) -> Vec<String> {
        let mut buf = Vec::new();
        compose_error_corpus(&ErrorCorpusConfig { lines: count }, &mut buf).unwrap();
        String::from_utf8(buf)
            .unwrap()
            .lines()
            .skip(2)
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn emits_exactly_the_requested_number_of_body_lines() {
        for count in [0, 1, 11, 12, 13, 100] {
            assert_eq!(body_lines(count).len(), count);
        }
    }

    #[test]
    fn class_assignment_cycles_by_index() {
        for index in 0..100 {
            assert_eq!(
                ErrorClass::for_index(index),
                ErrorClass::ALL[index % ErrorClass::ALL.len()]
            );
        }
    }

    #[test]
    fn classes_distribute_evenly_for_any_count() {
        for count in [5, 12, 24, 100, 5000] {
            let mut tally: HashMap<ErrorClass, usize> = HashMap::new();
            for index in 0..count {
                *tally.entry(ErrorClass::for_index(index)).or_default() += 1;
            }
            let floor = count / ErrorClass::ALL.len();
            let ceil = count.div_ceil(ErrorClass::ALL.len());
            for class in ErrorClass::ALL {
                let seen = tally.get(&class).copied().unwrap_or(0);
                assert!(
                    seen == floor || seen == ceil,
                    "{class:?} appeared {seen} times for count {count}"
                );
            }
            assert_eq!(tally.values().sum::<usize>(), count);
        }
    }

    #[test]
    fn twelve_lines_cover_every_class_once_in_order() {
        let expected = [
            "G1",
            "G0",
            "G999 X10",
            "M999 S100",
            "G1 X Y10",
            "M104 S",
            "G1 Xinvalid Y10",
            "M104 Sinvalid",
            "INVALID_COMMAND",
            "G1 X10 Q15",
            "123INVALID",
            "G1 X1.100 Y1.100 F1500",
        ];
        assert_eq!(body_lines(12), expected);
    }

    #[test]
    fn equal_counts_reproduce_identical_documents() {
        let mut first = Vec::new();
        let mut second = Vec::new();
        compose_error_corpus(&ErrorCorpusConfig { lines: 100 }, &mut first).unwrap();
        compose_error_corpus(&ErrorCorpusConfig { lines: 100 }, &mut second).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn filler_parses_and_lexically_broken_classes_do_not() {
        use ErrorClass::*;
        for (index, line) in body_lines(24).into_iter().enumerate() {
            let parses = strict_gcode::command(&line).is_ok();
            match ErrorClass::for_index(index) {
                // semantically wrong but lexically fine
                MissingMoveParams | MissingRapidParams | UnknownGCommand | UnknownMCommand
                | InapplicableParameter | WellFormedFiller => {
                    assert!(parses, "{line} should lex as a command")
                }
                BareCoordinateLetter | BareSettingLetter | NonNumericCoordinate
                | NonNumericSetting | UnrecognizedWord | MalformedOpcode => {
                    assert!(!parses, "{line} should not lex as a command")
                }
            }
        }
    }

    #[test]
    fn filler_coordinates_step_with_the_line_index() {
        let lines = body_lines(36);
        assert_eq!(lines[11], "G1 X1.100 Y1.100 F1500");
        assert_eq!(lines[23], "G1 X2.300 Y2.300 F1500");
        assert_eq!(lines[35], "G1 X3.500 Y3.500 F1500");
    }
}
