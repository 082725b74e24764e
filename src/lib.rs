//! Synthetic g-code corpus generation.
//!
//! Produces benchmark fixture documents for exercising g-code parsers and
//! validators: realistic 3D-print jobs, CNC operation sequences, and an
//! error corpus cycling through a fixed taxonomy of malformed lines.
//!
//! [`emit`] renders individual command lines, [`compose`] assembles whole
//! documents, and [`fixture`] writes the default fixture set to disk.
//!
//! ```
//! use gcode_corpus::compose::{compose_error_corpus, ErrorCorpusConfig};
//!
//! let mut buf = Vec::new();
//! compose_error_corpus(&ErrorCorpusConfig { lines: 12 }, &mut buf).unwrap();
//! let text = String::from_utf8(buf).unwrap();
//! assert!(text.lines().any(|line| line == "G1 X1.100 Y1.100 F1500"));
//! ```

pub mod compose;
pub mod emit;
pub mod fixture;
