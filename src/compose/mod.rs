//! Document composers: assemble complete fixture documents from emitted
//! command lines.
//!
//! Each composer writes one whole document (header boilerplate, body,
//! footer) to an [std::io::Write] and reports how many lines it wrote. The
//! print and CNC composers draw their numeric fields from a [ParamSource];
//! the error corpus is a pure function of its requested line count.

mod cnc;
mod error_corpus;
mod param;
mod print;

pub use cnc::{compose_cnc_job, CncJobConfig, OperationKind};
pub use error_corpus::{compose_error_corpus, ErrorClass, ErrorCorpusConfig};
pub use param::ParamSource;
pub use print::{compose_print_job, LayerDescriptor, PrintJobConfig, PrintJobSummary};
