//! Calling layer for kmir.
//!
//! Reads `kmir.*` options, decodes every annotated element, synthesizes its
//! copy builder and hands the result to an [`OutputSink`]. Failures are
//! isolated per element and reported as [`Diagnostic`]s.

pub mod config;
pub use config::ProcessorConfig;

pub mod diagnostics;
pub use diagnostics::{Diagnostic, Severity};

pub mod sink;
pub use sink::{CollectingSink, JsonDirectorySink, OutputSink};

pub mod processor;
pub use processor::{ProcessReport, Processor};

pub mod tracing_config;
pub use tracing_config::init_tracing;
