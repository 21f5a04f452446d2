use crate::config::ProcessorConfig;
use crate::diagnostics::Diagnostic;
use crate::sink::OutputSink;
use anyhow::{Context, Result};
use kmir_decoder::decode_element;
use kmir_metadata::{AnnotatedElement, MetadataReader};
use kmir_synth::{SynthesizedFile, synthesize};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessReport {
    /// Qualified names of the generated builders, in input order.
    pub generated: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ProcessReport {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Processor {
    config: ProcessorConfig,
}

impl Processor {
    pub fn new(config: ProcessorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Decode and synthesize every element, then write the results to
    /// `sink` in input order.
    ///
    /// A failing element becomes a diagnostic and the rest carry on. Only a
    /// sink failure aborts the run.
    #[tracing::instrument(level = "info", skip_all, fields(elements = elements.len()))]
    pub fn process<E, R, S>(&self, elements: &[E], reader: &R, sink: &S) -> Result<ProcessReport>
    where
        E: AnnotatedElement + Sync,
        R: MetadataReader + Sync + ?Sized,
        S: OutputSink + ?Sized,
    {
        let outcomes: Vec<Result<SynthesizedFile, Diagnostic>> = if self.config.parallel {
            elements
                .par_iter()
                .map(|element| self.process_element(element, reader))
                .collect()
        } else {
            elements
                .iter()
                .map(|element| self.process_element(element, reader))
                .collect()
        };

        let mut report = ProcessReport::default();
        for (element, outcome) in elements.iter().zip(outcomes) {
            match outcome {
                Ok(file) => {
                    sink.write(&file).with_context(|| {
                        format!(
                            "failed to write {} for {}",
                            file.file_name,
                            element.qualified_name()
                        )
                    })?;
                    report.generated.push(file.builder.name.qualified_name());
                }
                Err(diagnostic) => {
                    warn!(%diagnostic, "skipping element");
                    report.diagnostics.push(diagnostic);
                }
            }
        }

        info!(
            generated = report.generated.len(),
            skipped = report.diagnostics.len(),
            "processing finished"
        );
        Ok(report)
    }

    fn process_element<E, R>(&self, element: &E, reader: &R) -> Result<SynthesizedFile, Diagnostic>
    where
        E: AnnotatedElement + ?Sized,
        R: MetadataReader + ?Sized,
    {
        let name = element.qualified_name();
        debug!(element = name, "processing element");
        let class = decode_element(element, reader, self.config.decode_options())
            .map_err(|err| Diagnostic::from_decode(name, &err))?;
        synthesize(&class, &self.config.synth_options())
            .map_err(|err| Diagnostic::from_synthesis(name, &err))
    }
}

#[cfg(test)]
#[path = "../tests/processor_tests.rs"]
mod tests;
