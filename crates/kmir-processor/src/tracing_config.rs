//! Tracing configuration for debugging decode and synthesis failures.
//!
//! Three output formats, selected by `KMIR_LOG_FORMAT`:
//!
//! - `text` (default): flat `tracing-subscriber` lines
//! - `tree`: indented span hierarchy via `tracing-tree`
//! - `json`: one JSON object per span or event
//!
//! ```bash
//! KMIR_LOG=debug KMIR_LOG_FORMAT=tree <host>
//! KMIR_LOG="kmir_decoder=trace,kmir_synth=debug" <host>
//! ```
//!
//! Nothing is installed unless `KMIR_LOG` or `RUST_LOG` is set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Unknown values fall back to `Text`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var("KMIR_LOG_FORMAT").unwrap_or_default())
    }
}

/// `KMIR_LOG` wins over `RUST_LOG`; both use the `RUST_LOG` syntax.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var("KMIR_LOG") {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Install the global subscriber. Output always goes to stderr.
///
/// A no-op when neither variable is set, or when the host already installed
/// a subscriber.
pub fn init_tracing() {
    let has_kmir_log = std::env::var("KMIR_LOG").is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_kmir_log && !has_rust_log {
        return;
    }

    let filter = build_filter();
    // Hosts may have installed their own subscriber; keep theirs.
    let _ = match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_span_retrace(true)
                .with_targets(true);
            Registry::default().with(filter).with(tree_layer).try_init()
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).try_init()
        }
        LogFormat::Text => {
            let text_layer = fmt::layer().with_writer(std::io::stderr);
            Registry::default().with(filter).with(text_layer).try_init()
        }
    };
}

#[cfg(test)]
#[path = "../tests/tracing_config_tests.rs"]
mod tests;
