use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use kmir_decoder::DecodeOptions;
use kmir_synth::{GeneratedAnnotation, SynthOptions};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

pub const OPTION_PREFIX: &str = "kmir.";
/// Attach `@Generated`; one of the two `javax` annotation names.
pub const OPTION_GENERATED: &str = "kmir.generated";
pub const OPTION_PREFER_TYPE_ALIASES: &str = "kmir.preferTypeAliases";
pub const OPTION_PARALLEL: &str = "kmir.parallel";

/// Accept both `true` and `"true"`. Option maps only carry strings.
fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => Ok(b),
        BoolOrString::String(s) => parse_bool(&s).ok_or_else(|| {
            Error::custom(format!(
                "invalid boolean value: '{s}'. Expected true, false, 'true', or 'false'"
            ))
        }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessorConfig {
    pub generated: Option<GeneratedAnnotation>,
    #[serde(deserialize_with = "deserialize_bool_or_string")]
    pub prefer_type_aliases: bool,
    /// Decode and synthesize elements on the rayon pool.
    #[serde(deserialize_with = "deserialize_bool_or_string")]
    pub parallel: bool,
}

impl ProcessorConfig {
    pub fn parse(source: &str) -> Result<Self> {
        serde_json::from_str(source).context("failed to parse kmir config JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read kmir config: {}", path.display()))?;
        Self::parse(&source)
            .with_context(|| format!("failed to parse kmir config: {}", path.display()))
    }

    pub fn from_options(options: &IndexMap<String, String>) -> Result<Self> {
        let mut config = ProcessorConfig::default();
        config.apply_options(options)?;
        Ok(config)
    }

    /// Overlay `kmir.*` entries from a processor option map. Keys outside
    /// the `kmir.` namespace belong to other processors and are skipped.
    pub fn apply_options(&mut self, options: &IndexMap<String, String>) -> Result<()> {
        for (key, value) in options {
            match key.as_str() {
                OPTION_GENERATED => {
                    let generated = value
                        .parse::<GeneratedAnnotation>()
                        .with_context(|| format!("invalid value for {OPTION_GENERATED}"))?;
                    self.generated = Some(generated);
                }
                OPTION_PREFER_TYPE_ALIASES => {
                    self.prefer_type_aliases = option_bool(key, value)?;
                }
                OPTION_PARALLEL => {
                    self.parallel = option_bool(key, value)?;
                }
                other if other.starts_with(OPTION_PREFIX) => {
                    bail!("unknown kmir option `{other}`");
                }
                _ => {}
            }
        }
        Ok(())
    }

    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            prefer_type_aliases: self.prefer_type_aliases,
        }
    }

    pub fn synth_options(&self) -> SynthOptions {
        SynthOptions {
            generated: self.generated,
        }
    }
}

fn option_bool(key: &str, value: &str) -> Result<bool> {
    match parse_bool(value) {
        Some(b) => Ok(b),
        None => bail!("invalid boolean value for {key}: '{value}'"),
    }
}

#[cfg(test)]
#[path = "../tests/config_tests.rs"]
mod tests;
