use std::path::Path;

use clap::ValueEnum;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_path_to_error as spte;

use crate::error::{ConvertError, Result};

/// Utdataformat for serialiseringen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    #[value(alias = "ttl")]
    Turtle,
    #[serde(alias = "nt")]
    #[value(name = "ntriples", alias = "nt")]
    NTriples,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Turtle => "ttl",
            OutputFormat::NTriples => "nt",
        }
    }

    pub fn media_type(self) -> &'static str {
        match self {
            OutputFormat::Turtle => "text/turtle; charset=utf-8",
            OutputFormat::NTriples => "application/n-triples",
        }
    }
}

/// Hva som skjer med tall som ikke er endelige (manglende puls/watt, 0/0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NumericPolicy {
    /// Skriv "NaN"^^datatype (kompatibelt med eksisterende data).
    #[default]
    Emit,
    /// Dropp triplen.
    Omit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertConfig {
    pub format: OutputFormat,
    /// Lokalnavn i fit:-navnerommet for utøveren.
    pub athlete: String,
    /// Lokalnavn for den ene registreringsenheten.
    pub device: String,
    /// Brukes når Activity mangler Sport-attributt.
    pub default_sport: String,
    pub degenerate_numbers: NumericPolicy,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Turtle,
            athlete: "athlete1".to_string(),
            device: "device1".to_string(),
            default_sport: "Activity".to_string(),
            degenerate_numbers: NumericPolicy::Emit,
        }
    }
}

impl ConvertConfig {
    /// Parser JSON; feil oppgir stien til feltet (f.eks. `degenerate_numbers`).
    pub fn from_json(text: &str) -> Result<Self> {
        let mut de = serde_json::Deserializer::from_str(text);
        spte::deserialize(&mut de).map_err(|e| ConvertError::Config {
            path: e.path().to_string(),
            message: e.inner().to_string(),
        })
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConvertError::Config {
            path: ".".into(),
            message: e.to_string(),
        })
    }
}

/// Leser konfig fra disk (JSON).
/// Hvis filen ikke finnes, returneres default-konfig.
pub fn load_config(path: impl AsRef<Path>) -> Result<ConvertConfig> {
    let path = path.as_ref();
    if path.exists() {
        let contents = std::fs::read_to_string(path)?;
        let config = ConvertConfig::from_json(&contents)?;
        info!("config loaded from {} (format={:?})", path.display(), config.format);
        Ok(config)
    } else {
        warn!("no config at {}, using defaults", path.display());
        Ok(ConvertConfig::default())
    }
}

/// Lagrer konfig til disk som JSON (pretty-print).
pub fn save_config(config: &ConvertConfig, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, config.to_json()?)?;
    info!("config saved to {}", path.display());
    Ok(())
}
