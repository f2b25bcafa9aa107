use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::color::{self, Rgb};
use crate::data::model::{ColumnLabels, Marker, Technique};

// ---------------------------------------------------------------------------
// Plot configuration
// ---------------------------------------------------------------------------

/// Immutable description of a full plotting run: which CSV files to read,
/// which techniques to extract, how to resolve columns, and where the
/// charts go. The built-in configuration mirrors the benchmark scripts; a
/// JSON file with the same shape can be passed as the first command-line
/// argument instead.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlotConfig {
    /// Input CSV files with the prefix used for their chart file names.
    pub inputs: Vec<InputSpec>,
    #[serde(default = "default_techniques")]
    pub techniques: Vec<TechniqueSpec>,
    /// Header labels used to resolve the logical columns.
    #[serde(default)]
    pub columns: ColumnLabels,
    /// Name of the row holding the uncompressed reference measurement.
    #[serde(default = "default_baseline_name")]
    pub baseline_name: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputSpec {
    /// Prefix of the generated chart file names, e.g. `sin_vectors`.
    pub name: String,
    pub file: PathBuf,
}

/// A technique as configured. `color` may be omitted and is then assigned
/// from a generated fallback palette.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TechniqueSpec {
    pub prefix: String,
    pub label: String,
    #[serde(default)]
    pub marker: Marker,
    #[serde(default)]
    pub color: Option<Rgb>,
}

impl PlotConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    /// The configuration of the original benchmark runs: SZ3 and ZFP series
    /// from the sin-based and random dot-product experiments.
    pub fn builtin() -> Self {
        PlotConfig {
            inputs: vec![
                InputSpec {
                    name: "sin_vectors".into(),
                    file: "data/sin_results.csv".into(),
                },
                InputSpec {
                    name: "rand_vectors".into(),
                    file: "data/rand_results.csv".into(),
                },
            ],
            techniques: default_techniques(),
            columns: ColumnLabels::default(),
            baseline_name: default_baseline_name(),
            output_dir: default_output_dir(),
        }
    }

    /// Turn the technique specs into extractor descriptors, assigning
    /// fallback colors to techniques that do not name one.
    pub fn resolved_techniques(&self) -> Vec<Technique> {
        let fallback = color::distinct_palette(self.techniques.len());
        self.techniques
            .iter()
            .zip(fallback)
            .map(|(spec, fb)| Technique {
                prefix: spec.prefix.clone(),
                label: spec.label.clone(),
                marker: spec.marker,
                color: spec.color.unwrap_or(fb),
            })
            .collect()
    }
}

fn default_baseline_name() -> String {
    "double".into()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("plots")
}

fn default_techniques() -> Vec<TechniqueSpec> {
    vec![
        TechniqueSpec {
            prefix: "sz3_1".into(),
            label: "SZ3".into(),
            marker: Marker::Cross,
            color: Some(color::GREEN),
        },
        TechniqueSpec {
            prefix: "zfp_1".into(),
            label: "ZFP".into(),
            marker: Marker::Plus,
            color: Some(color::BLUE),
        },
    ]
}
