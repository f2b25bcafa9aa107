mod chart;
mod color;
mod config;
mod data;

use std::env;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use chart::{export, figure};
use config::{InputSpec, PlotConfig};
use data::model::{Column, HeaderMap, Technique};
use data::{extract, loader};

fn main() -> Result<()> {
    env_logger::init();

    let config = match env::args_os().nth(1) {
        Some(path) => PlotConfig::from_file(Path::new(&path))?,
        None => PlotConfig::builtin(),
    };
    run(&config)
}

/// Process every configured input file. A failing file aborts only its own
/// run; the remaining files are still processed.
fn run(config: &PlotConfig) -> Result<()> {
    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!("creating output directory {}", config.output_dir.display())
    })?;

    let techniques = config.resolved_techniques();

    let mut failures = 0usize;
    for input in &config.inputs {
        if let Err(e) = process_input(config, &techniques, input) {
            log::error!("{}: {e:#}", input.file.display());
            failures += 1;
        }
    }
    if failures > 0 {
        bail!("{failures} of {} input file(s) failed", config.inputs.len());
    }
    Ok(())
}

fn process_input(
    config: &PlotConfig,
    techniques: &[Technique],
    input: &InputSpec,
) -> Result<()> {
    let table = loader::read_table(&input.file)?;
    log::info!("CSV header: {:?}", table.header);

    let header = HeaderMap::resolve(&table.header, &config.columns);
    log::info!(
        "resolved column indices: name={:?} error={:?} ratio={:?}",
        header.get(Column::Name),
        header.get(Column::Error),
        header.get(Column::Ratio)
    );

    let extraction =
        extract::extract_series(&table, techniques, &header, &config.baseline_name)?;
    for series in &extraction.series {
        log::debug!("{}: {} points", series.technique.label, series.len());
    }

    let figures = [
        (figure::dot_error(&extraction), "_dot_error"),
        (
            figure::compression_ratio(&extraction),
            "_dot_compression_ratio",
        ),
    ];
    for (fig, suffix) in &figures {
        let stem = format!("{}{}", input.name, suffix);
        export::export_figure(fig, &config.output_dir, &stem)?;
    }
    Ok(())
}
