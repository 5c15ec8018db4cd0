//! Command-line arguments and run configuration.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use odm_core::FillConfig;

/// Complete a sparse travel-cost matrix.
#[derive(Parser, Debug)]
#[command(name = "odm-fill", version)]
#[command(long_about = "Fills every missing pair of a sparse origin-destination cost matrix:
  odm-fill -m od_matrix.json                       # fill with default thresholds
  odm-fill -m grid.json -m stations.json -o out    # merge two documents first
  odm-fill -m od.json --overrides manual.json      # hand-curated substitute cells

Earlier --matrix documents win when two define the same pair.")]
pub struct Cli {
    /// Measured matrix document; repeat to merge several
    #[arg(short, long = "matrix", required = true)]
    pub matrices: Vec<PathBuf>,

    /// Manual override document: {cell: [substitute, offset]}
    #[arg(long)]
    pub overrides: Option<PathBuf>,

    /// JSON file with fill thresholds; missing fields keep their defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = "output")]
    pub out: PathBuf,

    /// Close-neighbor radius (m), overrides the config file
    #[arg(long)]
    pub close_radius: Option<f64>,

    /// Extended-neighbor radius (m), overrides the config file
    #[arg(long)]
    pub extended_radius: Option<f64>,

    /// Lattice-neighbor radius (m), overrides the config file
    #[arg(long)]
    pub lattice_radius: Option<f64>,

    /// Report cascade progress every N pairs
    #[arg(long)]
    pub progress_interval: Option<usize>,

    /// Do not write neighbors.json
    #[arg(long)]
    pub no_neighbors: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The config file (or defaults) with command-line overrides applied.
    pub fn fill_config(&self) -> Result<FillConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
                serde_json::from_reader(BufReader::new(file))
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => FillConfig::default(),
        };
        if let Some(r) = self.close_radius {
            config.close_radius = r;
        }
        if let Some(r) = self.extended_radius {
            config.extended_radius = r;
        }
        if let Some(r) = self.lattice_radius {
            config.lattice_radius = r;
        }
        if let Some(n) = self.progress_interval {
            config.progress_interval = n;
        }
        config.validate().context("invalid fill configuration")?;
        Ok(config)
    }
}
