//! odm-fill — complete a sparse origin-destination travel-cost matrix.
//!
//! Loads one or more measured matrix documents, runs the fill engine, and
//! writes the completed matrix, the pairs that could not be filled, the
//! neighbor sets, and a summary CSV into the output directory.

mod cli;

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use odm_interp::{FillEngineBuilder, LogObserver, Strategy};
use odm_matrix::{load_documents, load_overrides};
use odm_output::OutputDir;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if cli.verbose { "debug" } else { "info" }),
    )
    .target(env_logger::Target::Stderr)
    .init();

    let config = cli.fill_config()?;

    // 1. Inputs.
    let (doc, merge) = load_documents(&cli.matrices).context("loading matrix documents")?;
    let mut builder = FillEngineBuilder::from_document(config, doc)
        .context("interning matrix cells")?
        .merge_stats(merge);
    if let Some(path) = &cli.overrides {
        let overrides = load_overrides(path).with_context(|| format!("loading {}", path.display()))?;
        builder = builder.overrides(overrides);
    }

    // 2. Build: resolve coordinates, neighbor graph.
    let t0 = Instant::now();
    let mut engine = builder.build().context("building fill engine")?;
    log::info!("neighbor graph built in {:.3} s", t0.elapsed().as_secs_f64());

    // 3. Run.
    let t1 = Instant::now();
    engine.run(&mut LogObserver);
    let elapsed = t1.elapsed();
    let outcome = engine.finalize();

    // 4. Outputs.
    let out = OutputDir::create(&cli.out).with_context(|| format!("creating {}", cli.out.display()))?;
    out.write_outcome(&outcome, !cli.no_neighbors).context("writing results")?;

    // 5. Summary.
    let d = &outcome.diagnostics;
    println!("Fill complete in {:.3} s", elapsed.as_secs_f64());
    println!("  cells            : {}", d.cells);
    println!("  measured entries : {}", d.measured_entries);
    println!("  missing pairs    : {}", d.missing_pairs);
    for strategy in Strategy::ALL {
        println!("  {:<16} : {}", strategy.name(), d.strategies[strategy]);
    }
    println!("  manual override  : {}", d.manual_override);
    println!("  reverse fallback : {}", d.reverse_fallback);
    println!("  unresolved       : {}", d.unresolved_final);
    println!("  results in       : {}", out.path().display());

    Ok(())
}
