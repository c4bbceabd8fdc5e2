//! Command-line front end: solve, report and export drawings or open the slider.

mod cli;
mod export;
mod interactive;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Args;
use domeshed::solve;
use export::{default_png_path, export, ExportTargets};
use interactive::Session;
use report::render_report;
use tracing::info;

/// Route diagnostics to standard error so the report and the terminal view stay clean.
fn init_logging(verbose: bool) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let parameters = args.to_parameters();
    parameters
        .validate()
        .context("invalid structure dimensions")?;

    let Some(pitch) = args.angle else {
        info!("no --angle given, starting interactive mode");
        return interactive::run(&Session {
            parameters,
            output: args.output.clone(),
            svg: args.svg.clone(),
            json: args.json.clone(),
            width: args.width,
            height: args.height,
        });
    };

    let geometry = solve(&parameters).context("failed to solve the structure")?;
    let targets = ExportTargets {
        png: args.output.clone().unwrap_or_else(|| default_png_path(pitch)),
        svg: args.svg.clone(),
        json: args.json.clone(),
        width: args.width,
        height: args.height,
    };
    let written = export(&geometry, &targets)?;

    print!("{}", render_report(&geometry));
    for path in written {
        println!("Saved {}", path.display());
    }
    Ok(())
}
