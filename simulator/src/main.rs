use anyhow::Context;
use clap::Parser;
use generator::profile::{build_flight, demonstration_samples};
use log::info;
use std::path::PathBuf;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Telemetry conditioning workflow driver")]
struct Args {
    /// Replay the two-sample demonstration flight instead of generating one
    #[arg(long, default_value_t = false)]
    demo: bool,
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Override the number of generated samples
    #[arg(long)]
    samples: Option<usize>,
    /// Override the generator seed
    #[arg(long)]
    seed: Option<u64>,
    /// Emit each conditioned container as a JSON line
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut workflow_config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::default()
    };
    if let Some(samples) = args.samples {
        workflow_config.generator.samples = samples;
    }
    if let Some(seed) = args.seed {
        workflow_config.generator.seed = seed;
    }

    let samples = if args.demo {
        demonstration_samples()
    } else {
        build_flight(&workflow_config.generator).context("generating synthetic flight")?
    };

    let runner = Runner::new(workflow_config.clone());
    let result = runner.execute(samples)?;

    if args.json {
        for output in &result.outputs {
            let line = serde_json::to_string(output).context("serializing container")?;
            println!("{}", line);
        }
    } else {
        for output in &result.outputs {
            println!("{}", output);
        }
    }

    let reference = result.reference;
    info!(
        "workflow `{}` done: {} containers from t={:?} on the boot clock, origin ({}), reference ({}), boot time {}",
        workflow_config.name,
        result.outputs.len(),
        result.started_at,
        reference.origin(),
        reference.reference(),
        reference.boot_time()
    );

    Ok(())
}
