use octree_nbody::{ScenarioConfig, Scenario};
use octree_nbody::{run_headless, bench_step_curve};

use anyhow::{Context, Result};
use clap::Parser;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file, looked up in the crate's `scenarios/` directory
    #[arg(short, default_value = "earth_moon.yaml")]
    file_name: String,

    /// Override the number of frames from the scenario
    #[arg(long)]
    frames: Option<usize>,

    /// Override the Barnes–Hut opening angle from the scenario
    #[arg(long)]
    sd_max_ratio: Option<f64>,

    /// Print direct vs Barnes–Hut step timings instead of running a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("opening {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("parsing {}", config_path.display()))?;

    log::debug!("{:?}", scenario_cfg);

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.bench {
        bench_step_curve();
        return Ok(());
    }

    let mut scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    if let Some(frames) = args.frames {
        scenario_cfg.engine.frames = frames;
    }
    if let Some(ratio) = args.sd_max_ratio {
        scenario_cfg.engine.sd_max_ratio = Some(ratio);
    }

    let scenario = Scenario::build_scenario(scenario_cfg)?;
    let summary = run_headless(scenario)?;

    if summary.non_finite_bodies > 0 {
        log::warn!("{} bodies diverged", summary.non_finite_bodies);
    }

    Ok(())
}
