use orbitsim::{preset, Scenario, ScenarioConfig, ScenarioRun, PRESETS};
use orbitsim::{bench_forces, bench_steps_curve};

use anyhow::{bail, Context, Result};
use clap::Parser;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Fixed-step N-body gravity simulation")]
struct Args {
    /// Scenario file, looked up under scenarios/ if not found as given
    #[arg(short, long, default_value = "trinary.yaml")]
    file_name: String,

    /// Built-in scenario instead of a file (trinary, polaris, earth-moon)
    #[arg(short, long)]
    preset: Option<String>,

    /// Override the number of steps
    #[arg(long)]
    steps: Option<usize>,

    /// Override the step size in seconds
    #[arg(long)]
    dt: Option<f64>,

    /// Accumulate forces on all cores
    #[arg(long)]
    parallel: bool,

    /// Run the force / step benchmarks and exit
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario(args: &Args) -> Result<ScenarioConfig> {
    if let Some(name) = &args.preset {
        return match preset(name) {
            Some(cfg) => Ok(cfg),
            None => bail!("unknown preset '{}', expected one of {:?}", name, PRESETS),
        };
    }

    let given = PathBuf::from(&args.file_name);
    let config_path = if given.exists() {
        given
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(&args.file_name)
    };
    Ok(ScenarioConfig::from_yaml_file(&config_path)?)
}

fn report<const D: usize>(run: &ScenarioRun<D>) {
    let sim = &run.simulator;
    log::info!("t = {} s after {} steps", sim.time(), sim.steps());
    for (i, body) in sim.bodies().iter().enumerate() {
        log::info!(
            "{:>20}: position {:?} Mm, velocity {:?} km/s, {} trajectory points",
            body.label(i),
            body.position().as_slice(),
            body.velocity().as_slice(),
            body.trajectory().len()
        );
    }
    log::info!("total momentum {:?} kg km/s", sim.total_momentum().as_slice());
    log::info!("total energy {:e} J", sim.total_energy());
    log::debug!(
        "{} sampled frames (stride {})",
        run.frames().len(),
        run.parameters.sample_stride
    );
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.bench {
        bench_forces()?;
        bench_steps_curve()?;
        return Ok(());
    }

    let scenario_cfg = load_scenario(&args).context("failed to load scenario")?;
    let mut scenario = Scenario::build_scenario(&scenario_cfg).context("invalid scenario")?;

    let params = scenario.parameters_mut();
    if let Some(steps) = args.steps {
        params.steps = steps;
    }
    if let Some(dt) = args.dt {
        params.dt = dt;
    }
    params.parallel |= args.parallel;

    log::info!(
        "running {} bodies in {}D: {} steps of {} s",
        scenario_cfg.bodies.len(),
        scenario.dimension(),
        scenario.parameters().steps,
        scenario.parameters().dt
    );

    scenario.run().context("simulation failed")?;

    match &scenario {
        Scenario::Planar(run) => report(run),
        Scenario::Spatial(run) => report(run),
    }

    Ok(())
}
