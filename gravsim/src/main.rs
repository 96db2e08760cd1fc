use gravsim::control::spawn_stdin_listener;
use gravsim::{run_3d, step, LogSink, Scenario, ScenarioConfig};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(about = "Direct-sum N-body gravity simulator")]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, long, default_value = "default.yaml")]
    file_name: String,

    /// Run without the viewer; time scale is read from stdin, one value per line
    #[arg(long)]
    headless: bool,

    /// Number of ticks in headless mode
    #[arg(long, default_value_t = 600)]
    steps: u64,

    /// Clock delta per tick in headless mode, seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    frame_dt: f64,

    /// Sleep for `frame_dt` between headless ticks
    #[arg(long)]
    realtime: bool,

    /// Override the scenario seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the starting time scale
    #[arg(long)]
    time_scale: Option<f64>,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }
}

// load here to keep main clean
fn load_scenario_config(args: &Args) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(&args.file_name);
    let text = fs::read_to_string(&config_path)
        .with_context(|| format!("failed to read {}", config_path.display()))?;
    let mut cfg = ScenarioConfig::from_yaml_str(&text)
        .with_context(|| format!("failed to parse {}", config_path.display()))?;

    if let Some(seed) = args.seed {
        cfg.initial.seed = Some(seed);
    }
    if let Some(ts) = args.time_scale {
        cfg.parameters.time_scale = ts;
    }
    Ok(cfg)
}

fn run_headless(mut scenario: Scenario, args: &Args) -> Result<()> {
    info!(
        bodies = scenario.system.bodies.len(),
        seed = ?scenario.seed,
        steps = args.steps,
        "starting headless run"
    );

    let (g, min_sep) = (scenario.parameters.g, scenario.parameters.min_separation());
    let energy = |s: &Scenario| s.system.kinetic_energy() + s.system.potential_energy(g, min_sep);
    let e0 = energy(&scenario);
    let p0 = scenario.system.total_momentum();

    // Detached: the thread blocks on stdin and ends with the process
    let _listener = spawn_stdin_listener(scenario.time_scale.clone())
        .context("failed to start control listener")?;

    let report_every = (args.steps / 10).max(1);
    let mut sink = LogSink;
    for tick in 1..=args.steps {
        step(&mut scenario, args.frame_dt, &mut sink);

        if tick % report_every == 0 {
            info!(
                tick,
                t = scenario.system.t,
                time_scale = scenario.time_scale.get(),
                energy = energy(&scenario),
                "progress"
            );
        }
        if args.realtime {
            thread::sleep(Duration::from_secs_f64(args.frame_dt));
        }
    }

    let drift = (scenario.system.total_momentum() - p0).norm();
    info!(
        t = scenario.system.t,
        momentum_drift = drift,
        energy_start = e0,
        energy_end = energy(&scenario),
        "headless run finished"
    );
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Bevy's LogPlugin installs its own subscriber for the viewer
    if args.headless {
        init_tracing();
    }

    anyhow::ensure!(
        args.frame_dt.is_finite() && args.frame_dt >= 0.0,
        "--frame-dt must be finite and >= 0, got {}",
        args.frame_dt
    );

    let cfg = load_scenario_config(&args)?;
    let scenario = Scenario::build_scenario(&cfg)?;

    if args.headless {
        run_headless(scenario, &args)
    } else {
        run_3d(scenario);
        Ok(())
    }
}
