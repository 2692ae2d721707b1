// src/main.rs

use std::error::Error;
use std::path::Path;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use lvsim::config::SimulationInstance;
use lvsim::simulation::load_parameters::load_runs;
use lvsim::simulation::{ResultSink, TsvExporter};
use lvsim::{Simulation, Termination};

const DEFAULT_SCENARIO: &str = "config/scenario.yaml";

fn main() -> Result<(), Box<dyn Error>> {
    // RUST_LOG が未設定なら info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_SCENARIO.to_string());
    let path = Path::new(&path);

    // シナリオ、初期化ファイルのディレクトリ、または単一の初期化ファイルの読み込み
    let scenario = load_runs(path)?;
    let output_dir = scenario.output_dir;
    let precision = scenario.precision;

    for SimulationInstance { name, settings } in scenario.simulations {
        let mut sim = match Simulation::from_settings(&settings) {
            Ok(sim) => sim,
            Err(err) => {
                error!(%name, "initialization failed: {}", err);
                continue;
            }
        };

        if let Err(err) = run(&name, &mut sim, &output_dir, precision) {
            error!(%name, "simulation failed: {}", err);
        }
    }

    Ok(())
}

/// 1本のシミュレーションを実行して結果を出力
fn run(
    name: &str,
    sim: &mut Simulation,
    output_dir: &str,
    precision: usize,
) -> Result<(), Box<dyn Error>> {
    match sim.compute() {
        Termination::BudgetExhausted => {
            info!(%name, length = sim.history().len(), "simulation completed")
        }
        Termination::Extinct { at_step } => {
            warn!(%name, at_step, "simulation stopped by extinction")
        }
    }

    let mut exporter = TsvExporter::new(output_dir, name, precision);
    exporter.export_history(sim.history())?;
    exporter.export_time_series(sim.history(), sim.dt())?;
    if let Some((prey, predator)) = sim.compute_statistics() {
        exporter.export_statistics(&prey, &predator)?;
    }

    Ok(())
}
