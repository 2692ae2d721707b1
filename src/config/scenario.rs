// src/config/scenario.rs

use serde::Deserialize;

use crate::config::parameters::SimulationSettings;

fn default_output_dir() -> String {
    "results".to_string()
}

fn default_precision() -> usize {
    6
}

/// 複数のシミュレーションをまとめたシナリオ
#[derive(Debug, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_precision")]
    pub precision: usize,
    pub simulations: Vec<SimulationInstance>,
}

impl Scenario {
    /// 出力先と桁数を既定値としたシナリオ
    pub fn with_defaults(simulations: Vec<SimulationInstance>) -> Self {
        Scenario {
            output_dir: default_output_dir(),
            precision: default_precision(),
            simulations,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SimulationInstance {
    pub name: String,
    #[serde(flatten)]
    pub settings: SimulationSettings,
}
