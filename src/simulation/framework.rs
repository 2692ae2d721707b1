// src/simulation/framework.rs

use tracing::{debug, info, warn};

use crate::config::{Parameters, SimulationSettings};
use crate::math::{lotka_volterra_euler, summarize, SimulationError, Statistics, StepOutcome};
use crate::models::{conserved_quantity, to_absolute, to_relative, RelativeState, State};

/// これ以上の時間刻みでは陽的スキームの安定性が低下する
pub const DT_QUALITY_THRESHOLD: f64 = 0.001;

/// `compute` が終了した理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// 履歴が反復回数に達した
    BudgetExhausted,
    /// 絶滅を検出して停止した（`at_step` は棄却されたステップの履歴上の位置）
    Extinct { at_step: usize },
}

/// 捕食者-被食者シミュレーション
#[derive(Debug, Clone)]
pub struct Simulation {
    params: Parameters,
    dt: f64,
    iterations: usize,
    state: RelativeState,
    evolution: Vec<State>,
    prey_stat: Option<Statistics>,
    pred_stat: Option<Statistics>,
}

/// 設定ファイルから受け付ける反復回数の上限
pub const MAX_ITERATIONS: usize = 1_000_000_000;

/// 実数の反復回数を切り捨てて整数に変換
pub fn coerce_iterations(value: f64) -> Result<usize, SimulationError> {
    if !value.is_finite() || value.trunc() < 1.0 || value.trunc() > MAX_ITERATIONS as f64 {
        return Err(SimulationError::InvalidArgument(format!(
            "反復回数は自然数でなければなりません: {}",
            value
        )));
    }
    Ok(value.trunc() as usize)
}

impl Simulation {
    /// シミュレーションの初期化
    ///
    /// # 引数
    /// - `params`: 方程式の係数（すべて正）
    /// - `prey`, `predator`: 初期個体数（正）
    /// - `dt`: 時間刻み（正）
    /// - `iterations`: 履歴の最大長（1 以上）
    pub fn new(
        params: Parameters,
        prey: f64,
        predator: f64,
        dt: f64,
        iterations: usize,
    ) -> Result<Self, SimulationError> {
        if !params.all_positive() {
            return Err(SimulationError::InvalidArgument(
                "係数はすべて正でなければなりません".to_string(),
            ));
        }
        if !(prey > 0.0) || !(predator > 0.0) {
            return Err(SimulationError::InvalidArgument(format!(
                "初期個体数は正でなければなりません (prey = {}, predator = {})",
                prey, predator
            )));
        }
        if !(dt > 0.0) {
            return Err(SimulationError::InvalidArgument(format!(
                "時間刻みは正でなければなりません: {}",
                dt
            )));
        }
        if dt >= DT_QUALITY_THRESHOLD {
            warn!(dt, "quality warning: a large time increment produces less stable simulations");
        }
        if iterations == 0 {
            return Err(SimulationError::InvalidArgument(
                "反復回数は自然数でなければなりません: 0".to_string(),
            ));
        }

        let h = conserved_quantity(&params, prey, predator);
        let (rel_prey, rel_predator) = to_relative(&params, prey, predator);

        Ok(Simulation {
            params,
            dt,
            iterations,
            state: RelativeState {
                prey: rel_prey,
                predator: rel_predator,
                h,
            },
            evolution: vec![State { prey, predator, h }],
            prey_stat: None,
            pred_stat: None,
        })
    }

    /// 設定ファイルから読み込んだ初期条件で初期化
    pub fn from_settings(settings: &SimulationSettings) -> Result<Self, SimulationError> {
        let iterations = coerce_iterations(settings.iterations)?;
        Simulation::new(
            settings.parameters,
            settings.prey,
            settings.predator,
            settings.dt,
            iterations,
        )
    }

    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    pub fn initial_state(&self) -> &State {
        &self.evolution[0]
    }

    pub fn current_state(&self) -> &State {
        // 履歴は構築時に必ず 1 件以上ある
        &self.evolution[self.evolution.len() - 1]
    }

    pub fn internal_state(&self) -> &RelativeState {
        &self.state
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn history(&self) -> &[State] {
        &self.evolution
    }

    pub fn prey_statistics(&self) -> Option<&Statistics> {
        self.prey_stat.as_ref()
    }

    pub fn predator_statistics(&self) -> Option<&Statistics> {
        self.pred_stat.as_ref()
    }

    /// 1ステップ進めて履歴に追加
    ///
    /// # 戻り値
    /// - 追加された絶対座標の状態
    /// - 個体数がゼロ以下になる場合は `SimulationError::Extinction`（状態と履歴は変化しない）
    pub fn step(&mut self) -> Result<&State, SimulationError> {
        let previous = *self.current_state();

        match lotka_volterra_euler(&self.params, &previous, &self.state, self.dt) {
            StepOutcome::Advanced(next) => {
                let (prey, predator) = to_absolute(&self.params, next.prey, next.predator);
                self.state = next;
                self.evolution.push(State {
                    prey,
                    predator,
                    h: next.h,
                });
                Ok(self.current_state())
            }
            StepOutcome::Extinct { prey, predator } => {
                // 作業座標は直前の値のまま、H は最後の履歴の値に戻す
                self.state.h = previous.h;
                Err(SimulationError::Extinction { prey, predator })
            }
        }
    }

    /// 履歴が反復回数に達するか絶滅するまで積分
    pub fn compute(&mut self) -> Termination {
        while self.evolution.len() < self.iterations {
            let result = self.step().map(|_| ());
            if let Err(err) = result {
                warn!(step = self.evolution.len(), "{}", err);
                return Termination::Extinct {
                    at_step: self.evolution.len(),
                };
            }
        }
        debug!(length = self.evolution.len(), "iteration budget exhausted");
        Termination::BudgetExhausted
    }

    /// 被食者・捕食者それぞれの統計量を計算して保持
    ///
    /// # 戻り値
    /// - (被食者の統計量, 捕食者の統計量)
    /// - 履歴が 2 件未満の場合は `None`（保持している統計量は変更しない）
    pub fn compute_statistics(&mut self) -> Option<(Statistics, Statistics)> {
        if self.evolution.len() < 2 {
            warn!(length = self.evolution.len(), "not enough data for statistics");
            return None;
        }

        let prey = summarize(self.evolution.iter().map(|s| s.prey))?;
        let predator = summarize(self.evolution.iter().map(|s| s.predator))?;

        info!(
            prey_mean = prey.mean,
            predator_mean = predator.mean,
            samples = self.evolution.len(),
            "statistics computed"
        );

        self.prey_stat = Some(prey);
        self.pred_stat = Some(predator);
        Some((prey, predator))
    }
}
