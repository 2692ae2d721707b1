// src/config/parameters.rs

use serde::Deserialize;

/// Lotka-Volterra 方程式の係数
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub prey_birth: f64,     // 被食者の出生率 (A)
    pub prey_death: f64,     // 被食者の死亡率 (B)
    pub predator_birth: f64, // 捕食者の出生率 (C)
    pub predator_death: f64, // 捕食者の死亡率 (D)
}

impl Parameters {
    pub fn new(prey_birth: f64, prey_death: f64, predator_birth: f64, predator_death: f64) -> Self {
        Parameters {
            prey_birth,
            prey_death,
            predator_birth,
            predator_death,
        }
    }

    /// すべての係数が正であるか
    pub fn all_positive(&self) -> bool {
        [
            self.prey_birth,
            self.prey_death,
            self.predator_birth,
            self.predator_death,
        ]
        .iter()
        .all(|&v| v > 0.0)
    }
}

/// 1本のシミュレーションの初期条件
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SimulationSettings {
    pub parameters: Parameters,
    pub prey: f64,       // 被食者の初期個体数
    pub predator: f64,   // 捕食者の初期個体数
    pub dt: f64,         // 時間刻み
    pub iterations: f64, // 履歴の最大長 (小数は切り捨て)
}
