// src/models/state.rs

use crate::config::Parameters;

/// 絶対座標での生態系の状態
///
/// `h` は保存量（第一積分）で、数値安定性の確認に用いる診断値。
/// 比較は個体数のみで行い、`h` は比較対象に含めない。
#[derive(Debug, Clone, Copy)]
pub struct State {
    pub prey: f64,
    pub predator: f64,
    pub h: f64,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.prey == other.prey && self.predator == other.predator
    }
}

/// 平衡点を (1, 1) に移した作業座標での状態
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativeState {
    pub prey: f64,
    pub predator: f64,
    pub h: f64,
}

/// 絶対座標の個体数から保存量 H を計算
///
/// H = C*x + B*y - D*ln(x) - A*ln(y)
pub fn conserved_quantity(params: &Parameters, prey: f64, predator: f64) -> f64 {
    params.predator_birth * prey + params.prey_death * predator
        - (params.predator_death * prey.ln() + params.prey_birth * predator.ln())
}

/// 絶対座標から作業座標への変換
///
/// # 戻り値
/// - (相対被食者数, 相対捕食者数)
pub fn to_relative(params: &Parameters, prey: f64, predator: f64) -> (f64, f64) {
    (
        prey * params.predator_birth / params.predator_death,
        predator * params.prey_death / params.prey_birth,
    )
}

/// 作業座標から絶対座標への逆変換
pub fn to_absolute(params: &Parameters, rel_prey: f64, rel_predator: f64) -> (f64, f64) {
    (
        rel_prey * params.predator_death / params.predator_birth,
        rel_predator * params.prey_birth / params.prey_death,
    )
}
