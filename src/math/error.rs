// src/math/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// 構築時の入力値が不正
    #[error("不正な引数: {0}")]
    InvalidArgument(String),

    /// 個体数がゼロ以下になるステップを棄却した
    #[error("絶滅を検出しました (prey = {prey}, predator = {predator})")]
    Extinction { prey: f64, predator: f64 },
}
