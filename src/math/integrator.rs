// src/math/integrator.rs

use crate::config::Parameters;
use crate::models::{conserved_quantity, RelativeState, State};

/// 1ステップの積分結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// ステップを受理した（新しい作業座標の状態）
    Advanced(RelativeState),
    /// どちらかの個体数がゼロ以下になった（棄却された候補値）
    Extinct { prey: f64, predator: f64 },
}

/// 作業座標での陽的 Euler 法による Lotka-Volterra 方程式の積分
///
/// # 引数
/// - `params`: 方程式の係数
/// - `previous`: 直前の絶対座標の状態（保存量の計算に使用）
/// - `current`: 現在の作業座標の状態
/// - `dt`: 時間刻み
///
/// # 戻り値
/// - 受理された場合は `StepOutcome::Advanced`
/// - 個体数がゼロ以下になる場合は `StepOutcome::Extinct`
pub fn lotka_volterra_euler(
    params: &Parameters,
    previous: &State,
    current: &RelativeState,
    dt: f64,
) -> StepOutcome {
    let xr = current.prey;
    let yr = current.predator;

    let prey = xr + params.prey_birth * (1.0 - yr) * xr * dt;
    let predator = yr + params.predator_death * (xr - 1.0) * yr * dt;

    // NaN も棄却する
    if !(prey > 0.0) || !(predator > 0.0) {
        return StepOutcome::Extinct { prey, predator };
    }

    // H はステップ前の絶対座標の値から計算する
    let h = conserved_quantity(params, previous.prey, previous.predator);

    StepOutcome::Advanced(RelativeState { prey, predator, h })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> Parameters {
        Parameters::new(800.0, 1.0, 1.0, 1000.0)
    }

    /// 平衡点から 2000 匹ずつの状態で 1 ステップ進める
    /// 期待値は xr' = 2 + 800 * (1 - 2.5) * 2 * 1e-4 = 1.76, yr' = 2.5 + 1000 * 1 * 2.5 * 1e-4 = 2.75
    #[test]
    fn test_single_step() {
        let previous = State { prey: 2000.0, predator: 2000.0, h: 0.0 };
        let current = RelativeState { prey: 2.0, predator: 2.5, h: 0.0 };

        match lotka_volterra_euler(&params(), &previous, &current, 0.0001) {
            StepOutcome::Advanced(next) => {
                assert!((next.prey - 1.76).abs() < 1e-12);
                assert!((next.predator - 2.75).abs() < 1e-12);
                let expected_h = conserved_quantity(&params(), 2000.0, 2000.0);
                assert!((next.h - expected_h).abs() < 1e-9);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_equilibrium_is_fixed_point() {
        let previous = State { prey: 1000.0, predator: 800.0, h: 0.0 };
        let current = RelativeState { prey: 1.0, predator: 1.0, h: 0.0 };

        match lotka_volterra_euler(&params(), &previous, &current, 0.0001) {
            StepOutcome::Advanced(next) => {
                assert_eq!(next.prey, 1.0);
                assert_eq!(next.predator, 1.0);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    /// 大きな dt で被食者が負になるケース
    /// xr' = 1 + 800 * (1 - 3) * 1 * 0.01 = -15
    #[test]
    fn test_extinction_detected() {
        let previous = State { prey: 1000.0, predator: 2400.0, h: 0.0 };
        let current = RelativeState { prey: 1.0, predator: 3.0, h: 0.0 };

        let outcome = lotka_volterra_euler(&params(), &previous, &current, 0.01);
        assert!(matches!(outcome, StepOutcome::Extinct { prey, .. } if prey < 0.0));
    }

    /// ちょうどゼロになる場合も絶滅として扱う
    /// xr' = 1 + 1 * (1 - 2) * 1 * 1 = 0
    #[test]
    fn test_exact_zero_is_extinct() {
        let p = Parameters::new(1.0, 1.0, 1.0, 1.0);
        let previous = State { prey: 1.0, predator: 2.0, h: 0.0 };
        let current = RelativeState { prey: 1.0, predator: 2.0, h: 0.0 };

        let outcome = lotka_volterra_euler(&p, &previous, &current, 1.0);
        assert_eq!(outcome, StepOutcome::Extinct { prey: 0.0, predator: 2.0 });
    }
}
