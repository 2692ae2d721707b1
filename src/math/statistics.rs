// src/math/statistics.rs

/// 時系列の要約統計量
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    pub mean: f64,
    pub sigma: f64, // 母標準偏差
    pub maximum: f64,
    pub minimum: f64,
}

/// 系列の要約統計量を計算
///
/// 平均と二乗平均を 1 回の走査で集計し、`sqrt(E[x^2] - E[x]^2)` を標準偏差とする。
/// 最大値・最小値が複数ある場合は先に現れた値を採用する。
///
/// # 戻り値
/// - 系列が空の場合は `None`
pub fn summarize<I>(values: I) -> Option<Statistics>
where
    I: IntoIterator<Item = f64>,
{
    let mut iter = values.into_iter();
    let first = iter.next()?;

    let (count, sum, sum_sq, maximum, minimum) = iter.fold(
        (1usize, first, first * first, first, first),
        |(count, sum, sum_sq, maximum, minimum), v| {
            (
                count + 1,
                sum + v,
                sum_sq + v * v,
                if v > maximum { v } else { maximum },
                if v < minimum { v } else { minimum },
            )
        },
    );

    let n = count as f64;
    let mean = sum / n;
    // 丸め誤差で僅かに負になる場合がある
    let variance = (sum_sq / n - mean.powi(2)).max(0.0);

    Some(Statistics {
        mean,
        sigma: variance.sqrt(),
        maximum,
        minimum,
    })
}
