// src/simulation/load_parameters.rs

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde_yaml::from_reader;
use thiserror::Error;
use tracing::warn;

use crate::config::{Parameters, Scenario, SimulationInstance, SimulationSettings};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("ファイルを開けません: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML の解析に失敗しました: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{key} の値が数値ではありません: {value}")]
    InvalidNumber { key: String, value: String },

    #[error("初期化に必要な項目が不足しています: {}", .0.join(", "))]
    Incomplete(Vec<String>),
}

/// 初期化ファイルで必須のキー
const INIT_KEYS: [&str; 8] = ["a", "b", "c", "d", "prey", "predator", "t", "n"];

/// シナリオの読み込み
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<Scenario, LoadError> {
    let file = File::open(path)?;
    let scenario: Scenario = from_reader(file)?;
    Ok(scenario)
}

/// `key value` 形式の初期化ファイルの読み込み
pub fn load_init_file<P: AsRef<Path>>(path: P) -> Result<SimulationSettings, LoadError> {
    let file = File::open(path)?;
    parse_init(BufReader::new(file))
}

/// ファイル名（拡張子を除く）を実行名とする
fn run_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("sim")
        .to_string()
}

/// ディレクトリ内のすべての初期化ファイルの読み込み
///
/// ファイル名順に読み込む。読み込めないファイルはログに出して読み飛ばす。
pub fn load_init_dir<P: AsRef<Path>>(dir: P) -> Result<Vec<SimulationInstance>, LoadError> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let instances = paths
        .into_iter()
        .filter_map(|path| match load_init_file(&path) {
            Ok(settings) => Some(SimulationInstance {
                name: run_name(&path),
                settings,
            }),
            Err(err) => {
                warn!(path = %path.display(), "initialization file skipped: {}", err);
                None
            }
        })
        .collect();
    Ok(instances)
}

/// 実行するシミュレーションの一覧の読み込み
///
/// - `.yaml` / `.yml`: シナリオ
/// - ディレクトリ: 中の初期化ファイルすべて
/// - それ以外: 単一の初期化ファイル
pub fn load_runs<P: AsRef<Path>>(path: P) -> Result<Scenario, LoadError> {
    let path = path.as_ref();
    if is_yaml(path) {
        load_scenario(path)
    } else if path.is_dir() {
        Ok(Scenario::with_defaults(load_init_dir(path)?))
    } else {
        let settings = load_init_file(path)?;
        Ok(Scenario::with_defaults(vec![SimulationInstance {
            name: run_name(path),
            settings,
        }]))
    }
}

pub fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// `key value` 形式の初期化データの解析
///
/// 空行と `#` で始まる行は読み飛ばす。未知のキーと 3 つ目以降のトークンは無視する。
///
/// # 戻り値
/// - 8 つのキーがすべて揃っていれば初期条件
/// - 不足があれば `LoadError::Incomplete`
pub fn parse_init<R: BufRead>(reader: R) -> Result<SimulationSettings, LoadError> {
    let mut values: [Option<f64>; 8] = [None; 8];

    for line in reader.lines() {
        let line = line?;
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let (key, raw) = match (tokens.next(), tokens.next()) {
            (Some(key), Some(raw)) => (key, raw),
            _ => continue,
        };

        if let Some(index) = INIT_KEYS.iter().position(|&k| k == key) {
            let value = raw.parse::<f64>().map_err(|_| LoadError::InvalidNumber {
                key: key.to_string(),
                value: raw.to_string(),
            })?;
            values[index] = Some(value);
        }
    }

    let missing: Vec<String> = INIT_KEYS
        .iter()
        .zip(values.iter())
        .filter(|(_, v)| v.is_none())
        .map(|(k, _)| k.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::Incomplete(missing));
    }

    let [a, b, c, d, prey, predator, dt, iterations] = values.map(|v| v.unwrap_or_default());

    Ok(SimulationSettings {
        parameters: Parameters::new(a, b, c, d),
        prey,
        predator,
        dt,
        iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const INIT: &str = "\
# reference run
a 800
b 1
c 1
d 1000

prey 2000
predator 2000 individuals
t 0.0001
n 3
";

    #[test]
    fn test_parse_init() {
        let settings = parse_init(Cursor::new(INIT)).unwrap();
        assert_eq!(settings.parameters, Parameters::new(800.0, 1.0, 1.0, 1000.0));
        assert_eq!(settings.prey, 2000.0);
        assert_eq!(settings.predator, 2000.0);
        assert_eq!(settings.dt, 0.0001);
        assert_eq!(settings.iterations, 3.0);
    }

    #[test]
    fn test_parse_init_incomplete() {
        let err = parse_init(Cursor::new("a 800\nb 1\nprey 10\n")).unwrap_err();
        match err {
            LoadError::Incomplete(missing) => {
                assert_eq!(missing, vec!["c", "d", "predator", "t", "n"]);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_parse_init_invalid_number() {
        let err = parse_init(Cursor::new("a many\n")).unwrap_err();
        assert!(matches!(err, LoadError::InvalidNumber { ref key, .. } if key == "a"));
    }

    #[test]
    fn test_is_yaml() {
        assert!(is_yaml(Path::new("config/scenario.yaml")));
        assert!(is_yaml(Path::new("run.yml")));
        assert!(!is_yaml(Path::new("simulations/alpha.txt")));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_init_file("does-not-exist.txt").unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
        let err = load_scenario("does-not-exist.yaml").unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    fn scratch_dir(tag: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("lvsim-{}-{}", tag, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_runs_single_init_file() {
        let dir = scratch_dir("single");
        let path = dir.join("reference.txt");
        std::fs::write(&path, INIT).unwrap();

        let scenario = load_runs(&path).unwrap();
        assert_eq!(scenario.output_dir, "results");
        assert_eq!(scenario.precision, 6);
        assert_eq!(scenario.simulations.len(), 1);
        assert_eq!(scenario.simulations[0].name, "reference");
        assert_eq!(scenario.simulations[0].settings.iterations, 3.0);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_runs_yaml_is_scenario() {
        let dir = scratch_dir("yaml");
        let path = dir.join("scenario.yaml");
        std::fs::write(
            &path,
            "output_dir: out\n\
             simulations:\n\
             \x20 - name: reference\n\
             \x20   parameters: { prey_birth: 800, prey_death: 1, predator_birth: 1, predator_death: 1000 }\n\
             \x20   prey: 2000\n\
             \x20   predator: 2000\n\
             \x20   dt: 0.0001\n\
             \x20   iterations: 3\n",
        )
        .unwrap();

        let scenario = load_runs(&path).unwrap();
        assert_eq!(scenario.output_dir, "out");
        assert_eq!(scenario.simulations.len(), 1);
        assert_eq!(scenario.simulations[0].name, "reference");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_runs_directory_skips_bad_files() {
        let dir = scratch_dir("batch");
        std::fs::write(dir.join("beta.txt"), INIT.replace("prey 2000", "prey 1500")).unwrap();
        std::fs::write(dir.join("alpha.txt"), INIT).unwrap();
        std::fs::write(dir.join("broken.txt"), "a 800\n").unwrap();

        let scenario = load_runs(&dir).unwrap();
        let names: Vec<&str> = scenario.simulations.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta"]);
        assert_eq!(scenario.simulations[1].settings.prey, 1500.0);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
