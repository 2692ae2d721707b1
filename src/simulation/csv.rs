// src/simulation/csv.rs

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::math::Statistics;
use crate::models::State;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("出力ファイルに書き込めません: {0}")]
    Io(#[from] std::io::Error),
}

/// シミュレーション結果の出力先
pub trait ResultSink {
    fn export_history(&mut self, history: &[State]) -> Result<(), ExportError>;

    fn export_statistics(&mut self, prey: &Statistics, predator: &Statistics) -> Result<(), ExportError>;
}

/// 履歴のヘッダーと各行の書き込み（タブ区切り）
pub fn write_history<W: Write>(
    writer: &mut W,
    history: &[State],
    precision: usize,
) -> Result<(), std::io::Error> {
    writer.write_all(b"prey\tpredator\tH\n")?;
    for state in history {
        writeln!(
            writer,
            "{:.p$}\t{:.p$}\t{:.p$}",
            state.prey,
            state.predator,
            state.h,
            p = precision
        )?;
    }
    Ok(())
}

/// 時刻付きの時系列の書き込み（time = i * dt）
pub fn write_time_series<W: Write>(
    writer: &mut W,
    history: &[State],
    dt: f64,
    precision: usize,
) -> Result<(), std::io::Error> {
    writer.write_all(b"time\tprey\tpredator\tH\n")?;
    for (i, state) in history.iter().enumerate() {
        writeln!(
            writer,
            "{:.p$}\t{:.p$}\t{:.p$}\t{:.p$}",
            i as f64 * dt,
            state.prey,
            state.predator,
            state.h,
            p = precision
        )?;
    }
    Ok(())
}

fn write_block<W: Write>(
    writer: &mut W,
    title: &str,
    stat: &Statistics,
    precision: usize,
) -> Result<(), std::io::Error> {
    writeln!(writer, "{}' STATISTICS", title)?;
    writeln!(writer, "- mean: {:.p$}", stat.mean, p = precision)?;
    writeln!(writer, "- \u{03C3}: {:.p$}", stat.sigma, p = precision)?;
    writeln!(writer, "- maximum: {:.p$}", stat.maximum, p = precision)?;
    writeln!(writer, "- minimum: {:.p$}", stat.minimum, p = precision)?;
    Ok(())
}

/// 統計量の書き込み
pub fn write_statistics<W: Write>(
    writer: &mut W,
    prey: &Statistics,
    predator: &Statistics,
    precision: usize,
) -> Result<(), std::io::Error> {
    write_block(writer, "PREY", prey, precision)?;
    write_block(writer, "PREDATOR", predator, precision)
}

/// `<dir>/<name>.evolution.csv` と `<dir>/<name>.statistics.txt` に出力する
#[derive(Debug, Clone)]
pub struct TsvExporter {
    pub output_dir: PathBuf,
    pub name: String,
    pub precision: usize,
}

impl TsvExporter {
    pub fn new<P: AsRef<Path>>(output_dir: P, name: &str, precision: usize) -> Self {
        TsvExporter {
            output_dir: output_dir.as_ref().to_path_buf(),
            name: name.to_string(),
            precision,
        }
    }

    pub fn evolution_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.evolution.csv", self.name))
    }

    pub fn statistics_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.statistics.txt", self.name))
    }

    pub fn time_series_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.timeseries.csv", self.name))
    }

    fn create(&self, path: &Path) -> Result<BufWriter<File>, ExportError> {
        fs::create_dir_all(&self.output_dir)?;
        Ok(BufWriter::new(File::create(path)?))
    }

    /// 描画用の時系列を `<dir>/<name>.timeseries.csv` に出力
    pub fn export_time_series(&self, history: &[State], dt: f64) -> Result<(), ExportError> {
        if history.len() < 2 {
            warn!(name = %self.name, "no evolution to export");
            return Ok(());
        }
        let path = self.time_series_path();
        let mut writer = self.create(&path)?;
        write_time_series(&mut writer, history, dt, self.precision)?;
        writer.flush()?;
        Ok(())
    }
}

impl ResultSink for TsvExporter {
    fn export_history(&mut self, history: &[State]) -> Result<(), ExportError> {
        if history.len() < 2 {
            warn!(name = %self.name, "no evolution to export");
            return Ok(());
        }
        let path = self.evolution_path();
        let mut writer = self.create(&path)?;
        write_history(&mut writer, history, self.precision)?;
        writer.flush()?;
        info!(path = %path.display(), "evolution saved");
        Ok(())
    }

    fn export_statistics(&mut self, prey: &Statistics, predator: &Statistics) -> Result<(), ExportError> {
        let path = self.statistics_path();
        let mut writer = self.create(&path)?;
        write_statistics(&mut writer, prey, predator, self.precision)?;
        writer.flush()?;
        info!(path = %path.display(), "statistics saved");
        Ok(())
    }
}

/// 任意の `Write` への出力（標準出力への表示など）
pub struct TextExporter<W: Write> {
    writer: W,
    precision: usize,
}

impl<W: Write> TextExporter<W> {
    pub fn new(writer: W, precision: usize) -> Self {
        TextExporter { writer, precision }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ResultSink for TextExporter<W> {
    fn export_history(&mut self, history: &[State]) -> Result<(), ExportError> {
        if history.len() < 2 {
            warn!("no evolution to display");
            return Ok(());
        }
        write_history(&mut self.writer, history, self.precision)?;
        Ok(())
    }

    fn export_statistics(&mut self, prey: &Statistics, predator: &Statistics) -> Result<(), ExportError> {
        write_statistics(&mut self.writer, prey, predator, self.precision)?;
        Ok(())
    }
}
