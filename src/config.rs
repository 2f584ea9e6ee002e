use std::path::PathBuf;

use miette::{Context, IntoDiagnostic};

const DEFAULT_BATCH_SIZE: usize = 500;

#[derive(Debug)]
pub struct Config {
  pub workbook_path: PathBuf,
  pub output_path:   Option<PathBuf>,
  pub batch_size:    usize,
}

impl Config {
  pub fn from_env() -> miette::Result<Self> {
    let workbook_path = std::env::var("WORKBOOK_PATH")
      .into_diagnostic()
      .context("missing `WORKBOOK_PATH` env var")?;

    let output_path = std::env::var("OUTPUT_PATH").ok().map(PathBuf::from);

    let batch_size = match std::env::var("BATCH_SIZE") {
      Ok(batch_size) => parse_batch_size(&batch_size)?,
      Err(_) => DEFAULT_BATCH_SIZE,
    };

    Ok(Self {
      workbook_path: PathBuf::from(workbook_path),
      output_path,
      batch_size,
    })
  }
}

fn parse_batch_size(raw: &str) -> miette::Result<usize> {
  let batch_size = raw
    .trim()
    .parse::<usize>()
    .into_diagnostic()
    .context(format!("failed to parse batch size, got {raw:?}"))?;
  miette::ensure!(batch_size > 0, "batch size must be at least 1");
  Ok(batch_size)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn batch_size_accepts_positive_integers() {
    assert_eq!(parse_batch_size("500").unwrap(), 500);
    assert_eq!(parse_batch_size(" 20 ").unwrap(), 20);
  }

  #[test]
  fn batch_size_rejects_zero_and_garbage() {
    assert!(parse_batch_size("0").is_err());
    assert!(parse_batch_size("many").is_err());
  }
}
